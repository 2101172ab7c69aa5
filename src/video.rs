use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::deserialize_id;
use crate::deserialize_one_or_many;
use crate::song::Child;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Subtitles and alternative encodings available for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub captions: Vec<Captions>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub audio_track: Vec<AudioTrack>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub conversion: Vec<VideoConversion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Captions {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConversion {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Bit rate in kbps
    pub bit_rate: Option<u32>,
    pub audio_track_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Videos {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    video: Vec<Child>,
}

impl SubsonicClient {
    /// Get all video files.
    pub async fn videos(&self) -> Result<Vec<Child>, Error> {
        let resp: Videos = self
            .do_request(Method::GET, "/getVideos", None, "videos")
            .await?;

        Ok(resp.video)
    }

    /// Get captions, audio tracks and conversions for a video.
    pub async fn video_info(&self, id: &str) -> Result<VideoInfo, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getVideoInfo", Some(&query), "videoInfo")
            .await
    }
}
