use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Lyrics for a song, as returned by `getLyrics`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Lyrics {
    pub artist: Option<String>,
    pub title: Option<String>,
    /// The lyrics text; absent when nothing was found
    #[serde(default)]
    pub value: String,
}

/// Transcoding options for [`SubsonicClient::stream`].
///
/// Unset fields let the server decide, which usually means the original file.
#[derive(Debug, Clone, Default)]
pub struct StreamOptions<'a> {
    /// Maximum bit rate in kbps; 0 means no limit
    pub max_bit_rate: Option<u32>,
    /// Target format, e.g. "mp3", or "raw" to disable transcoding
    pub format: Option<&'a str>,
    /// Start offset in seconds (video only)
    pub time_offset: Option<u32>,
    /// Requested video size, e.g. "640x480"
    pub size: Option<&'a str>,
    /// Ask the server to estimate the Content-Length of transcoded media
    pub estimate_content_length: Option<bool>,
    /// Stream the converted (flv) variant of a video
    pub converted: Option<bool>,
}

impl StreamOptions<'_> {
    fn to_query(&self, id: &str) -> Query {
        Query::new()
            .with("id", id)
            .with_opt("maxBitRate", self.max_bit_rate)
            .with_opt("format", self.format)
            .with_opt("timeOffset", self.time_offset)
            .with_opt("size", self.size)
            .with_opt("estimateContentLength", self.estimate_content_length)
            .with_opt("converted", self.converted)
    }
}

fn cover_art_query(id: &str, size: Option<u32>) -> Query {
    Query::new().with("id", id).with_opt("size", size)
}

// `song.flac` -> `song.flac.part`, next to the destination so the final
// rename never crosses filesystems.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    dest.with_file_name(name)
}

async fn write_file(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(body).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

impl SubsonicClient {
    /// Download a file in its original format and write it to `dest`.
    ///
    /// The body is written to `<dest>.part` first and renamed over `dest`
    /// once it is fully on disk, so `dest` is either left untouched or holds
    /// the complete file. Missing parent directories are not created.
    ///
    /// # Errors
    ///
    /// Request failures are returned as for any other call; failures to
    /// write or rename the file are returned as [`Error::Io`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// client.download("tr-1234", "/tmp/so-what.flac").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download(&self, id: &str, dest: impl AsRef<Path>) -> Result<(), Error> {
        let dest = dest.as_ref();
        let body = self.download_bytes(id).await?;

        let part = part_path(dest);
        if let Err(e) = write_file(&part, &body).await {
            let _ = fs::remove_file(&part).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&part, dest).await {
            let _ = fs::remove_file(&part).await;
            return Err(e.into());
        }

        log::info!(
            target: self.log_target(),
            "Downloaded {} ({} bytes) to {}",
            id,
            body.len(),
            dest.display()
        );

        Ok(())
    }

    /// Download a file in its original format into memory.
    pub async fn download_bytes(&self, id: &str) -> Result<Bytes, Error> {
        let query = Query::new().with("id", id);

        self.request_bytes(Method::GET, "/download", Some(&query))
            .await
    }

    /// Fetch a song or video, transcoded according to `options`, into memory.
    ///
    /// For playback in an external player prefer [`SubsonicClient::stream_url`].
    pub async fn stream(&self, id: &str, options: StreamOptions<'_>) -> Result<Bytes, Error> {
        let query = options.to_query(id);

        self.request_bytes(Method::GET, "/stream", Some(&query))
            .await
    }

    /// Signed URL of a stream, to hand to a media player.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::StreamOptions;
    ///
    /// # fn example(client: sonicrs::SubsonicClient) {
    /// let url = client.stream_url("tr-1234", StreamOptions {
    ///     format: Some("mp3"),
    ///     max_bit_rate: Some(192),
    ///     ..Default::default()
    /// });
    /// println!("mpv {url}");
    /// # }
    /// ```
    pub fn stream_url(&self, id: &str, options: StreamOptions<'_>) -> String {
        self.build_url("/stream", Some(&options.to_query(id)))
    }

    /// Fetch cover art, optionally scaled to `size` pixels.
    pub async fn cover_art(&self, id: &str, size: Option<u32>) -> Result<Bytes, Error> {
        let query = cover_art_query(id, size);

        self.request_bytes(Method::GET, "/getCoverArt", Some(&query))
            .await
    }

    /// Signed URL of a cover art image.
    pub fn cover_art_url(&self, id: &str, size: Option<u32>) -> String {
        self.build_url("/getCoverArt", Some(&cover_art_query(id, size)))
    }

    /// Search lyrics by artist and title.
    pub async fn lyrics(&self, artist: Option<&str>, title: Option<&str>) -> Result<Lyrics, Error> {
        let query = Query::new()
            .with_opt("artist", artist)
            .with_opt("title", title);

        self.do_request(Method::GET, "/getLyrics", Some(&query), "lyrics")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_file_sits_next_to_destination() {
        assert_eq!(
            part_path(Path::new("/music/so-what.flac")),
            PathBuf::from("/music/so-what.flac.part")
        );
        assert_eq!(part_path(Path::new("song")), PathBuf::from("song.part"));
    }

    #[test]
    fn stream_options_use_camel_case_keys() {
        let options = StreamOptions {
            max_bit_rate: Some(128),
            format: Some("opus"),
            estimate_content_length: Some(true),
            ..Default::default()
        };

        let query = options.to_query("tr-9");
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("id", "tr-9"),
                ("maxBitRate", "128"),
                ("format", "opus"),
                ("estimateContentLength", "true"),
            ]
        );
    }

    #[test]
    fn stream_url_is_signed() {
        let client = SubsonicClient::new("https://music.example.com/", "alice", "sesame").unwrap();
        let url = client.stream_url("tr-9", StreamOptions::default());

        assert!(url.starts_with("https://music.example.com/rest/stream?u=alice&t="));
        assert!(url.ends_with("&f=json&id=tr-9"));
    }

    #[test]
    fn lyrics_without_text() {
        let lyrics: Lyrics = serde_json::from_str(r#"{"artist": "Miles Davis"}"#).unwrap();
        assert_eq!(lyrics.artist.as_deref(), Some("Miles Davis"));
        assert!(lyrics.value.is_empty());
    }
}
