use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::album::Album;
use crate::artist::Artist;
use crate::deserialize_one_or_many;
use crate::song::Child;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Everything the user has starred, organized by ID3 tags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Starred {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub artist: Vec<Artist>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub album: Vec<Album>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub song: Vec<Child>,
}

/// Items to star or unstar in one call.
///
/// Songs, albums and artists may be mixed freely.
#[derive(Debug, Clone, Default)]
pub struct StarTargets<'a> {
    /// Song ids (or folder ids when browsing by file structure)
    pub ids: Vec<&'a str>,
    pub album_ids: Vec<&'a str>,
    pub artist_ids: Vec<&'a str>,
}

impl<'a> StarTargets<'a> {
    /// Target a single song.
    pub fn song(id: &'a str) -> Self {
        Self {
            ids: vec![id],
            ..Default::default()
        }
    }

    /// Target a single album.
    pub fn album(id: &'a str) -> Self {
        Self {
            album_ids: vec![id],
            ..Default::default()
        }
    }

    /// Target a single artist.
    pub fn artist(id: &'a str) -> Self {
        Self {
            artist_ids: vec![id],
            ..Default::default()
        }
    }

    fn to_query(&self) -> Query {
        Query::new()
            .with_all("id", &self.ids)
            .with_all("albumId", &self.album_ids)
            .with_all("artistId", &self.artist_ids)
    }
}

impl SubsonicClient {
    /// Star songs, albums or artists.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::StarTargets;
    ///
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// client.star(StarTargets::album("al-7")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn star(&self, targets: StarTargets<'_>) -> Result<(), Error> {
        let query = targets.to_query();

        self.do_empty_request(Method::POST, "/star", Some(&query))
            .await
    }

    /// Remove the star from songs, albums or artists.
    pub async fn unstar(&self, targets: StarTargets<'_>) -> Result<(), Error> {
        let query = targets.to_query();

        self.do_empty_request(Method::POST, "/unstar", Some(&query))
            .await
    }

    /// Rate a song, album or artist from 1 to 5 stars. A rating of 0 removes
    /// the rating.
    pub async fn set_rating(&self, id: &str, rating: u8) -> Result<(), Error> {
        let query = Query::new().with("id", id).with("rating", rating.min(5));

        self.do_empty_request(Method::POST, "/setRating", Some(&query))
            .await
    }

    /// Register the playback of a song.
    ///
    /// # Arguments
    ///
    /// * `id` - The song that was played
    /// * `time` - When it was played, in milliseconds since the epoch
    /// * `submission` - `false` to report "now playing" only
    pub async fn scrobble(
        &self,
        id: &str,
        time: Option<u64>,
        submission: Option<bool>,
    ) -> Result<(), Error> {
        let query = Query::new()
            .with("id", id)
            .with_opt("time", time)
            .with_opt("submission", submission);

        self.do_empty_request(Method::POST, "/scrobble", Some(&query))
            .await
    }

    /// Get starred artists, albums and songs.
    pub async fn starred2(&self, music_folder_id: Option<&str>) -> Result<Starred, Error> {
        let query = Query::new().with_opt("musicFolderId", music_folder_id);

        self.do_request(Method::GET, "/getStarred2", Some(&query), "starred2")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_targets_repeat_keys() {
        let targets = StarTargets {
            ids: vec!["s1", "s2"],
            artist_ids: vec!["ar-1"],
            ..Default::default()
        };

        let query = targets.to_query();
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(pairs, vec![("id", "s1"), ("id", "s2"), ("artistId", "ar-1")]);
    }

    #[test]
    fn starred_tolerates_missing_sections() {
        let starred: Starred = serde_json::from_value(serde_json::json!({
            "song": {"id": "tr-3", "title": "Naima"}
        }))
        .unwrap();

        assert!(starred.artist.is_empty());
        assert!(starred.album.is_empty());
        assert_eq!(starred.song[0].id, "tr-3");
    }
}
