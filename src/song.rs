use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::deserialize_id;
use crate::deserialize_one_or_many;
use crate::deserialize_opt_id;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A file or directory entry, as Subsonic models songs, videos and folders.
///
/// Songs returned by the ID3 endpoints (`getSong`, `getAlbum`, ...) and
/// entries of a directory listing share this shape. Directories have
/// `is_dir` set and carry little more than an id and a title.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    /// Unique identifier, also used for streaming and downloading
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Id of the containing directory
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub parent: Option<String>,
    /// Whether this entry is a directory
    #[serde(default)]
    pub is_dir: bool,
    /// Song title, or directory name
    #[serde(default)]
    pub title: String,
    pub album: Option<String>,
    pub artist: Option<String>,
    /// Track number within the album
    pub track: Option<u32>,
    pub year: Option<u32>,
    pub genre: Option<String>,
    /// Cover art id, for [`SubsonicClient::cover_art`]
    pub cover_art: Option<String>,
    /// File size in bytes
    pub size: Option<u64>,
    /// MIME type of the original file
    pub content_type: Option<String>,
    /// File extension of the original file (e.g. "flac")
    pub suffix: Option<String>,
    pub transcoded_content_type: Option<String>,
    pub transcoded_suffix: Option<String>,
    /// Duration in seconds
    pub duration: Option<u32>,
    /// Bit rate in kbps
    pub bit_rate: Option<u32>,
    /// Path relative to the music folder
    pub path: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub play_count: Option<u64>,
    pub disc_number: Option<u32>,
    /// ISO timestamp when the file was added
    pub created: Option<String>,
    /// ISO timestamp when the entry was starred, if it is
    pub starred: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub album_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub artist_id: Option<String>,
    /// Media type: "music", "podcast", "audiobook" or "video"
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// Saved bookmark position in milliseconds
    pub bookmark_position: Option<u64>,
}

/// A song currently being played by some user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingEntry {
    /// The song being played
    #[serde(flatten)]
    pub song: Child,
    pub username: String,
    /// Minutes since playback started
    #[serde(default)]
    pub minutes_ago: u32,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub player_id: Option<String>,
    pub player_name: Option<String>,
}

// Payloads whose only content is a list of songs.
#[derive(Debug, Deserialize)]
pub(crate) struct SongList {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub song: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct NowPlaying {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    entry: Vec<NowPlayingEntry>,
}

/// Optional filters for [`SubsonicClient::random_songs`].
#[derive(Debug, Clone, Default)]
pub struct RandomSongsQuery<'a> {
    /// Maximum number of songs to return (server default 10, max 500)
    pub size: Option<u32>,
    /// Only songs of this genre
    pub genre: Option<&'a str>,
    /// Only songs released in this year or later
    pub from_year: Option<u32>,
    /// Only songs released in this year or earlier
    pub to_year: Option<u32>,
    /// Only songs in this music folder
    pub music_folder_id: Option<&'a str>,
}

impl RandomSongsQuery<'_> {
    fn to_query(&self) -> Query {
        Query::new()
            .with_opt("size", self.size)
            .with_opt("genre", self.genre)
            .with_opt("fromYear", self.from_year)
            .with_opt("toYear", self.to_year)
            .with_opt("musicFolderId", self.music_folder_id)
    }
}

impl SubsonicClient {
    /// Get details for a song.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let song = client.song("tr-1234").await?;
    /// println!("{} by {}", song.title, song.artist.unwrap_or_default());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn song(&self, id: &str) -> Result<Child, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getSong", Some(&query), "song")
            .await
    }

    /// Get random songs matching the given filters.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::RandomSongsQuery;
    ///
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let songs = client
    ///     .random_songs(RandomSongsQuery {
    ///         size: Some(20),
    ///         genre: Some("Jazz"),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn random_songs(&self, filters: RandomSongsQuery<'_>) -> Result<Vec<Child>, Error> {
        let query = filters.to_query();

        let resp: SongList = self
            .do_request(Method::GET, "/getRandomSongs", Some(&query), "randomSongs")
            .await?;

        Ok(resp.song)
    }

    /// Get songs in a given genre.
    ///
    /// # Arguments
    ///
    /// * `genre` - Genre name, as returned by [`SubsonicClient::genres`]
    /// * `count` - Maximum number of songs to return (server default 10, max 500)
    /// * `offset` - Number of songs to skip
    /// * `music_folder_id` - Only songs in this music folder
    pub async fn songs_by_genre(
        &self,
        genre: &str,
        count: Option<u32>,
        offset: Option<u32>,
        music_folder_id: Option<&str>,
    ) -> Result<Vec<Child>, Error> {
        let query = Query::new()
            .with("genre", genre)
            .with_opt("count", count)
            .with_opt("offset", offset)
            .with_opt("musicFolderId", music_folder_id);

        let resp: SongList = self
            .do_request(Method::GET, "/getSongsByGenre", Some(&query), "songsByGenre")
            .await?;

        Ok(resp.song)
    }

    /// Get songs similar to the given artist, album or song, by ID3 tags.
    ///
    /// # Arguments
    ///
    /// * `id` - Artist, album or song id
    /// * `count` - Maximum number of songs to return (server default 50)
    pub async fn similar_songs2(&self, id: &str, count: Option<u32>) -> Result<Vec<Child>, Error> {
        let query = Query::new().with("id", id).with_opt("count", count);

        let resp: SongList = self
            .do_request(Method::GET, "/getSimilarSongs2", Some(&query), "similarSongs2")
            .await?;

        Ok(resp.song)
    }

    /// Get what all users are currently playing.
    pub async fn now_playing(&self) -> Result<Vec<NowPlayingEntry>, Error> {
        let resp: NowPlaying = self
            .do_request(Method::GET, "/getNowPlaying", None, "nowPlaying")
            .await?;

        Ok(resp.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_songs_query_omits_unset_filters() {
        let query = RandomSongsQuery {
            size: Some(5),
            from_year: Some(1990),
            ..Default::default()
        }
        .to_query();

        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(pairs, vec![("size", "5"), ("fromYear", "1990")]);
    }

    #[test]
    fn now_playing_entry_flattens_song() {
        let entry: NowPlayingEntry = serde_json::from_value(serde_json::json!({
            "id": "tr-1",
            "title": "So What",
            "artist": "Miles Davis",
            "username": "alice",
            "minutesAgo": 2,
            "playerId": 7
        }))
        .unwrap();

        assert_eq!(entry.song.id, "tr-1");
        assert_eq!(entry.song.artist.as_deref(), Some("Miles Davis"));
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.player_id.as_deref(), Some("7"));
    }
}
