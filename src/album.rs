use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::deserialize_id;
use crate::deserialize_one_or_many;
use crate::deserialize_opt_id;
use crate::song::Child;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

/// Represents an album organized by ID3 tags.
///
/// Albums from lists carry no songs; the album returned by
/// [`SubsonicClient::album`] has `song` filled in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Unique album identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Album title
    pub name: String,
    /// Album artist name
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub artist_id: Option<String>,
    /// Cover art id, for [`SubsonicClient::cover_art`]
    pub cover_art: Option<String>,
    /// Number of songs on the album
    #[serde(default)]
    pub song_count: u32,
    /// Total duration in seconds
    #[serde(default)]
    pub duration: u32,
    pub play_count: Option<u64>,
    /// ISO timestamp when the album was added
    pub created: Option<String>,
    /// ISO timestamp when the album was starred, if it is
    pub starred: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
    /// Songs on the album (only filled in by `getAlbum`)
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub song: Vec<Child>,
}

/// Notes and images for an album, typically from last.fm.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    pub notes: Option<String>,
    pub music_brainz_id: Option<String>,
    pub last_fm_url: Option<String>,
    pub small_image_url: Option<String>,
    pub medium_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

/// Ordering, and for some variants filtering, of an album list.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum AlbumListType {
    Random,
    Newest,
    /// Highest rated
    Highest,
    /// Most frequently played
    Frequent,
    /// Most recently played
    Recent,
    AlphabeticalByName,
    AlphabeticalByArtist,
    Starred,
    /// Albums released between two years, inclusive. Reverse the years to
    /// sort newest first.
    ByYear { from_year: u32, to_year: u32 },
    /// Albums of a given genre
    ByGenre(String),
}

#[derive(Debug, Deserialize)]
struct AlbumList {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    album: Vec<Album>,
}

impl SubsonicClient {
    /// Get an album and its songs.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let album = client.album("al-7").await?;
    /// for song in album.song {
    ///     println!("{:>2}. {}", song.track.unwrap_or(0), song.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn album(&self, id: &str) -> Result<Album, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getAlbum", Some(&query), "album")
            .await
    }

    /// Get notes and images for an album.
    pub async fn album_info2(&self, id: &str) -> Result<AlbumInfo, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getAlbumInfo2", Some(&query), "albumInfo")
            .await
    }

    /// Get a list of albums, organized by ID3 tags.
    ///
    /// # Arguments
    ///
    /// * `list_type` - How to select and order the albums
    /// * `size` - Number of albums to return (server default 10, max 500)
    /// * `offset` - Number of albums to skip
    /// * `music_folder_id` - Only albums in this music folder
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::AlbumListType;
    ///
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let newest = client.album_list2(AlbumListType::Newest, Some(20), None, None).await?;
    /// let nineties = client
    ///     .album_list2(AlbumListType::ByYear { from_year: 1990, to_year: 1999 }, None, None, None)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn album_list2(
        &self,
        list_type: AlbumListType,
        size: Option<u32>,
        offset: Option<u32>,
        music_folder_id: Option<&str>,
    ) -> Result<Vec<Album>, Error> {
        let query = album_list_query(&list_type)
            .with_opt("size", size)
            .with_opt("offset", offset)
            .with_opt("musicFolderId", music_folder_id);

        let resp: AlbumList = self
            .do_request(Method::GET, "/getAlbumList2", Some(&query), "albumList2")
            .await?;

        Ok(resp.album)
    }
}

fn album_list_query(list_type: &AlbumListType) -> Query {
    let query = Query::new().with("type", list_type.as_ref());

    match list_type {
        AlbumListType::ByYear { from_year, to_year } => query
            .with("fromYear", from_year)
            .with("toYear", to_year),
        AlbumListType::ByGenre(genre) => query.with("genre", genre),
        _ => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_type_names() {
        assert_eq!(AlbumListType::Newest.as_ref(), "newest");
        assert_eq!(AlbumListType::AlphabeticalByArtist.as_ref(), "alphabeticalByArtist");
        assert_eq!(AlbumListType::ByGenre("Rock".into()).as_ref(), "byGenre");
    }

    #[test]
    fn by_year_adds_range() {
        let query = album_list_query(&AlbumListType::ByYear {
            from_year: 2000,
            to_year: 1990,
        });

        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            vec![("type", "byYear"), ("fromYear", "2000"), ("toYear", "1990")]
        );
    }

    #[test]
    fn album_accepts_single_song_object() {
        let album: Album = serde_json::from_value(serde_json::json!({
            "id": "al-1",
            "name": "Kind of Blue",
            "songCount": 1,
            "duration": 545,
            "song": {"id": "tr-1", "title": "So What"}
        }))
        .unwrap();

        assert_eq!(album.song.len(), 1);
        assert_eq!(album.song[0].title, "So What");
    }
}
