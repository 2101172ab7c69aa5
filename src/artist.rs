use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::album::Album;
use crate::deserialize_id;
use crate::deserialize_one_or_many;
use crate::song::{Child, SongList};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Represents an artist organized by ID3 tags.
///
/// Artists from lists (`getArtists`, `search3`, `getStarred2`) carry no
/// albums; the artist returned by [`SubsonicClient::artist`] has `album`
/// filled in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Unique artist identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Artist name
    pub name: String,
    /// Cover art id, for [`SubsonicClient::cover_art`]
    pub cover_art: Option<String>,
    /// External artist image URL, if the server has one
    pub artist_image_url: Option<String>,
    /// Number of albums by this artist
    pub album_count: Option<u32>,
    /// ISO timestamp when the artist was starred, if it is
    pub starred: Option<String>,
    /// Albums by this artist (only filled in by `getArtist`)
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub album: Vec<Album>,
}

/// The ID3 artist index returned by `getArtists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistsIndex {
    /// Space-separated articles ignored when sorting (e.g. "The El La")
    #[serde(default)]
    pub ignored_articles: String,
    /// Artists grouped by their first letter
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub index: Vec<ArtistIndexEntry>,
}

/// One letter group of the ID3 artist index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistIndexEntry {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub artist: Vec<Artist>,
}

/// Biography and related data for an artist, typically from last.fm.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    pub biography: Option<String>,
    pub music_brainz_id: Option<String>,
    pub last_fm_url: Option<String>,
    pub small_image_url: Option<String>,
    pub medium_image_url: Option<String>,
    pub large_image_url: Option<String>,
    /// Similar artists present in the library
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub similar_artist: Vec<Artist>,
}

impl SubsonicClient {
    /// Get all artists, organized by ID3 tags.
    ///
    /// # Arguments
    ///
    /// * `music_folder_id` - Only return artists in this music folder
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let artists = client.artists(None).await?;
    /// for index in artists.index {
    ///     for artist in index.artist {
    ///         println!("{} ({} albums)", artist.name, artist.album_count.unwrap_or(0));
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn artists(&self, music_folder_id: Option<&str>) -> Result<ArtistsIndex, Error> {
        let query = Query::new().with_opt("musicFolderId", music_folder_id);

        self.do_request(Method::GET, "/getArtists", Some(&query), "artists")
            .await
    }

    /// Get an artist and its albums.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let artist = client.artist("ar-42").await?;
    /// for album in artist.album {
    ///     println!("{}", album.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn artist(&self, id: &str) -> Result<Artist, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getArtist", Some(&query), "artist")
            .await
    }

    /// Get biography, images and similar artists for an artist.
    ///
    /// # Arguments
    ///
    /// * `id` - Artist id
    /// * `count` - Maximum number of similar artists (server default 20)
    /// * `include_not_present` - Also return similar artists that are not in the library
    pub async fn artist_info2(
        &self,
        id: &str,
        count: Option<u32>,
        include_not_present: Option<bool>,
    ) -> Result<ArtistInfo, Error> {
        let query = Query::new()
            .with("id", id)
            .with_opt("count", count)
            .with_opt("includeNotPresent", include_not_present);

        self.do_request(Method::GET, "/getArtistInfo2", Some(&query), "artistInfo2")
            .await
    }

    /// Get the top songs of an artist, by artist name.
    ///
    /// # Arguments
    ///
    /// * `artist` - Artist name
    /// * `count` - Maximum number of songs to return (server default 50)
    pub async fn top_songs(&self, artist: &str, count: Option<u32>) -> Result<Vec<Child>, Error> {
        let query = Query::new().with("artist", artist).with_opt("count", count);

        let resp: SongList = self
            .do_request(Method::GET, "/getTopSongs", Some(&query), "topSongs")
            .await?;

        Ok(resp.song)
    }
}
