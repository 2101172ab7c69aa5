use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::deserialize_id;
use crate::deserialize_one_or_many;
use crate::deserialize_opt_id;
use crate::song::Child;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A top-level music folder configured on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MusicFolder {
    /// Folder identifier, usable as `musicFolderId` in other calls
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name of the folder
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MusicFolders {
    #[serde(default, rename = "musicFolder", deserialize_with = "deserialize_one_or_many")]
    folders: Vec<MusicFolder>,
}

/// The file-structure artist index returned by `getIndexes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indexes {
    /// Last time the collection changed, in milliseconds since the epoch
    #[serde(default)]
    pub last_modified: u64,
    /// Space-separated articles ignored when sorting (e.g. "The El La")
    #[serde(default)]
    pub ignored_articles: String,
    /// Artists grouped by their first letter
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub index: Vec<Index>,
    /// Shortcut entries configured by the administrator
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub shortcut: Vec<IndexArtist>,
    /// Files placed directly in the music folder root
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub child: Vec<Child>,
}

/// One letter group of the file-structure index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub artist: Vec<IndexArtist>,
}

/// An artist directory in the file-structure index.
///
/// The `id` is a directory id, to be passed to
/// [`SubsonicClient::music_directory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexArtist {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub artist_image_url: Option<String>,
    pub starred: Option<String>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
}

/// A directory listing returned by `getMusicDirectory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Id of the enclosing directory, if any
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub parent: Option<String>,
    pub name: String,
    pub starred: Option<String>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub play_count: Option<u64>,
    /// Sub-directories and files
    #[serde(default, rename = "child", deserialize_with = "deserialize_one_or_many")]
    pub children: Vec<Child>,
}

/// A genre with its song and album counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    /// Genre name
    pub value: String,
    #[serde(default)]
    pub song_count: u32,
    #[serde(default)]
    pub album_count: u32,
}

#[derive(Debug, Deserialize)]
struct Genres {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    genre: Vec<Genre>,
}

impl SubsonicClient {
    /// Get all configured top-level music folders.
    pub async fn music_folders(&self) -> Result<Vec<MusicFolder>, Error> {
        let resp: MusicFolders = self
            .do_request(Method::GET, "/getMusicFolders", None, "musicFolders")
            .await?;

        Ok(resp.folders)
    }

    /// Get the file-structure index of all artists.
    ///
    /// # Arguments
    ///
    /// * `music_folder_id` - Only return artists in this music folder
    /// * `if_modified_since` - Only return a result if the collection changed
    ///   after this time (milliseconds since the epoch)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let indexes = client.indexes(None, None).await?;
    /// for index in indexes.index {
    ///     println!("{}: {} artists", index.name, index.artist.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn indexes(
        &self,
        music_folder_id: Option<&str>,
        if_modified_since: Option<u64>,
    ) -> Result<Indexes, Error> {
        let query = Query::new()
            .with_opt("musicFolderId", music_folder_id)
            .with_opt("ifModifiedSince", if_modified_since);

        self.do_request(Method::GET, "/getIndexes", Some(&query), "indexes")
            .await
    }

    /// List the contents of a music directory.
    ///
    /// Typically used to get the albums of an artist, or the songs of an album.
    ///
    /// # Arguments
    ///
    /// * `id` - Directory id, obtained from [`SubsonicClient::indexes`] or a previous listing
    pub async fn music_directory(&self, id: &str) -> Result<Directory, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getMusicDirectory", Some(&query), "directory")
            .await
    }

    /// Get all genres.
    pub async fn genres(&self) -> Result<Vec<Genre>, Error> {
        let resp: Genres = self
            .do_request(Method::GET, "/getGenres", None, "genres")
            .await?;

        Ok(resp.genre)
    }
}
