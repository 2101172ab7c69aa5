use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::deserialize_id;
use crate::deserialize_one_or_many;
use crate::song::Child;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Represents a playlist on the server.
///
/// Playlists from [`SubsonicClient::playlists`] carry no entries; the
/// playlist returned by [`SubsonicClient::playlist`] has `entry` filled in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Playlist name
    pub name: String,
    pub comment: Option<String>,
    /// Username of the owner
    pub owner: Option<String>,
    /// Whether other users can see the playlist
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub song_count: u32,
    /// Total duration in seconds
    #[serde(default)]
    pub duration: u32,
    /// ISO timestamp when the playlist was created
    pub created: Option<String>,
    /// ISO timestamp when the playlist was last changed
    pub changed: Option<String>,
    pub cover_art: Option<String>,
    /// Users allowed to see a private playlist
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub allowed_user: Vec<String>,
    /// Songs in playlist order
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub entry: Vec<Child>,
}

/// Changes to apply with [`SubsonicClient::update_playlist`].
///
/// Unset fields are left unchanged on the server.
#[derive(Debug, Clone, Default)]
pub struct PlaylistUpdate<'a> {
    pub name: Option<&'a str>,
    pub comment: Option<&'a str>,
    pub public: Option<bool>,
    /// Songs to append
    pub song_ids_to_add: Vec<&'a str>,
    /// Zero-based positions of entries to remove
    pub song_indexes_to_remove: Vec<u32>,
}

impl PlaylistUpdate<'_> {
    fn to_query(&self, playlist_id: &str) -> Query {
        Query::new()
            .with("playlistId", playlist_id)
            .with_opt("name", self.name)
            .with_opt("comment", self.comment)
            .with_opt("public", self.public)
            .with_all("songIdToAdd", &self.song_ids_to_add)
            .with_all("songIndexToRemove", &self.song_indexes_to_remove)
    }
}

#[derive(Debug, Deserialize)]
struct Playlists {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    playlist: Vec<Playlist>,
}

impl SubsonicClient {
    /// Get all playlists the user is allowed to play.
    ///
    /// # Arguments
    ///
    /// * `username` - List the playlists of this user instead (admin only)
    pub async fn playlists(&self, username: Option<&str>) -> Result<Vec<Playlist>, Error> {
        let query = Query::new().with_opt("username", username);

        let resp: Playlists = self
            .do_request(Method::GET, "/getPlaylists", Some(&query), "playlists")
            .await?;

        Ok(resp.playlist)
    }

    /// Get a playlist and its entries.
    pub async fn playlist(&self, id: &str) -> Result<Playlist, Error> {
        let query = Query::new().with("id", id);

        self.do_request(Method::GET, "/getPlaylist", Some(&query), "playlist")
            .await
    }

    /// Create a new playlist containing the given songs.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let playlist = client.create_playlist("Road trip", &["tr-1", "tr-2"]).await?;
    /// println!("Created {} with {} songs", playlist.id, playlist.song_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_playlist(&self, name: &str, song_ids: &[&str]) -> Result<Playlist, Error> {
        let query = Query::new().with("name", name).with_all("songId", song_ids);

        self.do_request(Method::POST, "/createPlaylist", Some(&query), "playlist")
            .await
    }

    /// Replace every song of an existing playlist.
    pub async fn replace_playlist(&self, playlist_id: &str, song_ids: &[&str]) -> Result<Playlist, Error> {
        let query = Query::new()
            .with("playlistId", playlist_id)
            .with_all("songId", song_ids);

        self.do_request(Method::POST, "/createPlaylist", Some(&query), "playlist")
            .await
    }

    /// Rename, describe, publish or edit the entries of a playlist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::PlaylistUpdate;
    ///
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// client
    ///     .update_playlist("pl-3", PlaylistUpdate {
    ///         name: Some("Road trip 2"),
    ///         song_ids_to_add: vec!["tr-9"],
    ///         song_indexes_to_remove: vec![0],
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_playlist(&self, playlist_id: &str, update: PlaylistUpdate<'_>) -> Result<(), Error> {
        let query = update.to_query(playlist_id);

        self.do_empty_request(Method::POST, "/updatePlaylist", Some(&query))
            .await
    }

    /// Delete a playlist.
    pub async fn delete_playlist(&self, id: &str) -> Result<(), Error> {
        let query = Query::new().with("id", id);

        self.do_empty_request(Method::POST, "/deletePlaylist", Some(&query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_repeats_list_parameters() {
        let update = PlaylistUpdate {
            public: Some(false),
            song_ids_to_add: vec!["a", "b"],
            song_indexes_to_remove: vec![3],
            ..Default::default()
        };

        let query = update.to_query("pl-1");
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("playlistId", "pl-1"),
                ("public", "false"),
                ("songIdToAdd", "a"),
                ("songIdToAdd", "b"),
                ("songIndexToRemove", "3"),
            ]
        );
    }
}
