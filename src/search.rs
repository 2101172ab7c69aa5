use crate::Error;
use crate::Query;
use crate::SubsonicClient;
use crate::album::Album;
use crate::artist::Artist;
use crate::deserialize_one_or_many;
use crate::song::Child;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A search query for finding artists, albums and songs by ID3 tags.
///
/// Each result type is paged independently. Unset fields fall back to the
/// server defaults (20 artists, 20 albums, 20 songs, offset 0).
#[derive(Debug, Clone)]
pub struct SearchQuery<'a> {
    /// The search query string
    pub query: &'a str,
    /// Maximum number of artists to return
    pub artist_count: Option<u32>,
    /// Number of artists to skip
    pub artist_offset: Option<u32>,
    /// Maximum number of albums to return
    pub album_count: Option<u32>,
    /// Number of albums to skip
    pub album_offset: Option<u32>,
    /// Maximum number of songs to return
    pub song_count: Option<u32>,
    /// Number of songs to skip
    pub song_offset: Option<u32>,
    /// Only search in this music folder
    pub music_folder_id: Option<&'a str>,
}

impl<'a> SearchQuery<'a> {
    /// Create a new search query with the specified search string.
    ///
    /// Servers require a non-empty `query`. An empty string is dropped like
    /// any other empty parameter, so the server answers with a missing
    /// parameter error ([`crate::ApiErrorCode::MissingParameter`]).
    ///
    /// # Example
    ///
    /// ```
    /// use sonicrs::SearchQuery;
    ///
    /// let mut search = SearchQuery::new("Coltrane");
    /// search.song_count = Some(50);
    /// ```
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            artist_count: None,
            artist_offset: None,
            album_count: None,
            album_offset: None,
            song_count: None,
            song_offset: None,
            music_folder_id: None,
        }
    }

    fn to_query(&self) -> Query {
        Query::new()
            .with("query", self.query)
            .with_opt("artistCount", self.artist_count)
            .with_opt("artistOffset", self.artist_offset)
            .with_opt("albumCount", self.album_count)
            .with_opt("albumOffset", self.album_offset)
            .with_opt("songCount", self.song_count)
            .with_opt("songOffset", self.song_offset)
            .with_opt("musicFolderId", self.music_folder_id)
    }
}

/// Results of a `search3` call, organized by type.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchResults {
    /// Matching artists
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub artist: Vec<Artist>,
    /// Matching albums
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub album: Vec<Album>,
    /// Matching songs
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub song: Vec<Child>,
}

impl SubsonicClient {
    /// Search for artists, albums and songs.
    ///
    /// Fails with [`Error::Api`] (code 10, missing parameter) if
    /// `search.query` is empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::SearchQuery;
    ///
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// let results = client.search3(SearchQuery::new("Coltrane")).await?;
    ///
    /// for artist in results.artist {
    ///     println!("Artist: {}", artist.name);
    /// }
    /// for album in results.album {
    ///     println!("Album: {}", album.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search3(&self, search: SearchQuery<'_>) -> Result<SearchResults, Error> {
        let query = search.to_query();

        self.do_request(Method::GET, "/search3", Some(&query), "searchResult3")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_keeps_only_set_fields() {
        let mut search = SearchQuery::new("blue train");
        search.album_count = Some(5);
        search.song_offset = Some(40);

        let pairs: Vec<_> = search.to_query().iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "blue train".to_string()),
                ("albumCount".to_string(), "5".to_string()),
                ("songOffset".to_string(), "40".to_string()),
            ]
        );
    }

    #[test]
    fn empty_search_string_is_not_sent() {
        let search = SearchQuery::new("");

        let query = search.to_query();
        assert_eq!(query.get("query"), None);
        assert!(query.is_empty());
    }
}
