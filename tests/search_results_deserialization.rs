//! Tests for deserializing search results from JSON.
//!
//! This module tests that a complete `search3` response, as sent by an
//! OpenSubsonic server, decodes into SearchResults.

use sonicrs::{Envelope, SearchResults};
use std::fs;

#[test]
fn test_deserialize_example_search_result() {
    let body = fs::read("tests/example_search_result.json")
        .expect("Failed to read example_search_result.json");

    let mut response = match Envelope::from_slice(&body).expect("Failed to decode envelope") {
        Envelope::Ok(response) => response,
        Envelope::Failed(err) => panic!("Expected ok envelope, got: {}", err),
    };

    // Server metadata is decoded separately from the payload
    assert_eq!(response.version.as_deref(), Some("1.16.1"));
    assert_eq!(response.server_type.as_deref(), Some("navidrome"));
    assert!(response.open_subsonic);

    let results: SearchResults = response
        .take("searchResult3")
        .expect("Failed to deserialize searchResult3");

    // Verify artists were deserialized correctly
    assert_eq!(results.artist.len(), 2);
    assert_eq!(results.artist[0].name, "John Coltrane");
    assert_eq!(results.artist[0].album_count, Some(4));
    assert!(results.artist[0].starred.is_none());
    assert!(results.artist[1].starred.is_some());

    // A single album is sent as a bare object, not an array
    assert_eq!(results.album.len(), 1);
    let album = &results.album[0];
    assert_eq!(album.name, "Blue Train");
    assert_eq!(album.artist_id.as_deref(), Some("3f1c2b9e0a4d"));
    assert_eq!(album.year, Some(1957));
    assert!(album.song.is_empty());

    // Verify songs were deserialized correctly
    assert_eq!(results.song.len(), 2);
    let first = &results.song[0];
    assert_eq!(first.title, "Blue Train");
    assert_eq!(first.suffix.as_deref(), Some("flac"));
    assert_eq!(first.media_type.as_deref(), Some("music"));
    assert_eq!(first.size, Some(87436112));
    assert!(!first.is_dir);

    let second = &results.song[1];
    assert_eq!(second.user_rating, Some(5));
    assert!(second.starred.is_some());
}

#[test]
fn test_payload_is_consumed_once() {
    let body = fs::read("tests/example_search_result.json")
        .expect("Failed to read example_search_result.json");

    let mut response = Envelope::from_slice(&body)
        .unwrap()
        .into_result()
        .unwrap();

    assert!(response.get("searchResult3").is_some());
    let _: SearchResults = response.take("searchResult3").unwrap();
    assert!(response.get("searchResult3").is_none());
}
