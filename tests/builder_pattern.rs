//! Tests for the SubsonicClient builder pattern functionality.
//!
//! This module tests that the "with_*" builder methods work correctly,
//! that they leave the other settings alone, and that every setting ends up
//! in the signed request URL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use sonicrs::{Error, Query, SubsonicClient};
use url::Url;

fn params(url: &str) -> HashMap<String, String> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
}

#[test]
fn test_builder_pattern_basic() {
    let client = SubsonicClient::new("https://music.example.com", "alice", "sesame").unwrap();

    // Verify default values
    assert_eq!(client.server(), "https://music.example.com/");
    assert_eq!(client.username(), "alice");
    assert_eq!(client.client_name(), "sonicrs");
    assert_eq!(client.api_version(), "1.15.0");
    assert_eq!(client.log_target(), "sonicrs");
}

#[test]
fn test_builder_pattern_with_client_name() {
    let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")
        .unwrap()
        .with_client_name("my-player");

    assert_eq!(client.client_name(), "my-player");
    assert_eq!(client.api_version(), "1.15.0"); // Should still be default
    assert_eq!(params(&client.build_url("/ping", None))["c"], "my-player");
}

#[test]
fn test_builder_pattern_with_api_version() {
    let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")
        .unwrap()
        .with_api_version("1.16.1");

    assert_eq!(client.api_version(), "1.16.1");
    assert_eq!(client.client_name(), "sonicrs"); // Should still be default
    assert_eq!(params(&client.build_url("/ping", None))["v"], "1.16.1");
}

#[test]
fn test_builder_pattern_with_log_target() {
    let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")
        .unwrap()
        .with_log_target("sonicrs::living_room");

    assert_eq!(client.log_target(), "sonicrs::living_room");
    assert_eq!(client.client_name(), "sonicrs"); // Should still be default
}

#[test]
fn test_builder_pattern_with_custom_http_client() {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")
        .unwrap()
        .with_client(http);

    assert_eq!(client.username(), "alice");
}

#[test]
fn test_builder_pattern_chaining() {
    let client = SubsonicClient::new("http://localhost:4533/navidrome/", "bob", "hunter2")
        .unwrap()
        .with_client_name("chained")
        .with_api_version("1.16.0")
        .with_log_target("chained");

    let url = client.build_url("/getAlbum", Some(&Query::new().with("id", "al-1")));
    assert!(url.starts_with("http://localhost:4533/navidrome/rest/getAlbum?"));

    let params = params(&url);
    assert_eq!(params["u"], "bob");
    assert_eq!(params["c"], "chained");
    assert_eq!(params["v"], "1.16.0");
    assert_eq!(params["f"], "json");
    assert_eq!(params["id"], "al-1");
    assert_eq!(params["t"], sonicrs::derive_token("hunter2", &params["s"]));
}

#[test]
fn test_separate_clients_do_not_share_settings() {
    let first = SubsonicClient::new("https://one.example.com", "alice", "sesame")
        .unwrap()
        .with_log_target("first");
    let second = SubsonicClient::new("https://two.example.com", "bob", "hunter2").unwrap();

    assert_eq!(first.log_target(), "first");
    assert_eq!(second.log_target(), "sonicrs");
}

#[test]
fn test_client_is_shareable() {
    let client = Arc::new(SubsonicClient::new("https://music.example.com", "alice", "sesame").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || client.build_url("/ping", None))
        })
        .collect();

    let urls: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for url in &urls {
        assert_eq!(params(url)["u"], "alice");
    }
}

#[test]
fn test_invalid_server_url() {
    match SubsonicClient::new("music.example.com", "alice", "sesame") {
        Err(Error::InvalidUrl(_)) => {}
        other => panic!("Expected InvalidUrl error, got: {:?}", other),
    }
}
