//! Library browsing example demonstrating the ID3 browsing endpoints.
//!
//! This example shows how to:
//! - Check connectivity and credentials
//! - List the artist index
//! - Show an artist's albums and the songs of one album
//! - Search the library
//!
//! Set SUBSONIC_URL, SUBSONIC_USER and SUBSONIC_PASSWORD to point it at your
//! server, and RUST_LOG=sonicrs=debug to see the requests.

use sonicrs::{AlbumListType, SearchQuery, SubsonicClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let server = std::env::var("SUBSONIC_URL").unwrap_or_else(|_| "http://localhost:4533".to_string());
    let user = std::env::var("SUBSONIC_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("SUBSONIC_PASSWORD").unwrap_or_default();

    let client = SubsonicClient::new(&server, user, password)?;

    client.ping().await?;
    println!("Connected to {}", client.server());

    // List the first few artists of every index letter
    let artists = client.artists(None).await?;
    for index in &artists.index {
        let names: Vec<&str> = index.artist.iter().take(3).map(|a| a.name.as_str()).collect();
        println!("{}: {}", index.name, names.join(", "));
    }

    // Drill down into the first artist
    let Some(first) = artists.index.iter().flat_map(|i| i.artist.iter()).next() else {
        println!("The library is empty");
        return Ok(());
    };

    let artist = client.artist(&first.id).await?;
    println!("\n{} has {} albums", artist.name, artist.album.len());

    if let Some(album) = artist.album.first() {
        let album = client.album(&album.id).await?;
        println!("\n{} ({})", album.name, album.year.map(|y| y.to_string()).unwrap_or_default());
        for song in &album.song {
            let duration = song.duration.unwrap_or(0);
            println!(
                "  {:>2}. {} [{}:{:02}]",
                song.track.unwrap_or(0),
                song.title,
                duration / 60,
                duration % 60
            );
        }
    }

    // Newest additions
    println!("\nNewest albums:");
    for album in client.album_list2(AlbumListType::Newest, Some(5), None, None).await? {
        println!("  {} - {}", album.artist.unwrap_or_default(), album.name);
    }

    // Search
    let mut query = SearchQuery::new(&first.name);
    query.song_count = Some(5);
    let results = client.search3(query).await?;
    println!("\nSongs matching \"{}\":", first.name);
    for song in results.song {
        println!("  {}", song.title);
    }

    Ok(())
}
