//! Download example demonstrating how to fetch a song to disk.
//!
//! Usage: download_song <song id> <destination path>
//!
//! The file lands at the destination only once it is complete; an
//! interrupted download never leaves a truncated file in its place.

use sonicrs::{StreamOptions, SubsonicClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(id), Some(dest)) = (args.next(), args.next()) else {
        eprintln!("usage: download_song <song id> <destination path>");
        std::process::exit(2);
    };

    let server = std::env::var("SUBSONIC_URL").unwrap_or_else(|_| "http://localhost:4533".to_string());
    let user = std::env::var("SUBSONIC_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("SUBSONIC_PASSWORD").unwrap_or_default();

    let client = SubsonicClient::new(&server, user, password)?;

    let song = client.song(&id).await?;
    println!(
        "Downloading {} by {} ({})",
        song.title,
        song.artist.as_deref().unwrap_or("Unknown"),
        song.suffix.as_deref().unwrap_or("?")
    );

    client.download(&id, &dest).await?;
    println!("Saved to {}", dest);

    // A transcoded stream can also be handed to an external player
    let url = client.stream_url(
        &id,
        StreamOptions {
            format: Some("mp3"),
            max_bit_rate: Some(192),
            ..Default::default()
        },
    );
    println!("Stream it with: mpv '{}'", url);

    Ok(())
}
