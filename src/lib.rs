#![doc = include_str!("../README.md")]

mod album;
mod annotation;
mod artist;
mod auth;
mod library;
mod media;
mod playlist;
mod query;
mod response;
mod search;
mod song;
mod system;
mod video;

pub use album::*;
pub use annotation::*;
pub use artist::*;
pub use auth::*;
pub use library::*;
pub use media::*;
pub use playlist::*;
pub use query::*;
pub use response::*;
pub use search::*;
pub use song::*;
pub use system::*;
pub use video::*;

use reqwest::Method;
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt;
use url::Url;

pub(crate) static DEFAULT_CLIENT_NAME: &str = "sonicrs";
pub(crate) static DEFAULT_API_VERSION: &str = "1.15.0";
pub(crate) static DEFAULT_LOG_TARGET: &str = "sonicrs";

/// Errors that can occur when using the sonicrs library.
///
/// Every failure of a request surfaces here; nothing is retried or swallowed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Only GET and POST are valid for the Subsonic REST API
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),
    /// The server answered with an HTTP status other than 200
    #[error("got status code {0}!")]
    HttpStatus(u16),
    /// The server answered with a `failed` Subsonic envelope
    #[error("Subsonic API error: {0}")]
    Api(ApiError),
    /// A successful envelope did not contain the expected payload key
    #[error("Response is missing the `{0}` payload")]
    MissingPayload(&'static str),
    /// HTTP request failed (network issues, timeouts, etc.)
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// JSON deserialization failed
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    /// The server URL could not be parsed
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The server URL parsed but cannot carry a REST path
    #[error("Server URL cannot be used as a base: {0}")]
    InvalidServerUrl(String),
    /// Reading or writing a local file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Main client for interacting with a Subsonic-compatible server.
///
/// The client holds the server address and the user's credentials. Every
/// request is signed with a fresh salt and token, so the password itself is
/// never sent over the wire.
///
/// # Example
///
/// ```no_run
/// use sonicrs::SubsonicClient;
///
/// # async fn example() -> Result<(), sonicrs::Error> {
/// let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")?;
///
/// client.ping().await?;
/// let artists = client.artists(None).await?;
/// for index in artists.index {
///     for artist in index.artist {
///         println!("{}", artist.name);
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// The configuration is immutable after construction and every request is
/// independent, so a `SubsonicClient` can be shared across tasks behind an
/// `Arc` without further synchronization.
pub struct SubsonicClient {
    pub client: reqwest::Client,
    server: Url,
    username: String,
    password: String,
    client_name: String,
    api_version: String,
    log_target: String,
}

impl fmt::Debug for SubsonicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsonicClient")
            .field("server", &self.server.as_str())
            .field("username", &self.username)
            .field("client_name", &self.client_name)
            .field("api_version", &self.api_version)
            .field("log_target", &self.log_target)
            .finish_non_exhaustive()
    }
}

impl SubsonicClient {
    /// Create a new SubsonicClient for the given server and credentials.
    ///
    /// The server URL may include a sub-path (e.g. a reverse-proxy mount point)
    /// and may or may not end with a slash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] or [`Error::InvalidServerUrl`] if the
    /// server URL cannot be used.
    ///
    /// # Example
    ///
    /// ```
    /// use sonicrs::SubsonicClient;
    ///
    /// let client = SubsonicClient::new("https://music.example.com/subsonic/", "alice", "sesame").unwrap();
    /// assert_eq!(client.username(), "alice");
    /// ```
    pub fn new(
        server: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let server = Url::parse(server)?;
        if server.cannot_be_a_base() {
            return Err(Error::InvalidServerUrl(server.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            server,
            username: username.into(),
            password: password.into(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        })
    }

    /// Set a custom HTTP client using the builder pattern.
    ///
    /// This is useful when you need to configure timeouts, proxies, or
    /// custom TLS settings. No timeout is applied otherwise.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::SubsonicClient;
    ///
    /// let http = reqwest::Client::builder()
    ///     .timeout(std::time::Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")
    ///     .unwrap()
    ///     .with_client(http);
    /// ```
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set the client identifier sent as the `c` parameter.
    ///
    /// Defaults to `"sonicrs"`.
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    /// Set the protocol version sent as the `v` parameter.
    ///
    /// Defaults to `"1.15.0"`. Servers reject clients that claim a newer
    /// version than they implement.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the `log` target under which this client emits its records.
    ///
    /// Defaults to `"sonicrs"`. Giving separate clients separate targets lets
    /// the application's logger filter or route each of them on its own.
    ///
    /// # Example
    ///
    /// ```
    /// use sonicrs::SubsonicClient;
    ///
    /// let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")
    ///     .unwrap()
    ///     .with_log_target("sonicrs::home_server");
    /// assert_eq!(client.log_target(), "sonicrs::home_server");
    /// ```
    pub fn with_log_target(mut self, log_target: impl Into<String>) -> Self {
        self.log_target = log_target.into();
        self
    }

    /// The server base URL as given at construction.
    pub fn server(&self) -> &str {
        self.server.as_str()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn log_target(&self) -> &str {
        &self.log_target
    }

    /// Build a signed request URL for a REST endpoint.
    ///
    /// A new salt and token are generated on every call. The `endpoint` must
    /// start with `/` (e.g. `"/getAlbum"`). Parameters in `query` are appended
    /// after the authentication parameters, and replace them on a name clash.
    ///
    /// The result embeds a valid token, so it can be handed to an external
    /// player for streaming.
    pub fn build_url(&self, endpoint: &str, query: Option<&Query>) -> String {
        let challenge = AuthChallenge::generate(&self.password);
        log::trace!(target: self.log_target(), "salt: {}", challenge.salt);
        log::trace!(target: self.log_target(), "token: {}", challenge.token);

        self.build_url_with(endpoint, query, &challenge)
    }

    pub(crate) fn build_url_with(
        &self,
        endpoint: &str,
        query: Option<&Query>,
        challenge: &AuthChallenge,
    ) -> String {
        let mut params = Query::new()
            .with("u", &self.username)
            .with("t", &challenge.token)
            .with("s", &challenge.salt)
            .with("c", &self.client_name)
            .with("v", &self.api_version)
            .with("f", "json");

        if let Some(extra) = query {
            params = params.merge(extra);
        }

        let mut url = self.server.clone();
        let path = {
            let base = url.path();
            let base = base.strip_suffix('/').unwrap_or(base);
            format!("{base}/rest{endpoint}")
        };
        url.set_path(&path);
        url.set_query(None);
        url.query_pairs_mut().extend_pairs(params.iter());

        log::trace!(target: self.log_target(), "created url: {}", url);

        url.into()
    }

    // Issue the request and check the transport status.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Query>,
    ) -> Result<reqwest::Response, Error> {
        if method != Method::GET && method != Method::POST {
            return Err(Error::UnsupportedMethod(method));
        }

        let url = self.build_url(endpoint, query);
        log::debug!(target: self.log_target(), "{} {}", method, endpoint);

        let resp = self.client.request(method, url).send().await?;

        let status_code = resp.status().as_u16();
        if status_code != 200 {
            log::debug!(
                target: self.log_target(),
                "{} answered with status code {}",
                endpoint,
                status_code
            );
            return Err(Error::HttpStatus(status_code));
        }

        Ok(resp)
    }

    /// Perform a request and decode the Subsonic envelope.
    ///
    /// Only `GET` and `POST` are accepted; any other method fails with
    /// [`Error::UnsupportedMethod`] before a connection is made. A `failed`
    /// envelope is returned as [`Error::Api`] carrying the server's message.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sonicrs::{Query, SubsonicClient};
    /// use reqwest::Method;
    ///
    /// # async fn example() -> Result<(), sonicrs::Error> {
    /// # let client = SubsonicClient::new("https://music.example.com", "alice", "sesame")?;
    /// let query = Query::new().with("id", "al-1");
    /// let mut resp = client.request(Method::GET, "/getAlbum", Some(&query)).await?;
    /// let album: serde_json::Value = resp.take("album")?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Query>,
    ) -> Result<SubsonicResponse, Error> {
        let resp = self.send(method, endpoint, query).await?;
        let body = resp.bytes().await?;

        if log::log_enabled!(target: self.log_target(), log::Level::Trace) {
            let pretty = serde_json::from_slice::<serde_json::Value>(&body)
                .and_then(|value| serde_json::to_string_pretty(&value))
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            log::trace!(target: self.log_target(), "Response {}", pretty);
        }

        match Envelope::from_slice(&body)? {
            Envelope::Ok(response) => Ok(response),
            Envelope::Failed(err) => {
                log::debug!(target: self.log_target(), "{} failed: {}", endpoint, err);
                Err(Error::Api(err))
            }
        }
    }

    /// Perform a request and return the raw response body.
    ///
    /// Used for binary endpoints (downloads, streams, cover art). The body is
    /// returned unmodified and no envelope inspection takes place.
    pub async fn request_bytes(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Query>,
    ) -> Result<bytes::Bytes, Error> {
        let resp = self.send(method, endpoint, query).await?;
        let body = resp.bytes().await?;

        log::debug!(target: self.log_target(), "{} returned {} bytes", endpoint, body.len());

        Ok(body)
    }

    // Request an endpoint and unwrap the payload stored under `key`.
    pub(crate) async fn do_request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Query>,
        key: &'static str,
    ) -> Result<T, Error> {
        let mut resp = self.request(method, endpoint, query).await?;

        match resp.take(key) {
            Ok(payload) => Ok(payload),
            Err(Error::SerdeJson(e)) => {
                log::debug!(target: self.log_target(), "Requested endpoint: {}", endpoint);
                log::debug!(target: self.log_target(), "JSON deserialization error in `{}`: {}", key, e);
                Err(Error::SerdeJson(e))
            }
            Err(e) => Err(e),
        }
    }

    // Request an endpoint whose response carries no payload.
    pub(crate) async fn do_empty_request(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Query>,
    ) -> Result<(), Error> {
        self.request(method, endpoint, query).await?;
        Ok(())
    }
}

// Subsonic JSON renders single-element lists as a bare object, and empty
// lists as a missing key or null. Accept all three.
pub(crate) fn deserialize_one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

// Identifiers are strings on most servers but plain numbers on some
// (notably music folder ids).
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    })
}

pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    }))
}
