use crate::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Value of the `status` field of every Subsonic response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Failed,
}

/// Error object carried by a `failed` Subsonic response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Numeric Subsonic error code
    #[serde(default)]
    pub code: u32,
    /// Human-readable message, exactly as sent by the server
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    /// The error code as a typed value.
    pub fn kind(&self) -> ApiErrorCode {
        ApiErrorCode::from(self.code)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Error codes defined by the Subsonic API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// 0: A generic error
    Generic,
    /// 10: Required parameter is missing
    MissingParameter,
    /// 20: Incompatible protocol version, client must upgrade
    ClientTooOld,
    /// 30: Incompatible protocol version, server must upgrade
    ServerTooOld,
    /// 40: Wrong username or password
    WrongCredentials,
    /// 41: Token authentication not supported for LDAP users
    TokenAuthNotSupported,
    /// 50: User is not authorized for the given operation
    NotAuthorized,
    /// 60: The trial period for the Subsonic server is over
    TrialExpired,
    /// 70: The requested data was not found
    NotFound,
    /// Any code not listed above
    Other(u32),
}

impl From<u32> for ApiErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ApiErrorCode::Generic,
            10 => ApiErrorCode::MissingParameter,
            20 => ApiErrorCode::ClientTooOld,
            30 => ApiErrorCode::ServerTooOld,
            40 => ApiErrorCode::WrongCredentials,
            41 => ApiErrorCode::TokenAuthNotSupported,
            50 => ApiErrorCode::NotAuthorized,
            60 => ApiErrorCode::TrialExpired,
            70 => ApiErrorCode::NotFound,
            other => ApiErrorCode::Other(other),
        }
    }
}

/// A successful Subsonic response.
///
/// The server metadata is decoded up front; everything else the server sent
/// inside `subsonic-response` is kept in `payload`, keyed by its JSON name
/// (e.g. `"artists"`, `"album"`, `"searchResult3"`).
#[derive(Debug, Clone, PartialEq)]
pub struct SubsonicResponse {
    /// Protocol version the server speaks
    pub version: Option<String>,
    /// Server implementation (OpenSubsonic servers only, e.g. "navidrome")
    pub server_type: Option<String>,
    /// Server software version (OpenSubsonic servers only)
    pub server_version: Option<String>,
    /// Whether the server advertises OpenSubsonic support
    pub open_subsonic: bool,
    /// Endpoint-specific payload keys
    pub payload: Map<String, Value>,
}

impl SubsonicResponse {
    /// Borrow a raw payload value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Remove the payload stored under `key` and deserialize it.
    ///
    /// Fails with [`Error::MissingPayload`] if the server did not send the key.
    pub fn take<T: DeserializeOwned>(&mut self, key: &'static str) -> Result<T, Error> {
        let value = self.payload.remove(key).ok_or(Error::MissingPayload(key))?;
        Ok(serde_json::from_value(value)?)
    }
}

/// A decoded Subsonic envelope: either the successful response or the
/// server's error.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Ok(SubsonicResponse),
    Failed(ApiError),
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "subsonic-response")]
    response: RawResponse,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    status: ResponseStatus,
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "type", default)]
    server_type: Option<String>,
    #[serde(default)]
    server_version: Option<String>,
    #[serde(default)]
    open_subsonic: bool,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Envelope {
    /// Decode a raw JSON response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawEnvelope = serde_json::from_slice(body)?;
        Ok(Self::from_raw(raw.response))
    }

    pub fn into_result(self) -> Result<SubsonicResponse, Error> {
        match self {
            Envelope::Ok(response) => Ok(response),
            Envelope::Failed(err) => Err(Error::Api(err)),
        }
    }

    fn from_raw(raw: RawResponse) -> Self {
        match raw.status {
            ResponseStatus::Failed => Envelope::Failed(raw.error.unwrap_or_else(|| ApiError {
                code: 0,
                message: "request failed without an error message".to_string(),
            })),
            ResponseStatus::Ok => Envelope::Ok(SubsonicResponse {
                version: raw.version,
                server_type: raw.server_type,
                server_version: raw.server_version,
                open_subsonic: raw.open_subsonic,
                payload: raw.payload,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Envelope {
        Envelope::from_slice(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn failed_envelope_carries_message() {
        let envelope = decode(json!({
            "subsonic-response": {
                "status": "failed",
                "version": "1.16.1",
                "error": {"code": 40, "message": "Wrong username or password"}
            }
        }));

        match envelope {
            Envelope::Failed(err) => {
                assert_eq!(err.message, "Wrong username or password");
                assert_eq!(err.kind(), ApiErrorCode::WrongCredentials);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn failed_envelope_without_error_object() {
        let envelope = decode(json!({"subsonic-response": {"status": "failed"}}));
        assert!(matches!(envelope, Envelope::Failed(ApiError { code: 0, .. })));
    }

    #[test]
    fn ok_envelope_separates_metadata_from_payload() {
        let envelope = decode(json!({
            "subsonic-response": {
                "status": "ok",
                "version": "1.16.1",
                "type": "navidrome",
                "serverVersion": "0.53.3",
                "openSubsonic": true,
                "genres": {"genre": []}
            }
        }));

        let response = envelope.into_result().unwrap();
        assert_eq!(response.version.as_deref(), Some("1.16.1"));
        assert_eq!(response.server_type.as_deref(), Some("navidrome"));
        assert!(response.open_subsonic);
        assert_eq!(response.payload.len(), 1);
        assert!(response.get("genres").is_some());
    }

    #[test]
    fn take_reports_missing_key() {
        let mut response = decode(json!({"subsonic-response": {"status": "ok"}}))
            .into_result()
            .unwrap();

        let err = response.take::<Value>("album").unwrap_err();
        assert!(matches!(err, Error::MissingPayload("album")));
    }

    #[test]
    fn unknown_codes_are_preserved() {
        assert_eq!(ApiErrorCode::from(99), ApiErrorCode::Other(99));
        assert_eq!(ApiErrorCode::from(70), ApiErrorCode::NotFound);
    }

    #[test]
    fn body_without_envelope_is_a_decode_error() {
        assert!(Envelope::from_slice(br#"{"status": "ok"}"#).is_err());
        assert!(Envelope::from_slice(b"not json").is_err());
    }
}
