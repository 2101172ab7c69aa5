use crate::Error;
use crate::SubsonicClient;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Software license details of the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct License {
    /// Whether the server is licensed (always true on open-source servers)
    pub valid: bool,
    pub email: Option<String>,
    /// ISO timestamp when the license expires
    pub license_expires: Option<String>,
    /// ISO timestamp when the trial expires
    pub trial_expires: Option<String>,
}

impl SubsonicClient {
    /// Test connectivity and credentials.
    ///
    /// Succeeds if the server is reachable and accepts the credentials.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: sonicrs::SubsonicClient) -> Result<(), sonicrs::Error> {
    /// client.ping().await?;
    /// println!("Server is up");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn ping(&self) -> Result<(), Error> {
        self.do_empty_request(Method::GET, "/ping", None).await
    }

    /// Get details about the server's software license.
    pub async fn license(&self) -> Result<License, Error> {
        self.do_request(Method::GET, "/getLicense", None, "license")
            .await
    }
}
