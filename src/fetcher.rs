use reqwest::StatusCode;

use crate::config::Config;
use crate::response::FetchResponse;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("device answered with malformed JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    url: String,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        // The device is reached over its own access point, never through a proxy.
        let client = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self {
            client,
            url: config.endpoint(),
        })
    }

    /// Fetches and clears the device cache.
    ///
    /// Transport failures and any status other than `200 OK` yield `Ok(None)`. A `200 OK`
    /// whose body is not valid JSON is an error.
    pub async fn fetch(&self) -> Result<Option<FetchResponse>, FetchError> {
        log::info!("GET {}", self.url);

        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Request to {} failed: {e}", self.url);
                return Ok(None);
            }
        };

        if response.status() != StatusCode::OK {
            log::warn!("Device answered {}", response.status());
            return Ok(None);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Failed to read response body: {e}");
                return Ok(None);
            }
        };
        log::debug!("Received {} bytes", body.len());

        Ok(Some(serde_json::from_slice(&body)?))
    }
}
