//! Home Assistant REST client
//!
//! One-shot fetch of the entity snapshot from `GET /api/states`, authorized
//! with a long-lived access token. This is the only asynchronous boundary in
//! the tool; the merge itself runs synchronously on the materialized
//! snapshot. A fetch failure is fatal upstream: without a snapshot there is
//! nothing to merge, and no retry happens here.

use tracing::{debug, info};
use url::Url;

use floorgen_core::Entity;

mod error;

pub use error::{ApiError, ApiResult};

/// Client for the Home Assistant REST API
pub struct StatesClient {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl StatesClient {
    /// Create a client for the given server URL and long-lived token.
    ///
    /// The URL must be absolute with an http or https scheme; anything else
    /// is rejected before a single request goes out.
    pub fn new(server_url: &str, token: impl Into<String>) -> ApiResult<Self> {
        let base_url = Url::parse(server_url).map_err(|source| ApiError::InvalidUrl {
            url: server_url.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::UnsupportedScheme {
                url: server_url.to_string(),
                scheme: base_url.scheme().to_string(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token: token.into(),
        })
    }

    /// Fetch the full entity snapshot
    pub async fn states(&self) -> ApiResult<Vec<Entity>> {
        let endpoint = self
            .base_url
            .join("/api/states")
            .map_err(|source| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                source,
            })?;
        debug!(%endpoint, "fetching entities");

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let entities: Vec<Entity> = response.json().await?;
        info!("received {} entities", entities.len());
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(StatesClient::new("http://ha.local:8123", "token").is_ok());
        assert!(StatesClient::new("https://ha.example.org", "token").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(matches!(
            StatesClient::new("ftp://ha.local", "token"),
            Err(ApiError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            StatesClient::new("not a url", "token"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
