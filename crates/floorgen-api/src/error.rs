//! Error types for the REST client

use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from fetching the entity snapshot.
///
/// All of these are fatal to the run; the tool reports them and exits
/// without touching the SVG.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server URL does not parse
    #[error("invalid server URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server URL uses a scheme other than http/https
    #[error("invalid protocol '{scheme}' in server URL '{url}' (expected http or https)")]
    UnsupportedScheme { url: String, scheme: String },

    /// The request failed or the response body did not decode
    #[error("failed to get entities - please ensure that the Home Assistant server is available and that the long lived token is correct: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("states request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}
