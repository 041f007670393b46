use placesweep_core::AreaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    /// Transport failure (DNS, connect, TLS, transport timeout). Never retried.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The API refused the request outright, usually a bad or unauthorized key.
    #[error("places API denied the request: {message}")]
    RequestDenied { message: String },

    #[error("invalid places base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid search area: {0}")]
    InvalidArea(#[from] AreaError),
}
