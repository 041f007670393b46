//! Explicit crawl context threaded through the collector and the sweeper.

use std::time::Duration;

use placesweep_core::AppConfig;

use crate::delay::{Delay, TokioDelay};
use crate::error::PlacesError;
use crate::fetch::{HttpFetcher, JsonFetch};
use crate::grid::LongitudeCompression;
use crate::query::PlacesEndpoints;
use crate::store::PlaceStore;

/// Default warm-up wait before a continuation token is accepted.
pub const DEFAULT_PAGE_TOKEN_DELAY: Duration = Duration::from_millis(1500);

/// A nearby search never returns more than this many pages (20 results each).
pub const API_PAGE_CEILING: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Wait before requesting each continuation page.
    pub page_token_delay: Duration,
    pub longitude_compression: LongitudeCompression,
    /// Chains this long are logged as possibly truncated.
    pub page_ceiling: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_token_delay: DEFAULT_PAGE_TOKEN_DELAY,
            longitude_compression: LongitudeCompression::default(),
            page_ceiling: API_PAGE_CEILING,
        }
    }
}

/// One crawl: API key, fetch adapter, page-token delay, and the store.
///
/// Fetches run strictly one at a time; the store is only touched through
/// `&mut self`, so no locking is needed. The store outlives a failed sweep
/// and can still be read through [`SweepSession::store`].
pub struct SweepSession<F = HttpFetcher, D = TokioDelay> {
    pub(crate) fetcher: F,
    pub(crate) delay: D,
    pub(crate) endpoints: PlacesEndpoints,
    pub(crate) options: SessionOptions,
    pub(crate) store: PlaceStore,
}

impl SweepSession<HttpFetcher, TokioDelay> {
    /// Builds a session that talks to the real API using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the HTTP client cannot be built, or
    /// [`PlacesError::InvalidBaseUrl`] if the configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let fetcher = HttpFetcher::new(config.request_timeout_secs, &config.user_agent)?;
        let endpoints = PlacesEndpoints::new(&config.places_base_url, &config.places_api_key)?;
        let options = SessionOptions {
            page_token_delay: Duration::from_millis(config.page_token_delay_ms),
            ..SessionOptions::default()
        };
        Ok(Self::new(fetcher, TokioDelay, endpoints, options))
    }
}

impl<F: JsonFetch, D: Delay> SweepSession<F, D> {
    pub fn new(fetcher: F, delay: D, endpoints: PlacesEndpoints, options: SessionOptions) -> Self {
        Self {
            fetcher,
            delay,
            endpoints,
            options,
            store: PlaceStore::new(),
        }
    }

    #[must_use]
    pub fn with_longitude_compression(mut self, compression: LongitudeCompression) -> Self {
        self.options.longitude_compression = compression;
        self
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &PlaceStore {
        &self.store
    }

    pub fn into_store(self) -> PlaceStore {
        self.store
    }
}
