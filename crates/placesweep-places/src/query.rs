//! Query construction for the nearby-search and details endpoints.

use placesweep_core::Coordinate;
use reqwest::Url;

use crate::error::PlacesError;

const NEARBY_SEARCH_PATH: &str = "nearbysearch/json";
const DETAILS_PATH: &str = "details/json";

/// A nearby-search request: either the first page or a continuation.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// First page of a search centered on `location`.
    Nearby {
        location: Coordinate,
        radius_meters: f64,
    },
    /// Continuation page. Location and radius are omitted.
    NextPage { token: String },
}

/// Base URL plus API key. Builds search and details request URLs.
///
/// The key is captured once at construction and never changes.
#[derive(Clone)]
pub struct PlacesEndpoints {
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for PlacesEndpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesEndpoints")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish()
    }
}

impl PlacesEndpoints {
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, PlacesError> {
        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PlacesError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }
        Ok(Self {
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    /// URL for one nearby-search page.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if the endpoint path cannot be
    /// joined onto the base URL.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, PlacesError> {
        match query {
            SearchQuery::Nearby {
                location,
                radius_meters,
            } => {
                let location = location.to_string();
                let radius = radius_meters.to_string();
                self.build_url(
                    NEARBY_SEARCH_PATH,
                    &[("location", location.as_str()), ("radius", radius.as_str())],
                )
            }
            SearchQuery::NextPage { token } => {
                self.build_url(NEARBY_SEARCH_PATH, &[("pagetoken", token.as_str())])
            }
        }
    }

    /// URL for the details of one place.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if the endpoint path cannot be
    /// joined onto the base URL.
    pub fn details_url(&self, place_id: &str) -> Result<Url, PlacesError> {
        self.build_url(DETAILS_PATH, &[("placeid", place_id)])
    }

    /// Joins `path` onto the base URL and appends `params` followed by the
    /// API key, all percent-encoded.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> PlacesEndpoints {
        PlacesEndpoints::new(base, "test-key").expect("endpoints should build")
    }

    #[test]
    fn nearby_url_carries_location_radius_and_key() {
        let url = endpoints("https://maps.googleapis.com/maps/api/place")
            .search_url(&SearchQuery::Nearby {
                location: Coordinate::new(34.0, -81.05),
                radius_meters: 100.0,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/nearbysearch/json?location=34%2C-81.05&radius=100&key=test-key"
        );
    }

    #[test]
    fn next_page_url_omits_location_and_radius() {
        let url = endpoints("https://maps.googleapis.com/maps/api/place/")
            .search_url(&SearchQuery::NextPage {
                token: "TOKEN_1".to_owned(),
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/nearbysearch/json?pagetoken=TOKEN_1&key=test-key"
        );
        assert!(!url.as_str().contains("location="));
        assert!(!url.as_str().contains("radius="));
    }

    #[test]
    fn details_url_uses_placeid() {
        let url = endpoints("http://127.0.0.1:8080")
            .details_url("ChIJ abc/def")
            .unwrap();
        assert_eq!(url.path(), "/details/json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("placeid".to_owned(), "ChIJ abc/def".to_owned()),
                ("key".to_owned(), "test-key".to_owned()),
            ]
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = PlacesEndpoints::new("not a url", "k").unwrap_err();
        assert!(matches!(err, PlacesError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_hides_api_key() {
        let rendered = format!("{:?}", endpoints("https://example.com"));
        assert!(!rendered.contains("test-key"));
    }
}
