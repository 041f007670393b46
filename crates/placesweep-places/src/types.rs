//! Places API response types.
//!
//! ## Nearby search
//! `{"status": "OK", "results": [{"place_id": "...", ...}], "next_page_token": "..."}`.
//! `next_page_token` is absent on the final page. A fresh token is rejected
//! with `INVALID_REQUEST` until it has warmed up for a second or two.
//!
//! ## Details
//! `{"status": "OK", "result": {...}}`. Closure has been reported three ways
//! over the API's lifetime: a top-level `permanently_closed`, the same flag
//! inside `result`, and `result.business_status == "CLOSED_PERMANENTLY"`.
//!
//! Every field is optional here. Anything missing degrades to "no results"
//! or "skip this place" rather than failing the sweep. Record fields go
//! through [`lenient`], so a `null` or oddly typed value only loses that one
//! field, never the whole place.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";
const CLOSED_PERMANENTLY: &str = "CLOSED_PERMANENTLY";

/// One page of nearby-search results.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub results: Vec<SearchResult>,
    #[serde(default, deserialize_with = "lenient")]
    pub next_page_token: Option<String>,
}

impl SearchPage {
    /// Continuation token, ignoring an empty string.
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// A summary entry on a search page. Only the identifier is used.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "lenient")]
    pub place_id: Option<String>,
}

/// Top-level details response.
#[derive(Debug, Default, Deserialize)]
pub struct DetailsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<PlaceDetails>,
    #[serde(default, deserialize_with = "lenient")]
    pub permanently_closed: bool,
}

impl DetailsResponse {
    #[must_use]
    pub fn is_permanently_closed(&self) -> bool {
        self.permanently_closed
            || self.result.as_ref().is_some_and(|r| {
                r.permanently_closed || r.business_status.as_deref() == Some(CLOSED_PERMANENTLY)
            })
    }
}

/// The `result` object of a details response.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address_components: Vec<AddressComponent>,
    #[serde(default, deserialize_with = "lenient")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<Geometry>,
    /// Canonical maps page for the place.
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    /// Passed through untouched; the shape varies between API versions.
    #[serde(default, deserialize_with = "lenient")]
    pub opening_hours: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub types: Vec<String>,
    /// Minutes from UTC. Older responses only carry this key.
    #[serde(default, deserialize_with = "lenient")]
    pub utc_offset: Option<i32>,
    /// Same value under its newer name; both keys are often present.
    #[serde(default, deserialize_with = "lenient")]
    pub utc_offset_minutes: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub vicinity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub permanently_closed: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub business_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "lenient")]
    pub long_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub short_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Geometry {
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceDetails {
    /// UTC offset in minutes, from whichever key the response carried.
    #[must_use]
    pub fn effective_utc_offset(&self) -> Option<i32> {
        self.utc_offset.or(self.utc_offset_minutes)
    }
}

/// Deserializes `T`, falling back to `T::default()` when the value is `null`
/// or has an unexpected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
