//! Normalized place record kept in the [`crate::PlaceStore`].

use serde::Serialize;

use crate::types::{AddressComponent, PlaceDetails};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: Option<String>,
    pub address: PlaceAddress,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub international_phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Canonical maps page for the place.
    pub maps_url: Option<String>,
    pub opening_hours: Option<serde_json::Value>,
    pub price_level: Option<u8>,
    pub rating: Option<f64>,
    pub types: Vec<String>,
    /// Minutes from UTC.
    pub utc_offset: Option<i32>,
    pub vicinity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceAddress {
    pub full: Option<String>,
    pub components: Vec<AddressComponent>,
}

impl PlaceRecord {
    /// Builds a record keyed by the identifier that surfaced on the search
    /// page, not the one echoed back in `details`, so the store key and the
    /// record always agree.
    #[must_use]
    pub fn from_details(place_id: &str, details: PlaceDetails) -> Self {
        let utc_offset = details.effective_utc_offset();
        let location = details.geometry.and_then(|g| g.location);
        Self {
            place_id: place_id.to_owned(),
            name: details.name,
            address: PlaceAddress {
                full: details.formatted_address,
                components: details.address_components,
            },
            website: details.website,
            phone: details.formatted_phone_number,
            international_phone: details.international_phone_number,
            latitude: location.map(|l| l.lat),
            longitude: location.map(|l| l.lng),
            maps_url: details.url,
            opening_hours: details.opening_hours,
            price_level: details.price_level,
            rating: details.rating,
            types: details.types,
            utc_offset,
            vicinity: details.vicinity,
        }
    }
}
