//! Geographic value types shared by the sweeper and the region catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    /// Renders as `lat,lng`, the form the nearby-search `location` parameter expects.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AreaError {
    #[error("{axis} of {which} corner is not a finite number")]
    NonFinite {
        axis: &'static str,
        which: &'static str,
    },

    #[error("{axis} out of range: {value}")]
    OutOfRange { axis: &'static str, value: f64 },

    #[error("start {axis} {start} exceeds end {axis} {end}")]
    Inverted {
        axis: &'static str,
        start: f64,
        end: f64,
    },

    #[error("search radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),

    #[error("search radius is too small for this area: grid would exceed {limit} points")]
    GridTooLarge { limit: usize },
}

/// Rectangle bounded by its lower-left (`start`) and upper-right (`end`) corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchArea {
    start: Coordinate,
    end: Coordinate,
}

impl SearchArea {
    /// Validates and builds an area.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError`] when a component is non-finite or outside the
    /// valid degree range, or when `start` exceeds `end` on either axis.
    pub fn new(start: Coordinate, end: Coordinate) -> Result<Self, AreaError> {
        for (which, c) in [("start", start), ("end", end)] {
            if !c.lat.is_finite() {
                return Err(AreaError::NonFinite { axis: "latitude", which });
            }
            if !c.lng.is_finite() {
                return Err(AreaError::NonFinite { axis: "longitude", which });
            }
            if !(-90.0..=90.0).contains(&c.lat) {
                return Err(AreaError::OutOfRange {
                    axis: "latitude",
                    value: c.lat,
                });
            }
            if !(-180.0..=180.0).contains(&c.lng) {
                return Err(AreaError::OutOfRange {
                    axis: "longitude",
                    value: c.lng,
                });
            }
        }
        if start.lat > end.lat {
            return Err(AreaError::Inverted {
                axis: "latitude",
                start: start.lat,
                end: end.lat,
            });
        }
        if start.lng > end.lng {
            return Err(AreaError::Inverted {
                axis: "longitude",
                start: start.lng,
                end: end.lng,
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }

    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.end.lat - self.start.lat
    }

    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.end.lng - self.start.lng
    }
}

/// Checks that a search radius is usable.
///
/// # Errors
///
/// Returns [`AreaError::InvalidRadius`] for zero, negative, or non-finite input.
pub fn validate_radius(radius_meters: f64) -> Result<f64, AreaError> {
    if radius_meters.is_finite() && radius_meters > 0.0 {
        Ok(radius_meters)
    } else {
        Err(AreaError::InvalidRadius(radius_meters))
    }
}
