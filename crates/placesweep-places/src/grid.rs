//! Grid generation for area sweeps.
//!
//! Converts a search radius in meters into latitude/longitude steps so that
//! adjacent search circles tile the rectangle. One degree of latitude is a
//! fixed distance; one degree of longitude shrinks with `cos(latitude)`.

use std::f64::consts::PI;

use placesweep_core::{AreaError, Coordinate, SearchArea};
use serde::Serialize;

/// Upper bound on grid points in one sweep.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Degrees of latitude per meter.
pub const LAT_DEGREES_PER_METER: f64 = 9.043_717_33e-6;

/// Degrees of longitude per meter at the equator.
pub const LNG_DEGREES_PER_METER_AT_EQUATOR: f64 = 8.983_111_75e-6;

/// Which latitude the longitude step is compensated for.
///
/// The step is computed once and held for the whole sweep, which is only
/// accurate when the latitude span is small.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeCompression {
    /// Use the area's starting (southern) latitude.
    #[default]
    StartLatitude,
    /// Use the latitude in the area closest to the equator. A degree of
    /// longitude is longest there, so the step is the narrowest and columns
    /// never leave gaps anywhere in the area.
    EquatorwardEdge,
}

impl LongitudeCompression {
    #[must_use]
    pub fn basis_latitude(self, area: &SearchArea) -> f64 {
        match self {
            Self::StartLatitude => area.start().lat,
            Self::EquatorwardEdge => {
                let (a, b) = (area.start().lat, area.end().lat);
                if a <= 0.0 && b >= 0.0 {
                    0.0
                } else if a.abs() <= b.abs() {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Step sizes in degrees for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpacing {
    pub lat_step: f64,
    pub lng_step: f64,
}

impl GridSpacing {
    /// Steps for `radius_meters`, with longitude compensated at `basis_lat`.
    #[must_use]
    pub fn for_radius(radius_meters: f64, basis_lat: f64) -> Self {
        let lat_step = radius_meters * LAT_DEGREES_PER_METER;
        let lng_step =
            radius_meters * LNG_DEGREES_PER_METER_AT_EQUATOR / (basis_lat * PI / 180.0).cos();
        Self { lat_step, lng_step }
    }

    #[must_use]
    pub fn for_area(
        area: &SearchArea,
        radius_meters: f64,
        compression: LongitudeCompression,
    ) -> Self {
        Self::for_radius(radius_meters, compression.basis_latitude(area))
    }

    /// Number of points along each axis: `(longitude columns, latitude rows)`.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::GridTooLarge`] when the grid would exceed
    /// [`MAX_GRID_POINTS`], which happens with a radius far too small for the
    /// area.
    pub fn dimensions(&self, area: &SearchArea) -> Result<(usize, usize), AreaError> {
        let too_large = AreaError::GridTooLarge {
            limit: MAX_GRID_POINTS,
        };
        let columns = axis_points(area.lng_span(), self.lng_step).ok_or_else(|| too_large.clone())?;
        let rows = axis_points(area.lat_span(), self.lat_step).ok_or_else(|| too_large.clone())?;
        match columns.checked_mul(rows) {
            Some(total) if total <= MAX_GRID_POINTS => Ok((columns, rows)),
            _ => Err(too_large),
        }
    }

    /// Grid points in sweep order: longitude outer, latitude inner.
    ///
    /// Points sit at `start + i * step`. The last row and column may overshoot
    /// `end` by less than one step so the far edges get a search center.
    ///
    /// # Errors
    ///
    /// See [`Self::dimensions`].
    #[allow(clippy::cast_precision_loss)]
    pub fn points(
        &self,
        area: &SearchArea,
    ) -> Result<impl Iterator<Item = Coordinate> + '_, AreaError> {
        let (cols, rows) = self.dimensions(area)?;
        let start = area.start();
        Ok((0..cols).flat_map(move |i| {
            let lng = start.lng + i as f64 * self.lng_step;
            (0..rows).map(move |j| Coordinate::new(start.lat + j as f64 * self.lat_step, lng))
        }))
    }
}

/// Generate the sweep grid for `area`.
///
/// # Errors
///
/// See [`GridSpacing::dimensions`].
pub fn generate_grid(
    area: &SearchArea,
    radius_meters: f64,
    compression: LongitudeCompression,
) -> Result<Vec<Coordinate>, AreaError> {
    Ok(GridSpacing::for_area(area, radius_meters, compression)
        .points(area)?
        .collect())
}

/// Points needed along one axis: enough steps to reach or pass `span`, plus
/// the starting point. Ratios within rounding noise of a whole number are not
/// pushed up to the next step. `None` when the count exceeds
/// [`MAX_GRID_POINTS`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn axis_points(span: f64, step: f64) -> Option<usize> {
    if span <= 0.0 {
        return Some(1);
    }
    if step.is_nan() || step <= 0.0 {
        return None;
    }
    let ratio = span / step;
    let nearest = ratio.round();
    let steps = if (ratio - nearest).abs() < 1e-9 {
        nearest
    } else {
        ratio.ceil()
    };
    if steps.is_nan() || steps >= MAX_GRID_POINTS as f64 {
        return None;
    }
    (steps as usize).checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(start: (f64, f64), end: (f64, f64)) -> SearchArea {
        SearchArea::new(
            Coordinate::new(start.0, start.1),
            Coordinate::new(end.0, end.1),
        )
        .expect("valid test area")
    }

    #[test]
    fn steps_match_meter_conversion_at_equator() {
        let s = GridSpacing::for_radius(100.0, 0.0);
        assert!((s.lat_step - 9.043_717_33e-4).abs() < 1e-15);
        assert!((s.lng_step - 8.983_111_75e-4).abs() < 1e-15);
    }

    #[test]
    fn small_square_point_count_uses_inclusive_ceil() {
        let a = area((0.0, 0.0), (0.001, 0.001));
        let spacing = GridSpacing::for_area(&a, 100.0, LongitudeCompression::StartLatitude);
        let expected_rows = (0.001 / spacing.lat_step).ceil() as usize + 1;
        let expected_cols = (0.001 / spacing.lng_step).ceil() as usize + 1;
        assert_eq!((expected_cols, expected_rows), (3, 3));

        let pts = generate_grid(&a, 100.0, LongitudeCompression::StartLatitude).unwrap();
        assert_eq!(pts.len(), expected_rows * expected_cols);
    }

    #[test]
    fn points_stay_within_one_step_of_bounds() {
        let a = area((0.0, 0.0), (0.001, 0.001));
        let spacing = GridSpacing::for_area(&a, 100.0, LongitudeCompression::StartLatitude);
        for p in spacing.points(&a).unwrap() {
            assert!(p.lat >= 0.0 && p.lat < 0.001 + spacing.lat_step, "lat {}", p.lat);
            assert!(p.lng >= 0.0 && p.lng < 0.001 + spacing.lng_step, "lng {}", p.lng);
        }
    }

    #[test]
    fn traversal_is_longitude_outer_latitude_inner() {
        let a = area((0.0, 0.0), (0.001, 0.001));
        let pts = generate_grid(&a, 100.0, LongitudeCompression::StartLatitude).unwrap();
        // First column shares one longitude with ascending latitude.
        assert!(pts[0].lng.abs() < f64::EPSILON);
        assert!(pts[1].lng.abs() < f64::EPSILON);
        assert!(pts[1].lat > pts[0].lat);
        assert!(pts[3].lng > pts[2].lng);
        assert!(pts[3].lat.abs() < f64::EPSILON);
    }

    #[test]
    fn exact_multiple_span_does_not_add_extra_row() {
        let step = 100.0 * LAT_DEGREES_PER_METER;
        let a = area((10.0, 20.0), (10.0 + 2.0 * step, 20.0));
        let (cols, rows) = GridSpacing::for_area(&a, 100.0, LongitudeCompression::StartLatitude)
            .dimensions(&a)
            .unwrap();
        assert_eq!((cols, rows), (1, 3));
    }

    #[test]
    fn degenerate_area_is_a_single_point() {
        let a = area((5.0, 5.0), (5.0, 5.0));
        let pts = generate_grid(&a, 250.0, LongitudeCompression::StartLatitude).unwrap();
        assert_eq!(pts, vec![Coordinate::new(5.0, 5.0)]);
    }

    #[test]
    fn longitude_step_grows_with_start_latitude() {
        let low = GridSpacing::for_radius(100.0, 20.0);
        let high = GridSpacing::for_radius(100.0, 40.0);
        let south = GridSpacing::for_radius(100.0, -40.0);
        assert!(high.lng_step > low.lng_step);
        assert!((south.lng_step - high.lng_step).abs() < 1e-15);
        assert!((high.lat_step - low.lat_step).abs() < f64::EPSILON);
    }

    #[test]
    fn equatorward_edge_uses_latitude_closest_to_equator() {
        let equatorward = LongitudeCompression::EquatorwardEdge;
        let north = area((40.0, 0.0), (50.0, 1.0));
        assert!((equatorward.basis_latitude(&north) - 40.0).abs() < f64::EPSILON);

        let south = area((-50.0, 0.0), (-40.0, 1.0));
        assert!((equatorward.basis_latitude(&south) + 40.0).abs() < f64::EPSILON);
        // Start latitude is the far edge in the southern hemisphere.
        let start = LongitudeCompression::StartLatitude;
        assert!((start.basis_latitude(&south) + 50.0).abs() < f64::EPSILON);

        let straddle = area((-5.0, 0.0), (10.0, 1.0));
        assert!(equatorward.basis_latitude(&straddle).abs() < f64::EPSILON);
    }

    #[test]
    fn equatorward_edge_never_produces_fewer_columns() {
        let a = area((-40.5, 0.0), (-40.0, 0.5));
        let start = GridSpacing::for_area(&a, 1_000.0, LongitudeCompression::StartLatitude);
        let equatorward = GridSpacing::for_area(&a, 1_000.0, LongitudeCompression::EquatorwardEdge);
        assert!(equatorward.dimensions(&a).unwrap().0 >= start.dimensions(&a).unwrap().0);
        assert!(equatorward.lng_step < start.lng_step);
    }

    #[test]
    fn vanishing_radius_is_rejected_instead_of_overflowing() {
        let a = area((0.0, 0.0), (1.0, 1.0));
        let spacing = GridSpacing::for_area(&a, 1e-300, LongitudeCompression::StartLatitude);
        assert_eq!(
            spacing.dimensions(&a),
            Err(AreaError::GridTooLarge {
                limit: MAX_GRID_POINTS
            })
        );
        assert!(spacing.points(&a).is_err());
    }

    #[test]
    fn grid_over_the_point_cap_is_rejected() {
        // About 1,100 x 1,100 points at 10 m over a 0.1 degree square.
        let a = area((0.0, 0.0), (0.1, 0.1));
        assert!(generate_grid(&a, 10.0, LongitudeCompression::StartLatitude).is_err());
        assert!(generate_grid(&a, 100.0, LongitudeCompression::StartLatitude).is_ok());
    }
}
