//! Area sweep: run one page chain per grid point, in order.

use chrono::{DateTime, Utc};
use placesweep_core::{validate_radius, Coordinate, SearchArea};
use serde::Serialize;

use crate::collector::CollectStats;
use crate::delay::Delay;
use crate::error::PlacesError;
use crate::fetch::JsonFetch;
use crate::grid::{GridSpacing, LongitudeCompression};
use crate::query::SearchQuery;
use crate::session::SweepSession;

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub area: SearchArea,
    pub radius_meters: f64,
    pub longitude_compression: LongitudeCompression,
    pub spacing: GridSpacing,
    pub grid_points: usize,
    #[serde(flatten)]
    pub totals: CollectStats,
    /// Records in the store when the sweep finished, including ones from
    /// earlier sweeps in the same session.
    pub store_size: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl<F: JsonFetch, D: Delay> SweepSession<F, D> {
    /// Sweeps the rectangle from `start` (lower-left) to `end` (upper-right).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidArea`] if `start` exceeds `end` on either
    /// axis, the radius is not positive, or the radius is so small that the
    /// grid is unreasonably large, before any request is made.
    /// Otherwise see [`Self::sweep_area`].
    pub async fn sweep(
        &mut self,
        start: Coordinate,
        end: Coordinate,
        radius_meters: f64,
    ) -> Result<SweepReport, PlacesError> {
        let area = SearchArea::new(start, end)?;
        self.sweep_area(&area, radius_meters).await
    }

    /// Visits every grid point of `area` strictly in sequence, longitude
    /// outer and latitude inner, collecting the full page chain at each one
    /// before moving on.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidArea`] for a bad radius or an oversized
    /// grid. The first fetch error aborts the whole sweep. Records collected so far
    /// remain in [`Self::store`].
    pub async fn sweep_area(
        &mut self,
        area: &SearchArea,
        radius_meters: f64,
    ) -> Result<SweepReport, PlacesError> {
        let radius_meters = validate_radius(radius_meters)?;
        let compression = self.options.longitude_compression;
        let spacing = GridSpacing::for_area(area, radius_meters, compression);
        let (columns, rows) = spacing.dimensions(area)?;
        let total = columns * rows;

        tracing::info!(
            start = %area.start(),
            end = %area.end(),
            radius_meters,
            lat_step = spacing.lat_step,
            lng_step = spacing.lng_step,
            columns,
            rows,
            "starting area sweep"
        );

        let started_at = Utc::now();
        let mut totals = CollectStats::default();
        let mut grid_points = 0usize;

        for location in spacing.points(area)? {
            grid_points += 1;
            tracing::info!(
                lat = location.lat,
                lng = location.lng,
                point = grid_points,
                total,
                "searching new area"
            );

            let stats = self
                .collect(SearchQuery::Nearby {
                    location,
                    radius_meters,
                })
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        lat = location.lat,
                        lng = location.lng,
                        point = grid_points,
                        error = %e,
                        "fetch failed — aborting sweep"
                    );
                })?;
            totals.absorb(&stats);
        }

        let report = SweepReport {
            area: *area,
            radius_meters,
            longitude_compression: compression,
            spacing,
            grid_points,
            totals,
            store_size: self.store.len(),
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            grid_points,
            pages = totals.pages,
            details_fetched = totals.details_fetched,
            places_added = totals.places_added,
            closed_skipped = totals.closed_skipped,
            truncated_chains = totals.truncated_chains,
            store_size = report.store_size,
            "area sweep complete"
        );

        Ok(report)
    }
}
