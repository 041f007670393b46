//! Resolves `--region` or `--start/--end` into a validated sweep area.

use std::path::Path;

use placesweep_core::{validate_radius, SearchArea};
use placesweep_places::LongitudeCompression;

use crate::AreaArgs;

/// Radius used for an explicit rectangle when `--radius` is omitted.
const DEFAULT_RADIUS_METERS: f64 = 100.0;

#[derive(Debug, Clone)]
pub(crate) struct ResolvedArea {
    pub(crate) label: String,
    pub(crate) area: SearchArea,
    pub(crate) radius_meters: f64,
}

/// Loads the regions file only when a region name was given.
pub(crate) fn resolve_area(
    args: &AreaArgs,
    regions_path: &Path,
) -> anyhow::Result<ResolvedArea> {
    let resolved = match (&args.region, args.start, args.end) {
        (Some(name), _, _) => {
            let regions = placesweep_core::load_regions(regions_path)?;
            let region = regions.find(name).ok_or_else(|| {
                anyhow::anyhow!("region '{name}' not found in {}", regions_path.display())
            })?;
            ResolvedArea {
                label: region.name.clone(),
                area: region.area()?,
                radius_meters: args.radius.unwrap_or(region.radius_meters),
            }
        }
        (None, Some(start), Some(end)) => ResolvedArea {
            label: format!("{start} to {end}"),
            area: SearchArea::new(start, end)?,
            radius_meters: args.radius.unwrap_or(DEFAULT_RADIUS_METERS),
        },
        _ => anyhow::bail!("either --region or both --start and --end are required"),
    };
    validate_radius(resolved.radius_meters)?;
    Ok(resolved)
}

pub(crate) fn longitude_compression(equatorward: bool) -> LongitudeCompression {
    if equatorward {
        LongitudeCompression::EquatorwardEdge
    } else {
        LongitudeCompression::StartLatitude
    }
}
