//! Offline commands: `grid` and `regions`. Neither needs an API key.

use std::path::Path;

use placesweep_places::{GridSpacing, LongitudeCompression};

use crate::area::{longitude_compression, resolve_area};
use crate::AreaArgs;

pub(crate) fn run_grid(
    regions_path: &Path,
    args: &AreaArgs,
    equatorward: bool,
) -> anyhow::Result<()> {
    let resolved = resolve_area(args, regions_path)?;
    let compression = longitude_compression(equatorward);
    let spacing = GridSpacing::for_area(&resolved.area, resolved.radius_meters, compression);
    let (columns, rows) = spacing.dimensions(&resolved.area)?;
    // Bounded by `MAX_GRID_POINTS` through `dimensions`.
    let points: Vec<_> = spacing.points(&resolved.area)?.collect();

    let output = serde_json::json!({
        "area": resolved.area,
        "label": resolved.label,
        "radius_meters": resolved.radius_meters,
        "longitude_compression": compression,
        "spacing": spacing,
        "columns": columns,
        "rows": rows,
        "points": points,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn run_regions(regions_path: &Path) -> anyhow::Result<()> {
    let regions = placesweep_core::load_regions(regions_path)?;
    if regions.regions.is_empty() {
        println!("no regions defined in {}", regions_path.display());
        return Ok(());
    }

    for region in &regions.regions {
        let area = region.area()?;
        let spacing =
            GridSpacing::for_area(&area, region.radius_meters, LongitudeCompression::default());
        let (columns, rows) = spacing.dimensions(&area)?;
        println!(
            "{:<28} {} -> {}  radius {}m  {} grid points{}",
            region.name,
            region.start,
            region.end,
            region.radius_meters,
            columns * rows,
            region
                .notes
                .as_deref()
                .map(|n| format!("  ({n})"))
                .unwrap_or_default()
        );
    }
    Ok(())
}
