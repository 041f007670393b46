//! `placesweep sweep`: run a sweep against the live API.

use std::path::Path;

use placesweep_places::SweepSession;

use crate::area::{longitude_compression, resolve_area};
use crate::AreaArgs;

/// Runs the sweep and prints `{"report": …, "places": …}` to stdout.
///
/// If the sweep aborts, the places collected before the failure are still
/// printed (with `report: null` and the error message) before the error is
/// returned.
///
/// # Errors
///
/// Returns an error if the area cannot be resolved, the session cannot be
/// built, or any request fails mid-sweep.
pub(crate) async fn run_sweep(
    config: &placesweep_core::AppConfig,
    regions_path: &Path,
    args: &AreaArgs,
    equatorward: bool,
) -> anyhow::Result<()> {
    let resolved = resolve_area(args, regions_path)?;
    let compression = longitude_compression(equatorward);

    let mut session = SweepSession::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build places session: {e}"))?
        .with_longitude_compression(compression);

    tracing::info!(
        area = %resolved.label,
        radius_meters = resolved.radius_meters,
        "sweep starting"
    );

    let outcome = session
        .sweep_area(&resolved.area, resolved.radius_meters)
        .await;

    match outcome {
        Ok(report) => {
            let output = serde_json::json!({
                "report": report,
                "places": session.store(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            let output = serde_json::json!({
                "report": null,
                "places": session.store(),
                "error": e.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Err(anyhow::anyhow!(
                "sweep of {} aborted after {} places: {e}",
                resolved.label,
                session.store().len()
            ))
        }
    }
}
