mod area;
mod inspect;
mod sweep;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use placesweep_core::Coordinate;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placesweep")]
#[command(about = "Sweep a rectangle with nearby searches and collect open places")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "PLACESWEEP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Named sweep areas.
    #[arg(
        long,
        global = true,
        env = "PLACESWEEP_REGIONS_PATH",
        default_value = "./config/regions.yaml"
    )]
    regions: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full sweep and print the report and places as JSON.
    Sweep {
        #[command(flatten)]
        area: AreaArgs,
        /// Base longitude spacing on the edge closest to the equator.
        #[arg(long)]
        equatorward: bool,
    },
    /// Print the grid a sweep would visit, without calling the API.
    Grid {
        #[command(flatten)]
        area: AreaArgs,
        #[arg(long)]
        equatorward: bool,
    },
    /// List the named regions in the regions file.
    Regions,
}

/// Either a named region or an explicit rectangle.
#[derive(Debug, Clone, Args)]
struct AreaArgs {
    /// Region name from the regions file (case-insensitive).
    #[arg(
        long,
        conflicts_with_all = ["start", "end"],
        required_unless_present_all = ["start", "end"]
    )]
    region: Option<String>,

    /// Lower-left corner as `lat,lng`.
    #[arg(
        long,
        requires = "end",
        allow_hyphen_values = true,
        value_parser = parse_coordinate
    )]
    start: Option<Coordinate>,

    /// Upper-right corner as `lat,lng`.
    #[arg(
        long,
        requires = "start",
        allow_hyphen_values = true,
        value_parser = parse_coordinate
    )]
    end: Option<Coordinate>,

    /// Search radius in meters. Overrides the region's radius.
    #[arg(long)]
    radius: Option<f64>,
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{raw}`"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude `{lat}`: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude `{lng}`: {e}"))?;
    Ok(Coordinate::new(lat, lng))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Sweep { area, equatorward }) => {
            let config = placesweep_core::load_app_config()?;
            sweep::run_sweep(&config, &cli.regions, &area, equatorward).await?;
        }
        Some(Commands::Grid { area, equatorward }) => {
            inspect::run_grid(&cli.regions, &area, equatorward)?;
        }
        Some(Commands::Regions) => inspect::run_regions(&cli.regions)?,
        None => println!("placesweep: no command given; try `placesweep --help`"),
    }

    Ok(())
}
