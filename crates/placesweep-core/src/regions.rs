use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::{validate_radius, Coordinate, SearchArea};
use crate::ConfigError;

/// A named rectangle to sweep, as declared in `regions.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    /// Lower-left corner.
    pub start: Coordinate,
    /// Upper-right corner.
    pub end: Coordinate,
    pub radius_meters: f64,
    pub notes: Option<String>,
}

impl RegionConfig {
    /// # Errors
    ///
    /// Returns [`crate::AreaError`] if the corners do not form a valid area.
    pub fn area(&self) -> Result<SearchArea, crate::AreaError> {
        SearchArea::new(self.start, self.end)
    }
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

impl RegionsFile {
    /// Looks up a region by name, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RegionConfig> {
        self.regions
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Load and validate the region catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_regions(&content)
}

fn parse_regions(content: &str) -> Result<RegionsFile, ConfigError> {
    let regions_file: RegionsFile = serde_yaml::from_str(content)?;
    validate_regions(&regions_file)?;
    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for region in &regions_file.regions {
        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(region.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region name: '{}'",
                region.name
            )));
        }

        region
            .area()
            .map_err(|e| ConfigError::Validation(format!("region '{}': {e}", region.name)))?;

        validate_radius(region.radius_meters)
            .map_err(|e| ConfigError::Validation(format!("region '{}': {e}", region.name)))?;
    }

    Ok(())
}
