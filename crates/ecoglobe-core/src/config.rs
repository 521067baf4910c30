// crates/ecoglobe-core/src/config.rs

//! Runtime configuration: where the three inputs live and how to paint.

use crate::error::{GlobeError, Result};
use crate::loader::TableSource;
use crate::model::ScoreMode;
use crate::scale::{Color, Palette, UNKNOWN_COLOR};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ISO_NAMES: &str = "./data/iso_names.csv";
pub const DEFAULT_METRICS: &str = "./data/OUT/sustainability_index.csv";
pub const DEFAULT_WORLD: &str = "https://unpkg.com/world-atlas@2/countries-110m.json";
pub const DEFAULT_GEOMETRY_OBJECT: &str = "countries";
pub const DEFAULT_RANKING_SIZE: usize = 5;

/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// `name`, `isoA3` table.
    pub iso_names: TableSource,
    /// Per-country metrics table.
    pub metrics: TableSource,
    /// TopoJSON / GeoJSON world geometry.
    pub world: TableSource,
    /// Topology object holding the countries.
    pub geometry_object: String,
    pub palette: Palette,
    pub unknown_color: Color,
    pub ranking_size: usize,
    pub mode: ScoreMode,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            iso_names: TableSource::parse(DEFAULT_ISO_NAMES),
            metrics: TableSource::parse(DEFAULT_METRICS),
            world: TableSource::parse(DEFAULT_WORLD),
            geometry_object: DEFAULT_GEOMETRY_OBJECT.to_string(),
            palette: Palette::default(),
            unknown_color: UNKNOWN_COLOR,
            ranking_size: DEFAULT_RANKING_SIZE,
            mode: ScoreMode::default(),
        }
    }
}

impl GlobeConfig {
    /// Reads a JSON config file and validates it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GlobeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The unknown color must stay distinguishable from every class.
    pub fn validate(&self) -> Result<()> {
        if self.palette.contains(&self.unknown_color) {
            return Err(GlobeError::Config(format!(
                "unknown color {} is also a palette color",
                self.unknown_color
            )));
        }
        if self.geometry_object.trim().is_empty() {
            return Err(GlobeError::Config("geometry_object must not be empty".into()));
        }
        Ok(())
    }
}
