// crates/ecoglobe-core/src/common.rs
use crate::model::ScoreMode;
use serde::{Deserialize, Serialize};

/// Aggregate counts of an assembled [`crate::Choropleth`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeStats {
    pub features: usize,
    /// Features whose name resolved to a code.
    pub mapped_features: usize,
    pub name_rows: usize,
    pub metric_rows: usize,
    pub modes: Vec<ModeStats>,
}

/// Score distribution of one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeStats {
    pub mode: ScoreMode,
    pub valid_scores: usize,
    /// Raw `(min, max)`; `None` when no score was observed.
    pub range: Option<(f64, f64)>,
}
