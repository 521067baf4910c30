// crates/ecoglobe-core/src/lib.rs

//! # ecoglobe-core
//!
//! Data side of a sustainability choropleth globe: loads the ISO name table,
//! the per-country metrics and the world geometry, resolves inconsistently
//! spelled country names to ISO-3166 alpha-3 codes and bins scores into a
//! quantile color scale.
//!
//! ```no_run
//! use ecoglobe_core::{Choropleth, GlobeConfig, ScoreMode};
//!
//! let globe = Choropleth::load(&GlobeConfig::default())?;
//! for entry in globe.ranking(ScoreMode::Eco, 5) {
//!     println!("{}. {} {}", entry.rank, entry.name, entry.label);
//! }
//! # Ok::<(), ecoglobe_core::GlobeError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod alias;
pub mod api; // Serializable views for renderers
pub mod common;
pub mod composite;
pub mod config;
pub mod error;
pub mod globe;
pub mod loader;
pub mod model;
pub mod ranking;
pub mod resolve;
pub mod scale;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::alias::AliasTable;
pub use crate::api::{CountryView, FeatureFill, RankingEntry};
pub use crate::common::{GlobeStats, ModeStats};
pub use crate::config::GlobeConfig;
pub use crate::error::{GlobeError, Result};
pub use crate::globe::{Choropleth, Inputs, Rotation, ViewState};
pub use crate::loader::{load_table, parse_table, TableSource};
pub use crate::model::{GeometryFeature, MetricRecord, NameRecord, ScoreMode};
pub use crate::resolve::{CodeResolver, ResolvedIndex};
pub use crate::scale::{Color, ColorScale, LegendEntry, Palette, UNKNOWN_COLOR};
pub use crate::text::{normalize, parse_number};
pub use crate::traits::Named;

pub mod prelude {
    //! Common types and traits for demos and bindings.
    pub use crate::{
        AliasTable, Choropleth, CodeResolver, Color, ColorScale, CountryView, GeometryFeature,
        GlobeConfig, GlobeError, Inputs, MetricRecord, NameRecord, Named, Palette, Result,
        ScoreMode, TableSource, ViewState, UNKNOWN_COLOR,
    };
}
