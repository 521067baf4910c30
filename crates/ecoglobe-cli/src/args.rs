// crates/ecoglobe-cli/src/args.rs

use clap::{Parser, Subcommand};
use ecoglobe_core::ScoreMode;
use std::path::PathBuf;

/// CLI arguments for ecoglobe
#[derive(Debug, Parser)]
#[command(
    name = "ecoglobe",
    version,
    about = "Inspect the sustainability choropleth: name resolution, scores, colors and ranking"
)]
pub struct CliArgs {
    /// JSON config file; flags below override its fields
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// ISO name table (path or http(s) URL)
    #[arg(long = "iso-names", global = true)]
    pub iso_names: Option<String>,

    /// Metrics table (path or http(s) URL)
    #[arg(long = "metrics", global = true)]
    pub metrics: Option<String>,

    /// World geometry, TopoJSON or GeoJSON (path or http(s) URL)
    #[arg(long = "world", global = true)]
    pub world: Option<String>,

    /// Score variant: eco or sustain
    #[arg(short = 'm', long = "mode", global = true)]
    pub mode: Option<ScoreMode>,

    /// Built-in palette: ocean or traffic
    #[arg(short = 'p', long = "palette", global = true)]
    pub palette: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summary of the loaded inputs and score distributions
    Stats,

    /// Resolve a country name to its ISO alpha-3 code
    Resolve {
        /// Country name as spelled in any source (e.g. "Dem. Rep. Congo")
        name: String,
    },

    /// Show the tooltip card for a country
    Country {
        /// ISO alpha-3 code or country name
        code: String,
    },

    /// Top countries by score that have a shape on the globe
    Ranking {
        /// Number of entries (default: ranking_size from the config)
        #[arg(short = 'n', long = "top")]
        n: Option<usize>,
    },

    /// Color classes of the legend
    Legend,

    /// Feature names that resolve to no code
    Unresolved,

    /// Fill color of every feature as JSON
    Paint,
}
