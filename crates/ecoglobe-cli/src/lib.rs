//! ecoglobe-cli
//! ============
//!
//! Command-line interface for the `ecoglobe-core` choropleth pipeline.
//!
//! The crate ships a binary (`ecoglobe`); this library target only carries
//! the documentation page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! ecoglobe --help
//! ecoglobe stats
//! ecoglobe resolve "Dem. Rep. Congo"
//! ecoglobe --mode sustain ranking -n 10
//! ecoglobe --world ./data/countries-110m.json.gz paint > fills.json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=ecoglobe_core=debug`).
//!
//! For programmatic access use the [`ecoglobe-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
