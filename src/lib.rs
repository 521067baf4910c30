//! Workspace umbrella: re-exports `ecoglobe-core` so the demos can use
//! `ecoglobe_rs::prelude::*`.
pub use ecoglobe_core::*;
