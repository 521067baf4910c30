//! Error handling example for ecoglobe-rs
//!
//! This example demonstrates how failures surface and which inputs are
//! tolerated instead of failing.

use ecoglobe_rs::prelude::*;
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("=== EcoGlobe-RS Error Handling Example ===\n");

    // Example 1: A missing source fails the whole load
    println!("--- Example 1: Loading with a missing file ---");
    let config = GlobeConfig {
        iso_names: TableSource::Path(PathBuf::from("./data/iso_names.csv")),
        metrics: TableSource::Path(PathBuf::from("./data/does-not-exist.csv")),
        world: TableSource::Path(PathBuf::from("./data/sample_world.json")),
        ..Default::default()
    };
    match Choropleth::load(&config) {
        Ok(_) => println!("✓ Loaded (unexpected)"),
        Err(e) => println!("✗ Load failed: {e}"),
    }
    println!();

    // Example 2: Invalid configuration
    println!("--- Example 2: Rejected configuration ---");
    let bad = GlobeConfig::from_json(r##"{"unknown_color": "#0045AD"}"##)
        .and_then(|c| c.validate().map(|_| c));
    match bad {
        Ok(_) => println!("✓ Accepted (unexpected)"),
        Err(e) => println!("✗ {e}"),
    }
    match "#12345".parse::<Color>() {
        Ok(c) => println!("✓ Parsed {c} (unexpected)"),
        Err(e) => println!("✗ {e}"),
    }
    match "greenest".parse::<ScoreMode>() {
        Ok(m) => println!("✓ Mode {m} (unexpected)"),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    // Example 3: Malformed geometry
    println!("--- Example 3: Malformed geometry ---");
    let world = r#"{"type": "Topology", "objects": {}, "arcs": []}"#;
    match Inputs::from_texts("name,isoA3\n", "iso_code,score\n", world, "countries") {
        Ok(_) => println!("✓ Parsed (unexpected)"),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    // Example 4: Dirty cells are absent values, not errors
    println!("--- Example 4: Tolerated input ---");
    let metrics = "iso_code;score;pm25\n esp ;0,62;NA\nFRA;null;\nXXX;abc;12\n";
    let world = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Spain"}, "geometry": null},
        {"type": "Feature", "properties": {"name": "Neverland"}, "geometry": null}
    ]}"#;
    let inputs = Inputs::from_texts("name,isoA3\nSpain,ESP\n", metrics, world, "countries")?;
    let globe = Choropleth::assemble(
        inputs,
        AliasTable::builtin().clone(),
        Palette::ocean(),
        UNKNOWN_COLOR,
    );
    for code in ["ESP", "FRA", "XXX"] {
        let score = globe.record(code).and_then(|r| r.score);
        println!("{code}: score {score:?}");
    }
    println!("Unresolved features: {:?}", globe.unresolved());
    if let Some(feature) = globe.feature_named("Neverland") {
        println!("Neverland fill: {}", globe.fill_for(feature, ScoreMode::Eco));
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
