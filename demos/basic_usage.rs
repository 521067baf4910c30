//! Basic usage example for ecoglobe-rs
//!
//! This example demonstrates how to:
//! - Parse the three inputs (bundled sample data, no network)
//! - Resolve country names to ISO codes
//! - Color features, read the legend and the ranking
//! - Drive the view state (focus and drag)

use ecoglobe_rs::prelude::*;

const ISO_NAMES: &str = include_str!("../data/iso_names.csv");
const METRICS: &str = include_str!("../data/OUT/sustainability_index.csv");
const WORLD: &str = include_str!("../data/sample_world.json");

fn main() -> Result<()> {
    println!("=== EcoGlobe-RS Basic Usage Example ===\n");

    println!("Parsing sample inputs...");
    let inputs = Inputs::from_texts(ISO_NAMES, METRICS, WORLD, "countries")?;
    let globe = Choropleth::assemble(
        inputs,
        AliasTable::builtin().clone(),
        Palette::ocean(),
        UNKNOWN_COLOR,
    );
    println!("✓ Globe assembled\n");

    // Example 1: Name resolution
    println!("--- Example 1: Resolve names ---");
    for name in ["Dem. Rep. Congo", "Côte d'Ivoire", "United States of America", "Atlantis"] {
        match globe.resolver().resolve_name(name) {
            Some(code) => println!("{name:<26} -> {code}"),
            None => println!("{name:<26} -> (no code)"),
        }
    }
    println!();

    // Example 2: Fills
    println!("--- Example 2: Feature fills (eco) ---");
    for fill in globe.fills(ScoreMode::Eco) {
        println!(
            "{:<26} {:<4} {}",
            fill.name.as_deref().unwrap_or("?"),
            fill.iso_a3.as_deref().unwrap_or("-"),
            fill.color
        );
    }
    println!();

    // Example 3: Legend
    println!("--- Example 3: Legend ---");
    for entry in globe.legend(ScoreMode::Eco) {
        println!("{} {}", entry.color, entry.label());
    }
    println!();

    // Example 4: Ranking in both modes
    for mode in ScoreMode::ALL {
        println!("--- Example 4: Top 5 ({mode}) ---");
        for e in globe.ranking(mode, 5) {
            println!("{}. {} {}", e.rank, e.name, e.label);
        }
        println!();
    }

    // Example 5: Tooltip
    println!("--- Example 5: Tooltip ---");
    if let Some(feature) = globe.feature_for("ESP") {
        let view = globe.tooltip(feature, ScoreMode::Eco);
        println!("{} ({:?})", view.name, view.iso_a3);
        println!("  score {}  co2 {}  pm2.5 {}", view.score, view.co2_per_capita, view.pm25);
        println!("  renewables {}  life {}", view.renewables, view.life_expectancy);
    }
    println!();

    // Example 6: View state
    println!("--- Example 6: Focus and drag ---");
    let mut view = ViewState::new(ScoreMode::Eco);
    if let Some(r) = view.focus(&globe, "NOR") {
        println!("Focus NOR -> rotate to [{:.1}, {:.1}]", r.lambda, r.phi);
    }
    view.drag(40.0, -20.0);
    println!(
        "After drag -> [{:.1}, {:.1}]",
        view.rotation.lambda, view.rotation.phi
    );

    println!("\n=== Example completed successfully ===");
    Ok(())
}
