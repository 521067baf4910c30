//! ecoglobe: command-line front end for ecoglobe-core
//!
//! Loads the ISO name table, the metrics table and the world geometry (from
//! the config file, the defaults, or the flags) and prints what the globe
//! would show.
//!
//! Usage examples
//! --------------
//!
//! - Show load statistics
//!   $ ecoglobe stats
//!
//! - Check how a spelling resolves
//!   $ ecoglobe resolve "Côte d'Ivoire"
//!
//! - Tooltip for a country, by code or name
//!   $ ecoglobe country ESP
//!   $ ecoglobe --mode sustain country norway
//!
//! - Ranking panel and legend
//!   $ ecoglobe ranking -n 10
//!   $ ecoglobe legend
//!
//! - Names the globe cannot color
//!   $ ecoglobe unresolved
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use ecoglobe_core::api::PLACEHOLDER;
use ecoglobe_core::{
    load_table, Choropleth, CodeResolver, GlobeConfig, NameRecord, Palette, TableSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecoglobe=info,ecoglobe_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = build_config(&args)?;

    match args.command {
        Commands::Resolve { name } => resolve(&config, &name),
        command => run(&config, command),
    }
}

/// Resolution needs only the name table.
fn resolve(config: &GlobeConfig, name: &str) -> anyhow::Result<()> {
    let names = load_table(&config.iso_names, NameRecord::from_row)
        .context("loading the ISO name table")?;
    let resolver = CodeResolver::with_builtin_aliases(&names);
    match resolver.resolve_name(name) {
        Some(code) => println!("{code}"),
        None => bail!("no code for {name:?}"),
    }
    Ok(())
}

fn run(config: &GlobeConfig, command: Commands) -> anyhow::Result<()> {
    let globe = Choropleth::load(config).context("loading the globe inputs")?;
    let mode = config.mode;

    match command {
        Commands::Stats => {
            let stats = globe.stats();
            println!("Globe statistics:");
            println!("  Features: {} ({} mapped)", stats.features, stats.mapped_features);
            println!("  Name rows: {}", stats.name_rows);
            println!("  Metric rows: {}", stats.metric_rows);
            for m in &stats.modes {
                match m.range {
                    Some((lo, hi)) => println!(
                        "  {}: {} valid scores, range {lo:.3} .. {hi:.3}",
                        m.mode, m.valid_scores
                    ),
                    None => println!("  {}: no valid scores", m.mode),
                }
            }
        }

        Commands::Country { code } => {
            let feature = globe
                .feature_for(&code.trim().to_ascii_uppercase())
                .or_else(|| globe.feature_named(&code))
                .or_else(|| {
                    globe
                        .resolver()
                        .resolve_name(&code)
                        .and_then(|c| globe.feature_for(c))
                });
            let Some(feature) = feature else {
                bail!("no country found for: {code}");
            };
            let view = globe.tooltip(feature, mode);
            println!("{}", view.name);
            println!("  Code: {}", view.iso_a3.as_deref().unwrap_or(PLACEHOLDER));
            println!("  Score ({mode}): {}", view.score);
            println!("  CO2 per capita: {}", view.co2_per_capita);
            println!("  PM2.5: {}", view.pm25);
            println!("  Renewable electricity: {}", view.renewables);
            println!("  Protected land: {}", view.protected_land);
            println!("  Safe water: {}", view.safe_water);
            println!("  Life expectancy: {}", view.life_expectancy);
            println!("  HDI: {}", view.hdi);
        }

        Commands::Ranking { n } => {
            let n = n.unwrap_or(config.ranking_size);
            for e in globe.ranking(mode, n) {
                println!("{:>3}. {} ({}) {}", e.rank, e.name, e.iso_a3, e.label);
            }
        }

        Commands::Legend => {
            for entry in globe.legend(mode) {
                println!("{}  {}", entry.color, entry.label());
            }
            println!("{}  no data", globe.scale(mode).unknown_color());
        }

        Commands::Unresolved => {
            let names = globe.unresolved();
            if names.is_empty() {
                println!("All features resolve.");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }

        Commands::Paint => {
            let fills = globe.fills(mode);
            println!("{}", serde_json::to_string_pretty(&fills)?);
        }

        Commands::Resolve { name } => return resolve(config, &name),
    }

    Ok(())
}

/// Config file (or defaults), then flag overrides.
fn build_config(args: &CliArgs) -> anyhow::Result<GlobeConfig> {
    let mut config = match &args.config {
        Some(path) => GlobeConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GlobeConfig::default(),
    };
    if let Some(s) = &args.iso_names {
        config.iso_names = TableSource::parse(s);
    }
    if let Some(s) = &args.metrics {
        config.metrics = TableSource::parse(s);
    }
    if let Some(s) = &args.world {
        config.world = TableSource::parse(s);
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(name) = &args.palette {
        config.palette = Palette::preset(name)
            .with_context(|| format!("unknown palette {name:?} (expected ocean or traffic)"))?;
    }
    config.validate()?;
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_flag_selects_a_preset() {
        let args = CliArgs::parse_from(["ecoglobe", "--palette", "traffic", "legend"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.palette, Palette::traffic());

        let args = CliArgs::parse_from(["ecoglobe", "legend"]);
        assert_eq!(build_config(&args).unwrap().palette, Palette::ocean());
    }

    #[test]
    fn unknown_palette_is_rejected() {
        let args = CliArgs::parse_from(["ecoglobe", "-p", "viridis", "legend"]);
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("viridis"));
    }
}
