// crates/ecoglobe-core/src/globe.rs

//! The assembled choropleth: resolver, feature index, metric lookup and
//! one color scale per score mode.

use crate::alias::AliasTable;
use crate::api::{CountryView, FeatureFill, RankingEntry};
use crate::common::{GlobeStats, ModeStats};
use crate::composite::{fill_sustainability, Weights};
use crate::config::GlobeConfig;
use crate::error::{GlobeError, Result};
use crate::loader::{fetch_text, load_table, parse_table};
use crate::model::{parse_geometry, GeometryFeature, MetricRecord, NameRecord, ScoreMode};
use crate::ranking::top_n;
use crate::resolve::{CodeResolver, ResolvedIndex};
use crate::scale::{Color, ColorScale, LegendEntry, Palette};
use crate::traits::Named;
use std::collections::HashMap;
use std::thread;

/// The three static inputs, parsed.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub names: Vec<NameRecord>,
    pub metrics: Vec<MetricRecord>,
    pub features: Vec<GeometryFeature>,
}

impl Inputs {
    /// Parses inputs whose text was fetched elsewhere (e.g. by a browser).
    pub fn from_texts(names: &str, metrics: &str, world: &str, geometry_object: &str) -> Result<Self> {
        Ok(Self {
            names: parse_table(names, NameRecord::from_row),
            metrics: parse_table(metrics, MetricRecord::from_row),
            features: parse_geometry(world, geometry_object)?,
        })
    }

    /// Fetches the three sources concurrently and waits for all of them.
    /// Any failure fails the whole load; partial inputs are never returned.
    pub fn load(config: &GlobeConfig) -> Result<Self> {
        thread::scope(|s| {
            let names = s.spawn(|| load_table(&config.iso_names, NameRecord::from_row));
            let metrics = s.spawn(|| load_table(&config.metrics, MetricRecord::from_row));
            let world = s.spawn(|| {
                let text = fetch_text(&config.world)?;
                parse_geometry(&text, &config.geometry_object)
            });

            let names = join(names)?;
            let metrics = join(metrics)?;
            let features = join(world)?;
            Ok(Self {
                names,
                metrics,
                features,
            })
        })
    }
}

/// Rows of `metrics` that `by_code` points at.
fn current_rows<'a>(
    metrics: &'a [MetricRecord],
    by_code: &'a HashMap<String, usize>,
) -> impl Iterator<Item = &'a MetricRecord> + 'a {
    metrics
        .iter()
        .enumerate()
        .filter(move |(i, r)| by_code.get(&r.iso_a3) == Some(i))
        .map(|(_, r)| r)
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| GlobeError::InvalidData("loader thread panicked".into()))?
}

/// Everything the renderer asks about, built once per page load.
#[derive(Debug, Clone)]
pub struct Choropleth {
    names: Vec<NameRecord>,
    metrics: Vec<MetricRecord>,
    features: Vec<GeometryFeature>,
    resolver: CodeResolver,
    index: ResolvedIndex,
    by_code: HashMap<String, usize>,
    display_names: HashMap<String, String>,
    eco: ColorScale,
    sustain: ColorScale,
}

impl Choropleth {
    /// Loads the inputs named by `config` and assembles them.
    pub fn load(config: &GlobeConfig) -> Result<Self> {
        config.validate()?;
        let inputs = Inputs::load(config)?;
        Ok(Self::assemble(
            inputs,
            AliasTable::builtin().clone(),
            config.palette.clone(),
            config.unknown_color,
        ))
    }

    /// Builds the derived state from already-parsed inputs.
    ///
    /// Missing `sustainability_score` values are computed with the default
    /// composite weights.
    pub fn assemble(inputs: Inputs, aliases: AliasTable, palette: Palette, unknown: Color) -> Self {
        let Inputs {
            names,
            mut metrics,
            features,
        } = inputs;

        let filled = fill_sustainability(&mut metrics, &Weights::default());
        tracing::debug!(filled, "computed sustainability scores");

        let resolver = CodeResolver::new(&names, aliases);
        let index = ResolvedIndex::build(&features, &resolver);

        let mut by_code = HashMap::with_capacity(metrics.len());
        for (i, r) in metrics.iter().enumerate() {
            if let Some(prev) = by_code.insert(r.iso_a3.clone(), i) {
                tracing::warn!(iso = %r.iso_a3, first_row = prev, row = i, "duplicate ISO code in metrics, keeping the later row");
            }
        }

        let display_names = names
            .iter()
            .map(|r| (r.iso_a3.clone(), r.name.clone()))
            .collect();

        let scale_for = |mode: ScoreMode| {
            let scale = ColorScale::build(
                current_rows(&metrics, &by_code).filter_map(|r| r.score_for(mode)),
                palette.clone(),
                unknown,
            );
            if scale.is_degenerate() {
                tracing::warn!(%mode, observed = scale.observed(), "degenerate score distribution, using even breakpoints");
            }
            scale
        };
        let eco = scale_for(ScoreMode::Eco);
        let sustain = scale_for(ScoreMode::Sustain);

        tracing::info!(
            features = features.len(),
            mapped = index.mapped_features(),
            name_rows = names.len(),
            metric_rows = metrics.len(),
            valid_scores = eco.observed(),
            min = eco.bounds().0,
            max = eco.bounds().1,
            "choropleth assembled"
        );

        Self {
            names,
            metrics,
            features,
            resolver,
            index,
            by_code,
            display_names,
            eco,
            sustain,
        }
    }

    pub fn features(&self) -> &[GeometryFeature] {
        &self.features
    }

    pub fn metrics(&self) -> &[MetricRecord] {
        &self.metrics
    }

    pub fn names(&self) -> &[NameRecord] {
        &self.names
    }

    pub fn resolver(&self) -> &CodeResolver {
        &self.resolver
    }

    pub fn index(&self) -> &ResolvedIndex {
        &self.index
    }

    pub fn scale(&self, mode: ScoreMode) -> &ColorScale {
        match mode {
            ScoreMode::Eco => &self.eco,
            ScoreMode::Sustain => &self.sustain,
        }
    }

    /// Code of a feature, `None` for a resolution miss.
    pub fn resolve(&self, feature: &GeometryFeature) -> Option<&str> {
        self.resolver.resolve(feature)
    }

    /// Metrics rows that survive duplicate codes (the last row per code),
    /// in table order.
    pub fn current_metrics(&self) -> impl Iterator<Item = &MetricRecord> + '_ {
        current_rows(&self.metrics, &self.by_code)
    }

    /// Metrics row for `code` (last row wins on duplicates).
    pub fn record(&self, code: &str) -> Option<&MetricRecord> {
        self.by_code.get(code).map(|&i| &self.metrics[i])
    }

    /// The feature drawn for `code`.
    pub fn feature_for(&self, code: &str) -> Option<&GeometryFeature> {
        self.index.position(code).map(|i| &self.features[i])
    }

    /// First feature whose display name normalizes like `name`.
    pub fn feature_named(&self, name: &str) -> Option<&GeometryFeature> {
        self.features.iter().find(|f| f.is_named(name))
    }

    /// Name-table spelling of `code`.
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.display_names.get(code).map(String::as_str)
    }

    /// Fill of `feature` in `mode`: the class color, or the unknown color
    /// when the name does not resolve or the country has no score.
    pub fn fill_for(&self, feature: &GeometryFeature, mode: ScoreMode) -> Color {
        let score = self
            .resolve(feature)
            .and_then(|code| self.record(code))
            .and_then(|r| r.score_for(mode));
        self.scale(mode).color_for(score)
    }

    /// Fill of every feature, in feature order.
    pub fn fills(&self, mode: ScoreMode) -> Vec<FeatureFill> {
        self.features
            .iter()
            .enumerate()
            .map(|(i, f)| FeatureFill {
                name: f.name.clone(),
                iso_a3: self.index.code_at(i).map(str::to_owned),
                color: self.fill_for(f, mode),
            })
            .collect()
    }

    pub fn legend(&self, mode: ScoreMode) -> Vec<LegendEntry> {
        self.scale(mode).legend()
    }

    /// Top `n` countries with geometry in `mode`.
    pub fn ranking(&self, mode: ScoreMode, n: usize) -> Vec<RankingEntry> {
        top_n(self.current_metrics(), n, mode, &self.index)
            .into_iter()
            .enumerate()
            .filter_map(|(i, r)| {
                let score = r.score_for(mode)?;
                Some(RankingEntry {
                    rank: i + 1,
                    iso_a3: r.iso_a3.clone(),
                    name: self.display_name(&r.iso_a3).unwrap_or(&r.iso_a3).to_string(),
                    score,
                    label: format!("{score:.2}"),
                })
            })
            .collect()
    }

    /// Hover card for `feature`.
    pub fn tooltip(&self, feature: &GeometryFeature, mode: ScoreMode) -> CountryView {
        let code = self.resolve(feature);
        let row = code.and_then(|c| self.record(c));
        CountryView::new(
            feature.display_name(),
            code,
            row,
            row.and_then(|r| r.score_for(mode)),
        )
    }

    /// Feature names that do not resolve, in feature order.
    pub fn unresolved(&self) -> Vec<&str> {
        self.features
            .iter()
            .enumerate()
            .filter(|(i, _)| self.index.code_at(*i).is_none())
            .map(|(_, f)| f.name.as_deref().unwrap_or_default())
            .collect()
    }

    pub fn stats(&self) -> GlobeStats {
        let modes = ScoreMode::ALL
            .iter()
            .map(|&mode| {
                let scale = self.scale(mode);
                ModeStats {
                    mode,
                    valid_scores: scale.observed(),
                    range: (scale.observed() > 0).then(|| scale.bounds()),
                }
            })
            .collect();
        GlobeStats {
            features: self.features.len(),
            mapped_features: self.index.mapped_features(),
            name_rows: self.names.len(),
            metric_rows: self.metrics.len(),
            modes,
        }
    }
}

/// Globe rotation in degrees: `lambda` (yaw), `phi` (pitch).
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation {
    pub lambda: f64,
    pub phi: f64,
}

/// Degrees of rotation per dragged pixel.
pub const DRAG_SENSITIVITY: f64 = 0.25;

/// UI state handed to the renderer, kept out of the data model.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewState {
    pub mode: ScoreMode,
    pub rotation: Rotation,
    /// Code of the highlighted country.
    pub focused: Option<String>,
}

impl ViewState {
    pub fn new(mode: ScoreMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn set_mode(&mut self, mode: ScoreMode) {
        self.mode = mode;
    }

    /// Pointer drag by `(dx, dy)` pixels.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.rotation.lambda += dx * DRAG_SENSITIVITY;
        self.rotation.phi -= dy * DRAG_SENSITIVITY;
    }

    /// Turns the globe so `code`'s centroid faces the viewer and marks it
    /// focused. Unknown codes and shapeless features leave the state as is.
    pub fn focus(&mut self, globe: &Choropleth, code: &str) -> Option<Rotation> {
        let [lon, lat] = globe.feature_for(code)?.centroid()?;
        self.rotation = Rotation {
            lambda: -lon,
            phi: -lat,
        };
        self.focused = Some(code.to_string());
        Some(self.rotation)
    }
}
