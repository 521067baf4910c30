// crates/ecoglobe-core/src/api.rs

//! Serializable views handed to the renderer (tooltip, ranking rows, fills).
//!
//! Absent values are rendered as [`PLACEHOLDER`], never as `0` or `NaN`.

use crate::model::MetricRecord;
use crate::scale::Color;
use serde::Serialize;

/// Shown for every absent value.
pub const PLACEHOLDER: &str = "—";

/// Fixed decimals, or the placeholder.
pub fn fmt_num(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(v) => format!("{v:.decimals$}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Fixed decimals plus a unit suffix, or the bare placeholder.
pub fn fmt_unit(v: Option<f64>, decimals: usize, unit: &str) -> String {
    match v {
        Some(_) => format!("{} {unit}", fmt_num(v, decimals)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Whole percentage. Fractions in `[0, 1]` are scaled by 100 first, larger
/// values are taken as already in percent.
pub fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) => {
            let x = if (0.0..=1.0).contains(&v) { v * 100.0 } else { v };
            format!("{x:.0}%")
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// Hover card of one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryView {
    pub name: String,
    pub iso_a3: Option<String>,
    pub score: String,
    pub co2_per_capita: String,
    pub pm25: String,
    pub renewables: String,
    pub protected_land: String,
    pub safe_water: String,
    pub life_expectancy: String,
    pub hdi: String,
}

impl CountryView {
    /// `display_name` falls back to the code, then to the placeholder.
    pub fn new(display_name: Option<&str>, iso_a3: Option<&str>, row: Option<&MetricRecord>, score: Option<f64>) -> Self {
        let name = display_name
            .or(iso_a3)
            .unwrap_or(PLACEHOLDER)
            .to_string();
        let get = |f: fn(&MetricRecord) -> Option<f64>| row.and_then(f);
        Self {
            name,
            iso_a3: iso_a3.map(str::to_owned),
            score: fmt_num(score, 2),
            co2_per_capita: fmt_unit(get(|r| r.co2_per_capita), 2, "t/cap"),
            pm25: fmt_unit(get(|r| r.pm25), 1, "µg/m³"),
            renewables: fmt_pct(get(|r| r.renewables_elec_pct)),
            protected_land: fmt_pct(get(|r| r.protected_land_pct)),
            safe_water: fmt_pct(get(|r| r.safe_water_pct)),
            life_expectancy: fmt_unit(get(|r| r.life_expectancy_yrs), 1, "yrs"),
            hdi: fmt_num(get(|r| r.hdi), 3),
        }
    }
}

/// One row of the ranking panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    /// 1-based.
    pub rank: usize,
    pub iso_a3: String,
    pub name: String,
    pub score: f64,
    /// `score` formatted with two decimals.
    pub label: String,
}

/// Paint instruction for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureFill {
    pub name: Option<String>,
    pub iso_a3: Option<String>,
    pub color: Color,
}
