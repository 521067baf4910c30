// crates/ecoglobe-core/src/model/mod.rs

//! Domain records built once from the static inputs.

pub mod geometry;

pub use geometry::{parse_geometry, GeometryFeature};

use crate::error::GlobeError;
use crate::loader::Row;
use crate::text::parse_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names accepted for the ISO code in the metrics table, by priority.
pub const ISO_COLUMNS: &[&str] = &["isoA3", "iso3A", "ISO3", "code", "iso_code"];

/// One row of the canonical name table (`name`, `isoA3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    #[serde(rename = "isoA3")]
    pub iso_a3: String,
}

impl NameRecord {
    /// Row mapper for the name table. Missing cells become empty strings.
    pub fn from_row(row: &Row<'_>) -> Self {
        Self {
            name: row.get("name").unwrap_or_default().to_string(),
            iso_a3: row.get("isoA3").unwrap_or_default().trim().to_ascii_uppercase(),
        }
    }
}

/// One row of the metrics table. Every numeric field is optional: absent
/// and unparseable cells are `None`, never zero or NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "isoA3")]
    pub iso_a3: String,
    pub co2_per_capita: Option<f64>,
    pub pm25: Option<f64>,
    pub renewables_elec_pct: Option<f64>,
    pub protected_land_pct: Option<f64>,
    pub safe_water_pct: Option<f64>,
    pub life_expectancy_yrs: Option<f64>,
    pub hdi: Option<f64>,
    /// Precomputed composite score.
    pub score: Option<f64>,
    /// Score of the "sustain" mode; filled by [`crate::composite`] when the
    /// table does not carry it.
    pub sustainability_score: Option<f64>,
}

impl MetricRecord {
    /// Row mapper for the metrics table.
    ///
    /// The ISO code comes from the first declared column of [`ISO_COLUMNS`]
    /// (even when that cell is empty), trimmed and uppercased.
    pub fn from_row(row: &Row<'_>) -> Self {
        let iso_a3 = row
            .first_present(ISO_COLUMNS)
            .and_then(|(_, cell)| cell)
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();
        let num = |column: &str| parse_number(row.get(column));

        Self {
            iso_a3,
            co2_per_capita: num("co2_per_capita"),
            pm25: num("pm25"),
            renewables_elec_pct: num("renewables_elec_pct"),
            protected_land_pct: num("protected_land_pct"),
            safe_water_pct: num("safe_water_pct"),
            life_expectancy_yrs: num("life_expectancy_yrs"),
            hdi: num("hdi"),
            score: num("score"),
            sustainability_score: num("sustainability_score"),
        }
    }

    /// Score shown in `mode`.
    #[inline]
    pub fn score_for(&self, mode: ScoreMode) -> Option<f64> {
        match mode {
            ScoreMode::Eco => self.score,
            ScoreMode::Sustain => self.sustainability_score,
        }
    }
}

/// Which score variant colors the globe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Environmental score (the precomputed `score` column).
    #[default]
    Eco,
    /// Integral sustainability score (`sustainability_score`).
    Sustain,
}

impl ScoreMode {
    pub const ALL: [ScoreMode; 2] = [ScoreMode::Eco, ScoreMode::Sustain];

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreMode::Eco => "eco",
            ScoreMode::Sustain => "sustain",
        }
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreMode {
    type Err = GlobeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eco" => Ok(ScoreMode::Eco),
            "sustain" | "sustainability" => Ok(ScoreMode::Sustain),
            other => Err(GlobeError::Config(format!("unknown score mode: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_table;

    #[test]
    fn name_rows_are_trimmed_and_uppercased() {
        let rows = parse_table("name,isoA3\nSpain, esp \nNowhere,\n", NameRecord::from_row);
        assert_eq!(rows[0], NameRecord { name: "Spain".into(), iso_a3: "ESP".into() });
        assert_eq!(rows[1].iso_a3, "");
    }

    #[test]
    fn metric_rows_parse_locale_numbers_and_placeholders() {
        let text = "ISO3;co2_per_capita;pm25;hdi;score\nesp;5,2;NA;0,905;0,71\n";
        let rows = parse_table(text, MetricRecord::from_row);
        let r = &rows[0];
        assert_eq!(r.iso_a3, "ESP");
        assert_eq!(r.co2_per_capita, Some(5.2));
        assert_eq!(r.pm25, None);
        assert_eq!(r.hdi, Some(0.905));
        assert_eq!(r.score, Some(0.71));
        assert_eq!(r.safe_water_pct, None);
        assert_eq!(r.sustainability_score, None);
    }

    #[test]
    fn iso_column_synonyms_follow_priority() {
        let rows = parse_table("code,iso_code,score\nFRA,XXX,1\n", MetricRecord::from_row);
        assert_eq!(rows[0].iso_a3, "FRA");

        // a declared but empty higher-priority column wins over a filled one
        let rows = parse_table("iso3A,code,score\n,DEU,1\n", MetricRecord::from_row);
        assert_eq!(rows[0].iso_a3, "");

        let rows = parse_table("country,score\nX,1\n", MetricRecord::from_row);
        assert_eq!(rows[0].iso_a3, "");
    }

    #[test]
    fn score_for_picks_mode_column() {
        let r = MetricRecord {
            score: Some(0.4),
            sustainability_score: Some(0.6),
            ..Default::default()
        };
        assert_eq!(r.score_for(ScoreMode::Eco), Some(0.4));
        assert_eq!(r.score_for(ScoreMode::Sustain), Some(0.6));
    }

    #[test]
    fn score_mode_round_trips_through_text() {
        for mode in ScoreMode::ALL {
            assert_eq!(mode.to_string().parse::<ScoreMode>().unwrap(), mode);
        }
        assert!("vibes".parse::<ScoreMode>().is_err());
    }
}
