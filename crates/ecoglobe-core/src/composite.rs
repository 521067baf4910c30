// crates/ecoglobe-core/src/composite.rs

//! Weighted composite of the per-country indicators.
//!
//! Each indicator is min-max normalized over the whole table, emissions and
//! pollution are inverted so that higher is always better, and a country's
//! score is the weighted mean of the indicators it actually has.

use crate::model::MetricRecord;
use serde::{Deserialize, Serialize};

/// The seven indicators of the metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Co2PerCapita,
    Pm25,
    RenewablesElecPct,
    ProtectedLandPct,
    SafeWaterPct,
    LifeExpectancyYrs,
    Hdi,
}

impl Indicator {
    pub const ALL: [Indicator; 7] = [
        Indicator::Co2PerCapita,
        Indicator::Pm25,
        Indicator::RenewablesElecPct,
        Indicator::ProtectedLandPct,
        Indicator::SafeWaterPct,
        Indicator::LifeExpectancyYrs,
        Indicator::Hdi,
    ];

    pub fn value(self, r: &MetricRecord) -> Option<f64> {
        match self {
            Indicator::Co2PerCapita => r.co2_per_capita,
            Indicator::Pm25 => r.pm25,
            Indicator::RenewablesElecPct => r.renewables_elec_pct,
            Indicator::ProtectedLandPct => r.protected_land_pct,
            Indicator::SafeWaterPct => r.safe_water_pct,
            Indicator::LifeExpectancyYrs => r.life_expectancy_yrs,
            Indicator::Hdi => r.hdi,
        }
    }

    /// Lower is better for emissions and particulate matter.
    pub fn inverted(self) -> bool {
        matches!(self, Indicator::Co2PerCapita | Indicator::Pm25)
    }
}

/// Indicator weights. They need not sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights(pub Vec<(Indicator, f64)>);

impl Default for Weights {
    /// Emissions and air first, then renewables, water and life
    /// expectancy, then protected land and HDI.
    fn default() -> Self {
        Self(vec![
            (Indicator::Co2PerCapita, 0.28),
            (Indicator::Pm25, 0.22),
            (Indicator::RenewablesElecPct, 0.16),
            (Indicator::SafeWaterPct, 0.12),
            (Indicator::LifeExpectancyYrs, 0.12),
            (Indicator::ProtectedLandPct, 0.06),
            (Indicator::Hdi, 0.04),
        ])
    }
}

/// `(min, max)` of an indicator over the table; `None` when the column has
/// no values or no spread.
fn column_range(records: &[MetricRecord], ind: Indicator) -> Option<(f64, f64)> {
    let (lo, hi) = records
        .iter()
        .filter_map(|r| ind.value(r))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (hi > lo).then_some((lo, hi))
}

/// Composite score of every record, in input order.
pub fn score_records(records: &[MetricRecord], weights: &Weights) -> Vec<Option<f64>> {
    let ranges: Vec<(Indicator, f64, Option<(f64, f64)>)> = weights
        .0
        .iter()
        .map(|&(ind, w)| (ind, w, column_range(records, ind)))
        .collect();

    records
        .iter()
        .map(|r| {
            let (mut num, mut den) = (0.0, 0.0);
            for &(ind, w, range) in &ranges {
                let (Some((lo, hi)), Some(v)) = (range, ind.value(r)) else {
                    continue;
                };
                let n = (v - lo) / (hi - lo);
                let n = if ind.inverted() { 1.0 - n } else { n };
                num += w * n;
                den += w;
            }
            (den > 0.0).then(|| num / den)
        })
        .collect()
}

/// Fills `sustainability_score` where the table left it empty.
/// Returns how many records were filled.
pub fn fill_sustainability(records: &mut [MetricRecord], weights: &Weights) -> usize {
    let scores = score_records(records, weights);
    let mut filled = 0;
    for (r, s) in records.iter_mut().zip(scores) {
        if r.sustainability_score.is_none() && s.is_some() {
            r.sustainability_score = s;
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(iso: &str, co2: Option<f64>, ren: Option<f64>) -> MetricRecord {
        MetricRecord {
            iso_a3: iso.into(),
            co2_per_capita: co2,
            renewables_elec_pct: ren,
            ..Default::default()
        }
    }

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn inverted_and_direct_indicators_are_combined() {
        let records = vec![rec("AAA", Some(0.0), Some(100.0)), rec("BBB", Some(10.0), Some(0.0))];
        let w = Weights(vec![(Indicator::Co2PerCapita, 1.0), (Indicator::RenewablesElecPct, 1.0)]);
        let s = score_records(&records, &w);
        assert!(approx(s[0], 1.0));
        assert!(approx(s[1], 0.0));
    }

    #[test]
    fn missing_indicators_drop_out_of_the_denominator() {
        let records = vec![
            rec("AAA", Some(0.0), None),
            rec("BBB", Some(10.0), Some(50.0)),
            rec("CCC", None, Some(100.0)),
            rec("DDD", None, None),
        ];
        let w = Weights(vec![(Indicator::Co2PerCapita, 3.0), (Indicator::RenewablesElecPct, 1.0)]);
        let s = score_records(&records, &w);
        assert!(approx(s[0], 1.0));
        assert!(approx(s[1], 0.0));
        assert!(approx(s[2], 1.0));
        assert_eq!(s[3], None);
    }

    #[test]
    fn flat_columns_contribute_nothing() {
        let records = vec![rec("AAA", Some(5.0), Some(1.0)), rec("BBB", Some(5.0), Some(3.0))];
        let s = score_records(&records, &Weights::default());
        assert!(approx(s[0], 0.0));
        assert!(approx(s[1], 1.0));
    }

    #[test]
    fn fill_keeps_existing_values() {
        let mut records = vec![rec("AAA", Some(0.0), None), rec("BBB", Some(10.0), None)];
        records[1].sustainability_score = Some(0.42);
        let filled = fill_sustainability(&mut records, &Weights::default());
        assert_eq!(filled, 1);
        assert!(approx(records[0].sustainability_score, 1.0));
        assert_eq!(records[1].sustainability_score, Some(0.42));
    }

    #[test]
    fn default_weights_cover_every_indicator_once() {
        let w = Weights::default();
        assert_eq!(w.0.len(), Indicator::ALL.len());
        for ind in Indicator::ALL {
            assert_eq!(w.0.iter().filter(|(i, _)| *i == ind).count(), 1);
        }
        let total: f64 = w.0.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
