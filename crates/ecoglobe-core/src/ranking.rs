// crates/ecoglobe-core/src/ranking.rs
use crate::model::{MetricRecord, ScoreMode};
use crate::resolve::ResolvedIndex;

/// Best `n` records by the `mode` score, highest first.
///
/// Only records with a finite score *and* a drawn feature qualify. Ties
/// keep table order (the sort is stable).
pub fn top_n<'a, I>(records: I, n: usize, mode: ScoreMode, index: &ResolvedIndex) -> Vec<&'a MetricRecord>
where
    I: IntoIterator<Item = &'a MetricRecord>,
{
    top_n_by(records, n, |r| r.score_for(mode), |code| index.contains(code))
}

/// [`top_n`] with the score and the "has geometry" test supplied by the caller.
pub fn top_n_by<'a, I, S, G>(records: I, n: usize, score: S, has_feature: G) -> Vec<&'a MetricRecord>
where
    I: IntoIterator<Item = &'a MetricRecord>,
    S: Fn(&MetricRecord) -> Option<f64>,
    G: Fn(&str) -> bool,
{
    let mut ranked: Vec<(f64, &MetricRecord)> = records
        .into_iter()
        .filter_map(|r| score(r).filter(|s| s.is_finite()).map(|s| (s, r)))
        .filter(|(_, r)| has_feature(&r.iso_a3))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().take(n).map(|(_, r)| r).collect()
}
