use criterion::{criterion_group, criterion_main, Criterion};
use ecoglobe_core::prelude::*;
use std::hint::black_box;

fn synthetic_inputs(n: usize) -> Inputs {
    let names = (0..n)
        .map(|i| NameRecord {
            name: format!("Cöuntry Nümber {i}"),
            iso_a3: format!("C{:02}", i % 100),
        })
        .collect();
    let metrics = (0..n)
        .map(|i| MetricRecord {
            iso_a3: format!("C{:02}", i % 100),
            score: Some((i * 37 % 101) as f64 / 100.0),
            co2_per_capita: Some(i as f64 * 0.1),
            ..Default::default()
        })
        .collect();
    let features = (0..n)
        .map(|i| GeometryFeature::named(format!("Country Number {i}.")))
        .collect();
    Inputs {
        names,
        metrics,
        features,
    }
}

fn bench_assemble(c: &mut Criterion) {
    let inputs = synthetic_inputs(250);
    c.bench_function("assemble_250", |b| {
        b.iter(|| {
            Choropleth::assemble(
                black_box(inputs.clone()),
                AliasTable::builtin().clone(),
                Palette::ocean(),
                UNKNOWN_COLOR,
            )
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let inputs = synthetic_inputs(250);
    let resolver = CodeResolver::with_builtin_aliases(&inputs.names);
    c.bench_function("resolve_250", |b| {
        b.iter(|| {
            inputs
                .features
                .iter()
                .filter(|f| resolver.resolve(*f).is_some())
                .count()
        })
    });
}

criterion_group!(benches, bench_assemble, bench_resolve);
criterion_main!(benches);
