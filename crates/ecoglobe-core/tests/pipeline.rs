// crates/ecoglobe-core/tests/pipeline.rs

use ecoglobe_core::prelude::*;
use ecoglobe_core::scale::LegendEntry;
use std::fs;

const ISO_NAMES: &str = "name;isoA3\n\
Spain;ESP\n\
France;FRA\n\
Côte d'Ivoire;CIV\n\
Congo;COD\n\
Norway;NOR\n\
Peru;PER\n";

const METRICS: &str = "iso_code,co2_per_capita,pm25,renewables_elec_pct,protected_land_pct,safe_water_pct,life_expectancy_yrs,hdi,score\n\
esp,4.6,9.7,0.5,28,99.6,83.2,0.911,0.62\n\
FRA,4.3,11.2,0.27,,NA,82.5,0.903,0.58\n\
CIV,0.4,28.0,0.32,23,,59.0,0.55,0.41\n\
COG,1.2,32.5,0.6,40,null,64.6,0.593,0.47\n\
NOR,7.5,6.1,0.98,17,98,83.2,0.961,0.73\n\
PER,,,,,,,,\n";

const WORLD: &str = r#"{
  "type": "Topology",
  "objects": {"countries": {"type": "GeometryCollection", "geometries": [
    {"type": "Polygon", "id": "724", "arcs": [[0]], "properties": {"name": "Spain"}},
    {"type": "Polygon", "id": "250", "arcs": [[1]], "properties": {"name": "France"}},
    {"type": "Polygon", "id": "384", "arcs": [[2]], "properties": {"name": "Côte d'Ivoire"}},
    {"type": "Polygon", "id": "178", "arcs": [[3]], "properties": {"name": "Congo"}},
    {"type": "Polygon", "id": "604", "arcs": [[4]], "properties": {"name": "Peru"}},
    {"type": "Polygon", "arcs": [[5]], "properties": {"name": "Somaliland"}},
    {"type": "Polygon", "arcs": [[6]], "properties": {"name": "N. Cyprus"}}
  ]}},
  "arcs": [
    [[-5, 39], [-3, 39], [-3, 41], [-5, 41], [-5, 39]],
    [[1, 45], [3, 45], [3, 47], [1, 47], [1, 45]],
    [[-6, 6], [-4, 6], [-4, 8], [-6, 8], [-6, 6]],
    [[14, -2], [16, -2], [16, 0], [14, 0], [14, -2]],
    [[-76, -11], [-74, -11], [-74, -9], [-76, -9], [-76, -11]],
    [[45, 9], [47, 9], [47, 11], [45, 11], [45, 9]],
    [[33, 35], [34, 35], [34, 36], [33, 35]]
  ]
}"#;

fn globe() -> Choropleth {
    let inputs = Inputs::from_texts(ISO_NAMES, METRICS, WORLD, "countries").unwrap();
    Choropleth::assemble(
        inputs,
        AliasTable::builtin().clone(),
        Palette::ocean(),
        UNKNOWN_COLOR,
    )
}

#[test]
fn alias_overrides_conflicting_name_row() {
    // The name table says COD for "Congo"; the curated alias says COG.
    let g = globe();
    let congo = g.feature_named("Congo").unwrap();
    assert_eq!(g.resolve(congo), Some("COG"));
    assert_eq!(g.feature_for("COG").and_then(|f| f.name.as_deref()), Some("Congo"));
    assert!(g.feature_for("COD").is_none());
}

#[test]
fn accented_names_resolve_through_the_table() {
    let g = globe();
    let civ = g.feature_named("Côte d'Ivoire").unwrap();
    assert_eq!(g.resolve(civ), Some("CIV"));
}

#[test]
fn every_resolution_is_a_known_alpha3_code() {
    let g = globe();
    let known = g.resolver().known_codes();
    for f in g.features() {
        if let Some(code) = g.resolve(f) {
            assert_eq!(code.len(), 3);
            assert!(code.chars().all(|c| c.is_ascii_uppercase()));
            assert!(known.contains(code));
        }
    }
    assert_eq!(g.unresolved(), vec!["N. Cyprus"]);
}

#[test]
fn fills_use_palette_or_fallback() {
    let g = globe();
    let palette = Palette::ocean();
    for fill in g.fills(ScoreMode::Eco) {
        let scored = fill
            .iso_a3
            .as_deref()
            .and_then(|c| g.record(c))
            .and_then(|r| r.score)
            .is_some();
        if scored {
            assert!(palette.contains(&fill.color), "{fill:?}");
        } else {
            assert_eq!(fill.color, UNKNOWN_COLOR, "{fill:?}");
        }
    }
    // Somaliland resolves to SOM, which has no metrics row.
    let somaliland = g.feature_named("Somaliland").unwrap();
    assert_eq!(g.resolve(somaliland), Some("SOM"));
    assert_eq!(g.fill_for(somaliland, ScoreMode::Eco), UNKNOWN_COLOR);
}

#[test]
fn ranking_needs_score_and_geometry() {
    let g = globe();
    let codes: Vec<String> = g
        .ranking(ScoreMode::Eco, 10)
        .into_iter()
        .map(|e| e.iso_a3)
        .collect();
    // NOR has the best score but no feature; PER has no score.
    assert_eq!(codes, vec!["ESP", "FRA", "COG", "CIV"]);
}

#[test]
fn sustain_mode_is_computed_when_missing() {
    let g = globe();
    for code in ["ESP", "FRA", "CIV", "COG", "NOR"] {
        let s = g.record(code).unwrap().sustainability_score;
        assert!(s.is_some_and(|v| (0.0..=1.0).contains(&v)), "{code}: {s:?}");
    }
    // No indicator values at all: nothing to weigh.
    assert_eq!(g.record("PER").unwrap().sustainability_score, None);
    let sustain = &g.stats().modes[1];
    assert_eq!(sustain.mode, ScoreMode::Sustain);
    assert_eq!(sustain.valid_scores, 5);
}

#[test]
fn legend_matches_palette() {
    let g = globe();
    let legend: Vec<LegendEntry> = g.legend(ScoreMode::Eco);
    assert_eq!(legend.len(), 5);
    assert_eq!(legend.first().unwrap().lower, 0.0);
    assert_eq!(legend.last().unwrap().upper, 1.0);
    assert!(legend.windows(2).all(|w| w[0].upper <= w[1].upper));
}

#[test]
fn load_reads_local_sources_concurrently() {
    let dir = tempfile::tempdir().unwrap();
    let iso = dir.path().join("iso_names.csv");
    let metrics = dir.path().join("sustainability_index.csv");
    let world = dir.path().join("countries-110m.json");
    fs::write(&iso, ISO_NAMES).unwrap();
    fs::write(&metrics, METRICS).unwrap();
    fs::write(&world, WORLD).unwrap();

    let config = GlobeConfig {
        iso_names: TableSource::Path(iso),
        metrics: TableSource::Path(metrics),
        world: TableSource::Path(world),
        ..Default::default()
    };
    let g = Choropleth::load(&config).unwrap();
    assert_eq!(g.stats().features, 7);
    assert_eq!(g.stats().name_rows, 6);
    assert_eq!(g.stats().metric_rows, 6);
}

#[test]
fn one_missing_source_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let iso = dir.path().join("iso_names.csv");
    fs::write(&iso, ISO_NAMES).unwrap();

    let config = GlobeConfig {
        iso_names: TableSource::Path(iso),
        metrics: TableSource::Path(dir.path().join("missing.csv")),
        world: TableSource::Path(dir.path().join("missing.json")),
        ..Default::default()
    };
    let err = Choropleth::load(&config).unwrap_err();
    assert!(matches!(err, GlobeError::NotFound(_)));
}

#[cfg(feature = "fetch")]
#[tokio::test]
async fn remote_not_found_fails_the_whole_load() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let iso = dir.path().join("iso_names.csv");
    let world = dir.path().join("countries-110m.json");
    fs::write(&iso, ISO_NAMES).unwrap();
    fs::write(&world, WORLD).unwrap();

    let config = GlobeConfig {
        iso_names: TableSource::Path(iso),
        metrics: TableSource::Url(format!("{}/OUT/sustainability_index.csv", server.uri())),
        world: TableSource::Path(world),
        ..Default::default()
    };
    let err = tokio::task::spawn_blocking(move || Choropleth::load(&config))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, GlobeError::Fetch { status: 404, .. }), "{err:?}");
}

#[test]
fn view_state_focuses_ranked_country() {
    let g = globe();
    let mut view = ViewState::new(ScoreMode::Eco);
    let top = &g.ranking(ScoreMode::Eco, 1)[0];
    let rotation = view.focus(&g, &top.iso_a3).unwrap();
    assert!((rotation.lambda - 4.0).abs() < 1e-6);
    assert!((rotation.phi + 40.0).abs() < 0.1);
}
