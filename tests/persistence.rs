//! Persistence tests: graph snapshots and cached tables survive across runs.

use bel_keen::config::KeenConfig;
use bel_keen::entity::Entity;
use bel_keen::export::read_table;
use bel_keen::graph::{BelGraph, EdgeData};
use bel_keen::relation::{Modifier, Relation};
use bel_keen::source::{JsonGraphProvider, SourceCache, iterate_source_paths, load_full_matrix};
use bel_keen::summary::KeenSummary;
use bel_keen::table::build_table;

fn hippie_like() -> BelGraph {
    let mut g = BelGraph::new().with_name("hippie");
    for (a, b) in [("1", "2"), ("2", "3"), ("3", "1")] {
        g.add_statement(
            Entity::protein("HGNC", a),
            Entity::protein("HGNC", b),
            EdgeData::new(Relation::Association).with_association_type("physicalInteraction"),
        );
    }
    g.add_statement(
        Entity::protein("HGNC", "1"),
        Entity::protein("HGNC", "4"),
        EdgeData::new(Relation::Increases).with_object_modifier(Modifier::Activity),
    );
    g
}

#[test]
fn json_provider_snapshot_and_table() {
    let dir = tempfile::TempDir::new().unwrap();
    let upstream = dir.path().join("upstream.json");
    hippie_like().to_json_path(&upstream).unwrap();

    let config = KeenConfig::with_data_dir(dir.path().join("data"));
    let provider = JsonGraphProvider::new("hippie", &upstream);
    let tsv = SourceCache::new(&config)
        .ensure(&provider, false)
        .unwrap()
        .unwrap();

    // The cached table equals a direct conversion of the upstream graph.
    let direct = build_table(&hippie_like()).unwrap();
    assert_eq!(read_table(&tsv).unwrap(), direct);

    let summary: KeenSummary =
        serde_json::from_str(&std::fs::read_to_string(config.summary_path("hippie")).unwrap())
            .unwrap();
    assert_eq!(summary.relations, 4);
    assert_eq!(summary.entities, 4);

    // The snapshot alone is enough to rebuild the table once the upstream is gone.
    std::fs::remove_file(&upstream).unwrap();
    std::fs::remove_file(&tsv).unwrap();
    let again = SourceCache::new(&config)
        .ensure(&provider, false)
        .unwrap()
        .unwrap();
    assert_eq!(read_table(&again).unwrap(), direct);
}

#[test]
fn rebuild_requires_provider() {
    let dir = tempfile::TempDir::new().unwrap();
    let upstream = dir.path().join("upstream.json");
    hippie_like().to_json_path(&upstream).unwrap();

    let config = KeenConfig::with_data_dir(dir.path().join("data"));
    let provider = JsonGraphProvider::new("hippie", &upstream);
    SourceCache::new(&config).ensure(&provider, false).unwrap();

    std::fs::remove_file(&upstream).unwrap();
    assert!(SourceCache::new(&config).ensure(&provider, true).is_err());
}

#[test]
fn multiple_sources_form_one_matrix() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = KeenConfig::with_data_dir(dir.path().join("data"));

    let mut drugs = BelGraph::new();
    drugs.add_statement(
        Entity::abundance("CHEBI", "6801"),
        Entity::pathology("MESH", "D003924"),
        EdgeData::new(Relation::Decreases),
    );

    for (name, graph) in [("hippie", hippie_like()), ("drugbank", drugs)] {
        let path = dir.path().join(format!("{name}.json"));
        graph.to_json_path(&path).unwrap();
        SourceCache::new(&config)
            .ensure(&JsonGraphProvider::new(name, path), false)
            .unwrap()
            .unwrap();
    }

    let paths = iterate_source_paths(&config.data_dir).unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(load_full_matrix(&config.data_dir).unwrap().len(), 5);
}
