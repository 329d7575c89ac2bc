//! Benchmarks for graph → KEEN table conversion.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bel_keen::entity::Entity;
use bel_keen::graph::{BelGraph, EdgeData};
use bel_keen::relation::{Modifier, Relation};
use bel_keen::rules::RuleSet;
use bel_keen::table::Converter;

/// Synthetic graph cycling through the relation shapes the standard chain handles.
fn synthetic_graph(edges: usize) -> BelGraph {
    let mut g = BelGraph::new();
    for i in 0..edges {
        let a = Entity::protein("HGNC", (i % 5_000).to_string());
        let b = Entity::protein("HGNC", ((i * 7 + 1) % 5_000).to_string());
        let data = match i % 5 {
            0 => EdgeData::new(Relation::Increases),
            1 => EdgeData::new(Relation::Decreases).with_object_modifier(Modifier::Activity),
            2 => EdgeData::new(Relation::Association).with_association_type("similarity"),
            3 => EdgeData::new(Relation::PositiveCorrelation),
            _ => EdgeData::new(Relation::HasVariant),
        };
        g.add_statement(a, b, data);
    }
    g
}

fn bench_sequential(c: &mut Criterion) {
    let graph = synthetic_graph(50_000);
    let rules = RuleSet::standard();

    c.bench_function("convert_50k_sequential", |bench| {
        bench.iter(|| black_box(Converter::new(&rules).convert(&graph).unwrap()))
    });
}

fn bench_parallel(c: &mut Criterion) {
    let graph = synthetic_graph(50_000);
    let rules = RuleSet::standard();

    c.bench_function("convert_50k_parallel", |bench| {
        bench.iter(|| black_box(Converter::new(&rules).parallel(true).convert(&graph).unwrap()))
    });
}

criterion_group!(benches, bench_sequential, bench_parallel);
criterion_main!(benches);
