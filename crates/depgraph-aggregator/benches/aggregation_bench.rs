//! Benchmarks for full aggregation runs.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depgraph_aggregator::{GraphAggregator, WorkerPool};
use depgraph_core::config::AggregationOptions;
use depgraph_core::filter::AnyFilter;
use depgraph_core::traits::CancellationToken;
use depgraph_core::types::Relationship;
use depgraph_graph::MemoryGraph;
use test_fixtures::{dep, nref, ScriptedDiscoverer};

/// `layers` layers of `width` nodes; every node depends on every node of the
/// next layer. Leaves declare a terminal marker.
fn layered(layers: usize, width: usize) -> ScriptedDiscoverer {
    let node = |layer: usize, i: usize| nref(&format!("l{layer}n{i}"));
    let mut discoverer = ScriptedDiscoverer::new()
        .with_relationships(nref("root"), (0..width).map(|i| dep(&nref("root"), &node(0, i))).collect());

    for layer in 0..layers {
        for i in 0..width {
            let from = node(layer, i);
            let rels = if layer + 1 == layers {
                vec![Relationship::terminal_parent("bench", from.clone())]
            } else {
                (0..width).map(|j| dep(&from, &node(layer + 1, j))).collect()
            };
            discoverer = discoverer.with_relationships(from, rels);
        }
    }
    discoverer
}

fn bench_aggregate(c: &mut Criterion) {
    let discoverer = Arc::new(layered(6, 20));
    let pool = WorkerPool::with_threads(8).unwrap();
    let options = AggregationOptions::enabled();

    c.bench_function("aggregate_layered_6x20", |b| {
        b.iter(|| {
            let graph = MemoryGraph::new([nref("root")], Arc::new(AnyFilter));
            let report = GraphAggregator::new(discoverer.clone())
                .aggregate(&graph, &options, &pool, &CancellationToken::new())
                .unwrap();
            black_box(report);
        });
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
