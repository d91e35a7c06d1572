//! Aggregation over the layered JSON scenario.

use std::sync::Arc;

use depgraph_aggregator::{GraphAggregator, WorkerPool};
use depgraph_core::config::AggregationOptions;
use depgraph_core::filter::AnyFilter;
use depgraph_core::traits::{CancellationToken, GraphStore};
use depgraph_core::types::NodeRef;
use depgraph_graph::MemoryGraph;
use test_fixtures::{fixture_exists, nref, nref_v, ScriptedDiscoverer};

const SCENARIO: &str = "graphs/layered.json";

#[test]
fn layered_scenario_resolves_everything_reachable() {
    assert!(fixture_exists(SCENARIO));
    let discoverer = Arc::new(ScriptedDiscoverer::from_fixture(SCENARIO));
    let app = nref("app");
    let graph = MemoryGraph::new([app.clone()], Arc::new(AnyFilter));

    let report = GraphAggregator::new(discoverer.clone())
        .aggregate(
            &graph,
            &AggregationOptions::enabled(),
            &WorkerPool::with_threads(3).unwrap(),
            &CancellationToken::new(),
        )
        .unwrap();

    assert!(discoverer.repeated_calls().is_empty());
    assert_eq!(discoverer.calls(&nref("log")), 1);

    // driver fails, bom is not scripted at all.
    assert_eq!(
        report.missing.iter().cloned().collect::<Vec<_>>(),
        vec![nref("bom"), nref("driver")]
    );

    let http = nref_v("http", "1.4");
    let rels = graph.relationships().unwrap();
    assert!(rels.iter().any(|r| r.declaring == http && r.target == nref("log")));
    assert_eq!(graph.metadata(&app).unwrap().unwrap()["packaging"], "jar");

    // Leaves that declared nothing and missing nodes are still incomplete.
    // The range ref resolved through its selection.
    let incomplete = graph.incomplete_subgraphs().unwrap();
    for node in [nref("log"), nref("parent"), nref("driver")] {
        assert!(incomplete.contains(&node), "{node} should be incomplete");
    }
    let range = nref_v("http", "[1.0,2.0)");
    assert!(!incomplete.contains(&range));
    assert!(rels.iter().any(|r| r.is_selection() && r.declaring == range && r.target == http));
    assert!(!incomplete.contains(&app));
    assert_eq!(graph.find_cycles().unwrap(), Vec::<Vec<NodeRef>>::new());
}

#[test]
fn report_serializes_to_json() {
    let discoverer = Arc::new(ScriptedDiscoverer::from_fixture(SCENARIO));
    let graph = MemoryGraph::new([nref("web")], Arc::new(AnyFilter));
    let report = GraphAggregator::new(discoverer)
        .aggregate(
            &graph,
            &AggregationOptions::enabled(),
            &WorkerPool::with_threads(2).unwrap(),
            &CancellationToken::new(),
        )
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["interrupted"], false);
    assert!(json["passes"].as_u64().unwrap() >= 2);
}
