//! Property-based tests for the windowed graph and the normalizer
//!
//! Random update sequences check the window invariants that the
//! example-driven tests cannot sweep: clock monotonicity, absence of stale
//! survivors, refresh monotonicity, idempotence, and the degree formula.

use proptest::prelude::*;
use taggraph::graph::WindowedGraph;
use taggraph::record::normalize;

/// A small tag universe so random streams actually collide on edges.
fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 0..5)
}

fn arb_updates() -> impl Strategy<Value = Vec<(i64, Vec<String>)>> {
    prop::collection::vec((0i64..5_000, arb_tags()), 1..50)
}

fn degree_snapshot(graph: &WindowedGraph) -> Vec<(String, String, i64)> {
    let mut edges: Vec<(String, String, i64)> = graph
        .edges()
        .map(|(edge, last_seen)| {
            let (x, y) = edge.endpoints();
            (x.to_string(), y.to_string(), last_seen)
        })
        .collect();
    edges.sort();
    edges
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_window_boundary_rule(window in 1i64..1_000, latest in 0i64..100_000, t in 0i64..100_000) {
        let graph = WindowedGraph::with_clock(window, latest);
        prop_assert_eq!(graph.is_within_window(t), latest - t < window);
    }

    #[test]
    fn prop_latest_never_decreases(window in 1i64..120, updates in arb_updates()) {
        let mut graph = WindowedGraph::new(window);
        let mut previous = graph.latest();
        for (timestamp, tags) in updates {
            graph.update(timestamp, &tags);
            prop_assert!(graph.latest() >= previous);
            previous = graph.latest();
        }
    }

    #[test]
    fn prop_no_stale_survivors(window in 1i64..120, updates in arb_updates()) {
        let mut graph = WindowedGraph::new(window);
        for (timestamp, tags) in updates {
            graph.update(timestamp, &tags);
            for (_, last_seen) in graph.edges() {
                prop_assert!(graph.latest() - last_seen < window);
            }
        }
    }

    #[test]
    fn prop_edge_freshness_never_decreases(window in 1i64..120, updates in arb_updates()) {
        let mut graph = WindowedGraph::new(window);
        let mut watched: Option<i64> = None;
        for (timestamp, tags) in updates {
            graph.update(timestamp, &tags);
            if let Some(last_seen) = graph.last_seen("a", "b") {
                if let Some(seen_before) = watched {
                    prop_assert!(last_seen >= seen_before);
                }
                watched = Some(last_seen);
            }
        }
    }

    #[test]
    fn prop_repeated_update_is_idempotent(window in 1i64..120, updates in arb_updates()) {
        let mut once = WindowedGraph::new(window);
        let mut twice = WindowedGraph::new(window);
        for (timestamp, tags) in &updates {
            once.update(*timestamp, tags);
            twice.update(*timestamp, tags);
            twice.update(*timestamp, tags);
        }
        prop_assert_eq!(degree_snapshot(&once), degree_snapshot(&twice));
        prop_assert_eq!(once.latest(), twice.latest());
        prop_assert_eq!(once.average_degree(), twice.average_degree());
    }

    #[test]
    fn prop_degree_formula_holds(window in 1i64..120, updates in arb_updates()) {
        let mut graph = WindowedGraph::new(window);
        for (timestamp, tags) in updates {
            graph.update(timestamp, &tags);
        }

        let mut nodes = std::collections::HashSet::new();
        let mut edge_count = 0usize;
        for (edge, _) in graph.edges() {
            let (x, y) = edge.endpoints();
            nodes.insert(x.to_string());
            nodes.insert(y.to_string());
            edge_count += 1;
        }

        if edge_count == 0 {
            prop_assert_eq!(graph.average_degree(), 0.0);
        } else {
            let expected = (2.0 * edge_count as f64) / nodes.len() as f64;
            prop_assert_eq!(graph.average_degree(), expected);
        }
        prop_assert_eq!(graph.edge_count(), edge_count);
        prop_assert_eq!(graph.node_count(), nodes.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_normalize_never_panics(line in ".{0,200}") {
        // Rejections are values, never panics, for arbitrary input.
        let _ = normalize(&line);
    }

    #[test]
    fn prop_normalize_accepts_only_two_or_more_distinct_tags(
        tags in prop::collection::vec("[a-c]", 0..4),
    ) {
        let entities: Vec<String> = tags
            .iter()
            .map(|tag| format!(r#"{{"text":"{tag}"}}"#))
            .collect();
        let line = format!(
            r#"{{"created_at":"Thu Oct 29 17:51:01 +0000 2015","entities":{{"hashtags":[{}]}}}}"#,
            entities.join(",")
        );

        let distinct: std::collections::HashSet<&String> = tags.iter().collect();
        match normalize(&line) {
            Ok(recorded) => {
                prop_assert!(distinct.len() >= 2);
                prop_assert_eq!(recorded.tags.len(), distinct.len());
            }
            Err(_) => prop_assert!(distinct.len() < 2),
        }
    }
}
