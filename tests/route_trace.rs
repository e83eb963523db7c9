//! End-to-end scenarios: search, trace, reconstruction, metrics.

use geo::Point;
use pathtrace::prelude::*;

fn graph_with_nodes(ids: &[NodeId]) -> RoadGraph {
    let mut graph = RoadGraph::new();
    for &id in ids {
        graph
            .add_node(id, Point::new(id as f64, 0.0))
            .expect("unique ids");
    }
    graph
}

/// The reference scenario: A -> B -> D beats A -> C -> D on travel time
/// even though it is four times as long.
fn diamond() -> RoadGraph {
    let mut graph = graph_with_nodes(&[1, 2, 3, 4]);
    graph.add_edge(1, 2, 1000.0, 50.0).unwrap();
    graph.add_edge(2, 4, 1000.0, 50.0).unwrap();
    graph.add_edge(1, 3, 500.0, 10.0).unwrap();
    graph.add_edge(3, 4, 500.0, 10.0).unwrap();
    graph
}

#[test]
fn diamond_route_and_metrics() {
    let mut graph = diamond();
    let mut sink = RecordingSink::new();

    let outcome = dijkstra(&mut graph, 1, 4, &mut sink).unwrap();
    assert_eq!(outcome.state, SearchState::Found);
    assert!((graph.distance(4).unwrap() - 40.0).abs() < 1e-9);

    let metrics = reconstruct(&mut graph, 1, 4, &mut sink).unwrap();
    assert!((metrics.distance_km - 2.0).abs() < 1e-9);
    assert!((metrics.avg_speed - 50.0).abs() < 1e-9);
    assert!((metrics.eta_minutes - 2.4).abs() < 1e-9);
    assert_eq!(metrics.speeds, vec![50.0, 50.0]);
}

#[test]
fn step_indices_increase_and_nodes_finalize_once() {
    // Dense-ish graph so several frontier pushes per node occur.
    let mut graph = graph_with_nodes(&[1, 2, 3, 4, 5, 6]);
    let edges = [
        (1, 2, 700.0, 50.0),
        (1, 3, 900.0, 60.0),
        (2, 3, 200.0, 30.0),
        (2, 4, 1500.0, 90.0),
        (3, 4, 800.0, 40.0),
        (3, 5, 1200.0, 60.0),
        (4, 6, 600.0, 30.0),
        (5, 6, 300.0, 50.0),
        (4, 2, 1500.0, 90.0),
        (5, 3, 1200.0, 60.0),
    ];
    for (from, to, length, speed) in edges {
        graph.add_edge(from, to, length, speed).unwrap();
    }

    let mut sink = RecordingSink::new();
    dijkstra(&mut graph, 1, 6, &mut sink).unwrap();

    let mut seen = std::collections::HashSet::new();
    let mut last_step = None;
    for event in sink.events() {
        if let Some(previous) = last_step {
            assert!(event.step > previous, "step indices must increase");
        }
        last_step = Some(event.step);
        if event.phase == SearchPhase::Finding {
            let node = event.finalized.expect("finding events finalize a node");
            assert!(seen.insert(node), "node {node} finalized twice");
        }
    }
}

#[test]
fn finalized_distances_match_brute_force() {
    let mut graph = graph_with_nodes(&[1, 2, 3, 4, 5, 6]);
    let edges = [
        (1, 2, 700.0, 50.0),
        (1, 3, 900.0, 60.0),
        (2, 3, 200.0, 30.0),
        (2, 4, 1500.0, 90.0),
        (3, 4, 800.0, 40.0),
        (3, 5, 1200.0, 60.0),
        (4, 6, 600.0, 30.0),
        (5, 6, 300.0, 50.0),
    ];
    for (from, to, length, speed) in edges {
        graph.add_edge(from, to, length, speed).unwrap();
    }

    // Floyd-Warshall over node ids 1..=6 as the reference.
    let mut reference = [[f64::INFINITY; 7]; 7];
    for id in 1..=6 {
        reference[id][id] = 0.0;
    }
    for (from, to, length, speed) in edges {
        let (from, to) = (from as usize, to as usize);
        let weight = length / speed;
        if weight < reference[from][to] {
            reference[from][to] = weight;
        }
    }
    for k in 1..=6 {
        for i in 1..=6 {
            for j in 1..=6 {
                let through = reference[i][k] + reference[k][j];
                if through < reference[i][j] {
                    reference[i][j] = through;
                }
            }
        }
    }

    dijkstra(&mut graph, 1, 6, &mut NullSink).unwrap();
    for id in 1..=6i64 {
        if graph.is_visited(id).unwrap() {
            let expected = reference[1][id as usize];
            let actual = graph.distance(id).unwrap();
            assert!(
                (actual - expected).abs() < 1e-9,
                "node {id}: engine {actual}, reference {expected}"
            );
        }
    }
}

#[test]
fn unreachable_destination_surfaces_in_both_passes() {
    // Two disconnected components.
    let mut graph = graph_with_nodes(&[1, 2, 3, 4]);
    graph.add_edge(1, 2, 400.0, 40.0).unwrap();
    graph.add_edge(3, 4, 400.0, 40.0).unwrap();

    let outcome = dijkstra(&mut graph, 1, 4, &mut NullSink).unwrap();
    assert_eq!(outcome.state, SearchState::Unreachable);

    assert!(matches!(
        reconstruct(&mut graph, 1, 4, &mut NullSink),
        Err(Error::UnreachableDestination {
            origin: 1,
            destination: 4,
        })
    ));
}

#[test]
fn parallel_edges_relax_on_the_cheaper_and_report_on_all() {
    let mut graph = graph_with_nodes(&[1, 2]);
    // First-inserted (key 0) is the slower carriageway.
    let slow = graph.add_edge(1, 2, 1000.0, 20.0).unwrap();
    let fast = graph.add_edge(1, 2, 1000.0, 50.0).unwrap();

    dijkstra(&mut graph, 1, 2, &mut NullSink).unwrap();
    assert!((graph.distance(2).unwrap() - 20.0).abs() < 1e-9);

    let mut sink = RecordingSink::new();
    let metrics = reconstruct(&mut graph, 1, 2, &mut sink).unwrap();

    // Both parallels are styled as part of the route...
    assert_eq!(graph.edge_status(slow), Some(EdgeStatus::OnPath));
    assert_eq!(graph.edge_status(fast), Some(EdgeStatus::OnPath));
    assert_eq!(sink.events().len(), 1);
    assert_eq!(sink.events()[0].changes.len(), 2);

    // ...but metrics come from the lowest-keyed edge.
    assert!((metrics.distance_km - 1.0).abs() < 1e-9);
    assert_eq!(metrics.speeds, vec![20.0]);
    assert!((metrics.eta_minutes - 3.0).abs() < 1e-9);
}

#[test]
fn repeated_runs_produce_identical_results() {
    let mut graph = diamond();

    let mut first = RecordingSink::new();
    dijkstra(&mut graph, 1, 4, &mut first).unwrap();
    let metrics_first = reconstruct(&mut graph, 1, 4, &mut first).unwrap();

    let mut second = RecordingSink::new();
    dijkstra(&mut graph, 1, 4, &mut second).unwrap();
    let metrics_second = reconstruct(&mut graph, 1, 4, &mut second).unwrap();

    assert_eq!(first.events(), second.events());
    assert_eq!(metrics_first, metrics_second);
    for id in [1, 2, 3, 4] {
        assert_eq!(
            graph.predecessor(id).unwrap(),
            match id {
                2 => Some(1),
                3 => Some(1),
                4 => Some(2),
                _ => None,
            }
        );
    }
}

#[test]
fn sampled_replay_log_round_trips_through_json() {
    let mut graph = diamond();
    let policy = SamplingPolicy {
        finding_every: 2,
        reconstructing_every: 1,
    };
    let mut sink = SampledSink::new(JsonLinesSink::new(Vec::new()), policy);

    dijkstra(&mut graph, 1, 4, &mut sink).unwrap();
    reconstruct(&mut graph, 1, 4, &mut sink).unwrap();

    let log = String::from_utf8(sink.into_inner().into_inner()).unwrap();
    let events: Vec<serde_json::Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Finding steps 0 (of 0..2), the terminal event, then both hops.
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["phase"], "finding");
    assert_eq!(events[1]["phase"], "found");
    assert_eq!(events[1]["finalized"], 4);
    assert!(
        events[2..]
            .iter()
            .all(|event| event["phase"] == "reconstructing")
    );
}
