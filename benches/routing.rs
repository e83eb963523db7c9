use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;
use pathtrace::prelude::*;

/// Square grid with rightward and downward streets of varying speed limits.
fn grid_graph(side: i64) -> RoadGraph {
    let mut graph = RoadGraph::new();
    for y in 0..side {
        for x in 0..side {
            graph
                .add_node(y * side + x, Point::new(x as f64, y as f64))
                .unwrap();
        }
    }
    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            let speed = 30.0 + ((x + y) % 4) as f64 * 10.0;
            if x + 1 < side {
                graph.add_edge(id, id + 1, 100.0, speed).unwrap();
            }
            if y + 1 < side {
                graph.add_edge(id, id + side, 100.0, speed).unwrap();
            }
        }
    }
    graph
}

fn bench_routing(c: &mut Criterion) {
    let side = 64;
    let mut graph = grid_graph(side);
    let destination = side * side - 1;

    c.bench_function("dijkstra_grid_64", |b| {
        b.iter(|| {
            let outcome =
                dijkstra(&mut graph, black_box(0), black_box(destination), &mut NullSink).unwrap();
            black_box(outcome)
        });
    });

    c.bench_function("dijkstra_and_reconstruct_grid_64", |b| {
        b.iter(|| {
            dijkstra(&mut graph, 0, destination, &mut NullSink).unwrap();
            let metrics = reconstruct(&mut graph, 0, destination, &mut NullSink).unwrap();
            black_box(metrics)
        });
    });
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
