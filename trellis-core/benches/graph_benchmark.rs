//! Benchmarks for graph construction, ordering and matrix derivation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis_core::{Graph, NewNode, NodeIndex};

/// A layered DAG: every node points at the two nodes of the next layer.
fn layered(n: usize) -> Graph {
    let mut graph = Graph::new();
    graph.create_node(NewNode::new()).unwrap();
    for i in 1..n {
        let mut spec = NewNode::new().parent(NodeIndex::new((i - 1) / 2));
        if i >= 2 {
            spec = spec.parent(NodeIndex::new(i - 2));
        }
        graph.create_node(spec).unwrap();
    }
    graph
}

fn construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_nodes");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(layered(size)));
        });
    }
    group.finish();
}

fn ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("topological_sort");
    for size in [100usize, 1_000, 10_000] {
        let graph = layered(size);
        group.bench_with_input(BenchmarkId::new("read_only", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.topological_sort().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("consuming", size), &size, |b, &size| {
            b.iter_batched(
                || layered(size),
                |mut graph| black_box(graph.drain_topological_order().unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn matrices(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrices");
    for size in [64usize, 256, 1_024] {
        let graph = layered(size);
        group.bench_with_input(BenchmarkId::new("adjacency", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.adjacency_matrix()));
        });
        group.bench_with_input(BenchmarkId::new("incidence", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.incidence_matrix().unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, construction, ordering, matrices);
criterion_main!(benches);
