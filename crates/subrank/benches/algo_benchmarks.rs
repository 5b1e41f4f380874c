// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Subgraph extraction and PageRank benchmarks
//!
//! Run with:
//! cargo bench --bench algo_benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::hint::black_box;
use subrank::{
    ComputeConfig, ComputeEngine, ComputeFilter, Eid, GraphStore, MemoryGraph, PageRank,
    PageRankConfig, Properties, PropertyValue, SeedFilter, SubgraphExtractor, Vid,
};

#[derive(Clone, Debug)]
struct AlgoBenchConfig {
    nodes: u64,
    edges_per_node: u64,
}

impl AlgoBenchConfig {
    fn from_env() -> Self {
        let nodes = env::var("BENCH_NODES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10_000);
        let edges_per_node = env::var("BENCH_EDGES_PER_NODE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        Self {
            nodes,
            edges_per_node,
        }
    }

    fn label(&self) -> String {
        format!("{}n_{}deg", self.nodes, self.edges_per_node)
    }
}

fn build_graph(config: &AlgoBenchConfig) -> MemoryGraph {
    let mut rng = StdRng::seed_from_u64(42);
    let edges = config.nodes * config.edges_per_node;
    let mut graph = MemoryGraph::with_capacity(config.nodes as usize, edges as usize);
    for id in 0..config.nodes {
        let mut props = Properties::new();
        props.insert("number".into(), PropertyValue::from(id as i64));
        graph.add_vertex(Vid::new(id), "vertex", props).unwrap();
    }
    for id in 0..edges {
        let out = rng.gen_range(0..config.nodes);
        let inn = rng.gen_range(0..config.nodes);
        graph
            .add_edge(
                Eid::new(id),
                "edge",
                Vid::new(out),
                Vid::new(inn),
                Properties::new(),
            )
            .unwrap();
    }
    graph
}

fn bench_extraction(c: &mut Criterion) {
    let config = AlgoBenchConfig::from_env();
    let graph = build_graph(&config);
    let seed = SeedFilter::property_eq("number", (config.nodes / 2) as i64);

    let mut group = c.benchmark_group("extract");
    for hops in [1usize, 2, 3] {
        group.bench_with_input(
            BenchmarkId::new(config.label(), format!("{hops}hop")),
            &hops,
            |b, &hops| {
                let extractor = SubgraphExtractor::new(&graph).hops(hops);
                b.iter(|| black_box(extractor.extract(&seed).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_pagerank(c: &mut Criterion) {
    let config = AlgoBenchConfig::from_env();
    let graph = build_graph(&config);
    let subgraph = SubgraphExtractor::new(&graph)
        .hops(3)
        .extract(&SeedFilter::ids([Vid::new(0)]))
        .unwrap();
    let mut engine = ComputeEngine::new(ComputeConfig::default()).unwrap();

    let mut group = c.benchmark_group("pagerank");
    group.sample_size(20);
    for iterations in [1u32, 10] {
        let pr_config = PageRankConfig {
            iterations,
            ..Default::default()
        };
        group.bench_function(
            BenchmarkId::new(format!("full_{}", config.label()), iterations),
            |b| {
                b.iter(|| {
                    PageRank::run_filtered(
                        &mut engine,
                        &graph,
                        &ComputeFilter::all(),
                        pr_config.clone(),
                    )
                    .unwrap()
                })
            },
        );
        group.bench_function(BenchmarkId::new("filtered_3hop", iterations), |b| {
            let filter = ComputeFilter::from(&subgraph);
            b.iter(|| {
                PageRank::run_filtered(&mut engine, &graph, &filter, pr_config.clone()).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extraction, bench_pagerank);
criterion_main!(benches);
