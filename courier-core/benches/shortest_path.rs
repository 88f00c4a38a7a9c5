//! Criterion benchmarks for shortest-path queries and package assignment.
//!
//! Random connected road networks of 100, 500 and 2000 cities are generated
//! from a fixed seed so runs are comparable.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package courier-core
//! ```

#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;
use std::sync::Arc;

use courier_core::{ClassConfig, CourierClass, Edge, Fleet, FleetConfig, Graph, build_graph};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BENCHMARK_SEED: u64 = 42;

const NETWORK_SIZES: &[usize] = &[100, 500, 2000];

/// Extra roads per city on top of the spanning chain.
const EXTRA_ROADS_PER_CITY: usize = 3;

fn city_name(index: usize) -> String {
    format!("city-{index}")
}

/// Chain every city to a random earlier one, then sprinkle shortcuts.
fn generate_network(size: usize, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(size * (EXTRA_ROADS_PER_CITY + 1));
    for index in 1..size {
        let earlier = rng.gen_range(0..index);
        edges.push(Edge::new(
            city_name(earlier),
            city_name(index),
            rng.gen_range(1..100),
        ));
    }
    for _ in 0..size * EXTRA_ROADS_PER_CITY {
        let a = rng.gen_range(0..size);
        let b = rng.gen_range(0..size);
        edges.push(Edge::new(city_name(a), city_name(b), rng.gen_range(1..400)));
    }
    build_graph(edges)
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    for &size in NETWORK_SIZES {
        let graph = generate_network(size, BENCHMARK_SEED);
        let (Ok(from), Ok(to)) = (
            graph.city_id(&city_name(0)),
            graph.city_id(&city_name(size - 1)),
        ) else {
            continue;
        };
        #[expect(clippy::as_conversions, reason = "network sizes fit in u64")]
        let elements = size as u64;
        group.throughput(Throughput::Elements(elements));
        group.bench_with_input(BenchmarkId::new("cities", size), &size, |b, _| {
            b.iter(|| black_box(graph.shortest_path(black_box(from), black_box(to))));
        });
    }
    group.finish();
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_package");
    for &size in NETWORK_SIZES {
        let graph = Arc::new(generate_network(size, BENCHMARK_SEED));
        let config = FleetConfig::new(city_name(0)).with_basic(ClassConfig::new(10, 150));
        let Ok(fleet) = Fleet::new(Arc::clone(&graph), &config) else {
            continue;
        };
        let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
        let requests: Vec<_> = (0..50)
            .filter_map(|_| {
                let from = graph.city_id(&city_name(rng.gen_range(0..size))).ok()?;
                let to = graph.city_id(&city_name(rng.gen_range(0..size))).ok()?;
                Some((from, to))
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("cities", size), &size, |b, _| {
            b.iter(|| {
                let mut fleet = fleet.clone();
                for (package, &(from, to)) in (101..).zip(&requests) {
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "benchmarking assignment, the outcome is discarded"
                    )]
                    let _ = fleet.assign_package(package, from, to, CourierClass::Basic);
                }
                fleet
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_assignment);
criterion_main!(benches);
