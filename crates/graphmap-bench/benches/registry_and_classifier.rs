//! Registry lookups and error classification
//!
//! The registry resolves each type once; these benches show the cost of a
//! cold resolution against a cached hit, and how cheaply the classifier
//! rejects regular payloads.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use graphmap::{ErrorClassifier, TagRegistry};
use graphmap_bench::{FeedItem, error_bodies};
use std::hint::black_box;

fn benchmark_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("cold_resolve", |b| {
        b.iter(|| {
            let registry = TagRegistry::new();
            black_box(registry.entry::<FeedItem>().unwrap());
        })
    });

    let warm = TagRegistry::new();
    warm.entry::<FeedItem>().unwrap();
    group.bench_function("cached_hit", |b| {
        b.iter(|| black_box(warm.entry::<FeedItem>().unwrap()))
    });

    group.finish();
}

fn benchmark_classifier(c: &mut Criterion) {
    let classifier = ErrorClassifier::new();
    let mut group = c.benchmark_group("classify");

    for (name, body) in error_bodies() {
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &body, |b, body| {
            b.iter(|| classifier.classify(black_box(body), Some(400)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_registry, benchmark_classifier);
criterion_main!(benches);
