//! Route parsing and canonicalization benchmarks.
//!
//! Run with: cargo bench -p waypoint-analysis --bench route_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use waypoint_analysis::model::HttpVerb;
use waypoint_analysis::routes::{canonical_route_key, parse_route_pattern};
use waypoint_core::diagnostics::{DiagnosticSink, SourceLocation};

/// Generate a route pattern with the given number of parameter groups.
fn sample_pattern(groups: usize) -> String {
    let mut pattern = String::from("/api/v2/resources");
    for i in 0..groups {
        match i % 3 {
            0 => pattern.push_str(&format!("/{{id{i}:int}}")),
            1 => pattern.push_str(&format!("/seg{i}/{{name{i}:alpha:minlength(2)}}")),
            _ => pattern.push_str(&format!("/{{slug{i}?}}")),
        }
    }
    pattern
}

fn parse_by_group_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_parse");
    group.sample_size(50);

    for groups in [1usize, 4, 16] {
        let pattern = sample_pattern(groups);
        let location = SourceLocation::default();

        group.bench_with_input(
            BenchmarkId::new("groups", groups),
            &pattern,
            |b, pattern| {
                b.iter(|| {
                    let mut sink = DiagnosticSink::new();
                    parse_route_pattern(pattern, &location, &mut sink)
                });
            },
        );
    }

    group.finish();
}

fn canonical_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_key");
    group.sample_size(50);

    let location = SourceLocation::default();
    let patterns: Vec<_> = (0..100)
        .map(|i| {
            let mut sink = DiagnosticSink::new();
            let text = format!("/orders/{{id{i}:int}}/items/{{sku{i}:guid}}");
            parse_route_pattern(&text, &location, &mut sink)
                .unwrap_or_else(|| panic!("fixture pattern must parse: {text}"))
        })
        .collect();

    group.bench_function("key_100", |b| {
        b.iter(|| {
            for route in &patterns {
                let _ = canonical_route_key(HttpVerb::Get, route);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, parse_by_group_count, canonical_key);
criterion_main!(benches);
