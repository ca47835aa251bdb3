//! Benchmarks for dtstamp-core.
//!
//! Run with: `cargo bench -p dtstamp-core`
//!
//! Results are saved to `target/criterion/` with HTML reports.

use chrono::{Local, TimeDelta, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dtstamp_core::{relative_time, Dtstamp};

/// Benchmark the humanizer across every unit bucket.
fn bench_relative_time(c: &mut Criterion) {
    let now = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let mut group = c.benchmark_group("relative_time");

    let offsets = [
        ("seconds", TimeDelta::seconds(30)),
        ("minutes", TimeDelta::minutes(40)),
        ("hours", TimeDelta::hours(7)),
        ("days", TimeDelta::days(3)),
        ("weeks", TimeDelta::weeks(3)),
        ("months", TimeDelta::days(90)),
        ("years", TimeDelta::days(1095)),
    ];

    for (name, offset) in offsets {
        let target = now + offset;
        group.bench_with_input(BenchmarkId::from_parameter(name), &target, |b, target| {
            b.iter(|| relative_time(black_box(&now), black_box(target)))
        });
    }

    group.finish();
}

/// Benchmark the full query pipeline: parse, render every style.
fn bench_convert(c: &mut Criterion) {
    let dts = Dtstamp::new();
    let now = Local.with_ymd_and_hms(2024, 6, 12, 14, 30, 0).unwrap();
    let mut group = c.benchmark_group("convert");

    let inputs = [
        ("empty", ""),
        ("epoch", "1704067200"),
        ("iso", "2024-01-15T10:30:00Z"),
        ("offset", "in 3 weeks"),
        ("weekday", "next friday"),
        ("month_day", "dec 15 at 3pm"),
        ("unparseable", "hello world"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| dts.handle_query_at(black_box(input), now))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_relative_time, bench_convert);
criterion_main!(benches);
