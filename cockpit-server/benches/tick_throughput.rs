//! Benchmarks for race session tick and snapshot throughput.
//!
//! Run with: cargo bench -p cockpit-server

use cockpit_core::FieldMask;
use cockpit_sim::{RaceSession, TickerKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn running_session() -> RaceSession {
    let mut session = RaceSession::builder().seed(42).build();
    session.start();
    session
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_tick");

    for kind in [TickerKind::Engine, TickerKind::Tracker, TickerKind::Leaderboard] {
        let mut session = running_session();
        group.bench_with_input(BenchmarkId::new("tick", format!("{:?}", kind)), &kind, |b, &kind| {
            b.iter(|| session.tick(black_box(kind)));
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = running_session();
    for _ in 0..120 {
        for kind in TickerKind::ALL {
            session.tick(kind);
        }
    }

    let mut group = c.benchmark_group("snapshot");
    group.bench_function("build", |b| b.iter(|| black_box(session.snapshot())));

    let snapshot = session.snapshot();
    group.bench_function("json_full", |b| {
        b.iter(|| black_box(snapshot.to_json_filtered(None).unwrap()))
    });
    let mask = FieldMask::parse("telemetry,lap");
    group.bench_function("json_masked", |b| {
        b.iter(|| black_box(snapshot.to_json_filtered(Some(&mask)).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_tick, bench_snapshot);
criterion_main!(benches);
