//! Performance benchmarks for critical boardsync operations
//!
//! Reconnect matching and snapshot diffing run on every discovery poll, so
//! they are tracked here for regressions.

use boardsync::models::{AttachedBoardsChange, Board, SelectionConfig, ValidSelection};
use boardsync::services::{BoardCatalog, find_reconnect_target};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn attached_boards(count: usize) -> Vec<Board> {
    (0..count)
        .map(|i| {
            Board::new(format!("Board {}", i))
                .with_fqbn(format!("vendor:arch:board{}", i))
                .with_port(format!("/dev/ttyACM{}", i))
        })
        .collect()
}

fn last_valid() -> ValidSelection {
    ValidSelection::try_from(SelectionConfig::new(
        Some(Board::new("Board 31").with_fqbn("vendor:arch:board31")),
        Some("/dev/ttyUSB9".to_string()),
    ))
    .expect("valid selection")
}

/// Benchmark the two-pass reconnect search
fn benchmark_reconnect_matching(c: &mut Criterion) {
    let boards = attached_boards(32);
    let last_valid = last_valid();

    c.bench_function("reconnect_relaxed_match_32_boards", |b| {
        b.iter(|| {
            let result = find_reconnect_target(black_box(&last_valid), black_box(&boards));
            black_box(result);
        });
    });

    let unrelated = attached_boards(16);
    c.bench_function("reconnect_no_match_16_boards", |b| {
        b.iter(|| {
            let result = find_reconnect_target(black_box(&last_valid), black_box(&unrelated));
            black_box(result);
        });
    });
}

/// Benchmark diffing consecutive discovery snapshots
fn benchmark_snapshot_diff(c: &mut Criterion) {
    let old = attached_boards(32);
    let mut new = attached_boards(32);
    new.remove(5);
    new.push(Board::new("Late board").with_port("/dev/ttyACM99"));

    c.bench_function("snapshot_diff_32_boards", |b| {
        b.iter(|| {
            let change = AttachedBoardsChange::diff(black_box(&old), black_box(&new));
            black_box(change);
        });
    });
}

/// Benchmark catalog lookups
fn benchmark_catalog_lookup(c: &mut Criterion) {
    let catalog = BoardCatalog::builtin();

    c.bench_function("catalog_lookup_exact", |b| {
        b.iter(|| black_box(catalog.lookup(black_box(0x2341), black_box(0x8054))));
    });

    c.bench_function("catalog_lookup_vendor_fallback", |b| {
        b.iter(|| black_box(catalog.lookup(black_box(0x1A86), black_box(0x7523))));
    });
}

criterion_group!(
    benches,
    benchmark_reconnect_matching,
    benchmark_snapshot_diff,
    benchmark_catalog_lookup
);
criterion_main!(benches);
