//! Benchmark for full level validation.
//!
//! Run with: cargo bench --package levelsmith_validation --bench validation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use levelsmith_shared::{Entity, EntityType, GridPos, Level, Metadata, TileGrid, TileType};
use levelsmith_validation::{ConnectivityMap, LevelValidator, Validate};

/// Checkerboard of open rooms separated by single walls with doorways.
fn build_level(size: u32) -> Level {
    let mut grid = TileGrid::new(size, size, TileType::Ground);
    for i in (0..size).step_by(8) {
        grid.fill_rect(i, 0, 1, size, TileType::Wall);
        grid.fill_rect(0, i, size, 1, TileType::Wall);
    }
    for i in (4..size).step_by(8) {
        for j in (0..size).step_by(8) {
            grid.set(j, i, TileType::Ground);
            grid.set(i, j, TileType::Ground);
        }
    }
    let last = size as i32 - 3;
    let entities = vec![
        Entity::new(EntityType::Player, GridPos::new(2, 2)),
        Entity::new(EntityType::Exit, GridPos::new(last, last)),
    ];
    Level::new("bench", grid, entities, Metadata::new())
}

fn benchmark_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    for size in [100_u32, 500, 1000] {
        let level = build_level(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &level, |b, level| {
            b.iter(|| {
                black_box(ConnectivityMap::new(level.terrain(), &Default::default()).largest_component_size())
            });
        });
    }
    group.finish();
}

fn benchmark_report(c: &mut Criterion) {
    let validator = LevelValidator::default();
    let level = build_level(500);

    c.bench_function("full_report_500x500", |b| {
        b.iter(|| black_box(validator.report(black_box(&level))));
    });
}

criterion_group!(benches, benchmark_flood_fill, benchmark_report);
criterion_main!(benches);
