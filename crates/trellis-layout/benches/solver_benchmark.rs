//! Solver benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis_core::Bounds;
use trellis_layout::{Block, Grid};

fn block_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new().with_padding(4.0, 4.0);
    for row in 0..rows {
        for col in 0..cols {
            let block = if (row + col) % 3 == 0 {
                Block::fixed(24.0, 16.0)
            } else {
                Block::new(10.0 + col as f64, 8.0 + row as f64)
            };
            grid.add_component(row, col, block).expect("benchmark cell is empty");
        }
    }
    grid
}

fn solve_small(c: &mut Criterion) {
    let grid = block_grid(3, 3);
    c.bench_function("solve_3x3", |b| {
        b.iter(|| grid.solve(black_box(300.0), black_box(200.0)))
    });
}

fn solve_large(c: &mut Criterion) {
    let grid = block_grid(20, 20);
    c.bench_function("solve_20x20", |b| {
        b.iter(|| grid.solve(black_box(1600.0), black_box(1200.0)))
    });
}

fn layout_nested(c: &mut Criterion) {
    c.bench_function("compute_layout_nested", |b| {
        b.iter_batched(
            || {
                let mut outer = Grid::new();
                for col in 0..4 {
                    outer
                        .add_component(0, col, block_grid(4, 4))
                        .expect("benchmark cell is empty");
                }
                outer
            },
            |mut outer| outer.compute_layout(black_box(Bounds::new(0.0, 0.0, 800.0, 400.0))),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, solve_small, solve_large, layout_nested);
criterion_main!(benches);
