use complex_layout::{Cell, Layout, LayoutOptions};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

/// Triangulated `side x side` grid: two triangles per square.
fn triangulated_grid(side: usize) -> Vec<Cell> {
    let idx = |x: usize, y: usize| y * side + x;
    let mut cells = Vec::new();
    for y in 0..side - 1 {
        for x in 0..side - 1 {
            cells.push(vec![idx(x, y), idx(x + 1, y), idx(x, y + 1)]);
            cells.push(vec![idx(x + 1, y), idx(x + 1, y + 1), idx(x, y + 1)]);
        }
    }
    cells
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.measurement_time(Duration::from_secs(5));

    for side in [8usize, 16, 32] {
        let cells = triangulated_grid(side);
        for dimension in [2usize, 3] {
            let id = BenchmarkId::new(format!("grid{side}"), format!("d{dimension}"));
            group.bench_with_input(id, &cells, |b, cells| {
                b.iter_batched(
                    || Layout::new(cells, dimension, LayoutOptions::default()).unwrap(),
                    |mut layout| {
                        for _ in 0..10 {
                            black_box(layout.step(0.1));
                        }
                        layout
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let cells = triangulated_grid(8);
    c.bench_function("solve/grid8/d2", |b| {
        b.iter_batched(
            || Layout::new(&cells, 2, LayoutOptions::default()).unwrap(),
            |mut layout| black_box(layout.solve()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_step, bench_solve);
criterion_main!(benches);
