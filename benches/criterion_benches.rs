use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sokoban_bfs::config::Mode;
use sokoban_bfs::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_four_boxes(c: &mut Criterion) {
    bench_level(c, Mode::Sequential, "levels/02-four-boxes.txt", 50);
}

#[allow(unused)]
fn bench_four_boxes_parallel(c: &mut Criterion) {
    bench_level(c, Mode::Parallel, "levels/02-four-boxes.txt", 50);
}

#[allow(unused)]
fn bench_demo(c: &mut Criterion) {
    // 8 boxes, most of them close to goals
    bench_level(c, Mode::Parallel, "levels/03-demo.txt", 10);
}

fn bench_level(c: &mut Criterion, mode: Mode, level_path: &str, samples: usize) {
    let level = level_path.load_level().unwrap();

    let mut group = c.benchmark_group(mode.to_string());
    group.sample_size(samples);
    group.bench_function(level_path, |b| {
        b.iter(|| level.solve(black_box(mode), black_box(false)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_four_boxes,
    bench_four_boxes_parallel,
    //bench_demo,
);
criterion_main!(benches);
