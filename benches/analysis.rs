use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leafscan::analyze_rgb;
use ndarray::Array3;

fn benchmark_analysis(c: &mut Criterion) {
    // Synthetic leaf-like gradient: green center drifting to brown edges
    let rgb = Array3::from_shape_fn((256, 256, 3), |(y, x, ch)| {
        let edge = (y.abs_diff(128) + x.abs_diff(128)) / 2;
        match ch {
            0 => (40 + edge / 2) as u8,
            1 => 200u8.saturating_sub(edge as u8),
            _ => 30,
        }
    });

    c.bench_function("analyze_rgb_256x256", |b| {
        b.iter(|| analyze_rgb(black_box(rgb.view())).unwrap())
    });
}

criterion_group!(benches, benchmark_analysis);
criterion_main!(benches);
