use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use funnel_chart::config::FunnelConfig;
use funnel_chart::data::Row;
use funnel_chart::layout::layout_chart;
use funnel_chart::render::render_svg;
use std::hint::black_box;

fn sample_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| Row::new(format!("stage {i}"), (count * 100 - i * 7) as f32))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for count in [5usize, 50, 500] {
        let rows = sample_rows(count);

        let uniform = FunnelConfig::default();
        group.bench_with_input(BenchmarkId::new("uniform", count), &rows, |b, rows| {
            b.iter(|| layout_chart(black_box(rows), &uniform).unwrap());
        });

        let mut dynamic = FunnelConfig::default();
        dynamic.block.dynamic_height = true;
        dynamic.block.min_height = Some(2.0);
        dynamic.chart.curve.enabled = true;
        group.bench_with_input(BenchmarkId::new("dynamic_curved", count), &rows, |b, rows| {
            b.iter(|| layout_chart(black_box(rows), &dynamic).unwrap());
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let rows = sample_rows(50);
    let config = FunnelConfig::default();
    let layout = layout_chart(&rows, &config).unwrap();
    c.bench_function("render_svg_50", |b| {
        b.iter(|| render_svg(black_box(&layout), &config));
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
