use capture_tool::{canonical_query, derive_token, parse_options, CaptureClient, Options};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

// Fast settings for all benchmarks
fn configure_fast_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_millis(500));
    group.sample_size(20);
}

fn typical_options() -> Options {
    Options::new()
        .with("url", "https://example.com/products?id=42&ref=home page")
        .with("vw", 1920)
        .with("vh", 1080)
        .with("deviceScale", 1.5)
        .with("fullPage", true)
        .with("darkMode", false)
        .with("userAgent", "Custom Agent (v1.0)")
        .with("format", "png")
        .with("delay", "")
}

fn benchmark_option_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("option_parsing");
    configure_fast_group(&mut group);

    let tokens = [
        "vw=1920",
        "vh=1080",
        "deviceScale=1.5",
        "fullPage=true",
        "selector=div.class=value",
    ];

    group.bench_function("parse_options", |b| {
        b.iter(|| {
            let options = parse_options(black_box(&tokens)).unwrap();
            black_box(options);
        });
    });

    group.finish();
}

fn benchmark_canonical_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_query");
    configure_fast_group(&mut group);

    let options = typical_options();
    group.bench_function("typical", |b| {
        b.iter(|| black_box(canonical_query(black_box(&options))));
    });

    group.finish();
}

fn benchmark_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("token");
    configure_fast_group(&mut group);

    let query = canonical_query(&typical_options());
    group.bench_function("derive", |b| {
        b.iter(|| black_box(derive_token(black_box("test_secret"), black_box(&query))));
    });

    group.finish();
}

fn benchmark_build_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_url");
    configure_fast_group(&mut group);

    let client = CaptureClient::new("test_key", "test_secret").unwrap();
    let options = typical_options();
    group.bench_function("image", |b| {
        b.iter(|| {
            let url = client
                .build_image_url(black_box("https://example.com"), black_box(&options))
                .unwrap();
            black_box(url);
        });
    });

    group.finish();
}

criterion_group!(
    unit_benches,
    benchmark_option_parsing,
    benchmark_canonical_query,
    benchmark_token,
    benchmark_build_url,
);

criterion_main!(unit_benches);
