use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geolens_core::{ProbeResults, ResponseHeaders, aggregate, analyze_document, evaluate, extract_signals};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_extract(c: &mut Criterion) {
    let article = fixture("faq_article.html");
    let spa = fixture("nextjs_app.html");
    let large = article.repeat(50);
    let headers = ResponseHeaders::new();

    let mut group = c.benchmark_group("extract");

    group.bench_with_input(BenchmarkId::new("article", "3KB"), &article, |b, html| {
        b.iter(|| extract_signals(black_box(html), "https://example.com/", &headers))
    });

    group.bench_with_input(BenchmarkId::new("spa", "1KB"), &spa, |b, html| {
        b.iter(|| extract_signals(black_box(html), "https://example.com/", &headers))
    });

    group.bench_with_input(BenchmarkId::new("large", "150KB"), &large, |b, html| {
        b.iter(|| extract_signals(black_box(html), "https://example.com/", &headers))
    });

    group.finish();
}

fn bench_rules_and_scoring(c: &mut Criterion) {
    let html = fixture("faq_article.html");
    let signals = extract_signals(&html, "https://example.com/", &ResponseHeaders::new());
    let probes = ProbeResults::default();

    c.bench_function("rules_and_scoring", |b| {
        b.iter(|| {
            let checks = evaluate(black_box(&signals), &probes);
            aggregate(&signals, &checks)
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let html = fixture("faq_article.html");
    let headers = ResponseHeaders::new();
    let probes = ProbeResults::default();

    c.bench_function("full_pipeline", |b| {
        b.iter(|| analyze_document(black_box(&html), "https://example.com/", &headers, 0, &probes))
    });
}

criterion_group!(benches, bench_extract, bench_rules_and_scoring, bench_full_pipeline);
criterion_main!(benches);
