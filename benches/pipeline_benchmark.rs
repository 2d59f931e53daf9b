//! Benchmarks for the structure and render passes.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pdf2md::render::render;
use pdf2md::{build_structure, Fragment};

/// Synthetic document: per section a heading, a wrapped paragraph and a
/// short nested list.
fn synthetic_fragments(sections: usize) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(sections * 4 + 1);
    let mut order = 0u64;
    let mut push = |text: String, size: f32, page: u32| {
        fragments.push(Fragment::new(text, size, page, order));
        order += 1;
    };

    push("Benchmark Document".to_string(), 24.0, 1);
    for i in 0..sections {
        let page = (i / 3) as u32 + 1;
        push(format!("Section {}", i + 1), 16.0, page);
        push(
            format!(
                "Section {} opens with a paragraph that wraps\nacross several lines of body text\nbefore it ends here.",
                i + 1
            ),
            11.0,
            page,
        );
        push(
            "1. first step\n2. second step\n  - detail one\n  - detail two\n3. third step".to_string(),
            11.0,
            page,
        );
        push("\nClosing remarks for the section.".to_string(), 11.0, page);
    }
    fragments
}

fn bench_build_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_structure");

    for sections in [10, 100, 1000] {
        let fragments = synthetic_fragments(sections);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &fragments,
            |b, fragments| {
                b.iter(|| build_structure(black_box(fragments)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let blocks = build_structure(&synthetic_fragments(1000)).unwrap();

    c.bench_function("render_1000_sections", |b| {
        b.iter(|| render(black_box(&blocks)));
    });
}

fn bench_format_detection(c: &mut Criterion) {
    let header = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n";

    c.bench_function("detect_pdf_header", |b| {
        b.iter(|| pdf2md::validate::is_pdf_bytes(black_box(header)));
    });
}

criterion_group!(
    benches,
    bench_build_structure,
    bench_render,
    bench_format_detection
);
criterion_main!(benches);
