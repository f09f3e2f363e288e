//! Benchmarks for navigation-link injection.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the full pipeline (load, import, resolve,
//! attach, serialize) on synthetic PDF data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lopdf::{dictionary, Document, Object, Stream};
use pdfnav::{add_navigation, NavOptions, SynthesisParams, TargetSpec, TocItem};

/// Creates a minimal synthetic PDF with the given number of pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..page_count {
        let text = format!("BT /F1 12 Tf 100 700 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, text.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("failed to save bench PDF");
    bytes
}

fn bench_explicit_targets(c: &mut Criterion) {
    let pdf = create_test_pdf(16);
    let spec = TargetSpec::Explicit(
        (1..16)
            .map(|i| TocItem::new(format!("Section {}", i), 700.0 - 20.0 * i as f64, i))
            .collect(),
    );
    let options = NavOptions::default();

    c.bench_function("add_navigation_explicit_16_pages", |b| {
        b.iter(|| add_navigation(black_box(&pdf), black_box(&spec), &options).unwrap())
    });
}

fn bench_synthesized_targets(c: &mut Criterion) {
    let options = NavOptions::default();

    let mut group = c.benchmark_group("add_navigation_synthesized");
    for page_count in [8, 64] {
        let pdf = create_test_pdf(page_count);
        let spec = TargetSpec::Synthesized(SynthesisParams::default());
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| add_navigation(black_box(&pdf), black_box(&spec), &options).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_explicit_targets, bench_synthesized_targets);
criterion_main!(benches);
