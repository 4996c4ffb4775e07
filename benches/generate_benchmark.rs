//! Benchmarks for TOC generation.
//!
//! Run with: cargo bench
//!
//! These benchmarks generate a TOC over synthetic documents of various sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pagetoc::{
    generate_toc, render::render_toc, Heading, MemoryDocument, MemoryFrame, PageFormat, Section,
    SectionTable, TocConfig,
};

/// Creates a document with `page_count` pages, two text frames per page and
/// a heading every few paragraphs.
fn create_test_document(page_count: u32) -> MemoryDocument {
    let mut doc = MemoryDocument::new(page_count);
    doc.add_frame(MemoryFrame::text_frame("toc", 1, 40.0, 40.0));

    for page in 1..=page_count {
        for column in 0..2 {
            let mut frame = MemoryFrame::text_frame(
                format!("p{}-c{}", page, column),
                page,
                40.0 + column as f64 * 260.0,
                80.0,
            );
            for i in 0..12 {
                let style = match (page + i) % 6 {
                    0 => Some("h1"),
                    3 => Some("h2"),
                    5 => Some("h3"),
                    _ => None,
                };
                frame = frame.with_paragraph(format!("Paragraph {} on page {}", i, page), style);
            }
            doc.add_frame(frame);
        }
    }

    doc
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_toc");
    let config = TocConfig::default().with_chapter_numbering(true);

    for pages in [10u32, 100, 500] {
        let doc = create_test_document(pages);
        group.throughput(Throughput::Elements(pages as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pages), &doc, |b, doc| {
            b.iter(|| {
                let mut doc = doc.clone();
                generate_toc(black_box(&mut doc), Some("toc"), &config).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_toc");
    let sections = SectionTable::new(vec![
        Section::new(20, PageFormat::RomanLower, 1),
        Section::new(0, PageFormat::Arabic, 1),
    ])
    .unwrap();
    let config = TocConfig::extended().with_sections(sections);

    for count in [100usize, 1000, 10000] {
        let headings: Vec<Heading> = (0..count)
            .map(|i| Heading::new(format!("Heading {}", i), (i / 4 + 1) as u32, i % 4))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &headings, |b, headings| {
            b.iter(|| render_toc(black_box(headings), &config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_render);
criterion_main!(benches);
