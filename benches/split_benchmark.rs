//! Benchmarks for pdfchunk.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfchunk::{ChunkPlan, ChunkedExtractor, PageSource, SplitOptions};

/// Synthetic document with a paragraph of text per page.
struct SyntheticSource {
    pages: u32,
}

impl PageSource for SyntheticSource {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn extract_page(&self, index: u32) -> pdfchunk::Result<String> {
        Ok(format!("Page {} ", index + 1).repeat(200))
    }
}

/// Benchmark PDF format detection.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_header = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| pdfchunk::detect_format_from_bytes(black_box(pdf_header)).is_ok());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| pdfchunk::detect_format_from_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark chunk planning over a large page count.
fn bench_chunk_plan(c: &mut Criterion) {
    c.bench_function("plan_100k_pages", |b| {
        b.iter(|| {
            ChunkPlan::new(black_box(100_000), black_box(50))
                .map(|plan| plan.iter().count())
                .unwrap_or_default()
        });
    });
}

/// Benchmark writing chunk files at various sizes.
fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let dir = tempfile::TempDir::new().expect("temp dir");

    for page_count in [10u32, 100, 500].iter() {
        let source = SyntheticSource { pages: *page_count };
        let extractor = ChunkedExtractor::new(SplitOptions::new(dir.path()).with_chunk_size(50));

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let _ = extractor.run(black_box(&source));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format_detection, bench_chunk_plan, bench_split);
criterion_main!(benches);
