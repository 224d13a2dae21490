use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use lens_colors::{
    search, ColorExtractor, ExtractionConfig, LabColor, PaletteOptions, ReferenceColorRecord,
};

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

fn benchmark_extraction(c: &mut Criterion) {
    let image = gradient(1024, 768);
    let options = PaletteOptions::default();

    let palette = ColorExtractor::new();
    c.bench_function("extract_palette_1024x768", |b| {
        b.iter(|| palette.extract_colors(black_box(&image), &options))
    });

    let histogram = ColorExtractor::with_config(ExtractionConfig {
        use_palette: false,
        ..ExtractionConfig::default()
    })
    .expect("default extraction config is valid");
    c.bench_function("extract_histogram_1024x768", |b| {
        b.iter(|| histogram.extract_colors(black_box(&image), &options))
    });
}

fn benchmark_search(c: &mut Criterion) {
    let catalog: Vec<ReferenceColorRecord> = (0..10_000u32)
        .map(|i| {
            let lab = LabColor::new(
                (i % 100) as f32,
                ((i / 100) % 256) as f32 - 128.0,
                ((i * 7) % 256) as f32 - 128.0,
            );
            ReferenceColorRecord::new(format!("lot-{i}"), lab)
        })
        .collect();
    let query = LabColor::new(50.0, 10.0, -20.0);

    c.bench_function("search_10k_records", |b| {
        b.iter(|| search(black_box(query), &catalog, 20.0))
    });
}

criterion_group!(benches, benchmark_extraction, benchmark_search);
criterion_main!(benches);
