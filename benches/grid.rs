use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use overlay_grid::{drawing, Grid, GridConfig, GridDrawingConfig, LabelFont};
use std::hint::black_box;

// Off-white page with speckle noise and ruled lines, like a scanned form
fn create_scan(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |_x, y| {
        if y % 32 == 0 {
            Rgb([90, 90, 90])
        } else {
            let v = 235 + rand::random::<u8>() % 20;
            Rgb([v, v, v.saturating_sub(4)])
        }
    });
    DynamicImage::ImageRgb8(img)
}

// Geometry alone for growing column counts
fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let col_counts = [10, 50, 200, 1000];

    for cols in col_counts.iter() {
        group.bench_with_input(BenchmarkId::new("cols", cols), cols, |b, &cols| {
            b.iter(|| {
                black_box(Grid::from_dimensions(2480, 3508, GridConfig::new(cols, None)).unwrap());
            });
        });
    }
    group.finish();
}

// Full render for typical scan sizes
fn bench_render_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_sizes");
    let sizes = [(500, 300), (1240, 1754), (2480, 3508)];
    let config = GridDrawingConfig::default();
    let font = LabelFont::resolve(&config.label_font, config.label_size);

    for size in sizes.iter() {
        let (width, height) = *size;
        let img = create_scan(width, height);
        let grid = Grid::try_from_image_with_config(&img, GridConfig::default()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("size", format!("{}x{}", width, height)),
            &img,
            |b, img| {
                b.iter(|| {
                    black_box(drawing::render(img, &grid, &font, &config));
                });
            },
        );
    }
    group.finish();
}

// Label rendering cost: outline font (when installed) against the bundled one
fn bench_label_fonts(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_fonts");
    let config = GridDrawingConfig::default();
    let img = create_scan(1240, 1754);
    let grid = Grid::try_from_image_with_config(&img, GridConfig::new(100, None)).unwrap();

    let fonts = [
        ("resolved", LabelFont::resolve(&config.label_font, config.label_size)),
        ("builtin", LabelFont::builtin(config.label_size)),
    ];
    for (name, font) in fonts.iter() {
        group.bench_with_input(BenchmarkId::new("font", name), &img, |b, img| {
            b.iter(|| {
                black_box(drawing::render(img, &grid, font, &config));
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20); // Reduced sample size for faster runs
    targets = bench_geometry, bench_render_sizes, bench_label_fonts
}
criterion_main!(benches);
