use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_inspect::tools::synthetic::SyntheticSymbol;
use qr_inspect::utils::grayscale::{rgba_to_grayscale, rgba_to_grayscale_parallel};
use qr_inspect::{ECLevel, GridMapper, MaskPattern, RgbaView, Version, decode_format, read_format};

fn bench_map_to_pixel(c: &mut Criterion) {
    let version = Version::new(7).expect("v7");
    let out = SyntheticSymbol::with_format(version, ECLevel::M, MaskPattern::Pattern2).render(6, 4);
    let mapper = GridMapper::new(out.corners, version.size());
    c.bench_function("map_to_pixel_full_grid_v7", |b| {
        b.iter(|| {
            let d = version.size();
            let mut acc = 0.0f32;
            for row in 0..d {
                for col in 0..d {
                    let p = mapper.map_to_pixel(col as f32 + 0.5, row as f32 + 0.5);
                    acc += p.x + p.y;
                }
            }
            black_box(acc)
        })
    });
}

fn bench_decode_format(c: &mut Criterion) {
    let version = Version::new(2).expect("v2");
    let out = SyntheticSymbol::with_format(version, ECLevel::Q, MaskPattern::Pattern6).render(8, 4);
    let view = RgbaView::new(&out.rgba, out.width, out.height).expect("valid buffer");
    let mapper = GridMapper::new(out.corners, version.size());
    c.bench_function("decode_format_v2", |b| {
        b.iter(|| decode_format(black_box(view), black_box(&mapper)))
    });
}

fn bench_read_format(c: &mut Criterion) {
    let version = Version::new(2).expect("v2");
    let out = SyntheticSymbol::with_format(version, ECLevel::H, MaskPattern::Pattern1).render(8, 4);
    c.bench_function("read_format_v2", |b| {
        b.iter(|| {
            read_format(
                black_box(&out.rgba),
                black_box(out.width),
                black_box(out.height),
                black_box(out.corners),
                black_box(2),
            )
        })
    });
}

fn bench_rgba_to_grayscale_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 4];
    c.bench_function("rgba_to_grayscale_640x480", |b| {
        b.iter(|| rgba_to_grayscale(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_rgba_to_grayscale_parallel_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 4];
    c.bench_function("rgba_to_grayscale_parallel_1920x1080", |b| {
        b.iter(|| rgba_to_grayscale_parallel(black_box(&image), black_box(1920), black_box(1080)))
    });
}

criterion_group!(
    benches,
    bench_map_to_pixel,
    bench_decode_format,
    bench_read_format,
    bench_rgba_to_grayscale_medium,
    bench_rgba_to_grayscale_parallel_large
);
criterion_main!(benches);
