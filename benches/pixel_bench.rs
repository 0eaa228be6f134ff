use bfpixels::session::MemoryReader;
use bfpixels::{decode_raw, normalize, read_pixels, PixelType, PixelTypeDescriptor, Region};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const SIZE: usize = 2048;

/// One 2048x2048 plane of the given type filled with a ramp
fn plane(pixel_type: PixelType) -> Vec<u8> {
    let bpp = pixel_type.bytes_per_pixel();
    (0..SIZE * SIZE)
        .flat_map(|i| match pixel_type {
            PixelType::Float => (i as f32).to_le_bytes().to_vec(),
            PixelType::Double => (i as f64).to_le_bytes().to_vec(),
            _ => (i as u64).to_le_bytes()[..bpp].to_vec(),
        })
        .collect()
}

// ============================================================================
// TIER 1: CORE TRANSFORMS
// ============================================================================

fn bench_decode_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_raw");

    for pixel_type in [PixelType::Uint8, PixelType::Uint16, PixelType::Int32, PixelType::Float] {
        let buffer = plane(pixel_type);
        let descriptor = PixelTypeDescriptor::from_pixel_type(pixel_type, true);

        group.bench_function(pixel_type.to_string(), |b| {
            b.iter(|| decode_raw(black_box(&buffer), black_box(&descriptor)).unwrap());
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for pixel_type in [PixelType::Uint16, PixelType::Int32, PixelType::Float, PixelType::Double] {
        let buffer = plane(pixel_type);
        let descriptor = PixelTypeDescriptor::from_pixel_type(pixel_type, true);

        group.bench_function(pixel_type.to_string(), |b| {
            b.iter(|| normalize(black_box(&buffer), black_box(&descriptor)).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// TIER 2: SESSION READS
// ============================================================================

fn bench_read_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_pixels");

    let mut reader = MemoryReader::new(PixelType::Uint16, SIZE, SIZE, true).with_bits_per_pixel(12);
    reader.push_plane(plane(PixelType::Uint16)).unwrap();
    let region = Region::new(256, 256, 1024, 1024);

    group.bench_function("uint16_region_normalized", |b| {
        b.iter(|| read_pixels(&mut reader, 0, black_box(region), true).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_decode_raw, bench_normalize, bench_read_region);
criterion_main!(benches);
