use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pixel_pickle::{PngCodec, RasterCodec, encode, extract};

const SIZES: [(&str, usize); 3] = [("64b", 64), ("1kb", 1024), ("64kb", 64 * 1024)];

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (name, len) in SIZES {
        let data = payload(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("encode", name), &data, |b, data| {
            b.iter(|| black_box(encode(data).unwrap()));
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (name, len) in SIZES {
        let buffer = encode(&payload(len)).unwrap();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("extract", name), &buffer, |b, buffer| {
            b.iter(|| black_box(extract(buffer).unwrap()));
        });
    }

    group.finish();
}

fn bench_png_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("png");

    let codec = PngCodec::new();
    let buffer = encode(&payload(64 * 1024)).unwrap();
    group.throughput(Throughput::Bytes(64 * 1024));
    group.bench_function("roundtrip_64kb", |b| {
        b.iter(|| {
            let file = codec.encode_image(&buffer).unwrap();
            black_box(extract(&codec.decode_image(&file).unwrap()).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_extract, bench_png_roundtrip);
criterion_main!(benches);
