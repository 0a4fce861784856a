/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pixkit_benches::synthetic_image;
use pixkit_core::bytestream::ByteCursor;
use pixkit_core::colorspace::ColorSpace;
use pixkit_image::Image;
use pixkit_viff::{ViffDecoder, ViffEncoder};

fn encode(frames: &[Image]) -> Vec<u8> {
    let mut sink = vec![];
    ViffEncoder::new(frames).encode(&mut sink).unwrap();
    sink
}

fn decode(data: &[u8]) -> Vec<Image> {
    ViffDecoder::new(ByteCursor::new(data)).decode().unwrap()
}

fn bench_viff(c: &mut Criterion) {
    let frames = [synthetic_image(1024, 1024, ColorSpace::RGBA)];
    let data = encode(&frames);

    let mut group = c.benchmark_group("viff: 1024x1024 RGBA");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("decode", |b| b.iter(|| black_box(decode(&data))));
    group.bench_function("encode", |b| b.iter(|| black_box(encode(&frames))));
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(core::time::Duration::from_secs(10))
      };
    targets=bench_viff);

criterion_main!(benches);
