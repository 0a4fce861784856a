/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pixkit_benches::synthetic_image;
use pixkit_core::colorspace::ColorSpace;
use pixkit_image::{Pixel, PixelRow, PixelRowMut};
use pixkit_quantum::{Packing, QuantumExporter, QuantumImporter, QuantumInfo, QuantumType};

const WIDTH: usize = 4096;

fn layouts() -> [(&'static str, QuantumInfo, QuantumType); 4] {
    [
        ("rgba8", QuantumInfo::new(8), QuantumType::RGBA),
        ("rgb16", QuantumInfo::new(16), QuantumType::RGB),
        ("rgb10-words", QuantumInfo::new(10).set_packing(Packing::Words), QuantumType::RGB),
        ("gray1", QuantumInfo::new(1), QuantumType::Gray)
    ]
}

fn bench_export(c: &mut Criterion) {
    let image = synthetic_image(WIDTH, 1, ColorSpace::RGBA);
    let mut group = c.benchmark_group("quantum: export row");

    group.throughput(Throughput::Elements(WIDTH as u64));

    for (name, info, quantum_type) in layouts() {
        let exporter = QuantumExporter::new(info, quantum_type).unwrap();
        let mut out = vec![0_u8; exporter.extent(WIDTH).unwrap()];

        group.bench_function(name, |b| {
            b.iter(|| black_box(exporter.export(PixelRow::new(image.pixels()), &mut out)))
        });
    }
}

fn bench_import(c: &mut Criterion) {
    let image = synthetic_image(WIDTH, 1, ColorSpace::RGBA);
    let mut group = c.benchmark_group("quantum: import row");

    group.throughput(Throughput::Elements(WIDTH as u64));

    for (name, info, quantum_type) in layouts() {
        let exporter = QuantumExporter::new(info, quantum_type).unwrap();
        let importer = QuantumImporter::new(info, quantum_type).unwrap();

        let mut packed = vec![0_u8; exporter.extent(WIDTH).unwrap()];
        exporter
            .export(PixelRow::new(image.pixels()), &mut packed)
            .unwrap();

        let mut pixels = vec![Pixel::default(); WIDTH];

        group.bench_function(name, |b| {
            b.iter(|| black_box(importer.import(&packed, &mut PixelRowMut::new(&mut pixels))))
        });
    }
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(core::time::Duration::from_secs(5))
      };
    targets=bench_export,bench_import);

criterion_main!(benches);
