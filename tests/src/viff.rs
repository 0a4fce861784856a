/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_core::bytestream::ByteCursor;
use pixkit_core::colorspace::ColorSpace;
use pixkit_image::{Image, Pixel, PixelRow, QUANTUM_RANGE};
use pixkit_quantum::{Packing, QuantumExporter, QuantumImporter, QuantumInfo, QuantumType};
use pixkit_viff::{ViffDecoder, ViffEncoder};

use crate::{gradient, hash, pixel_bytes};

fn encode(frames: &[Image]) -> Vec<u8> {
    let mut sink = vec![];
    let written = ViffEncoder::new(frames).encode(&mut sink).unwrap();
    assert_eq!(written, sink.len());
    sink
}

fn decode(bytes: &[u8]) -> Vec<Image> {
    ViffDecoder::new(ByteCursor::new(bytes)).decode().unwrap()
}

/// Pixels that survive an 8 bit round trip unchanged
fn eight_bit_pixels(width: usize, height: usize, alpha: bool) -> Vec<Pixel> {
    (0..width * height)
        .map(|i| {
            let v = (i * 37 % 256) as u16 * 257;
            let a = if alpha { (i * 11 % 256) as u16 * 257 } else { QUANTUM_RANGE };
            Pixel::with_alpha(v, QUANTUM_RANGE - v, (i % 256) as u16 * 257, a)
        })
        .collect()
}

#[test]
fn test_encoding_is_deterministic() {
    let mut image =
        Image::from_pixels(17, 9, ColorSpace::RGBA, eight_bit_pixels(17, 9, true)).unwrap();
    image.set_comment("determinism");

    let frames = [image];

    assert_eq!(hash(&encode(&frames)), hash(&encode(&frames)));
}

#[test]
fn test_chained_frames_survive() {
    let colormap = (0..40)
        .map(|i| Pixel::new(i * 1000, 65535 - i * 1000, i * 257))
        .map(|p| {
            // palette entries survive the 8 bit map
            Pixel::new(p.red / 257 * 257, p.green / 257 * 257, p.blue / 257 * 257)
        })
        .collect::<Vec<_>>();
    let indexes = (0..30 * 20).map(|i| (i % 40) as u16).collect();

    let frames = [
        Image::from_pixels(13, 7, ColorSpace::RGB, eight_bit_pixels(13, 7, false)).unwrap(),
        Image::from_indexes(30, 20, colormap, indexes).unwrap(),
        Image::from_pixels(5, 5, ColorSpace::RGBA, eight_bit_pixels(5, 5, true)).unwrap()
    ];

    let decoded = decode(&encode(&frames));
    assert_eq!(decoded.len(), frames.len());

    for (source, result) in frames.iter().zip(&decoded) {
        assert_eq!(source.dimensions(), result.dimensions());
        assert_eq!(hash(&pixel_bytes(source.pixels())), hash(&pixel_bytes(result.pixels())));
    }
}

#[test]
fn test_quantum_rows_feed_the_encoder() {
    const WIDTH: usize = 6;
    const HEIGHT: usize = 4;

    // ten bit samples three to a word, as a scanner would deliver them
    let packed_info = QuantumInfo::new(10).set_packing(Packing::Words);
    let exporter = QuantumExporter::new(packed_info, QuantumType::RGB).unwrap();
    let importer = QuantumImporter::new(packed_info, QuantumType::RGB).unwrap();

    let source = gradient(WIDTH);
    let mut scanline = vec![0_u8; exporter.extent(WIDTH).unwrap()];
    exporter.export(PixelRow::new(&source), &mut scanline).unwrap();

    let mut image = Image::new(WIDTH, HEIGHT, ColorSpace::RGB).unwrap();
    for y in 0..HEIGHT {
        importer
            .import(&scanline, &mut image.row_mut(y).unwrap())
            .unwrap();
    }

    let decoded = decode(&encode(&[image.clone()]));
    assert_eq!(decoded.len(), 1);

    // VIFF direct color holds 8 bits, compare at that depth
    let eight = QuantumExporter::new(QuantumInfo::new(8), QuantumType::RGB).unwrap();
    for y in 0..HEIGHT {
        let mut expected = [0_u8; WIDTH * 3];
        let mut found = [0_u8; WIDTH * 3];

        eight.export(image.row(y).unwrap(), &mut expected).unwrap();
        eight.export(decoded[0].row(y).unwrap(), &mut found).unwrap();

        assert_eq!(hash(&expected), hash(&found), "row {y}");
    }
}

#[test]
fn test_bilevel_matches_one_bit_export() {
    let colormap = vec![Pixel::gray(0), Pixel::gray(QUANTUM_RANGE)];
    let indexes = (0..21 * 3).map(|i| u16::from(i % 3 == 0)).collect();
    let image = Image::from_indexes(21, 3, colormap, indexes).unwrap();

    let bytes = encode(&[image.clone()]);

    // plane after the header is the min is white 1 bit gray export of every row
    let info = QuantumInfo::new(1).set_min_is_white(true);
    let exporter = QuantumExporter::new(info, QuantumType::Gray).unwrap();
    let stride = exporter.extent(21).unwrap();
    assert_eq!(stride, 3);

    let mut plane = vec![0_u8; stride * 3];
    for (y, chunk) in plane.chunks_exact_mut(stride).enumerate() {
        exporter.export(image.row(y).unwrap(), chunk).unwrap();
    }
    assert_eq!(hash(&bytes[1024..]), hash(&plane));

    let decoded = decode(&bytes);
    assert_eq!(decoded[0].indexes(), image.indexes());
}
