/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_core::colorspace::ColorSpace;
use pixkit_image::{Pixel, PixelRow, PixelRowMut, QUANTUM_RANGE};
use pixkit_quantum::{
    export_quantum_pixels, import_quantum_pixels, Channel, Packing, QuantumErrors,
    QuantumExporter, QuantumImporter, QuantumInfo, QuantumType
};

fn row_for<'a>(
    quantum_type: QuantumType, pixels: &'a [Pixel], indexes: &'a [u16], colormap: &'a [Pixel]
) -> PixelRow<'a> {
    let row = PixelRow::new(pixels);

    match quantum_type {
        QuantumType::Index | QuantumType::IndexAlpha => {
            row.with_indexes(indexes).with_colormap(colormap)
        }
        QuantumType::Black
        | QuantumType::Cyan
        | QuantumType::Magenta
        | QuantumType::Yellow
        | QuantumType::CMYK
        | QuantumType::CMYKA
        | QuantumType::CMYKO => row.with_indexes(indexes).with_colorspace(ColorSpace::CMYKA),
        _ => row.with_colorspace(ColorSpace::RGBA)
    }
}

#[test]
fn direct_color_example() {
    let pixels = [Pixel::new(QUANTUM_RANGE, 0, 0), Pixel::new(0, QUANTUM_RANGE, 0)];
    let mut out = [0_u8; 8];

    let written = export_quantum_pixels(
        &QuantumInfo::new(8),
        QuantumType::RGBA,
        PixelRow::new(&pixels),
        &mut out
    )
    .unwrap();

    assert_eq!(written, 8);
    assert_eq!(out, [0xFF, 0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF]);
}

#[test]
fn every_layout_writes_its_extent() {
    let pixels = [
        Pixel::with_alpha(1000, 2000, 3000, 4000),
        Pixel::with_alpha(5000, 6000, 7000, 8000),
        Pixel::with_alpha(9000, 10000, 11000, 12000)
    ];
    let indexes = [1, 0, 1];
    let colormap = [Pixel::gray(0), Pixel::gray(QUANTUM_RANGE)];

    for quantum_type in QuantumType::ALL {
        for depth in [1, 3, 8, 10, 12, 16, 32, 64] {
            let info = QuantumInfo::new(depth);
            let exporter = QuantumExporter::new(info, quantum_type).unwrap();
            let importer = QuantumImporter::new(info, quantum_type).unwrap();

            let extent = exporter.extent(pixels.len()).unwrap();
            let mut out = vec![0_u8; extent];

            let row = row_for(quantum_type, &pixels, &indexes, &colormap);
            let written = exporter.export(row, &mut out).unwrap();
            assert_eq!(written, extent, "{quantum_type:?} at depth {depth}");

            let mut back = pixels;
            let mut back_indexes = indexes;
            let mut target = PixelRowMut::new(&mut back)
                .with_indexes(&mut back_indexes)
                .with_colorspace(row.colorspace);
            if matches!(quantum_type, QuantumType::Index | QuantumType::IndexAlpha) {
                target = target.with_colormap(&colormap);
            }
            let consumed = importer.import(&out, &mut target).unwrap();
            assert_eq!(consumed, extent, "{quantum_type:?} at depth {depth}");
        }
    }
}

/// Largest difference a `depth` bit round trip may introduce
fn step(depth: u32) -> u16 {
    if depth >= 16 {
        1
    } else {
        (u32::from(QUANTUM_RANGE) / ((1 << depth) - 1) / 2 + 1) as u16
    }
}

#[test]
fn every_layout_round_trips_within_a_step() {
    // the first two pixels share chroma so a 4:2:2 pair keeps them intact
    let colored = [
        Pixel::with_alpha(1000, 52000, 30000, 4000),
        Pixel::with_alpha(17000, 52000, 30000, 60000),
        Pixel::with_alpha(QUANTUM_RANGE, 123, 45678, 0)
    ];
    let gray = colored.map(|p| Pixel {
        opacity: p.opacity,
        ..Pixel::gray(p.red)
    });
    let indexes = [1, 0, 1];
    let colormap = [Pixel::gray(0), Pixel::gray(QUANTUM_RANGE)];

    for quantum_type in QuantumType::ALL {
        let channels = quantum_type.channels();
        let pixels = if channels.contains(&Channel::Gray) {
            gray
        } else {
            colored
        };

        for depth in [1, 3, 8, 10, 12, 16, 32, 64] {
            for packing in [Packing::Contiguous, Packing::Words] {
                let info = QuantumInfo::new(depth).set_packing(packing);
                let exporter = QuantumExporter::new(info, quantum_type).unwrap();
                let importer = QuantumImporter::new(info, quantum_type).unwrap();

                let row = row_for(quantum_type, &pixels, &indexes, &colormap);
                let mut out = vec![0_u8; exporter.extent(pixels.len()).unwrap()];
                exporter.export(row, &mut out).unwrap();

                let mut back = [Pixel::default(); 3];
                let mut back_indexes = [0_u16; 3];
                {
                    let mut target = PixelRowMut::new(&mut back)
                        .with_indexes(&mut back_indexes)
                        .with_colorspace(row.colorspace);
                    if matches!(quantum_type, QuantumType::Index | QuantumType::IndexAlpha) {
                        target = target.with_colormap(&colormap);
                    }
                    importer.import(&out, &mut target).unwrap();
                }

                let tolerance = step(depth);

                for (x, (a, b)) in pixels.iter().zip(&back).enumerate() {
                    let chroma = if quantum_type == QuantumType::CbYCrY {
                        pixels[x - x % 2]
                    } else {
                        *a
                    };
                    let context = format!("{quantum_type:?} depth {depth} {packing:?} pixel {x}");

                    for channel in channels {
                        let (expected, actual) = match channel {
                            Channel::Red | Channel::Gray => (a.red, b.red),
                            Channel::Green => (chroma.green, b.green),
                            Channel::Blue => (chroma.blue, b.blue),
                            Channel::Alpha => (a.alpha(), b.alpha()),
                            Channel::Opacity => (a.opacity, b.opacity),
                            Channel::Black => (indexes[x], back_indexes[x]),
                            Channel::Index => {
                                assert_eq!(back_indexes[x], indexes[x], "{context}");
                                (colormap[usize::from(indexes[x])].red, b.red)
                            }
                        };
                        assert!(
                            expected.abs_diff(actual) <= tolerance,
                            "{context} {channel:?}: {expected} became {actual}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn index_layouts_need_a_colormap() {
    let pixels = [Pixel::default(); 2];
    let mut out = [0_u8; 2];

    let err = export_quantum_pixels(
        &QuantumInfo::new(8),
        QuantumType::Index,
        PixelRow::new(&pixels),
        &mut out
    )
    .unwrap_err();

    assert!(matches!(
        err,
        QuantumErrors::ColormappedImageRequired(QuantumType::Index)
    ));
}

#[test]
fn import_only_touches_named_channels() {
    let mut pixels = [Pixel::with_alpha(1, 2, 3, 4); 2];

    import_quantum_pixels(
        &QuantumInfo::new(8),
        QuantumType::Green,
        &[0xFF, 0x00],
        PixelRowMut::new(&mut pixels)
    )
    .unwrap();

    assert_eq!(pixels[0], Pixel::with_alpha(1, QUANTUM_RANGE, 3, 4));
    assert_eq!(pixels[1], Pixel::with_alpha(1, 0, 3, 4));
}
