/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_image::{Pixel, PixelRow, PixelRowMut};
use pixkit_quantum::{QuantumExporter, QuantumImporter};

use crate::{gradient, hash, layouts};

const WIDTH: usize = 8;

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_layout_round_trips() {
    let pixels = gradient(WIDTH);

    let mut error = false;
    let mut failed = Vec::new();

    for entry in layouts() {
        let quantum_type = entry.layout.to_quantum_type();
        let exporter = QuantumExporter::new(entry.info(), quantum_type).unwrap();
        let importer = QuantumImporter::new(entry.info(), quantum_type).unwrap();

        let extent = exporter.extent(WIDTH).unwrap();
        assert_eq!(extent, importer.extent(WIDTH).unwrap(), "{}", entry.name);

        let mut first = vec![0_u8; extent];
        let written = exporter.export(PixelRow::new(&pixels), &mut first).unwrap();
        assert_eq!(written, extent, "{}", entry.name);

        let mut back = vec![Pixel::default(); WIDTH];
        let consumed = importer
            .import(&first, &mut PixelRowMut::new(&mut back))
            .unwrap();
        assert_eq!(consumed, extent, "{}", entry.name);

        // samples that went through the layout once must survive it unchanged
        let mut second = vec![0_u8; extent];
        exporter.export(PixelRow::new(&back), &mut second).unwrap();

        if hash(&first) != hash(&second) {
            error = true;
            failed.push(entry.to_owned());
            eprintln!(
                "Round trip mismatch for layout {}\nFirst {:?}\nSecond {:?}\n",
                entry.name, first, second
            );
        }
    }
    if error {
        panic!("Errors found during layout round trips\n {:#?}", failed);
    }
}

#[test]
fn test_export_is_deterministic() {
    let pixels = gradient(WIDTH);

    for entry in layouts() {
        let exporter = QuantumExporter::new(entry.info(), entry.layout.to_quantum_type()).unwrap();
        let extent = exporter.extent(WIDTH).unwrap();

        let mut first = vec![0xAA_u8; extent];
        let mut second = vec![0x55_u8; extent];

        exporter.export(PixelRow::new(&pixels), &mut first).unwrap();
        exporter.export(PixelRow::new(&pixels), &mut second).unwrap();

        // every byte of the extent is written, whatever was there before
        assert_eq!(hash(&first), hash(&second), "{}", entry.name);
    }
}
