/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::fs::read;
use std::path::{Path, PathBuf};

use pixkit_core::bit_depth::ByteEndian;
use pixkit_image::{Pixel, QUANTUM_RANGE};
use pixkit_quantum::{Packing, PackingUnit, QuantumFormat, QuantumInfo, QuantumType};
use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

mod quantum;
mod viff;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonQuantumType {
    Red,
    Alpha,
    Gray,
    GrayAlpha,
    RGB,
    RGBA,
    RGBO,
    BGR,
    BGRA,
    CbYCr,
    CbYCrY
}

impl JsonQuantumType {
    pub fn to_quantum_type(self) -> QuantumType {
        match self {
            Self::Red => QuantumType::Red,
            Self::Alpha => QuantumType::Alpha,
            Self::Gray => QuantumType::Gray,
            Self::GrayAlpha => QuantumType::GrayAlpha,
            Self::RGB => QuantumType::RGB,
            Self::RGBA => QuantumType::RGBA,
            Self::RGBO => QuantumType::RGBO,
            Self::BGR => QuantumType::BGR,
            Self::BGRA => QuantumType::BGRA,
            Self::CbYCr => QuantumType::CbYCr,
            Self::CbYCrY => QuantumType::CbYCrY
        }
    }
}

/// One external sample layout exercised by the quantum tests
#[derive(Clone, Deserialize, Debug)]
pub struct LayoutEntry {
    pub name:         String,
    pub layout:       JsonQuantumType,
    pub depth:        u32,
    #[serde(default)]
    pub float:        bool,
    #[serde(default)]
    pub little:       bool,
    #[serde(default)]
    pub words:        bool,
    #[serde(default)]
    pub long_unit:    bool,
    #[serde(default)]
    pub pad:          usize,
    #[serde(default)]
    pub min_is_white: bool,
    pub comment:      Option<String>
}

impl LayoutEntry {
    pub fn info(&self) -> QuantumInfo {
        let mut info = QuantumInfo::new(self.depth)
            .set_pad(self.pad)
            .set_min_is_white(self.min_is_white);

        if self.float {
            info = info.set_format(QuantumFormat::FloatingPoint);
        }
        if self.little {
            info = info.set_endian(ByteEndian::LE);
        }
        if self.words {
            info = info.set_packing(Packing::Words);
        }
        if self.long_unit {
            info = info.set_unit(PackingUnit::Long);
        }
        info
    }
}

pub fn layouts() -> Vec<LayoutEntry> {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/layouts.json");
    let json_file = read(file).unwrap();

    serde_json::from_slice(&json_file).unwrap()
}

/// A row of `width` pixels walking every channel through the range
pub fn gradient(width: usize) -> Vec<Pixel> {
    (0..width)
        .map(|x| {
            let step = (x as u32 * u32::from(QUANTUM_RANGE) / (width as u32 - 1)) as u16;
            Pixel::with_alpha(step, QUANTUM_RANGE - step, step / 2, QUANTUM_RANGE - step / 3)
        })
        .collect()
}

/// Canonical pixels as bytes, for hashing
pub fn pixel_bytes(pixels: &[Pixel]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|p| [p.red, p.green, p.blue, p.opacity])
        .flat_map(u16::to_le_bytes)
        .collect()
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
