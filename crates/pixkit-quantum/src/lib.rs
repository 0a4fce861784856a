/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Quantum pixel export and import
//!
//! This crate converts rows of canonical pixels to and from external sample
//! layouts. A layout is described by a handful of orthogonal parameters:
//!
//! - the interleave pattern, a [`QuantumType`] such as RGB, BGRA, CMYK or Index
//! - the sample depth, 1 to 32 bits or 64 bits
//! - the numeric format, unsigned integer or IEEE float (half, single, double)
//! - the byte order
//! - the packing of 10 and 12 bit samples ([`Packing`])
//! - a per pixel pad
//!
//! all collected in a [`QuantumInfo`].
//!
//! # Example
//! Export two pixels as 8 bit RGBA
//! ```
//! use pixkit_image::{Pixel, PixelRow, QUANTUM_RANGE};
//! use pixkit_quantum::{export_quantum_pixels, QuantumInfo, QuantumType};
//!
//! let pixels = [Pixel::new(QUANTUM_RANGE, 0, 0), Pixel::new(0, QUANTUM_RANGE, 0)];
//! let info = QuantumInfo::new(8);
//! let mut out = [0_u8; 8];
//!
//! let written =
//!     export_quantum_pixels(&info, QuantumType::RGBA, PixelRow::new(&pixels), &mut out).unwrap();
//!
//! assert_eq!(written, 8);
//! assert_eq!(out, [0xFF, 0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF]);
//! ```
//!
//! Rows are independent, every call starts from a fresh [`QuantumState`]
//! so rows may be converted in any order or in parallel.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use bits::{BitPacker, BitUnpacker};
pub use errors::QuantumErrors;
pub use export::{export_quantum_pixels, QuantumExporter};
pub use import::{import_quantum_pixels, QuantumImporter};
pub use info::{Packing, PackingUnit, QuantumAlpha, QuantumFormat, QuantumInfo};
pub use layout::{Channel, QuantumType};
pub use state::QuantumState;

mod bits;
mod codec;
mod errors;
mod export;
mod import;
mod info;
mod layout;
mod state;
