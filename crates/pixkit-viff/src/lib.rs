/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A Khoros VIFF decoder and encoder
//!
//! VIFF files carry one or more chained sub-images, each a fixed 1024 byte
//! header followed by an optional colormap and planar sample bands.
//!
//! The decoder understands
//! - bit, 8, 16 and 32 bit integer, and 32/64 bit float samples in either byte order
//! - one or two bands of gray levels or colormap indexes
//! - three bands of direct color, four with alpha
//! - a stored colormap of any map storage type
//!
//! The encoder picks the smallest of bilevel, gray, colormapped and
//! direct color representations for every frame.
//!
//! # Example
//! ```
//! use pixkit_core::bytestream::ByteCursor;
//! use pixkit_core::colorspace::ColorSpace;
//! use pixkit_image::{Image, Pixel};
//! use pixkit_viff::{ViffDecoder, ViffEncoder};
//!
//! let pixels = vec![Pixel::new(65535, 0, 0); 4];
//! let image = Image::from_pixels(2, 2, ColorSpace::RGB, pixels).unwrap();
//!
//! let mut bytes = vec![];
//! ViffEncoder::new(&[image.clone()]).encode(&mut bytes).unwrap();
//!
//! let frames = ViffDecoder::new(ByteCursor::new(&bytes)).decode().unwrap();
//! assert_eq!(frames, vec![image]);
//! ```
//!
//! # Features
//! - `std`: Enables `std::error::Error` impls and `std::io` backed streams
//! - `log`: Routes header and anomaly logging to the `log` crate
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use pixkit_core;
pub use pixkit_image;

pub use decoder::ViffDecoder;
pub use encoder::ViffEncoder;
pub use errors::*;
pub use header::{FrameLayout, ViffHeader};

pub mod constants;
mod decoder;
mod encoder;
mod errors;
mod header;

/// Return true if `bytes` start like a VIFF image file
///
/// Checks the magic byte and the file type
///
/// # Example
/// ```
/// assert!(pixkit_viff::probe_viff(&[0xAB, 1, 1, 3]));
/// assert!(!pixkit_viff::probe_viff(b"P6\n"));
/// ```
pub fn probe_viff(bytes: &[u8]) -> bool {
    matches!(
        bytes,
        [constants::VIFF_MAGIC, constants::VFF_FILE_TYPE_IMAGE, ..]
    )
}
