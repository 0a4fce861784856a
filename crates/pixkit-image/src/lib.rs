/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The canonical image representation of the pixkit family.
//!
//! Every decoder produces and every encoder consumes an [`Image`]: a grid of
//! [`Pixel`]s kept at a fixed internal precision ([`Quantum`], 16 bits),
//! an optional index plane for palette backed and CMYK images and an
//! optional colormap.
//!
//! Codecs never touch the storage directly, they borrow one row at a
//! time through [`PixelRow`] and [`PixelRowMut`].
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use errors::ImageErrors;
pub use image::Image;
pub use pixel::{IndexPacket, Pixel};
pub use quantum::*;
pub use row::{PixelRow, PixelRowMut};

mod errors;
mod image;
mod pixel;
mod quantum;
mod row;
