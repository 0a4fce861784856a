/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors raised when building or modifying an [`Image`](crate::Image)
pub enum ImageErrors {
    /// width, height
    ZeroDimensions(usize, usize),
    /// width, height
    DimensionsTooLarge(usize, usize),
    /// number of entries requested
    ColormapTooLarge(usize),
    EmptyColormap,
    /// expected, found
    PixelCountMismatch(usize, usize),
    /// row, height
    RowOutOfBounds(usize, usize)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageErrors::ZeroDimensions(width, height) => {
                writeln!(f, "Image dimensions cannot be zero, got {width}x{height}")
            }
            ImageErrors::DimensionsTooLarge(width, height) => {
                writeln!(
                    f,
                    "Image dimensions {width}x{height} overflow the addressable pixel count"
                )
            }
            ImageErrors::ColormapTooLarge(entries) => {
                writeln!(
                    f,
                    "Colormap of {entries} entries exceeds the maximum of {}",
                    crate::Image::MAX_COLORMAP_SIZE
                )
            }
            ImageErrors::EmptyColormap => {
                writeln!(f, "Colormap must contain at least one entry")
            }
            ImageErrors::PixelCountMismatch(expected, found) => {
                writeln!(f, "Expected {expected} pixels but found {found}")
            }
            ImageErrors::RowOutOfBounds(row, height) => {
                writeln!(f, "Row {row} is out of bounds for an image of height {height}")
            }
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ImageErrors {}
