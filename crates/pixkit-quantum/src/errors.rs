/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use crate::layout::QuantumType;

/// Errors raised while exporting or importing pixels
pub enum QuantumErrors {
    /// The layout reads or writes colormap indexes but the row has no colormap
    ColormappedImageRequired(QuantumType),
    /// The layout carries a black channel but the row is not CMYK
    ColorSeparatedImageRequired(QuantumType),
    /// The layout needs an index plane the row does not have
    MissingIndexes(QuantumType),
    UnsupportedDepth(u32),
    /// expected, found
    TooSmallBuffer(usize, usize),
    /// pixels, indexes
    RowMismatch(usize, usize),
    /// The byte count of the row does not fit in a `usize`
    ExtentOverflow(usize)
}

impl Debug for QuantumErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QuantumErrors::ColormappedImageRequired(layout) => {
                writeln!(f, "Colormapped image required for {layout:?} samples")
            }
            QuantumErrors::ColorSeparatedImageRequired(layout) => {
                writeln!(f, "Color separated (CMYK) image required for {layout:?} samples")
            }
            QuantumErrors::MissingIndexes(layout) => {
                writeln!(f, "Row has no index plane, needed for {layout:?} samples")
            }
            QuantumErrors::UnsupportedDepth(depth) => {
                writeln!(
                    f,
                    "Unsupported sample depth {depth}, expected 1 to 32 or 64 bits"
                )
            }
            QuantumErrors::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Too small buffer, expected at least {expected} bytes but found {found}"
                )
            }
            QuantumErrors::RowMismatch(pixels, indexes) => {
                writeln!(
                    f,
                    "Index row has {indexes} entries, but the pixel row has {pixels}"
                )
            }
            QuantumErrors::ExtentOverflow(pixels) => {
                writeln!(f, "Byte count of {pixels} pixels overflows")
            }
        }
    }
}

impl Display for QuantumErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QuantumErrors {}
