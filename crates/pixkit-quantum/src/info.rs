/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Configuration of a quantum export or import

use pixkit_core::bit_depth::ByteEndian;

use crate::codec::SampleCodec;
use crate::errors::QuantumErrors;
use crate::layout::QuantumType;

/// Numeric format of external samples
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum QuantumFormat {
    /// Unsigned integers scaled to the sample depth
    #[default]
    Unsigned,
    /// IEEE 754 floats, half for depth 16, single for 32 and double for 64.
    ///
    /// Other depths fall back to unsigned integers
    FloatingPoint
}

/// How 10 and 12 bit samples are laid out
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Packing {
    /// Samples are pushed through the bit packer back to back
    #[default]
    Contiguous,
    /// 10 bit samples go three to a big endian 32 bit word at bits
    /// `31:22`, `21:12` and `11:2`, regardless of the configured byte order.
    ///
    /// 12 bit samples are left justified in 16 bit words written
    /// in the configured byte order.
    Words
}

/// Size of the register used by the bit packer
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum PackingUnit {
    /// An 8 bit register filled from the most significant bit
    #[default]
    Byte,
    /// A 32 bit register filled from the least significant bit,
    /// emitted in the configured byte order once full
    Long
}

impl PackingUnit {
    /// Number of bits in the register
    pub const fn bits(self) -> u32 {
        match self {
            PackingUnit::Byte => 8,
            PackingUnit::Long => 32
        }
    }
}

/// Whether color samples are premultiplied by alpha in the external layout
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum QuantumAlpha {
    #[default]
    Unassociated,
    /// Color samples are multiplied by `alpha / QUANTUM_RANGE` on export
    /// and divided by it on import.
    ///
    /// Only applies to rows whose colorspace carries alpha
    Associated
}

/// Describes an external sample layout.
///
/// The structure is immutable for the duration of an export or import,
/// per call mutable bookkeeping lives in [`QuantumState`](crate::QuantumState).
///
/// # Example
/// 10 bit samples in big endian 32 bit words
/// ```
/// use pixkit_quantum::{Packing, QuantumInfo};
/// let info = QuantumInfo::new(10).set_packing(Packing::Words);
/// assert_eq!(info.depth(), 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuantumInfo {
    depth:        u32,
    format:       QuantumFormat,
    endian:       ByteEndian,
    packing:      Packing,
    unit:         PackingUnit,
    pad:          usize,
    minimum:      f64,
    maximum:      f64,
    alpha:        QuantumAlpha,
    min_is_white: bool
}

impl Default for QuantumInfo {
    fn default() -> Self {
        QuantumInfo::new(8)
    }
}

impl QuantumInfo {
    /// Create a configuration for unsigned big endian samples of `depth` bits
    pub const fn new(depth: u32) -> QuantumInfo {
        QuantumInfo {
            depth,
            format: QuantumFormat::Unsigned,
            endian: ByteEndian::BE,
            packing: Packing::Contiguous,
            unit: PackingUnit::Byte,
            pad: 0,
            minimum: 0.0,
            maximum: 1.0,
            alpha: QuantumAlpha::Unassociated,
            min_is_white: false
        }
    }

    pub const fn depth(&self) -> u32 {
        self.depth
    }
    pub const fn format(&self) -> QuantumFormat {
        self.format
    }
    pub const fn endian(&self) -> ByteEndian {
        self.endian
    }
    pub const fn packing(&self) -> Packing {
        self.packing
    }
    pub const fn unit(&self) -> PackingUnit {
        self.unit
    }
    /// Bytes skipped after every pixel
    pub const fn pad(&self) -> usize {
        self.pad
    }
    /// Values floating point samples map the canonical range onto
    pub const fn min_max(&self) -> (f64, f64) {
        (self.minimum, self.maximum)
    }
    pub const fn alpha(&self) -> QuantumAlpha {
        self.alpha
    }
    pub const fn min_is_white(&self) -> bool {
        self.min_is_white
    }

    pub fn set_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
    pub fn set_format(mut self, format: QuantumFormat) -> Self {
        self.format = format;
        self
    }
    pub fn set_endian(mut self, endian: ByteEndian) -> Self {
        self.endian = endian;
        self
    }
    pub fn set_packing(mut self, packing: Packing) -> Self {
        self.packing = packing;
        self
    }
    pub fn set_unit(mut self, unit: PackingUnit) -> Self {
        self.unit = unit;
        self
    }
    pub fn set_pad(mut self, pad: usize) -> Self {
        self.pad = pad;
        self
    }
    /// Set the values floating point samples take for canonical
    /// zero and canonical full range
    pub fn set_min_max(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }
    pub fn set_alpha_association(mut self, alpha: QuantumAlpha) -> Self {
        self.alpha = alpha;
        self
    }
    /// Invert the meaning of bits for 1 bit gray samples,
    /// a set bit then means black
    pub fn set_min_is_white(mut self, yes: bool) -> Self {
        self.min_is_white = yes;
        self
    }

    /// Check the configuration can be used
    ///
    /// Depths 1 through 32 and 64 are supported
    pub fn validate(&self) -> Result<(), QuantumErrors> {
        if !matches!(self.depth, 1..=32 | 64) {
            return Err(QuantumErrors::UnsupportedDepth(self.depth));
        }
        Ok(())
    }

    /// Number of bytes an export of `number_pixels` pixels in `quantum_type`
    /// layout produces, which is also the number an import consumes
    pub fn extent(
        &self, quantum_type: QuantumType, number_pixels: usize
    ) -> Result<usize, QuantumErrors> {
        self.validate()?;
        SampleCodec::select(self, quantum_type).extent(self, quantum_type, number_pixels)
    }
}

#[cfg(test)]
mod tests {
    use crate::{QuantumErrors, QuantumInfo, QuantumType};

    #[test]
    fn depth_validation() {
        for depth in [1, 2, 4, 8, 10, 12, 16, 24, 32, 64] {
            assert!(QuantumInfo::new(depth).validate().is_ok(), "{depth}");
        }
        for depth in [0, 33, 48, 65] {
            assert!(matches!(
                QuantumInfo::new(depth).validate(),
                Err(QuantumErrors::UnsupportedDepth(d)) if d == depth
            ));
        }
    }

    #[test]
    fn byte_extents() {
        let info = QuantumInfo::new(8);
        assert_eq!(info.extent(QuantumType::RGB, 5).unwrap(), 15);
        assert_eq!(info.set_pad(2).extent(QuantumType::RGBA, 3).unwrap(), 18);
        assert_eq!(QuantumInfo::new(16).extent(QuantumType::CMYKA, 2).unwrap(), 20);
    }
}
