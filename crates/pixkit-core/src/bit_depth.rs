/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image bit depth and byte order information

/// The bit depth of canonical image samples.
///
/// Raster formats store samples at many widths (1 bit up to 64 bit floats),
/// decoders widen them to one of these depths when handing pixels out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Samples use the whole range from 0-255.
    Eight,
    /// Sixteen bit depth
    ///
    /// Samples use [`u16`] storage and the whole range i.e 0-65535
    ///
    /// This is the canonical depth pixkit images are kept at
    Sixteen,
    /// Bit depth information is unknown
    #[default]
    Unknown
}

impl BitDepth {
    /// Get the max value supported by the bit depth
    ///
    /// During conversion from one bit depth to another
    /// larger values should be clamped to this value
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => (1 << 8) - 1,
            Self::Sixteen => u16::MAX,
            Self::Unknown => 0
        }
    }

    /// Number of bits in a sample of this depth
    pub const fn bits(self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::Unknown => 0
        }
    }

    /// Get the number of bytes needed to store a sample of this depth
    ///
    /// # Example
    /// ```
    /// use pixkit_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::Sixteen.size_of(), 2);
    /// ```
    pub const fn size_of(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
            Self::Unknown => 0
        }
    }
}

/// Byte order of multi-byte values in a stream
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ByteEndian {
    /// Most significant byte first
    #[default]
    BE,
    /// Least significant byte first
    LE
}

impl ByteEndian {
    /// The byte order of the machine we are running on
    pub const fn native() -> ByteEndian {
        if cfg!(target_endian = "little") {
            ByteEndian::LE
        } else {
            ByteEndian::BE
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bit_depth::{BitDepth, ByteEndian};

    #[test]
    fn max_values() {
        assert_eq!(BitDepth::Eight.max_value(), 255);
        assert_eq!(BitDepth::Sixteen.max_value(), 65535);
        assert_eq!(BitDepth::Unknown.max_value(), 0);
    }

    #[test]
    fn native_endian_matches_target() {
        let expected = if u16::from_ne_bytes([1, 0]) == 1 {
            ByteEndian::LE
        } else {
            ByteEndian::BE
        };
        assert_eq!(ByteEndian::native(), expected);
    }
}
