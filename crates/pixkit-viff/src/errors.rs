/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding
use core::fmt::{Debug, Display, Formatter};

use pixkit_core::bytestream::ByteIoError;
use pixkit_core::colorspace::ColorSpace;
use pixkit_image::ImageErrors;
use pixkit_quantum::QuantumErrors;

/// Broad classification of a decoding failure
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The data is not a VIFF stream, another decoder may accept it
    FormatMismatch,
    /// A header field is outside its valid set, or the declared
    /// sizes do not fit the stream
    CorruptHeader,
    /// The header is valid but describes something not implemented
    UnsupportedFeature,
    /// A limit was exceeded, the whole decode is aborted
    ResourceExhaustion,
    /// The stream ended in the middle of a sub-image
    Truncation,
    /// The progress callback asked to stop
    Cancelled
}

/// Possible errors that may occur during decoding
pub enum ViffDecodeErrors {
    /// The first byte is not the VIFF magic `0xAB`, `None` for an empty stream
    WrongMagicBytes(Option<u8>),
    /// Band count outside `1..=4`
    InvalidBandCount(u32),
    InvalidStorageType(u32),
    InvalidMapStorageType(u32),
    InvalidColorModel(u32),
    /// Map columns of zero or above 65536
    InvalidMapColumns(u32),
    /// width, height
    ZeroDimensions(usize, usize),
    /// Only raw data is supported
    UnsupportedEncodeScheme(u32),
    UnsupportedMapScheme(u32),
    /// Only implicit pixel addressing is supported
    UnsupportedLocationType(u32),
    /// Only one image per header is supported
    UnsupportedImageCount(u32),
    /// The header declares more data than the stream holds
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes the header declares
    /// - 2nd argument is the number of bytes left in the stream
    InsufficientData(u64, u64),
    /// A byte other than the magic follows a sub-image, only raised in strict mode
    TrailingBytes(u8),
    /// Dimension name, configured maximum, value found
    TooLargeDimensions(&'static str, usize, usize),
    /// Row at which the progress callback asked to stop
    Cancelled(usize),
    ImageErrors(ImageErrors),
    QuantumErrors(QuantumErrors),
    IoErrors(ByteIoError)
}

impl ViffDecodeErrors {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ViffDecodeErrors::WrongMagicBytes(_) => ErrorKind::FormatMismatch,
            ViffDecodeErrors::InvalidBandCount(_)
            | ViffDecodeErrors::InvalidStorageType(_)
            | ViffDecodeErrors::InvalidMapStorageType(_)
            | ViffDecodeErrors::InvalidColorModel(_)
            | ViffDecodeErrors::InvalidMapColumns(_)
            | ViffDecodeErrors::ZeroDimensions(..)
            | ViffDecodeErrors::InsufficientData(..)
            | ViffDecodeErrors::TrailingBytes(_)
            | ViffDecodeErrors::QuantumErrors(_) => ErrorKind::CorruptHeader,
            ViffDecodeErrors::UnsupportedEncodeScheme(_)
            | ViffDecodeErrors::UnsupportedMapScheme(_)
            | ViffDecodeErrors::UnsupportedLocationType(_)
            | ViffDecodeErrors::UnsupportedImageCount(_) => ErrorKind::UnsupportedFeature,
            ViffDecodeErrors::TooLargeDimensions(..) => ErrorKind::ResourceExhaustion,
            ViffDecodeErrors::ImageErrors(err) => match err {
                ImageErrors::DimensionsTooLarge(..) | ImageErrors::ColormapTooLarge(_) => {
                    ErrorKind::ResourceExhaustion
                }
                _ => ErrorKind::CorruptHeader
            },
            ViffDecodeErrors::Cancelled(_) => ErrorKind::Cancelled,
            ViffDecodeErrors::IoErrors(_) => ErrorKind::Truncation
        }
    }
}

impl Debug for ViffDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ViffDecodeErrors::WrongMagicBytes(Some(byte)) => {
                writeln!(f, "Wrong magic byte {byte:#04X}, expected 0xAB as image start")
            }
            ViffDecodeErrors::WrongMagicBytes(None) => {
                writeln!(f, "Empty stream, expected 0xAB as image start")
            }
            ViffDecodeErrors::InvalidBandCount(bands) => {
                writeln!(f, "Invalid number of data bands {bands}, expected 1 to 4")
            }
            ViffDecodeErrors::InvalidStorageType(value) => {
                writeln!(f, "Invalid data storage type {value}")
            }
            ViffDecodeErrors::InvalidMapStorageType(value) => {
                writeln!(f, "Invalid map storage type {value}")
            }
            ViffDecodeErrors::InvalidColorModel(value) => {
                writeln!(f, "Invalid color space model {value}")
            }
            ViffDecodeErrors::InvalidMapColumns(value) => {
                writeln!(f, "Invalid number of map columns {value}, expected 1 to 65536")
            }
            ViffDecodeErrors::ZeroDimensions(width, height) => {
                writeln!(f, "Image dimensions cannot be zero, got {width}x{height}")
            }
            ViffDecodeErrors::UnsupportedEncodeScheme(value) => {
                writeln!(f, "Data encoding scheme {value} is not supported, only raw data is")
            }
            ViffDecodeErrors::UnsupportedMapScheme(value) => {
                writeln!(f, "Map scheme {value} is not supported")
            }
            ViffDecodeErrors::UnsupportedLocationType(value) => {
                writeln!(f, "Location type {value} is not supported, only implicit is")
            }
            ViffDecodeErrors::UnsupportedImageCount(value) => {
                writeln!(f, "Number of images {value} is not supported, expected 1")
            }
            ViffDecodeErrors::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data, header declares {expected} bytes but remaining stream has {found}"
                )
            }
            ViffDecodeErrors::TrailingBytes(byte) => {
                writeln!(f, "Unexpected byte {byte:#04X} after image data")
            }
            ViffDecodeErrors::TooLargeDimensions(name, max, found) => {
                writeln!(f, "Image {name} {found} greater than max configured {name} {max}")
            }
            ViffDecodeErrors::Cancelled(row) => {
                writeln!(f, "Decoding cancelled at row {row}")
            }
            ViffDecodeErrors::ImageErrors(err) => {
                writeln!(f, "Image error {err:?}")
            }
            ViffDecodeErrors::QuantumErrors(err) => {
                writeln!(f, "Quantum error {err:?}")
            }
            ViffDecodeErrors::IoErrors(err) => {
                writeln!(f, "I/O error {err:?}")
            }
        }
    }
}

impl Display for ViffDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl From<ByteIoError> for ViffDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        ViffDecodeErrors::IoErrors(value)
    }
}

impl From<ImageErrors> for ViffDecodeErrors {
    fn from(value: ImageErrors) -> Self {
        ViffDecodeErrors::ImageErrors(value)
    }
}

impl From<QuantumErrors> for ViffDecodeErrors {
    fn from(value: QuantumErrors) -> Self {
        ViffDecodeErrors::QuantumErrors(value)
    }
}

/// Errors encountered during encoding
pub enum ViffEncodeErrors {
    /// No frames were given
    NoFrames,
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// A dimension does not fit the 32 bit header field
    TooLargeDimensions(usize),
    /// Row at which the progress callback asked to stop
    Cancelled(usize),
    ImageErrors(ImageErrors),
    QuantumErrors(QuantumErrors),
    IoError(ByteIoError)
}

impl Debug for ViffEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ViffEncodeErrors::NoFrames => {
                writeln!(f, "No frames to encode")
            }
            ViffEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into VIFF, supported ones are {supported:?}")
            }
            ViffEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, VIFF can only encode images less than {}",
                    u32::MAX
                )
            }
            ViffEncodeErrors::Cancelled(row) => {
                writeln!(f, "Encoding cancelled at row {row}")
            }
            ViffEncodeErrors::ImageErrors(err) => {
                writeln!(f, "Image error {err:?}")
            }
            ViffEncodeErrors::QuantumErrors(err) => {
                writeln!(f, "Quantum error {err:?}")
            }
            ViffEncodeErrors::IoError(v) => {
                writeln!(f, "I/O error {:?}", v)
            }
        }
    }
}

impl Display for ViffEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ViffEncodeErrors {}

#[cfg(feature = "std")]
impl std::error::Error for ViffDecodeErrors {}

impl From<ByteIoError> for ViffEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        Self::IoError(value)
    }
}

impl From<ImageErrors> for ViffEncodeErrors {
    fn from(value: ImageErrors) -> Self {
        Self::ImageErrors(value)
    }
}

impl From<QuantumErrors> for ViffEncodeErrors {
    fn from(value: QuantumErrors) -> Self {
        Self::QuantumErrors(value)
    }
}
