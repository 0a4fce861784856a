/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Interleave patterns understood by the exporter and importer

/// A single sample taken from, or stored into, a canonical pixel
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    /// Red, or cyan for CMYK images
    Red,
    /// Green, or magenta for CMYK images
    Green,
    /// Blue, or yellow for CMYK images
    Blue,
    /// `QUANTUM_RANGE - opacity`
    Alpha,
    Opacity,
    /// Black of a CMYK image, kept in the index plane
    Black,
    /// Rec. 709 luma on export, written to red, green and blue on import
    Gray,
    /// Raw colormap index, never scaled
    Index
}

/// What a source or destination row must be for a layout
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Requirement {
    None,
    Colormapped,
    ColorSeparated
}

/// The interleave pattern of samples in an external buffer
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum QuantumType {
    Alpha,
    Opacity,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    Black,
    Gray,
    GrayAlpha,
    RGB,
    RGBA,
    RGBO,
    BGR,
    BGRA,
    BGRO,
    CMYK,
    CMYKA,
    CMYKO,
    Index,
    IndexAlpha,
    /// Chroma blue, luma, chroma red of a YCbCr image
    /// (whose luma is stored in red and chroma blue in green)
    CbYCr,
    CbYCrA,
    /// 4:2:2 chroma subsampling, each pair of pixels becomes
    /// chroma blue, first luma, chroma red, second luma.
    ///
    /// Chroma comes from the first pixel of the pair, an odd trailing pixel
    /// is paired with itself.
    CbYCrY
}

impl QuantumType {
    /// Every layout
    pub const ALL: [QuantumType; 25] = [
        QuantumType::Alpha,
        QuantumType::Opacity,
        QuantumType::Red,
        QuantumType::Green,
        QuantumType::Blue,
        QuantumType::Cyan,
        QuantumType::Magenta,
        QuantumType::Yellow,
        QuantumType::Black,
        QuantumType::Gray,
        QuantumType::GrayAlpha,
        QuantumType::RGB,
        QuantumType::RGBA,
        QuantumType::RGBO,
        QuantumType::BGR,
        QuantumType::BGRA,
        QuantumType::BGRO,
        QuantumType::CMYK,
        QuantumType::CMYKA,
        QuantumType::CMYKO,
        QuantumType::Index,
        QuantumType::IndexAlpha,
        QuantumType::CbYCr,
        QuantumType::CbYCrA,
        QuantumType::CbYCrY
    ];

    /// Samples making up one group of the layout, in storage order.
    ///
    /// A group is one pixel for every layout but [`CbYCrY`](QuantumType::CbYCrY),
    /// whose group is a pair of pixels.
    pub const fn channels(self) -> &'static [Channel] {
        use Channel::*;

        match self {
            QuantumType::Alpha => &[Alpha],
            QuantumType::Opacity => &[Opacity],
            QuantumType::Red | QuantumType::Cyan => &[Red],
            QuantumType::Green | QuantumType::Magenta => &[Green],
            QuantumType::Blue | QuantumType::Yellow => &[Blue],
            QuantumType::Black => &[Black],
            QuantumType::Gray => &[Gray],
            QuantumType::GrayAlpha => &[Gray, Alpha],
            QuantumType::RGB => &[Red, Green, Blue],
            QuantumType::RGBA => &[Red, Green, Blue, Alpha],
            QuantumType::RGBO => &[Red, Green, Blue, Opacity],
            QuantumType::BGR => &[Blue, Green, Red],
            QuantumType::BGRA => &[Blue, Green, Red, Alpha],
            QuantumType::BGRO => &[Blue, Green, Red, Opacity],
            QuantumType::CMYK => &[Red, Green, Blue, Black],
            QuantumType::CMYKA => &[Red, Green, Blue, Black, Alpha],
            QuantumType::CMYKO => &[Red, Green, Blue, Black, Opacity],
            QuantumType::Index => &[Index],
            QuantumType::IndexAlpha => &[Index, Alpha],
            // red and green trade places
            QuantumType::CbYCr => &[Green, Red, Blue],
            QuantumType::CbYCrA => &[Green, Red, Blue, Alpha],
            // second red is the luma of the second pixel
            QuantumType::CbYCrY => &[Green, Red, Blue, Red]
        }
    }

    /// Number of pixels consumed per group
    pub const fn pixels_per_group(self) -> usize {
        match self {
            QuantumType::CbYCrY => 2,
            _ => 1
        }
    }

    /// Number of groups covering `number_pixels` pixels
    pub const fn groups(self, number_pixels: usize) -> usize {
        number_pixels.div_ceil(self.pixels_per_group())
    }

    pub(crate) const fn requirement(self) -> Requirement {
        match self {
            QuantumType::Index | QuantumType::IndexAlpha => Requirement::Colormapped,
            QuantumType::Black | QuantumType::CMYK | QuantumType::CMYKA | QuantumType::CMYKO => {
                Requirement::ColorSeparated
            }
            _ => Requirement::None
        }
    }
}
