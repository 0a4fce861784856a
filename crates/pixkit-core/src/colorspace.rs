/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image colorspace information

/// Colorspaces a canonical image can be in.
///
/// Canonical pixels always carry four samples, the colorspace tells
/// how to interpret them and whether the fourth one is meaningful.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Red, Green, Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Luma, Chroma blue, Chroma red stored in the red, green and blue samples
    YCbCr,
    /// Grayscale colorspace
    Luma,
    /// Grayscale with alpha colorspace
    LumaA,
    /// Cyan, Magenta, Yellow, Black
    ///
    /// Black lives in the index plane of the image
    CMYK,
    /// Cyan, Magenta, Yellow, Black, Alpha
    CMYKA,
    /// The colorspace is unknown
    Unknown
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB | Self::YCbCr => 3,
            Self::RGBA | Self::CMYK => 4,
            Self::CMYKA => 5,
            Self::Luma => 1,
            Self::LumaA => 2,
            Self::Unknown => 0
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA | Self::CMYKA)
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::LumaA | Self::Luma)
    }

    /// Whether this is a color separated (ink based) colorspace
    pub const fn is_cmyk(&self) -> bool {
        matches!(self, Self::CMYK | Self::CMYKA)
    }

    /// Return the same colorspace with an alpha channel added
    ///
    /// Colorspaces without an alpha variant are returned as is
    pub const fn with_alpha(self) -> ColorSpace {
        match self {
            Self::RGB => Self::RGBA,
            Self::Luma => Self::LumaA,
            Self::CMYK => Self::CMYKA,
            _ => self
        }
    }

    /// Return the same colorspace with the alpha channel removed
    pub const fn without_alpha(self) -> ColorSpace {
        match self {
            Self::RGBA => Self::RGB,
            Self::LumaA => Self::Luma,
            Self::CMYKA => Self::CMYK,
            _ => self
        }
    }
}

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 7] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::YCbCr,
    ColorSpace::Luma,
    ColorSpace::LumaA,
    ColorSpace::CMYK,
    ColorSpace::CMYKA
];
