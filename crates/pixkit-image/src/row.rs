/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_core::colorspace::ColorSpace;

use crate::pixel::{IndexPacket, Pixel};

/// A read only view of one row of canonical pixels
///
/// `indexes` holds colormap indexes for palette backed rows and
/// black samples for CMYK rows.
#[derive(Copy, Clone, Debug)]
pub struct PixelRow<'a> {
    pub pixels:     &'a [Pixel],
    pub indexes:    Option<&'a [IndexPacket]>,
    pub colormap:   Option<&'a [Pixel]>,
    pub colorspace: ColorSpace
}

impl<'a> PixelRow<'a> {
    /// Create a view of direct color RGB pixels
    pub const fn new(pixels: &'a [Pixel]) -> PixelRow<'a> {
        PixelRow {
            pixels,
            indexes: None,
            colormap: None,
            colorspace: ColorSpace::RGB
        }
    }
    pub const fn with_colorspace(mut self, colorspace: ColorSpace) -> PixelRow<'a> {
        self.colorspace = colorspace;
        self
    }
    pub const fn with_indexes(mut self, indexes: &'a [IndexPacket]) -> PixelRow<'a> {
        self.indexes = Some(indexes);
        self
    }
    pub const fn with_colormap(mut self, colormap: &'a [Pixel]) -> PixelRow<'a> {
        self.colormap = Some(colormap);
        self
    }
    /// Whether the row belongs to a palette backed image
    pub const fn is_colormapped(&self) -> bool {
        self.colormap.is_some() && self.indexes.is_some()
    }
    pub const fn len(&self) -> usize {
        self.pixels.len()
    }
    pub const fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// A mutable view of one row of canonical pixels
#[derive(Debug)]
pub struct PixelRowMut<'a> {
    pub pixels:     &'a mut [Pixel],
    pub indexes:    Option<&'a mut [IndexPacket]>,
    pub colormap:   Option<&'a [Pixel]>,
    pub colorspace: ColorSpace
}

impl<'a> PixelRowMut<'a> {
    /// Create a view of direct color RGB pixels
    pub fn new(pixels: &'a mut [Pixel]) -> PixelRowMut<'a> {
        PixelRowMut {
            pixels,
            indexes: None,
            colormap: None,
            colorspace: ColorSpace::RGB
        }
    }
    pub fn with_colorspace(mut self, colorspace: ColorSpace) -> PixelRowMut<'a> {
        self.colorspace = colorspace;
        self
    }
    pub fn with_indexes(mut self, indexes: &'a mut [IndexPacket]) -> PixelRowMut<'a> {
        self.indexes = Some(indexes);
        self
    }
    pub fn with_colormap(mut self, colormap: &'a [Pixel]) -> PixelRowMut<'a> {
        self.colormap = Some(colormap);
        self
    }
    pub fn is_colormapped(&self) -> bool {
        self.colormap.is_some() && self.indexes.is_some()
    }
    pub fn len(&self) -> usize {
        self.pixels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
    /// Reborrow as a read only row
    pub fn as_row(&self) -> PixelRow<'_> {
        PixelRow {
            pixels:     &*self.pixels,
            indexes:    self.indexes.as_deref(),
            colormap:   self.colormap,
            colorspace: self.colorspace
        }
    }
}
