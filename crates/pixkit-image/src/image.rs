/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use pixkit_core::bit_depth::BitDepth;
use pixkit_core::colorspace::ColorSpace;

use crate::errors::ImageErrors;
use crate::pixel::{IndexPacket, Pixel};
use crate::row::{PixelRow, PixelRowMut};

/// A canonical image
///
/// Pixels are stored row major, `width * height` of them.
/// The index plane exists for palette backed images (colormap indexes) and
/// CMYK images (black samples).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    pixels:     Vec<Pixel>,
    indexes:    Option<Vec<IndexPacket>>,
    colormap:   Option<Vec<Pixel>>,
    comment:    Option<String>
}

impl Image {
    /// Largest colormap an image can carry
    pub const MAX_COLORMAP_SIZE: usize = 1 << 16;

    /// Allocate a `width` by `height` image of opaque black pixels
    pub fn new(width: usize, height: usize, colorspace: ColorSpace) -> Result<Image, ImageErrors> {
        let count = Self::pixel_count(width, height)?;

        let indexes = if colorspace.is_cmyk() {
            Some(vec![0; count])
        } else {
            None
        };

        Ok(Image {
            width,
            height,
            colorspace,
            pixels: vec![Pixel::default(); count],
            indexes,
            colormap: None,
            comment: None
        })
    }

    /// Create an image from existing pixels
    pub fn from_pixels(
        width: usize, height: usize, colorspace: ColorSpace, pixels: Vec<Pixel>
    ) -> Result<Image, ImageErrors> {
        let count = Self::pixel_count(width, height)?;

        if pixels.len() != count {
            return Err(ImageErrors::PixelCountMismatch(count, pixels.len()));
        }
        let indexes = if colorspace.is_cmyk() {
            Some(vec![0; count])
        } else {
            None
        };

        Ok(Image {
            width,
            height,
            colorspace,
            pixels,
            indexes,
            colormap: None,
            comment: None
        })
    }

    /// Create a palette backed image from colormap indexes
    ///
    /// Pixel colors are synchronized from the colormap
    pub fn from_indexes(
        width: usize, height: usize, colormap: Vec<Pixel>, indexes: Vec<IndexPacket>
    ) -> Result<Image, ImageErrors> {
        let count = Self::pixel_count(width, height)?;

        if indexes.len() != count {
            return Err(ImageErrors::PixelCountMismatch(count, indexes.len()));
        }
        let colorspace = if colormap.iter().all(Pixel::is_gray) {
            ColorSpace::Luma
        } else {
            ColorSpace::RGB
        };
        let mut image = Image::new(width, height, colorspace)?;
        image.set_colormap(colormap)?;
        image.indexes = Some(indexes);
        image.sync_colormap();
        Ok(image)
    }

    fn pixel_count(width: usize, height: usize) -> Result<usize, ImageErrors> {
        if width == 0 || height == 0 {
            return Err(ImageErrors::ZeroDimensions(width, height));
        }
        width
            .checked_mul(height)
            .ok_or(ImageErrors::DimensionsTooLarge(width, height))
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the image dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Canonical images always store 16 bit samples
    pub const fn depth(&self) -> BitDepth {
        BitDepth::Sixteen
    }

    /// Change the colorspace, allocating the index plane
    /// when switching to a CMYK colorspace
    pub fn set_colorspace(&mut self, colorspace: ColorSpace) {
        if colorspace.is_cmyk() && self.indexes.is_none() {
            self.indexes = Some(vec![0; self.pixels.len()]);
        }
        self.colorspace = colorspace;
    }

    pub const fn has_alpha(&self) -> bool {
        self.colorspace.has_alpha()
    }

    /// Whether pixels are backed by a colormap
    pub const fn is_colormapped(&self) -> bool {
        self.colormap.is_some()
    }

    /// Whether every pixel (or every colormap entry for palette backed
    /// images) is a shade of gray
    pub fn is_gray(&self) -> bool {
        match &self.colormap {
            Some(colormap) => colormap.iter().all(Pixel::is_gray),
            None => self.pixels.iter().all(Pixel::is_gray)
        }
    }

    pub fn colormap(&self) -> Option<&[Pixel]> {
        self.colormap.as_deref()
    }

    /// Install a colormap, turning the image palette backed.
    ///
    /// An index plane of zeros is allocated if the image has none
    pub fn set_colormap(&mut self, colormap: Vec<Pixel>) -> Result<(), ImageErrors> {
        if colormap.is_empty() {
            return Err(ImageErrors::EmptyColormap);
        }
        if colormap.len() > Self::MAX_COLORMAP_SIZE {
            return Err(ImageErrors::ColormapTooLarge(colormap.len()));
        }
        if self.indexes.is_none() {
            self.indexes = Some(vec![0; self.pixels.len()]);
        }
        self.colormap = Some(colormap);
        Ok(())
    }

    /// Copy colormap entries into the pixels using the index plane
    ///
    /// Out of range indexes are reset to zero.
    /// Returns the number of indexes that were out of range
    pub fn sync_colormap(&mut self) -> usize {
        let (Some(colormap), Some(indexes)) = (&self.colormap, &mut self.indexes) else {
            return 0;
        };
        let mut invalid = 0;

        for (pixel, index) in self.pixels.iter_mut().zip(indexes.iter_mut()) {
            if usize::from(*index) >= colormap.len() {
                *index = 0;
                invalid += 1;
            }
            *pixel = colormap[usize::from(*index)];
        }
        invalid
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn indexes(&self) -> Option<&[IndexPacket]> {
        self.indexes.as_deref()
    }

    pub fn indexes_mut(&mut self) -> Option<&mut [IndexPacket]> {
        self.indexes.as_deref_mut()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Borrow row `y` for reading
    pub fn row(&self, y: usize) -> Result<PixelRow<'_>, ImageErrors> {
        if y >= self.height {
            return Err(ImageErrors::RowOutOfBounds(y, self.height));
        }
        let range = y * self.width..(y + 1) * self.width;

        Ok(PixelRow {
            pixels:     &self.pixels[range.clone()],
            indexes:    self.indexes.as_ref().map(|i| &i[range]),
            colormap:   self.colormap.as_deref(),
            colorspace: self.colorspace
        })
    }

    /// Borrow row `y` for writing
    pub fn row_mut(&mut self, y: usize) -> Result<PixelRowMut<'_>, ImageErrors> {
        if y >= self.height {
            return Err(ImageErrors::RowOutOfBounds(y, self.height));
        }
        let range = y * self.width..(y + 1) * self.width;

        Ok(PixelRowMut {
            pixels:     &mut self.pixels[range.clone()],
            indexes:    self.indexes.as_mut().map(|i| &mut i[range]),
            colormap:   self.colormap.as_deref(),
            colorspace: self.colorspace
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use pixkit_core::colorspace::ColorSpace;

    use crate::{Image, ImageErrors, Pixel, QUANTUM_RANGE};

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Image::new(0, 4, ColorSpace::RGB),
            Err(ImageErrors::ZeroDimensions(0, 4))
        ));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert!(matches!(
            Image::new(usize::MAX, 2, ColorSpace::RGB),
            Err(ImageErrors::DimensionsTooLarge(_, 2))
        ));
    }

    #[test]
    fn cmyk_images_get_a_black_plane() {
        let image = Image::new(2, 2, ColorSpace::CMYK).unwrap();
        assert_eq!(image.indexes().map(|i| i.len()), Some(4));
        assert!(!image.is_colormapped());
    }

    #[test]
    fn sync_colormap_resets_invalid_indexes() {
        let colormap = vec![Pixel::gray(0), Pixel::gray(QUANTUM_RANGE)];
        let mut image = Image::from_indexes(3, 1, colormap, vec![1, 0, 7]).unwrap();
        assert_eq!(image.colorspace(), ColorSpace::Luma);
        assert_eq!(image.indexes().unwrap(), &[1, 0, 0]);
        assert_eq!(image.pixels()[0], Pixel::gray(QUANTUM_RANGE));
        assert_eq!(image.sync_colormap(), 0);
    }

    #[test]
    fn rows_are_disjoint_slices() {
        let mut image = Image::new(2, 3, ColorSpace::RGB).unwrap();
        {
            let row = image.row_mut(1).unwrap();
            row.pixels[0] = Pixel::new(1, 2, 3);
        }
        assert_eq!(image.pixels()[2], Pixel::new(1, 2, 3));
        assert_eq!(image.row(1).unwrap().pixels.len(), 2);
        assert!(image.row(3).is_err());
    }
}
