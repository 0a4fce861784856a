/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bit_depth::BitDepth;
use crate::colorspace::ColorSpace;

/// Options shared by some of the encoders in
/// the `pixkit` family of image crates
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    depth:      BitDepth,
    adjoin:     bool
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:      0,
            height:     0,
            colorspace: ColorSpace::RGB,
            depth:      BitDepth::Eight,
            adjoin:     true
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    /// * `colorspace`:  Image colorspace
    /// * `depth`: Image depth
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace, depth: BitDepth
    ) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace,
            depth,
            ..Default::default()
        }
    }
    /// Get the width for which the image will be encoded in
    pub const fn get_width(&self) -> usize {
        self.width
    }

    /// Get height for which the image will be encoded in
    pub const fn get_height(&self) -> usize {
        self.height
    }
    /// Get the depth for which the image will be encoded in
    pub const fn get_depth(&self) -> BitDepth {
        self.depth
    }
    /// Get the colorspace for which the image will be encoded in
    pub const fn get_colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Whether multi-frame inputs are written as one chained file
    ///
    /// When false, only the first frame is encoded
    pub const fn get_adjoin(&self) -> bool {
        self.adjoin
    }

    /// Set the width for which the image will be encoded in
    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
    /// Set the height for which the image will be encoded in
    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }
    /// Set the depth for which the image will be encoded in
    pub fn set_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }
    /// Set the colorspace for which the image will be encoded in
    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }
    /// Set whether every frame of a multi-frame input is encoded
    pub fn set_adjoin(mut self, yes: bool) -> Self {
        self.adjoin = yes;
        self
    }
}
