/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Decoder options
///
/// Not all options are respected by all decoders,
/// each option lists the decoders that respect it
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:  usize,
    /// Treat some warnings as errors
    ///
    /// When set to false, recoverable anomalies are logged via the log crate.
    ///
    /// When set to true, they are returned as errors.
    ///
    /// - Default value: false,
    /// - Respected by: `viff`
    strict_mode: bool,
    /// Maximum number of frames (chained sub-images) to decode
    ///
    /// - Default value: `usize::MAX`
    /// - Respected by: `viff`
    max_frames:  usize
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false,
            max_frames:  usize::MAX
        }
    }
}

impl DecoderOptions {
    /// Create decoder options that error out on anything
    /// suspicious in the input
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default().set_strict_mode(true)
    }

    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Maximum number of frames a multi-frame decoder returns
    pub const fn get_max_frames(&self) -> usize {
        self.max_frames
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in strict mode
    ///
    /// # Arguments
    ///
    /// * `yes`: Whether recoverable anomalies become errors
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set the maximum number of frames returned from a
    /// multi-frame stream.
    ///
    /// A value of zero is treated as one, the first frame
    /// is always decoded.
    pub fn set_max_frames(mut self, frames: usize) -> Self {
        self.max_frames = frames.max(1);
        self
    }
}
