/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_core::colorspace::ColorSpace;
use pixkit_image::{Image, Pixel, QUANTUM_RANGE};

/// A `width` by `height` image with a diagonal gradient in every channel
pub fn synthetic_image(width: usize, height: usize, colorspace: ColorSpace) -> Image {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            let v = ((x + y) * usize::from(QUANTUM_RANGE) / (width + height)) as u16;
            Pixel::with_alpha(v, QUANTUM_RANGE - v, v / 3, QUANTUM_RANGE - v / 5)
        })
        .collect();

    Image::from_pixels(width, height, colorspace, pixels).unwrap()
}
