/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::quantum::{clamp_to_quantum, Quantum, QUANTUM_RANGE};

/// A colormap index or, for CMYK images, the black sample
pub type IndexPacket = Quantum;

/// A canonical pixel
///
/// The samples hold red, green and blue for RGB images and cyan,
/// magenta and yellow for CMYK ones, black then lives in the image index plane.
///
/// Transparency is stored as opacity, `0` is fully opaque,
/// see [`alpha`](Pixel::alpha) for the inverse view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red:     Quantum,
    pub green:   Quantum,
    pub blue:    Quantum,
    pub opacity: Quantum
}

impl Pixel {
    /// Create an opaque pixel
    pub const fn new(red: Quantum, green: Quantum, blue: Quantum) -> Pixel {
        Pixel {
            red,
            green,
            blue,
            opacity: 0
        }
    }
    /// Create an opaque gray pixel
    pub const fn gray(value: Quantum) -> Pixel {
        Pixel::new(value, value, value)
    }
    /// Create a pixel with the given alpha, `QUANTUM_RANGE` being opaque
    pub const fn with_alpha(red: Quantum, green: Quantum, blue: Quantum, alpha: Quantum) -> Pixel {
        Pixel {
            red,
            green,
            blue,
            opacity: QUANTUM_RANGE - alpha
        }
    }

    #[inline]
    pub const fn alpha(&self) -> Quantum {
        QUANTUM_RANGE - self.opacity
    }

    #[inline]
    pub fn set_alpha(&mut self, alpha: Quantum) {
        self.opacity = QUANTUM_RANGE - alpha;
    }

    /// Whether red, green and blue hold the same value
    #[inline]
    pub const fn is_gray(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// Rec. 709 luma of the pixel
    ///
    /// Gray pixels return their value unchanged
    #[inline]
    pub fn luma(&self) -> Quantum {
        if self.is_gray() {
            return self.red;
        }
        clamp_to_quantum(
            0.212656 * f64::from(self.red)
                + 0.715158 * f64::from(self.green)
                + 0.072186 * f64::from(self.blue)
        )
    }
}
