/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pixkit_image::{clamp_to_quantum, Quantum, QUANTUM_RANGE};

use crate::info::{PackingUnit, QuantumInfo};

/// Mutable bookkeeping of a single export or import call.
///
/// A fresh state is created for every call, partially filled bit
/// registers never carry over from one row to the next.
#[derive(Copy, Clone, Debug)]
pub struct QuantumState {
    /// Bits of the current unit not yet filled (export) or consumed (import).
    ///
    /// Equal to the unit size at a unit boundary
    pub(crate) bits:  u32,
    /// Register holding the unit in progress
    pub(crate) pixel: u32,
    unit:             PackingUnit,
    minimum:          f64,
    scale:            f64,
    inverse_scale:    f64
}

impl QuantumState {
    /// Create the state for a call configured by `info`
    pub fn new(info: &QuantumInfo) -> QuantumState {
        QuantumState::with_unit(info, info.unit())
    }

    pub(crate) fn with_unit(info: &QuantumInfo, unit: PackingUnit) -> QuantumState {
        let (minimum, maximum) = info.min_max();
        let span = maximum - minimum;

        let (scale, inverse_scale) = if span.abs() < f64::EPSILON {
            (0.0, 0.0)
        } else {
            (f64::from(QUANTUM_RANGE) / span, span / f64::from(QUANTUM_RANGE))
        };

        QuantumState {
            bits: unit.bits(),
            pixel: 0,
            unit,
            minimum,
            scale,
            inverse_scale
        }
    }

    /// Return to the start of a unit, dropping anything accumulated
    pub fn reset(&mut self) {
        self.bits = self.unit.bits();
        self.pixel = 0;
    }

    pub const fn bits(&self) -> u32 {
        self.bits
    }

    pub const fn unit(&self) -> PackingUnit {
        self.unit
    }

    /// Whether the state sits on a unit boundary
    pub const fn is_aligned(&self) -> bool {
        self.bits == self.unit.bits()
    }

    /// Map a canonical sample to its floating point value
    #[inline]
    pub fn quantum_to_float(&self, quantum: Quantum) -> f64 {
        f64::from(quantum) * self.inverse_scale + self.minimum
    }

    /// Map a floating point value back to a canonical sample
    #[inline]
    pub fn float_to_quantum(&self, value: f64) -> Quantum {
        clamp_to_quantum((value - self.minimum) * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use pixkit_image::QUANTUM_RANGE;

    use crate::{PackingUnit, QuantumInfo, QuantumState};

    #[test]
    fn float_mapping_uses_min_max() {
        let info = QuantumInfo::new(32).set_min_max(-1.0, 1.0);
        let state = QuantumState::new(&info);
        assert_eq!(state.quantum_to_float(0), -1.0);
        assert!((state.quantum_to_float(QUANTUM_RANGE) - 1.0).abs() < 1e-12);
        assert_eq!(state.float_to_quantum(1.0), QUANTUM_RANGE);
        assert_eq!(state.float_to_quantum(-5.0), 0);
    }

    #[test]
    fn degenerate_range_maps_to_zero() {
        let info = QuantumInfo::new(32).set_min_max(3.0, 3.0);
        let state = QuantumState::new(&info);
        assert_eq!(state.float_to_quantum(3.0), 0);
        assert_eq!(state.quantum_to_float(QUANTUM_RANGE), 3.0);
    }

    #[test]
    fn fresh_state_is_aligned() {
        let info = QuantumInfo::new(10).set_unit(PackingUnit::Long);
        let state = QuantumState::new(&info);
        assert_eq!(state.bits(), 32);
        assert!(state.is_aligned());
    }
}
