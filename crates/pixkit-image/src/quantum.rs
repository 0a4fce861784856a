/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canonical sample type and scaling between it and other depths.
//!
//! All integer scaling follows one law,
//! `output = round(input * (2^depth - 1) / (2^16 - 1))`, and its inverse.

/// One channel sample at the canonical precision
pub type Quantum = u16;

/// Number of bits in a [`Quantum`]
pub const QUANTUM_DEPTH: u32 = 16;

/// Largest value a [`Quantum`] holds
pub const QUANTUM_RANGE: Quantum = Quantum::MAX;

/// Largest value representable in `depth` bits, `depth` in `1..=64`
#[inline]
pub const fn depth_range(depth: u32) -> u64 {
    if depth >= 64 {
        u64::MAX
    } else {
        (1_u64 << depth) - 1
    }
}

/// Scale a canonical sample to a `depth` bit unsigned integer
#[inline]
pub fn scale_quantum_to_any(quantum: Quantum, depth: u32) -> u64 {
    let range = u128::from(depth_range(depth));
    let q_range = u128::from(QUANTUM_RANGE);

    ((u128::from(quantum) * range + q_range / 2) / q_range) as u64
}

/// Scale a `depth` bit unsigned integer to a canonical sample.
///
/// Values above the range of `depth` saturate
#[inline]
pub fn scale_any_to_quantum(value: u64, depth: u32) -> Quantum {
    let range = u128::from(depth_range(depth));
    let value = u128::from(value).min(range);

    ((value * u128::from(QUANTUM_RANGE) + range / 2) / range) as Quantum
}

#[inline]
pub const fn scale_char_to_quantum(value: u8) -> Quantum {
    // 65535 / 255
    (value as Quantum) * 257
}

#[inline]
pub const fn scale_quantum_to_char(quantum: Quantum) -> u8 {
    ((quantum as u32 * 255 + 32767) / 65535) as u8
}

#[inline]
pub const fn scale_short_to_quantum(value: u16) -> Quantum {
    value
}

#[inline]
pub const fn scale_quantum_to_short(quantum: Quantum) -> u16 {
    quantum
}

/// Round and clamp a floating point value into the canonical range
#[inline]
pub fn clamp_to_quantum(value: f64) -> Quantum {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= f64::from(QUANTUM_RANGE) {
        return QUANTUM_RANGE;
    }
    (value + 0.5) as Quantum
}

#[cfg(test)]
mod tests {
    use crate::quantum::*;

    #[test]
    fn char_scaling_is_exact_on_endpoints() {
        assert_eq!(scale_char_to_quantum(0), 0);
        assert_eq!(scale_char_to_quantum(255), QUANTUM_RANGE);
        assert_eq!(scale_quantum_to_char(QUANTUM_RANGE), 255);
        for v in 0..=255_u8 {
            assert_eq!(scale_quantum_to_char(scale_char_to_quantum(v)), v);
        }
    }

    #[test]
    fn any_scaling_matches_char_scaling() {
        for q in (0..=QUANTUM_RANGE).step_by(97) {
            assert_eq!(
                scale_quantum_to_any(q, 8),
                u64::from(scale_quantum_to_char(q))
            );
        }
    }

    #[test]
    fn any_scaling_round_trips_within_a_step() {
        for depth in [1, 2, 4, 10, 12, 24, 32, 64] {
            let step = f64::from(QUANTUM_RANGE) / depth_range(depth).min(65535) as f64;
            for q in (0..=QUANTUM_RANGE).step_by(251) {
                let back = scale_any_to_quantum(scale_quantum_to_any(q, depth), depth);
                let error = (f64::from(back) - f64::from(q)).abs();
                assert!(error <= step / 2.0 + 1.0, "depth {depth} q {q} back {back}");
            }
        }
    }

    #[test]
    fn full_range_maps_to_full_range() {
        assert_eq!(scale_quantum_to_any(QUANTUM_RANGE, 10), 1023);
        assert_eq!(scale_quantum_to_any(QUANTUM_RANGE, 64), u64::MAX);
        assert_eq!(scale_any_to_quantum(1023, 10), QUANTUM_RANGE);
        assert_eq!(scale_any_to_quantum(u64::MAX, 64), QUANTUM_RANGE);
        // saturates
        assert_eq!(scale_any_to_quantum(5000, 10), QUANTUM_RANGE);
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_to_quantum(-3.0), 0);
        assert_eq!(clamp_to_quantum(f64::NAN), 0);
        assert_eq!(clamp_to_quantum(1e9), QUANTUM_RANGE);
        assert_eq!(clamp_to_quantum(10.6), 11);
    }
}
