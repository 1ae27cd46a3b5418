// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Q16.16 fixed-point operators
//!
//! Pure functions over raw `i32` values scaled by 2^16. Intermediate products
//! are widened to 64 bits and every result is clamped back into the `i32`
//! range, so overflow always saturates and never wraps.

/// Number of fractional bits
pub const FRAC_BITS: u32 = 16;

/// Raw value of 1.0
pub const SCALE: i32 = 1 << FRAC_BITS;

/// Largest representable raw value (~32767.99998)
pub const FIXED_MAX: i32 = i32::MAX;

/// Smallest representable raw value (-32768.0)
pub const FIXED_MIN: i32 = i32::MIN;

const SQRT_ITERATIONS: usize = 10;

#[inline(always)]
fn clamp_i64(value: i64) -> i32 {
    value.clamp(FIXED_MIN as i64, FIXED_MAX as i64) as i32
}

/// Convert a float to Q16.16
///
/// Multiplies by 65536, truncates toward zero and clamps to the `i32` range.
/// NaN encodes as 0.
///
/// # Example
/// ```
/// use gng_numeric::fixed::{to_fixed, FIXED_MAX, FIXED_MIN};
///
/// assert_eq!(to_fixed(1.0), 65536);
/// assert_eq!(to_fixed(-0.5), -32768);
/// assert_eq!(to_fixed(1.0e9), FIXED_MAX); // Clamped
/// assert_eq!(to_fixed(-1.0e9), FIXED_MIN); // Clamped
/// ```
#[inline]
pub fn to_fixed(x: f64) -> i32 {
    // `as i64` truncates toward zero and maps NaN to 0
    clamp_i64((x * SCALE as f64) as i64)
}

/// Convert Q16.16 back to a float
///
/// # Example
/// ```
/// use gng_numeric::fixed::to_float;
///
/// assert_eq!(to_float(65536), 1.0);
/// assert_eq!(to_float(-98304), -1.5);
/// ```
#[inline]
pub fn to_float(q: i32) -> f64 {
    q as f64 / SCALE as f64
}

/// Multiply two Q16.16 values
///
/// Widens to 64 bits, shifts right by 16 (arithmetic, rounds toward negative
/// infinity) and clamps.
///
/// # Example
/// ```
/// use gng_numeric::fixed::{mul, to_fixed, FIXED_MAX};
///
/// assert_eq!(mul(to_fixed(2.0), to_fixed(1.5)), to_fixed(3.0));
/// assert_eq!(mul(to_fixed(30000.0), to_fixed(30000.0)), FIXED_MAX); // Clamped
/// ```
#[inline]
pub fn mul(a: i32, b: i32) -> i32 {
    clamp_i64((a as i64 * b as i64) >> FRAC_BITS)
}

/// Divide two Q16.16 values
///
/// Division by zero saturates: `FIXED_MAX` when `a >= 0`, `FIXED_MIN` otherwise.
/// The dividend is shifted left by 16 before a floor division, then clamped.
///
/// # Example
/// ```
/// use gng_numeric::fixed::{div, to_fixed, FIXED_MAX, FIXED_MIN};
///
/// assert_eq!(div(to_fixed(3.0), to_fixed(2.0)), to_fixed(1.5));
/// assert_eq!(div(to_fixed(1.0), 0), FIXED_MAX);
/// assert_eq!(div(to_fixed(-1.0), 0), FIXED_MIN);
/// ```
#[inline]
pub fn div(a: i32, b: i32) -> i32 {
    if b == 0 {
        return if a >= 0 { FIXED_MAX } else { FIXED_MIN };
    }

    let numerator = (a as i64) << FRAC_BITS;
    let denominator = b as i64;
    let mut quotient = numerator / denominator;
    if numerator % denominator != 0 && ((numerator < 0) != (denominator < 0)) {
        quotient -= 1;
    }
    clamp_i64(quotient)
}

/// Square root of a Q16.16 value
///
/// Newton-Raphson starting from `x / 2`, at most 10 iterations, stopping once two
/// successive guesses differ by less than 2 ulp. Non-positive input returns 0.
///
/// # Example
/// ```
/// use gng_numeric::fixed::{sqrt, to_fixed};
///
/// assert_eq!(sqrt(to_fixed(4.0)), to_fixed(2.0));
/// assert_eq!(sqrt(0), 0);
/// assert_eq!(sqrt(to_fixed(-1.0)), 0);
/// ```
pub fn sqrt(x: i32) -> i32 {
    if x <= 0 {
        return 0;
    }

    let mut guess = (x >> 1).max(1);
    for _ in 0..SQRT_ITERATIONS {
        let next = ((guess as i64 + div(x, guess) as i64) >> 1) as i32;
        if (next as i64 - guess as i64).abs() < 2 {
            break;
        }
        guess = next;
    }
    guess
}
