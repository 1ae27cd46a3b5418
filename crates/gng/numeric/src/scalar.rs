// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Numeric representation abstraction for the training engine
//!
//! The adaptation step, search and growth controller are written once against
//! [`Scalar`]. Two implementations exist: native `f32` and [`Q16`] (Q16.16
//! scaled integer). Which one an engine uses is picked at construction.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::fixed;

/// Numeric representation selected for weights and error accumulators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Representation {
    /// Native 32-bit floating point
    Float,
    /// Q16.16 scaled integer
    Fixed,
}

impl Default for Representation {
    fn default() -> Self {
        Self::Fixed
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Float => write!(f, "float"),
            Representation::Fixed => write!(f, "fixed"),
        }
    }
}

/// Error returned when a representation name is not recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRepresentationError;

impl fmt::Display for ParseRepresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: float, f32, fixed, q16")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseRepresentationError {}

impl FromStr for Representation {
    type Err = ParseRepresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("float") || v.eq_ignore_ascii_case("f32") => {
                Ok(Self::Float)
            }
            v if v.eq_ignore_ascii_case("fixed") || v.eq_ignore_ascii_case("q16") => {
                Ok(Self::Fixed)
            }
            _ => Err(ParseRepresentationError),
        }
    }
}

/// Trait for values stored in node weight vectors and error accumulators
pub trait Scalar: Copy + Clone + PartialOrd + Send + Sync + fmt::Debug + 'static {
    /// Which representation this type implements
    const REPRESENTATION: Representation;

    /// Bytes per stored element (weight component or error accumulator)
    const ELEMENT_BYTES: usize = 4;

    fn from_f32(value: f32) -> Self;
    fn to_f32(self) -> f32;
    fn zero() -> Self;

    /// Addition; saturates for scaled integers
    fn saturating_add(self, other: Self) -> Self;

    /// Subtraction; saturates for scaled integers
    fn saturating_sub(self, other: Self) -> Self;

    /// Multiplication in the representation's own arithmetic
    fn mul(self, other: Self) -> Self;

    /// Per-component midpoint used when splitting an edge
    fn midpoint(self, other: Self) -> Self;

    /// Encode as a raw Q16.16 value for the embedded export tables
    fn to_fixed_raw(self) -> i32;
}

impl Scalar for f32 {
    const REPRESENTATION: Representation = Representation::Float;

    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn saturating_add(self, other: Self) -> Self {
        self + other
    }

    #[inline(always)]
    fn saturating_sub(self, other: Self) -> Self {
        self - other
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        self * other
    }

    #[inline(always)]
    fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    #[inline]
    fn to_fixed_raw(self) -> i32 {
        fixed::to_fixed(self as f64)
    }
}

/// Q16.16 fixed-point value
///
/// # Example
/// ```
/// use gng_numeric::{Q16, Scalar};
///
/// let half = Q16::from_f32(0.5);
/// assert_eq!(half.to_raw(), 32768);
/// assert_eq!(half.mul(Q16::from_f32(4.0)), Q16::from_f32(2.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Q16(pub i32);

impl Q16 {
    pub const ZERO: Q16 = Q16(0);
    pub const ONE: Q16 = Q16(fixed::SCALE);
    pub const MAX: Q16 = Q16(fixed::FIXED_MAX);
    pub const MIN: Q16 = Q16(fixed::FIXED_MIN);

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self(fixed::to_fixed(value))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        fixed::to_float(self.0)
    }

    /// Saturating division, see [`fixed::div`]
    #[inline]
    pub fn div(self, other: Self) -> Self {
        Self(fixed::div(self.0, other.0))
    }

    /// Newton-Raphson square root, see [`fixed::sqrt`]
    #[inline]
    pub fn sqrt(self) -> Self {
        Self(fixed::sqrt(self.0))
    }
}

impl fmt::Display for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Scalar for Q16 {
    const REPRESENTATION: Representation = Representation::Fixed;

    #[inline]
    fn from_f32(value: f32) -> Self {
        Self(fixed::to_fixed(value as f64))
    }

    #[inline]
    fn to_f32(self) -> f32 {
        fixed::to_float(self.0) as f32
    }

    #[inline(always)]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline(always)]
    fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    #[inline(always)]
    fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self(fixed::mul(self.0, other.0))
    }

    #[inline(always)]
    fn midpoint(self, other: Self) -> Self {
        // Arithmetic shift, same rounding as the firmware
        Self(((self.0 as i64 + other.0 as i64) >> 1) as i32)
    }

    #[inline(always)]
    fn to_fixed_raw(self) -> i32 {
        self.0
    }
}
