// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # GNG Numeric Layer (Platform-Agnostic)
//!
//! Everything the training engine needs to do arithmetic:
//! - **Fixed**: Q16.16 scaled-integer operators (`to_fixed`, `mul`, `div`, `sqrt`)
//! - **Scalar**: the numeric-representation strategy the engine is written against,
//!   implemented once for native `f32` and once for [`Q16`]
//!
//! ## Target Platforms
//! - ✅ Desktop (Linux, macOS, Windows)
//! - ✅ Embedded (RISC-V soft cores, ARM Cortex-M) with `default-features = false`
//!
//! All fixed-point operators saturate. Nothing in this crate panics or wraps on overflow.

#![cfg_attr(not(feature = "std"), no_std)]

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod fixed;
pub mod scalar;

pub use fixed::{
    div, mul, sqrt, to_fixed, to_float, FIXED_MAX, FIXED_MIN, FRAC_BITS, SCALE,
};
pub use scalar::{ParseRepresentationError, Q16, Representation, Scalar};
