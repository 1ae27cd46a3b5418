// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # gng-observability
//!
//! Console logging for the GNG binaries, with per-crate debug flags.
//! Library crates only emit `tracing` events; installing a subscriber is left
//! to the binary through [`init_logging`].

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::{debug_flags_help, parse_debug_flags, CrateDebugFlags};
pub use init::init_logging;

/// Known GNG crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "gng-numeric",
    "gng-topology",
    "gng-engine",
    "gng-config",
];
