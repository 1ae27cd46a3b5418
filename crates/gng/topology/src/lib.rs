// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # GNG Topology Store
//!
//! Fixed-capacity storage for a Growing Neural Gas graph:
//! - **Nodes**: a slot-indexed arena of weight vectors and error accumulators,
//!   allocated once at construction and never grown
//! - **Edges**: a packed list of `(a, b, age)` records with 16-bit fields
//!
//! Node identity is the slot index. Removing nodes compacts the arena and
//! rewrites every edge endpoint, so indices are always dense in `0..node_count`.
//!
//! Capacity saturation (edge list full, node arena full) is a normal state of
//! a bounded network and is counted in [`SaturationCounters`] instead of being
//! treated as a failure.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod edge;
pub mod error;
pub mod store;

pub use edge::{Edge, EdgeInsert, EDGE_RECORD_BYTES};
pub use error::{Result, TopologyError};
pub use store::{MemoryUsage, Neighbors, SaturationCounters, TopologyStore, MAX_NODE_CAPACITY};
