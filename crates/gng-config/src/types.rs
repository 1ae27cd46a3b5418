// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! `GngConfig` maps one-to-one onto the keys of `gng_configuration.toml`.

use gng_numeric::Representation;
use serde::{Deserialize, Serialize};

/// Immutable engine configuration
///
/// Defaults follow the memory-optimized microcontroller build
/// (32 nodes, 64 edges, 2-D, Q16.16).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GngConfig {
    /// Node arena capacity
    pub max_nodes: usize,
    /// Edge list capacity
    pub max_edges: usize,
    /// Scalars per sample and per weight vector
    pub feature_dim: usize,

    /// Winner learning rate (eb)
    pub epsilon_winner: f32,
    /// Neighbor learning rate (en)
    pub epsilon_neighbor: f32,
    /// Error decay applied to the split pair on insertion
    pub alpha: f32,
    /// Global error decay applied every step
    pub beta: f32,

    /// Edges older than this are removed
    ///
    /// At most `u16::MAX - 1`, since edge ages stop counting at `u16::MAX`.
    pub max_age: u16,
    /// Insertion period in adaptation steps
    pub lambda: u32,

    /// Numeric representation of weights and errors
    pub representation: Representation,
}

impl Default for GngConfig {
    fn default() -> Self {
        Self {
            max_nodes: 32,
            max_edges: 64,
            feature_dim: 2,
            epsilon_winner: 0.05,
            epsilon_neighbor: 0.0006,
            alpha: 0.5,
            beta: 0.995,
            max_age: 88,
            lambda: 300,
            representation: Representation::Fixed,
        }
    }
}

impl GngConfig {
    /// Same configuration with a different representation
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }
}
