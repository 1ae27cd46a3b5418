// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for topology operations

use thiserror::Error;

/// Topology errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// Capacity exceeded
    #[error("Capacity exceeded: requested {requested}, available {available}")]
    CapacityExceeded {
        /// Requested capacity
        requested: usize,
        /// Available capacity
        available: usize,
    },

    /// Node index outside the active range
    #[error("Invalid node index {index} (active nodes: {active})")]
    InvalidNode { index: usize, active: usize },

    /// Weight vector length differs from the configured feature dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Store created with unusable capacities
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Edge list violates a structural invariant
    #[error("Corrupt edge #{position} ({a}, {b}): {reason}")]
    CorruptEdge {
        position: usize,
        a: u16,
        b: u16,
        reason: &'static str,
    },
}

/// Result type for topology operations
pub type Result<T> = core::result::Result<T, TopologyError>;
