// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Engine error types

use gng_config::ConfigError;
use gng_topology::TopologyError;

/// Engine errors
///
/// A collapsed network and exhausted capacity are not errors; see
/// [`crate::StepOutcome`] and [`gng_topology::SaturationCounters`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Sample dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Not enough samples: required {required}, available {available}")]
    InsufficientSamples { required: usize, available: usize },
}

pub type Result<T> = core::result::Result<T, EngineError>;
