// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime type dispatch for the engine
//!
//! Provides `DynamicGng` for runtime selection between f32 and Q16.16 from
//! [`GngConfig::representation`], while each variant keeps its compile-time
//! monomorphized hot path.

use gng_config::GngConfig;
use gng_numeric::{Representation, Q16};
use gng_topology::{Edge, MemoryUsage, SaturationCounters};
use rand::Rng;

use crate::adaptation::StepOutcome;
use crate::engine::GrowingNeuralGas;
use crate::error::Result;
use crate::search::NearestPair;
use crate::snapshot::{NetworkExport, NetworkSnapshot};
use crate::training::TrainingSummary;

/// Engine whose numeric representation is chosen at runtime
#[derive(Debug, Clone)]
pub enum DynamicGng {
    /// 32-bit floating point
    Float(GrowingNeuralGas<f32>),

    /// Q16.16 fixed point (bit-compatible with the embedded targets)
    Fixed(GrowingNeuralGas<Q16>),
}

/// Macro for dispatching methods to the correct engine variant
macro_rules! dispatch {
    ($self:expr, $method:ident($($args:expr),*)) => {
        match $self {
            DynamicGng::Float(gng) => gng.$method($($args),*),
            DynamicGng::Fixed(gng) => gng.$method($($args),*),
        }
    };
}

impl DynamicGng {
    /// Create an empty engine in the configured representation
    pub fn new(config: &GngConfig) -> Result<Self> {
        match config.representation {
            Representation::Float => Ok(DynamicGng::Float(GrowingNeuralGas::new(config)?)),
            Representation::Fixed => Ok(DynamicGng::Fixed(GrowingNeuralGas::new(config)?)),
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            DynamicGng::Float(_) => Representation::Float,
            DynamicGng::Fixed(_) => Representation::Fixed,
        }
    }

    pub fn config(&self) -> &GngConfig {
        dispatch!(self, config())
    }

    pub fn initialize(&mut self, a: &[f32], b: &[f32]) -> Result<()> {
        dispatch!(self, initialize(a, b))
    }

    pub fn initialize_from_samples<S, R>(&mut self, data: &[S], rng: &mut R) -> Result<()>
    where
        S: AsRef<[f32]>,
        R: Rng + ?Sized,
    {
        dispatch!(self, initialize_from_samples(data, rng))
    }

    pub fn add_node(&mut self, weight: &[f32]) -> Result<usize> {
        dispatch!(self, add_node(weight))
    }

    pub fn reset(&mut self) {
        dispatch!(self, reset())
    }

    pub fn adapt(&mut self, sample: &[f32]) -> Result<StepOutcome> {
        dispatch!(self, adapt(sample))
    }

    pub fn train<S, R>(&mut self, data: &[S], epochs: usize, rng: &mut R) -> Result<TrainingSummary>
    where
        S: AsRef<[f32]>,
        R: Rng + ?Sized,
    {
        dispatch!(self, train(data, epochs, rng))
    }

    pub fn find_two_nearest(&self, sample: &[f32]) -> Result<Option<NearestPair<f32>>> {
        dispatch!(self, find_two_nearest(sample))
    }

    pub fn active_nodes(&self) -> usize {
        dispatch!(self, active_nodes())
    }

    pub fn active_edges(&self) -> usize {
        dispatch!(self, active_edges())
    }

    pub fn iteration(&self) -> u64 {
        dispatch!(self, iteration())
    }

    pub fn insertions(&self) -> u64 {
        dispatch!(self, insertions())
    }

    pub fn saturation(&self) -> SaturationCounters {
        dispatch!(self, saturation())
    }

    pub fn is_collapsed(&self) -> bool {
        dispatch!(self, is_collapsed())
    }

    pub fn weights_as_float(&self) -> Vec<Vec<f32>> {
        dispatch!(self, weights_as_float())
    }

    pub fn errors_as_float(&self) -> Vec<f32> {
        dispatch!(self, errors_as_float())
    }

    pub fn edges(&self) -> Vec<(usize, usize)> {
        dispatch!(self, edges())
    }

    pub fn edge_records(&self) -> Vec<Edge> {
        dispatch!(self, edge_records())
    }

    pub fn memory_usage(&self) -> MemoryUsage {
        dispatch!(self, memory_usage())
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        dispatch!(self, snapshot())
    }

    pub fn export(&self) -> NetworkExport {
        dispatch!(self, export())
    }
}
