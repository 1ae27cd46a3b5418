// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Engine state and lifecycle
//!
//! `GrowingNeuralGas<T>` owns one [`TopologyStore`] and the learning
//! parameters encoded in `T`. The per-sample update lives in
//! [`crate::adaptation`], node insertion in [`crate::growth`] and the
//! read-only views in [`crate::snapshot`].

use gng_config::{validate_config, GngConfig};
use gng_numeric::{Representation, Scalar};
use gng_topology::{SaturationCounters, TopologyStore};
use rand::seq::index;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::search::{find_two_nearest, NearestPair};

/// Learning rates and decay factors, encoded once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningParams<T> {
    pub epsilon_winner: T,
    pub epsilon_neighbor: T,
    pub alpha: T,
    pub beta: T,
}

impl<T: Scalar> LearningParams<T> {
    pub fn from_config(config: &GngConfig) -> Self {
        Self {
            epsilon_winner: T::from_f32(config.epsilon_winner),
            epsilon_neighbor: T::from_f32(config.epsilon_neighbor),
            alpha: T::from_f32(config.alpha),
            beta: T::from_f32(config.beta),
        }
    }
}

/// Bounded-memory Growing Neural Gas
///
/// # Example
/// ```
/// use gng_config::GngConfig;
/// use gng_engine::{GrowingNeuralGas, StepOutcome};
///
/// let config = GngConfig { lambda: 10, ..GngConfig::default() };
/// let mut gng = GrowingNeuralGas::<f32>::new(&config).unwrap();
/// gng.initialize(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
///
/// let outcome = gng.adapt(&[0.2, 0.3]).unwrap();
/// assert!(matches!(outcome, StepOutcome::Adapted { best: 0, second: 1, .. }));
/// assert_eq!(gng.active_edges(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GrowingNeuralGas<T: Scalar> {
    pub(crate) config: GngConfig,
    pub(crate) params: LearningParams<T>,
    pub(crate) store: TopologyStore<T>,

    /// Completed adaptation steps since the last (re)initialization
    pub(crate) iteration: u64,
    pub(crate) insertions: u64,

    // Scratch buffers sized once in `new`
    pub(crate) encoded_sample: Vec<T>,
    pub(crate) split_weight: Vec<T>,
    pub(crate) neighbor_buf: Vec<usize>,
}

impl<T: Scalar> GrowingNeuralGas<T> {
    /// Create an empty engine
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if the configuration fails validation.
    pub fn new(config: &GngConfig) -> Result<Self> {
        validate_config(config)?;
        let store = TopologyStore::new(config.max_nodes, config.max_edges, config.feature_dim)?;

        debug!(
            representation = %T::REPRESENTATION,
            max_nodes = config.max_nodes,
            max_edges = config.max_edges,
            feature_dim = config.feature_dim,
            "Created GNG engine"
        );

        Ok(Self {
            config: config.clone(),
            params: LearningParams::from_config(config),
            store,
            iteration: 0,
            insertions: 0,
            encoded_sample: vec![T::zero(); config.feature_dim],
            split_weight: vec![T::zero(); config.feature_dim],
            neighbor_buf: Vec::with_capacity(config.max_edges),
        })
    }

    pub fn config(&self) -> &GngConfig {
        &self.config
    }

    pub fn representation(&self) -> Representation {
        T::REPRESENTATION
    }

    pub fn params(&self) -> &LearningParams<T> {
        &self.params
    }

    /// Underlying store, for inspection
    pub fn topology(&self) -> &TopologyStore<T> {
        &self.store
    }

    pub fn feature_dim(&self) -> usize {
        self.config.feature_dim
    }

    pub fn active_nodes(&self) -> usize {
        self.store.node_count()
    }

    pub fn active_edges(&self) -> usize {
        self.store.edge_count()
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Nodes added by the growth controller since the last (re)initialization
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    pub fn saturation(&self) -> SaturationCounters {
        self.store.saturation()
    }

    /// `true` when fewer than two nodes are active and `adapt` cannot search
    pub fn is_collapsed(&self) -> bool {
        self.store.node_count() < 2
    }

    /// Drop every node and edge and zero all counters
    pub fn reset(&mut self) {
        self.store.clear();
        self.iteration = 0;
        self.insertions = 0;
        info!("GNG engine reset");
    }

    /// Reset and seed the network with two nodes joined by one edge
    pub fn initialize(&mut self, a: &[f32], b: &[f32]) -> Result<()> {
        self.check_dimension(a)?;
        self.check_dimension(b)?;

        self.reset();
        let first = self.push_node(a)?;
        let second = self.push_node(b)?;
        self.store.add_edge(first, second)?;

        info!(
            representation = %T::REPRESENTATION,
            "GNG initialized with two nodes"
        );
        Ok(())
    }

    /// Reset and seed the network from two distinct samples picked by `rng`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InsufficientSamples` if `data` holds fewer than two samples.
    pub fn initialize_from_samples<S, R>(&mut self, data: &[S], rng: &mut R) -> Result<()>
    where
        S: AsRef<[f32]>,
        R: Rng + ?Sized,
    {
        if data.len() < 2 {
            return Err(EngineError::InsufficientSamples {
                required: 2,
                available: data.len(),
            });
        }
        let picked = index::sample(rng, data.len(), 2);
        self.initialize(data[picked.index(0)].as_ref(), data[picked.index(1)].as_ref())
    }

    /// Append a single unconnected node
    ///
    /// Intended for seeding a network by hand. A node without an edge is
    /// removed by the next adaptation step that reaches compaction.
    pub fn add_node(&mut self, weight: &[f32]) -> Result<usize> {
        self.check_dimension(weight)?;
        self.push_node(weight)
    }

    /// Best and second-best matching units for `sample`, without adapting
    ///
    /// Returns `Ok(None)` when fewer than two nodes are active.
    pub fn find_two_nearest(&self, sample: &[f32]) -> Result<Option<NearestPair<f32>>> {
        self.check_dimension(sample)?;
        let encoded: Vec<T> = sample.iter().map(|&x| T::from_f32(x)).collect();
        Ok(find_two_nearest(&self.store, &encoded).map(|pair| NearestPair {
            best: pair.best,
            second: pair.second,
            best_distance: pair.best_distance.to_f32(),
        }))
    }

    pub(crate) fn check_dimension(&self, sample: &[f32]) -> Result<()> {
        if sample.len() != self.config.feature_dim {
            return Err(EngineError::DimensionMismatch {
                expected: self.config.feature_dim,
                actual: sample.len(),
            });
        }
        Ok(())
    }

    fn push_node(&mut self, weight: &[f32]) -> Result<usize> {
        for (slot, &x) in self.encoded_sample.iter_mut().zip(weight) {
            *slot = T::from_f32(x);
        }
        Ok(self.store.add_node(&self.encoded_sample)?)
    }
}
