// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dataset-driven training loop

use gng_numeric::Scalar;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adaptation::StepOutcome;
use crate::engine::GrowingNeuralGas;
use crate::error::Result;

/// Counts from one call to [`GrowingNeuralGas::train`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub epochs: usize,
    /// Samples fed
    pub steps: u64,
    /// Samples that updated the network
    pub adapted: u64,
    /// Samples skipped because the network had collapsed
    pub collapsed: u64,
    /// Nodes added by the growth controller
    pub insertions: u64,
}

impl<T: Scalar> GrowingNeuralGas<T> {
    /// Feed every sample of `data` once per epoch, in a fresh random order each epoch
    ///
    /// An empty network is first seeded from two random samples. Steps that
    /// find the network collapsed are counted and skipped; reinitializing is
    /// left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InsufficientSamples` if the network is empty and
    /// `data` holds fewer than two samples, or `EngineError::DimensionMismatch`
    /// on the first sample of the wrong length.
    pub fn train<S, R>(&mut self, data: &[S], epochs: usize, rng: &mut R) -> Result<TrainingSummary>
    where
        S: AsRef<[f32]>,
        R: Rng + ?Sized,
    {
        if self.store.node_count() == 0 {
            self.initialize_from_samples(data, rng)?;
        }

        let insertions_before = self.insertions;
        let mut summary = TrainingSummary {
            epochs,
            ..TrainingSummary::default()
        };
        let mut order: Vec<usize> = (0..data.len()).collect();

        for epoch in 0..epochs {
            order.shuffle(rng);
            for &index in &order {
                summary.steps += 1;
                match self.adapt(data[index].as_ref())? {
                    StepOutcome::Adapted { .. } => summary.adapted += 1,
                    StepOutcome::Collapsed { .. } => summary.collapsed += 1,
                }
            }
            debug!(
                epoch,
                active_nodes = self.store.node_count(),
                active_edges = self.store.edge_count(),
                "Epoch complete"
            );
        }

        summary.insertions = self.insertions - insertions_before;
        info!(
            epochs,
            steps = summary.steps,
            collapsed = summary.collapsed,
            insertions = summary.insertions,
            active_nodes = self.store.node_count(),
            "Training complete"
        );
        Ok(summary)
    }
}
