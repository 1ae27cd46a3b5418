// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-sample adaptation step
//!
//! One call to [`GrowingNeuralGas::adapt`] runs, in order: nearest-unit
//! search, winner error accumulation, winner and neighbor movement, edge
//! refresh, aging of the winner's edges, pruning of stale edges, compaction of
//! isolated nodes, the periodic insertion cycle and the global error decay.

use gng_numeric::Scalar;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::engine::GrowingNeuralGas;
use crate::error::Result;
use crate::growth::Insertion;
use crate::search::find_two_nearest;

/// Result of feeding one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The network was updated
    ///
    /// `best` and `second` are the matching units as indexed before
    /// compaction.
    Adapted {
        best: usize,
        second: usize,
        pruned_edges: usize,
        removed_nodes: usize,
        insertion: Option<Insertion>,
    },
    /// Fewer than two nodes are active; nothing was changed
    ///
    /// The caller decides whether to reinitialize.
    Collapsed { active_nodes: usize },
}

impl StepOutcome {
    pub fn is_collapsed(&self) -> bool {
        matches!(self, StepOutcome::Collapsed { .. })
    }

    /// Node created by this step's insertion cycle, if any
    pub fn inserted_node(&self) -> Option<usize> {
        match self {
            StepOutcome::Adapted {
                insertion: Some(Insertion::Inserted { node, .. }),
                ..
            } => Some(*node),
            _ => None,
        }
    }
}

impl<T: Scalar> GrowingNeuralGas<T> {
    /// Feed one sample
    ///
    /// # Errors
    ///
    /// Returns `EngineError::DimensionMismatch` if `sample.len()` differs from
    /// `feature_dim`. A network with fewer than two nodes is reported as
    /// [`StepOutcome::Collapsed`], not as an error.
    pub fn adapt(&mut self, sample: &[f32]) -> Result<StepOutcome> {
        self.check_dimension(sample)?;

        for (slot, &x) in self.encoded_sample.iter_mut().zip(sample) {
            *slot = T::from_f32(x);
        }

        let Some(pair) = find_two_nearest(&self.store, &self.encoded_sample) else {
            let active_nodes = self.store.node_count();
            debug!(active_nodes, "Network collapsed, sample skipped");
            return Ok(StepOutcome::Collapsed { active_nodes });
        };
        let (s1, s2) = (pair.best, pair.second);

        let errors = self.store.errors_mut();
        errors[s1] = errors[s1].saturating_add(pair.best_distance);

        self.move_toward_sample(s1, self.params.epsilon_winner);

        self.neighbor_buf.clear();
        self.neighbor_buf.extend(self.store.neighbors(s1));
        for i in 0..self.neighbor_buf.len() {
            let neighbor = self.neighbor_buf[i];
            self.move_toward_sample(neighbor, self.params.epsilon_neighbor);
        }

        self.store.add_edge(s1, s2)?;
        self.store.age_edges_of(s1);

        let pruned_edges = self.store.prune_edges_older_than(self.config.max_age);
        let removed_nodes = self.store.compact();
        if pruned_edges > 0 || removed_nodes > 0 {
            debug!(
                pruned_edges,
                removed_nodes,
                active_nodes = self.store.node_count(),
                "Pruned stale topology"
            );
        }
        if self.store.node_count() < 2 {
            warn!(
                active_nodes = self.store.node_count(),
                iteration = self.iteration,
                "Network collapsed after pruning"
            );
        }

        self.iteration += 1;
        let insertion = if self.iteration % u64::from(self.config.lambda) == 0 {
            Some(self.insert_node()?)
        } else {
            None
        };

        let beta = self.params.beta;
        for error in self.store.errors_mut() {
            *error = error.mul(beta);
        }

        trace!(
            iteration = self.iteration,
            s1,
            s2,
            nodes = self.store.node_count(),
            edges = self.store.edge_count(),
            "Adaptation step"
        );

        Ok(StepOutcome::Adapted {
            best: s1,
            second: s2,
            pruned_edges,
            removed_nodes,
            insertion,
        })
    }

    /// `w += rate * (x - w)` against the encoded sample
    fn move_toward_sample(&mut self, node: usize, rate: T) {
        let weight = self.store.weight_mut(node);
        for (w, &x) in weight.iter_mut().zip(&self.encoded_sample) {
            *w = w.saturating_add(rate.mul(x.saturating_sub(*w)));
        }
    }
}
