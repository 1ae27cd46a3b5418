// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Growth controller
//!
//! Every `lambda` adaptation steps the node with the largest accumulated error
//! (`q`) is split toward its worst neighbor (`f`): a new node `r` is placed at
//! their midpoint, edge `(q, f)` is replaced by `(q, r)` and `(r, f)`, both
//! errors are scaled by `alpha` and `r` inherits the decayed error of `q`.

use gng_numeric::Scalar;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::engine::GrowingNeuralGas;
use crate::error::Result;

/// Outcome of one insertion cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insertion {
    /// Node `node` was placed between `q` and `f`
    Inserted { node: usize, q: usize, f: usize },
    /// The highest-error node has no neighbor
    NoNeighbor,
    /// Node arena is full
    NodeCapacity,
    /// No spare edge slot for the extra edge the split needs
    EdgeCapacity,
}

/// Index of the largest value; ties go to the lower index
fn argmax<T: Scalar>(values: impl Iterator<Item = (usize, T)>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (index, value) in values {
        let replace = match best {
            Some((_, current)) => value > current,
            None => true,
        };
        if replace {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

impl<T: Scalar> GrowingNeuralGas<T> {
    /// Run one insertion cycle
    ///
    /// Capacity exhaustion skips the cycle and is counted in
    /// [`gng_topology::SaturationCounters::insertion_skips`].
    pub(crate) fn insert_node(&mut self) -> Result<Insertion> {
        if self.store.is_node_full() {
            self.store.record_insertion_skip();
            trace!(capacity = self.store.max_nodes(), "Insertion skipped, node arena full");
            return Ok(Insertion::NodeCapacity);
        }
        // Split removes one edge and adds two
        if self.store.is_edge_full() {
            self.store.record_insertion_skip();
            trace!(capacity = self.store.max_edges(), "Insertion skipped, edge list full");
            return Ok(Insertion::EdgeCapacity);
        }

        let errors = self.store.errors();
        let Some(q) = argmax(errors.iter().copied().enumerate()) else {
            return Ok(Insertion::NoNeighbor);
        };
        let Some(f) = argmax(self.store.neighbors(q).map(|n| (n, errors[n]))) else {
            trace!(q, "Insertion skipped, highest-error node has no neighbor");
            return Ok(Insertion::NoNeighbor);
        };

        for ((slot, &wq), &wf) in self
            .split_weight
            .iter_mut()
            .zip(self.store.weight(q))
            .zip(self.store.weight(f))
        {
            *slot = wq.midpoint(wf);
        }
        let r = self.store.add_node(&self.split_weight)?;

        self.store.remove_edge(q, f);
        self.store.add_edge(q, r)?;
        self.store.add_edge(r, f)?;

        let alpha = self.params.alpha;
        let errors = self.store.errors_mut();
        errors[q] = errors[q].mul(alpha);
        errors[f] = errors[f].mul(alpha);
        errors[r] = errors[q];

        self.insertions += 1;
        debug!(
            node = r,
            q,
            f,
            active_nodes = self.store.node_count(),
            iteration = self.iteration,
            "Inserted node"
        );
        Ok(Insertion::Inserted { node: r, q, f })
    }
}
