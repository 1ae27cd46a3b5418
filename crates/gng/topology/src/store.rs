// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Fixed-capacity node arena and packed edge list
//!
//! Every buffer is allocated once in [`TopologyStore::new`] and sized to the
//! configured caps; nothing grows afterwards.

use gng_numeric::Scalar;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::edge::{Edge, EdgeInsert, EDGE_RECORD_BYTES};
use crate::error::{Result, TopologyError};

/// Largest node capacity addressable by the 16-bit edge endpoints
pub const MAX_NODE_CAPACITY: usize = u16::MAX as usize + 1;

const UNUSED: u32 = u32::MAX;

/// Counts of capacity-exhausted events
///
/// These are normal steady-state outcomes for a bounded network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaturationCounters {
    /// `add_edge` calls that found the edge list full
    pub edge_rejections: u64,
    /// `add_node` calls that found the node arena full
    pub node_rejections: u64,
    /// Insertion cycles skipped for lack of node or edge capacity
    pub insertion_skips: u64,
}

impl SaturationCounters {
    pub fn any(&self) -> bool {
        self.edge_rejections > 0 || self.node_rejections > 0 || self.insertion_skips > 0
    }
}

/// Memory accounting for the active part of the network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub node_bytes: usize,
    pub edge_bytes: usize,
    pub total_bytes: usize,
}

/// Bounded storage for GNG nodes and edges
///
/// Generic over `T: Scalar` so the same store holds `f32` or Q16.16 values.
///
/// # Example
/// ```
/// use gng_topology::TopologyStore;
///
/// let mut store = TopologyStore::<f32>::new(4, 8, 2).unwrap();
/// let a = store.add_node(&[0.0, 0.0]).unwrap();
/// let b = store.add_node(&[1.0, 1.0]).unwrap();
/// store.add_edge(a, b).unwrap();
/// assert_eq!(store.neighbors(a).collect::<Vec<_>>(), vec![b]);
/// ```
#[derive(Debug, Clone)]
pub struct TopologyStore<T: Scalar> {
    max_nodes: usize,
    max_edges: usize,
    feature_dim: usize,

    /// Active node count; slots `0..node_count` are live
    node_count: usize,

    /// Row-major weights, `max_nodes * feature_dim`
    weights: Vec<T>,

    /// Error accumulators, `max_nodes`
    errors: Vec<T>,

    /// Packed edge list, `len() <= max_edges`
    edges: Vec<Edge>,

    /// Scratch old-index -> new-index table used by `compact`
    remap: Vec<u32>,

    saturation: SaturationCounters,
}

impl<T: Scalar> TopologyStore<T> {
    /// Create a store with fixed capacities
    pub fn new(max_nodes: usize, max_edges: usize, feature_dim: usize) -> Result<Self> {
        if max_nodes == 0 || max_nodes > MAX_NODE_CAPACITY {
            return Err(TopologyError::InvalidParameters(format!(
                "max_nodes must be in 1..={}, got {}",
                MAX_NODE_CAPACITY, max_nodes
            )));
        }
        if max_edges == 0 {
            return Err(TopologyError::InvalidParameters(
                "max_edges must be at least 1".to_string(),
            ));
        }
        if feature_dim == 0 {
            return Err(TopologyError::InvalidParameters(
                "feature_dim must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_nodes,
            max_edges,
            feature_dim,
            node_count: 0,
            weights: vec![T::zero(); max_nodes * feature_dim],
            errors: vec![T::zero(); max_nodes],
            edges: Vec::with_capacity(max_edges),
            remap: vec![UNUSED; max_nodes],
            saturation: SaturationCounters::default(),
        })
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn max_edges(&self) -> usize {
        self.max_edges
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_node_full(&self) -> bool {
        self.node_count >= self.max_nodes
    }

    pub fn is_edge_full(&self) -> bool {
        self.edges.len() >= self.max_edges
    }

    pub fn saturation(&self) -> SaturationCounters {
        self.saturation
    }

    /// Record an insertion cycle that could not run for lack of capacity
    pub fn record_insertion_skip(&mut self) {
        self.saturation.insertion_skips += 1;
    }

    /// Drop every node and edge and zero the counters
    pub fn clear(&mut self) {
        self.node_count = 0;
        self.weights.fill(T::zero());
        self.errors.fill(T::zero());
        self.edges.clear();
        self.saturation = SaturationCounters::default();
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Append a node with zero error
    ///
    /// Returns the new slot index, or `CapacityExceeded` when the arena is full.
    pub fn add_node(&mut self, weight: &[T]) -> Result<usize> {
        if weight.len() != self.feature_dim {
            return Err(TopologyError::DimensionMismatch {
                expected: self.feature_dim,
                actual: weight.len(),
            });
        }
        if self.is_node_full() {
            self.saturation.node_rejections += 1;
            trace!(capacity = self.max_nodes, "node arena full");
            return Err(TopologyError::CapacityExceeded {
                requested: self.node_count + 1,
                available: self.max_nodes,
            });
        }

        let idx = self.node_count;
        let start = idx * self.feature_dim;
        self.weights[start..start + self.feature_dim].copy_from_slice(weight);
        self.errors[idx] = T::zero();
        self.node_count += 1;
        Ok(idx)
    }

    #[inline]
    fn check_node(&self, index: usize) -> Result<()> {
        if index >= self.node_count {
            return Err(TopologyError::InvalidNode {
                index,
                active: self.node_count,
            });
        }
        Ok(())
    }

    /// Weight vector of an active node
    ///
    /// # Panics
    /// Panics if `index >= node_count()`.
    #[inline]
    pub fn weight(&self, index: usize) -> &[T] {
        assert!(index < self.node_count, "node {} is not active", index);
        let start = index * self.feature_dim;
        &self.weights[start..start + self.feature_dim]
    }

    /// Mutable weight vector of an active node
    ///
    /// # Panics
    /// Panics if `index >= node_count()`.
    #[inline]
    pub fn weight_mut(&mut self, index: usize) -> &mut [T] {
        assert!(index < self.node_count, "node {} is not active", index);
        let start = index * self.feature_dim;
        &mut self.weights[start..start + self.feature_dim]
    }

    /// All active weights, row-major
    pub fn weights(&self) -> &[T] {
        &self.weights[..self.node_count * self.feature_dim]
    }

    /// Error accumulators of the active nodes
    pub fn errors(&self) -> &[T] {
        &self.errors[..self.node_count]
    }

    pub fn errors_mut(&mut self) -> &mut [T] {
        let count = self.node_count;
        &mut self.errors[..count]
    }

    pub fn error(&self, index: usize) -> Option<T> {
        self.errors().get(index).copied()
    }

    pub fn set_error(&mut self, index: usize, value: T) -> Result<()> {
        self.check_node(index)?;
        self.errors[index] = value;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Position of the edge joining `n1` and `n2` in the edge list
    pub fn find_edge(&self, n1: usize, n2: usize) -> Option<usize> {
        if n1 >= self.node_count || n2 >= self.node_count {
            return None;
        }
        let (n1, n2) = (n1 as u16, n2 as u16);
        self.edges.iter().position(|edge| edge.connects(n1, n2))
    }

    /// Create the edge, or reset its age to 0 if it already exists
    ///
    /// When the edge list is full a new edge is silently dropped
    /// ([`EdgeInsert::Saturated`]).
    pub fn add_edge(&mut self, n1: usize, n2: usize) -> Result<EdgeInsert> {
        self.check_node(n1)?;
        self.check_node(n2)?;
        if n1 == n2 {
            return Ok(EdgeInsert::SelfLoop);
        }

        if let Some(position) = self.find_edge(n1, n2) {
            self.edges[position].age = 0;
            return Ok(EdgeInsert::Refreshed(position));
        }

        if self.is_edge_full() {
            self.saturation.edge_rejections += 1;
            trace!(n1, n2, capacity = self.max_edges, "edge list full");
            return Ok(EdgeInsert::Saturated);
        }

        self.edges.push(Edge::new(n1 as u16, n2 as u16));
        Ok(EdgeInsert::Created(self.edges.len() - 1))
    }

    /// Remove the edge joining `n1` and `n2`, keeping the order of the others
    ///
    /// Returns `true` if an edge was removed.
    pub fn remove_edge(&mut self, n1: usize, n2: usize) -> bool {
        match self.find_edge(n1, n2) {
            Some(position) => {
                self.edges.remove(position);
                true
            }
            None => false,
        }
    }

    /// Nodes sharing an edge with `node`, in edge-list order
    pub fn neighbors(&self, node: usize) -> Neighbors<'_> {
        Neighbors {
            edges: self.edges.iter(),
            node: if node < self.node_count {
                Some(node as u16)
            } else {
                None
            },
        }
    }

    /// Number of edges touching `node`
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    /// Increment the age of every edge touching `node`, saturating at `u16::MAX`
    ///
    /// Returns the number of edges aged.
    pub fn age_edges_of(&mut self, node: usize) -> usize {
        if node >= self.node_count {
            return 0;
        }
        let node = node as u16;
        let mut aged = 0;
        for edge in self.edges.iter_mut().filter(|edge| edge.touches(node)) {
            edge.age = edge.age.saturating_add(1);
            aged += 1;
        }
        aged
    }

    /// Remove every edge whose age exceeds `max_age`
    ///
    /// Returns the number of edges removed.
    pub fn prune_edges_older_than(&mut self, max_age: u16) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.age <= max_age);
        before - self.edges.len()
    }

    /// Remove every node with no incident edge
    ///
    /// Survivors keep their relative order and are renumbered densely; every
    /// edge endpoint is rewritten through the same mapping. A single pass is a
    /// fixed point: removing an isolated node never isolates another one.
    ///
    /// Returns the number of nodes removed.
    pub fn compact(&mut self) -> usize {
        let count = self.node_count;
        let dim = self.feature_dim;

        let remap = &mut self.remap[..count];
        remap.fill(UNUSED);
        for edge in &self.edges {
            remap[edge.a as usize] = 0;
            remap[edge.b as usize] = 0;
        }

        let mut next = 0usize;
        for old in 0..count {
            if remap[old] == UNUSED {
                continue;
            }
            if next != old {
                self.weights
                    .copy_within(old * dim..(old + 1) * dim, next * dim);
                self.errors[next] = self.errors[old];
            }
            remap[old] = next as u32;
            next += 1;
        }

        let removed = count - next;
        if removed > 0 {
            for edge in &mut self.edges {
                edge.a = remap[edge.a as usize] as u16;
                edge.b = remap[edge.b as usize] as u16;
            }
            self.node_count = next;
        }
        removed
    }

    // ------------------------------------------------------------------
    // Accounting and checks
    // ------------------------------------------------------------------

    /// Bytes used by the active nodes and edges
    ///
    /// `node_count * (feature_dim * element + error) + edge_count * 6`
    pub fn memory_usage(&self) -> MemoryUsage {
        let node_bytes = self.node_count * (self.feature_dim * T::ELEMENT_BYTES + T::ELEMENT_BYTES);
        let edge_bytes = self.edges.len() * EDGE_RECORD_BYTES;
        MemoryUsage {
            node_bytes,
            edge_bytes,
            total_bytes: node_bytes + edge_bytes,
        }
    }

    /// Check the structural invariants of the edge list
    ///
    /// Endpoints are active, ordered `a < b` (so no self-loops) and every
    /// unordered pair appears at most once.
    pub fn validate(&self) -> Result<()> {
        if self.node_count > self.max_nodes || self.edges.len() > self.max_edges {
            return Err(TopologyError::CapacityExceeded {
                requested: self.node_count.max(self.edges.len()),
                available: self.max_nodes.min(self.max_edges),
            });
        }
        for (position, edge) in self.edges.iter().enumerate() {
            let corrupt = |reason| TopologyError::CorruptEdge {
                position,
                a: edge.a,
                b: edge.b,
                reason,
            };
            if edge.b as usize >= self.node_count {
                return Err(corrupt("endpoint is not an active node"));
            }
            if edge.a >= edge.b {
                return Err(corrupt("endpoints not strictly ordered"));
            }
            if self.edges[..position]
                .iter()
                .any(|other| other.a == edge.a && other.b == edge.b)
            {
                return Err(corrupt("duplicate edge"));
            }
        }
        Ok(())
    }
}

/// Iterator over the neighbors of one node
pub struct Neighbors<'a> {
    edges: core::slice::Iter<'a, Edge>,
    node: Option<u16>,
}

impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let node = self.node?;
        self.edges
            .by_ref()
            .find_map(|edge| edge.other(node))
            .map(|other| other as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gng_numeric::Q16;

    fn line(n: usize) -> TopologyStore<f32> {
        let mut store = TopologyStore::<f32>::new(8, 8, 1).unwrap();
        for i in 0..n {
            store.add_node(&[i as f32]).unwrap();
        }
        store
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        assert!(TopologyStore::<f32>::new(0, 4, 2).is_err());
        assert!(TopologyStore::<f32>::new(4, 0, 2).is_err());
        assert!(TopologyStore::<f32>::new(4, 4, 0).is_err());
        assert!(TopologyStore::<f32>::new(MAX_NODE_CAPACITY + 1, 4, 2).is_err());
    }

    #[test]
    fn test_add_node_until_full() {
        let mut store = TopologyStore::<Q16>::new(2, 4, 2).unwrap();
        assert_eq!(store.add_node(&[Q16::ONE, Q16::ZERO]), Ok(0));
        assert_eq!(store.add_node(&[Q16::ZERO, Q16::ONE]), Ok(1));
        assert!(matches!(
            store.add_node(&[Q16::ZERO, Q16::ZERO]),
            Err(TopologyError::CapacityExceeded { .. })
        ));
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.saturation().node_rejections, 1);
    }

    #[test]
    fn test_add_node_dimension_mismatch() {
        let mut store = TopologyStore::<f32>::new(2, 4, 2).unwrap();
        assert_eq!(
            store.add_node(&[1.0]),
            Err(TopologyError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_add_edge_is_idempotent() {
        let mut store = line(2);
        assert_eq!(store.add_edge(0, 1), Ok(EdgeInsert::Created(0)));
        store.age_edges_of(0);
        assert_eq!(store.edges()[0].age, 1);
        assert_eq!(store.add_edge(1, 0), Ok(EdgeInsert::Refreshed(0)));
        assert_eq!(store.edges()[0].age, 0);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_self_loop_is_noop() {
        let mut store = line(2);
        assert_eq!(store.add_edge(1, 1), Ok(EdgeInsert::SelfLoop));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_invalid_node() {
        let mut store = line(2);
        assert!(matches!(
            store.add_edge(0, 5),
            Err(TopologyError::InvalidNode { index: 5, .. })
        ));
    }

    #[test]
    fn test_add_edge_when_full_is_noop() {
        let mut store = TopologyStore::<f32>::new(4, 1, 1).unwrap();
        for i in 0..3 {
            store.add_node(&[i as f32]).unwrap();
        }
        assert!(store.add_edge(0, 1).unwrap().is_present());
        assert_eq!(store.add_edge(1, 2), Ok(EdgeInsert::Saturated));
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.saturation().edge_rejections, 1);
        // refreshing an existing edge still works when full
        assert_eq!(store.add_edge(0, 1), Ok(EdgeInsert::Refreshed(0)));
    }

    #[test]
    fn test_remove_edge_preserves_order() {
        let mut store = line(4);
        store.add_edge(0, 1).unwrap();
        store.add_edge(1, 2).unwrap();
        store.add_edge(2, 3).unwrap();
        assert!(store.remove_edge(2, 1));
        assert!(!store.remove_edge(2, 1));
        let pairs: Vec<_> = store.edges().iter().map(|e| e.endpoints()).collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_neighbors() {
        let mut store = line(4);
        store.add_edge(0, 1).unwrap();
        store.add_edge(2, 1).unwrap();
        store.add_edge(2, 3).unwrap();
        assert_eq!(store.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(store.neighbors(3).collect::<Vec<_>>(), vec![2]);
        assert_eq!(store.neighbors(7).count(), 0);
        assert_eq!(store.degree(2), 2);
    }

    #[test]
    fn test_age_and_prune() {
        let mut store = line(3);
        store.add_edge(0, 1).unwrap();
        store.add_edge(1, 2).unwrap();
        for _ in 0..3 {
            store.age_edges_of(0);
        }
        assert_eq!(store.edges()[0].age, 3);
        assert_eq!(store.edges()[1].age, 0);
        assert_eq!(store.prune_edges_older_than(3), 0);
        store.age_edges_of(0);
        assert_eq!(store.prune_edges_older_than(3), 1);
        assert_eq!(store.edges()[0].endpoints(), (1, 2));
    }

    #[test]
    fn test_age_saturates() {
        let mut store = line(2);
        store.add_edge(0, 1).unwrap();
        store.edges[0].age = u16::MAX;
        store.age_edges_of(1);
        assert_eq!(store.edges()[0].age, u16::MAX);
    }

    #[test]
    fn test_compact_removes_isolated_and_remaps() {
        let mut store = line(5);
        // 0 and 2 isolated
        store.add_edge(1, 3).unwrap();
        store.add_edge(3, 4).unwrap();
        store.set_error(4, 9.0).unwrap();

        assert_eq!(store.compact(), 2);
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.weights(), &[1.0, 3.0, 4.0]);
        assert_eq!(store.errors(), &[0.0, 0.0, 9.0]);
        let pairs: Vec<_> = store.edges().iter().map(|e| e.endpoints()).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_compact_without_edges_empties_store() {
        let mut store = line(3);
        assert_eq!(store.compact(), 3);
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn test_compact_is_fixed_point() {
        let mut store = line(4);
        store.add_edge(0, 3).unwrap();
        store.compact();
        assert_eq!(store.compact(), 0);
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn test_memory_usage() {
        let mut store = TopologyStore::<Q16>::new(8, 8, 3).unwrap();
        store.add_node(&[Q16::ZERO; 3]).unwrap();
        store.add_node(&[Q16::ONE; 3]).unwrap();
        store.add_edge(0, 1).unwrap();
        let usage = store.memory_usage();
        assert_eq!(usage.node_bytes, 2 * (3 * 4 + 4));
        assert_eq!(usage.edge_bytes, 6);
        assert_eq!(usage.total_bytes, 38);
    }

    #[test]
    fn test_validate_detects_dangling_edge() {
        let mut store = line(2);
        store.add_edge(0, 1).unwrap();
        store.node_count = 1;
        assert!(matches!(
            store.validate(),
            Err(TopologyError::CorruptEdge { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut store = line(3);
        store.add_edge(0, 1).unwrap();
        store.record_insertion_skip();
        store.clear();
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.edge_count(), 0);
        assert!(!store.saturation().any());
    }
}
