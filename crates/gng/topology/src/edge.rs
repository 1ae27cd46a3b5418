// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compact edge record

use serde::{Deserialize, Serialize};

/// Bytes per edge record: two 16-bit endpoints and one 16-bit age
pub const EDGE_RECORD_BYTES: usize = 6;

/// Undirected edge, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: u16,
    pub b: u16,
    pub age: u16,
}

impl Edge {
    /// New edge with age 0, endpoints ordered so that `a < b`
    #[inline]
    pub fn new(n1: u16, n2: u16) -> Self {
        let (a, b) = if n1 <= n2 { (n1, n2) } else { (n2, n1) };
        Self { a, b, age: 0 }
    }

    #[inline]
    pub fn touches(&self, node: u16) -> bool {
        self.a == node || self.b == node
    }

    #[inline]
    pub fn connects(&self, n1: u16, n2: u16) -> bool {
        (self.a == n1 && self.b == n2) || (self.a == n2 && self.b == n1)
    }

    /// The endpoint opposite to `node`, if the edge touches it
    #[inline]
    pub fn other(&self, node: u16) -> Option<u16> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (usize, usize) {
        (self.a as usize, self.b as usize)
    }
}

/// Outcome of [`crate::TopologyStore::add_edge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// New edge appended at this position in the edge list
    Created(usize),
    /// Existing edge at this position had its age reset to 0
    Refreshed(usize),
    /// Edge list full; nothing changed
    Saturated,
    /// Both endpoints were the same node; nothing changed
    SelfLoop,
}

impl EdgeInsert {
    /// True when the edge exists after the call
    pub fn is_present(self) -> bool {
        matches!(self, EdgeInsert::Created(_) | EdgeInsert::Refreshed(_))
    }
}
