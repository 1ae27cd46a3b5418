// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read-only views of engine state
//!
//! Every view returns an owned point-in-time copy; none of them mutate the
//! engine.

use bytemuck::{Pod, Zeroable};
use gng_numeric::{Representation, Scalar};
use gng_topology::{Edge, MemoryUsage, SaturationCounters};
use serde::{Deserialize, Serialize};

use crate::engine::GrowingNeuralGas;

/// Serializable copy of the whole network, decoded to floats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub representation: Representation,
    pub feature_dim: usize,
    pub iteration: u64,
    pub weights: Vec<Vec<f32>>,
    pub errors: Vec<f32>,
    /// `(a, b)` with `a < b`
    pub edges: Vec<(usize, usize)>,
    pub memory: MemoryUsage,
    pub saturation: SaturationCounters,
}

/// Edge table entry of the embedded export
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub a: u16,
    pub b: u16,
}

/// Tables consumed by embedded deployment tooling
///
/// `node_table` holds every active weight as a raw Q16.16 value, row-major;
/// `edge_table` holds one `(u16, u16)` record per active edge. Both are sized
/// exactly to the active counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkExport {
    pub node_count: usize,
    pub edge_count: usize,
    pub feature_dim: usize,
    pub node_table: Vec<i32>,
    pub edge_table: Vec<EdgeRecord>,
}

impl NetworkExport {
    /// Node table as native-endian bytes, no padding
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.node_table)
    }

    /// Edge table as native-endian bytes, 4 per record
    pub fn edge_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.edge_table)
    }
}

impl<T: Scalar> GrowingNeuralGas<T> {
    /// Weight vector of every active node, decoded to `f32`
    pub fn weights_as_float(&self) -> Vec<Vec<f32>> {
        self.store
            .weights()
            .chunks_exact(self.config.feature_dim)
            .map(|row| row.iter().map(|w| w.to_f32()).collect())
            .collect()
    }

    /// Error accumulator of every active node, decoded to `f32`
    pub fn errors_as_float(&self) -> Vec<f32> {
        self.store.errors().iter().map(|e| e.to_f32()).collect()
    }

    /// Active edges as `(a, b)` pairs with `a < b`, in edge-list order
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.store.edges().iter().map(Edge::endpoints).collect()
    }

    /// Active edges including their ages
    pub fn edge_records(&self) -> Vec<Edge> {
        self.store.edges().to_vec()
    }

    pub fn memory_usage(&self) -> MemoryUsage {
        self.store.memory_usage()
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            representation: T::REPRESENTATION,
            feature_dim: self.config.feature_dim,
            iteration: self.iteration,
            weights: self.weights_as_float(),
            errors: self.errors_as_float(),
            edges: self.edges(),
            memory: self.memory_usage(),
            saturation: self.saturation(),
        }
    }

    /// Node and edge tables in the embedded export layout
    pub fn export(&self) -> NetworkExport {
        NetworkExport {
            node_count: self.store.node_count(),
            edge_count: self.store.edge_count(),
            feature_dim: self.config.feature_dim,
            node_table: self.store.weights().iter().map(|w| w.to_fixed_raw()).collect(),
            edge_table: self
                .store
                .edges()
                .iter()
                .map(|edge| EdgeRecord {
                    a: edge.a,
                    b: edge.b,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gng_config::GngConfig;
    use gng_numeric::Q16;

    fn seeded<T: Scalar>() -> GrowingNeuralGas<T> {
        let config = GngConfig {
            feature_dim: 3,
            ..GngConfig::default()
        };
        let mut gng = GrowingNeuralGas::<T>::new(&config).unwrap();
        gng.initialize(&[0.0, 0.5, 1.0], &[-1.0, 2.0, 0.25]).unwrap();
        gng
    }

    #[test]
    fn test_weights_decode() {
        let gng = seeded::<Q16>();
        assert_eq!(
            gng.weights_as_float(),
            vec![vec![0.0, 0.5, 1.0], vec![-1.0, 2.0, 0.25]]
        );
    }

    #[test]
    fn test_memory_usage_formula() {
        let gng = seeded::<f32>();
        let usage = gng.memory_usage();

        // 2 * (3 * 4 + 4) + 1 * 6
        assert_eq!(usage.node_bytes, 32);
        assert_eq!(usage.edge_bytes, 6);
        assert_eq!(usage.total_bytes, 38);
        assert_eq!(seeded::<Q16>().memory_usage(), usage);
    }

    #[test]
    fn test_export_tables() {
        let gng = seeded::<f32>();
        let export = gng.export();

        assert_eq!(export.node_count, 2);
        assert_eq!(export.edge_count, 1);
        assert_eq!(
            export.node_table,
            vec![0, 32768, 65536, -65536, 131072, 16384]
        );
        assert_eq!(export.edge_table, vec![EdgeRecord { a: 0, b: 1 }]);
        assert_eq!(export.node_bytes().len(), 6 * 4);
        assert_eq!(export.edge_bytes().len(), 4);
    }

    #[test]
    fn test_export_matches_across_representations() {
        assert_eq!(seeded::<f32>().export(), seeded::<Q16>().export());
    }

    #[test]
    fn test_snapshot_serializes() {
        let gng = seeded::<Q16>();
        let snapshot = gng.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: NetworkSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.edges, vec![(0, 1)]);
        assert!(json.contains("\"representation\":\"fixed\""));
    }

    #[test]
    fn test_views_do_not_mutate() {
        let gng = seeded::<f32>();
        let before = gng.snapshot();
        let _ = gng.export();
        let _ = gng.edge_records();
        assert_eq!(gng.snapshot(), before);
    }
}
