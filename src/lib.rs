// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # gng-lite - Bounded-Memory Growing Neural Gas
//!
//! Growing Neural Gas incrementally builds a graph whose nodes follow the
//! density of a sample stream. This implementation keeps every buffer at a
//! fixed capacity so the same algorithm runs on a desktop or inside a
//! microcontroller memory budget, and can do all of its arithmetic in Q16.16
//! fixed point.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! gng-lite = "0.1"
//! ```
//!
//! ```rust
//! use gng_lite::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::{Rng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let data: Vec<[f32; 2]> = (0..500).map(|_| [rng.gen(), rng.gen()]).collect();
//!
//! let config = GngConfig { max_nodes: 20, lambda: 50, ..GngConfig::default() };
//! let mut gng = DynamicGng::new(&config)?;
//! gng.initialize(&[0.0, 0.0], &[1.0, 1.0])?;
//! for sample in &data {
//!     gng.adapt(sample)?;
//! }
//!
//! let snapshot = gng.snapshot();
//! assert!(snapshot.weights.len() <= 20);
//! # Ok::<(), gng_lite::engine::EngineError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`observability`** (default): console logging setup for the bundled tools
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: gng-numeric                                │
//! │  (Q16.16 operators, Scalar trait for f32 / Q16)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Storage: gng-topology                                  │
//! │  (Bounded node arena, packed edge list, compaction)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithm: gng-engine                                  │
//! │  (Search, adaptation, growth, snapshot/export)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use gng_config as config;
pub use gng_engine as engine;
pub use gng_numeric as numeric;
pub use gng_topology as topology;

#[cfg(feature = "observability")]
pub use gng_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{load_config, GngConfig};
    pub use crate::engine::{
        DynamicGng, EngineError, GrowingNeuralGas, Insertion, NetworkExport, NetworkSnapshot,
        StepOutcome, TrainingSummary,
    };
    pub use crate::numeric::{Representation, Scalar, Q16};
    pub use crate::topology::{MemoryUsage, SaturationCounters};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_builds_engine() {
        let gng = DynamicGng::new(&GngConfig::default()).unwrap();
        assert_eq!(gng.representation(), Representation::Fixed);
        assert_eq!(gng.memory_usage(), MemoryUsage::default());
    }

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
