// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # GNG Training Engine
//!
//! Online Growing Neural Gas over a bounded [`gng_topology::TopologyStore`].
//!
//! ## Architecture
//! - **search**: best and second-best matching units
//! - **adaptation**: the per-sample update ([`GrowingNeuralGas::adapt`])
//! - **growth**: periodic error-driven node insertion
//! - **snapshot**: read-only views and the embedded export tables
//! - **training**: epoch loop over a dataset with a caller-owned RNG
//! - **dynamic**: runtime choice between `f32` and Q16.16 ([`DynamicGng`])
//!
//! ## Example
//! ```
//! use gng_config::GngConfig;
//! use gng_engine::DynamicGng;
//! use rand::rngs::StdRng;
//! use rand::{Rng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let data: Vec<[f32; 2]> = (0..200).map(|_| [rng.gen(), rng.gen()]).collect();
//!
//! let config = GngConfig { max_nodes: 10, lambda: 25, ..GngConfig::default() };
//! let mut gng = DynamicGng::new(&config).unwrap();
//! let summary = gng.train(&data, 2, &mut rng).unwrap();
//!
//! assert_eq!(summary.steps, 400);
//! assert!(gng.active_nodes() <= 10);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adaptation;
pub mod dynamic;
pub mod engine;
pub mod error;
pub mod growth;
pub mod search;
pub mod snapshot;
pub mod training;

pub use adaptation::StepOutcome;
pub use dynamic::DynamicGng;
pub use engine::{GrowingNeuralGas, LearningParams};
pub use error::{EngineError, Result};
pub use growth::Insertion;
pub use search::{find_two_nearest, squared_distance, NearestPair};
pub use snapshot::{EdgeRecord, NetworkExport, NetworkSnapshot};
pub use training::TrainingSummary;
