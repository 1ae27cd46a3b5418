// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # GNG Configuration System
//!
//! Type-safe configuration for the bounded GNG training engine with support for:
//! - TOML file parsing
//! - Environment variable overrides (`GNG_*`)
//! - CLI argument overrides (`key=value` pairs)
//! - Validation of every field before an engine is built
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gng_config::{load_config, GngConfig};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("max_nodes: {}", config.max_nodes);
//! println!("representation: {}", config.representation);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, from_toml_str,
    load_config, CONFIG_FILE_NAME, CONFIG_PATH_ENV,
};
pub use types::GngConfig;
pub use validation::{
    collect_violations, validate_config, ConfigValidationError, MAX_EDGE_AGE, MAX_NODE_CAPACITY,
};

/// Re-export for convenience
pub use gng_numeric::Representation;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
