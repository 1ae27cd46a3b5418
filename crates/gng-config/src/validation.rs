// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every rule is checked and all violations are reported together, so a bad
//! file can be fixed in one pass.

use crate::{ConfigError, ConfigResult, GngConfig};

/// Edge endpoints are stored as 16-bit indices
pub const MAX_NODE_CAPACITY: usize = 1 << 16;

/// Largest usable `max_age`; edge ages saturate at `u16::MAX` and must be able to exceed it
pub const MAX_EDGE_AGE: u16 = u16::MAX - 1;

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    BelowMinimum {
        field: &'static str,
        minimum: usize,
        actual: usize,
    },
    AboveMaximum {
        field: &'static str,
        maximum: usize,
        actual: usize,
    },
    RateOutOfRange {
        field: &'static str,
        value: f32,
    },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BelowMinimum {
                field,
                minimum,
                actual,
            } => write!(f, "{} = {} must be at least {}", field, actual, minimum),
            Self::AboveMaximum {
                field,
                maximum,
                actual,
            } => write!(f, "{} = {} must be at most {}", field, actual, maximum),
            Self::RateOutOfRange { field, value } => {
                write!(f, "{} = {} must be finite and in (0, 1]", field, value)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Capacity minimums (`max_nodes >= 2`, `max_edges >= 1`, `feature_dim >= 1`)
/// - Node capacity addressable by a 16-bit edge endpoint
/// - `max_age` below the saturated edge age
/// - Learning rates and decay factors in (0, 1]
/// - Insertion period `lambda >= 1`
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &GngConfig) -> ConfigResult<()> {
    let errors = collect_violations(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Every rule the configuration violates, in field order
pub fn collect_violations(config: &GngConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    validate_capacities(config, &mut errors);
    validate_rates(config, &mut errors);

    if config.lambda < 1 {
        errors.push(ConfigValidationError::BelowMinimum {
            field: "lambda",
            minimum: 1,
            actual: config.lambda as usize,
        });
    }

    errors
}

fn validate_capacities(config: &GngConfig, errors: &mut Vec<ConfigValidationError>) {
    let minimums = [
        ("max_nodes", config.max_nodes, 2),
        ("max_edges", config.max_edges, 1),
        ("feature_dim", config.feature_dim, 1),
    ];
    for (field, actual, minimum) in minimums {
        if actual < minimum {
            errors.push(ConfigValidationError::BelowMinimum {
                field,
                minimum,
                actual,
            });
        }
    }

    if config.max_nodes > MAX_NODE_CAPACITY {
        errors.push(ConfigValidationError::AboveMaximum {
            field: "max_nodes",
            maximum: MAX_NODE_CAPACITY,
            actual: config.max_nodes,
        });
    }

    if config.max_age > MAX_EDGE_AGE {
        errors.push(ConfigValidationError::AboveMaximum {
            field: "max_age",
            maximum: MAX_EDGE_AGE as usize,
            actual: config.max_age as usize,
        });
    }
}

fn validate_rates(config: &GngConfig, errors: &mut Vec<ConfigValidationError>) {
    let rates = [
        ("epsilon_winner", config.epsilon_winner),
        ("epsilon_neighbor", config.epsilon_neighbor),
        ("alpha", config.alpha),
        ("beta", config.beta),
    ];
    for (field, value) in rates {
        // NaN fails both comparisons
        if !(value > 0.0 && value <= 1.0) {
            errors.push(ConfigValidationError::RateOutOfRange { field, value });
        }
    }
}
