// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Round trips a full configuration file through the public loader

use gng_config::{from_toml_str, ConfigError, GngConfig, Representation};

const FULL_CONFIG: &str = r#"
max_nodes = 20
max_edges = 40
feature_dim = 3
epsilon_winner = 0.1
epsilon_neighbor = 0.005
alpha = 0.5
beta = 0.9
max_age = 25
lambda = 50
representation = "float"
"#;

#[test]
fn full_file_parses() {
    let config = from_toml_str(FULL_CONFIG).unwrap();
    assert_eq!(
        config,
        GngConfig {
            max_nodes: 20,
            max_edges: 40,
            feature_dim: 3,
            epsilon_winner: 0.1,
            epsilon_neighbor: 0.005,
            alpha: 0.5,
            beta: 0.9,
            max_age: 25,
            lambda: 50,
            representation: Representation::Float,
        }
    );
}

#[test]
fn serialized_defaults_parse_back() {
    let text = toml::to_string(&GngConfig::default()).unwrap();
    assert_eq!(from_toml_str(&text).unwrap(), GngConfig::default());
}

#[test]
fn json_uses_lowercase_representation() {
    let json = serde_json::to_value(GngConfig::default()).unwrap();
    assert_eq!(json["representation"], "fixed");
}

#[test]
fn bad_representation_is_parse_error() {
    let result = from_toml_str("representation = \"double\"");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn negative_capacity_is_parse_error() {
    let result = from_toml_str("max_nodes = -4");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
