// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! The merged result is validated before it is returned.

use crate::{validate_config, ConfigError, ConfigResult, GngConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "gng_configuration.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "GNG_CONFIG_PATH";

/// Environment variable -> config key
const ENV_OVERRIDES: [(&str, &str); 10] = [
    ("GNG_MAX_NODES", "max_nodes"),
    ("GNG_MAX_EDGES", "max_edges"),
    ("GNG_FEATURE_DIM", "feature_dim"),
    ("GNG_EPSILON_WINNER", "epsilon_winner"),
    ("GNG_EPSILON_NEIGHBOR", "epsilon_neighbor"),
    ("GNG_ALPHA", "alpha"),
    ("GNG_BETA", "beta"),
    ("GNG_MAX_AGE", "max_age"),
    ("GNG_LAMBDA", "lambda"),
    ("GNG_REPRESENTATION", "representation"),
];

/// Find the GNG configuration file
///
/// Search order:
/// 1. `GNG_CONFIG_PATH` environment variable
/// 2. Current working directory: `./gng_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "GNG configuration file '{}' not found in any of these locations:\n{}\n\nSet {} environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides keyed by field name
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<GngConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };
    debug!(path = %config_file.display(), "Loading GNG configuration");

    let content = fs::read_to_string(&config_file)?;
    let mut config: GngConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Parse and validate an in-memory TOML document
///
/// No environment or CLI overrides are applied.
///
/// # Example
/// ```
/// use gng_config::{from_toml_str, Representation};
///
/// let config = from_toml_str("max_nodes = 20\nrepresentation = \"float\"").unwrap();
/// assert_eq!(config.max_nodes, 20);
/// assert_eq!(config.representation, Representation::Float);
/// assert_eq!(config.lambda, 300); // Default
/// ```
pub fn from_toml_str(content: &str) -> ConfigResult<GngConfig> {
    let config: GngConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `GNG_MAX_NODES` -> `max_nodes`
/// - `GNG_MAX_EDGES` -> `max_edges`
/// - `GNG_FEATURE_DIM` -> `feature_dim`
/// - `GNG_EPSILON_WINNER` -> `epsilon_winner`
/// - `GNG_EPSILON_NEIGHBOR` -> `epsilon_neighbor`
/// - `GNG_ALPHA` -> `alpha`
/// - `GNG_BETA` -> `beta`
/// - `GNG_MAX_AGE` -> `max_age`
/// - `GNG_LAMBDA` -> `lambda`
/// - `GNG_REPRESENTATION` -> `representation`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut GngConfig) {
    for (variable, key) in ENV_OVERRIDES {
        if let Ok(value) = env::var(variable) {
            apply_override(config, key, &value);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"max_nodes": "20", "representation": "float"}`)
///
/// Unknown keys and values that fail to parse are ignored.
pub fn apply_cli_overrides(config: &mut GngConfig, cli_args: &HashMap<String, String>) {
    for (key, value) in cli_args {
        apply_override(config, key, value);
    }
}

fn apply_override(config: &mut GngConfig, key: &str, value: &str) {
    let applied = match key {
        "max_nodes" => set_parsed(&mut config.max_nodes, value),
        "max_edges" => set_parsed(&mut config.max_edges, value),
        "feature_dim" => set_parsed(&mut config.feature_dim, value),
        "epsilon_winner" => set_parsed(&mut config.epsilon_winner, value),
        "epsilon_neighbor" => set_parsed(&mut config.epsilon_neighbor, value),
        "alpha" => set_parsed(&mut config.alpha, value),
        "beta" => set_parsed(&mut config.beta, value),
        "max_age" => set_parsed(&mut config.max_age, value),
        "lambda" => set_parsed(&mut config.lambda, value),
        "representation" => set_parsed(&mut config.representation, value),
        _ => {
            debug!(key, "Ignoring unknown configuration override");
            return;
        }
    };

    if !applied {
        warn!(key, value, "Ignoring configuration override that failed to parse");
    }
}

fn set_parsed<T: FromStr>(field: &mut T, value: &str) -> bool {
    match value.trim().parse::<T>() {
        Ok(parsed) => {
            *field = parsed;
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Representation;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_gng_env() {
        for (variable, _) in ENV_OVERRIDES {
            env::remove_var(variable);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("does_not_exist.toml");

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_gng_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "max_nodes = 20").unwrap();
        writeln!(file, "lambda = 50").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.max_nodes, 20);
        assert_eq!(config.lambda, 50);
        assert_eq!(config.max_edges, 64);
        assert_eq!(config.representation, Representation::Fixed);
    }

    #[test]
    fn test_load_rejects_unknown_key() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_gng_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "max_nodez = 20\n").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_gng_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "max_nodes = 1\nbeta = 0.0\n").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = GngConfig::default();

        env::set_var("GNG_MAX_NODES", "128");
        env::set_var("GNG_REPRESENTATION", "float");
        env::set_var("GNG_ALPHA", "not-a-number");

        apply_environment_overrides(&mut config);
        clear_gng_env();

        assert_eq!(config.max_nodes, 128);
        assert_eq!(config.representation, Representation::Float);
        assert_eq!(config.alpha, 0.5);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = GngConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("max_age".to_string(), "50".to_string());
        cli_args.insert("epsilon_winner".to_string(), "0.2".to_string());
        cli_args.insert("unknown".to_string(), "1".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.max_age, 50);
        assert_eq!(config.epsilon_winner, 0.2);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_gng_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "max_nodes = 10").unwrap();
        writeln!(file, "max_edges = 10").unwrap();

        env::set_var("GNG_MAX_NODES", "40");
        env::set_var("GNG_MAX_EDGES", "80");

        let mut cli_args = HashMap::new();
        cli_args.insert("max_nodes".to_string(), "60".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_gng_env();

        // CLI wins for max_nodes, env wins for max_edges (no CLI override)
        assert_eq!(config.max_nodes, 60);
        assert_eq!(config.max_edges, 80);
    }

    #[test]
    fn test_override_validated_after_merge() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_gng_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "").unwrap();

        let mut cli_args = HashMap::new();
        cli_args.insert("feature_dim".to_string(), "0".to_string());

        let result = load_config(Some(&config_path), Some(&cli_args));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
