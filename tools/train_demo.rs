// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Train a network on uniform random samples and print its snapshot as JSON.
//!
//! Usage: train_demo [config.toml] [--samples N] [--epochs N] [--seed N] [key=value ...]
//!
//! `key=value` pairs override configuration fields after the file and `GNG_*`
//! environment variables. Without a config path the default search applies,
//! falling back to built-in defaults when no file is found.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use gng_lite::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    GngConfig,
};
use gng_lite::engine::DynamicGng;
use gng_lite::observability::{debug_flags_help, init_logging, parse_debug_flags};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

struct DemoArgs {
    config_path: Option<PathBuf>,
    samples: usize,
    epochs: usize,
    seed: u64,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: train_demo [config.toml] [--samples N] [--epochs N] [--seed N] [key=value ...]\n\n\
         Defaults:\n\
         - samples: 1000\n\
         - epochs: 1\n\
         - seed: 42\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> T {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| usage_and_exit())
}

fn parse_args() -> DemoArgs {
    let mut parsed = DemoArgs {
        config_path: None,
        samples: 1000,
        epochs: 1,
        seed: 42,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--samples" => parsed.samples = parse_number(args.next()),
            "--epochs" => parsed.epochs = parse_number(args.next()),
            "--seed" => parsed.seed = parse_number(args.next()),
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            flag if flag.starts_with("--debug-") => {}
            other => match other.split_once('=') {
                Some((key, value)) => {
                    parsed.overrides.insert(key.to_string(), value.to_string());
                }
                None if parsed.config_path.is_none() => {
                    parsed.config_path = Some(PathBuf::from(other));
                }
                None => usage_and_exit(),
            },
        }
    }

    parsed
}

fn resolve_config(args: &DemoArgs) -> Result<GngConfig> {
    match load_config(args.config_path.as_deref(), Some(&args.overrides)) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) if args.config_path.is_none() => {
            warn!("No configuration file found, using defaults");
            let mut config = GngConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &args.overrides);
            validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(err).context("Failed to load configuration"),
    }
}

fn main() -> Result<()> {
    let args = parse_args();
    init_logging("info", &parse_debug_flags())?;

    let config = resolve_config(&args)?;
    info!(
        representation = %config.representation,
        max_nodes = config.max_nodes,
        max_edges = config.max_edges,
        feature_dim = config.feature_dim,
        "Configuration loaded"
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let data: Vec<Vec<f32>> = (0..args.samples)
        .map(|_| (0..config.feature_dim).map(|_| rng.gen::<f32>()).collect())
        .collect();

    let mut gng = DynamicGng::new(&config)?;
    let summary = gng.train(&data, args.epochs, &mut rng)?;
    info!(
        steps = summary.steps,
        collapsed = summary.collapsed,
        insertions = summary.insertions,
        active_nodes = gng.active_nodes(),
        active_edges = gng.active_edges(),
        total_bytes = gng.memory_usage().total_bytes,
        "Training finished"
    );

    let json = serde_json::to_string_pretty(&gng.snapshot())?;
    println!("{}", json);
    Ok(())
}
