// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end training scenarios, run in both representations

use gng_config::{GngConfig, Representation};
use gng_engine::{DynamicGng, Insertion, StepOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniform_samples(count: usize, seed: u64) -> Vec<[f32; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| [rng.gen(), rng.gen()]).collect()
}

fn assert_every_node_connected(gng: &DynamicGng) {
    let mut degree = vec![0usize; gng.active_nodes()];
    for (a, b) in gng.edges() {
        assert!(a < b, "edge ({}, {}) not ordered", a, b);
        degree[a] += 1;
        degree[b] += 1;
    }
    assert!(degree.iter().all(|&d| d > 0), "isolated node in {:?}", degree);
}

#[test]
fn uniform_square_stays_within_caps() {
    for representation in [Representation::Float, Representation::Fixed] {
        let config = GngConfig {
            max_nodes: 20,
            lambda: 50,
            ..GngConfig::default()
        }
        .with_representation(representation);
        let mut gng = DynamicGng::new(&config).unwrap();
        gng.initialize(&[0.0, 0.0], &[1.0, 1.0]).unwrap();

        for sample in uniform_samples(1000, 11) {
            gng.adapt(&sample).unwrap();
        }

        let nodes = gng.active_nodes();
        assert!((2..=20).contains(&nodes), "{} nodes with {}", nodes, representation);
        assert!(gng.active_edges() <= config.max_edges);
        assert_every_node_connected(&gng);
        assert!(gng.insertions() > 0);
    }
}

#[test]
fn single_edge_capacity_rejects_second_pair() {
    let config = GngConfig {
        max_edges: 1,
        ..GngConfig::default()
    };
    let mut gng = DynamicGng::new(&config).unwrap();
    gng.initialize(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
    gng.add_node(&[0.5, 0.5]).unwrap();

    // Winner is the unconnected node, runner-up node 0: a second distinct pair
    let outcome = gng.adapt(&[0.4, 0.4]).unwrap();

    assert!(matches!(
        outcome,
        StepOutcome::Adapted {
            best: 2,
            second: 0,
            removed_nodes: 1,
            ..
        }
    ));
    assert_eq!(gng.active_edges(), 1);
    assert_eq!(gng.edges(), vec![(0, 1)]);
    assert_eq!(gng.saturation().edge_rejections, 1);
    assert_every_node_connected(&gng);
}

#[test]
fn single_edge_capacity_never_splits() {
    let config = GngConfig {
        max_edges: 1,
        lambda: 1,
        ..GngConfig::default()
    };
    let mut gng = DynamicGng::new(&config).unwrap();
    gng.initialize(&[0.0, 0.0], &[1.0, 1.0]).unwrap();

    for sample in uniform_samples(25, 3) {
        let outcome = gng.adapt(&sample).unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Adapted {
                insertion: Some(Insertion::EdgeCapacity),
                ..
            }
        ));
    }
    assert_eq!(gng.active_nodes(), 2);
    assert_eq!(gng.active_edges(), 1);
    assert_eq!(gng.saturation().insertion_skips, 25);
}

#[test]
fn lone_node_reports_collapse() {
    for representation in [Representation::Float, Representation::Fixed] {
        let config = GngConfig::default().with_representation(representation);
        let mut gng = DynamicGng::new(&config).unwrap();
        gng.add_node(&[0.25, 0.75]).unwrap();

        let outcome = gng.adapt(&[0.3, 0.7]).unwrap();

        assert_eq!(outcome, StepOutcome::Collapsed { active_nodes: 1 });
        assert_eq!(gng.active_nodes(), 1);
        assert_eq!(gng.weights_as_float(), vec![vec![0.25, 0.75]]);
    }
}

#[test]
fn edge_age_counts_winner_steps() {
    let config = GngConfig {
        max_nodes: 3,
        lambda: 1,
        max_age: 100,
        representation: Representation::Float,
        ..GngConfig::default()
    };
    let mut gng = DynamicGng::new(&config).unwrap();
    gng.initialize(&[0.0, 0.0], &[1.0, 1.0]).unwrap();

    // Splits (0, 1) into a chain 0 - 2 - 1 and fills the arena
    let first = gng.adapt(&[0.0, 0.0]).unwrap();
    assert_eq!(first.inserted_node(), Some(2));
    assert_eq!(gng.edges(), vec![(0, 2), (1, 2)]);

    let age_of = |gng: &DynamicGng, a: u16, b: u16| {
        gng.edge_records()
            .iter()
            .find(|edge| edge.a == a && edge.b == b)
            .map(|edge| edge.age)
    };

    // Node 2 wins with node 0 as runner-up: (0, 2) is refreshed, (1, 2) only ages
    for expected in 1..=10u16 {
        let outcome = gng.adapt(&[0.3, 0.3]).unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Adapted {
                best: 2,
                second: 0,
                insertion: Some(Insertion::NodeCapacity),
                ..
            }
        ));
        assert_eq!(age_of(&gng, 0, 2), Some(1));
        assert_eq!(age_of(&gng, 1, 2), Some(expected));
    }

    // Node 1 wins with node 2 as runner-up: (1, 2) is refreshed before aging
    gng.adapt(&[0.95, 0.95]).unwrap();
    assert_eq!(age_of(&gng, 1, 2), Some(1));
    assert_eq!(gng.saturation().insertion_skips, 11);
}

#[test]
fn stale_edges_are_pruned_with_their_nodes() {
    let config = GngConfig {
        max_nodes: 3,
        lambda: 1,
        max_age: 3,
        representation: Representation::Fixed,
        ..GngConfig::default()
    };
    let mut gng = DynamicGng::new(&config).unwrap();
    gng.initialize(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
    gng.adapt(&[0.0, 0.0]).unwrap();
    assert_eq!(gng.active_nodes(), 3);

    // (1, 2) ages past 3 on the fourth step and node 1 is dropped
    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(gng.adapt(&[0.3, 0.3]).unwrap());
    }
    let removed: Vec<usize> = outcomes
        .iter()
        .map(|outcome| match outcome {
            StepOutcome::Adapted { removed_nodes, .. } => *removed_nodes,
            StepOutcome::Collapsed { .. } => usize::MAX,
        })
        .collect();
    assert_eq!(removed, vec![0, 0, 0, 1]);

    // Compaction frees a slot, so the same step's insertion splits (1, 0) again
    assert!(matches!(
        outcomes[3],
        StepOutcome::Adapted {
            pruned_edges: 1,
            insertion: Some(Insertion::Inserted { node: 2, q: 1, f: 0 }),
            ..
        }
    ));
    assert_eq!(gng.active_nodes(), 3);
    assert_eq!(gng.edges(), vec![(1, 2), (0, 2)]);
}

#[test]
fn representations_track_each_other() {
    // Keep clear of the bisector between the two seeds so both runs pick the same winners
    let samples: Vec<[f32; 2]> = uniform_samples(400, 99)
        .into_iter()
        .filter(|[x, y]| (x + y - 1.0).abs() > 0.2)
        .collect();
    let run = |representation| {
        let config = GngConfig {
            lambda: 1000,
            ..GngConfig::default()
        }
        .with_representation(representation);
        let mut gng = DynamicGng::new(&config).unwrap();
        gng.initialize(&[0.2, 0.2], &[0.8, 0.8]).unwrap();
        for sample in &samples {
            gng.adapt(sample).unwrap();
        }
        gng
    };

    let float = run(Representation::Float);
    let fixed = run(Representation::Fixed);

    assert_eq!(float.edges(), fixed.edges());
    for (a, b) in float.weights_as_float().iter().zip(fixed.weights_as_float()) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 0.01, "{} vs {}", x, y);
        }
    }
}
