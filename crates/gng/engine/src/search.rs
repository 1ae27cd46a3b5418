// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Nearest-unit search
//!
//! Linear scan over the active nodes. Distances are squared Euclidean,
//! computed in the store's own representation: for Q16.16 every difference is
//! squared with the saturating fixed-point `mul` and summed with saturating
//! addition.

use gng_numeric::Scalar;
use gng_topology::TopologyStore;
use serde::{Deserialize, Serialize};

/// Best and second-best matching units for one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestPair<T> {
    /// Winner (s1)
    pub best: usize,
    /// Runner-up (s2)
    pub second: usize,
    /// Squared distance from the sample to `best`
    pub best_distance: T,
}

/// Squared Euclidean distance between a weight vector and an encoded sample
#[inline]
pub fn squared_distance<T: Scalar>(weight: &[T], sample: &[T]) -> T {
    weight
        .iter()
        .zip(sample)
        .fold(T::zero(), |acc, (&w, &x)| {
            let diff = w.saturating_sub(x);
            acc.saturating_add(diff.mul(diff))
        })
}

/// Find the two active nodes closest to `sample`
///
/// Ties go to the lower index. Returns `None` when fewer than two nodes are
/// active.
///
/// # Example
/// ```
/// use gng_engine::search::find_two_nearest;
/// use gng_topology::TopologyStore;
///
/// let mut store = TopologyStore::<f32>::new(4, 4, 1).unwrap();
/// for x in [0.0, 5.0, 1.0] {
///     store.add_node(&[x]).unwrap();
/// }
///
/// let pair = find_two_nearest(&store, &[0.8]).unwrap();
/// assert_eq!((pair.best, pair.second), (2, 0));
/// ```
pub fn find_two_nearest<T: Scalar>(
    store: &TopologyStore<T>,
    sample: &[T],
) -> Option<NearestPair<T>> {
    let count = store.node_count();
    if count < 2 {
        return None;
    }

    let d0 = squared_distance(store.weight(0), sample);
    let d1 = squared_distance(store.weight(1), sample);
    let (mut best, mut best_d, mut second, mut second_d) = if d1 < d0 {
        (1, d1, 0, d0)
    } else {
        (0, d0, 1, d1)
    };

    for index in 2..count {
        let d = squared_distance(store.weight(index), sample);
        if d < best_d {
            second = best;
            second_d = best_d;
            best = index;
            best_d = d;
        } else if d < second_d {
            second = index;
            second_d = d;
        }
    }

    Some(NearestPair {
        best,
        second,
        best_distance: best_d,
    })
}
