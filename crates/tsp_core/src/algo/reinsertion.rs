use rand::{Rng, seq::SliceRandom};

use crate::{DistanceMatrix, Error, Result, Tour};

pub const DEFAULT_SKIP_FRACTION: f64 = 0.10;

/// Random skip-and-reinsert perturbation of a base tour.
///
/// A random subset of the non-start nodes is pulled out of the tour and put
/// back one at a time at the cheapest position of the shrinking-then-growing
/// interim tour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reinsertion {
    skip_fraction: f64,
}

impl Default for Reinsertion {
    fn default() -> Self {
        Self {
            skip_fraction: DEFAULT_SKIP_FRACTION,
        }
    }
}

impl Reinsertion {
    /// `skip_fraction` must be finite and within `[0, 1]`.
    pub fn new(skip_fraction: f64) -> Result<Self> {
        if !skip_fraction.is_finite() || !(0.0..=1.0).contains(&skip_fraction) {
            return Err(Error::invalid_input(format!(
                "skip fraction must be within [0, 1], got {skip_fraction}"
            )));
        }
        Ok(Self { skip_fraction })
    }

    /// Nodes pulled out for a tour of `n` nodes.
    ///
    /// At least one even for a zero fraction, so a run always perturbs
    /// something, and never more than the `n - 1` non-start nodes.
    pub fn skip_count(&self, n: usize) -> usize {
        let requested = (n as f64 * self.skip_fraction).floor() as usize;
        requested.max(1).min(n.saturating_sub(1))
    }

    pub fn run<R: Rng + ?Sized>(&self, tour: &Tour, matrix: &DistanceMatrix, rng: &mut R) -> Tour {
        let n = tour.len();
        if n < 2 {
            return tour.clone();
        }
        debug_assert!(tour.is_permutation_of(matrix.len()));

        let nodes = tour.nodes();
        let start = nodes[0];
        let k = self.skip_count(n);

        let mut shuffled = nodes[1..].to_vec();
        shuffled.shuffle(rng);
        let skipped = &shuffled[..k];

        let mut is_skipped = vec![false; matrix.len()];
        for &node in skipped {
            is_skipped[node] = true;
        }

        let mut interim = Vec::with_capacity(n);
        interim.push(start);
        interim.extend(nodes[1..].iter().copied().filter(|&node| !is_skipped[node]));

        for &node in skipped {
            let after = cheapest_insertion(&interim, node, matrix);
            interim.insert(after + 1, node);
        }

        log::debug!("reinsertion: n={n} skipped={k}");
        Tour::new(interim)
    }
}

/// Position `i` minimising `D[u][v] + D[v][w] - D[u][w]` over the cyclic
/// edges `(tour[i], tour[i + 1])`; the first minimum wins.
fn cheapest_insertion(tour: &[usize], v: usize, matrix: &DistanceMatrix) -> usize {
    let m = tour.len();
    let mut best = 0;
    let mut best_delta = i128::MAX;

    for i in 0..m {
        let u = tour[i];
        let w = tour[(i + 1) % m];
        let delta = i128::from(matrix.get(u, v)) + i128::from(matrix.get(v, w))
            - i128::from(matrix.get(u, w));
        if delta < best_delta {
            best_delta = delta;
            best = i;
        }
    }

    best
}
