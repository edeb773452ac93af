use std::fmt;

use crate::{Dist, DistanceMatrix};

/// Open tour: a permutation of the node indices starting at the start node.
/// The closing edge from the last node back to the first is implied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// Nodes with the start repeated at the end.
    pub fn closed(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied().chain(self.start())
    }

    /// Cyclic edges `(tour[i], tour[(i + 1) % n])`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |i| (self.nodes[i], self.nodes[(i + 1) % n]))
    }

    /// Total cyclic length.
    pub fn cost(&self, matrix: &DistanceMatrix) -> Dist {
        debug_assert!(self.is_permutation_of(matrix.len()));
        self.edges().map(|(u, v)| matrix.get(u, v)).sum()
    }

    /// True when every node in `0..n` appears exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.nodes.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &node in &self.nodes {
            if node >= n || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    pub fn metrics(&self, matrix: &DistanceMatrix) -> TourMetrics {
        let n = self.len();
        if n < 2 {
            return TourMetrics::default();
        }

        let (total, longest) = self
            .edges()
            .map(|(u, v)| matrix.get(u, v))
            .fold((0, 0), |(total, longest), d| (total + d, longest.max(d)));
        let average = total as f64 / n as f64;

        TourMetrics {
            total,
            longest,
            average,
        }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in self.closed() {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: Dist,
    pub longest: Dist,
    pub average: f64,
}

impl fmt::Display for TourMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} longest={} avg={:.2}",
            self.total, self.longest, self.average
        )
    }
}
