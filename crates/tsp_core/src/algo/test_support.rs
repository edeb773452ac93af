//! Exhaustive reference answers for small instances.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Dist, DistanceMatrix, Point};

pub(crate) fn scattered_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect()
}

/// Lightest spanning tree over every labelled tree (decoded Prüfer sequences).
pub(crate) fn brute_force_mst_weight(matrix: &DistanceMatrix) -> Dist {
    let n = matrix.len();
    if n < 2 {
        return 0;
    }
    if n == 2 {
        return matrix.get(0, 1);
    }

    let mut best = Dist::MAX;
    let mut sequence = vec![0; n - 2];
    loop {
        best = best.min(prufer_tree_weight(&sequence, matrix));

        // odometer increment over base-n digits
        let mut pos = 0;
        while pos < sequence.len() {
            sequence[pos] += 1;
            if sequence[pos] < n {
                break;
            }
            sequence[pos] = 0;
            pos += 1;
        }
        if pos == sequence.len() {
            return best;
        }
    }
}

fn prufer_tree_weight(sequence: &[usize], matrix: &DistanceMatrix) -> Dist {
    let n = sequence.len() + 2;
    let mut degree = vec![1; n];
    for &node in sequence {
        degree[node] += 1;
    }

    let mut weight = 0;
    for &node in sequence {
        let leaf = (0..n)
            .find(|&v| degree[v] == 1)
            .expect("prufer decoding always has a leaf");
        weight += matrix.get(leaf, node);
        degree[leaf] -= 1;
        degree[node] -= 1;
    }

    let last: Vec<usize> = (0..n).filter(|&v| degree[v] == 1).collect();
    weight + matrix.get(last[0], last[1])
}

/// Cheapest cycle over all orderings of the non-start nodes.
pub(crate) fn brute_force_tour_cost(matrix: &DistanceMatrix) -> Dist {
    let n = matrix.len();
    let mut visited = vec![false; n];
    visited[0] = true;
    let mut best = Dist::MAX;
    extend_path(matrix, &mut visited, 0, 1, 0, &mut best);
    best
}

fn extend_path(
    matrix: &DistanceMatrix,
    visited: &mut [bool],
    last: usize,
    depth: usize,
    cost: Dist,
    best: &mut Dist,
) {
    let n = matrix.len();
    if depth == n {
        *best = (*best).min(cost + matrix.get(last, 0));
        return;
    }
    for next in 1..n {
        if visited[next] {
            continue;
        }
        visited[next] = true;
        extend_path(
            matrix,
            visited,
            next,
            depth + 1,
            cost + matrix.get(last, next),
            best,
        );
        visited[next] = false;
    }
}
