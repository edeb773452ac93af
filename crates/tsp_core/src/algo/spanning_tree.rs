use crate::{Dist, DistanceMatrix};

pub const ROOT: usize = 0;

/// Minimum spanning tree as parent pointers; the root has no parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanningTree {
    parents: Vec<Option<usize>>,
}

impl SpanningTree {
    /// Prim's algorithm from node 0 with a linear scan for the next node,
    /// which is the right shape for a complete graph.
    ///
    /// Ties between equally light candidates go to the lowest node index, and
    /// a connecting edge is only replaced by a strictly lighter one.
    pub fn prim(matrix: &DistanceMatrix) -> Self {
        let n = matrix.len();
        let mut parents: Vec<Option<usize>> = vec![None; n];
        let mut best: Vec<Option<Dist>> = vec![None; n];
        let mut in_tree = vec![false; n];

        if n == 0 {
            return Self { parents };
        }
        best[ROOT] = Some(0);

        for _ in 0..n {
            let next = (0..n)
                .filter(|&v| !in_tree[v])
                .filter_map(|v| best[v].map(|weight| (weight, v)))
                .min();
            let Some((_, u)) = next else {
                break;
            };
            in_tree[u] = true;

            let row = matrix.row(u);
            for v in 0..n {
                if in_tree[v] {
                    continue;
                }
                if best[v].is_none_or(|current| row[v] < current) {
                    best[v] = Some(row[v]);
                    parents[v] = Some(u);
                }
            }
        }

        let tree = Self { parents };
        log::debug!("mst: n={n} weight={}", tree.weight(matrix));
        tree
    }

    pub fn from_parents(parents: Vec<Option<usize>>) -> Self {
        Self { parents }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Tree edges as `(parent, child)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| parent.map(|parent| (parent, child)))
    }

    pub fn weight(&self, matrix: &DistanceMatrix) -> Dist {
        self.edges().map(|(u, v)| matrix.get(u, v)).sum()
    }

    /// Children of every node, each list in ascending index order.
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.parents.len()];
        for (parent, child) in self.edges() {
            children[parent].push(child);
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::{ROOT, SpanningTree};
    use crate::{
        Dist, DistanceMatrix, Point,
        algo::test_support::{brute_force_mst_weight, scattered_points},
    };

    #[test]
    fn unit_square_tree_weighs_three() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let matrix = DistanceMatrix::from_points(&points).expect("matrix");
        let tree = SpanningTree::prim(&matrix);

        assert_eq!(tree.weight(&matrix), 3);
        assert_eq!(tree.parent(ROOT), None);
        assert_eq!(tree.edges().count(), 3);
    }

    #[test]
    fn weight_matches_brute_force_for_small_instances() {
        for n in 2..=8 {
            for seed in 0..5 {
                let matrix =
                    DistanceMatrix::from_points(&scattered_points(n, seed)).expect("matrix");
                let tree = SpanningTree::prim(&matrix);

                assert_eq!(
                    tree.weight(&matrix),
                    brute_force_mst_weight(&matrix),
                    "n={n} seed={seed}"
                );
            }
        }
    }

    #[test]
    fn every_node_reaches_the_root() {
        let matrix = DistanceMatrix::from_points(&scattered_points(30, 7)).expect("matrix");
        let tree = SpanningTree::prim(&matrix);

        for start in 0..tree.len() {
            let mut node = start;
            let mut steps = 0;
            while let Some(parent) = tree.parent(node) {
                node = parent;
                steps += 1;
                assert!(steps <= tree.len(), "cycle through node {start}");
            }
            assert_eq!(node, ROOT);
        }
    }

    #[test]
    fn equal_weights_prefer_lowest_index() {
        let rows: Vec<Vec<Dist>> = (0..4)
            .map(|i| (0..4).map(|j| if i == j { 0 } else { 5 }).collect())
            .collect();
        let matrix = DistanceMatrix::from_rows(rows).expect("matrix");
        let tree = SpanningTree::prim(&matrix);

        assert_eq!(tree.parents(), &[None, Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn children_are_sorted_ascending() {
        let tree = SpanningTree::from_parents(vec![None, Some(0), Some(3), Some(0), Some(0)]);
        let children = tree.children();

        assert_eq!(children[0], vec![1, 3, 4]);
        assert_eq!(children[3], vec![2]);
        assert!(children[2].is_empty());
    }
}
