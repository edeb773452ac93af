use crate::{
    DistanceMatrix, Tour,
    algo::spanning_tree::{ROOT, SpanningTree},
};

/// Preorder walk of `tree` from the root, children in ascending index order.
///
/// Iterative, so deep (path-like) trees cannot overflow the call stack.
pub fn preorder_tour(tree: &SpanningTree) -> Tour {
    let n = tree.len();
    if n == 0 {
        return Tour::default();
    }

    let children = tree.children();
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![ROOT];

    while let Some(node) = stack.pop() {
        order.push(node);
        // reversed so the smallest child is popped first
        stack.extend(children[node].iter().rev());
    }

    debug_assert_eq!(order.len(), n, "spanning tree must reach every node");
    Tour::new(order)
}

/// MST-doubling 2-approximation: Prim tree, then its preorder walk.
pub fn two_approx_tour(matrix: &DistanceMatrix) -> Tour {
    let tree = SpanningTree::prim(matrix);
    let tour = preorder_tour(&tree);
    log::debug!("tree_tour: n={} mst_weight={}", tour.len(), tree.weight(matrix));
    tour
}
