pub mod held_karp;
pub mod reinsertion;
pub mod spanning_tree;
pub mod tree_tour;

#[cfg(test)]
pub(crate) mod test_support;
