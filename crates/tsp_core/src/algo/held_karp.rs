//! Held-Karp exact solver.
//!
//! `cost[mask][u]` is the length of the cheapest path that starts at node 0,
//! visits exactly the nodes in `mask` and ends at `u`. Every useful mask
//! contains node 0, so the table is indexed by `mask >> 1` and only odd masks
//! are visited. Time and memory are both Θ(2^n · n): about 24 nodes is the
//! practical ceiling, and node sets are `u32`, so 32 nodes is the hard one.

use std::mem;

use crate::{Dist, DistanceMatrix, Error, Result, Tour};

type NodeSet = u32;

/// Most nodes a `NodeSet` can describe.
pub const MAX_EXACT_NODES: usize = NodeSet::BITS as usize;

/// Cost of a state no path has reached yet. Checked before any addition.
const UNREACHED: Dist = Dist::MAX;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactSolution {
    pub cost: Dist,
    pub tour: Tour,
}

/// Optimal tour starting and ending at node 0.
///
/// Fails with [`Error::TooManyNodes`] past [`MAX_EXACT_NODES`] and with
/// [`Error::DpTableAllocation`] when the table cannot be reserved.
pub fn held_karp(matrix: &DistanceMatrix) -> Result<ExactSolution> {
    let n = matrix.len();
    if n > MAX_EXACT_NODES {
        return Err(Error::TooManyNodes {
            nodes: n,
            max: MAX_EXACT_NODES,
        });
    }
    if n < 2 {
        let tour = Tour::new((0..n).collect());
        return Ok(ExactSolution { cost: 0, tour });
    }

    let len = table_len(n).ok_or(Error::DpTableAllocation { nodes: n })?;
    log::debug!(
        "held_karp: n={n} states={len} table_mib={:.1}",
        (len * (mem::size_of::<Dist>() + mem::size_of::<u8>())) as f64 / (1024.0 * 1024.0)
    );
    let mut cost = allocate(len, UNREACHED, n)?;
    let mut pred = allocate(len, 0_u8, n)?;

    let full: NodeSet = NodeSet::MAX >> (MAX_EXACT_NODES - n);
    let slot = |mask: NodeSet, node: usize| (mask >> 1) as usize * n + node;

    cost[slot(1, 0)] = 0;
    let mut mask: NodeSet = 1;
    loop {
        let mut ends = mask;
        while ends != 0 {
            let u = ends.trailing_zeros() as usize;
            ends &= ends - 1;

            let here = cost[slot(mask, u)];
            if here == UNREACHED {
                continue;
            }

            let row = matrix.row(u);
            let mut rest = full & !mask;
            while rest != 0 {
                let v = rest.trailing_zeros() as usize;
                rest &= rest - 1;

                let idx = slot(mask | (1 << v), v);
                let candidate = here.saturating_add(row[v]);
                if candidate < cost[idx] {
                    cost[idx] = candidate;
                    pred[idx] = u as u8;
                }
            }
        }

        if mask == full {
            break;
        }
        mask += 2;
    }

    let (best, last) = (1..n)
        .map(|i| (cost[slot(full, i)].saturating_add(matrix.get(i, 0)), i))
        .min()
        .ok_or_else(|| Error::other("held_karp: no closing edge"))?;

    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    let mut node = last;
    while node != 0 {
        order.push(node);
        let prev = pred[slot(mask, node)] as usize;
        mask ^= 1 << node;
        node = prev;
    }
    order.push(0);
    order.reverse();

    log::info!("held_karp: n={n} cost={best}");
    Ok(ExactSolution {
        cost: best,
        tour: Tour::new(order),
    })
}

/// Entries per table for `n` nodes, `None` if that overflows `usize`.
fn table_len(n: usize) -> Option<usize> {
    1_usize.checked_shl((n - 1) as u32)?.checked_mul(n)
}

fn allocate<T: Clone>(len: usize, fill: T, nodes: usize) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| Error::DpTableAllocation { nodes })?;
    table.resize(len, fill);
    Ok(table)
}
