//! One synchronous relaxation round.
//!
//! Each node's next label is the minimum of its own label and its
//! neighbours' labels, read from the previous round's buffer only. Writes go
//! to a separate buffer, so nodes can be relaxed in any order or in parallel
//! and the round still yields the same labels.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::graph::Adjacency;

/// Computes the next label for `node` into `slot` and reports whether it
/// changed.
fn relax_into(adjacency: &Adjacency, current: &[usize], node: usize, slot: &mut usize) -> usize {
    let Some(&own) = current.get(node) else {
        return 0;
    };
    let label = adjacency
        .neighbours(node)
        .iter()
        .filter_map(|&neighbour| current.get(neighbour).copied())
        .fold(own, usize::min);
    *slot = label;
    usize::from(label != own)
}

/// Relaxes every node on the calling thread and returns the change count.
pub(super) fn relax_sequential(adjacency: &Adjacency, current: &[usize], next: &mut [usize]) -> usize {
    next.iter_mut()
        .enumerate()
        .map(|(node, slot)| relax_into(adjacency, current, node, slot))
        .sum()
}

/// Relaxes nodes across the Rayon pool; the change count is summed after
/// every partition has finished writing.
#[cfg(feature = "parallel")]
pub(super) fn relax_parallel(adjacency: &Adjacency, current: &[usize], next: &mut [usize]) -> usize {
    next.par_iter_mut()
        .enumerate()
        .map(|(node, slot)| relax_into(adjacency, current, node, slot))
        .sum()
}
