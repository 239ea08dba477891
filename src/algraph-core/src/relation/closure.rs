//! Kind closures over canonical edge sets.
//!
//! Edges are pairs of dense vertex ids in `0..vertex_count`. Every closure
//! here is idempotent: applying it to its own output changes nothing.

use std::collections::BTreeSet;

use crate::kind::Closure;

pub(crate) type EdgeSet = BTreeSet<(usize, usize)>;

/// Apply `closure` in place.
pub(crate) fn apply(closure: Closure, vertex_count: usize, edges: &mut EdgeSet) {
    match closure {
        Closure::Identity => {}
        Closure::Symmetric => symmetric(edges),
        Closure::SelfLoops => self_loops(vertex_count, edges),
        Closure::Transitive => transitive(vertex_count, edges),
    }
}

/// Add `(b, a)` for every edge `(a, b)`.
pub(crate) fn symmetric(edges: &mut EdgeSet) {
    let reversed: Vec<_> = edges.iter().map(|&(a, b)| (b, a)).collect();
    edges.extend(reversed);
}

/// Add `(v, v)` for every vertex.
pub(crate) fn self_loops(vertex_count: usize, edges: &mut EdgeSet) {
    edges.extend((0..vertex_count).map(|v| (v, v)));
}

/// Replace the edge set with its transitive closure.
///
/// # Performance
///
/// This is the one expensive path in the engine: Warshall's algorithm over
/// a dense reachability matrix, O(V³) time and O(V²) space in the vertex
/// count, with no cancellation point. Callers that need a bound should set
/// `InterpreterConfig::max_closure_vertices`.
pub(crate) fn transitive(vertex_count: usize, edges: &mut EdgeSet) {
    if edges.is_empty() {
        return;
    }
    let n = vertex_count;
    let mut reach = vec![false; n * n];
    for &(a, b) in edges.iter() {
        reach[a * n + b] = true;
    }

    for k in 0..n {
        for i in 0..n {
            if !reach[i * n + k] {
                continue;
            }
            for j in 0..n {
                if reach[k * n + j] {
                    reach[i * n + j] = true;
                }
            }
        }
    }

    edges.extend(
        reach
            .iter()
            .enumerate()
            .filter(|&(_, &reachable)| reachable)
            .map(|(cell, _)| (cell / n, cell % n)),
    );
}
