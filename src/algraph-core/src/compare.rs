//! Equality, hashing and subgraph tests.
//!
//! All three are defined on canonical relations, never on expression
//! shape, so every algebraic law (commutativity of overlay, distributivity
//! of connect, ...) holds for `==` and for hashes.

use std::hash::{Hash, Hasher};

use crate::equivalence::{Equivalence, Natural};
use crate::expr::Graph;

impl<A: Clone> Graph<A> {
    /// Whether both graphs interpret to the same relation under `eq`.
    pub fn equals_with<E: Equivalence<A>>(&self, other: &Self, eq: E) -> bool {
        self.to_relation_with(&eq)
            .same_as(&other.to_relation_with(&eq))
    }

    /// Whether every vertex and edge of `self` is present in `other`,
    /// both interpreted under `eq`.
    pub fn is_subgraph_of_with<E: Equivalence<A>>(&self, other: &Self, eq: E) -> bool {
        self.to_relation_with(&eq)
            .is_subset_of(&other.to_relation_with(&eq))
    }

    /// Hash of the interpreted relation under `eq`.
    ///
    /// Graphs that are equal under `eq` hash equally.
    pub fn hash_with<E: Equivalence<A>>(&self, eq: E) -> u64 {
        self.to_relation_with(eq).canonical_hash()
    }
}

impl<A: Eq + Hash + Clone> Graph<A> {
    /// [`Graph::is_subgraph_of_with`] under natural equality.
    pub fn is_subgraph_of(&self, other: &Self) -> bool {
        self.is_subgraph_of_with(other, Natural)
    }

    /// [`Graph::hash_with`] under natural equality.
    pub fn canonical_hash(&self) -> u64 {
        self.hash_with(Natural)
    }
}

/// Graphs are equal when their relations are, regardless of kind tag or
/// expression shape.
impl<A: Eq + Hash + Clone> PartialEq for Graph<A> {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with(other, Natural)
    }
}

impl<A: Eq + Hash + Clone> Eq for Graph<A> {}

impl<A: Eq + Hash + Clone> Hash for Graph<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.canonical_hash());
    }
}

/// Whether `g1` and `g2` interpret to the same relation under `eq`.
pub fn equals<A: Clone, E: Equivalence<A>>(g1: &Graph<A>, g2: &Graph<A>, eq: E) -> bool {
    g1.equals_with(g2, eq)
}

/// Whether `g1` is a subgraph of `g2` under `eq`.
pub fn is_subgraph_of<A: Clone, E: Equivalence<A>>(g1: &Graph<A>, g2: &Graph<A>, eq: E) -> bool {
    g1.is_subgraph_of_with(g2, eq)
}

/// Hash of `g`'s relation under `eq`.
pub fn hash<A: Clone, E: Equivalence<A>>(g: &Graph<A>, eq: E) -> u64 {
    g.hash_with(eq)
}
