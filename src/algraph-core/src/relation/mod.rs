//! Canonical relations.
//!
//! A [`Relation`] is the interpreted form of a graph: a deduplicated vertex
//! set and a deduplicated set of ordered pairs, both modulo the caller's
//! equivalence, with the kind's closure already applied. Equality, hashing,
//! membership and degree queries are only ever answered from a relation.
//!
//! Vertices are kept in first-occurrence order (the left-to-right order of
//! the expression) and edges are ordered by source id, then target id, so
//! iteration order is deterministic for a given expression.

mod closure;
mod interpreter;
mod vertex_index;

use std::fmt;

pub use interpreter::Interpreter;

use self::closure::EdgeSet;
use self::vertex_index::VertexIndex;
use crate::equivalence::{Equivalence, hash_one};
use crate::expr::Graph;
use crate::kind::Kind;

/// A graph interpreted under a kind and an equivalence.
pub struct Relation<A, E = crate::equivalence::Natural> {
    vertices: VertexIndex<A, E>,
    edges: EdgeSet,
    kind: Kind,
}

/// Interpret `graph` as if it were tagged with `kind`.
///
/// The graph's own kind tag is ignored; this is equivalent to
/// `graph.with_kind(kind).to_relation_with(eq)`.
pub fn to_relation<A, E>(graph: &Graph<A>, kind: Kind, eq: E) -> Relation<A, E>
where
    A: Clone,
    E: Equivalence<A>,
{
    graph.with_kind(kind).to_relation_with(eq)
}

impl<A, E> Relation<A, E> {
    pub(crate) fn from_parts(vertices: VertexIndex<A, E>, edges: EdgeSet, kind: Kind) -> Self {
        Self {
            vertices,
            edges,
            kind,
        }
    }

    /// The kind whose closure this relation has.
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The equivalence vertices were deduplicated with.
    pub fn equivalence(&self) -> &E {
        self.vertices.equivalence()
    }

    /// One representative per vertex class, in first-occurrence order.
    pub fn vertices(&self) -> &[A] {
        self.vertices.as_slice()
    }

    /// All edges as pairs of representatives.
    pub fn edges(&self) -> impl Iterator<Item = (&A, &A)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices.get(a), self.vertices.get(b)))
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<A, E: Equivalence<A>> Relation<A, E> {
    /// Whether a vertex equivalent to `a` exists.
    pub fn has_vertex(&self, a: &A) -> bool {
        self.vertices.position(a).is_some()
    }

    /// Whether an edge between the classes of `a` and `b` exists.
    pub fn has_edge(&self, a: &A, b: &A) -> bool {
        match (self.vertices.position(a), self.vertices.position(b)) {
            (Some(from), Some(to)) => self.edges.contains(&(from, to)),
            _ => false,
        }
    }

    fn outgoing(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .range((from, 0)..=(from, usize::MAX))
            .map(|&(_, to)| to)
    }

    fn incoming(&self, to: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .filter(move |&&(_, target)| target == to)
            .map(|&(from, _)| from)
    }

    /// Number of edges leaving `a`; 0 if `a` is not a vertex.
    pub fn out_degree(&self, a: &A) -> usize {
        self.vertices
            .position(a)
            .map_or(0, |id| self.outgoing(id).count())
    }

    /// Number of edges entering `a`; 0 if `a` is not a vertex.
    pub fn in_degree(&self, a: &A) -> usize {
        self.vertices
            .position(a)
            .map_or(0, |id| self.incoming(id).count())
    }

    /// Targets of edges leaving `a`, in vertex order.
    pub fn successors(&self, a: &A) -> Vec<&A> {
        self.vertices.position(a).map_or_else(Vec::new, |id| {
            self.outgoing(id).map(|to| self.vertices.get(to)).collect()
        })
    }

    /// Sources of edges entering `a`, in vertex order.
    pub fn predecessors(&self, a: &A) -> Vec<&A> {
        self.vertices.position(a).map_or_else(Vec::new, |id| {
            self.incoming(id).map(|from| self.vertices.get(from)).collect()
        })
    }

    /// Every vertex with its successors.
    pub fn adjacency_list(&self) -> Vec<(&A, Vec<&A>)> {
        (0..self.vertices.len())
            .map(|id| {
                let targets = self.outgoing(id).map(|to| self.vertices.get(to)).collect();
                (self.vertices.get(id), targets)
            })
            .collect()
    }

    /// Whether every vertex and edge of `self` is present in `other`.
    ///
    /// Membership is decided by `other`'s equivalence; both relations are
    /// expected to share one.
    pub fn is_subset_of(&self, other: &Relation<A, E>) -> bool {
        if self.vertex_count() > other.vertex_count() || self.edge_count() > other.edge_count() {
            return false;
        }
        let mut image = Vec::with_capacity(self.vertex_count());
        for v in self.vertices() {
            match other.vertices.position(v) {
                Some(id) => image.push(id),
                None => return false,
            }
        }
        self.edges
            .iter()
            .all(|&(a, b)| other.edges.contains(&(image[a], image[b])))
    }

    /// Whether both relations have the same vertex classes and edges.
    pub fn same_as(&self, other: &Relation<A, E>) -> bool {
        self.vertex_count() == other.vertex_count()
            && self.edge_count() == other.edge_count()
            && self.is_subset_of(other)
    }

    /// Hash of the relation, a function of its vertex and edge classes only.
    ///
    /// Relations for which [`Relation::same_as`] holds hash equally,
    /// whatever expressions they were interpreted from.
    pub fn canonical_hash(&self) -> u64 {
        let mut vertex_hashes: Vec<u64> = (0..self.vertices.len())
            .map(|id| self.vertices.hash_of(id))
            .collect();
        vertex_hashes.sort_unstable();

        let mut edge_hashes: Vec<u64> = self
            .edges
            .iter()
            .map(|&(a, b)| hash_one(&(self.vertices.hash_of(a), self.vertices.hash_of(b))))
            .collect();
        edge_hashes.sort_unstable();

        hash_one(&(vertex_hashes, edge_hashes))
    }
}

impl<A: fmt::Debug, E> fmt::Debug for Relation<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("kind", &self.kind)
            .field("vertices", &self.vertices())
            .field("edges", &self.edges().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::{CaseInsensitive, Natural};

    #[test]
    fn test_relation_queries() {
        let rel = Graph::from_edges([("a", "b"), ("a", "c"), ("c", "b")]).to_relation();
        assert_eq!(rel.vertex_count(), 3);
        assert_eq!(rel.edge_count(), 3);
        assert!(rel.has_vertex(&"c"));
        assert!(!rel.has_vertex(&"d"));
        assert!(rel.has_edge(&"c", &"b"));
        assert!(!rel.has_edge(&"b", &"c"));
        assert_eq!(rel.out_degree(&"a"), 2);
        assert_eq!(rel.in_degree(&"b"), 2);
        assert_eq!(rel.successors(&"a"), vec![&"b", &"c"]);
        assert_eq!(rel.predecessors(&"b"), vec![&"a", &"c"]);
    }

    #[test]
    fn test_adjacency_list() {
        let rel = Graph::edge(1, 2).undirected().to_relation();
        assert_eq!(
            rel.adjacency_list(),
            vec![(&1, vec![&2]), (&2, vec![&1])]
        );
    }

    #[test]
    fn test_to_relation_overrides_kind() {
        let g = Graph::edge("a", "b");
        let rel = to_relation(&g, Kind::Undirected, Natural);
        assert_eq!(rel.kind(), Kind::Undirected);
        assert!(rel.has_edge(&"b", &"a"));
        assert_eq!(g.kind(), Kind::Directed);
    }

    #[test]
    fn test_equivalence_deduplicates() {
        let g = Graph::from_edges([
            ("Alice".to_string(), "bob".to_string()),
            ("alice".to_string(), "BOB".to_string()),
        ]);
        let natural = g.to_relation();
        assert_eq!(natural.vertex_count(), 4);
        assert_eq!(natural.edge_count(), 2);

        let folded = g.to_relation_with(CaseInsensitive);
        assert_eq!(folded.vertex_count(), 2);
        assert_eq!(folded.edge_count(), 1);
        assert!(folded.has_edge(&"ALICE".to_string(), &"Bob".to_string()));
        assert_eq!(folded.vertices()[0], "Alice");
    }

    #[test]
    fn test_subset_and_same() {
        let small = Graph::edge(1, 2).to_relation();
        let large = Graph::path([1, 2, 3]).to_relation();
        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert!(!small.same_as(&large));

        let reordered = Graph::vertex(2)
            .overlay(&Graph::edge(1, 2))
            .unwrap()
            .to_relation();
        assert!(small.same_as(&reordered));
        assert_eq!(small.canonical_hash(), reordered.canonical_hash());
    }

    #[test]
    fn test_debug_format() {
        let rel = Graph::edge("x", "y").to_relation();
        let debug = format!("{rel:?}");
        assert!(debug.contains("Relation"));
        assert!(debug.contains("(\"x\", \"y\")"));
    }
}
