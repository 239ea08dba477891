//! Fixtures for tests and examples.
//!
//! A [`GraphFixture`] overlays named parts into one graph and keeps each
//! part addressable, so tests can compare the whole against its pieces.

use std::collections::HashMap;
use std::sync::Arc;

use common_error::AlgraphResult;

use crate::expr::{Expr, Graph};

/// A graph assembled from named parts.
#[derive(Debug, Clone)]
pub struct GraphFixture<A> {
    graph: Graph<A>,
    parts: HashMap<String, Graph<A>>,
}

impl<A> GraphFixture<A> {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self {
            graph: Graph::empty(),
            parts: HashMap::new(),
        }
    }

    /// Overlay `part` onto the fixture and remember it under `name`.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if `part`'s kind cannot be combined with the
    /// fixture's current kind.
    pub fn add_part(&mut self, name: &str, part: Graph<A>) -> AlgraphResult<&mut Self> {
        self.graph = self.graph.overlay(&part)?;
        self.parts.insert(name.to_string(), part);
        Ok(self)
    }

    /// Overlay a part that is known to share the fixture's kind.
    fn push(&mut self, name: &str, part: Graph<A>) {
        let expr = Expr::overlay(Arc::clone(self.graph.expr_arc()), Arc::clone(part.expr_arc()));
        self.graph = Graph::from_expr(expr, part.kind());
        self.parts.insert(name.to_string(), part);
    }

    /// A previously added part.
    pub fn part(&self, name: &str) -> Option<&Graph<A>> {
        self.parts.get(name)
    }

    /// Names of all parts, sorted.
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.parts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The overlay of all parts.
    pub fn graph(&self) -> &Graph<A> {
        &self.graph
    }
}

impl<A> Default for GraphFixture<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFixture<&'static str> {
    /// People who know each other, and where some of them work.
    ///
    /// Parts: `knows` (alice -> bob -> charlie), `works_at` (alice and
    /// charlie -> acme), `isolated` (a lone `dave`).
    pub fn social_network() -> Self {
        let mut fixture = Self::new();
        let parts = [
            (
                "knows",
                Graph::from_edges([("alice", "bob"), ("bob", "charlie")]),
            ),
            ("works_at", Graph::star("acme", ["alice", "charlie"]).transpose()),
            ("isolated", Graph::vertex("dave")),
        ];
        for (name, part) in parts {
            fixture.push(name, part);
        }
        fixture
    }
}

impl GraphFixture<u32> {
    /// Module dependencies: `0 -> 1 -> ... -> len - 1`, one edge per link.
    pub fn dependency_chain(len: u32) -> Self {
        let mut fixture = Self::new();
        fixture.push("modules", Graph::from_vertices(0..len));
        fixture.push("links", Graph::from_edges((1..len).map(|i| (i - 1, i))));
        fixture
    }
}

/// Names that differ only by case: `Alice`/`alice` -> `Bob`/`BOB`.
pub fn case_variant_names() -> Graph<String> {
    Graph::from_edges([
        ("Alice".to_string(), "Bob".to_string()),
        ("alice".to_string(), "BOB".to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    #[test]
    fn test_social_network() {
        let fixture = GraphFixture::social_network();
        let g = fixture.graph();
        assert_eq!(g.vertex_count(), 5);
        assert!(g.has_edge(&"alice", &"acme"));
        assert!(g.has_edge(&"bob", &"charlie"));
        assert_eq!(fixture.part_names(), vec!["isolated", "knows", "works_at"]);
        assert!(fixture.part("knows").unwrap().is_subgraph_of(g));
    }

    #[test]
    fn test_dependency_chain() {
        let fixture = GraphFixture::dependency_chain(4);
        assert_eq!(fixture.graph().edges(), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(fixture.part("modules").unwrap().edge_count(), 0);
    }

    #[test]
    fn test_add_part_checks_kinds() {
        let mut fixture = GraphFixture::new();
        fixture.add_part("loop", Graph::vertex(1).reflexive()).unwrap();
        assert_eq!(fixture.graph().kind(), Kind::Reflexive);
        assert!(fixture.add_part("chain", Graph::edge(1, 2).transitive()).is_err());
        assert!(fixture.part("chain").is_none());
    }
}
