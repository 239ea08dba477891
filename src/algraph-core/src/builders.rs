//! Derived constructors.
//!
//! Everything here is built from the four primitives and produces a
//! `directed` graph; retag with [`Graph::with_kind`] and friends.

use std::sync::Arc;

use crate::expr::{Expr, Graph};
use crate::kind::Kind;

/// Left fold of `overlay` over vertex leaves; `Empty` for no vertices.
fn overlay_vertices<A>(vertices: impl IntoIterator<Item = A>) -> Expr<A> {
    vertices
        .into_iter()
        .map(Expr::Vertex)
        .reduce(|acc, v| Expr::overlay(acc, v))
        .unwrap_or(Expr::Empty)
}

impl<A> Graph<A> {
    /// The single edge `a -> b`.
    pub fn edge(a: A, b: A) -> Self {
        Self::from_expr(Expr::connect(Expr::Vertex(a), Expr::Vertex(b)), Kind::Directed)
    }

    /// Overlay of the given vertices, with no edges.
    pub fn from_vertices(vertices: impl IntoIterator<Item = A>) -> Self {
        Self::from_expr(overlay_vertices(vertices), Kind::Directed)
    }

    /// Overlay of the given edges.
    pub fn from_edges(edges: impl IntoIterator<Item = (A, A)>) -> Self {
        let expr = edges
            .into_iter()
            .map(|(a, b)| Expr::connect(Expr::Vertex(a), Expr::Vertex(b)))
            .reduce(|acc, e| Expr::overlay(acc, e))
            .unwrap_or(Expr::Empty);
        Self::from_expr(expr, Kind::Directed)
    }

    /// Left fold of `connect` over the vertices.
    ///
    /// Each step connects everything accumulated so far to the next vertex,
    /// so every vertex gets an edge to every later one:
    /// `path([a, b, c]) = (a * b) * c` has edges `ab`, `ac` and `bc`.
    /// `path([])` is empty and `path([v])` is `vertex(v)`.
    pub fn path(vertices: impl IntoIterator<Item = A>) -> Self {
        let expr = vertices
            .into_iter()
            .map(Expr::Vertex)
            .reduce(|acc, v| Expr::connect(acc, v))
            .unwrap_or(Expr::Empty);
        Self::from_expr(expr, Kind::Directed)
    }

    /// Every vertex connected to every vertex, self-loops included.
    ///
    /// Both operands of the `Connect` share one vertex overlay.
    pub fn clique(vertices: impl IntoIterator<Item = A>) -> Self {
        let shared = Arc::new(overlay_vertices(vertices));
        Self::from_expr(Expr::Connect(Arc::clone(&shared), shared), Kind::Directed)
    }

    /// `center` connected to every leaf.
    pub fn star(center: A, leaves: impl IntoIterator<Item = A>) -> Self {
        Self::from_expr(
            Expr::connect(Expr::Vertex(center), overlay_vertices(leaves)),
            Kind::Directed,
        )
    }
}
