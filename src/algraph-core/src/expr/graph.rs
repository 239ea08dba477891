//! Kind-tagged graphs.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use common_display::DisplayTree;
use common_error::{AlgraphError, AlgraphResult};
use log::debug;
use serde::{Deserialize, Serialize};

use super::Expr;
use crate::algebra::{Algebra, FoldWith, fold};
use crate::equivalence::{Equivalence, Natural};
use crate::kind::Kind;
use crate::relation::{Interpreter, Relation};

/// Depth at which [`Graph::explain`] collapses subtrees.
const EXPLAIN_DEPTH: usize = 32;

/// An immutable algebraic graph: an expression plus the kind it is
/// interpreted under.
///
/// Cloning a graph, retagging its kind and combining graphs are all O(1):
/// the expression is shared, never copied or rewritten. Relational
/// information (vertices, edges, degrees, equality) is computed on demand
/// by interpreting the expression; each query performs its own pass, so
/// callers issuing many queries against one graph should interpret once
/// with [`Graph::to_relation`] and query the [`Relation`].
///
/// ```rust
/// use algraph_core::Graph;
///
/// let g = Graph::edge("a", "b").undirected();
/// assert!(g.has_edge(&"b", &"a"));
/// assert_eq!(g.edge_count(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph<A> {
    expr: Arc<Expr<A>>,
    kind: Kind,
}

impl<A> Graph<A> {
    /// The empty graph.
    pub fn empty() -> Self {
        Self::from_expr(Expr::Empty, Kind::Directed)
    }

    /// The graph with the single vertex `a`.
    pub fn vertex(a: A) -> Self {
        Self::from_expr(Expr::Vertex(a), Kind::Directed)
    }

    /// Wrap an expression with a kind.
    pub fn from_expr(expr: impl Into<Arc<Expr<A>>>, kind: Kind) -> Self {
        Self {
            expr: expr.into(),
            kind,
        }
    }

    /// The underlying expression.
    pub fn expr(&self) -> &Expr<A> {
        &self.expr
    }

    /// The shared handle to the underlying expression.
    pub fn expr_arc(&self) -> &Arc<Expr<A>> {
        &self.expr
    }

    /// The kind this graph is interpreted under.
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The same expression under another kind. The tree is not rewritten.
    #[must_use]
    pub fn with_kind(&self, kind: Kind) -> Self {
        Self {
            expr: Arc::clone(&self.expr),
            kind,
        }
    }

    /// Retag as `directed`.
    #[must_use]
    pub fn directed(&self) -> Self {
        self.with_kind(Kind::Directed)
    }

    /// Retag as `undirected`.
    #[must_use]
    pub fn undirected(&self) -> Self {
        self.with_kind(Kind::Undirected)
    }

    /// Retag as `reflexive`.
    #[must_use]
    pub fn reflexive(&self) -> Self {
        self.with_kind(Kind::Reflexive)
    }

    /// Retag as `transitive`.
    #[must_use]
    pub fn transitive(&self) -> Self {
        self.with_kind(Kind::Transitive)
    }

    /// Overlay two graphs: the union of their vertices and edges.
    ///
    /// # Errors
    ///
    /// Returns [`AlgraphError::KindMismatch`] when the operand kinds are
    /// incompatible (see [`Kind::combine`]). An operand whose expression is
    /// the `Empty` constructor adopts the other operand's kind.
    pub fn overlay(&self, other: &Self) -> AlgraphResult<Self> {
        let kind = self.combined_kind(other, "overlay")?;
        Ok(Self::from_expr(
            Expr::Overlay(Arc::clone(&self.expr), Arc::clone(&other.expr)),
            kind,
        ))
    }

    /// Connect two graphs: their overlay plus an edge from every vertex of
    /// `self` to every vertex of `other`.
    ///
    /// # Errors
    ///
    /// Same kind rules as [`Graph::overlay`].
    pub fn connect(&self, other: &Self) -> AlgraphResult<Self> {
        let kind = self.combined_kind(other, "connect")?;
        Ok(Self::from_expr(
            Expr::Connect(Arc::clone(&self.expr), Arc::clone(&other.expr)),
            kind,
        ))
    }

    fn combined_kind(&self, other: &Self, op: &'static str) -> AlgraphResult<Kind> {
        if self.expr.is_structurally_empty() {
            return Ok(other.kind);
        }
        if other.expr.is_structurally_empty() {
            return Ok(self.kind);
        }
        self.kind.combine(other.kind).ok_or_else(|| {
            debug!("Rejected {op} of {} graph with {} graph", self.kind, other.kind);
            AlgraphError::kind_mismatch(self.kind, other.kind, op)
        })
    }

    /// Fold the expression bottom-up with `algebra`.
    pub fn fold<G>(&self, algebra: &mut G) -> G::Output
    where
        G: Algebra<A>,
        G::Output: Clone,
    {
        fold(&self.expr, algebra)
    }

    /// Replace every vertex `a` with `f(a)`, keeping the shape and kind.
    pub fn map<B, F: FnMut(&A) -> B>(&self, mut f: F) -> Graph<B> {
        let expr = self.fold(&mut FoldWith {
            on_empty: || Arc::new(Expr::Empty),
            on_vertex: |a: &A| Arc::new(Expr::Vertex(f(a))),
            on_overlay: |l, r| Arc::new(Expr::Overlay(l, r)),
            on_connect: |l, r| Arc::new(Expr::Connect(l, r)),
        });
        Graph::from_expr(expr, self.kind)
    }

    /// Number of constructor nodes in the expression.
    pub fn expr_size(&self) -> usize {
        self.expr.size()
    }

    /// Height of the expression tree.
    pub fn expr_depth(&self) -> usize {
        self.expr.depth()
    }
}

impl<A: Clone> Graph<A> {
    /// Reverse every edge: swaps the operands of each `Connect`.
    ///
    /// The kind is preserved.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let expr = self.fold(&mut FoldWith {
            on_empty: || Arc::new(Expr::Empty),
            on_vertex: |a: &A| Arc::new(Expr::Vertex(a.clone())),
            on_overlay: |l, r| Arc::new(Expr::Overlay(l, r)),
            on_connect: |l, r| Arc::new(Expr::Connect(r, l)),
        });
        Self::from_expr(expr, self.kind)
    }

    /// Every vertex occurrence, left to right, duplicates included.
    pub fn vertex_list(&self) -> Vec<A> {
        self.fold(&mut FoldWith {
            on_empty: Vec::new,
            on_vertex: |a: &A| vec![a.clone()],
            on_overlay: concat,
            on_connect: concat,
        })
    }

    /// Interpret under this graph's kind and the equivalence `eq`.
    pub fn to_relation_with<E: Equivalence<A>>(&self, eq: E) -> Relation<A, E> {
        Interpreter::default().run(self, eq)
    }
}

fn concat<T>(mut left: Vec<T>, right: Vec<T>) -> Vec<T> {
    left.extend(right);
    left
}

/// Relational queries under the vertex type's own equality.
///
/// Each call interprets the graph afresh.
impl<A: Eq + Hash + Clone> Graph<A> {
    /// Interpret under this graph's kind and natural equality.
    pub fn to_relation(&self) -> Relation<A, Natural> {
        self.to_relation_with(Natural)
    }

    /// Canonical vertices, in first-occurrence order.
    pub fn vertices(&self) -> Vec<A> {
        self.to_relation().vertices().to_vec()
    }

    /// Canonical edges, ordered by source then target occurrence.
    pub fn edges(&self) -> Vec<(A, A)> {
        self.to_relation()
            .edges()
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect()
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.to_relation().vertex_count()
    }

    /// Number of distinct edges after the kind's closure.
    pub fn edge_count(&self) -> usize {
        self.to_relation().edge_count()
    }

    /// Whether `a` is a vertex.
    pub fn has_vertex(&self, a: &A) -> bool {
        self.to_relation().has_vertex(a)
    }

    /// Whether `(a, b)` is an edge.
    pub fn has_edge(&self, a: &A, b: &A) -> bool {
        self.to_relation().has_edge(a, b)
    }

    /// Number of edges leaving `a`; 0 if `a` is not a vertex.
    pub fn out_degree(&self, a: &A) -> usize {
        self.to_relation().out_degree(a)
    }

    /// Number of edges entering `a`; 0 if `a` is not a vertex.
    pub fn in_degree(&self, a: &A) -> usize {
        self.to_relation().in_degree(a)
    }

    /// Targets of edges leaving `a`.
    pub fn successors(&self, a: &A) -> Vec<A> {
        self.to_relation()
            .successors(a)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Sources of edges entering `a`.
    pub fn predecessors(&self, a: &A) -> Vec<A> {
        self.to_relation()
            .predecessors(a)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl<A: fmt::Debug> Graph<A> {
    /// Tree-formatted rendering of the expression.
    pub fn explain(&self) -> String {
        format!(
            "Graph [{}]\n{}",
            self.kind,
            DisplayTree::new(self.expr.as_ref()).with_max_depth(EXPLAIN_DEPTH)
        )
    }
}

impl<A> Default for Graph<A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A: fmt::Display> fmt::Display for Graph<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.kind != Kind::Directed {
            write!(f, " [{}]", self.kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        let e: Graph<&str> = Graph::empty();
        assert_eq!(e.vertex_count(), 0);
        assert_eq!(e.edge_count(), 0);

        let v = Graph::vertex("a");
        assert_eq!(v.vertices(), vec!["a"]);
        assert!(v.edges().is_empty());

        let o = Graph::vertex("a").overlay(&Graph::vertex("b")).unwrap();
        assert_eq!(o.vertex_count(), 2);
        assert_eq!(o.edge_count(), 0);

        let c = Graph::vertex("a").connect(&Graph::vertex("b")).unwrap();
        assert_eq!(c.edges(), vec![("a", "b")]);
    }

    #[test]
    fn test_retagging_shares_expression() {
        let g = Graph::edge(1, 2);
        let r = g.reflexive();
        assert!(Arc::ptr_eq(g.expr_arc(), r.expr_arc()));
        assert_eq!(r.kind(), Kind::Reflexive);
        assert_eq!(g.kind(), Kind::Directed);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let r = Graph::vertex(1).reflexive();
        let t = Graph::vertex(2).transitive();
        let err = r.overlay(&t).unwrap_err();
        assert!(err.is_kind_mismatch());
        assert!(err.to_string().contains("overlay"));

        let err = t.connect(&r).unwrap_err();
        assert!(err.to_string().contains("transitive"));

        assert!(Graph::vertex(1).overlay(&r).is_err());
    }

    #[test]
    fn test_directed_undirected_mix() {
        let d = Graph::edge(1, 2);
        let u = Graph::edge(3, 4).undirected();
        let g = d.overlay(&u).unwrap();
        assert_eq!(g.kind(), Kind::Undirected);
        assert!(g.has_edge(&2, &1));
        assert_eq!(u.connect(&d).unwrap().kind(), Kind::Undirected);
    }

    #[test]
    fn test_empty_operand_adopts_other_kind() {
        let t = Graph::edge(1, 2).transitive();
        let e = Graph::empty();
        assert_eq!(t.overlay(&e).unwrap().kind(), Kind::Transitive);
        assert_eq!(e.connect(&t).unwrap().kind(), Kind::Transitive);
    }

    #[test]
    fn test_map_preserves_shape_and_kind() {
        let g = Graph::edge(1, 2).undirected();
        let m = g.map(|v| v * 10);
        assert_eq!(m.kind(), Kind::Undirected);
        assert_eq!(m.expr_size(), g.expr_size());
        assert!(m.has_edge(&20, &10));
    }

    #[test]
    fn test_transpose() {
        let g = Graph::edge("a", "b");
        assert_eq!(g.transpose().edges(), vec![("b", "a")]);
        assert_eq!(g.reflexive().transpose().kind(), Kind::Reflexive);
    }

    #[test]
    fn test_vertex_list_keeps_duplicates() {
        let g = Graph::path([1, 2, 1]);
        assert_eq!(g.vertex_list(), vec![1, 2, 1]);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_degrees_and_neighbours() {
        let g = Graph::star("hub", ["x", "y", "z"]);
        assert_eq!(g.out_degree(&"hub"), 3);
        assert_eq!(g.in_degree(&"hub"), 0);
        assert_eq!(g.in_degree(&"x"), 1);
        assert_eq!(g.successors(&"hub"), vec!["x", "y", "z"]);
        assert_eq!(g.predecessors(&"y"), vec!["hub"]);
        assert_eq!(g.out_degree(&"missing"), 0);
        assert!(g.successors(&"missing").is_empty());
    }

    #[test]
    fn test_display() {
        let g = Graph::edge(1, 2).overlay(&Graph::vertex(3)).unwrap();
        assert_eq!(g.to_string(), "1 * 2 + 3");
        assert_eq!(g.transitive().to_string(), "1 * 2 + 3 [transitive]");
    }

    #[test]
    fn test_explain() {
        let g = Graph::edge("a", "b").reflexive();
        let explain = g.explain();
        assert!(explain.starts_with("Graph [reflexive]\nConnect\n"));
        assert!(explain.contains("├─ Vertex (\"a\")"));
        assert!(explain.contains("└─ Vertex (\"b\")"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let g = Graph::clique(["a".to_string(), "b".to_string()]).undirected();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), Kind::Undirected);
        assert_eq!(back, g);
    }
}
