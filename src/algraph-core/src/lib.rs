//! Algebraic graphs.
//!
//! A graph is an expression built from four primitives: the empty graph, a
//! single vertex, `overlay` (union of vertices and edges) and `connect`
//! (union plus every edge from the left vertex set to the right one). An
//! expression is tagged with a [`Kind`] that decides how it is read:
//! directed, undirected, reflexive or transitive.
//!
//! - [`Expr`] and [`Graph`] for construction and the [`Kind`] tag
//! - [`Algebra`] and [`fold`] for structural recursion
//! - [`Equivalence`] for caller-supplied vertex identity
//! - [`Relation`] and [`Interpreter`] for the vertex-set/edge-set reading
//! - [`equals`], [`is_subgraph_of`] and [`compare::hash`] for comparison
//! - [`property`] for attaching metadata to an interpreted graph

pub mod algebra;
pub mod builders;
pub mod compare;
pub mod equivalence;
pub mod expr;
pub mod kind;
pub mod property;
pub mod relation;
pub mod testing;

// Re-export commonly used types
pub use algebra::{Algebra, FoldWith, fold};
pub use common_error::{AlgraphError, AlgraphResult};
pub use compare::{equals, is_subgraph_of};
pub use equivalence::{ByKey, CaseInsensitive, Equivalence, FnEquivalence, Natural, by_key};
pub use expr::{Expr, Graph};
pub use kind::{Closure, Kind, are_kinds_compatible};
pub use relation::{Interpreter, Relation, to_relation};
