//! Graph expressions.
//!
//! - [`Expr`] is the bare, kind-free algebraic expression; its four
//!   constructors are total.
//! - [`Graph`] pairs an expression with the [`crate::Kind`] it is
//!   interpreted under, and is the type user code works with.

mod encoding;
mod expression;
mod graph;

pub use expression::Expr;
pub use graph::Graph;
