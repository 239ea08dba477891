//! The graph catamorphism.
//!
//! [`fold`] is the one traversal of the expression tree. Interpretation,
//! `map`, `transpose`, sizing and rendering are all algebras folded over an
//! expression.
//!
//! The fold runs on an explicit work stack, so expressions of any depth
//! (for example a `path` over a million vertices, which nests to the left
//! one level per vertex) are folded without growing the call stack.
//! Shared sub-expressions are folded once per distinct node.

use std::collections::HashMap;
use std::ptr;
use std::sync::Arc;

use crate::expr::Expr;

/// One handler per constructor, applied bottom-up.
///
/// Handlers take `&mut self`, so an algebra may thread state (an interner,
/// a counter, an edge accumulator) through the traversal. Children are
/// always folded left before right. Handlers fire once per distinct node:
/// a shared sub-expression is not revisited (see [`fold`]).
pub trait Algebra<A> {
    /// Result of folding a sub-expression.
    type Output;

    /// Handle `Empty`.
    fn on_empty(&mut self) -> Self::Output;

    /// Handle `Vertex(a)`.
    fn on_vertex(&mut self, vertex: &A) -> Self::Output;

    /// Combine the folded operands of an `Overlay`.
    fn on_overlay(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;

    /// Combine the folded operands of a `Connect`.
    fn on_connect(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;
}

/// An [`Algebra`] given as a record of four closures.
///
/// ```rust
/// use algraph_core::{FoldWith, Graph};
///
/// let g = Graph::path(["a", "b", "c"]);
/// let leaves = g.fold(&mut FoldWith {
///     on_empty: || 0,
///     on_vertex: |_: &&str| 1,
///     on_overlay: |l: usize, r: usize| l + r,
///     on_connect: |l: usize, r: usize| l + r,
/// });
/// assert_eq!(leaves, 3);
/// ```
#[derive(Debug, Clone)]
pub struct FoldWith<E, V, O, C> {
    /// Handler for `Empty`.
    pub on_empty: E,
    /// Handler for `Vertex`.
    pub on_vertex: V,
    /// Handler for `Overlay`.
    pub on_overlay: O,
    /// Handler for `Connect`.
    pub on_connect: C,
}

impl<A, R, E, V, O, C> Algebra<A> for FoldWith<E, V, O, C>
where
    E: FnMut() -> R,
    V: FnMut(&A) -> R,
    O: FnMut(R, R) -> R,
    C: FnMut(R, R) -> R,
{
    type Output = R;

    fn on_empty(&mut self) -> R {
        (self.on_empty)()
    }

    fn on_vertex(&mut self, vertex: &A) -> R {
        (self.on_vertex)(vertex)
    }

    fn on_overlay(&mut self, left: R, right: R) -> R {
        (self.on_overlay)(left, right)
    }

    fn on_connect(&mut self, left: R, right: R) -> R {
        (self.on_connect)(left, right)
    }
}

enum Frame<'a, A> {
    /// Fold a node; `shared` when its `Arc` has other owners.
    Visit(&'a Expr<A>, bool),
    Overlay(&'a Expr<A>, bool),
    Connect(&'a Expr<A>, bool),
}

fn is_shared<A>(child: &Arc<Expr<A>>) -> bool {
    Arc::strong_count(child) > 1
}

/// Fold `expr` bottom-up with `algebra`.
///
/// A sub-expression reached through a shared `Arc` is folded once; later
/// occurrences reuse a clone of its result. Folding costs time linear in
/// the number of distinct nodes, even when sharing makes the expression
/// tree exponentially larger.
pub fn fold<A, G>(expr: &Expr<A>, algebra: &mut G) -> G::Output
where
    G: Algebra<A>,
    G::Output: Clone,
{
    let mut work = vec![Frame::Visit(expr, false)];
    let mut done: Vec<G::Output> = Vec::new();
    let mut memo: HashMap<*const Expr<A>, G::Output> = HashMap::new();

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Visit(node, shared) => {
                if shared {
                    if let Some(result) = memo.get(&ptr::from_ref(node)) {
                        done.push(result.clone());
                        continue;
                    }
                }
                let leaf = match node {
                    Expr::Empty => algebra.on_empty(),
                    Expr::Vertex(a) => algebra.on_vertex(a),
                    Expr::Overlay(l, r) => {
                        work.push(Frame::Overlay(node, shared));
                        work.push(Frame::Visit(r, is_shared(r)));
                        work.push(Frame::Visit(l, is_shared(l)));
                        continue;
                    }
                    Expr::Connect(l, r) => {
                        work.push(Frame::Connect(node, shared));
                        work.push(Frame::Visit(r, is_shared(r)));
                        work.push(Frame::Visit(l, is_shared(l)));
                        continue;
                    }
                };
                if shared {
                    memo.insert(ptr::from_ref(node), leaf.clone());
                }
                done.push(leaf);
            }
            Frame::Overlay(node, shared) | Frame::Connect(node, shared) => {
                let (Some(right), Some(left)) = (done.pop(), done.pop()) else {
                    unreachable!("binary frame scheduled without two folded operands");
                };
                let combined = if matches!(frame, Frame::Overlay(..)) {
                    algebra.on_overlay(left, right)
                } else {
                    algebra.on_connect(left, right)
                };
                if shared {
                    memo.insert(ptr::from_ref(node), combined.clone());
                }
                done.push(combined);
            }
        }
    }

    match done.pop() {
        Some(result) if done.is_empty() => result,
        _ => unreachable!("fold must leave exactly one result"),
    }
}
