//! The algebraic expression tree.

use std::fmt;
use std::sync::Arc;

use common_display::{TreeNode, truncate_string};

use crate::algebra::{FoldWith, fold};

/// An algebraic graph expression.
///
/// Children are reference counted, so sub-expressions can be shared between
/// any number of parents at no cost. Nothing ever mutates a node in place.
///
/// `Expr` has no `PartialEq`. Structurally different expressions may denote
/// the same graph; compare graphs through their interpreted relations (see
/// [`crate::Graph`]).
#[derive(Debug, Clone)]
pub enum Expr<A> {
    /// No vertices, no edges.
    Empty,
    /// A single vertex.
    Vertex(A),
    /// Union of the vertex and edge sets of both operands.
    Overlay(Arc<Expr<A>>, Arc<Expr<A>>),
    /// Overlay of both operands plus an edge from every left vertex to
    /// every right vertex.
    Connect(Arc<Expr<A>>, Arc<Expr<A>>),
}

impl<A> Expr<A> {
    /// The empty expression.
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// A single-vertex expression.
    pub const fn vertex(a: A) -> Self {
        Self::Vertex(a)
    }

    /// Overlay two expressions.
    pub fn overlay(left: impl Into<Arc<Self>>, right: impl Into<Arc<Self>>) -> Self {
        Self::Overlay(left.into(), right.into())
    }

    /// Connect two expressions.
    pub fn connect(left: impl Into<Arc<Self>>, right: impl Into<Arc<Self>>) -> Self {
        Self::Connect(left.into(), right.into())
    }

    /// Whether this node is the `Empty` constructor itself.
    ///
    /// This is a structural check: `Overlay(Empty, Empty)` denotes the empty
    /// graph but is not structurally empty.
    pub const fn is_structurally_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of constructor nodes in the expression.
    pub fn size(&self) -> usize {
        fold(
            self,
            &mut FoldWith {
                on_empty: || 1,
                on_vertex: |_: &A| 1,
                on_overlay: |l: usize, r: usize| l + r + 1,
                on_connect: |l: usize, r: usize| l + r + 1,
            },
        )
    }

    /// Height of the expression tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        fold(
            self,
            &mut FoldWith {
                on_empty: || 1,
                on_vertex: |_: &A| 1,
                on_overlay: |l: usize, r: usize| l.max(r) + 1,
                on_connect: |l: usize, r: usize| l.max(r) + 1,
            },
        )
    }

    fn is_uniquely_owned_branch(child: &Arc<Self>) -> bool {
        Arc::strong_count(child) == 1 && matches!(**child, Self::Overlay(..) | Self::Connect(..))
    }
}

// Long left-nested chains (paths, vertex lists) would otherwise be dropped
// recursively, one stack frame per level.
impl<A> Drop for Expr<A> {
    fn drop(&mut self) {
        let needs_unwinding = match self {
            Self::Overlay(l, r) | Self::Connect(l, r) => {
                Self::is_uniquely_owned_branch(l) || Self::is_uniquely_owned_branch(r)
            }
            _ => false,
        };
        if !needs_unwinding {
            return;
        }

        let placeholder = Arc::new(Self::Empty);
        let mut pending = Vec::new();
        detach_children(self, &placeholder, &mut pending);
        while let Some(child) = pending.pop() {
            if let Ok(mut owned) = Arc::try_unwrap(child) {
                detach_children(&mut owned, &placeholder, &mut pending);
            }
        }
    }
}

fn detach_children<A>(
    expr: &mut Expr<A>,
    placeholder: &Arc<Expr<A>>,
    pending: &mut Vec<Arc<Expr<A>>>,
) {
    if let Expr::Overlay(l, r) | Expr::Connect(l, r) = expr {
        pending.push(std::mem::replace(l, Arc::clone(placeholder)));
        pending.push(std::mem::replace(r, Arc::clone(placeholder)));
    }
}

impl<A> Default for Expr<A> {
    fn default() -> Self {
        Self::Empty
    }
}

enum Piece<'a, A> {
    Node(&'a Expr<A>, bool),
    Text(&'static str),
}

/// Renders `+` for overlay and `*` for connect; connect binds tighter.
impl<A: fmt::Display> fmt::Display for Expr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self, false)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Self::Empty, _) => f.write_str("ε")?,
                Piece::Node(Self::Vertex(a), _) => write!(f, "{a}")?,
                Piece::Node(Self::Overlay(l, r), wrapped) => {
                    if wrapped {
                        pending.push(Piece::Text(")"));
                    }
                    pending.push(Piece::Node(r, false));
                    pending.push(Piece::Text(" + "));
                    pending.push(Piece::Node(l, false));
                    if wrapped {
                        pending.push(Piece::Text("("));
                    }
                }
                Piece::Node(Self::Connect(l, r), _) => {
                    pending.push(Piece::Node(r, matches!(**r, Self::Overlay(..))));
                    pending.push(Piece::Text(" * "));
                    pending.push(Piece::Node(l, matches!(**l, Self::Overlay(..))));
                }
            }
        }
        Ok(())
    }
}

impl<A: fmt::Debug> TreeNode for Expr<A> {
    fn name(&self) -> &str {
        match self {
            Self::Empty => "Empty",
            Self::Vertex(_) => "Vertex",
            Self::Overlay(..) => "Overlay",
            Self::Connect(..) => "Connect",
        }
    }

    fn children(&self) -> Vec<&dyn TreeNode> {
        match self {
            Self::Empty | Self::Vertex(_) => vec![],
            Self::Overlay(l, r) | Self::Connect(l, r) => {
                vec![l.as_ref() as &dyn TreeNode, r.as_ref() as &dyn TreeNode]
            }
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Vertex(a) => Some(truncate_string(&format!("{a:?}"), 40)),
            _ => None,
        }
    }
}
