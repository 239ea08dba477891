//! Graph kinds and the policy for combining them.
//!
//! A kind is a single tag on a whole graph. It never changes the stored
//! expression; it only selects the closure applied when the expression is
//! interpreted as a relation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an expression's edge relation is closed during interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Edges are taken as written.
    #[default]
    Directed,
    /// Every edge `(a, b)` also yields `(b, a)`.
    Undirected,
    /// Every vertex `v` carries a self-loop `(v, v)`.
    Reflexive,
    /// The edge relation is closed under composition.
    Transitive,
}

/// The closure operation a kind selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// No change.
    Identity,
    /// Add the reverse of every edge.
    Symmetric,
    /// Add a self-loop on every vertex.
    SelfLoops,
    /// Add `(a, c)` whenever `(a, b)` and `(b, c)` are edges, to fixpoint.
    Transitive,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 4] = [
        Kind::Directed,
        Kind::Undirected,
        Kind::Reflexive,
        Kind::Transitive,
    ];

    /// Lowercase name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
            Self::Reflexive => "reflexive",
            Self::Transitive => "transitive",
        }
    }

    /// The closure applied to relations of this kind.
    pub const fn closure(self) -> Closure {
        match self {
            Self::Directed => Closure::Identity,
            Self::Undirected => Closure::Symmetric,
            Self::Reflexive => Closure::SelfLoops,
            Self::Transitive => Closure::Transitive,
        }
    }

    /// Whether graphs of these two kinds may be combined.
    ///
    /// Equal kinds are always compatible, and `directed` mixes with
    /// `undirected`. Any other pairing is rejected.
    pub const fn is_compatible_with(self, other: Kind) -> bool {
        self.combine(other).is_some()
    }

    /// The kind of a graph combined from operands of kinds `self` and
    /// `other`, or `None` if the pairing is incompatible.
    ///
    /// Mixing `directed` with `undirected` degrades to `undirected`.
    pub const fn combine(self, other: Kind) -> Option<Kind> {
        match (self, other) {
            (Self::Directed, Self::Directed) => Some(Self::Directed),
            (Self::Undirected, Self::Undirected)
            | (Self::Directed, Self::Undirected)
            | (Self::Undirected, Self::Directed) => Some(Self::Undirected),
            (Self::Reflexive, Self::Reflexive) => Some(Self::Reflexive),
            (Self::Transitive, Self::Transitive) => Some(Self::Transitive),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether graphs of kinds `k1` and `k2` may be combined.
pub const fn are_kinds_compatible(k1: Kind, k2: Kind) -> bool {
    k1.is_compatible_with(k2)
}
