//! Vertex equivalences.
//!
//! Every set operation on vertices is defined modulo an [`Equivalence`]
//! supplied by the caller rather than by physical identity.
//!
//! # Contract
//!
//! An equivalence MUST be reflexive, symmetric and transitive, and
//! `hash_vertex` MUST agree with it: equivalent vertices hash equally.
//! Neither property is checked (checking them is not computable in
//! general). Violating them yields unspecified relations, equality and
//! hashes; it is a caller bug, not a runtime error.
//!
//! Using [`Natural`] for a vertex type whose `Eq` does not match the
//! intended identity (case-insensitive names, records compared by key)
//! silently produces the wrong relation. Pick [`CaseInsensitive`],
//! [`ByKey`] or a [`FnEquivalence`] in that case.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A caller-supplied equivalence relation on vertices, with a compatible hash.
pub trait Equivalence<A: ?Sized> {
    /// Whether `a` and `b` denote the same vertex.
    fn equivalent(&self, a: &A, b: &A) -> bool;

    /// Hash of `a`, equal for all vertices equivalent to `a`.
    fn hash_vertex(&self, a: &A) -> u64;
}

impl<A: ?Sized, E: Equivalence<A> + ?Sized> Equivalence<A> for &E {
    fn equivalent(&self, a: &A, b: &A) -> bool {
        (**self).equivalent(a, b)
    }

    fn hash_vertex(&self, a: &A) -> u64 {
        (**self).hash_vertex(a)
    }
}

/// Hash a value with the process-stable default hasher.
pub(crate) fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// The vertex type's own `Eq` and `Hash`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<A: Eq + Hash + ?Sized> Equivalence<A> for Natural {
    fn equivalent(&self, a: &A, b: &A) -> bool {
        a == b
    }

    fn hash_vertex(&self, a: &A) -> u64 {
        hash_one(a)
    }
}

/// Vertices are equivalent when an extracted key is equal.
pub struct ByKey<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F: Clone, K> Clone for ByKey<F, K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _key: PhantomData,
        }
    }
}

impl<F, K> std::fmt::Debug for ByKey<F, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByKey").finish_non_exhaustive()
    }
}

/// Compare vertices by the key `f` extracts from them.
///
/// ```rust
/// use algraph_core::{Equivalence, by_key};
///
/// let by_id = by_key(|record: &(u32, String)| record.0);
/// assert!(by_id.equivalent(&(7, "old name".to_string()), &(7, "new name".to_string())));
/// ```
pub fn by_key<A: ?Sized, K: Eq + Hash, F: Fn(&A) -> K>(f: F) -> ByKey<F, K> {
    ByKey {
        key: f,
        _key: PhantomData,
    }
}

impl<A: ?Sized, K: Eq + Hash, F: Fn(&A) -> K> Equivalence<A> for ByKey<F, K> {
    fn equivalent(&self, a: &A, b: &A) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash_vertex(&self, a: &A) -> u64 {
        hash_one(&(self.key)(a))
    }
}

/// Case-insensitive comparison of string-like vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl<A: AsRef<str> + ?Sized> Equivalence<A> for CaseInsensitive {
    fn equivalent(&self, a: &A, b: &A) -> bool {
        a.as_ref()
            .chars()
            .flat_map(char::to_lowercase)
            .eq(b.as_ref().chars().flat_map(char::to_lowercase))
    }

    fn hash_vertex(&self, a: &A) -> u64 {
        let mut hasher = DefaultHasher::new();
        for c in a.as_ref().chars().flat_map(char::to_lowercase) {
            c.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// An equivalence assembled from an equality closure and a hash closure.
#[derive(Clone)]
pub struct FnEquivalence<Q, H> {
    eq: Q,
    hash: H,
}

impl<Q, H> FnEquivalence<Q, H> {
    /// Create an equivalence from `eq` and a hash `hash` compatible with it.
    pub fn new(eq: Q, hash: H) -> Self {
        Self { eq, hash }
    }
}

impl<Q, H> std::fmt::Debug for FnEquivalence<Q, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEquivalence").finish_non_exhaustive()
    }
}

impl<A: ?Sized, Q, H> Equivalence<A> for FnEquivalence<Q, H>
where
    Q: Fn(&A, &A) -> bool,
    H: Fn(&A) -> u64,
{
    fn equivalent(&self, a: &A, b: &A) -> bool {
        (self.eq)(a, b)
    }

    fn hash_vertex(&self, a: &A) -> u64 {
        (self.hash)(a)
    }
}
