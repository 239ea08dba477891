//! Vertex deduplication modulo an equivalence.

use std::collections::HashMap;

use crate::equivalence::Equivalence;

/// Canonical vertex storage: each equivalence class is stored once, under a
/// dense id assigned in first-occurrence order.
///
/// Lookups hash with the equivalence and then compare within the hash
/// bucket, so only `hash_vertex` and `equivalent` are ever consulted.
pub(crate) struct VertexIndex<A, E> {
    eq: E,
    vertices: Vec<A>,
    hashes: Vec<u64>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl<A, E> VertexIndex<A, E> {
    pub(crate) fn new(eq: E) -> Self {
        Self {
            eq,
            vertices: Vec::new(),
            hashes: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn as_slice(&self) -> &[A] {
        &self.vertices
    }

    pub(crate) fn get(&self, id: usize) -> &A {
        &self.vertices[id]
    }

    pub(crate) fn hash_of(&self, id: usize) -> u64 {
        self.hashes[id]
    }

    pub(crate) fn equivalence(&self) -> &E {
        &self.eq
    }
}

impl<A, E: Equivalence<A>> VertexIndex<A, E> {
    /// Id of the class containing `a`, if any.
    pub(crate) fn position(&self, a: &A) -> Option<usize> {
        let hash = self.eq.hash_vertex(a);
        self.find(a, hash)
    }

    fn find(&self, a: &A, hash: u64) -> Option<usize> {
        self.buckets.get(&hash).and_then(|ids| {
            ids.iter()
                .copied()
                .find(|&id| self.eq.equivalent(&self.vertices[id], a))
        })
    }
}

impl<A: Clone, E: Equivalence<A>> VertexIndex<A, E> {
    /// Id of the class containing `a`, adding `a` as its representative if
    /// no such class exists yet.
    pub(crate) fn intern(&mut self, a: &A) -> usize {
        let hash = self.eq.hash_vertex(a);
        if let Some(id) = self.find(a, hash) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(a.clone());
        self.hashes.push(hash);
        self.buckets.entry(hash).or_default().push(id);
        id
    }
}
