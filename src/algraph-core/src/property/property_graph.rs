//! Vertex metadata and edge labels over an algebraic graph.

use std::collections::HashMap;
use std::hash::Hash;

use common_error::{AlgraphResult, graph_err};

use super::{PropertyMap, Value};
use crate::equivalence::Natural;
use crate::expr::Graph;
use crate::relation::Relation;

/// Label attached to an edge.
pub type Label = String;

/// A graph with per-vertex properties and per-edge labels.
///
/// The relation is interpreted once at construction and reused for every
/// lookup. Vertices are identified by natural equality.
///
/// ```rust
/// use algraph_core::Graph;
/// use algraph_core::property::{PropertyGraph, Value};
///
/// let g = Graph::from_edges([("alice", "bob"), ("bob", "carol")]);
/// let mut pg = PropertyGraph::new(g);
/// pg.set_vertex_property(&"alice", "age", 30).unwrap();
/// pg.label_edge(&"alice", &"bob", "KNOWS").unwrap();
///
/// assert_eq!(pg.vertex_property(&"alice", "age"), Some(&Value::Int64(30)));
/// assert_eq!(pg.edge_label(&"alice", &"bob"), Some("KNOWS"));
/// assert!(pg.label_edge(&"carol", &"alice", "KNOWS").is_err());
/// ```
#[derive(Debug)]
pub struct PropertyGraph<A> {
    graph: Graph<A>,
    relation: Relation<A, Natural>,
    vertex_properties: HashMap<A, PropertyMap>,
    edge_labels: HashMap<(A, A), Label>,
}

impl<A: Eq + Hash + Clone> PropertyGraph<A> {
    /// Wrap `graph` with empty metadata.
    pub fn new(graph: Graph<A>) -> Self {
        let relation = graph.to_relation();
        Self {
            graph,
            relation,
            vertex_properties: HashMap::new(),
            edge_labels: HashMap::new(),
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph<A> {
        &self.graph
    }

    /// The interpreted relation of the underlying graph.
    pub fn relation(&self) -> &Relation<A, Natural> {
        &self.relation
    }

    /// Set one property on a vertex.
    ///
    /// # Errors
    ///
    /// Returns `GraphError` if `vertex` is not in the graph.
    pub fn set_vertex_property(
        &mut self,
        vertex: &A,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> AlgraphResult<()> {
        self.set_vertex_properties(vertex, [(key, value)])
    }

    /// Set several properties on a vertex.
    ///
    /// # Errors
    ///
    /// Returns `GraphError` if `vertex` is not in the graph.
    pub fn set_vertex_properties<K, V>(
        &mut self,
        vertex: &A,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> AlgraphResult<()>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        if !self.relation.has_vertex(vertex) {
            graph_err!("cannot set properties on a vertex absent from the graph");
        }
        let map = self.vertex_properties.entry(vertex.clone()).or_default();
        for (key, value) in properties {
            map.insert(key.into(), value.into());
        }
        Ok(())
    }

    /// Remove a property from a vertex, returning its value.
    pub fn remove_vertex_property(&mut self, vertex: &A, key: &str) -> Option<Value> {
        self.vertex_properties.get_mut(vertex)?.remove(key)
    }

    /// All properties of a vertex.
    pub fn vertex_properties(&self, vertex: &A) -> Option<&PropertyMap> {
        self.vertex_properties.get(vertex)
    }

    /// One property of a vertex.
    pub fn vertex_property(&self, vertex: &A, key: &str) -> Option<&Value> {
        self.vertex_properties.get(vertex)?.get(key)
    }

    /// Label the edge `from -> to`, replacing any previous label.
    ///
    /// # Errors
    ///
    /// Returns `GraphError` if the edge is not in the graph's relation
    /// (after the kind's closure).
    pub fn label_edge(&mut self, from: &A, to: &A, label: impl Into<Label>) -> AlgraphResult<()> {
        if !self.relation.has_edge(from, to) {
            graph_err!("cannot label an edge absent from the graph");
        }
        self.edge_labels
            .insert((from.clone(), to.clone()), label.into());
        Ok(())
    }

    /// The label of `from -> to`, if any.
    pub fn edge_label(&self, from: &A, to: &A) -> Option<&str> {
        self.edge_labels
            .get(&(from.clone(), to.clone()))
            .map(String::as_str)
    }

    /// Vertices whose property `key` equals `value`, in vertex order.
    pub fn vertices_with_property(&self, key: &str, value: &Value) -> Vec<&A> {
        self.relation
            .vertices()
            .iter()
            .filter(|v| self.vertex_property(v, key) == Some(value))
            .collect()
    }

    /// Edges carrying `label`, in edge order.
    pub fn edges_with_label(&self, label: &str) -> Vec<(&A, &A)> {
        self.relation
            .edges()
            .filter(|(a, b)| self.edge_label(a, b) == Some(label))
            .collect()
    }
}
