//! Expression-to-relation interpretation.

use common_config::{AlgraphConfig, InterpreterConfig};
use common_error::{AlgraphError, AlgraphResult};
use log::{debug, trace, warn};

use super::Relation;
use super::closure::{self, EdgeSet};
use super::vertex_index::VertexIndex;
use crate::algebra::Algebra;
use crate::equivalence::Equivalence;
use crate::expr::Graph;
use crate::kind::{Closure, Kind};

/// Interprets graphs as canonical relations.
///
/// Interpretation folds the expression once, interning vertices modulo the
/// equivalence and collecting the cross-product edges of every `Connect`,
/// then applies the kind's closure exactly once.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
}

impl Interpreter {
    /// Create an interpreter with the given configuration.
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    /// Create an interpreter from the interpreter section of `config`.
    pub fn from_config(config: &AlgraphConfig) -> Self {
        Self::new(config.interpreter.clone())
    }

    /// The interpreter configuration.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interpret `graph` under its kind and the equivalence `eq`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgraphError::ResourceExhausted`] when the graph is
    /// transitive and has more vertices than
    /// `max_closure_vertices` allows. No closure work is done in that case.
    pub fn interpret<A, E>(&self, graph: &Graph<A>, eq: E) -> AlgraphResult<Relation<A, E>>
    where
        A: Clone,
        E: Equivalence<A>,
    {
        let (vertices, edges) = base_relation(graph, eq);
        let transitive = graph.kind().closure() == Closure::Transitive;
        if transitive && !self.config.allows_closure(vertices.len()) {
            return Err(AlgraphError::resource_exhausted(format!(
                "transitive closure over {} vertices exceeds the configured limit of {}",
                vertices.len(),
                self.config.max_closure_vertices.unwrap_or_default()
            )));
        }
        Ok(self.close(vertices, edges, graph.kind()))
    }

    /// Interpret without enforcing `max_closure_vertices`.
    pub(crate) fn run<A, E>(&self, graph: &Graph<A>, eq: E) -> Relation<A, E>
    where
        A: Clone,
        E: Equivalence<A>,
    {
        let (vertices, edges) = base_relation(graph, eq);
        self.close(vertices, edges, graph.kind())
    }

    fn close<A, E>(
        &self,
        vertices: VertexIndex<A, E>,
        mut edges: EdgeSet,
        kind: Kind,
    ) -> Relation<A, E>
    where
        E: Equivalence<A>,
    {
        let vertex_count = vertices.len();
        debug!(
            "Interpreting {kind} graph: {vertex_count} vertices, {} base edges",
            edges.len()
        );
        let warn_threshold = self.config.closure_warn_threshold;
        if kind.closure() == Closure::Transitive && vertex_count > warn_threshold {
            warn!(
                "Transitive closure over {vertex_count} vertices \
                 (threshold {warn_threshold}); this is O(V^3)"
            );
        }

        let before = edges.len();
        closure::apply(kind.closure(), vertex_count, &mut edges);
        trace!(
            "{:?} closure added {} edges",
            kind.closure(),
            edges.len() - before
        );

        Relation::from_parts(vertices, edges, kind)
    }
}

/// Fold state for the closure-free relation.
///
/// Each sub-expression folds to the ids of the vertices it mentions. The
/// list may repeat ids; it is deduplicated only where a `Connect` needs it.
struct BaseRelation<A, E> {
    vertices: VertexIndex<A, E>,
    edges: EdgeSet,
}

impl<A: Clone, E: Equivalence<A>> Algebra<A> for BaseRelation<A, E> {
    type Output = Vec<usize>;

    fn on_empty(&mut self) -> Vec<usize> {
        Vec::new()
    }

    fn on_vertex(&mut self, vertex: &A) -> Vec<usize> {
        vec![self.vertices.intern(vertex)]
    }

    fn on_overlay(&mut self, left: Vec<usize>, right: Vec<usize>) -> Vec<usize> {
        let mut ids = merge(left, right);
        // Reused results of shared operands would otherwise double per level.
        if ids.len() > 2 * self.vertices.len() {
            dedup(&mut ids);
        }
        ids
    }

    fn on_connect(&mut self, mut left: Vec<usize>, mut right: Vec<usize>) -> Vec<usize> {
        dedup(&mut left);
        dedup(&mut right);
        for &from in &left {
            self.edges.extend(right.iter().map(|&to| (from, to)));
        }
        merge(left, right)
    }
}

fn base_relation<A, E>(graph: &Graph<A>, eq: E) -> (VertexIndex<A, E>, EdgeSet)
where
    A: Clone,
    E: Equivalence<A>,
{
    let mut algebra = BaseRelation {
        vertices: VertexIndex::new(eq),
        edges: EdgeSet::new(),
    };
    graph.fold(&mut algebra);
    (algebra.vertices, algebra.edges)
}

/// Append the shorter list to the longer one.
fn merge(mut left: Vec<usize>, mut right: Vec<usize>) -> Vec<usize> {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    left.extend(right);
    left
}

fn dedup(ids: &mut Vec<usize>) {
    ids.sort_unstable();
    ids.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::Natural;

    #[test]
    fn test_interpret_directed() {
        let g = Graph::edge("a", "b");
        let rel = Interpreter::default().interpret(&g, Natural).unwrap();
        assert_eq!(rel.vertices(), &["a", "b"]);
        assert_eq!(rel.edges().collect::<Vec<_>>(), vec![(&"a", &"b")]);
        assert_eq!(rel.kind(), Kind::Directed);
    }

    #[test]
    fn test_closure_limit_rejects_large_transitive_graphs() {
        let config = InterpreterConfig::default().with_max_closure_vertices(2);
        let interpreter = Interpreter::new(config);
        let g = Graph::path([1, 2, 3]).transitive();
        let err = interpreter.interpret(&g, Natural).unwrap_err();
        assert!(matches!(err, AlgraphError::ResourceExhausted(_)));
        assert!(err.to_string().contains("3 vertices"));
    }

    #[test]
    fn test_closure_limit_ignores_other_kinds() {
        let config = InterpreterConfig::default().with_max_closure_vertices(2);
        let interpreter = Interpreter::new(config);
        let g = Graph::path([1, 2, 3]).reflexive();
        let rel = interpreter.interpret(&g, Natural).unwrap();
        assert_eq!(rel.edge_count(), 6);
    }

    #[test]
    fn test_closure_within_limit() {
        let config = InterpreterConfig::default().with_max_closure_vertices(3);
        let interpreter = Interpreter::new(config);
        let g = Graph::from_edges([(1, 2), (2, 3)]).transitive();
        let rel = interpreter.interpret(&g, Natural).unwrap();
        assert!(rel.has_edge(&1, &3));
        assert_eq!(rel.edge_count(), 3);
    }

    #[test]
    fn test_connect_deduplicates_repeated_vertices() {
        let left = Graph::from_vertices([1, 1, 1]);
        let g = left.connect(&Graph::from_vertices([2, 2])).unwrap();
        let rel = g.to_relation();
        assert_eq!(rel.vertex_count(), 2);
        assert_eq!(rel.edge_count(), 1);
    }

    #[test]
    fn test_shared_operands_stay_linear() {
        let mut g = Graph::from_vertices([1, 2, 3]);
        for _ in 0..48 {
            g = g.overlay(&g).unwrap();
        }
        let rel = g.to_relation();
        assert_eq!(rel.vertex_count(), 3);
        assert_eq!(rel.edge_count(), 0);

        let mut c = Graph::edge(1, 2);
        for _ in 0..48 {
            c = c.connect(&c).unwrap();
        }
        assert_eq!(c.to_relation().edge_count(), 4);
    }

    #[test]
    fn test_from_config() {
        let config = AlgraphConfig::from_json(r#"{"interpreter": {"max_closure_vertices": 2}}"#)
            .unwrap();
        let interpreter = Interpreter::from_config(&config);
        assert_eq!(interpreter.config().max_closure_vertices, Some(2));
        let g = Graph::path([1, 2, 3]).transitive();
        assert!(interpreter.interpret(&g, Natural).is_err());
    }

    #[test]
    fn test_merge_and_dedup() {
        assert_eq!(merge(vec![1], vec![2, 3]), vec![2, 3, 1]);
        let mut ids = vec![3, 1, 3, 2, 1];
        dedup(&mut ids);
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
