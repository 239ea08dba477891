//! Flat serde encoding of expressions.
//!
//! An expression is written as a list of nodes in post-order. Each branch
//! names its operands by their index in the list, and the root is the last
//! node. A shared sub-expression is written once and referenced by index
//! from every parent. Neither direction recurses, so expressions of any
//! depth round-trip.

use std::collections::HashMap;
use std::ptr;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Expr;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Node<T> {
    Empty,
    Vertex(T),
    Overlay(usize, usize),
    Connect(usize, usize),
}

enum Step<'a, A> {
    Enter(&'a Expr<A>),
    Exit(&'a Expr<A>),
}

fn flatten<A>(root: &Expr<A>) -> Vec<Node<&A>> {
    let mut nodes = Vec::new();
    let mut positions: HashMap<*const Expr<A>, usize> = HashMap::new();
    let mut work = vec![Step::Enter(root)];

    while let Some(step) = work.pop() {
        let (expr, node) = match step {
            Step::Enter(expr) => {
                if positions.contains_key(&ptr::from_ref(expr)) {
                    continue;
                }
                match expr {
                    Expr::Empty => (expr, Node::Empty),
                    Expr::Vertex(a) => (expr, Node::Vertex(a)),
                    Expr::Overlay(l, r) | Expr::Connect(l, r) => {
                        work.push(Step::Exit(expr));
                        work.push(Step::Enter(r));
                        work.push(Step::Enter(l));
                        continue;
                    }
                }
            }
            Step::Exit(expr) => {
                let operand = |child: &Arc<Expr<A>>| positions[&Arc::as_ptr(child)];
                match expr {
                    Expr::Overlay(l, r) => (expr, Node::Overlay(operand(l), operand(r))),
                    Expr::Connect(l, r) => (expr, Node::Connect(operand(l), operand(r))),
                    Expr::Empty | Expr::Vertex(_) => unreachable!("leaves are never exited"),
                }
            }
        };
        positions.insert(ptr::from_ref(expr), nodes.len());
        nodes.push(node);
    }
    nodes
}

fn rebuild<A>(nodes: Vec<Node<A>>) -> Result<Expr<A>, String> {
    let count = nodes.len();
    let mut built: Vec<Arc<Expr<A>>> = Vec::with_capacity(count);
    for (position, node) in nodes.into_iter().enumerate() {
        let operand = |index: usize| {
            built.get(index).cloned().ok_or_else(|| {
                format!("node {position} refers to node {index}, which does not precede it")
            })
        };
        let expr = match node {
            Node::Empty => Expr::Empty,
            Node::Vertex(a) => Expr::Vertex(a),
            Node::Overlay(l, r) => Expr::Overlay(operand(l)?, operand(r)?),
            Node::Connect(l, r) => Expr::Connect(operand(l)?, operand(r)?),
        };
        if position + 1 == count {
            return Ok(expr);
        }
        built.push(Arc::new(expr));
    }
    Err("an expression needs at least one node".to_string())
}

impl<A: Serialize> Serialize for Expr<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        flatten(self).serialize(serializer)
    }
}

impl<'de, A: Deserialize<'de>> Deserialize<'de> for Expr<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nodes = Vec::<Node<A>>::deserialize(deserializer)?;
        rebuild(nodes).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Graph, Kind};

    #[test]
    fn test_nodes_are_post_order() {
        let e = Expr::connect(Expr::vertex(1), Expr::overlay(Expr::vertex(2), Expr::empty()));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"vertex": 1},
                {"vertex": 2},
                "empty",
                {"overlay": [1, 2]},
                {"connect": [0, 3]}
            ])
        );
    }

    #[test]
    fn test_shared_operands_are_written_once() {
        let g = Graph::clique(["a", "b"]);
        let json = serde_json::to_value(g.expr()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(4));
        assert_eq!(json[3], serde_json::json!({"connect": [2, 2]}));

        let back: Expr<String> = serde_json::from_value(json).unwrap();
        let Expr::Connect(l, r) = &back else {
            panic!("expected a connect");
        };
        assert!(Arc::ptr_eq(l, r));
    }

    #[test]
    fn test_long_path_roundtrip() {
        let g = Graph::path(0u32..5000).transitive();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), Kind::Transitive);
        assert_eq!(back.expr_depth(), 5000);
        assert_eq!(back.vertex_list(), g.vertex_list());

        let short = Graph::path(0u32..100);
        let json = serde_json::to_string(&short).unwrap();
        let back: Graph<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, short);
    }

    #[test]
    fn test_malformed_node_lists_are_rejected() {
        let forward = serde_json::from_str::<Expr<u8>>(r#"[{"overlay": [0, 1]}]"#);
        assert!(forward.unwrap_err().to_string().contains("does not precede"));

        let empty = serde_json::from_str::<Expr<u8>>("[]");
        assert!(empty.is_err());
    }
}
