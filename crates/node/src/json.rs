//! Conversions between [`Node`] and in-memory `serde_json::Value` trees.
//!
//! Byte-level parsing and printing stay with `serde_json`; this module only
//! moves already-built trees across the boundary.

use serde_json::{Map as JsonMap, Number, Value};

use crate::node::{Node, Object};

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => number_to_node(&n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        Node::from(value.clone())
    }
}

fn number_to_node(n: &Number) -> Node {
    if let Some(i) = n.as_i64() {
        Node::Int(i)
    } else {
        // u64 above i64::MAX, or a float
        Node::Double(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Int(n) => Value::Number(n.into()),
            // JSON has no NaN/Infinity
            Node::Double(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
            Node::String(s) => Value::String(s),
            Node::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<JsonMap<String, Value>>(),
            ),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        Value::from(node.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let node = Node::from(json!({"a": [1, 2.5, "x", null, true]}));
        assert_eq!(node.pointer("/a/0"), Some(&Node::Int(1)));
        assert_eq!(node.pointer("/a/1"), Some(&Node::Double(2.5)));
        assert_eq!(node.pointer("/a/2"), Some(&Node::from("x")));
        assert_eq!(node.pointer("/a/3"), Some(&Node::Null));
        assert_eq!(node.pointer("/a/4"), Some(&Node::Bool(true)));
    }

    #[test]
    fn test_large_u64_becomes_double() {
        let node = Node::from(json!(u64::MAX));
        assert_eq!(node, Node::Double(u64::MAX as f64));
    }

    #[test]
    fn test_to_json_keeps_order() {
        let node = Node::object([("z", 1), ("a", 2)]);
        let value = Value::from(&node);
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_non_finite_double_becomes_null() {
        assert_eq!(Value::from(Node::Double(f64::NAN)), Value::Null);
        assert_eq!(Value::from(Node::Double(f64::INFINITY)), Value::Null);
    }

    #[test]
    fn test_roundtrip() {
        let value = json!({"name": "n", "tags": ["a", "b"], "nested": {"x": 1, "y": -2.5}});
        assert_eq!(Value::from(Node::from(value.clone())), value);
    }
}
