//! Builder functions for filter trees with plain string field names.
//!
//! ```
//! use datafilter::ast::builders::*;
//!
//! let tree = and([
//!     eq("user.id", 1),
//!     or([is_in("user.name", ["x", "y"]), like("user.email", "%z")]),
//!     is_not_null("user.date_deleted"),
//! ]);
//! assert_eq!(tree.leaf_count(), 4);
//! ```

use super::{Group, Leaf, Logic, Node, Operator, Value};

/// Create a leaf node with any operator.
pub fn leaf(field: &str, op: Operator, value: impl Into<Value>) -> Node {
    Node::Leaf(Leaf::new(field.to_string(), op, value))
}

/// field = value
pub fn eq(field: &str, value: impl Into<Value>) -> Node {
    leaf(field, Operator::Eq, value)
}

/// field != value
pub fn ne(field: &str, value: impl Into<Value>) -> Node {
    leaf(field, Operator::Ne, value)
}

/// field > value
pub fn gt(field: &str, value: impl Into<Value>) -> Node {
    leaf(field, Operator::Gt, value)
}

/// field >= value
pub fn gte(field: &str, value: impl Into<Value>) -> Node {
    leaf(field, Operator::Gte, value)
}

/// field < value
pub fn lt(field: &str, value: impl Into<Value>) -> Node {
    leaf(field, Operator::Lt, value)
}

/// field <= value
pub fn lte(field: &str, value: impl Into<Value>) -> Node {
    leaf(field, Operator::Lte, value)
}

/// field like pattern
pub fn like(field: &str, pattern: impl Into<Value>) -> Node {
    leaf(field, Operator::Like, pattern)
}

/// field between low and high
pub fn between(field: &str, low: impl Into<Value>, high: impl Into<Value>) -> Node {
    leaf(field, Operator::Between, (low, high))
}

/// field in (values)
pub fn is_in<V: Into<Value>>(field: &str, values: impl IntoIterator<Item = V>) -> Node {
    let vals: Vec<Value> = values.into_iter().map(Into::into).collect();
    leaf(field, Operator::In, Value::Array(vals))
}

/// field is null
pub fn is_null(field: &str) -> Node {
    leaf(field, Operator::Eq, Value::Null)
}

/// field is not null
pub fn is_not_null(field: &str) -> Node {
    leaf(field, Operator::Ne, Value::Null)
}

/// AND group over `nodes`
pub fn and<F>(nodes: impl IntoIterator<Item = Node<F>>) -> Node<F> {
    Node::Group(Group::new(Logic::And, nodes))
}

/// OR group over `nodes`
pub fn or<F>(nodes: impl IntoIterator<Item = Node<F>>) -> Node<F> {
    Node::Group(Group::new(Logic::Or, nodes))
}
