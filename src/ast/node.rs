use serde::{Deserialize, Serialize};

use super::{DataType, Logic, Operator, Value};

/// One comparison: `field op val`.
///
/// `F` is the field-name type. The default `String` accepts any name;
/// a caller-defined enum implementing `AsRef<str>` narrows the tree to a
/// closed set of fields at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf<F = String> {
    /// Dot-path identifier, e.g. `user.id`
    pub field: F,
    pub op: Operator,
    pub val: Value,
    /// Overrides the type inferred from `val` when deciding quoting
    #[serde(rename = "dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
}

impl<F> Leaf<F> {
    pub fn new(field: F, op: Operator, val: impl Into<Value>) -> Self {
        Self {
            field,
            op,
            val: val.into(),
            data_type: None,
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

/// An ordered AND/OR combination of child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group<F = String> {
    pub logic: Logic,
    /// Prepended to the field of each direct leaf child of this group
    #[serde(rename = "fieldPrefix", default, skip_serializing_if = "Option::is_none")]
    pub field_prefix: Option<String>,
    pub nodes: Vec<Node<F>>,
}

impl<F> Group<F> {
    pub fn new(logic: Logic, nodes: impl IntoIterator<Item = Node<F>>) -> Self {
        Self {
            logic,
            field_prefix: None,
            nodes: nodes.into_iter().collect(),
        }
    }

    pub fn with_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_prefix = Some(prefix.into());
        self
    }

    /// Combine the present operands under `logic`, dropping absent ones.
    ///
    /// Always produces a group, even for a single operand.
    pub fn join(logic: Logic, operands: impl IntoIterator<Item = Option<Node<F>>>) -> Self {
        Self::new(logic, operands.into_iter().flatten())
    }
}

/// A filter tree node.
///
/// In JSON the variant is recognised by shape: an object with `nodes` is a
/// group, anything else is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node<F = String> {
    Group(Group<F>),
    Leaf(Leaf<F>),
}

impl<F> Node<F> {
    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    /// The group's own prefix; leaves carry none.
    pub fn field_prefix(&self) -> Option<&str> {
        match self {
            Node::Group(group) => group.field_prefix.as_deref(),
            Node::Leaf(_) => None,
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Group(group) => group.nodes.iter().map(Node::leaf_count).sum(),
        }
    }

    /// Deepest group nesting in this subtree; a bare leaf is 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Group(group) => 1 + group.nodes.iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}

impl<F> From<Leaf<F>> for Node<F> {
    fn from(leaf: Leaf<F>) -> Self {
        Node::Leaf(leaf)
    }
}

impl<F> From<Group<F>> for Node<F> {
    fn from(group: Group<F>) -> Self {
        Node::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leaf_json_shape() {
        let leaf = eq("user.id", 1);
        assert_eq!(
            serde_json::to_string(&leaf).unwrap(),
            r#"{"field":"user.id","op":"=","val":1}"#
        );
    }

    #[test]
    fn test_data_type_json_key() {
        let leaf: Node = Leaf::new("ts".to_string(), Operator::Gt, "2020-01-01")
            .with_data_type(DataType::Epoch)
            .into();
        assert_eq!(
            serde_json::to_string(&leaf).unwrap(),
            r#"{"field":"ts","op":">","val":"2020-01-01","dataType":1}"#
        );
    }

    #[test]
    fn test_group_json_shape() {
        let group: Node = Group::new(Logic::Or, [eq("a", 1), is_null("b")])
            .with_field_prefix("t.")
            .into();
        assert_eq!(
            serde_json::to_string(&group).unwrap(),
            r#"{"logic":"or","fieldPrefix":"t.","nodes":[{"field":"a","op":"=","val":1},{"field":"b","op":"=","val":null}]}"#
        );
    }

    #[test]
    fn test_untagged_discrimination() {
        let node: Node = serde_json::from_str(
            r#"{"logic":"and","nodes":[{"field":"x","op":"in","val":[1,2]}]}"#,
        )
        .unwrap();
        let Node::Group(group) = &node else {
            panic!("expected a group");
        };
        assert_eq!(group.logic, Logic::And);
        assert!(matches!(group.nodes[0], Node::Leaf(_)));
    }

    #[test]
    fn test_join_drops_absent_operands() {
        let group: Group = Group::join(Logic::And, [None, Some(eq("a", 1)), None]);
        assert_eq!(group.nodes, vec![eq("a", 1)]);

        let empty: Group = Group::join(Logic::Or, [None, None]);
        assert!(empty.nodes.is_empty());
    }

    #[test]
    fn test_counts() {
        let tree = and([eq("a", 1), or([eq("b", 2), eq("c", 3)])]);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(eq("a", 1).depth(), 0);
    }
}
