//! Mutable handle over a filter tree.
//!
//! The handle owns the current root and only ever replaces it wholesale.
//! `add_and` / `add_or` wrap the previous root and the new node in a fresh
//! group; nothing below the root is edited.
//!
//! ```
//! use datafilter::prelude::*;
//! use datafilter::ast::builders::*;
//!
//! let mut filter = DataFilter::new(eq("a", 1));
//! filter.add_or(ne("b", 2));
//!
//! let sql = filter.to_sql_inline(&ToSqlOptions::new()).unwrap();
//! assert_eq!(sql.as_deref(), Some("(a = 1 or b != 2)"));
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::ast::{Group, Logic, Node};
use crate::error::FilterResult;
use crate::transpiler::{self, ParameterizedSql, ToSql, ToSqlOptions};

/// A filter value that can be replaced, extended and rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFilter<F = String> {
    value: Option<Node<F>>,
}

impl<F> DataFilter<F> {
    pub fn new(initial: impl Into<Option<Node<F>>>) -> Self {
        Self {
            value: initial.into(),
        }
    }

    /// The current root, `None` when there is no filter.
    pub fn value(&self) -> Option<&Node<F>> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Node<F>> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Replace the whole filter.
    pub fn update_filter(&mut self, filter: impl Into<Option<Node<F>>>) {
        self.value = filter.into();
        trace!(present = self.value.is_some(), "filter replaced");
    }

    /// Root becomes `and(previous, node)`.
    pub fn add_and(&mut self, node: impl Into<Option<Node<F>>>) {
        self.combine(Logic::And, node.into());
    }

    /// Root becomes `or(previous, node)`.
    pub fn add_or(&mut self, node: impl Into<Option<Node<F>>>) {
        self.combine(Logic::Or, node.into());
    }

    fn combine(&mut self, logic: Logic, node: Option<Node<F>>) {
        let previous = self.value.take();
        let group = Group::join(logic, [previous, node]);
        trace!(%logic, operands = group.nodes.len(), "filter extended");
        self.value = Some(Node::Group(group));
    }
}

impl<F: Serialize> DataFilter<F> {
    /// JSON text of the current value; no filter is `null`.
    pub fn to_json(&self) -> FilterResult<String> {
        Ok(serde_json::to_string(&self.value)?)
    }

    pub fn to_json_pretty(&self) -> FilterResult<String> {
        Ok(serde_json::to_string_pretty(&self.value)?)
    }
}

impl<F: DeserializeOwned> DataFilter<F> {
    /// Rebuild a handle from [`DataFilter::to_json`] output.
    pub fn from_json(json: &str) -> FilterResult<Self> {
        let value: Option<Node<F>> = serde_json::from_str(json)?;
        Ok(Self { value })
    }
}

impl<F> Default for DataFilter<F> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<F> From<Node<F>> for DataFilter<F> {
    fn from(node: Node<F>) -> Self {
        Self::new(node)
    }
}

impl<F: AsRef<str>> ToSql<F> for DataFilter<F> {
    fn to_sql_inline(&self, options: &ToSqlOptions<F>) -> FilterResult<Option<String>> {
        transpiler::render_inline(self.value(), options)
    }

    fn to_sql_parameterized(&self, options: &ToSqlOptions<F>) -> FilterResult<ParameterizedSql> {
        transpiler::render_parameterized(self.value(), options)
    }
}

/// A new filter whose root combines the values of `filters` under `logic`.
///
/// Filters without a value are skipped.
pub fn join_filters<'a, F: Clone + 'a>(
    logic: Logic,
    filters: impl IntoIterator<Item = &'a DataFilter<F>>,
) -> DataFilter<F> {
    let group = Group::join(logic, filters.into_iter().map(|f| f.value.clone()));
    DataFilter::new(Node::Group(group))
}
