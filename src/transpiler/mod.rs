//! SQL renderer for filter trees.
//!
//! Walks a tree depth-first and emits a `WHERE` fragment, either with
//! values inlined as literals or as `$N` placeholders plus the ordered
//! list of bound values.
//!
//! ```
//! use datafilter::ast::builders::*;
//! use datafilter::transpiler::{ToSql, ToSqlOptions};
//!
//! let tree = and([eq("a.id", 1), like("a.email", "%z")]);
//!
//! let inline = tree.to_sql_inline(&ToSqlOptions::new()).unwrap();
//! assert_eq!(inline.as_deref(), Some("(a.id = 1 and a.email like '%z')"));
//!
//! let bound = tree.to_sql_parameterized(&ToSqlOptions::new()).unwrap();
//! assert_eq!(bound.sql.as_deref(), Some("(a.id = $1 and a.email like $2)"));
//! assert_eq!(bound.values.len(), 2);
//! ```

mod conditions;
pub mod format;
pub mod params;


pub use conditions::infer_data_type;
pub use params::ParamContext;

use serde::Serialize;
use tracing::debug;

use crate::ast::{Group, Leaf, Node, Value};
use crate::error::{FilterError, FilterResult};
use conditions::Encoding;

/// Override for the left-hand side of a rendered leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTransform {
    /// Replaces `{prefix}{field}` when set
    pub left: Option<String>,
}

impl NodeTransform {
    pub fn left(left: impl Into<String>) -> Self {
        Self {
            left: Some(left.into()),
        }
    }
}

/// Called for every leaf with the field prefix in effect for it.
pub type Transformer<F> =
    Box<dyn Fn(&Leaf<F>, Option<&str>) -> Option<NodeTransform> + Send + Sync>;

/// Options for rendering a filter to SQL.
pub struct ToSqlOptions<F = String> {
    pub transformer: Option<Transformer<F>>,
    /// Spaces per nesting level; 0 renders on a single line
    pub indentation: usize,
    /// Emit `$N` placeholders instead of literals
    pub use_parameters: bool,
    /// Number of the first placeholder
    pub parameter_start_index: usize,
}

impl<F> ToSqlOptions<F> {
    pub fn new() -> Self {
        Self {
            transformer: None,
            indentation: 0,
            use_parameters: true,
            parameter_start_index: 1,
        }
    }

    pub fn indentation(mut self, indentation: usize) -> Self {
        self.indentation = indentation;
        self
    }

    pub fn use_parameters(mut self, use_parameters: bool) -> Self {
        self.use_parameters = use_parameters;
        self
    }

    pub fn parameter_start_index(mut self, start: usize) -> Self {
        self.parameter_start_index = start;
        self
    }

    pub fn transformer(
        mut self,
        transformer: impl Fn(&Leaf<F>, Option<&str>) -> Option<NodeTransform>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }
}

impl<F> Default for ToSqlOptions<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> std::fmt::Debug for ToSqlOptions<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToSqlOptions")
            .field("transformer", &self.transformer.is_some())
            .field("indentation", &self.indentation)
            .field("use_parameters", &self.use_parameters)
            .field("parameter_start_index", &self.parameter_start_index)
            .finish()
    }
}

/// SQL text plus the values its placeholders refer to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterizedSql {
    /// `None` when there is no filter
    pub sql: Option<String>,
    pub values: Vec<Value>,
}

/// Result of [`ToSql::to_sql`], shaped by `use_parameters`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOutput {
    Inline(Option<String>),
    Parameterized(ParameterizedSql),
}

impl SqlOutput {
    pub fn sql(&self) -> Option<&str> {
        match self {
            SqlOutput::Inline(sql) => sql.as_deref(),
            SqlOutput::Parameterized(p) => p.sql.as_deref(),
        }
    }

    /// Bound values; always empty for inline output.
    pub fn values(&self) -> &[Value] {
        match self {
            SqlOutput::Inline(_) => &[],
            SqlOutput::Parameterized(p) => &p.values,
        }
    }
}

/// Conversion of a filter to SQL.
pub trait ToSql<F> {
    /// Render with values written into the SQL text.
    fn to_sql_inline(&self, options: &ToSqlOptions<F>) -> FilterResult<Option<String>>;

    /// Render with `$N` placeholders and the ordered bound values.
    fn to_sql_parameterized(&self, options: &ToSqlOptions<F>) -> FilterResult<ParameterizedSql>;

    /// Render in the mode chosen by `options.use_parameters`.
    fn to_sql(&self, options: &ToSqlOptions<F>) -> FilterResult<SqlOutput> {
        if options.use_parameters {
            self.to_sql_parameterized(options).map(SqlOutput::Parameterized)
        } else {
            self.to_sql_inline(options).map(SqlOutput::Inline)
        }
    }
}

impl<F: AsRef<str>> ToSql<F> for Node<F> {
    fn to_sql_inline(&self, options: &ToSqlOptions<F>) -> FilterResult<Option<String>> {
        render_inline(Some(self), options)
    }

    fn to_sql_parameterized(&self, options: &ToSqlOptions<F>) -> FilterResult<ParameterizedSql> {
        render_parameterized(Some(self), options)
    }
}

/// Render a filter value with inline literals. No filter renders to `None`.
pub fn render_inline<F: AsRef<str>>(
    value: Option<&Node<F>>,
    options: &ToSqlOptions<F>,
) -> FilterResult<Option<String>> {
    let Some(root) = value else {
        return Ok(None);
    };
    let mut renderer = Renderer {
        options,
        encoding: Encoding::Literal,
    };
    let sql = renderer.node(root, root.field_prefix(), 0)?;
    debug!(leaves = root.leaf_count(), len = sql.len(), "rendered inline filter");
    Ok(Some(sql))
}

/// Render a filter value with placeholders, binding into a fresh store.
pub fn render_parameterized<F: AsRef<str>>(
    value: Option<&Node<F>>,
    options: &ToSqlOptions<F>,
) -> FilterResult<ParameterizedSql> {
    let Some(root) = value else {
        return Ok(ParameterizedSql::default());
    };
    if options.parameter_start_index == 0 {
        return Err(FilterError::InvalidOption(
            "parameter_start_index must be at least 1".to_string(),
        ));
    }

    let mut params = ParamContext::new(options.parameter_start_index);
    let mut renderer = Renderer {
        options,
        encoding: Encoding::Parameters(&mut params),
    };
    let sql = renderer.node(root, root.field_prefix(), 0)?;
    debug!(
        leaves = root.leaf_count(),
        params = params.len(),
        start = options.parameter_start_index,
        "rendered parameterized filter"
    );
    Ok(ParameterizedSql {
        sql: Some(sql),
        values: params.into_values(),
    })
}

struct Renderer<'o, 'p, F> {
    options: &'o ToSqlOptions<F>,
    encoding: Encoding<'p>,
}

impl<F: AsRef<str>> Renderer<'_, '_, F> {
    /// `depth` is the nesting of the enclosing group; the root sits at 0.
    fn node(
        &mut self,
        node: &Node<F>,
        field_prefix: Option<&str>,
        depth: usize,
    ) -> FilterResult<String> {
        match node {
            Node::Group(group) => self.group(group, depth + 1),
            Node::Leaf(leaf) => self.leaf(leaf, field_prefix),
        }
    }

    /// Children see this group's own prefix only; prefixes do not cascade.
    fn group(&mut self, group: &Group<F>, depth: usize) -> FilterResult<String> {
        let indentation = self.options.indentation;
        let mut children = Vec::with_capacity(group.nodes.len());
        for child in &group.nodes {
            children.push(self.node(child, group.field_prefix.as_deref(), depth)?);
        }

        Ok(format!(
            "({}{}{})",
            format::indent(depth, indentation),
            children.join(&format::logic_separator(group.logic, depth, indentation)),
            format::closing(depth, indentation),
        ))
    }

    fn leaf(&mut self, leaf: &Leaf<F>, field_prefix: Option<&str>) -> FilterResult<String> {
        let left = self
            .options
            .transformer
            .as_ref()
            .and_then(|transform| transform(leaf, field_prefix))
            .and_then(|t| t.left)
            .unwrap_or_else(|| format!("{}{}", field_prefix.unwrap_or(""), leaf.field.as_ref()));

        let op_val = conditions::op_val(leaf, &mut self.encoding)?;
        Ok(format!("{} {}", left, op_val))
    }
}

/// Transformer writing each dot-path segment as a quoted identifier:
/// `user.id` becomes `"user"."id"`.
pub fn quote_identifiers<F: AsRef<str> + 'static>() -> Transformer<F> {
    Box::new(|leaf: &Leaf<F>, prefix: Option<&str>| {
        let path = format!("{}{}", prefix.unwrap_or(""), leaf.field.as_ref());
        let quoted: Vec<String> = path
            .split('.')
            .map(|segment| format!("\"{}\"", segment.replace('"', "\"\"")))
            .collect();
        Some(NodeTransform::left(quoted.join(".")))
    })
}
