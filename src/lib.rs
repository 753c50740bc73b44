//! # datafilter
//!
//! Composable filter trees rendered to SQL `WHERE` fragments.
//!
//! A filter is a tree of comparisons (`field op value`) combined by `and` /
//! `or` groups. A [`DataFilter`] handle holds the current tree, lets callers
//! replace or extend it, and renders it either with inline literals or with
//! `$N` placeholders plus the ordered bound values.
//!
//! ## Quick Example
//!
//! ```
//! use datafilter::prelude::*;
//! use datafilter::ast::builders::*;
//!
//! let filter = create_filter(and([
//!     eq("a.id", 1),
//!     or([is_in("a.name", ["x", "y"]), like("a.email", "%z")]),
//!     is_not_null("a.del"),
//! ]));
//!
//! let inline = filter.to_sql_inline(&ToSqlOptions::new()).unwrap();
//! assert_eq!(
//!     inline.as_deref(),
//!     Some("(a.id = 1 and (a.name in ('x', 'y') or a.email like '%z') and a.del is not null)")
//! );
//!
//! let bound = filter.to_sql_parameterized(&ToSqlOptions::new()).unwrap();
//! assert_eq!(
//!     bound.sql.as_deref(),
//!     Some("(a.id = $1 and (a.name in ($2, $3) or a.email like $4) and a.del is not null)")
//! );
//! assert_eq!(bound.values, vec![Value::from(1), "x".into(), "y".into(), "%z".into()]);
//! ```
//!
//! ## Quoting
//!
//! Literal mode quotes STRING and EPOCH values with single quotes and does
//! not escape their content. Use parameterized rendering for untrusted input.

pub mod ast;
pub mod config;
pub mod error;
pub mod filter;
pub mod transpiler;

pub use filter::{DataFilter, join_filters};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::RenderConfig;
    pub use crate::error::*;
    pub use crate::filter::{DataFilter, join_filters};
    pub use crate::transpiler::{
        NodeTransform, ParameterizedSql, SqlOutput, ToSql, ToSqlOptions, quote_identifiers,
    };
    pub use crate::create_filter;
}

/// Create a filter handle, optionally seeded with a tree.
///
/// ```
/// use datafilter::create_filter;
/// use datafilter::ast::builders::eq;
///
/// let filter = create_filter(eq("id", 1));
/// assert_eq!(filter.to_json().unwrap(), r#"{"field":"id","op":"=","val":1}"#);
/// ```
pub fn create_filter<F>(initial: impl Into<Option<ast::Node<F>>>) -> DataFilter<F> {
    DataFilter::new(initial)
}
