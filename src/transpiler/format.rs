//! Whitespace between group children.
//!
//! Indentation 0 keeps a group on one line; a positive width puts every
//! child and every closing parenthesis on its own line, indented by
//! `depth * width` spaces.

use crate::ast::Logic;

/// Break placed after `(` and before each child, or nothing when inline.
pub fn indent(depth: usize, indentation: usize) -> String {
    if indentation == 0 {
        String::new()
    } else {
        format!("\n{}", " ".repeat(depth * indentation))
    }
}

/// Separator between two children of a group at `depth`.
pub fn logic_separator(logic: Logic, depth: usize, indentation: usize) -> String {
    if indentation == 0 {
        format!(" {} ", logic)
    } else {
        format!("{}{} ", indent(depth, indentation), logic)
    }
}

/// Break placed before the `)` closing a group at `depth`.
pub fn closing(depth: usize, indentation: usize) -> String {
    indent(depth.saturating_sub(1), indentation)
}
