//! Filter tree model.
//!
//! A filter is a tree of [`Leaf`] comparisons combined by [`Group`]s. Trees
//! are plain values: the mutation API replaces them, it never edits them in
//! place.

pub mod builders;
pub mod node;
pub mod operators;
pub mod values;

pub use node::*;
pub use operators::*;
pub use values::*;
