//! Model export.
//!
//! Currently one surface: the nested JSON re-expression of a fitted tree.

pub mod json;
