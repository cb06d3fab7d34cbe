//! Core infrastructure for Favtree.
//!
//! This module provides the fundamental data types and error handling used
//! throughout the crate.

pub mod error;
pub mod types;

pub use error::{FavTreeError, Result};
pub use types::*;
