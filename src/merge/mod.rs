//! Taskfile composition
//!
//! This module folds included taskfiles into their parent, rewriting task
//! names into the include's namespace.

pub mod compose;
pub mod include;
pub mod namespace;

// Re-export main types
pub use compose::*;
pub use include::*;
pub use namespace::*;
