//! Taskfile document model
//!
//! This module defines the in-memory form of a taskfile, its YAML
//! (de)serialization and validation of include descriptors.

pub mod parse;
pub mod schema;
pub mod types;
pub mod vars;
pub mod version;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
pub use vars::*;
pub use version::*;
