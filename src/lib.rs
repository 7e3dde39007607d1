//! Taskmerge - composition of YAML taskfiles
//!
//! Taskmerge folds included taskfiles into their parent, producing one task
//! graph where every included task lives under its include's namespace.
//! Reading files and running tasks are left to the caller.

// Public modules
pub mod config;
pub mod error;
pub mod merge;

// Re-export commonly used types
pub use config::{Include, Task, Taskfile};
pub use error::{Result, TaskfileError};
pub use merge::{
    compose, compose_at, merge, task_name_with_namespace, IncludeResolver, ResolvedInclude,
    NAMESPACE_SEPARATOR,
};

/// Current version of Taskmerge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
