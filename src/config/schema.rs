//! Document validation
//!
//! This module checks include descriptors and taskfiles before they are
//! merged.

use crate::config::types::{Include, Taskfile};
use crate::error::{ConfigError, ConfigResult, MergeError, MergeResult};

/// Validate an include descriptor before it is used for namespacing
pub fn validate_include(include: &Include) -> MergeResult<()> {
    if include.namespace.trim().is_empty() {
        return Err(MergeError::InvalidInclude(format!(
            "namespace for '{}' must not be empty",
            include.taskfile
        )));
    }

    if include.aliases.iter().any(|alias| alias.trim().is_empty()) {
        return Err(MergeError::InvalidInclude(format!(
            "namespace '{}' has an empty alias",
            include.namespace
        )));
    }

    if include.excludes.iter().any(|name| name.is_empty()) {
        return Err(MergeError::InvalidInclude(format!(
            "namespace '{}' excludes an empty task name",
            include.namespace
        )));
    }

    Ok(())
}

/// Validate a complete taskfile
pub fn validate_taskfile(taskfile: &Taskfile) -> ConfigResult<()> {
    for (name, task) in &taskfile.tasks {
        if name.is_empty() {
            return Err(ConfigError::Invalid("task name must not be empty".to_string()));
        }
        if task.aliases.iter().any(|alias| alias.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "task '{}' has an empty alias",
                name
            )));
        }
    }

    for include in taskfile.includes.values() {
        validate_include(include).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if include.taskfile.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "include '{}' has no taskfile path",
                include.namespace
            )));
        }
    }

    Ok(())
}
