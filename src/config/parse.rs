//! Taskfile (de)serialization
//!
//! Converts between YAML text and [`Taskfile`]. Reading files and resolving
//! include paths is left to the caller.

use crate::config::types::Taskfile;
use crate::error::Result;

/// Parse a taskfile from YAML text
pub fn parse_taskfile(yaml: &str) -> Result<Taskfile> {
    let taskfile: Taskfile = serde_yaml::from_str(yaml)?;
    Ok(taskfile)
}

/// Serialize a taskfile back to YAML
pub fn to_yaml(taskfile: &Taskfile) -> Result<String> {
    Ok(serde_yaml::to_string(taskfile)?)
}
