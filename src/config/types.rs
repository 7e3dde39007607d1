//! Core document types
//!
//! This module defines the data structures that represent a parsed taskfile.

use crate::config::vars::Vars;
use crate::config::version::Version;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tasks keyed by name, in declaration order
pub type Tasks = IndexMap<String, Task>;

/// Includes keyed by namespace, in declaration order
pub type Includes = IndexMap<String, Include>;

/// Top-level taskfile document
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Taskfile {
    /// Schema version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    /// Output mode for task logs
    #[serde(default, skip_serializing_if = "Output::is_unset")]
    pub output: Output,

    /// Other taskfiles to pull in, keyed by namespace
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "deserialize_includes"
    )]
    pub includes: Includes,

    /// Global variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Vars>,

    /// Global environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vars>,

    /// Tasks defined in the document
    #[serde(default, deserialize_with = "deserialize_tasks")]
    pub tasks: Tasks,

    /// Whether command echoing is disabled for every task
    #[serde(default)]
    pub silent: bool,

    /// Dotenv files to load before running
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dotenv: Vec<String>,
}

/// A task definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Task {
    /// The task's own name; filled from its key when parsed
    #[serde(skip)]
    pub task: String,

    /// Short description for listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Alternative names for the task
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_list"
    )]
    pub aliases: Vec<String>,

    /// Tasks that run before this one
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_deps"
    )]
    pub deps: Vec<Dep>,

    /// Commands, in order
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_cmds"
    )]
    pub cmds: Vec<Cmd>,

    /// Internal tasks can only be reached from other tasks
    #[serde(default)]
    pub internal: bool,

    /// Whether command echoing is disabled
    #[serde(default)]
    pub silent: bool,

    /// Working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Task variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Vars>,

    /// Task environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vars>,

    /// Source globs for up-to-date checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,

    /// Generated file globs for up-to-date checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generates: Vec<String>,
}

impl Task {
    /// Create an empty task with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Task {
            task: name.into(),
            ..Default::default()
        }
    }
}

/// A dependency on another task
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Dep {
    /// Name of the task to run; empty when not a task reference
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub task: String,

    /// Variables passed to the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Vars>,

    #[serde(default)]
    pub silent: bool,
}

impl Dep {
    pub fn task(name: impl Into<String>) -> Self {
        Dep {
            task: name.into(),
            ..Default::default()
        }
    }

    /// Whether this dependency names a task
    pub fn is_task_ref(&self) -> bool {
        !self.task.is_empty()
    }
}

/// A single command: either an inline shell command or a task call
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Cmd {
    /// Shell command to execute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,

    /// Name of the task to call; empty when not a task reference
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub task: String,

    /// Variables passed to the called task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Vars>,

    #[serde(default)]
    pub silent: bool,

    /// Keep going when the command fails
    #[serde(default)]
    pub ignore_error: bool,

    /// Run when the task finishes, even on failure
    #[serde(default)]
    pub defer: bool,
}

impl Cmd {
    pub fn shell(cmd: impl Into<String>) -> Self {
        Cmd {
            cmd: Some(cmd.into()),
            ..Default::default()
        }
    }

    pub fn task(name: impl Into<String>) -> Self {
        Cmd {
            task: name.into(),
            ..Default::default()
        }
    }

    /// Whether this command calls a task
    pub fn is_task_ref(&self) -> bool {
        !self.task.is_empty()
    }
}

/// Describes how one taskfile is pulled into another
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Include {
    /// Namespace prefix for the included tasks; filled from the include key
    #[serde(skip)]
    pub namespace: String,

    /// Path of the included taskfile, as written
    pub taskfile: String,

    /// Working directory for the included tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Missing optional includes are skipped
    #[serde(default)]
    pub optional: bool,

    /// Marks every included task as internal
    #[serde(default)]
    pub internal: bool,

    /// Alternative namespace names
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_list"
    )]
    pub aliases: Vec<String>,

    /// Task names of the included file to leave out
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_string_list"
    )]
    pub excludes: Vec<String>,
}

impl Include {
    pub fn new(namespace: impl Into<String>, taskfile: impl Into<String>) -> Self {
        Include {
            namespace: namespace.into(),
            taskfile: taskfile.into(),
            ..Default::default()
        }
    }
}

/// Output mode for task logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Mode name (`interleaved`, `group`, `prefixed`); empty when unset
    pub name: String,

    /// Settings for the `group` mode
    pub group: OutputGroup,
}

/// Settings for grouped output
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// Only print grouped output when the task fails
    #[serde(default)]
    pub error_only: bool,
}

impl Output {
    pub fn named(name: impl Into<String>) -> Self {
        Output {
            name: name.into(),
            group: OutputGroup::default(),
        }
    }

    pub fn is_set(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_unset(&self) -> bool {
        !self.is_set()
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        if self.group == OutputGroup::default() {
            return serializer.serialize_str(&self.name);
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("group", &self.group)?;
        map.end()
    }
}

/// Output is either a mode name or a `group:` mapping
impl<'de> Deserialize<'de> for Output {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_yaml::Value;

        let value = Value::deserialize(deserializer)?;

        match value {
            Value::String(name) => Ok(Output::named(name)),
            Value::Mapping(mut map) => {
                let group = map
                    .remove("group")
                    .ok_or_else(|| D::Error::custom("output mapping must contain 'group'"))?;
                let group = match group {
                    Value::Null => OutputGroup::default(),
                    other => OutputGroup::deserialize(other).map_err(D::Error::custom)?,
                };
                Ok(Output {
                    name: "group".to_string(),
                    group,
                })
            }
            Value::Null => Ok(Output::default()),
            _ => Err(D::Error::custom("output must be a string or mapping")),
        }
    }
}

/// Custom deserializer that fills each task's name from its key
fn deserialize_tasks<'de, D>(deserializer: D) -> Result<Tasks, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let raw = match Option::<IndexMap<String, Value>>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(Tasks::new()),
    };

    let mut tasks = Tasks::with_capacity(raw.len());
    for (name, value) in raw {
        let mut task = match value {
            Value::Null => Task::default(),
            other => Task::deserialize(other)
                .map_err(|e| D::Error::custom(format!("task '{}': {}", name, e)))?,
        };
        task.task = name.clone();
        tasks.insert(name, task);
    }
    Ok(tasks)
}

/// Custom deserializer for includes that accepts a bare path or a mapping,
/// and fills each namespace from its key
fn deserialize_includes<'de, D>(deserializer: D) -> Result<Includes, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let raw = match Option::<IndexMap<String, Value>>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(Includes::new()),
    };

    let mut includes = Includes::with_capacity(raw.len());
    for (namespace, value) in raw {
        let mut include = match value {
            Value::String(path) => Include::new(namespace.clone(), path),
            Value::Mapping(_) => Include::deserialize(value)
                .map_err(|e| D::Error::custom(format!("include '{}': {}", namespace, e)))?,
            _ => {
                return Err(D::Error::custom(format!(
                    "include '{}' must be a path or mapping",
                    namespace
                )))
            }
        };
        include.namespace = namespace.clone();
        includes.insert(namespace, include);
    }
    Ok(includes)
}

/// Custom deserializer for deps that handles task-name shorthands
fn deserialize_deps<'de, D>(deserializer: D) -> Result<Vec<Dep>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    let items = match value {
        Value::Sequence(seq) => seq,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(D::Error::custom("deps must be an array")),
    };

    let mut deps = Vec::with_capacity(items.len());
    for item in items {
        let dep = match item {
            // Bare task name
            Value::String(name) => Dep::task(name),
            Value::Mapping(_) => Dep::deserialize(item).map_err(D::Error::custom)?,
            _ => return Err(D::Error::custom("dep must be a task name or mapping")),
        };
        deps.push(dep);
    }
    Ok(deps)
}

/// Custom deserializer for cmds that handles both single values and arrays
fn deserialize_cmds<'de, D>(deserializer: D) -> Result<Vec<Cmd>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    fn cmd_from_value<E: Error>(value: Value) -> Result<Cmd, E> {
        match value {
            // Inline shell command
            Value::String(s) => Ok(Cmd::shell(s)),
            Value::Mapping(_) => Cmd::deserialize(value).map_err(E::custom),
            _ => Err(E::custom("cmd must be a string or mapping")),
        }
    }

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Sequence(seq) => seq.into_iter().map(cmd_from_value::<D::Error>).collect(),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![cmd_from_value::<D::Error>(other)?]),
    }
}

/// Custom deserializer for string lists that also accepts a single string
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(D::Error::custom("expected a list of strings")),
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or list of strings")),
    }
}
