//! Merging one included taskfile into its parent

use crate::config::{validate_include, Include, Taskfile, Vars, Version};
use crate::error::{MergeError, MergeResult};
use crate::merge::namespace::task_name_with_namespace;
use tracing::{debug, trace, warn};

/// Name of the task run when a namespace is invoked on its own
pub const DEFAULT_TASK: &str = "default";

/// Merge `child` into `parent` under the namespace described by `include`
///
/// Every task of `child` is copied, namespaced and inserted into `parent`;
/// `child` itself is never modified and nothing in `parent` shares storage
/// with it afterwards. Versions and the include descriptor are checked
/// before `parent` is touched.
pub fn merge(parent: &mut Taskfile, child: &Taskfile, include: &Include) -> MergeResult<()> {
    if parent.version != child.version {
        return Err(MergeError::VersionMismatch {
            parent: display_version(parent.version.as_ref()),
            child: display_version(child.version.as_ref()),
        });
    }
    validate_include(include)?;

    let namespace = include.namespace.as_str();
    debug!(
        namespace,
        taskfile = %include.taskfile,
        tasks = child.tasks.len(),
        internal = include.internal,
        "merging included taskfile"
    );

    if child.output.is_set() {
        parent.output = child.output.clone();
    }

    merge_vars(&mut parent.vars, child.vars.as_ref());
    merge_vars(&mut parent.env, child.env.as_ref());

    for (name, original) in &child.tasks {
        if is_excluded(include, name) {
            debug!(namespace, task = %name, "skipping excluded task");
            continue;
        }

        // Cloning gives the parent its own copy of every nested collection
        let mut task = original.clone();

        task.internal = task.internal || include.internal;

        for dep in task.deps.iter_mut().filter(|dep| dep.is_task_ref()) {
            dep.task = task_name_with_namespace(&dep.task, namespace);
        }
        for cmd in task.cmds.iter_mut().filter(|cmd| cmd.is_task_ref()) {
            cmd.task = task_name_with_namespace(&cmd.task, namespace);
        }
        for alias in task.aliases.iter_mut() {
            *alias = task_name_with_namespace(alias, namespace);
        }

        for namespace_alias in &include.aliases {
            task.aliases.push(task_name_with_namespace(name, namespace_alias));
            for alias in &original.aliases {
                task.aliases.push(task_name_with_namespace(alias, namespace_alias));
            }
        }

        let qualified = task_name_with_namespace(name, namespace);
        trace!(task = %name, qualified = %qualified, "namespaced task");
        task.task = qualified.clone();

        if parent.tasks.contains_key(&qualified) {
            warn!(task = %qualified, namespace, "included task replaces an existing task");
        }
        parent.tasks.insert(qualified, task);
    }

    // Let the namespace alone (or any of its aliases) run the included
    // default task, unless the parent already owns that name.
    let has_default =
        child.tasks.contains_key(DEFAULT_TASK) && !is_excluded(include, DEFAULT_TASK);
    if has_default && !parent.tasks.contains_key(namespace) {
        let default_name = task_name_with_namespace(DEFAULT_TASK, namespace);
        if let Some(task) = parent.tasks.get_mut(&default_name) {
            debug!(task = %default_name, "aliasing default task to its namespace");
            task.aliases.push(namespace.to_string());
            task.aliases.extend(include.aliases.iter().cloned());
        }
    }

    Ok(())
}

/// Lazily create `target` and copy `source` into it
fn merge_vars(target: &mut Option<Vars>, source: Option<&Vars>) {
    let target = target.get_or_insert_with(Vars::new);
    if let Some(source) = source {
        target.merge(source);
    }
}

fn is_excluded(include: &Include, task_name: &str) -> bool {
    include.excludes.iter().any(|excluded| excluded == task_name)
}

fn display_version(version: Option<&Version>) -> String {
    match version {
        Some(version) => version.to_string(),
        None => "<unset>".to_string(),
    }
}
