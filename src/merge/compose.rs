//! Folding a whole include tree into a root taskfile
//!
//! Finding and parsing included files is the caller's job; it plugs in
//! through [`IncludeResolver`].

use crate::config::{validate_taskfile, Include, Taskfile};
use crate::error::{ComposeError, Result};
use crate::merge::include::merge;
use tracing::debug;

/// An included document together with where it was found
#[derive(Debug, Clone)]
pub struct ResolvedInclude {
    /// Resolver-defined identity of the document, e.g. a canonical path.
    /// Two includes that reach the same document must share a location.
    pub location: String,

    /// The parsed document
    pub taskfile: Taskfile,
}

impl ResolvedInclude {
    pub fn new(location: impl Into<String>, taskfile: Taskfile) -> Self {
        ResolvedInclude {
            location: location.into(),
            taskfile,
        }
    }
}

/// Produces the parsed document behind an include
pub trait IncludeResolver {
    /// Resolve `include` as written in the document at `from` (`None` for
    /// the root). Returns `None` if the included document does not exist.
    fn resolve(
        &mut self,
        include: &Include,
        from: Option<&str>,
    ) -> anyhow::Result<Option<ResolvedInclude>>;
}

impl<F> IncludeResolver for F
where
    F: FnMut(&Include, Option<&str>) -> anyhow::Result<Option<ResolvedInclude>>,
{
    fn resolve(
        &mut self,
        include: &Include,
        from: Option<&str>,
    ) -> anyhow::Result<Option<ResolvedInclude>> {
        self(include, from)
    }
}

/// Merge every include of `root`, recursively, into `root`
///
/// Each included document has its own includes composed first, so nested
/// namespaces stack (`a:b:task`). Includes are processed in declaration
/// order.
pub fn compose<R>(root: &mut Taskfile, resolver: &mut R) -> Result<()>
where
    R: IncludeResolver + ?Sized,
{
    let mut stack = Vec::new();
    compose_includes(root, None, resolver, &mut stack)
}

/// Like [`compose`], for a root document whose own location is known, so
/// includes leading back to the root are reported as cycles
pub fn compose_at<R>(root: &mut Taskfile, location: &str, resolver: &mut R) -> Result<()>
where
    R: IncludeResolver + ?Sized,
{
    let mut stack = vec![location.to_string()];
    compose_includes(root, Some(location), resolver, &mut stack)
}

fn compose_includes<R>(
    taskfile: &mut Taskfile,
    location: Option<&str>,
    resolver: &mut R,
    stack: &mut Vec<String>,
) -> Result<()>
where
    R: IncludeResolver + ?Sized,
{
    let includes: Vec<Include> = taskfile.includes.values().cloned().collect();

    for include in includes {
        let resolved = resolver
            .resolve(&include, location)
            .map_err(|source| ComposeError::Resolve {
                namespace: include.namespace.clone(),
                source,
            })?;

        let ResolvedInclude {
            location: child_location,
            taskfile: mut child,
        } = match resolved {
            Some(resolved) => resolved,
            None if include.optional => {
                debug!(
                    namespace = %include.namespace,
                    taskfile = %include.taskfile,
                    "skipping missing optional include"
                );
                continue;
            }
            None => {
                return Err(ComposeError::IncludeNotFound {
                    namespace: include.namespace.clone(),
                    taskfile: include.taskfile.clone(),
                }
                .into())
            }
        };

        if stack.contains(&child_location) {
            let mut chain = stack.clone();
            chain.push(child_location);
            return Err(ComposeError::IncludeCycle(chain.join(" -> ")).into());
        }

        validate_taskfile(&child)?;

        stack.push(child_location.clone());
        compose_includes(&mut child, Some(&child_location), resolver, stack)?;
        stack.pop();

        merge(taskfile, &child, &include)?;
    }

    Ok(())
}
