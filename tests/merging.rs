//! Integration tests for merging included taskfiles

mod common;

use common::{include, init_tracing, taskfile};
use taskmerge::config::{parse_taskfile, to_yaml, Var};
use taskmerge::error::MergeError;
use taskmerge::{merge, TaskfileError};

const PARENT: &str = r#"
version: '3'
output: interleaved
vars:
  PROJECT: demo
  REGISTRY: ghcr.io/demo
env:
  RUST_LOG: info
tasks:
  build:
    desc: Build everything
    cmds:
      - cargo build
"#;

const API: &str = r#"
version: '3'
output: prefixed
vars:
  REGISTRY: docker.io/api
  PORT: 8080
tasks:
  default:
    cmds:
      - task: serve
  serve:
    aliases: [s]
    deps:
      - build
      - ":build"
    cmds:
      - echo serving
      - task: migrate
  migrate:
    internal: true
    cmds:
      - echo migrate
  ":shared":
    cmds:
      - echo shared
"#;

#[test]
fn test_merge_complete_taskfile() {
    init_tracing();
    let mut parent = taskfile(PARENT);
    let child = taskfile(API);

    merge(&mut parent, &child, &include("api", &["a"])).unwrap();

    let mut keys: Vec<&str> = parent.tasks.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["api:default", "api:migrate", "api:serve", "build", "shared"]
    );

    // Output: last merged wins
    assert_eq!(parent.output.name, "prefixed");

    // Vars: child wins on collision, parent-only keys survive
    let vars = parent.vars.as_ref().unwrap();
    assert_eq!(vars.get("PROJECT"), Some(&Var::string("demo")));
    assert_eq!(vars.get("REGISTRY"), Some(&Var::string("docker.io/api")));
    assert!(vars.contains_key("PORT"));
    assert_eq!(
        parent.env.as_ref().unwrap().get("RUST_LOG"),
        Some(&Var::string("info"))
    );

    let serve = parent.tasks.get("api:serve").unwrap();
    assert_eq!(serve.task, "api:serve");
    assert_eq!(serve.deps[0].task, "api:build");
    assert_eq!(serve.deps[1].task, "build");
    assert_eq!(serve.cmds[0].cmd.as_deref(), Some("echo serving"));
    assert_eq!(serve.cmds[1].task, "api:migrate");
    assert_eq!(
        serve.aliases,
        vec!["api:s".to_string(), "a:serve".to_string(), "a:s".to_string()]
    );

    assert!(parent.tasks.get("api:migrate").unwrap().internal);
    assert!(!serve.internal);

    let default = parent.tasks.get("api:default").unwrap();
    assert_eq!(default.cmds[0].task, "api:serve");
    assert_eq!(
        default.aliases,
        vec!["a:default".to_string(), "api".to_string(), "a".to_string()]
    );

    // The parent's own task is untouched
    let build = parent.tasks.get("build").unwrap();
    assert_eq!(build.desc.as_deref(), Some("Build everything"));
}

#[test]
fn test_merge_dependency_and_alias_rewrite() {
    let mut parent = taskfile("version: '3'\n");
    let child = taskfile(
        r#"
version: '3'
tasks:
  release:
    aliases: [b]
    deps: [build]
"#,
    );

    merge(&mut parent, &child, &include("api", &[])).unwrap();

    let release = parent.tasks.get("api:release").unwrap();
    assert_eq!(release.deps[0].task, "api:build");
    assert!(release.aliases.contains(&"api:b".to_string()));
}

#[test]
fn test_merge_default_shorthand() {
    let mut parent = taskfile("version: '3'\n");
    let child = taskfile("version: '3'\ntasks:\n  default:\n    cmds: [echo db]\n");

    merge(&mut parent, &child, &include("db", &["d"])).unwrap();

    let aliases = &parent.tasks.get("db:default").unwrap().aliases;
    assert!(aliases.contains(&"db".to_string()));
    assert!(aliases.contains(&"d".to_string()));
}

#[test]
fn test_merge_version_mismatch() {
    let mut parent = taskfile(PARENT);
    let child = taskfile("version: '2'\ntasks:\n  other: {}\n");
    let before = parent.clone();

    let err = merge(&mut parent, &child, &include("api", &[])).unwrap_err();

    assert!(matches!(err, MergeError::VersionMismatch { .. }));
    assert!(err.to_string().contains("\"3\""));
    assert!(err.to_string().contains("\"2\""));
    assert_eq!(parent.tasks.len(), before.tasks.len());
    assert_eq!(parent, before);
}

#[test]
fn test_merge_internal_include() {
    let mut parent = taskfile("version: '3'\n");
    let child = taskfile(API);
    let mut internal = include("api", &[]);
    internal.internal = true;

    merge(&mut parent, &child, &internal).unwrap();

    assert!(parent.tasks.values().all(|task| task.internal));
    // Source document keeps its own visibility
    assert!(!child.tasks.get("serve").unwrap().internal);
}

#[test]
fn test_merge_same_child_twice_is_isolated() {
    let mut parent = taskfile("version: '3'\n");
    let child = taskfile(API);

    merge(&mut parent, &child, &include("left", &[])).unwrap();
    merge(&mut parent, &child, &include("right", &[])).unwrap();

    parent
        .tasks
        .get_mut("left:serve")
        .unwrap()
        .aliases
        .push("extra".to_string());

    assert_eq!(
        parent.tasks.get("right:serve").unwrap().aliases,
        vec!["right:s".to_string()]
    );
    assert_eq!(child.tasks.get("serve").unwrap().aliases, vec!["s".to_string()]);
}

#[test]
fn test_merged_taskfile_serializes() {
    let mut parent = taskfile(PARENT);
    merge(&mut parent, &taskfile(API), &include("api", &[])).unwrap();

    let yaml = to_yaml(&parent).unwrap();
    let reparsed = taskfile(&yaml);

    assert_eq!(reparsed.tasks.len(), parent.tasks.len());
    assert!(reparsed.tasks.contains_key("api:serve"));
    assert_eq!(reparsed.tasks.get("api:serve").unwrap().task, "api:serve");
}

#[test]
fn test_merge_versions_differing_in_trailing_zero() {
    let mut parent = taskfile("version: '3.10'\n");
    let child = taskfile("version: '3.1'\ntasks:\n  t: {}\n");

    let err = merge(&mut parent, &child, &include("api", &[])).unwrap_err();

    assert_eq!(
        err,
        MergeError::VersionMismatch {
            parent: "3.10".to_string(),
            child: "3.1".to_string(),
        }
    );
    assert!(parent.tasks.is_empty());
}

#[test]
fn test_unquoted_float_version_is_rejected() {
    let result = parse_taskfile("version: 3.10\ntasks: {}\n");
    assert!(matches!(result, Err(TaskfileError::Yaml(_))));
}
