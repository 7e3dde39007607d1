//! Common test utilities

#![allow(dead_code)]

use taskmerge::config::parse_taskfile;
use taskmerge::{Include, Taskfile};

/// Install a tracing subscriber that writes through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse a taskfile fixture
pub fn taskfile(yaml: &str) -> Taskfile {
    parse_taskfile(yaml).unwrap()
}

/// Build an include descriptor with namespace aliases
pub fn include(namespace: &str, aliases: &[&str]) -> Include {
    let mut include = Include::new(namespace, format!("./{}/Taskfile.yml", namespace));
    include.aliases = aliases.iter().map(|a| a.to_string()).collect();
    include
}
