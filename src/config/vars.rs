//! Ordered variable maps
//!
//! Used for both `vars` and `env` blocks. Values are kept exactly as written;
//! expansion happens elsewhere.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single variable definition
///
/// `sh` and `ref` forms must consist of that single key; any other mapping
/// is kept as a static value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum Var {
    /// Dynamic variable computed from a shell command
    Sh { sh: String },

    /// Reference to another variable
    Ref {
        #[serde(rename = "ref")]
        reference: String,
    },

    /// Plain YAML value
    Static(serde_yaml::Value),
}

impl Var {
    /// Shorthand for a plain string value
    pub fn string(value: impl Into<String>) -> Self {
        Var::Static(serde_yaml::Value::String(value.into()))
    }
}

/// Insertion-ordered mapping of variable name to definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Vars(IndexMap<String, Var>);

impl Vars {
    pub fn new() -> Self {
        Vars(IndexMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&Var> {
        self.0.get(name)
    }

    /// Insert or replace a variable, returning the previous definition.
    /// A replaced variable keeps its original position.
    pub fn set(&mut self, name: impl Into<String>, var: Var) -> Option<Var> {
        self.0.insert(name.into(), var)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Var)> {
        self.0.iter()
    }

    /// Copy every entry of `other` into `self`; entries from `other` win
    pub fn merge(&mut self, other: &Vars) {
        for (name, var) in &other.0 {
            self.0.insert(name.clone(), var.clone());
        }
    }
}

impl<'a> IntoIterator for &'a Vars {
    type Item = (&'a String, &'a Var);
    type IntoIter = indexmap::map::Iter<'a, String, Var>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Var)> for Vars {
    fn from_iter<I: IntoIterator<Item = (K, Var)>>(iter: I) -> Self {
        Vars(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
