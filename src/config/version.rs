//! Taskfile schema version
//!
//! Versions are compared semantically: `3`, `3.0` and `v3.0.0` all name the
//! same schema.

use crate::error::{ConfigError, ConfigResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?$")
        .expect("version pattern is a valid regex")
});

/// A schema version as declared by a taskfile
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Option<String>,
    /// The version as written in the document
    raw: String,
}

impl Version {
    /// Create a release version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
            raw: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Parse a version string such as `3`, `3.1` or `v3.1.2-beta`
    pub fn parse(s: &str) -> ConfigResult<Self> {
        let trimmed = s.trim();
        let caps = VERSION_PATTERN
            .captures(trimmed)
            .ok_or_else(|| ConfigError::InvalidVersion(s.to_string()))?;

        let component = |idx: usize| -> ConfigResult<u64> {
            match caps.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| ConfigError::InvalidVersion(s.to_string())),
                None => Ok(0),
            }
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            pre: caps.get(4).map(|m| m.as_str().to_string()),
            raw: trimmed.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Pre-release suffix, if any
    pub fn pre(&self) -> Option<&str> {
        self.pre.as_deref()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.pre == other.pre
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Versions may be written as YAML integers (`version: 3`) or strings
/// (`version: '3.1'`). Floats are rejected: `3.10` and `3.1` parse to the
/// same number, so the written version cannot be recovered.
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_yaml::Value;

        let value = Value::deserialize(deserializer)?;
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) if n.is_u64() => n.to_string(),
            Value::Number(n) => {
                return Err(D::Error::custom(format!(
                    "version {} must be quoted, e.g. version: '{}'",
                    n, n
                )))
            }
            _ => return Err(D::Error::custom("version must be a string or integer")),
        };

        Version::parse(&text).map_err(D::Error::custom)
    }
}
