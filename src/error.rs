//! Error types for taskmerge

use thiserror::Error;

/// Result type alias for taskmerge operations
pub type Result<T> = std::result::Result<T, TaskfileError>;

/// Main error type for taskmerge
#[derive(Error, Debug)]
pub enum TaskfileError {
    /// Document model errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while merging one document into another
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// Errors raised while walking an include tree
    #[error("Include error: {0}")]
    Compose(#[from] ComposeError),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Document model and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid version '{0}'")]
    InvalidVersion(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Merge errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    #[error("Taskfile versions should match. First is \"{parent}\" but second is \"{child}\"")]
    VersionMismatch { parent: String, child: String },

    #[error("Invalid include: {0}")]
    InvalidInclude(String),
}

/// Include tree errors
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Included taskfile '{taskfile}' (namespace '{namespace}') was not found")]
    IncludeNotFound { namespace: String, taskfile: String },

    #[error("Include cycle detected: {0}")]
    IncludeCycle(String),

    #[error("Failed to resolve include '{namespace}': {source}")]
    Resolve {
        namespace: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for merge operations
pub type MergeResult<T> = std::result::Result<T, MergeError>;
