//! Crate-wide error type

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a compendium build.
///
/// Recoverable conditions (rejected merges, unassemblable cliques, missing
/// preferred names) are counted rather than raised.
#[derive(Debug, Error)]
pub enum CompendiumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Relationship group of size {size} exceeds the pairwise limit")]
    MalformedGroup { size: usize },

    #[error("No type could be assigned to clique [{}]", members.join(", "))]
    UnassignableType { members: Vec<String> },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Unknown Biolink type: {0}")]
    UnknownType(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for compendium operations
pub type CompendiumResult<T> = Result<T, CompendiumError>;
