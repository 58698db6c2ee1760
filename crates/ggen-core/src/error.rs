use thiserror::Error;

use crate::request::{HelperKind, ModifierKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no entity name provided")]
    MissingEntity,

    #[error("unknown modifier: {0:?}")]
    UnknownModifier(String),

    #[error("unknown helper: {0:?}")]
    UnknownHelper(String),

    #[error("modifier {0} requested more than once")]
    DuplicateModifier(ModifierKind),

    #[error("helper {0} requested more than once")]
    DuplicateHelper(HelperKind),

    #[error("entities {first} and {second} would both be written to {file}")]
    OutputCollision {
        file: String,
        first: String,
        second: String,
    },

    #[error("invalid package name: {0:?}")]
    InvalidPackage(String),

    #[error("cannot derive a package name from {0}")]
    MissingPackage(String),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Template(String),
}
