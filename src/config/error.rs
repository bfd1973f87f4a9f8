use std::path::PathBuf;
use thiserror::Error;

use super::ConfigKind;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{kind} config file does not exist: {path}")]
    FileNotFound { kind: ConfigKind, path: PathBuf },

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("config file '{path}' must contain a mapping at the top level")]
    NotAMapping { path: PathBuf },

    #[error("{kind} config has no section for environment '{environment}'")]
    MissingEnvironment {
        kind: ConfigKind,
        environment: String,
    },

    #[error("{kind} config has no url for environment '{environment}'")]
    MissingUrl {
        kind: ConfigKind,
        environment: String,
    },

    #[error("predicate mapping '{path}' is missing `default_namespace` or `predicate_mapping`")]
    InvalidPredicateMapping { path: PathBuf },
}
