//! Reading configuration documents through a [`Host`].

use std::path::Path;

use serde_yaml::{Mapping, Value};

use super::ConfigError;
use crate::Host;

/// Reads and parses a YAML document whose top level must be a mapping.
///
/// An empty file parses as an empty mapping.
pub fn load_document<H: Host + ?Sized>(host: &H, path: &Path) -> Result<Mapping, ConfigError> {
    parse_document(&read_contents(host, path)?, path)
}

/// Reads and parses a YAML document of any shape.
pub fn parse_value<H: Host + ?Sized>(host: &H, path: &Path) -> Result<Value, ConfigError> {
    parse_str(&read_contents(host, path)?, path)
}

/// Parses already-read `contents`; `path` is only used in errors.
pub fn parse_str(contents: &str, path: &Path) -> Result<Value, ConfigError> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Like [`parse_str`], requiring a mapping (or nothing) at the top level.
pub fn parse_document(contents: &str, path: &Path) -> Result<Mapping, ConfigError> {
    match parse_str(contents, path)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

pub(crate) fn read_contents<H: Host + ?Sized>(
    host: &H,
    path: &Path,
) -> Result<String, ConfigError> {
    host.read_file(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}
