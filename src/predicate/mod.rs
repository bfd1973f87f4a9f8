//! The predicate-mapping document: a namespace-prefix dictionary.
//!
//! Unlike the service configs, an invalid or missing mapping falls back to
//! the bundled file silently.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::config::{parse_str, parse_value, read_bundled, ConfigError};
use crate::Host;

pub const PREDICATE_MAPPINGS_FILE: &str = "predicate_mappings.yml";

/// A validated predicate-mapping document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredicateMapping {
    pub default_namespace: String,
    /// Namespace → (predicate name → term).
    pub predicate_mapping: Mapping,
}

/// Chooses which predicate-mapping file to use.
///
/// Returns `{dir}/predicate_mappings.yml` when it exists and passes
/// [`valid_predicate_mapping`]; the bundled file otherwise.
pub fn build_predicate_config_path<H: Host + ?Sized>(
    host: &H,
    dir: Option<&Path>,
    bundled_dir: &Path,
) -> PathBuf {
    let bundled = bundled_dir.join(PREDICATE_MAPPINGS_FILE);
    let Some(dir) = dir else {
        return bundled;
    };

    let path = dir.join(PREDICATE_MAPPINGS_FILE);
    if !host.file_exists(&path) {
        debug!(path = %path.display(), "predicate mapping not found, using bundled default");
        return bundled;
    }
    if !valid_predicate_mapping(host, &path) {
        debug!(path = %path.display(), "predicate mapping invalid, using bundled default");
        return bundled;
    }
    path
}

/// Returns `true` if the file at `path` has a string `default_namespace`
/// and a mapping `predicate_mapping`.
///
/// Unreadable or unparsable files are simply invalid.
pub fn valid_predicate_mapping<H: Host + ?Sized>(host: &H, path: &Path) -> bool {
    match parse_value(host, path) {
        Ok(value) => has_valid_shape(&value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "predicate mapping unreadable");
            false
        }
    }
}

fn has_valid_shape(value: &Value) -> bool {
    let Some(mapping) = value.as_mapping() else {
        return false;
    };
    let Some(namespace) = mapping.get("default_namespace") else {
        return false;
    };
    if !namespace.is_string() {
        return false;
    }
    let Some(predicates) = mapping.get("predicate_mapping") else {
        return false;
    };
    predicates.is_mapping()
}

/// Loads and validates a predicate mapping.
///
/// The bundled file under `bundled_dir` falls back to its embedded copy
/// when missing on disk.
pub fn load_predicate_mapping<H: Host + ?Sized>(
    host: &H,
    path: &Path,
    bundled_dir: &Path,
) -> Result<PredicateMapping, ConfigError> {
    let value = if path == bundled_dir.join(PREDICATE_MAPPINGS_FILE) {
        parse_str(&read_bundled(host, path)?, path)?
    } else {
        parse_value(host, path)?
    };
    let invalid = || ConfigError::InvalidPredicateMapping {
        path: path.to_path_buf(),
    };
    if !has_valid_shape(&value) {
        return Err(invalid());
    }
    serde_yaml::from_value(value).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bundled_host, FakeHost, BUNDLED_DIR};

    const CUSTOM: &str = "/path/to/predicate_mappings.yml";

    fn bundled() -> PathBuf {
        Path::new(BUNDLED_DIR).join(PREDICATE_MAPPINGS_FILE)
    }

    fn host_with(contents: &str) -> FakeHost {
        bundled_host("/w").with_file(CUSTOM, contents)
    }

    fn custom_or_bundled(host: &FakeHost) -> PathBuf {
        build_predicate_config_path(host, Some(Path::new("/path/to")), Path::new(BUNDLED_DIR))
    }

    #[test]
    fn test_no_dir_returns_bundled() {
        let host = host_with("default_namespace: a\npredicate_mapping: {k: v}\n");
        assert_eq!(
            build_predicate_config_path(&host, None, Path::new(BUNDLED_DIR)),
            bundled()
        );
        assert_eq!(host.reads.get(), 0);
    }

    #[test]
    fn test_missing_file_returns_bundled() {
        let host = bundled_host("/w");
        let path = custom_or_bundled(&host);
        assert_eq!(path, bundled());
    }

    #[test]
    fn test_valid_file_returned() {
        let host =
            host_with("default_namespace: my_namespace\npredicate_mapping:\n  key0: value0\n");
        let path = custom_or_bundled(&host);
        assert_eq!(path, PathBuf::from(CUSTOM));
    }

    #[test]
    fn test_invalid_file_returns_bundled_silently() {
        let host =
            host_with("default_namespace: my_namespace\npredicate_mapping: not a mapping\n");
        let path = custom_or_bundled(&host);
        assert_eq!(path, bundled());
        assert!(host.warnings().is_empty());
    }

    #[test]
    fn test_bundled_mapping_is_valid() {
        let host = bundled_host("/w");
        assert!(valid_predicate_mapping(&host, &bundled()));
    }

    #[test]
    fn test_missing_default_namespace() {
        let host = host_with(
            "default_namespace0: my_namespace\n\
             predicate_mapping:\n  key0: value0\n  key1: value1\n",
        );
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));
    }

    #[test]
    fn test_default_namespace_not_a_string() {
        let host =
            host_with("default_namespace:\n  foo: bar\npredicate_mapping:\n  key0: value0\n");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));

        let host = host_with("default_namespace: 42\npredicate_mapping:\n  key0: value0\n");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));
    }

    #[test]
    fn test_missing_predicate_mapping() {
        let host = host_with("default_namespace: a string\n");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));
    }

    #[test]
    fn test_predicate_mapping_not_a_mapping() {
        let host = host_with("default_namespace: a string\npredicate_mapping: another string\n");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));

        let host = host_with("default_namespace: a string\npredicate_mapping: [a, b]\n");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));
    }

    #[test]
    fn test_unreadable_or_malformed_is_invalid() {
        let host = FakeHost::new("/w");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));

        let host = host_with("default_namespace: [unclosed");
        assert!(!valid_predicate_mapping(&host, Path::new(CUSTOM)));
    }

    #[test]
    fn test_load_predicate_mapping() {
        let host = bundled_host("/w");
        let mapping = load_predicate_mapping(&host, &bundled(), Path::new(BUNDLED_DIR)).unwrap();

        assert_eq!(mapping.default_namespace, "info:repository/relations#");
        assert_eq!(
            mapping.predicate_mapping["info:repository/relations#"]["is_member_of"].as_str(),
            Some("isMemberOf")
        );
    }

    #[test]
    fn test_load_invalid_predicate_mapping() {
        let host = host_with("default_namespace: a string\n");
        let result = load_predicate_mapping(&host, Path::new(CUSTOM), Path::new(BUNDLED_DIR));
        assert!(matches!(result, Err(ConfigError::InvalidPredicateMapping { .. })));
    }

    #[test]
    fn test_load_bundled_mapping_missing_on_disk() {
        let host = FakeHost::new("/w");
        let mapping = load_predicate_mapping(&host, &bundled(), Path::new(BUNDLED_DIR)).unwrap();

        assert_eq!(mapping.default_namespace, "info:repository/relations#");
        assert_eq!(host.reads.get(), 0);
    }

    #[test]
    fn test_load_missing_custom_mapping_is_read_error() {
        let host = FakeHost::new("/w");
        let result = load_predicate_mapping(&host, Path::new(CUSTOM), Path::new(BUNDLED_DIR));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
