use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigKind;
use crate::Error;

/// Caller-supplied settings for a [`Configurator`](crate::Configurator).
///
/// Every field is optional; unset fields fall through to the host root,
/// the working directory and finally the bundled defaults.
///
/// ## Example
///
/// ```
/// use endpoint_conf::Options;
///
/// let options = Options::builder()
///     .with_primary_config_path("/etc/myapp/primary.yml")
///     .with_environment("production")
///     .build();
///
/// assert_eq!(options.environment.as_deref(), Some("production"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub primary_config_path: Option<PathBuf>,
    pub secondary_config_path: Option<PathBuf>,
    /// Directory expected to hold `predicate_mappings.yml`.
    pub predicate_mappings_config_path: Option<PathBuf>,
    /// Overrides every other source of the environment name.
    pub environment: Option<String>,
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Explicit path option for `kind`, if one was given.
    pub fn config_path(&self, kind: ConfigKind) -> Option<&Path> {
        match kind {
            ConfigKind::Primary => self.primary_config_path.as_deref(),
            ConfigKind::Secondary => self.secondary_config_path.as_deref(),
        }
    }
}

impl TryFrom<serde_yaml::Value> for Options {
    type Error = Error;

    /// Accepts a mapping of option keys, or null for all defaults.
    ///
    /// A bare string is rejected: paths must be passed under their key,
    /// e.g. `primary_config_path: /path/to/primary.yml`.
    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        match value {
            serde_yaml::Value::Null => Ok(Self::default()),
            value @ serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
                .map_err(|e| Error::InvalidArgument(format!("malformed options: {e}"))),
            serde_yaml::Value::String(s) => Err(Error::InvalidArgument(format!(
                "options must be a mapping, not a path; use `primary_config_path: {s}`"
            ))),
            other => Err(Error::InvalidArgument(format!(
                "options must be a mapping, got {other:?}"
            ))),
        }
    }
}

/// Builder for [`Options`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn with_primary_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.options.primary_config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_secondary_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.options.secondary_config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory to search for `predicate_mappings.yml`.
    pub fn with_predicate_mappings_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.options.predicate_mappings_config_path = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.options.environment = Some(environment.into());
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}
