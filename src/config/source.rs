use std::fmt;
use std::path::{Path, PathBuf};

/// One of the two service configurations this crate resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Primary,
    Secondary,
}

impl ConfigKind {
    pub fn name(self) -> &'static str {
        match self {
            ConfigKind::Primary => "primary",
            ConfigKind::Secondary => "secondary",
        }
    }

    /// File name looked up in every `config/` directory, e.g. `primary.yml`.
    pub fn file_name(self) -> String {
        format!("{}.yml", self.name())
    }

    /// Name of the option that points at this kind's file explicitly.
    pub fn option_key(self) -> String {
        format!("{}_config_path", self.name())
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed explicitly through [`Options`](super::Options).
    Explicit,

    /// `secondary.yml` next to the resolved primary file.
    CoLocated,

    /// The primary file itself, whose environment section carries a
    /// `secondary` block.
    EmbeddedInPrimary,

    /// `{host root}/config/`.
    HostRoot,

    /// `{cwd}/config/`.
    WorkingDirectory,

    /// The file shipped with this library.
    BundledDefault,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit option"),
            ConfigSource::CoLocated => write!(f, "primary config directory"),
            ConfigSource::EmbeddedInPrimary => write!(f, "primary config document"),
            ConfigSource::HostRoot => write!(f, "host root"),
            ConfigSource::WorkingDirectory => write!(f, "working directory"),
            ConfigSource::BundledDefault => write!(f, "bundled default"),
        }
    }
}

/// A configuration file path together with the rule that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub source: ConfigSource,
}

impl ResolvedPath {
    pub fn new(path: impl AsRef<Path>, source: ConfigSource) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl PartialEq<&str> for ResolvedPath {
    fn eq(&self, other: &&str) -> bool {
        self.path == Path::new(other)
    }
}
