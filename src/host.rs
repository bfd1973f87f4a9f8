//! Capabilities the configurator borrows from its surroundings.

use std::path::{Path, PathBuf};

/// The environment a [`Configurator`](crate::Configurator) runs in.
///
/// Everything that touches the process, the filesystem or a host
/// application goes through this trait, so resolution can be exercised
/// without a real directory layout.
pub trait Host {
    /// Root directory of the host application, if running inside one.
    ///
    /// When set, `{root}/config/<kind>.yml` is consulted before the
    /// working directory.
    fn host_root(&self) -> Option<PathBuf>;

    /// Environment name announced by the host application, if any.
    fn host_environment(&self) -> Option<String> {
        None
    }

    /// Current working directory.
    fn cwd(&self) -> PathBuf;

    /// Returns `true` if `path` names an existing regular file.
    fn file_exists(&self, path: &Path) -> bool;

    fn read_file(&self, path: &Path) -> std::io::Result<String>;

    /// Reads a process environment variable.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Diagnostic sink for operator-facing warnings.
    fn warn(&self, message: &str);
}

/// [`Host`] backed by the real process and filesystem.
///
/// Warnings are emitted through `tracing` at `WARN` level.
#[derive(Debug, Clone, Default)]
pub struct OsHost {
    root: Option<PathBuf>,
    environment: Option<String>,
}

impl OsHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host application root directory.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Sets the environment name reported by the host application.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}

impl Host for OsHost {
    fn host_root(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn host_environment(&self) -> Option<String> {
        self.environment.clone()
    }

    fn cwd(&self) -> PathBuf {
        // An unreadable cwd (e.g. deleted directory) just means nothing is found there.
        std::env::current_dir().unwrap_or_default()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
