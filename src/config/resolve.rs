//! Configuration path resolution.
//!
//! Resolution order for both kinds: explicit option → host root →
//! working directory → bundled default. The secondary kind additionally
//! checks next to the resolved primary file before the host root.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConfigError, ConfigKind, ConfigSource, Options, ResolvedPath};
use crate::Host;

/// Directory under a root (host or cwd) holding the config files.
const CONFIG_DIR: &str = "config";

/// What secondary resolution knows about the already-resolved primary config.
#[derive(Debug, Clone)]
pub struct PrimaryContext {
    pub path: PathBuf,
    /// Whether the loaded primary document defines a `secondary` section
    /// for the current environment.
    pub defines_secondary: bool,
}

/// Computes config file paths for a set of options.
///
/// Existence is checked on every call; nothing is cached here.
#[derive(Debug)]
pub struct PathResolver<'a, H: ?Sized> {
    host: &'a H,
    options: &'a Options,
    bundled_dir: &'a Path,
}

impl<'a, H: Host + ?Sized> PathResolver<'a, H> {
    pub fn new(host: &'a H, options: &'a Options, bundled_dir: &'a Path) -> Self {
        Self {
            host,
            options,
            bundled_dir,
        }
    }

    /// Resolves the primary config path.
    ///
    /// An explicit path that does not exist is an error rather than a
    /// reason to fall through.
    pub fn resolve_primary(&self) -> Result<ResolvedPath, ConfigError> {
        let kind = ConfigKind::Primary;

        if let Some(path) = self.options.config_path(kind) {
            if !self.host.file_exists(path) {
                return Err(ConfigError::FileNotFound {
                    kind,
                    path: path.to_path_buf(),
                });
            }
            return Ok(ResolvedPath::new(path, ConfigSource::Explicit));
        }

        Ok(self.resolve_shared(kind))
    }

    /// Resolves the secondary config path.
    ///
    /// `primary` is only called once the explicit option has been ruled
    /// out, so an explicit secondary path never triggers primary resolution.
    pub fn resolve_secondary<F>(&self, primary: F) -> Result<ResolvedPath, ConfigError>
    where
        F: FnOnce() -> Result<PrimaryContext, ConfigError>,
    {
        let kind = ConfigKind::Secondary;

        if let Some(path) = self.options.config_path(kind) {
            if self.host.file_exists(path) {
                return Ok(ResolvedPath::new(path, ConfigSource::Explicit));
            }
            debug!(
                %kind,
                path = %path.display(),
                "explicit config path does not exist, falling through"
            );
        }

        let primary = primary()?;
        if let Some(path) = self.colocated_secondary(&primary.path) {
            return Ok(ResolvedPath::new(path, ConfigSource::CoLocated));
        }

        if primary.defines_secondary {
            return Ok(ResolvedPath::new(
                primary.path,
                ConfigSource::EmbeddedInPrimary,
            ));
        }

        Ok(self.resolve_shared(kind))
    }

    /// `secondary.yml` in the directory holding the primary file, if present.
    pub fn colocated_secondary(&self, primary_path: &Path) -> Option<PathBuf> {
        let dir = primary_path.parent()?;
        let path = dir.join(ConfigKind::Secondary.file_name());
        if self.host.file_exists(&path) {
            Some(path)
        } else {
            debug!(path = %path.display(), "no secondary config next to primary config");
            None
        }
    }

    /// Path of the bundled file for `file_name`.
    pub fn bundled_path(&self, file_name: &str) -> PathBuf {
        self.bundled_dir.join(file_name)
    }

    /// Host root, working directory, then bundled default.
    fn resolve_shared(&self, kind: ConfigKind) -> ResolvedPath {
        let file_name = kind.file_name();

        if let Some(root) = self.host.host_root() {
            let path = root.join(CONFIG_DIR).join(&file_name);
            if self.host.file_exists(&path) {
                return ResolvedPath::new(path, ConfigSource::HostRoot);
            }
            debug!(%kind, path = %path.display(), "no config under host root");
        }

        let path = self.host.cwd().join(CONFIG_DIR).join(&file_name);
        if self.host.file_exists(&path) {
            return ResolvedPath::new(path, ConfigSource::WorkingDirectory);
        }
        debug!(%kind, path = %path.display(), "no config under working directory");

        let path = self.bundled_path(&file_name);
        self.host.warn(&bundled_default_warning(kind));
        ResolvedPath::new(path, ConfigSource::BundledDefault)
    }
}

/// Warning emitted whenever the bundled file for `kind` is chosen.
pub fn bundled_default_warning(kind: ConfigKind) -> String {
    let file_name = kind.file_name();
    format!(
        "Using the default {file_name} that comes with endpoint-conf. \
         If you want to override this, pass the path to {file_name} in the options - \
         ie. `{key}: /path/to/{file_name}` - \
         or set the host root and put {file_name} into {{host root}}/config.",
        key = kind.option_key(),
    )
}
