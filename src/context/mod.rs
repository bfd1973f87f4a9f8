//! The configurator: resolved paths, loaded configs and the predicate mapping
//! for one set of options.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde_yaml::Mapping;
use tracing::debug;

use crate::config::{
    self, defines_secondary, resolve_environment, ConfigError, ConfigKind, Options, PathResolver,
    PrimaryContext, ResolvedConfig, ResolvedPath,
};
use crate::predicate::{self, PredicateMapping};
use crate::{Error, Host, OsHost};

/// Directory holding the configuration files shipped with this crate.
pub fn bundled_config_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("config")
}

/// Locates, loads and caches the primary/secondary service configs and the
/// predicate mapping.
///
/// Configs are loaded once by [`load_configs`](Self::load_configs) (or
/// [`init`](Self::init)) and kept until [`reset`](Self::reset). Path
/// lookups always re-check the filesystem.
///
/// ## Example
///
/// ```no_run
/// use endpoint_conf::{Configurator, Options};
///
/// let mut configurator = Configurator::builder()
///     .with_options(
///         Options::builder()
///             .with_primary_config_path("/etc/myapp/primary.yml")
///             .build(),
///     )
///     .build()?;
/// configurator.load_configs()?;
///
/// let url = configurator.primary_config().map(|c| c.url());
/// # Ok::<(), endpoint_conf::Error>(())
/// ```
#[derive(Debug)]
pub struct Configurator<H = OsHost> {
    host: H,
    bundled_dir: PathBuf,
    options: Options,
    environment: String,
    primary: Option<ResolvedConfig>,
    secondary: Option<ResolvedConfig>,
    config_loaded: bool,
    predicate_config: Option<PredicateMapping>,
}

impl Configurator<OsHost> {
    /// Creates a new builder for constructing a `Configurator`.
    pub fn builder() -> ConfiguratorBuilder<OsHost> {
        ConfiguratorBuilder {
            host: OsHost::new(),
            options: Options::default(),
            bundled_dir: bundled_config_dir(),
        }
    }
}

impl Default for Configurator<OsHost> {
    fn default() -> Self {
        Self::new(OsHost::new(), Options::default(), bundled_config_dir())
    }
}

impl<H: Host> Configurator<H> {
    fn new(host: H, options: Options, bundled_dir: PathBuf) -> Self {
        let environment = resolve_environment(&options, &host);
        Self {
            host,
            bundled_dir,
            options,
            environment,
            primary: None,
            secondary: None,
            config_loaded: false,
            predicate_config: None,
        }
    }

    /// Replaces the options, drops everything cached and loads both configs.
    pub fn init(&mut self, options: Options) -> Result<(), Error> {
        check_explicit_primary(&self.host, &options)?;
        self.environment = resolve_environment(&options, &self.host);
        self.options = options;
        self.reset();
        self.load_configs()
    }

    /// Like [`init`](Self::init), for options held as an untyped value.
    ///
    /// Anything other than a mapping or null is an
    /// [`Error::InvalidArgument`].
    pub fn init_from_value(&mut self, options: serde_yaml::Value) -> Result<(), Error> {
        self.init(Options::try_from(options)?)
    }

    /// Forgets loaded configs and the predicate mapping.
    pub fn reset(&mut self) {
        self.primary = None;
        self.secondary = None;
        self.config_loaded = false;
        self.predicate_config = None;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The active environment name, e.g. `"development"` or `"test"`.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn resolver(&self) -> PathResolver<'_, H> {
        PathResolver::new(&self.host, &self.options, &self.bundled_dir)
    }

    /// Resolves the config file path for `kind`.
    ///
    /// Past an explicit option, the secondary path depends on the primary
    /// one: the loaded primary config is used when available, otherwise the
    /// primary path is resolved at that point.
    pub fn get_config_path(&self, kind: ConfigKind) -> Result<ResolvedPath, ConfigError> {
        let resolver = self.resolver();
        match kind {
            ConfigKind::Primary => resolver.resolve_primary(),
            ConfigKind::Secondary => resolver.resolve_secondary(|| match &self.primary {
                Some(primary) => Ok(PrimaryContext {
                    path: primary.path().path.clone(),
                    defines_secondary: defines_secondary(primary.document(), &self.environment),
                }),
                None => Ok(PrimaryContext {
                    path: resolver.resolve_primary()?.path,
                    defines_secondary: false,
                }),
            }),
        }
    }

    pub fn secondary_config_path(&self) -> Result<ResolvedPath, ConfigError> {
        self.get_config_path(ConfigKind::Secondary)
    }

    /// Extracts the URL for the active environment from `document`.
    pub fn determine_url(
        &self,
        kind: ConfigKind,
        document: &Mapping,
    ) -> Result<String, ConfigError> {
        config::determine_url(kind, document, &self.environment)
    }

    /// Resolves, reads and parses the config for `kind`, replacing any
    /// previously loaded one.
    pub fn load_config(&mut self, kind: ConfigKind) -> Result<&ResolvedConfig, ConfigError> {
        let path = self.get_config_path(kind)?;
        let loaded = config::load_config(&self.host, kind, path, &self.environment)?;
        let slot = match kind {
            ConfigKind::Primary => &mut self.primary,
            ConfigKind::Secondary => &mut self.secondary,
        };
        Ok(slot.insert(loaded))
    }

    /// Loads the primary then the secondary config, once.
    ///
    /// Does nothing if both are already loaded.
    pub fn load_configs(&mut self) -> Result<(), Error> {
        if self.config_loaded {
            debug!("configs already loaded");
            return Ok(());
        }
        self.load_config(ConfigKind::Primary)?;
        self.load_config(ConfigKind::Secondary)?;
        self.config_loaded = true;
        Ok(())
    }

    pub fn config_loaded(&self) -> bool {
        self.config_loaded
    }

    pub fn primary_config(&self) -> Option<&ResolvedConfig> {
        self.primary.as_ref()
    }

    pub fn secondary_config(&self) -> Option<&ResolvedConfig> {
        self.secondary.as_ref()
    }

    /// See [`predicate::build_predicate_config_path`].
    pub fn build_predicate_config_path(&self, dir: Option<&Path>) -> PathBuf {
        predicate::build_predicate_config_path(&self.host, dir, &self.bundled_dir)
    }

    pub fn valid_predicate_mapping(&self, path: &Path) -> bool {
        predicate::valid_predicate_mapping(&self.host, path)
    }

    /// The predicate mapping, loaded on first use.
    ///
    /// The `predicate_mappings_config_path` option names the directory
    /// searched before the bundled file.
    pub fn predicate_config(&mut self) -> Result<&PredicateMapping, ConfigError> {
        let mapping = match self.predicate_config.take() {
            Some(mapping) => mapping,
            None => {
                let dir = self.options.predicate_mappings_config_path.as_deref();
                let path = self.build_predicate_config_path(dir);
                debug!(path = %path.display(), "loading predicate mapping");
                predicate::load_predicate_mapping(&self.host, &path, &self.bundled_dir)?
            }
        };
        Ok(self.predicate_config.insert(mapping))
    }

    pub fn reset_predicate_config(&mut self) {
        self.predicate_config = None;
    }
}

fn check_explicit_primary<H: Host + ?Sized>(
    host: &H,
    options: &Options,
) -> Result<(), ConfigError> {
    match options.config_path(ConfigKind::Primary) {
        Some(path) if !host.file_exists(path) => Err(ConfigError::FileNotFound {
            kind: ConfigKind::Primary,
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

/// Builder for constructing a [`Configurator`].
///
/// Starts out backed by [`OsHost`]; [`with_host`](Self::with_host) swaps in
/// another [`Host`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfiguratorBuilder<H> {
    host: H,
    options: Options,
    bundled_dir: PathBuf,
}

impl<H> ConfiguratorBuilder<H> {
    pub fn with_host<H2: Host>(self, host: H2) -> ConfiguratorBuilder<H2> {
        ConfiguratorBuilder {
            host,
            options: self.options,
            bundled_dir: self.bundled_dir,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Overrides where the bundled default files are looked up.
    pub fn with_bundled_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.bundled_dir = dir.as_ref().to_path_buf();
        self
    }
}

impl<H: Host> ConfiguratorBuilder<H> {
    /// Builds the `Configurator` without loading anything.
    ///
    /// Returns an error if an explicit primary config path does not exist.
    pub fn build(self) -> Result<Configurator<H>, Error> {
        check_explicit_primary(&self.host, &self.options)?;
        Ok(Configurator::new(self.host, self.options, self.bundled_dir))
    }
}

/// Process-wide configurator backed by the real filesystem.
///
/// Hold the lock across check-then-load sequences such as
/// [`Configurator::load_configs`].
pub fn global() -> &'static Mutex<Configurator> {
    static GLOBAL: OnceLock<Mutex<Configurator>> = OnceLock::new();
    GLOBAL.get_or_init(|| Mutex::new(Configurator::default()))
}
