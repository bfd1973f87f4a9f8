//! Locates, loads and validates service-endpoint configuration.
//!
//! Two service configs (`primary`, `secondary`) are found through a fixed
//! fallback chain (explicit option, host root, working directory, bundled
//! default) and reduced to the URL of the active environment. A separate
//! predicate-mapping document is validated and loaded on demand.

pub mod config;
pub mod context;
mod error;
mod host;
pub mod predicate;

#[cfg(test)]
mod testing;

pub use config::{
    ConfigError, ConfigKind, ConfigSource, Options, OptionsBuilder, ResolvedConfig, ResolvedPath,
};
pub use context::{bundled_config_dir, global, Configurator, ConfiguratorBuilder};
pub use error::Error;
pub use host::{Host, OsHost};
pub use predicate::PredicateMapping;
