//! Locating, loading and interpreting the service configuration files.

mod bundled;
mod env;
mod error;
mod file;
mod loader;
mod options;
mod resolve;
mod source;
mod url;

pub use bundled::{bundled_contents, read_bundled};
pub use env::{resolve_environment, DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR};
pub use error::ConfigError;
pub use file::{load_document, parse_document, parse_str, parse_value};
pub use loader::{defines_secondary, load_config, ResolvedConfig};
pub use options::{Options, OptionsBuilder};
pub use resolve::{bundled_default_warning, PathResolver, PrimaryContext};
pub use source::{ConfigKind, ConfigSource, ResolvedPath};
pub use url::{determine_url, environment_section, secondary_url, strip_credentials};
