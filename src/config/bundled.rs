//! Default config files compiled into the crate.
//!
//! The bundled directory normally holds these same files on disk. When the
//! crate is used from a build where that directory is gone, the embedded
//! copies are read instead.

use std::path::Path;

use tracing::debug;

use super::file::read_contents;
use super::ConfigError;
use crate::predicate::PREDICATE_MAPPINGS_FILE;
use crate::Host;

const PRIMARY: &str = include_str!("../../config/primary.yml");
const SECONDARY: &str = include_str!("../../config/secondary.yml");
const PREDICATE_MAPPINGS: &str = include_str!("../../config/predicate_mappings.yml");

/// The embedded contents of the bundled file named `file_name`.
pub fn bundled_contents(file_name: &str) -> Option<&'static str> {
    match file_name {
        "primary.yml" => Some(PRIMARY),
        "secondary.yml" => Some(SECONDARY),
        PREDICATE_MAPPINGS_FILE => Some(PREDICATE_MAPPINGS),
        _ => None,
    }
}

/// Reads a bundled default file through the host, or its embedded copy when
/// the host has no such file.
pub fn read_bundled<H: Host + ?Sized>(host: &H, path: &Path) -> Result<String, ConfigError> {
    if !host.file_exists(path) {
        let embedded = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(bundled_contents);
        if let Some(contents) = embedded {
            debug!(path = %path.display(), "bundled file not on disk, using embedded copy");
            return Ok(contents.to_string());
        }
    }
    read_contents(host, path)
}
