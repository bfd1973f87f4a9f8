use serde_yaml::{Mapping, Value};
use tracing::info;

use super::bundled::read_bundled;
use super::file::{load_document, parse_document};
use super::url::{determine_url, secondary_url};
use super::{ConfigError, ConfigKind, ConfigSource, ResolvedPath};
use crate::Host;

/// A loaded service configuration.
///
/// Holds the parsed document with a synthetic top-level `url` entry set to
/// the URL extracted for the active environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    kind: ConfigKind,
    path: ResolvedPath,
    environment: String,
    url: String,
    document: Mapping,
}

impl ResolvedConfig {
    pub fn kind(&self) -> ConfigKind {
        self.kind
    }

    pub fn path(&self) -> &ResolvedPath {
        &self.path
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The active URL, credentials already stripped for the primary kind.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The whole document, including the synthetic top-level `url`.
    pub fn document(&self) -> &Mapping {
        &self.document
    }

    /// The active environment's section with `url` replaced by [`url`](Self::url).
    pub fn section(&self) -> Mapping {
        let mut section = self
            .document
            .get(self.environment.as_str())
            .and_then(Value::as_mapping)
            .cloned()
            .unwrap_or_default();
        section.insert("url".into(), self.url.clone().into());
        section
    }
}

/// Reads, parses and extracts the URL from an already-resolved path.
pub fn load_config<H: Host + ?Sized>(
    host: &H,
    kind: ConfigKind,
    path: ResolvedPath,
    environment: &str,
) -> Result<ResolvedConfig, ConfigError> {
    info!(
        %kind,
        path = %path.path.display(),
        source = %path.source,
        environment,
        "loading config"
    );

    let mut document = match path.source {
        ConfigSource::BundledDefault => {
            parse_document(&read_bundled(host, &path.path)?, &path.path)?
        }
        _ => load_document(host, &path.path)?,
    };
    if path.source == ConfigSource::EmbeddedInPrimary {
        document = embedded_secondary(&document, environment);
    }

    let url = determine_url(kind, &document, environment)?;
    document.insert("url".into(), url.clone().into());

    Ok(ResolvedConfig {
        kind,
        path,
        environment: environment.to_string(),
        url,
        document,
    })
}

/// Whether a primary document carries a usable `secondary` block for `environment`.
pub fn defines_secondary(primary: &Mapping, environment: &str) -> bool {
    embedded_section(primary, environment).is_some_and(|section| secondary_url(section).is_some())
}

fn embedded_section<'a>(primary: &'a Mapping, environment: &str) -> Option<&'a Mapping> {
    primary
        .get(environment)?
        .get(ConfigKind::Secondary.name())?
        .as_mapping()
}

/// Re-roots the `secondary` block of a primary document as a standalone
/// `{environment: section}` document.
fn embedded_secondary(primary: &Mapping, environment: &str) -> Mapping {
    let mut document = Mapping::new();
    if let Some(section) = embedded_section(primary, environment) {
        document.insert(environment.into(), Value::Mapping(section.clone()));
    }
    document
}
