use super::Options;
use crate::Host;

/// Process variable consulted when neither options nor host name an environment.
pub const ENVIRONMENT_VAR: &str = "environment";

pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Determines the active environment name.
///
/// Order: `options.environment`, the host's own environment, the
/// `environment` process variable, then `"development"`. Empty values
/// are skipped.
pub fn resolve_environment<H: Host + ?Sized>(options: &Options, host: &H) -> String {
    [
        options.environment.clone(),
        host.host_environment(),
        host.env_var(ENVIRONMENT_VAR),
    ]
    .into_iter()
    .flatten()
    .find(|env| !env.trim().is_empty())
    .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}
