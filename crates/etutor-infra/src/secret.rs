//! API key resolution from environment variables.
//!
//! The key is read-only from our side: users set it through their shell,
//! never through the tutor. Candidates are tried in order and the first
//! non-blank value wins.

use secrecy::SecretString;

use etutor_types::error::ConfigError;

/// Resolve the API key from the first set variable in `names`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] listing every name tried.
pub fn resolve_api_key(names: &[String]) -> Result<SecretString, ConfigError> {
    resolve_with(names, |name| std::env::var(name).ok())
}

fn resolve_with(
    names: &[String],
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    for name in names {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => {
                tracing::debug!(source = %name, "API key resolved from environment");
                return Ok(SecretString::from(value.trim().to_string()));
            }
            // Set but blank counts as absent.
            _ => continue,
        }
    }
    Err(ConfigError::MissingCredential {
        tried: names.to_vec(),
    })
}
