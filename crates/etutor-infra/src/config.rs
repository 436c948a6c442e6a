//! Configuration loader for E-Tutor.
//!
//! Reads `config.toml` from `<config dir>/etutor/` (e.g. `~/.config/etutor/`
//! on Linux) and deserializes it into [`TutorConfig`]. A missing or
//! malformed default file falls back to defaults. A file named explicitly
//! with `--config` must exist and parse.

use std::path::{Path, PathBuf};

use etutor_types::config::TutorConfig;
use etutor_types::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("etutor").join(CONFIG_FILE))
}

/// Load configuration.
///
/// - `Some(path)`: read and parse `path`; any failure is an error.
/// - `None`: try [`default_config_path`]; absent file gives defaults,
///   unreadable or malformed file logs a warning and gives defaults.
pub async fn load_config(explicit: Option<&Path>) -> Result<TutorConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path).await,
        None => {
            let Some(path) = default_config_path() else {
                tracing::debug!("No config directory on this platform, using defaults");
                return Ok(TutorConfig::default());
            };
            Ok(load_or_default(&path).await)
        }
    }
}

/// Load `path`, falling back to defaults on any failure.
pub async fn load_or_default(path: &Path) -> TutorConfig {
    match read_config(path).await {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            TutorConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            TutorConfig::default()
        }
    }
}

async fn read_config(path: &Path) -> Result<TutorConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let config: TutorConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), model = %config.model, "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_or_default_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_or_default(&tmp.path().join(CONFIG_FILE)).await;
        assert_eq!(config, TutorConfig::default());
    }

    #[tokio::test]
    async fn load_config_explicit_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(
            &config_path,
            r#"
model = "gemini-2.5-pro"
quiz_question_count = 5
api_key_env = ["MY_KEY"]
"#,
        )
        .await
        .unwrap();

        let config = load_config(Some(&config_path)).await.unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.quiz_question_count, 5);
        assert_eq!(config.api_key_env, vec!["MY_KEY".to_string()]);
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[tokio::test]
    async fn load_or_default_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_or_default(&config_path).await;
        assert_eq!(config, TutorConfig::default());
    }

    #[tokio::test]
    async fn load_config_explicit_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(&config_path, "temperature = \"hot\"")
            .await
            .unwrap();

        assert!(matches!(
            load_config(Some(&config_path)).await,
            Err(ConfigError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn load_config_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml"))).await;
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn default_path_ends_in_etutor_config() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("etutor/config.toml"));
        }
    }
}
