// Configuration loading and parsing (scout.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub credentials: CredentialsConfig,
}

/// Wrapper for the top-level `[gemini]` table in scout.toml.
#[derive(Debug, Clone, Deserialize)]
struct ScoutFile {
    gemini: GeminiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub model: String,
    /// Sampling temperature. Kept low-moderate to favor factual consistency.
    pub temperature: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub gemini_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/scout.toml` and (optionally)
/// `config/credentials.toml`, relative to `base_dir`. A `GEMINI_API_KEY`
/// environment variable overrides the file key; after this returns, the key
/// is a plain value injected into the client constructor, never looked up
/// again at call time.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles that.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- scout.toml (required) ---
    let scout_path = config_dir.join("scout.toml");
    let scout_text = read_file(&scout_path)?;
    let scout_file: ScoutFile =
        toml::from_str(&scout_text).map_err(|e| ConfigError::ParseError {
            path: scout_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let mut credentials: CredentialsConfig = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    credentials.gemini_api_key = resolve_api_key(
        credentials.gemini_api_key.take(),
        std::env::var("GEMINI_API_KEY").ok(),
    );

    let config = Config {
        gemini: scout_file.gemini,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Pick the effective API key: a non-blank environment value wins over the
/// credentials file; blank values count as absent.
fn resolve_api_key(file_key: Option<String>, env_key: Option<String>) -> Option<String> {
    let non_blank = |k: Option<String>| k.filter(|s| !s.trim().is_empty());
    non_blank(env_key).or(non_blank(file_key))
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` templates,
/// so the credentials template never becomes a live credentials file.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Already customized in config/, leave it alone.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.gemini.model.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "gemini.model".into(),
            message: "must not be empty".into(),
        });
    }

    let temp = config.gemini.temperature;
    if !(0.0..=2.0).contains(&temp) {
        return Err(ConfigError::ValidationError {
            field: "gemini.temperature".into(),
            message: format!("must be between 0.0 and 2.0 inclusive, got {temp}"),
        });
    }

    if config.gemini.max_output_tokens == 0 {
        return Err(ConfigError::ValidationError {
            field: "gemini.max_output_tokens".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_SCOUT_TOML: &str = r#"
[gemini]
model = "gemini-2.5-flash"
temperature = 0.4
max_output_tokens = 4096
"#;

    /// Fresh temp dir with a config/ subdirectory holding `scout_toml`.
    fn setup_dir(name: &str, scout_toml: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("scout.toml"), scout_toml).unwrap();
        tmp
    }

    #[test]
    fn loads_valid_config() {
        let tmp = setup_dir("scoutcard_config_valid", VALID_SCOUT_TOML);

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!((config.gemini.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.gemini.max_output_tokens, 4096);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_credentials_toml_is_ok() {
        let tmp = setup_dir("scoutcard_config_no_creds", VALID_SCOUT_TOML);

        let config = load_config_from(&tmp).expect("should load without credentials.toml");
        // The key may still come from the ambient GEMINI_API_KEY env var, so
        // only assert on the file-less path when that var is unset.
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(config.credentials.gemini_api_key.is_none());
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_with_api_key() {
        let tmp = setup_dir("scoutcard_config_with_creds", VALID_SCOUT_TOML);
        fs::write(
            tmp.join("config/credentials.toml"),
            "gemini_api_key = \"AIza-test-key\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load with credentials.toml");
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert_eq!(
                config.credentials.gemini_api_key.as_deref(),
                Some("AIza-test-key")
            );
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_key_overrides_file_key() {
        assert_eq!(
            resolve_api_key(Some("file-key".into()), Some("env-key".into())),
            Some("env-key".into())
        );
    }

    #[test]
    fn blank_env_key_falls_back_to_file_key() {
        assert_eq!(
            resolve_api_key(Some("file-key".into()), Some("  ".into())),
            Some("file-key".into())
        );
        assert_eq!(
            resolve_api_key(Some("file-key".into()), None),
            Some("file-key".into())
        );
    }

    #[test]
    fn blank_keys_everywhere_resolve_to_none() {
        assert_eq!(resolve_api_key(Some(String::new()), Some(String::new())), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn rejects_empty_model() {
        let tmp = setup_dir(
            "scoutcard_config_empty_model",
            "[gemini]\nmodel = \"\"\ntemperature = 0.4\nmax_output_tokens = 4096\n",
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "gemini.model"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let tmp = setup_dir(
            "scoutcard_config_bad_temp",
            "[gemini]\nmodel = \"gemini-2.5-flash\"\ntemperature = 2.5\nmax_output_tokens = 4096\n",
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "gemini.temperature")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_max_output_tokens() {
        let tmp = setup_dir(
            "scoutcard_config_zero_tokens",
            "[gemini]\nmodel = \"gemini-2.5-flash\"\ntemperature = 0.4\nmax_output_tokens = 0\n",
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "gemini.max_output_tokens")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_scout_toml() {
        let tmp = std::env::temp_dir().join("scoutcard_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("scout.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = setup_dir("scoutcard_config_invalid", "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("scout.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("scoutcard_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("scout.toml"), VALID_SCOUT_TOML).unwrap();
        fs::write(
            defaults_dir.join("credentials.toml.example"),
            "gemini_api_key = \"AIza-...\"\n",
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/scout.toml").exists());
        // The example template must not become a live credentials file.
        assert!(!tmp.join("config/credentials.toml.example").exists());
        assert!(!tmp.join("config/credentials.toml").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("scoutcard_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(defaults_dir.join("scout.toml"), VALID_SCOUT_TOML).unwrap();
        fs::write(config_dir.join("scout.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(config_dir.join("scout.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("scoutcard_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
