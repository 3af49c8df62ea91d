//! Configuration management for Quill.
//!
//! Parses `quill.toml` files with serde and auto-discovers the config in
//! the current directory and its parents. CLI settings can be applied
//! during load via [`CliSettings`] and take precedence over file values.
//!
//! ## Environment Variable Expansion
//!
//! `api.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Upper bound for the request timeout, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override backend base URL.
    pub base_url: Option<String>,
    /// Override request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override history file path.
    pub history_path: Option<PathBuf>,
    /// Override export output directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// History configuration (paths are relative strings from TOML).
    history: HistoryConfigRaw,
    /// Export configuration (paths are relative strings from TOML).
    export: ExportConfigRaw,

    /// Resolved history configuration (set after loading).
    #[serde(skip)]
    pub history_resolved: HistoryConfig,
    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Backend API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Raw history configuration as parsed from TOML (path as string).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HistoryConfigRaw {
    path: Option<String>,
}

/// Resolved history configuration with absolute paths.
#[derive(Debug, Default)]
pub struct HistoryConfig {
    /// History file path.
    pub path: PathBuf,
}

/// Raw export configuration as parsed from TOML (path as string).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    output_dir: Option<String>,
}

/// Resolved export configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ExportConfig {
    /// Directory export artifacts are written to.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.base_url`").
        field: String,
        /// Error message (e.g., "${`QUILL_API_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `quill.toml` in the current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing, expansion, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        if let Some(history_path) = &settings.history_path {
            self.history_resolved.path.clone_from(history_path);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.export_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the current directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to the given base.
    fn default_with_base(base: &Path) -> Self {
        Self {
            api: ApiConfig::default(),
            history: HistoryConfigRaw::default(),
            export: ExportConfigRaw::default(),
            history_resolved: HistoryConfig {
                path: base.join(".quill").join("history.json"),
            },
            export_resolved: ExportConfig {
                output_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.api.base_url = expand::expand_env(&config.api.base_url, "api.base_url")?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.history_resolved = HistoryConfig {
            path: match self.history.path.as_deref() {
                Some(path) => config_dir.join(path),
                None => config_dir.join(".quill").join("history.json"),
            },
        };
        self.export_resolved = ExportConfig {
            output_dir: match self.export.output_dir.as_deref() {
                Some(dir) => config_dir.join(dir),
                None => config_dir.to_path_buf(),
            },
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "api.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.history_resolved.path,
            PathBuf::from("/test/.quill/history.json")
        );
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/test"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_parse_api_config() {
        let toml = r#"
[api]
base_url = "https://content.example.com"
timeout_secs = 60
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://content.example.com");
        assert_eq!(config.api.timeout_secs, 60);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[history]
path = "state/history.json"

[export]
output_dir = "exports"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.history_resolved.path,
            PathBuf::from("/project/state/history.json")
        );
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/project/exports")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.history_resolved.path,
            PathBuf::from("/project/.quill/history.json")
        );
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/project"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            base_url: Some("http://127.0.0.1:9000".to_owned()),
            timeout_secs: Some(10),
            history_path: Some(PathBuf::from("/custom/history.json")),
            output_dir: Some(PathBuf::from("/custom/out")),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(
            config.history_resolved.path,
            PathBuf::from("/custom/history.json")
        );
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/custom/out")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/no/such/quill.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_paths() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("quill.toml");
        std::fs::write(
            &path,
            "[history]\npath = \"h.json\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.history_resolved.path, tmp.path().join("h.json"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_expand_env_vars_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_API_URL", "https://api.test.example");
        }
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("quill.toml");
        std::fs::write(&path, "[api]\nbase_url = \"${QUILL_TEST_API_URL}\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.api.base_url, "https://api.test.example");

        unsafe {
            std::env::remove_var("QUILL_TEST_API_URL");
        }
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.api.base_url = String::new();
        assert_validation_error(&config, &["api.base_url", "empty"]);
    }

    #[test]
    fn test_validate_base_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.api.base_url = "ftp://example.com".to_owned();
        assert_validation_error(&config, &["api.base_url", "http"]);
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.api.timeout_secs = 0;
        assert_validation_error(&config, &["timeout_secs", "greater than 0"]);
    }

    #[test]
    fn test_validate_timeout_too_high() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.api.timeout_secs = 3600;
        assert_validation_error(&config, &["timeout_secs", "300"]);
    }
}
