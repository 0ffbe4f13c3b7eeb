use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Listen address used when nothing else is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Legacy environment variable holding the contact e-mail.
pub const CONTACT_EMAIL_VAR: &str = "USER_EMAIL";

const ENV_PREFIX: &str = "FLAMINGO";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Join all errors into a single line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Contact e-mail sent to the weather service in the User-Agent header
    #[serde(default)]
    pub contact_email: String,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:8080`
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Contact e-mail from the legacy `USER_EMAIL` variable, if set and non-blank
pub fn default_contact_email() -> Option<String> {
    std::env::var(CONTACT_EMAIL_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from defaults, the optional config file and
    /// `FLAMINGO_*` environment variables, in that order of precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        Self::load_layered(path.as_deref(), default_contact_email())
    }

    /// Layered load with an explicit file and default contact e-mail.
    ///
    /// A missing file is not an error.
    pub fn load_layered(
        file: Option<&Path>,
        default_email: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("contact_email", default_email.unwrap_or_default())?
            .set_default("server.bind_addr", DEFAULT_BIND_ADDR)?;

        if let Some(path) = file {
            tracing::debug!("Reading config file {}", path.display());
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let config: Config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors abort loading.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        let email = self.contact_email.trim();
        if email.is_empty() {
            result.add_warning(
                "contact_email",
                format!(
                    "No contact e-mail set ({} or {}_CONTACT_EMAIL); the weather service may reject requests",
                    CONTACT_EMAIL_VAR, ENV_PREFIX
                ),
            );
        } else if !email.contains('@') {
            result.add_error(
                "contact_email",
                format!("Not an e-mail address: {}", email),
            );
        }

        if let Err(e) = self.server.bind_addr.parse::<SocketAddr>() {
            result.add_error(
                "server.bind_addr",
                format!("Invalid socket address '{}': {}", self.server.bind_addr, e),
            );
        }

        result
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = self.server.bind_addr.trim();
        if addr.is_empty() {
            return Err(ConfigError::MissingSetting("server.bind_addr".to_string()));
        }
        addr.parse()
            .map_err(|e| ConfigError::Invalid(format!("server.bind_addr: {}", e)))
    }

    /// Path of the optional config file
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flamingo-forecast").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    fn config_with(email: &str, bind_addr: &str) -> Config {
        Config {
            contact_email: email.to_string(),
            server: ServerConfig {
                bind_addr: bind_addr.to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config_with("sun@example.com", DEFAULT_BIND_ADDR);
        let result = config.validate();
        assert!(result.is_valid(), "Config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_email_is_warning() {
        let config = config_with("", DEFAULT_BIND_ADDR);
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "contact_email"));
    }

    #[test]
    fn test_malformed_email_is_error() {
        let config = config_with("not-an-email", DEFAULT_BIND_ADDR);
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "contact_email"));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let config = config_with("sun@example.com", "localhost");
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "server.bind_addr"));
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn test_blank_bind_addr_is_missing() {
        let config = config_with("sun@example.com", "  ");
        assert!(matches!(config.bind_addr(), Err(ConfigError::MissingSetting(_))));
    }

    #[test]
    fn test_bind_addr_parses() {
        let config = config_with("sun@example.com", "0.0.0.0:3000");
        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    /// Serializes tests that touch the process environment and clears the
    /// variables the loader reads, restoring them on drop.
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
        _lock: MutexGuard<'static, ()>,
    }

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const EMAIL_VAR: &str = "FLAMINGO_CONTACT_EMAIL";
    const BIND_VAR: &str = "FLAMINGO_SERVER__BIND_ADDR";

    impl EnvGuard {
        fn clean() -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let saved = [EMAIL_VAR, BIND_VAR, CONTACT_EMAIL_VAR]
                .into_iter()
                .map(|name| {
                    let value = std::env::var(name).ok();
                    std::env::remove_var(name);
                    (name, value)
                })
                .collect();
            Self { saved, _lock: lock }
        }

        fn set(&self, name: &str, value: &str) {
            std::env::set_var(name, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => std::env::set_var(name, v),
                    None => std::env::remove_var(name),
                }
            }
        }
    }

    fn write_config_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "contact_email = \"file@example.com\"\n\n[server]\nbind_addr = \"0.0.0.0:9000\"\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_load_layered_without_file_uses_defaults() {
        let _env = EnvGuard::clean();
        let config =
            Config::load_layered(None, Some("beach@example.com".to_string())).unwrap();
        assert_eq!(config.contact_email, "beach@example.com");
        assert_eq!(config.server.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_load_layered_missing_file_is_not_an_error() {
        let _env = EnvGuard::clean();
        let path = std::env::temp_dir().join("flamingo-forecast-does-not-exist.toml");
        let config = Config::load_layered(Some(&path), None).unwrap();
        assert_eq!(config.contact_email, "");
        assert_eq!(config.server.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _env = EnvGuard::clean();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir);

        let config = Config::load_layered(Some(&path), Some("default@example.com".into())).unwrap();
        assert_eq!(config.contact_email, "file@example.com");
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_env_overrides_file() {
        let env = EnvGuard::clean();
        env.set(EMAIL_VAR, "env@example.com");
        env.set(BIND_VAR, "0.0.0.0:7777");
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir);

        let config = Config::load_layered(Some(&path), Some("default@example.com".into())).unwrap();
        assert_eq!(config.contact_email, "env@example.com");
        assert_eq!(config.server.bind_addr, "0.0.0.0:7777");
    }

    #[test]
    fn test_env_overrides_defaults_per_key() {
        let env = EnvGuard::clean();
        env.set(BIND_VAR, "127.0.0.1:9999");

        let config = Config::load_layered(None, Some("default@example.com".into())).unwrap();
        assert_eq!(config.contact_email, "default@example.com");
        assert_eq!(config.server.bind_addr, "127.0.0.1:9999");
    }

    #[test]
    fn test_user_email_is_default_contact() {
        let env = EnvGuard::clean();
        assert_eq!(default_contact_email(), None);

        env.set(CONTACT_EMAIL_VAR, "  ");
        assert_eq!(default_contact_email(), None);

        env.set(CONTACT_EMAIL_VAR, "legacy@example.com");
        let config = Config::load_layered(None, default_contact_email()).unwrap();
        assert_eq!(config.contact_email, "legacy@example.com");

        env.set(EMAIL_VAR, "env@example.com");
        let config = Config::load_layered(None, default_contact_email()).unwrap();
        assert_eq!(config.contact_email, "env@example.com");
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
