//! Configuration error types.
//!
//! Errors carry full context for logs; `user_message()` gives a short,
//! operator-facing hint.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Load(_) => "Could not read config.toml or FLAMINGO_* variables.",
            ConfigError::Invalid(_) => "Fix the contact e-mail or bind address and restart.",
            ConfigError::MissingSetting(_) => "Set the value via FLAMINGO_* variables or config.toml and restart.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_includes_detail() {
        let err = ConfigError::Invalid("contact_email: missing @".into());
        assert!(err.to_string().contains("contact_email"));
    }

    #[test]
    fn test_missing_setting_points_at_env_var() {
        let err = ConfigError::MissingSetting("server.bind_addr".into());
        assert_eq!(err.to_string(), "Missing required setting: server.bind_addr");
        assert!(err.user_message().contains("FLAMINGO_"));
    }
}
