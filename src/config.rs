use std::env;

use thiserror::Error;

const API_KEY_VAR: &str = "TMDB_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {0} is set but empty")]
    Empty(&'static str),
}

/// Read-only configuration shared by every catalog call. Validated once
/// at startup so a missing credential is a typed error, not a panic
/// somewhere inside the first request.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| ConfigError::Missing(API_KEY_VAR))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Empty(API_KEY_VAR));
        }
        Ok(Self { api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers all three states so parallel tests never race on the
    // process environment.
    #[test]
    fn from_env_validates_the_credential() {
        env::remove_var(API_KEY_VAR);
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing(API_KEY_VAR))
        ));

        env::set_var(API_KEY_VAR, "   ");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Empty(API_KEY_VAR))
        ));

        env::set_var(API_KEY_VAR, "test-key");
        let config = Config::from_env().expect("config with key set");
        assert_eq!(config.api_key, "test-key");
        env::remove_var(API_KEY_VAR);
    }
}
