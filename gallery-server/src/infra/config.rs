use std::{env, time::Duration};

use gallery_core::{
    database::infrastructure::memory::DEFAULT_SESSION_TTL,
    domain::image::DEFAULT_STORAGE_PREFIX,
};
use serde::Deserialize;

const DEFAULT_SESSION_TTL_SECS: u64 = DEFAULT_SESSION_TTL.as_secs();

/// Server configuration loaded via environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Database settings; in-memory image store when unset
    pub database_url: Option<String>,

    // Redis settings; in-memory session store when unset
    pub redis_url: Option<String>,
    pub session_ttl_secs: u64,

    // Gallery settings
    pub storage_prefix: String,

    // CORS settings
    pub cors_allowed_origins: Vec<String>,

    // Development settings
    pub dev_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            database_url: None,
            redis_url: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            dev_mode: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build a config from an arbitrary variable source. Unset or
    /// unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),

            database_url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            redis_url: lookup("REDIS_URL").filter(|v| !v.is_empty()),
            session_ttl_secs: lookup("SESSION_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.session_ttl_secs),

            storage_prefix: lookup("GALLERY_STORAGE_PREFIX")
                .unwrap_or(defaults.storage_prefix),

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),

            dev_mode: lookup("DEV_MODE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.dev_mode),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.storage_prefix, "/img/gallery/");
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
        assert!(config.database_url.is_none());
        assert!(config.redis_url.is_none());
        assert!(!config.dev_mode);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/gallery"),
            ("GALLERY_STORAGE_PREFIX", "/srv/img/"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("DEV_MODE", "true"),
        ]);

        assert_eq!(config.server_port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/gallery")
        );
        assert_eq!(config.storage_prefix, "/srv/img/");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.dev_mode);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("SESSION_TTL_SECS", "0"),
            ("REDIS_URL", ""),
        ]);

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.session_ttl_secs, 86_400);
        assert!(config.redis_url.is_none());
    }
}
