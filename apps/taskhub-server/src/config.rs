use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use taskhub_api::AuthConfig;

/// Main application configuration with strongly-typed sections.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database connection URL (e.g. "sqlite://taskhub.db?mode=rwc",
    /// "sqlite::memory:").
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://taskhub.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default tracing filter, e.g. "info" or "taskhub_api=debug,info".
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Layered loading: defaults → YAML file (if given) → environment
    /// variables. Example: TASKHUB__SERVER__PORT=9000 maps to server.port.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("TASKHUB__").split("__"));

        figment
            .extract()
            .context("Failed to extract configuration")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration")
    }

    /// Startup-time validation of the parts figment cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret.trim().is_empty() {
            anyhow::bail!(
                "auth.secret must be configured (config file or TASKHUB__AUTH__SECRET)"
            );
        }
        if self.database.url.trim().is_empty() {
            anyhow::bail!("database.url must be configured");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.starts_with("sqlite://"));
        assert_eq!(config.auth.token_ttl_hours, 24 * 7);
        // The secret has no default; startup must reject it.
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_layer_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "taskhub.yaml",
                r#"
server:
  host: 0.0.0.0
  port: 9000
auth:
  secret: test-secret
"#,
            )?;
            let config = AppConfig::load(Some(Path::new("taskhub.yaml"))).unwrap();
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.auth.secret, "test-secret");
            // Untouched sections keep their defaults.
            assert!(config.database.url.starts_with("sqlite://"));
            config.validate().unwrap();
            Ok(())
        });
    }

    #[test]
    fn env_layer_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("taskhub.yaml", "server:\n  port: 9000\n")?;
            jail.set_env("TASKHUB__SERVER__PORT", "9001");
            jail.set_env("TASKHUB__AUTH__SECRET", "env-secret");
            let config = AppConfig::load(Some(Path::new("taskhub.yaml"))).unwrap();
            assert_eq!(config.server.port, 9001);
            assert_eq!(config.auth.secret, "env-secret");
            Ok(())
        });
    }
}
