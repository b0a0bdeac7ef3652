//! Uploader configuration.
//!
//! Stored as TOML, for example:
//!
//! ```toml
//! host = "ftp.example.com"
//! user = "deploy"
//! password = "secret"
//! port = 2121
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ConnectionParams;

/// Connection settings as read from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Server host name or address.
    #[serde(default)]
    pub host: String,

    /// Login user.
    #[serde(default = "default_user")]
    pub user: String,

    /// Login password (empty = anonymous).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Control connection port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Control connection timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user() -> String {
    "anonymous".into()
}

fn default_port() -> u16 {
    crate::DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    crate::DEFAULT_TIMEOUT.as_secs()
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: default_user(),
            password: String::new(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UploaderConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), host = %config.host, "configuration loaded");
        Ok(config)
    }

    /// Converts into connection parameters. The host must be set.
    pub fn to_params(&self) -> Result<ConnectionParams, ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Missing("host"));
        }

        Ok(ConnectionParams::new(&self.host, &self.user)
            .with_password(&self.password)
            .with_port(self.port)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = UploaderConfig::default();
        assert!(config.host.is_empty());
        assert_eq!(config.user, "anonymous");
        assert!(config.password.is_empty());
        assert_eq!(config.port, 21);
        assert_eq!(config.timeout_secs, 90);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = UploaderConfig::from_toml_str(r#"host = "ftp.local""#).unwrap();
        assert_eq!(config.host, "ftp.local");
        assert_eq!(config.user, "anonymous");
        assert_eq!(config.port, 21);
        assert_eq!(config.timeout_secs, 90);
    }

    #[test]
    fn full_toml() {
        let config = UploaderConfig::from_toml_str(
            r#"
host = "10.0.0.5"
user = "deploy"
password = "pw"
port = 2121
timeout_secs = 5
"#,
        )
        .unwrap();

        let params = config.to_params().unwrap();
        assert_eq!(params.host, "10.0.0.5");
        assert_eq!(params.user, "deploy");
        assert_eq!(params.password, "pw");
        assert_eq!(params.port, 2121);
        assert_eq!(params.timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = UploaderConfig {
            host: "ftp.local".into(),
            user: "deploy".into(),
            password: String::new(),
            port: 2121,
            timeout_secs: 15,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        // Anonymous access leaves no password line behind.
        assert!(!toml_str.contains("password"));

        let parsed = UploaderConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_host_rejected() {
        let config = UploaderConfig::default();
        assert!(matches!(
            config.to_params(),
            Err(ConfigError::Missing("host"))
        ));
    }

    #[test]
    fn invalid_toml_rejected() {
        let result = UploaderConfig::from_toml_str("port = \"not a number\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("upload.toml");
        std::fs::write(&path, "host = \"ftp.local\"\nuser = \"bob\"\n").unwrap();

        let config = UploaderConfig::from_file(&path).unwrap();
        assert_eq!(config.host, "ftp.local");
        assert_eq!(config.user, "bob");
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = UploaderConfig::from_file(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
