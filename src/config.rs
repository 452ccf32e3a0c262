//! Client configuration types and loading functionality.
//!
//! Configuration is built programmatically with [`ClientConfig::new`] and the
//! `with_*` setters, or loaded from a YAML file. It is validated once and
//! immutable after the client is constructed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, UnityError};

/// Default REST administration path segment.
pub const DEFAULT_REST_ADMIN_PATH: &str = "rest-admin";

/// Default API version segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Connection configuration for a [`UnityClient`](crate::UnityClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Unity IDM server (e.g. "https://idm.example.org").
    pub base_url: String,

    /// REST administration endpoint path segment.
    pub rest_admin_path: String,

    /// API version segment.
    pub api_version: String,

    /// Server certificate verification policy.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub tls: TlsPolicy,

    /// HTTP Basic credentials, applied to every request when present.
    pub auth: Option<Credentials>,

    /// Request timeout in seconds. No timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            rest_admin_path: DEFAULT_REST_ADMIN_PATH.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            tls: TlsPolicy::Verify,
            auth: None,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given server base URL with all other
    /// options at their defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the REST administration path segment.
    pub fn with_rest_admin_path(mut self, path: impl Into<String>) -> Self {
        self.rest_admin_path = path.into();
        self
    }

    /// Sets the API version segment.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the TLS verification policy.
    pub fn with_tls(mut self, tls: TlsPolicy) -> Self {
        self.tls = tls;
        self
    }

    /// Sets HTTP Basic credentials.
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Loads configuration from a YAML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            UnityError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_str(&content)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(content)
            .map_err(|e| UnityError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(UnityError::config("base_url is required"));
        }

        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| UnityError::config(format!("Invalid base_url: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UnityError::config(format!(
                "base_url must be an http(s) URL, got scheme '{}'",
                url.scheme()
            )));
        }

        if self.rest_admin_path.is_empty() {
            return Err(UnityError::config("rest_admin_path must not be empty"));
        }
        if self.api_version.is_empty() {
            return Err(UnityError::config("api_version must not be empty"));
        }

        Ok(())
    }

    /// Returns the computed API base URL: base URL joined with the REST
    /// administration path and API version segments.
    pub fn api_base_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.rest_admin_path,
            self.api_version
        )
    }
}

/// Server certificate verification policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsPolicy {
    /// Verify against the built-in trust roots.
    #[default]
    Verify,

    /// Verify against the PEM bundle at the given path instead of the
    /// built-in trust roots.
    #[serde(rename = "ca_bundle")]
    CaBundle(PathBuf),

    /// Disable certificate verification.
    Insecure,
}

/// HTTP Basic credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username.
    pub username: String,

    /// Password or API secret.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("https://idm.example.org");
        assert_eq!(config.base_url, "https://idm.example.org");
        assert_eq!(config.rest_admin_path, "rest-admin");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.tls, TlsPolicy::Verify);
        assert!(config.auth.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_api_base_url() {
        let config = ClientConfig::new("https://idm.example.org");
        assert_eq!(config.api_base_url(), "https://idm.example.org/rest-admin/v1");
    }

    #[test]
    fn test_api_base_url_strips_trailing_slash() {
        let config = ClientConfig::new("https://idm.example.org/");
        assert_eq!(config.api_base_url(), "https://idm.example.org/rest-admin/v1");
    }

    #[test]
    fn test_api_base_url_custom_segments() {
        let config = ClientConfig::new("https://idm.example.org")
            .with_rest_admin_path("admin")
            .with_api_version("v2");
        assert_eq!(config.api_base_url(), "https://idm.example.org/admin/v2");
    }

    #[test]
    fn test_with_auth() {
        let config = ClientConfig::new("https://idm.example.org").with_auth("admin", "secret");
        let auth = config.auth.unwrap();
        assert_eq!(auth.username, "admin");
        assert_eq!(auth.password, "secret");
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = ClientConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let config = ClientConfig::new("idm.example.org");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = ClientConfig::new("ftp://idm.example.org");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_segments() {
        let config = ClientConfig::new("https://idm.example.org").with_rest_admin_path("");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("https://idm.example.org").with_api_version("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
base_url: https://idm.example.org
api_version: v2
tls: insecure
auth:
  username: admin
  password: secret
timeout_secs: 10
"#;
        let config = ClientConfig::load_from_str(yaml).unwrap();
        assert_eq!(config.base_url, "https://idm.example.org");
        assert_eq!(config.rest_admin_path, "rest-admin");
        assert_eq!(config.api_version, "v2");
        assert_eq!(config.tls, TlsPolicy::Insecure);
        assert_eq!(config.auth.unwrap().username, "admin");
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn test_load_from_str_ca_bundle() {
        let yaml = r#"
base_url: https://idm.example.org
tls:
  ca_bundle: /etc/ssl/idm-ca.pem
"#;
        let config = ClientConfig::load_from_str(yaml).unwrap();
        assert_eq!(
            config.tls,
            TlsPolicy::CaBundle(PathBuf::from("/etc/ssl/idm-ca.pem"))
        );
    }

    #[test]
    fn test_load_from_str_invalid_config() {
        assert!(ClientConfig::load_from_str("base_url: ''").is_err());
        assert!(ClientConfig::load_from_str(":::").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://idm.example.org").unwrap();

        let config = ClientConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.base_url, "https://idm.example.org");
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = ClientConfig::load_from_path("/nonexistent/config.yaml").unwrap_err();
        assert!(format!("{}", err).contains("Failed to read config file"));
    }
}
