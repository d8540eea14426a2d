//! Client configuration and credentials
//!
//! Configuration is assembled once, before the client is built, from
//! defaults, an optional JSON file and command-line overrides. Credentials
//! always come from the environment and are kept apart from the file-backed
//! settings so they never end up serialized.

use crate::error::CaptureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Standard capture host.
pub const DEFAULT_API_URL: &str = "https://cdn.capture.page";

/// Edge host, tuned for lower latency.
pub const DEFAULT_EDGE_URL: &str = "https://edge.capture.page";

pub const KEY_ENV: &str = "CAPTURE_KEY";
pub const SECRET_ENV: &str = "CAPTURE_SECRET";

/// Host selection and transport settings for a [`crate::CaptureClient`]
///
/// # Examples
///
/// ```rust
/// use capture_tool::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     use_edge: true,
///     timeout: Duration::from_secs(10),
///     ..Default::default()
/// };
/// assert_eq!(config.base_url(), "https://edge.capture.page");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Standard host (default: `https://cdn.capture.page`)
    pub api_url: String,

    /// Edge host (default: `https://edge.capture.page`)
    pub edge_url: String,

    /// Send requests to the edge host instead of the standard one (default: false)
    ///
    /// Only the host part of the signed URL changes; the token is identical.
    pub use_edge: bool,

    /// End-to-end deadline for a single request (default: `30s`)
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request (default: `capture-tool/<version>`)
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            edge_url: DEFAULT_EDGE_URL.to_string(),
            use_edge: false,
            timeout: Duration::from_secs(30),
            user_agent: Some(format!("capture-tool/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl ClientConfig {
    /// Host that signed URLs are built against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        let url = if self.use_edge {
            &self.edge_url
        } else {
            &self.api_url
        };
        url.trim_end_matches('/')
    }

    pub fn from_json(content: &str) -> Result<Self, CaptureError> {
        serde_json::from_str(content)
            .map_err(|e| CaptureError::Configuration(format!("invalid config file: {e}")))
    }

    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.timeout.is_zero() {
            return Err(CaptureError::Configuration(
                "timeout must be greater than 0".to_string(),
            ));
        }

        for (name, host) in [("api_url", &self.api_url), ("edge_url", &self.edge_url)] {
            let parsed = url::Url::parse(host).map_err(|e| {
                CaptureError::Configuration(format!("{name} is not a valid URL ({host}): {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CaptureError::Configuration(format!(
                    "{name} must use http or https: {host}"
                )));
            }
        }

        Ok(())
    }
}

/// API key and secret shared with the capture service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Read `CAPTURE_KEY` and `CAPTURE_SECRET` from the process environment.
    pub fn from_env() -> Result<Self, CaptureError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CaptureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(KEY_ENV).unwrap_or_default();
        let secret = lookup(SECRET_ENV).unwrap_or_default();

        if key.is_empty() || secret.is_empty() {
            return Err(CaptureError::Configuration(format!(
                "{KEY_ENV} and {SECRET_ENV} environment variables are required"
            )));
        }

        Ok(Self { key, secret })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.edge_url, DEFAULT_EDGE_URL);
        assert!(!config.use_edge);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_follows_edge_flag() {
        let mut config = ClientConfig::default();
        assert_eq!(config.base_url(), "https://cdn.capture.page");
        config.use_edge = true;
        assert_eq!(config.base_url(), "https://edge.capture.page");
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = ClientConfig {
            api_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_from_json_partial_file_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"use_edge": true}"#).unwrap();
        assert!(config.use_edge);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_json_timeout_is_human_readable() {
        let config = ClientConfig::from_json(r#"{"timeout": "1m 30s"}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(90));

        let config = ClientConfig::from_json(r#"{"timeout": "750ms"}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_millis(750));

        let encoded = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(encoded["timeout"], "30s");
    }

    #[test]
    fn test_from_json_rejects_unitless_timeout() {
        assert!(ClientConfig::from_json(r#"{"timeout": "30"}"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ClientConfig::from_json("not json"),
            Err(CaptureError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_hosts() {
        let config = ClientConfig {
            api_url: "cdn.capture.page".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            edge_url: "ftp://edge.capture.page".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let env: HashMap<&str, &str> =
            HashMap::from([(KEY_ENV, "test_key"), (SECRET_ENV, "test_secret")]);
        let credentials =
            Credentials::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(credentials, Credentials::new("test_key", "test_secret"));
    }

    #[test]
    fn test_credentials_missing_or_empty() {
        assert!(Credentials::from_lookup(|_| None).is_err());

        let only_key = |name: &str| (name == KEY_ENV).then(|| "key".to_string());
        assert!(Credentials::from_lookup(only_key).is_err());

        let empty_secret = |name: &str| {
            Some(if name == KEY_ENV { "key" } else { "" }.to_string())
        };
        assert!(Credentials::from_lookup(empty_secret).is_err());
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let rendered = format!("{:?}", Credentials::new("key", "hunter2"));
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("hunter2"));
    }
}
