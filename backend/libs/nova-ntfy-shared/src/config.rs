use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::client::NtfyClient;
use crate::errors::ConfigError;
use crate::transport::ReqwestTransport;

pub const ENV_HOST: &str = "NTFY_HOST";
pub const ENV_TOKEN: &str = "NTFY_TOKEN";
pub const ENV_TOPIC: &str = "NTFY_TOPIC";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "NTFY_REQUEST_TIMEOUT_SECS";

/// ntfy relay configuration
#[derive(Clone)]
pub struct NtfyConfig {
    pub host: String,
    pub token: String,
    pub topic: String,
    /// Per-request timeout applied by the HTTP client. `None` keeps reqwest's default.
    pub request_timeout: Option<Duration>,
}

impl NtfyConfig {
    /// Create new ntfy configuration
    pub fn new(host: String, token: String, topic: String) -> Self {
        Self {
            host,
            token,
            topic,
            request_timeout: None,
        }
    }

    /// Set per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load from `NTFY_HOST`, `NTFY_TOKEN`, `NTFY_TOPIC` and the optional
    /// `NTFY_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`NtfyConfig::from_env`], after loading a `.env` file if present.
    pub fn from_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let request_timeout = match lookup(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    name: ENV_REQUEST_TIMEOUT_SECS,
                    reason: format!("{e}"),
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            host: required(ENV_HOST)?,
            token: required(ENV_TOKEN)?,
            topic: required(ENV_TOPIC)?,
            request_timeout,
        })
    }

    /// Build a client for this relay
    pub fn client(&self) -> Result<NtfyClient, ConfigError> {
        let transport = match self.request_timeout {
            Some(timeout) if timeout.is_zero() => return Err(ConfigError::ZeroTimeout(timeout)),
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        Ok(NtfyClient::with_transport(
            self.host.clone(),
            self.token.clone(),
            Arc::new(transport),
        ))
    }
}

impl fmt::Debug for NtfyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NtfyConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("topic", &self.topic)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let cfg = NtfyConfig::from_lookup(lookup_from(&[
            ("NTFY_HOST", "https://ntfy.example.com"),
            ("NTFY_TOKEN", "tk_abc"),
            ("NTFY_TOPIC", "alerts"),
            ("NTFY_REQUEST_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(cfg.host, "https://ntfy.example.com");
        assert_eq!(cfg.token, "tk_abc");
        assert_eq!(cfg.topic, "alerts");
        assert_eq!(cfg.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let result = NtfyConfig::from_lookup(lookup_from(&[
            ("NTFY_HOST", "https://ntfy.example.com"),
            ("NTFY_TOPIC", "alerts"),
        ]));
        assert!(matches!(result, Err(ConfigError::Missing("NTFY_TOKEN"))));
    }

    #[test]
    fn test_from_lookup_empty_value_is_missing() {
        let result = NtfyConfig::from_lookup(lookup_from(&[
            ("NTFY_HOST", "  "),
            ("NTFY_TOKEN", "tk"),
            ("NTFY_TOPIC", "alerts"),
        ]));
        assert!(matches!(result, Err(ConfigError::Missing("NTFY_HOST"))));
    }

    #[test]
    fn test_from_lookup_invalid_timeout() {
        let result = NtfyConfig::from_lookup(lookup_from(&[
            ("NTFY_HOST", "https://ntfy.example.com"),
            ("NTFY_TOKEN", "tk"),
            ("NTFY_TOPIC", "alerts"),
            ("NTFY_REQUEST_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "NTFY_REQUEST_TIMEOUT_SECS",
                ..
            })
        ));
    }

    #[test]
    fn test_client_rejects_zero_timeout() {
        let cfg = NtfyConfig::new(
            "https://ntfy.example.com".into(),
            "tk".into(),
            "alerts".into(),
        )
        .with_request_timeout(Duration::ZERO);
        assert!(matches!(cfg.client(), Err(ConfigError::ZeroTimeout(_))));
    }

    #[test]
    fn test_client_from_config() {
        let cfg = NtfyConfig::new(
            "https://ntfy.example.com".into(),
            "tk".into(),
            "alerts".into(),
        )
        .with_request_timeout(Duration::from_secs(10));
        let client = cfg.client().unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("https://ntfy.example.com"));
        assert!(!debug.contains("\"tk\""));
    }

    #[test]
    fn test_debug_redacts_token() {
        let cfg = NtfyConfig::new("https://h".into(), "tk_secret".into(), "t".into());
        assert!(!format!("{cfg:?}").contains("tk_secret"));
    }
}
