//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services. The
//! helpers below take the raw environment values as arguments instead of reading process-wide
//! environment variables themselves, so tests can exercise them without touching global state.

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_REST_API_URL};
use crate::{ClientError, ClientResult};
use reqwest::Url;
use std::time::Duration;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base_url: Url,
    request_timeout: Duration,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The base URL must use `http` or `https`. A trailing `/` is appended to its path when
    /// missing so that resource paths are resolved beneath it.
    pub fn new(mut api_base_url: Url, request_timeout: Duration) -> ClientResult<Self> {
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(format!(
                "unsupported scheme '{}' (expected http or https)",
                api_base_url.scheme()
            )));
        }

        if request_timeout.is_zero() {
            return Err(ClientError::InvalidInput(
                "request timeout must be greater than zero".into(),
            ));
        }

        if !api_base_url.path().ends_with('/') {
            let path = format!("{}/", api_base_url.path());
            api_base_url.set_path(&path);
        }

        Ok(Self {
            api_base_url,
            request_timeout,
        })
    }

    /// Build a configuration from raw `REST_API_URL` and `REST_API_TIMEOUT_SECS` values.
    pub fn from_env_values(
        api_base_url: Option<String>,
        request_timeout_secs: Option<String>,
    ) -> ClientResult<Self> {
        Self::new(
            api_base_url_from_env_value(api_base_url)?,
            request_timeout_from_env_value(request_timeout_secs)?,
        )
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Parse the REST API base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default local backend URL.
pub fn api_base_url_from_env_value(value: Option<String>) -> ClientResult<Url> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_API_URL.to_string());

    Url::parse(&value).map_err(|e| ClientError::InvalidBaseUrl(format!("{value}: {e}")))
}

/// Parse the request timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn request_timeout_from_env_value(value: Option<String>) -> ClientResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v.parse::<u64>().map_err(|_| {
            ClientError::InvalidInput(format!(
                "REST_API_TIMEOUT_SECS must be a whole number of seconds, got '{v}'"
            ))
        })?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_values_missing() {
        let cfg = ClientConfig::from_env_values(None, None).expect("defaults should be valid");
        assert_eq!(cfg.api_base_url().as_str(), DEFAULT_REST_API_URL);
        assert_eq!(
            cfg.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = ClientConfig::from_env_values(Some("   ".into()), Some("".into()))
            .expect("blank values should use defaults");
        assert_eq!(cfg.api_base_url().as_str(), DEFAULT_REST_API_URL);
    }

    #[test]
    fn test_trailing_slash_is_added() {
        let cfg = ClientConfig::from_env_values(
            Some("https://clinic.example.com/petclinic/api".into()),
            Some("5".into()),
        )
        .expect("config should be valid");
        assert_eq!(
            cfg.api_base_url().as_str(),
            "https://clinic.example.com/petclinic/api/"
        );
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = ClientConfig::from_env_values(Some("ftp://clinic.example.com/".into()), None)
            .expect_err("ftp should be rejected");
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let err = api_base_url_from_env_value(Some("not a url".into()))
            .expect_err("garbage should be rejected");
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_rejects_bad_timeouts() {
        assert!(request_timeout_from_env_value(Some("soon".into())).is_err());
        assert!(ClientConfig::from_env_values(None, Some("0".into())).is_err());
    }
}
