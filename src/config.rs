//! Client configuration for nfwctl.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. a configuration file (JSON or YAML) given with `--config`;
//! 2. the environment: `NFWCTL_ENDPOINT_URL`, then `NFWCTL_REGION` or `AWS_REGION`;
//! 3. command-line options.
//!
//! ```yaml
//! region: eu-west-1
//! endpoint_url: https://network-firewall.eu-west-1.amazonaws.com
//! headers:
//!   x-gateway-token: abc123
//! ```

use std::path::Path;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "NFWCTL_ENDPOINT_URL";

/// Environment variable overriding the region.
pub const REGION_ENV: &str = "NFWCTL_REGION";

/// Fallback region variable shared with other cloud tooling.
pub const FALLBACK_REGION_ENV: &str = "AWS_REGION";

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// Path of the file.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// The configuration file is neither valid JSON nor valid YAML.
    Parse {
        /// Path of the file.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// Neither an endpoint nor a region is configured.
    MissingRegion,
    /// The endpoint is not a usable http(s) URL.
    InvalidEndpoint {
        /// The endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "Failed to read config {}: {}", path, message),
            Self::Parse { path, message } => {
                write!(f, "Failed to parse config {}: {}", path, message)
            }
            Self::MissingRegion => write!(f, "No region or endpoint configured"),
            Self::InvalidEndpoint { endpoint, reason } => {
                write!(f, "Invalid endpoint '{}': {}", endpoint, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where and how to reach the management API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Explicit endpoint; overrides the region-derived default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Region of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// HTTP headers to include with every request.
    #[serde(default, with = "header_map_serde")]
    pub headers: HeaderMap,
}

impl ClientConfig {
    /// Loads configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, `.yaml`/`.yml` as YAML;
    /// anything else is tried as JSON, then as YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&display, &content)
    }

    /// Parses configuration text, using `path` to pick the format.
    pub fn parse(path: &str, content: &str) -> Result<Self, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_string(),
            message,
        };
        if path.ends_with(".json") {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yml::from_str(content).map_err(|e| parse_error(e.to_string()))
        } else if let Ok(config) = serde_json::from_str::<ClientConfig>(content) {
            Ok(config)
        } else {
            serde_yml::from_str(content).map_err(|_| {
                parse_error("Ensure the file is valid JSON or YAML".to_string())
            })
        }
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = non_empty(ENDPOINT_ENV) {
            self.endpoint_url = Some(endpoint);
        }
        if let Some(region) = non_empty(REGION_ENV).or_else(|| non_empty(FALLBACK_REGION_ENV)) {
            self.region = Some(region);
        }
        self
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, endpoint_url: Option<&str>, region: Option<&str>) -> Self {
        if let Some(endpoint) = endpoint_url {
            self.endpoint_url = Some(endpoint.to_string());
        }
        if let Some(region) = region {
            self.region = Some(region.to_string());
        }
        self
    }

    /// Resolves the endpoint URL.
    ///
    /// An explicit endpoint wins; otherwise the regional default
    /// `https://network-firewall.<region>.amazonaws.com/` is used.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = match (&self.endpoint_url, &self.region) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(region)) => format!("https://network-firewall.{}.amazonaws.com/", region),
            (None, None) => return Err(ConfigError::MissingRegion),
        };
        let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: raw.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: raw,
                reason: "scheme must be http or https".to_string(),
            });
        }
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: raw,
                reason: "missing host".to_string(),
            });
        }
        Ok(url)
    }
}

/// Custom serialization for HeaderMap to JSON or YAML maps.
mod header_map_serde {
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer, ser::SerializeMap};
    use std::collections::BTreeMap;

    pub fn serialize<S>(headers: &HeaderMap, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(headers.len()))?;
        for (name, value) in headers.iter() {
            let key = name.as_str();
            let val = value.to_str().unwrap_or("");
            map.serialize_entry(key, val)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut headers = HeaderMap::new();
        for (key, value) in map {
            let name = key
                .parse::<HeaderName>()
                .map_err(|e| D::Error::custom(format!("invalid header name {}: {}", key, e)))?;
            let value = value
                .parse::<HeaderValue>()
                .map_err(|e| D::Error::custom(format!("invalid value for {}: {}", key, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_derives_default_endpoint() {
        let config = ClientConfig::default().with_overrides(None, Some("eu-west-1"));
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://network-firewall.eu-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn explicit_endpoint_wins_over_region() {
        let config = ClientConfig::default().with_overrides(Some("http://127.0.0.1:4566"), Some("us-east-1"));
        assert_eq!(config.endpoint().unwrap().as_str(), "http://127.0.0.1:4566/");
    }

    #[test]
    fn missing_region_and_bad_endpoints_are_rejected() {
        assert_eq!(
            ClientConfig::default().endpoint(),
            Err(ConfigError::MissingRegion)
        );
        let ftp = ClientConfig::default().with_overrides(Some("ftp://example.com"), None);
        assert!(matches!(
            ftp.endpoint(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        let garbage = ClientConfig::default().with_overrides(Some("not a url"), None);
        assert!(garbage.endpoint().is_err());
    }

    #[test]
    fn parses_yaml_with_headers() {
        let yaml = "region: ap-south-1\nheaders:\n  x-gateway-token: abc123\n";
        let config = ClientConfig::parse("nfwctl.yaml", yaml).unwrap();
        assert_eq!(config.region.as_deref(), Some("ap-south-1"));
        assert_eq!(config.headers.get("x-gateway-token").unwrap(), "abc123");
    }

    #[test]
    fn parses_json_and_sniffs_unknown_extensions() {
        let json = r#"{"endpoint_url": "http://localhost:9000"}"#;
        let config = ClientConfig::parse("nfwctl.json", json).unwrap();
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert!(config.headers.is_empty());

        let sniffed = ClientConfig::parse("nfwctl.conf", "region: us-west-2\n").unwrap();
        assert_eq!(sniffed.region.as_deref(), Some("us-west-2"));

        assert!(matches!(
            ClientConfig::parse("nfwctl.json", "region: us-west-2"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_invalid_header_names() {
        let yaml = "headers:\n  \"bad header\": x\n";
        assert!(ClientConfig::parse("nfwctl.yaml", yaml).is_err());
    }

    #[test]
    fn environment_overrides_file_and_options_override_environment() {
        let file = ClientConfig::parse("c.yaml", "region: us-east-1\n").unwrap();
        let env = |name: &str| match name {
            FALLBACK_REGION_ENV => Some("eu-central-1".to_string()),
            REGION_ENV => Some("".to_string()),
            _ => None,
        };
        let config = file.with_env(env);
        assert_eq!(config.region.as_deref(), Some("eu-central-1"));

        let config = config.with_overrides(None, Some("sa-east-1"));
        assert_eq!(config.region.as_deref(), Some("sa-east-1"));
    }

    #[test]
    fn headers_serialize_as_a_map() {
        let config = ClientConfig::parse("c.yaml", "headers:\n  x-trace: enabled\n").unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["headers"]["x-trace"], "enabled");
    }
}
