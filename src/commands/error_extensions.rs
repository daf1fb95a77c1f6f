//! # Error Extensions for Handled
//!
//! This module extends error types from configuration loading and input
//! handling to implement Handle<UserError> for consistent error property
//! extraction.

use handled::Handle;

use super::errors::UserError;
use crate::config::ConfigError;

/// Implement Handle<UserError> for ConfigError
impl Handle<UserError> for ConfigError {
    fn handle(&self) -> Option<UserError> {
        let hint = match self {
            ConfigError::Io { .. } => Some("Check the path given to --config.".to_string()),
            ConfigError::Parse { .. } => Some(
                "Config files hold endpoint_url, region and headers as JSON or YAML.".to_string(),
            ),
            ConfigError::MissingRegion => Some(
                "Pass --region, set NFWCTL_REGION or AWS_REGION, or pass --endpoint-url."
                    .to_string(),
            ),
            ConfigError::InvalidEndpoint { .. } => Some(
                "Endpoints look like https://network-firewall.us-east-1.amazonaws.com".to_string(),
            ),
        };

        Some(UserError {
            message: self.to_string(),
            usage_hint: hint,
        })
    }
}

/// Implement Handle<UserError> for serde_json::Error
impl Handle<UserError> for serde_json::Error {
    fn handle(&self) -> Option<UserError> {
        Some(UserError {
            message: format!("JSON parsing error: {}", self),
            usage_hint: Some(
                "Input for --input-json must be one JSON object, e.g. the output of a describe call"
                    .to_string(),
            ),
        })
    }
}

/// Implement Handle<UserError> for std::io::Error
impl Handle<UserError> for std::io::Error {
    fn handle(&self) -> Option<UserError> {
        let hint = match self.kind() {
            std::io::ErrorKind::NotFound => {
                Some("The specified file was not found. Check the file path.".to_string())
            }
            std::io::ErrorKind::PermissionDenied => {
                Some("Permission denied. Check file permissions.".to_string())
            }
            std::io::ErrorKind::InvalidData => Some("The file contains invalid data.".to_string()),
            _ => None,
        };

        Some(UserError {
            message: format!("File operation error: {}", self),
            usage_hint: hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_region_suggests_every_source() {
        let user = ConfigError::MissingRegion.handle().unwrap();
        assert_eq!(user.message, "No region or endpoint configured");
        assert!(user.usage_hint.unwrap().contains("NFWCTL_REGION"));
    }

    #[test]
    fn io_not_found_has_hint() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let user = err.handle().unwrap();
        assert_eq!(user.message, "File operation error: gone");
        assert!(user.usage_hint.is_some());
    }
}
