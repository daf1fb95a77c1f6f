//! # Command Error Handling
//!
//! This module provides error handling utilities for nfwctl commands
//! using the handled crate for consistent error property extraction.

use handled::Handle;

use crate::errors::{InvocationError, RemoteError};

/// User-friendly error information that can be extracted from various error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    /// The main error message to display to the user
    pub message: String,
    /// Optional usage hint to help the user correct the error
    pub usage_hint: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Implements Handle<UserError> for itself to allow extraction
impl Handle<UserError> for UserError {
    fn handle(&self) -> Option<UserError> {
        Some(self.clone())
    }
}

impl Handle<UserError> for RemoteError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            RemoteError::Service { status, .. } => match status {
                400 => Some("Invalid request. Check parameter values and the update token.".to_string()),
                401 | 403 => Some(
                    "Access denied. Check the credentials and permissions of the gateway or signing proxy."
                        .to_string(),
                ),
                404 => Some("The resource was not found. Check the name or ARN and the region.".to_string()),
                409 => Some(
                    "The resource changed or is busy. Describe it again for a fresh update token."
                        .to_string(),
                ),
                429 => Some("Too many requests. Wait a moment and try again.".to_string()),
                500..=599 => {
                    Some("Server error. The service may be temporarily unavailable.".to_string())
                }
                _ => None,
            },
            RemoteError::NameResolution { .. } => {
                Some("Check the value of --region or --endpoint-url.".to_string())
            }
            RemoteError::Transport(_) => {
                Some("Check network connectivity and the endpoint URL.".to_string())
            }
            RemoteError::Decode(_) => {
                Some("The endpoint did not answer with JSON. Is it the firewall API?".to_string())
            }
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

impl Handle<UserError> for InvocationError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            InvocationError::UnknownOperation(_) => {
                Some("Run 'nfwctl operations' to list the available operations.".to_string())
            }
            InvocationError::UnknownParameter { operation, .. }
            | InvocationError::MissingParameter { operation, .. }
            | InvocationError::MissingAlternative { operation, .. } => Some(format!(
                "Run 'nfwctl help {}' to see its parameters.",
                operation
            )),
            InvocationError::InvalidValue { .. } => Some(
                "Lists and objects take JSON, e.g. Tag='{\"Key\":\"env\",\"Value\":\"prod\"}'."
                    .to_string(),
            ),
            InvocationError::MalformedBinding(_) => {
                Some("Bind parameters as Name=Value, e.g. FirewallName=edge-fw.".to_string())
            }
            InvocationError::ConflictingSelectors { .. } => {
                Some("Use either --select or --pass-thru.".to_string())
            }
            InvocationError::UnknownSelector { .. } => Some(
                "Select '*', a response field such as Firewall.FirewallArn, or ^Parameter."
                    .to_string(),
            ),
            InvocationError::ConfirmationUnavailable { .. } => Some(
                "Confirmation needs a terminal; pass --force to run without one.".to_string(),
            ),
            InvocationError::Remote(remote) => return remote.handle(),
            InvocationError::Cancelled { .. } => Some(
                "The service may still apply the request. Describe the resource before retrying."
                    .to_string(),
            ),
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// Enhanced error formatting for CLI output
pub fn format_cli_error<E>(error: &E) -> String
where
    E: Handle<UserError> + std::fmt::Display,
{
    if let Some(user_error) = error.handle() {
        let mut output = format!("Error: {}", user_error.message);
        if let Some(hint) = user_error.usage_hint {
            output.push_str(&format!("\nHint: {}", hint));
        }
        output
    } else {
        format!("Error: {}", error)
    }
}

/// Prints an error with its hint to stderr and exits.
pub fn exit_with_user_error<E>(error: &E) -> !
where
    E: Handle<UserError> + std::fmt::Display,
{
    eprintln!("{}", format_cli_error(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_get_status_hints() {
        let err = InvocationError::Remote(RemoteError::Service {
            status: 404,
            code: "ResourceNotFoundException".to_string(),
            message: "Firewall fw9 not found".to_string(),
        });
        let formatted = format_cli_error(&err);
        assert!(formatted.starts_with(
            "Error: ResourceNotFoundException (HTTP 404): Firewall fw9 not found"
        ));
        assert!(formatted.contains("Hint: The resource was not found"));
    }

    #[test]
    fn usage_errors_point_at_help() {
        let err = InvocationError::MissingParameter {
            operation: "DeleteFirewall".to_string(),
            parameter: "FirewallName".to_string(),
        };
        let user = err.handle().unwrap();
        assert_eq!(
            user.usage_hint.as_deref(),
            Some("Run 'nfwctl help DeleteFirewall' to see its parameters.")
        );
    }

    #[test]
    fn missing_terminal_suggests_force() {
        let err = InvocationError::ConfirmationUnavailable {
            operation: "DeleteFirewall".to_string(),
            reason: "no answer before end of input".to_string(),
        };
        assert_eq!(
            format_cli_error(&err),
            "Error: Cannot confirm DeleteFirewall: no answer before end of input\n\
             Hint: Confirmation needs a terminal; pass --force to run without one."
        );
    }

    #[test]
    fn unknown_statuses_have_no_hint() {
        let err = RemoteError::Service {
            status: 418,
            code: "Teapot".to_string(),
            message: "short and stout".to_string(),
        };
        assert_eq!(format_cli_error(&err), "Error: Teapot (HTTP 418): short and stout");
    }
}
