//! Error types for nfwctl invocations.
//!
//! Usage errors are raised while binding and validating, before any request
//! leaves the process. Remote errors come back from the single call to the
//! management API and are passed through as-is.

/// Errors reported by the remote management client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The service answered with an error document.
    Service {
        /// HTTP status of the response.
        status: u16,
        /// Service error code, e.g. `ResourceNotFoundException`.
        code: String,
        /// Human readable message from the service.
        message: String,
    },
    /// The endpoint host name could not be resolved.
    NameResolution {
        /// The endpoint that was being contacted.
        endpoint: String,
        /// The region the endpoint was derived from, if any.
        region: Option<String>,
        /// The underlying transport error text.
        details: String,
    },
    /// Any other transport failure (connect, TLS, timeout, broken body).
    Transport(String),
    /// The response body was not a JSON document.
    Decode(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service {
                status,
                code,
                message,
            } => write!(f, "{} (HTTP {}): {}", code, status, message),
            Self::NameResolution {
                endpoint, region, ..
            } => match region {
                Some(region) => write!(
                    f,
                    "Name resolution failure attempting to reach service {} in region {} (as supplied to --region or from configuration)",
                    endpoint, region
                ),
                None => write!(
                    f,
                    "Name resolution failure attempting to reach service {}",
                    endpoint
                ),
            },
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Decode(msg) => write!(f, "Could not decode service response: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Errors that terminate a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    /// No operation is registered under the given name.
    UnknownOperation(String),
    /// A binding named a parameter the operation does not declare.
    UnknownParameter {
        /// The operation being invoked.
        operation: String,
        /// The offending parameter name.
        parameter: String,
    },
    /// A command-line word was not of the form `Name=Value`.
    MalformedBinding(String),
    /// A required parameter was not bound, or was bound to null.
    MissingParameter {
        /// The operation being invoked.
        operation: String,
        /// The required parameter.
        parameter: String,
    },
    /// None of a set of mutually substitutable parameters was bound.
    MissingAlternative {
        /// The operation being invoked.
        operation: String,
        /// The parameters of which at least one must be bound.
        parameters: Vec<String>,
    },
    /// A bound value could not be parsed or failed validation.
    InvalidValue {
        /// The parameter whose value is invalid.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// A response-field selector and an echo selector were both requested.
    ConflictingSelectors {
        /// The operation being invoked.
        operation: String,
    },
    /// A selector names something the operation cannot produce.
    UnknownSelector {
        /// The operation being invoked.
        operation: String,
        /// The selector as supplied.
        selector: String,
        /// Why the selector was rejected.
        reason: String,
    },
    /// A mutating operation needed approval but no operator could be asked.
    ConfirmationUnavailable {
        /// The operation awaiting approval.
        operation: String,
        /// Why the question could not be put.
        reason: String,
    },
    /// The remote call failed.
    Remote(RemoteError),
    /// The invocation was cancelled at the confirmation prompt or while
    /// waiting for the remote call.
    Cancelled {
        /// The operation whose call was abandoned.
        operation: String,
    },
}

impl InvocationError {
    /// Returns true for errors detected before any remote call is attempted.
    pub fn is_usage(&self) -> bool {
        !matches!(self, Self::Remote(_) | Self::Cancelled { .. })
    }
}

impl std::fmt::Display for InvocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "Unknown operation '{}'", name),
            Self::UnknownParameter {
                operation,
                parameter,
            } => write!(
                f,
                "Operation {} has no parameter named '{}'",
                operation, parameter
            ),
            Self::MalformedBinding(word) => {
                write!(f, "Expected Name=Value, got '{}'", word)
            }
            Self::MissingParameter {
                operation,
                parameter,
            } => write!(
                f,
                "Operation {} requires parameter '{}'",
                operation, parameter
            ),
            Self::MissingAlternative {
                operation,
                parameters,
            } => write!(
                f,
                "Operation {} requires at least one of: {}",
                operation,
                parameters.join(", ")
            ),
            Self::InvalidValue { parameter, reason } => {
                write!(f, "Invalid value for '{}': {}", parameter, reason)
            }
            Self::ConflictingSelectors { operation } => write!(
                f,
                "Operation {}: --select and --pass-thru cannot be used together",
                operation
            ),
            Self::UnknownSelector {
                operation,
                selector,
                reason,
            } => write!(
                f,
                "Invalid selector '{}' for {}: {}",
                selector, operation, reason
            ),
            Self::Remote(err) => write!(f, "{}", err),
            Self::ConfirmationUnavailable { operation, reason } => {
                write!(f, "Cannot confirm {}: {}", operation, reason)
            }
            Self::Cancelled { operation } => write!(f, "{} was cancelled", operation),
        }
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RemoteError> for InvocationError {
    fn from(err: RemoteError) -> Self {
        Self::Remote(err)
    }
}
