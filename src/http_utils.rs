//! # Remote Management Client
//!
//! [`RemoteClient`] is the seam between the dispatcher and the management
//! API: one method, one request document in, one response document out.
//! [`HttpRemoteClient`] implements it over HTTP with the JSON 1.0 protocol
//! the firewall service speaks:
//!
//! ```text
//! POST / HTTP/1.1
//! Content-Type: application/x-amz-json-1.0
//! X-Amz-Target: NetworkFirewall_20201112.DescribeFirewall
//!
//! {"FirewallName":"fw1"}
//! ```
//!
//! Error documents are mapped to [`RemoteError::Service`]. Host names that
//! cannot be resolved are reported as [`RemoteError::NameResolution`] so the
//! operator can tell a wrong region apart from a failing service.

use std::error::Error;
use std::future::Future;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::errors::RemoteError;
use crate::request::Request;

/// Content type of the JSON 1.0 protocol.
pub const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Prefix of the `X-Amz-Target` header value.
pub const TARGET_PREFIX: &str = "NetworkFirewall_20201112";

/// Header carrying the operation name.
pub const TARGET_HEADER: &str = "x-amz-target";

/// Header some front ends use for the error code.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// A client able to invoke management API operations.
pub trait RemoteClient: Send + Sync {
    /// Issues one call of `operation` with `request` and returns the response document.
    fn invoke(
        &self,
        operation: &str,
        request: Request,
    ) -> impl Future<Output = Result<Value, RemoteError>> + Send;
}

/// [`RemoteClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    client: Client,
    endpoint: Url,
    region: Option<String>,
    headers: HeaderMap,
}

impl HttpRemoteClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Arguments
    /// * `endpoint` - Base URL of the management API
    /// * `region` - Region the endpoint belongs to, used in diagnostics
    /// * `headers` - Static headers added to every request
    pub fn new(endpoint: Url, region: Option<String>, headers: HeaderMap) -> Self {
        Self::with_client(Client::new(), endpoint, region, headers)
    }

    /// Like [`HttpRemoteClient::new`] with a preconfigured reqwest client.
    pub fn with_client(
        client: Client,
        endpoint: Url,
        region: Option<String>,
        headers: HeaderMap,
    ) -> Self {
        Self {
            client,
            endpoint,
            region,
            headers,
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Maps a transport error, singling out failed name resolution.
    fn transport_error(&self, err: reqwest::Error) -> RemoteError {
        if is_name_resolution(&err) {
            RemoteError::NameResolution {
                endpoint: self.endpoint.to_string(),
                region: self.region.clone(),
                details: error_chain(&err),
            }
        } else {
            RemoteError::Transport(error_chain(&err))
        }
    }

    /// Handles HTTP response, decoding success or mapping the error document
    async fn handle_response(&self, response: Response) -> Result<Value, RemoteError> {
        let status = response.status();
        let header_code = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            if body.is_empty() {
                return Ok(Value::Object(Default::default()));
            }
            return serde_json::from_slice(&body).map_err(|e| RemoteError::Decode(e.to_string()));
        }

        let document: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let code = document
            .get("__type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(header_code)
            .map(|c| normalize_error_code(&c))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("UnknownError")
                    .replace(' ', "")
            });
        let message = document
            .get("message")
            .or_else(|| document.get("Message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(&body).trim().to_string();
                if text.is_empty() {
                    "No error details".to_string()
                } else {
                    text
                }
            });

        Err(RemoteError::Service {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

impl RemoteClient for HttpRemoteClient {
    async fn invoke(&self, operation: &str, request: Request) -> Result<Value, RemoteError> {
        let target = format!("{}.{}", TARGET_PREFIX, operation);
        let body = serde_json::to_vec(&Value::Object(request))
            .map_err(|e| RemoteError::Transport(format!("could not encode request: {}", e)))?;

        tracing::debug!(endpoint = %self.endpoint, target = %target, bytes = body.len(), "sending request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .header(TARGET_HEADER, target)
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        tracing::debug!(status = response.status().as_u16(), "received response");
        self.handle_response(response).await
    }
}

/// Strips the namespace and `:` suffix from an error code.
///
/// `com.amazonaws.networkfirewall#InvalidRequestException` and
/// `InvalidRequestException:http://internal` both become `InvalidRequestException`.
pub fn normalize_error_code(raw: &str) -> String {
    let code = raw.rsplit('#').next().unwrap_or(raw);
    let code = code.split(':').next().unwrap_or(code);
    code.trim().to_string()
}

/// Returns true if the error, or anything in its source chain, is a failed DNS lookup.
pub fn is_name_resolution(err: &reqwest::Error) -> bool {
    if err.is_status() || err.is_decode() || err.is_body() {
        return false;
    }
    let mut source: Option<&(dyn Error + 'static)> = err.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_ascii_lowercase();
        if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
            || text.contains("no such host")
            || text.contains("failure in name resolution")
        {
            return true;
        }
        source = cause.source();
    }
    false
}

fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
