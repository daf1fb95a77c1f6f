//! Issues the single remote call of an invocation.
//!
//! The call is awaited to completion unless the invocation's cancellation
//! token fires first, in which case the invoker stops waiting and reports
//! [`InvocationError::Cancelled`]. Nothing is retried and nothing is rolled
//! back.

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::errors::InvocationError;
use crate::http_utils::RemoteClient;
use crate::request::Request;

/// Sends `request` as `operation` through `client`, honouring `cancel`.
pub async fn invoke<C>(
    client: &C,
    operation: &str,
    request: Request,
    cancel: Option<&CancellationToken>,
) -> Result<Value, InvocationError>
where
    C: RemoteClient,
{
    let call = client.invoke(operation, request);
    let outcome = match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    tracing::warn!(operation, "invocation cancelled while waiting for the service");
                    return Err(InvocationError::Cancelled {
                        operation: operation.to_string(),
                    });
                }
                outcome = call => outcome,
            }
        }
        None => call.await,
    };

    outcome.map_err(|err| {
        tracing::debug!(operation, error = %err, "remote call failed");
        InvocationError::Remote(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RemoteError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SlowClient {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl RemoteClient for SlowClient {
        async fn invoke(&self, operation: &str, _request: Request) -> Result<Value, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(json!({"Operation": operation}))
        }
    }

    #[tokio::test]
    async fn completes_without_token() {
        let client = SlowClient {
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(1),
        };
        let value = invoke(&client, "ListFirewalls", Request::new(), None)
            .await
            .unwrap();
        assert_eq!(value, json!({"Operation": "ListFirewalls"}));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_stops_waiting() {
        let client = SlowClient {
            calls: AtomicUsize::new(0),
            delay: Duration::from_secs(3600),
        };
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            invoke(&client, "DeleteFirewall", Request::new(), Some(&token)),
        )
        .await
        .expect("cancellation should end the wait");

        assert_eq!(
            result,
            Err(InvocationError::Cancelled {
                operation: "DeleteFirewall".to_string()
            })
        );
    }
}
