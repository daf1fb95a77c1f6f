#[cfg(test)]
pub mod test_helpers {
    use std::sync::{Arc, Mutex};

    use serde_json::Value;

    use crate::confirm::{ConfirmationGate, ConfirmationPrompt};
    use crate::errors::RemoteError;
    use crate::http_utils::RemoteClient;
    use crate::request::Request;

    /// A remote client that records every call and answers with a canned result
    pub struct RecordingClient {
        reply: Result<Value, RemoteError>,
        calls: Mutex<Vec<(String, Request)>>,
    }

    impl RecordingClient {
        /// Creates a client that answers every call with `response`
        pub fn replying(response: Value) -> Self {
            Self {
                reply: Ok(response),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Creates a client that fails every call with `error`
        pub fn failing(error: RemoteError) -> Self {
            Self {
                reply: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Returns the `(operation, request)` pairs seen so far
        pub fn calls(&self) -> Vec<(String, Request)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RemoteClient for RecordingClient {
        async fn invoke(&self, operation: &str, request: Request) -> Result<Value, RemoteError> {
            self.calls
                .lock()
                .unwrap()
                .push((operation.to_string(), request));
            self.reply.clone()
        }
    }

    /// A gate that refuses everything and remembers what it was asked
    #[derive(Default)]
    pub struct DeclineGate {
        pub asked: Arc<Mutex<Vec<ConfirmationPrompt>>>,
    }

    impl ConfirmationGate for DeclineGate {
        fn confirm(&self, prompt: &ConfirmationPrompt) -> std::io::Result<bool> {
            self.asked.lock().unwrap().push(prompt.clone());
            Ok(false)
        }
    }
}
