//! # Command Dispatcher
//!
//! One generic dispatcher serves every operation. An invocation walks the same
//! steps whatever its descriptor says:
//!
//! 1. resolve the output selector (usage errors end here, before any call);
//! 2. bind and validate parameters into an [`InvocationContext`];
//! 3. for mutating operations, pass the confirmation gate, where a refusal
//!    ends the invocation quietly and cancellation ends the wait for an answer;
//! 4. build exactly one request;
//! 5. issue exactly one call, honouring cancellation;
//! 6. project the response.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::binder::{Bindings, InvocationContext, bind};
use crate::confirm::{ConfirmationGate, ConfirmationPrompt, GateState};
use crate::descriptor::OperationDescriptor;
use crate::errors::InvocationError;
use crate::http_utils::RemoteClient;
use crate::invoker;
use crate::projector::{self, Selector};
use crate::request::RequestTemplate;

/// Everything the caller supplies for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Raw parameter bindings.
    pub bindings: Bindings,
    /// The `--select` value, if any.
    pub select: Option<String>,
    /// Whether the legacy `--pass-thru` flag was given.
    pub pass_thru: bool,
    /// Token that abandons the remote call when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl Invocation {
    /// An invocation with the given bindings and default output.
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Sets the response selector.
    pub fn select(mut self, selector: impl Into<String>) -> Self {
        self.select = Some(selector.into());
        self
    }

    /// Requests the legacy pass-thru echo.
    pub fn pass_thru(mut self) -> Self {
        self.pass_thru = true;
        self
    }

    /// Attaches a cancellation token.
    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// How an invocation ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call was made; this is the projected output.
    Output(Value),
    /// Confirmation was refused; no call was made.
    Declined,
}

/// Drives invocations against a remote client.
pub struct Dispatcher<C> {
    client: C,
    gate: Arc<dyn ConfirmationGate>,
}

impl<C> Dispatcher<C>
where
    C: RemoteClient,
{
    /// Creates a dispatcher that asks `gate` before mutating calls.
    pub fn new(client: C, gate: Box<dyn ConfirmationGate>) -> Self {
        Self {
            client,
            gate: Arc::from(gate),
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs one invocation of `descriptor`.
    ///
    /// # Arguments
    /// * `descriptor` - The operation to invoke
    /// * `invocation` - Bindings, output choice and cancellation for this call
    ///
    /// # Returns
    /// * `Ok(Outcome::Output(_))` - The projected response
    /// * `Ok(Outcome::Declined)` - Confirmation refused, nothing sent
    /// * `Err(InvocationError)` - A usage error (nothing sent), a remote
    ///   error, or cancellation
    pub async fn dispatch(
        &self,
        descriptor: &OperationDescriptor,
        invocation: Invocation,
    ) -> Result<Outcome, InvocationError> {
        let selector = projector::resolve(
            descriptor,
            invocation.select.as_deref(),
            invocation.pass_thru,
        )?;
        let ctx = bind(descriptor, &invocation.bindings)?;
        tracing::debug!(
            operation = descriptor.name,
            bound = ctx.len(),
            "parameters bound"
        );

        let mut state = GateState::Pending;
        if descriptor.is_mutating() {
            let prompt = ConfirmationPrompt::new(descriptor, &ctx);
            let approved = self
                .confirm(descriptor, prompt, invocation.cancel.as_ref())
                .await?;
            state = state.decide(approved);
            if !state.may_execute() {
                tracing::info!(operation = descriptor.name, state = ?state.finish(), "confirmation declined");
                return Ok(Outcome::Declined);
            }
        }

        let output = self.execute(descriptor, &ctx, &selector, invocation.cancel.as_ref()).await?;
        if descriptor.is_mutating() {
            tracing::debug!(operation = descriptor.name, state = ?state.finish(), "mutation issued");
        }
        Ok(Outcome::Output(output))
    }

    /// Puts the prompt to the gate on a blocking thread so that cancellation
    /// can end the wait for an answer.
    async fn confirm(
        &self,
        descriptor: &OperationDescriptor,
        prompt: ConfirmationPrompt,
        cancel: Option<&CancellationToken>,
    ) -> Result<bool, InvocationError> {
        let gate = Arc::clone(&self.gate);
        let asking = tokio::task::spawn_blocking(move || gate.confirm(&prompt));
        let joined = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::warn!(operation = descriptor.name, "invocation cancelled at the confirmation prompt");
                        return Err(InvocationError::Cancelled {
                            operation: descriptor.name.to_string(),
                        });
                    }
                    joined = asking => joined,
                }
            }
            None => asking.await,
        };
        let unavailable = |reason: String| InvocationError::ConfirmationUnavailable {
            operation: descriptor.name.to_string(),
            reason,
        };
        joined
            .map_err(|e| unavailable(e.to_string()))?
            .map_err(|e| unavailable(e.to_string()))
    }

    async fn execute(
        &self,
        descriptor: &OperationDescriptor,
        ctx: &InvocationContext,
        selector: &Selector,
        cancel: Option<&CancellationToken>,
    ) -> Result<Value, InvocationError> {
        let request = RequestTemplate::for_operation(descriptor).build(ctx);
        let response = invoker::invoke(&self.client, descriptor.name, request, cancel).await?;
        Ok(projector::project(selector, response, ctx))
    }
}
