//! # Operation Invocation Command
//!
//! Handles `nfwctl [options] <operation> [Name=Value ...]`: looks the
//! operation up, gathers bindings from the command line and `--input-json`,
//! runs the dispatcher and prints the projected output.

use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::binder::Bindings;
use crate::cli_utils::{self, OutputFormat};
use crate::commands::errors::exit_with_user_error;
use crate::commands::shared::{parse_bindings, read_input_json};
use crate::dispatcher::{Dispatcher, Invocation, Outcome};
use crate::errors::InvocationError;
use crate::http_utils::RemoteClient;
use crate::operations;

/// Output and input options that apply to one invocation.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Response selector given with `--select`.
    pub select: Option<String>,
    /// Whether `--pass-thru` was given.
    pub pass_thru: bool,
    /// Source of piped bindings given with `--input-json`.
    pub input_json: Option<String>,
    /// Output format.
    pub output: OutputFormat,
}

/// Resolves the operation and runs one invocation of it.
///
/// # Arguments
/// * `args` - The operation name followed by `Name=Value` words
/// * `dispatcher` - Dispatcher wired to the remote client and confirmation gate
/// * `options` - Selector and pass-thru choice
/// * `piped` - Bindings read from `--input-json`, if any
/// * `cancel` - Token that abandons the remote call
pub async fn run_invocation<C>(
    args: &[String],
    dispatcher: &Dispatcher<C>,
    options: &InvokeOptions,
    piped: Option<Map<String, Value>>,
    cancel: CancellationToken,
) -> Result<Outcome, InvocationError>
where
    C: RemoteClient,
{
    let Some((name, words)) = args.split_first() else {
        return Err(InvocationError::UnknownOperation(String::new()));
    };
    let descriptor =
        operations::find(name).ok_or_else(|| InvocationError::UnknownOperation(name.clone()))?;

    let mut bindings = Bindings {
        explicit: parse_bindings(words)?,
        piped: None,
    };
    if let Some(piped) = piped {
        bindings = bindings.with_piped(piped);
    }

    let mut invocation = Invocation::new(bindings).cancel_with(cancel);
    if let Some(select) = &options.select {
        invocation = invocation.select(select.clone());
    }
    if options.pass_thru {
        invocation = invocation.pass_thru();
    }

    tracing::debug!(operation = descriptor.name, "dispatching");
    dispatcher.dispatch(descriptor, invocation).await
}

/// Handles an operation invocation, printing the result or exiting on error.
pub async fn handle_invoke_command<C>(
    args: &[String],
    dispatcher: &Dispatcher<C>,
    options: &InvokeOptions,
    cancel: CancellationToken,
) where
    C: RemoteClient,
{
    let piped = options.input_json.as_deref().map(|source| {
        read_input_json(source, std::io::stdin()).unwrap_or_else(|e| exit_with_user_error(&e))
    });

    match run_invocation(args, dispatcher, options, piped, cancel).await {
        Ok(Outcome::Output(value)) => {
            cli_utils::print_formatted_or_exit(&value, options.output, "response");
        }
        Ok(Outcome::Declined) => {}
        Err(e) => exit_with_user_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::ForceGate;
    use crate::test_utils::test_helpers::{DeclineGate, RecordingClient};
    use serde_json::json;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn kebab_case_names_dispatch() {
        let client = RecordingClient::replying(json!({"Firewall": {"FirewallName": "edge-fw"}}));
        let dispatcher = Dispatcher::new(client, Box::new(ForceGate));
        let outcome = run_invocation(
            &args(&["describe-firewall", "FirewallName=edge-fw"]),
            &dispatcher,
            &InvokeOptions {
                select: Some("Firewall.FirewallName".to_string()),
                ..Default::default()
            },
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::Output(json!("edge-fw")));
        let calls = dispatcher.client().calls();
        assert_eq!(calls[0].0, "DescribeFirewall");
    }

    #[tokio::test]
    async fn unknown_operation_is_a_usage_error() {
        let dispatcher = Dispatcher::new(RecordingClient::replying(json!({})), Box::new(ForceGate));
        let err = run_invocation(
            &args(&["describe-firewal"]),
            &dispatcher,
            &InvokeOptions::default(),
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, InvocationError::UnknownOperation("describe-firewal".to_string()));
        assert!(dispatcher.client().calls().is_empty());
    }

    #[tokio::test]
    async fn piped_input_feeds_the_next_command() {
        let dispatcher = Dispatcher::new(
            RecordingClient::replying(json!({"FirewallArn": "arn:aws:network-firewall:::firewall/edge-fw"})),
            Box::new(ForceGate),
        );
        let piped = json!({"FirewallName": "edge-fw", "VpcId": "vpc-0abc", "Status": "READY"})
            .as_object()
            .cloned();
        run_invocation(
            &args(&["UpdateFirewallDescription", "Description=edge"]),
            &dispatcher,
            &InvokeOptions::default(),
            piped,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        let (_, request) = dispatcher.client().calls().remove(0);
        assert_eq!(
            Value::Object(request),
            json!({"FirewallName": "edge-fw", "Description": "edge"})
        );
    }

    #[tokio::test]
    async fn declined_mutation_prints_nothing() {
        let dispatcher = Dispatcher::new(
            RecordingClient::replying(json!({})),
            Box::new(DeclineGate::default()),
        );
        let outcome = run_invocation(
            &args(&["delete-rule-group", "RuleGroupName=domains", "Type=STATEFUL"]),
            &dispatcher,
            &InvokeOptions::default(),
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::Declined);
        assert!(dispatcher.client().calls().is_empty());
    }
}
