//! # nfwctl: A Command Layer over the Network Firewall Management API
//!
//! Every action of the firewall management API (create a firewall, attach
//! subnets, update a rule group, tag a resource, ...) is exposed as one
//! command. The commands share no per-operation code: each is a static
//! [`OperationDescriptor`] and one generic [`Dispatcher`] runs them all.
//!
//! ## Invocation Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Name=Value words + piped JSON (Bindings)     │
//! ├──────────────────────────────────────────────┤
//! │ Binder: parse, validate, required checks     │
//! ├──────────────────────────────────────────────┤
//! │ Confirmation gate (mutating operations only) │
//! ├──────────────────────────────────────────────┤
//! │ Request builder: nested-group gate           │
//! ├──────────────────────────────────────────────┤
//! │ Invoker: one remote call, cancellable        │
//! ├──────────────────────────────────────────────┤
//! │ Projector: whole, one field, or an echo      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Usage errors are raised before anything is sent. Each invocation makes at
//! most one remote call: there is no retry, caching or auto-pagination, and
//! `NextToken` is threaded by the caller like any other parameter.
//!
//! ## Usage Examples
//!
//! ### Looking Up an Operation
//!
//! ```rust
//! use nfwctl::operations;
//!
//! let op = operations::find("create-firewall").unwrap();
//! assert_eq!(op.name, "CreateFirewall");
//! assert!(op.is_mutating());
//! assert!(op.find_parameter("SubnetMapping").unwrap().required);
//! ```
//!
//! ### Building a Request
//!
//! Nested groups are only sent when something beneath them is bound:
//!
//! ```rust
//! use nfwctl::{Bindings, RequestTemplate, bind, operations};
//! use serde_json::json;
//!
//! let op = operations::find("UpdateFirewallEncryptionConfiguration").unwrap();
//! let ctx = bind(op, &Bindings::from_pairs([
//!     ("FirewallName", "edge-fw"),
//!     ("EncryptionConfiguration_Type", "AWS_OWNED_KMS_KEY"),
//! ])).unwrap();
//! let request = RequestTemplate::for_operation(op).build(&ctx);
//! assert_eq!(
//!     serde_json::Value::Object(request),
//!     json!({
//!         "FirewallName": "edge-fw",
//!         "EncryptionConfiguration": {"Type": "AWS_OWNED_KMS_KEY"}
//!     })
//! );
//! ```
//!
//! ### Dispatching
//!
//! ```rust,no_run
//! use nfwctl::{Bindings, ClientConfig, Dispatcher, HttpRemoteClient, Invocation, Outcome,
//!     TerminalGate, operations};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default().with_overrides(None, Some("us-east-1"));
//! let client = HttpRemoteClient::new(config.endpoint()?, config.region.clone(), config.headers);
//! let dispatcher = Dispatcher::new(client, Box::new(TerminalGate));
//!
//! let op = operations::find("describe-firewall").unwrap();
//! let invocation = Invocation::new(Bindings::from_pairs([("FirewallName", "edge-fw")]))
//!     .select("FirewallStatus.Status");
//! if let Outcome::Output(status) = dispatcher.dispatch(op, invocation).await? {
//!     println!("{}", status);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
mod binder;
mod confirm;
mod descriptor;
mod dispatcher;
mod errors;
mod projector;
mod request;
mod shape;
mod test_utils;

/// Command-line interface utilities for program termination and output formatting.
///
/// This module provides common CLI utilities for the nfwctl binary, including
/// error handling, formatted output, and program termination functions.
pub mod cli_utils;

/// Command handlers for the nfwctl binary.
pub mod commands;

/// Client configuration: file, environment and command-line layers.
pub mod config;

/// The remote client seam and its HTTP implementation.
pub mod http_utils;

/// Issues the single remote call of an invocation.
pub mod invoker;

/// The declarations of every management API operation.
pub mod operations;

pub use binder::{Bindings, InvocationContext, ParamValue, bind};
pub use config::{ClientConfig, ConfigError};
pub use confirm::{ConfirmationGate, ConfirmationPrompt, ForceGate, GateState, TerminalGate, ask};
pub use descriptor::{DefaultOutput, Mutation, OperationDescriptor, ParameterSpec};
pub use dispatcher::{Dispatcher, Invocation, Outcome};
pub use errors::{InvocationError, RemoteError};
pub use http_utils::{HttpRemoteClient, RemoteClient};
pub use projector::{Selector, project, resolve};
pub use request::{Request, RequestTemplate};
pub use shape::{Kind, Member, Shape, ValidationError, validate_value};
