//! # Command Handlers
//!
//! This module contains the command handlers for the nfwctl CLI application.
//!
//! ## Structure
//!
//! - `invoke` - Runs one operation through the dispatcher and prints its output
//! - `catalog` - Lists operations and prints per-operation help
//! - `errors` - User-facing messages and hints for every error type
//! - `error_extensions` - Handle<UserError> for configuration and input errors
//! - `shared` - Parsing of `Name=Value` words and piped JSON input

pub mod catalog;
pub mod error_extensions;
pub mod errors;
pub mod invoke;
pub mod shared;

pub use catalog::{handle_help_command, handle_operations_command};
pub use invoke::{InvokeOptions, handle_invoke_command};
