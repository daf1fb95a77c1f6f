//! # Confirmation Gate
//!
//! Mutating operations must be approved before their request is sent. The
//! approval runs through a small state machine:
//!
//! ```text
//! Pending ──approve──▶ Confirmed ──call issued──▶ Executed
//!    └──────decline──▶ Declined  ──────────────▶ Aborted
//! ```
//!
//! A declined invocation is not an error: nothing is sent and nothing is
//! printed. A gate that cannot ask anyone, because there is no terminal or
//! its input ended, fails the invocation instead. `--force` replaces the
//! interactive prompt with [`ForceGate`].

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use crate::binder::InvocationContext;
use crate::descriptor::OperationDescriptor;

/// Progress of one invocation through the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for approval.
    Pending,
    /// Approved; the call may be issued.
    Confirmed,
    /// Refused; no call will be issued.
    Declined,
    /// The call was issued after approval.
    Executed,
    /// The invocation ended without a call after a refusal.
    Aborted,
}

impl GateState {
    /// Records the gate's answer. Only meaningful while pending.
    pub fn decide(self, approved: bool) -> Self {
        match (self, approved) {
            (GateState::Pending, true) => GateState::Confirmed,
            (GateState::Pending, false) => GateState::Declined,
            (state, _) => state,
        }
    }

    /// Moves a decided gate to its terminal state.
    pub fn finish(self) -> Self {
        match self {
            GateState::Confirmed => GateState::Executed,
            GateState::Declined => GateState::Aborted,
            state => state,
        }
    }

    /// Returns true if a call may be issued.
    pub fn may_execute(self) -> bool {
        self == GateState::Confirmed
    }
}

/// What the operator is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// API action name.
    pub operation: &'static str,
    /// `(parameter, value)` pairs identifying the target resource.
    pub target: Vec<(&'static str, String)>,
}

impl ConfirmationPrompt {
    /// Builds the prompt from the descriptor's target parameters and the bound values.
    pub fn new(descriptor: &OperationDescriptor, ctx: &InvocationContext) -> Self {
        let target = descriptor
            .mutation
            .as_ref()
            .map(|m| m.target)
            .unwrap_or(&[])
            .iter()
            .filter_map(|name| {
                ctx.get(name).map(|value| {
                    let text = match value.to_value() {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (*name, text)
                })
            })
            .collect();
        Self {
            operation: descriptor.name,
            target,
        }
    }
}

impl std::fmt::Display for ConfirmationPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Performing {}", self.operation)?;
        if !self.target.is_empty() {
            let target: Vec<String> = self
                .target
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            write!(f, " on {}", target.join(", "))?;
        }
        Ok(())
    }
}

/// Approves or refuses mutating calls.
///
/// Gates may block; the dispatcher runs them off the async runtime.
pub trait ConfirmationGate: Send + Sync {
    /// Returns `Ok(true)` if the call described by `prompt` may proceed,
    /// `Ok(false)` if the operator refused, and an error if nobody could be asked.
    fn confirm(&self, prompt: &ConfirmationPrompt) -> io::Result<bool>;
}

/// Approves everything; used for `--force`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceGate;

impl ConfirmationGate for ForceGate {
    fn confirm(&self, _prompt: &ConfirmationPrompt) -> io::Result<bool> {
        Ok(true)
    }
}

/// Asks on the controlling terminal.
///
/// Stdin may carry piped input, so the question and the answer both go
/// through the terminal device. Only `y` or `yes` (any case) approve.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalGate;

/// Path of the controlling terminal.
pub const TERMINAL_PATH: &str = "/dev/tty";

impl ConfirmationGate for TerminalGate {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> io::Result<bool> {
        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .open(TERMINAL_PATH)
            .map_err(|e| io::Error::new(e.kind(), format!("no terminal to ask on: {}", e)))?;
        let mut tty = require_terminal(tty)?;
        let mut input = BufReader::new(tty.try_clone()?);
        ask(prompt, &mut input, &mut tty)
    }
}

/// Passes `file` through if it is a terminal.
pub fn require_terminal(file: File) -> io::Result<File> {
    if file.is_terminal() {
        Ok(file)
    } else {
        Err(io::Error::other(format!("{} is not a terminal", TERMINAL_PATH)))
    }
}

/// Writes the question for `prompt` to `out` and reads one answer line from `input`.
///
/// Input that ends before a line is read is an error, not a refusal.
pub fn ask<R, W>(prompt: &ConfirmationPrompt, input: &mut R, out: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{}. Continue? [y/N] ", prompt)?;
    out.flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer before end of input",
        ));
    }
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
