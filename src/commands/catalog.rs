//! # Catalog Commands
//!
//! `nfwctl operations` lists every operation; `nfwctl help <operation>`
//! describes one operation's parameters, constraints and output.

use std::fmt::Write as _;

use crate::commands::errors::exit_with_user_error;
use crate::descriptor::{DefaultOutput, OperationDescriptor};
use crate::errors::InvocationError;
use crate::operations;

/// Renders the operation list: command name, action name and whether it mutates.
pub fn render_operations() -> String {
    let all = operations::all();
    let width = all
        .iter()
        .map(|d| d.command_name().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for op in all {
        let marker = if op.is_mutating() { "  (mutating)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<width$}  {}{}",
            op.command_name(),
            op.name,
            marker,
            width = width
        );
    }
    out
}

/// Renders the help text of one operation.
pub fn render_help(op: &OperationDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", op.command_name(), op.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "Parameters:");
    let width = op.parameters.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for p in &op.parameters {
        let required = if p.required { "required" } else { "optional" };
        let _ = write!(
            out,
            "  {:<width$}  {:<8}  {}",
            p.name,
            required,
            p.kind.type_name(),
            width = width
        );
        if p.path != p.name {
            let _ = write!(out, "  -> {}", p.path);
        }
        let _ = writeln!(out);
    }
    for group in &op.require_any {
        let _ = writeln!(out);
        let _ = writeln!(out, "At least one of: {}", group.join(", "));
    }
    let _ = writeln!(out);
    match op.default_output {
        DefaultOutput::Whole => {
            let _ = writeln!(out, "Output: the whole response");
        }
        DefaultOutput::Field(field) => {
            let _ = writeln!(out, "Output: the {} field (use --select '*' for everything)", field);
        }
    }
    if !op.response_fields.is_empty() {
        let _ = writeln!(out, "Response fields: {}", op.response_fields.join(", "));
    }
    if let Some(mutation) = &op.mutation {
        let _ = writeln!(out, "Asks for confirmation unless --force is given.");
        if let Some(echo) = mutation.pass_thru {
            let _ = writeln!(out, "--pass-thru echoes {}.", echo);
        }
    }
    out
}

/// Handles `nfwctl operations`.
pub fn handle_operations_command() {
    println!("Operations:");
    print!("{}", render_operations());
}

/// Handles `nfwctl help <operation>`.
pub fn handle_help_command(args: &[String], usage: &str) {
    match args.first() {
        None => println!("{}", usage),
        Some(name) => match operations::find(name) {
            Some(op) => print!("{}", render_help(op)),
            None => exit_with_user_error(&InvocationError::UnknownOperation(name.clone())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_list_marks_mutations() {
        let text = render_operations();
        assert_eq!(text.lines().count(), 31);
        let delete = text
            .lines()
            .find(|l| l.trim_start().starts_with("delete-firewall "))
            .unwrap();
        assert!(delete.contains("DeleteFirewall"));
        assert!(delete.ends_with("(mutating)"));
        let list = text
            .lines()
            .find(|l| l.trim_start().starts_with("list-firewalls "))
            .unwrap();
        assert!(!list.contains("(mutating)"));
    }

    #[test]
    fn help_shows_paths_constraints_and_echo() {
        let text = render_help(operations::find("TagResource").unwrap());
        assert!(text.starts_with("tag-resource (TagResource)"));
        assert!(text.contains("Tag[]"));
        assert!(text.contains("-> Tags"));
        assert!(text.contains("--pass-thru echoes ResourceArn."));

        let text = render_help(operations::find("DescribeFirewall").unwrap());
        assert!(text.contains("At least one of: FirewallArn, FirewallName"));
        assert!(!text.contains("confirmation"));
    }
}
