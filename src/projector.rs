//! # Response Projector
//!
//! Decides what an invocation emits. By default an operation emits what its
//! descriptor says: the whole response, or one field of it (list operations
//! emit their collection). The caller may override this with a selector:
//!
//! - `*` emits the whole response;
//! - `Field` or `Field.Nested` emits one field;
//! - `^Param` echoes the bound value of an input parameter.
//!
//! Mutating operations with a pass-thru parameter also accept the legacy
//! `--pass-thru` flag, which echoes that parameter. A selector and
//! `--pass-thru` together are a usage error. Selectors are resolved before
//! the remote call so that mistakes cost no network round trip.

use serde_json::Value;

use crate::binder::InvocationContext;
use crate::descriptor::{DefaultOutput, OperationDescriptor};
use crate::errors::InvocationError;

/// What to emit from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The whole response.
    Whole,
    /// A field of the response, as path segments.
    Field(Vec<String>),
    /// The bound value of the named input parameter.
    Echo(&'static str),
}

/// Resolves the caller's output choice for one invocation.
///
/// # Arguments
/// * `descriptor` - The operation being invoked
/// * `select` - The `--select` value, if any
/// * `pass_thru` - Whether the legacy `--pass-thru` flag was given
///
/// # Returns
/// * `Ok(Selector)` - The projection to apply to the response
/// * `Err(InvocationError)` - Conflicting or unknown selectors
pub fn resolve(
    descriptor: &OperationDescriptor,
    select: Option<&str>,
    pass_thru: bool,
) -> Result<Selector, InvocationError> {
    if pass_thru {
        if select.is_some() {
            return Err(InvocationError::ConflictingSelectors {
                operation: descriptor.name.to_string(),
            });
        }
        let target = descriptor
            .mutation
            .as_ref()
            .and_then(|m| m.pass_thru)
            .ok_or_else(|| InvocationError::UnknownSelector {
                operation: descriptor.name.to_string(),
                selector: "--pass-thru".to_string(),
                reason: "this operation has no pass-thru parameter".to_string(),
            })?;
        return Ok(Selector::Echo(target));
    }

    let Some(select) = select.map(str::trim) else {
        return Ok(match descriptor.default_output {
            DefaultOutput::Whole => Selector::Whole,
            DefaultOutput::Field(field) => Selector::Field(vec![field.to_string()]),
        });
    };

    let unknown = |reason: &str| InvocationError::UnknownSelector {
        operation: descriptor.name.to_string(),
        selector: select.to_string(),
        reason: reason.to_string(),
    };

    if select == "*" {
        Ok(Selector::Whole)
    } else if let Some(param) = select.strip_prefix('^') {
        descriptor
            .find_parameter(param)
            .map(|spec| Selector::Echo(spec.name))
            .ok_or_else(|| unknown("no such input parameter"))
    } else {
        let segments: Vec<String> = select.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unknown("empty path segment"));
        }
        let head = segments[0].as_str();
        match descriptor
            .response_fields
            .iter()
            .find(|f| f.eq_ignore_ascii_case(head))
        {
            Some(field) => {
                let mut segments = segments;
                segments[0] = field.to_string();
                Ok(Selector::Field(segments))
            }
            None => Err(unknown("no such response field")),
        }
    }
}

/// Applies a selector to a response.
///
/// A field absent from the response, or an echo of an unbound parameter,
/// projects to `null`.
pub fn project(selector: &Selector, response: Value, ctx: &InvocationContext) -> Value {
    match selector {
        Selector::Whole => response,
        Selector::Echo(param) => ctx.get(param).map(|v| v.to_value()).unwrap_or(Value::Null),
        Selector::Field(path) => {
            let mut current = response;
            for segment in path {
                current = match current {
                    Value::Object(mut obj) => obj.remove(segment).unwrap_or(Value::Null),
                    _ => return Value::Null,
                };
            }
            current
        }
    }
}
