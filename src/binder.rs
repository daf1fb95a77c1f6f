//! # Parameter Binder
//!
//! Turns raw bindings into a validated [`InvocationContext`]. Bindings arrive
//! from two places: `Name=Value` words typed on the command line, and a JSON
//! object piped in from a previous command. Piped keys that match a parameter
//! are bound, unknown piped keys are ignored, and any parameter bound on the
//! command line replaces its piped value entirely.
//!
//! Nothing here talks to the network. Every failure names the parameter
//! at fault so the caller can correct it and rerun the whole invocation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;
use serde_json::{Map, Value};

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::errors::InvocationError;
use crate::shape::{Kind, validate_value};

/// A bound, validated parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A string.
    String(String),
    /// An integer.
    Integer(i64),
    /// A boolean.
    Boolean(bool),
    /// A list of strings, in the order supplied.
    StringList(Vec<String>),
    /// One structured object.
    Object(Map<String, Value>),
    /// A list of structured objects, in the order supplied.
    ObjectList(Vec<Value>),
    /// A string-keyed map.
    Map(Map<String, Value>),
    /// An arbitrary JSON document.
    Json(Value),
}

impl ParamValue {
    /// Converts the value to its request representation.
    pub fn to_value(&self) -> Value {
        match self {
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Integer(i) => Value::from(*i),
            ParamValue::Boolean(b) => Value::Bool(*b),
            ParamValue::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            ParamValue::Object(obj) | ParamValue::Map(obj) => Value::Object(obj.clone()),
            ParamValue::ObjectList(items) => Value::Array(items.clone()),
            ParamValue::Json(value) => value.clone(),
        }
    }

    fn from_checked(value: Value, kind: &Kind) -> Self {
        match (kind, value) {
            (Kind::String | Kind::Enum(_), Value::String(s)) => ParamValue::String(s),
            (Kind::Integer, Value::Number(n)) => match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                None => ParamValue::Json(Value::Number(n)),
            },
            (Kind::Boolean, Value::Bool(b)) => ParamValue::Boolean(b),
            (Kind::StringList, Value::Array(items)) => ParamValue::StringList(
                items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            (Kind::Object(_), Value::Object(obj)) => ParamValue::Object(obj),
            (Kind::ObjectList(_), Value::Array(items)) => ParamValue::ObjectList(items),
            (Kind::ObjectMap(_) | Kind::StringMap, Value::Object(obj)) => ParamValue::Map(obj),
            (_, other) => ParamValue::Json(other),
        }
    }

    fn append(&mut self, other: ParamValue) {
        match (self, other) {
            (ParamValue::StringList(items), ParamValue::StringList(more)) => items.extend(more),
            (ParamValue::ObjectList(items), ParamValue::ObjectList(more)) => items.extend(more),
            (slot, other) => *slot = other,
        }
    }
}

/// Raw, unvalidated bindings for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    /// `(name, raw value)` pairs in command-line order.
    pub explicit: Vec<(String, String)>,
    /// A JSON object piped in from a previous command.
    pub piped: Option<Map<String, Value>>,
}

impl Bindings {
    /// Creates bindings from command-line pairs only.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            explicit: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            piped: None,
        }
    }

    /// Adds piped input.
    pub fn with_piped(mut self, piped: Map<String, Value>) -> Self {
        self.piped = Some(piped);
        self
    }
}

/// The bound parameter values of one invocation.
///
/// Built per call by [`bind`], read by the request builder, the confirmation
/// gate and the response projector, then dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationContext {
    values: BTreeMap<&'static str, ParamValue>,
}

impl InvocationContext {
    /// Returns the value bound to the parameter named `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Returns true if the parameter named `name` is bound.
    pub fn is_bound(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates bound parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    fn insert(&mut self, name: &'static str, value: ParamValue) {
        self.values.insert(name, value);
    }

    fn append(&mut self, name: &'static str, value: ParamValue) {
        match self.values.get_mut(name) {
            Some(existing) => existing.append(value),
            None => {
                self.values.insert(name, value);
            }
        }
    }
}

/// Binds and validates raw bindings against an operation descriptor.
///
/// # Arguments
/// * `descriptor` - The operation being invoked
/// * `bindings` - Raw command-line and piped bindings
///
/// # Returns
/// * `Ok(InvocationContext)` - Every bound value parsed, validated, and all
///   required parameters present
/// * `Err(InvocationError)` - The first usage error found
pub fn bind(
    descriptor: &OperationDescriptor,
    bindings: &Bindings,
) -> Result<InvocationContext, InvocationError> {
    let mut ctx = InvocationContext::default();

    if let Some(piped) = &bindings.piped {
        for (key, value) in piped {
            let Some(spec) = descriptor.find_parameter(key) else {
                tracing::trace!(operation = descriptor.name, key = %key, "ignoring piped key");
                continue;
            };
            if value.is_null() {
                continue;
            }
            let bound = check_value(spec, value.clone())?;
            ctx.insert(spec.name, bound);
        }
    }

    let mut overridden: Vec<&'static str> = Vec::new();
    for (name, raw) in &bindings.explicit {
        let spec =
            descriptor
                .find_parameter(name)
                .ok_or_else(|| InvocationError::UnknownParameter {
                    operation: descriptor.name.to_string(),
                    parameter: name.clone(),
                })?;
        let repeated = overridden.contains(&spec.name);
        if repeated && !spec.kind.is_list() {
            return Err(InvocationError::InvalidValue {
                parameter: spec.name.to_string(),
                reason: "bound more than once".to_string(),
            });
        }
        let parsed = parse_raw(spec, raw)?;
        let bound = check_value(spec, parsed)?;
        if repeated {
            ctx.append(spec.name, bound);
        } else {
            overridden.push(spec.name);
            ctx.insert(spec.name, bound);
        }
    }

    check_required(descriptor, &ctx)?;
    Ok(ctx)
}

/// Parses one command-line value according to the parameter's kind.
fn parse_raw(spec: &ParameterSpec, raw: &str) -> Result<Value, InvocationError> {
    let invalid = |reason: String| InvocationError::InvalidValue {
        parameter: spec.name.to_string(),
        reason,
    };
    match spec.kind {
        Kind::String | Kind::Enum(_) => Ok(Value::String(raw.to_string())),
        Kind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| invalid(format!("'{}' is not an integer: {}", raw, e))),
        Kind::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(invalid(format!("'{}' is not true or false", raw)))
            }
        }
        Kind::StringList => {
            if raw.trim_start().starts_with('[') {
                parse_json(raw).map_err(invalid)
            } else {
                Ok(Value::Array(vec![Value::String(raw.to_string())]))
            }
        }
        Kind::ObjectList(_) => match parse_json(raw).map_err(invalid)? {
            Value::Object(obj) => Ok(Value::Array(vec![Value::Object(obj)])),
            other => Ok(other),
        },
        Kind::Object(_) | Kind::ObjectMap(_) | Kind::StringMap | Kind::Any => {
            parse_json(raw).map_err(invalid)
        }
    }
}

/// Compiled parameter patterns, keyed by their source text.
static PATTERNS: LazyLock<Mutex<HashMap<&'static str, Regex>>> = LazyLock::new(Default::default);

fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))
}

/// Validates a JSON value against the parameter's kind and pattern.
fn check_value(spec: &ParameterSpec, value: Value) -> Result<ParamValue, InvocationError> {
    validate_value(&value, &spec.kind).map_err(|e| InvocationError::InvalidValue {
        parameter: spec.name.to_string(),
        reason: e.to_string(),
    })?;

    if let (Some(pattern), Some(s)) = (spec.pattern, value.as_str()) {
        let re = compiled(pattern).map_err(|e| InvocationError::InvalidValue {
            parameter: spec.name.to_string(),
            reason: format!("bad pattern {}: {}", pattern, e),
        })?;
        if !re.is_match(s) {
            return Err(InvocationError::InvalidValue {
                parameter: spec.name.to_string(),
                reason: format!("'{}' does not match {}", s, pattern),
            });
        }
    }

    Ok(ParamValue::from_checked(value, &spec.kind))
}

fn check_required(
    descriptor: &OperationDescriptor,
    ctx: &InvocationContext,
) -> Result<(), InvocationError> {
    for spec in descriptor.parameters.iter().filter(|p| p.required) {
        if !ctx.is_bound(spec.name) {
            return Err(InvocationError::MissingParameter {
                operation: descriptor.name.to_string(),
                parameter: spec.name.to_string(),
            });
        }
    }

    for group in &descriptor.require_any {
        if !group.iter().any(|name| ctx.is_bound(name)) {
            return Err(InvocationError::MissingAlternative {
                operation: descriptor.name.to_string(),
                parameters: group.iter().map(|n| n.to_string()).collect(),
            });
        }
    }

    Ok(())
}
