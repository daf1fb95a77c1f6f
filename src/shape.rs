//! # Structured Value Shapes
//!
//! Parameters of the management API are not all scalars: subnet mappings,
//! tags, rule group references and rule variables are structured objects.
//! This module describes those structures statically and validates JSON
//! values against them before a request is built.
//!
//! A [`Kind`] is the type of a parameter or of an object member. A [`Shape`]
//! lists the members an object may carry. Validation rejects unknown members,
//! missing required members and type mismatches, and reports the path to the
//! offending element.
//!
//! ```rust
//! use nfwctl::{Kind, Member, Shape, validate_value};
//! use serde_json::json;
//!
//! static TAG: Shape = Shape {
//!     name: "Tag",
//!     members: &[
//!         Member::required("Key", Kind::String),
//!         Member::required("Value", Kind::String),
//!     ],
//! };
//!
//! let tags = Kind::ObjectList(&TAG);
//! assert!(validate_value(&json!([{"Key": "env", "Value": "prod"}]), &tags).is_ok());
//! assert!(validate_value(&json!([{"Key": "env"}]), &tags).is_err());
//! ```

use serde_json::{Map, Value};

/// The type of a parameter or object member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A string.
    String,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
    /// A signed integer.
    Integer,
    /// A boolean.
    Boolean,
    /// A list of strings.
    StringList,
    /// A single structured object.
    Object(&'static Shape),
    /// A list of structured objects.
    ObjectList(&'static Shape),
    /// A string-keyed map whose values are structured objects.
    ObjectMap(&'static Shape),
    /// A string-keyed map whose values are strings.
    StringMap,
    /// Any JSON value; used where the structure is too deep to be worth describing.
    Any,
}

impl Kind {
    /// A short name for the kind, used in help output and error messages.
    pub fn type_name(&self) -> String {
        match self {
            Kind::String => "string".to_string(),
            Kind::Enum(values) => values.join("|"),
            Kind::Integer => "integer".to_string(),
            Kind::Boolean => "boolean".to_string(),
            Kind::StringList => "string[]".to_string(),
            Kind::Object(shape) => shape.name.to_string(),
            Kind::ObjectList(shape) => format!("{}[]", shape.name),
            Kind::ObjectMap(shape) => format!("map<string, {}>", shape.name),
            Kind::StringMap => "map<string, string>".to_string(),
            Kind::Any => "json".to_string(),
        }
    }

    /// Returns true for kinds whose values accumulate across repeated bindings.
    pub fn is_list(&self) -> bool {
        matches!(self, Kind::StringList | Kind::ObjectList(_))
    }
}

/// One member of a structured object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// Wire name of the member.
    pub name: &'static str,
    /// Type of the member.
    pub kind: Kind,
    /// Whether the member must be present.
    pub required: bool,
}

impl Member {
    /// A member that must be present.
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// A member that may be omitted.
    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// The members a structured object may carry.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    /// Name of the structure, e.g. `SubnetMapping`.
    pub name: &'static str,
    /// Members in declaration order.
    pub members: &'static [Member],
}

impl Shape {
    fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Errors that can occur while validating a value against a [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value type doesn't match what the kind expects
    TypeMismatch {
        /// The type that was expected
        expected: String,
        /// The actual type of the value being validated
        actual: String,
    },
    /// A required object member is missing
    MissingRequiredProperty {
        /// The name of the missing member
        property: String,
    },
    /// An object carries a member its shape does not declare
    UnknownProperty {
        /// The name of the undeclared member
        property: String,
    },
    /// The value doesn't match any of the allowed enum values
    EnumMismatch {
        /// The actual value that was provided
        value: String,
        /// The list of values that would have been valid
        allowed_values: Vec<String>,
    },
    /// An array item failed validation
    ArrayItemError {
        /// The index of the array item that failed
        index: usize,
        /// The underlying validation error for the item
        source: Box<ValidationError>,
    },
    /// An object property failed validation
    ObjectPropertyError {
        /// The name of the property that failed
        property: String,
        /// The underlying validation error for the property
        source: Box<ValidationError>,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TypeMismatch { expected, actual } => {
                write!(f, "expected {}, got {}", expected, actual)
            }
            ValidationError::MissingRequiredProperty { property } => {
                write!(f, "missing required member {}", property)
            }
            ValidationError::UnknownProperty { property } => {
                write!(f, "unknown member {}", property)
            }
            ValidationError::EnumMismatch {
                value,
                allowed_values,
            } => {
                write!(
                    f,
                    "'{}' is not one of {}",
                    value,
                    allowed_values.join(", ")
                )
            }
            ValidationError::ArrayItemError { index, source } => {
                write!(f, "[{}]: {}", index, source)
            }
            ValidationError::ObjectPropertyError { property, source } => {
                write!(f, "{}: {}", property, source)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a JSON value against a kind.
///
/// # Arguments
/// * `value` - The JSON value to validate
/// * `kind` - The kind the value must conform to
///
/// # Returns
/// * `Ok(())` - The value conforms
/// * `Err(ValidationError)` - The first violation found, with its path
pub fn validate_value(value: &Value, kind: &Kind) -> Result<(), ValidationError> {
    match kind {
        Kind::String => expect_string(value).map(|_| ()),
        Kind::Enum(allowed) => {
            let s = expect_string(value)?;
            if allowed.contains(&s) {
                Ok(())
            } else {
                Err(ValidationError::EnumMismatch {
                    value: s.to_string(),
                    allowed_values: allowed.iter().map(|v| v.to_string()).collect(),
                })
            }
        }
        Kind::Integer => match value {
            Value::Number(n) if n.is_i64() => Ok(()),
            _ => Err(mismatch("integer", value)),
        },
        Kind::Boolean => match value {
            Value::Bool(_) => Ok(()),
            _ => Err(mismatch("boolean", value)),
        },
        Kind::StringList => validate_items(value, |item| expect_string(item).map(|_| ())),
        Kind::Object(shape) => validate_object(value, shape),
        Kind::ObjectList(shape) => validate_items(value, |item| validate_object(item, shape)),
        Kind::ObjectMap(shape) => validate_entries(value, |entry| validate_object(entry, shape)),
        Kind::StringMap => validate_entries(value, |entry| expect_string(entry).map(|_| ())),
        Kind::Any => Ok(()),
    }
}

fn validate_object(value: &Value, shape: &Shape) -> Result<(), ValidationError> {
    let obj = match value {
        Value::Object(obj) => obj,
        _ => return Err(mismatch("object", value)),
    };

    for (key, member_value) in obj {
        let member = shape
            .member(key)
            .ok_or_else(|| ValidationError::UnknownProperty {
                property: key.clone(),
            })?;
        validate_value(member_value, &member.kind).map_err(|e| {
            ValidationError::ObjectPropertyError {
                property: key.clone(),
                source: Box::new(e),
            }
        })?;
    }

    for member in shape.members.iter().filter(|m| m.required) {
        match obj.get(member.name) {
            Some(Value::Null) | None => {
                return Err(ValidationError::MissingRequiredProperty {
                    property: member.name.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

fn validate_items<F>(value: &Value, check: F) -> Result<(), ValidationError>
where
    F: Fn(&Value) -> Result<(), ValidationError>,
{
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(mismatch("array", value)),
    };
    for (index, item) in items.iter().enumerate() {
        check(item).map_err(|e| ValidationError::ArrayItemError {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

fn validate_entries<F>(value: &Value, check: F) -> Result<(), ValidationError>
where
    F: Fn(&Value) -> Result<(), ValidationError>,
{
    let entries: &Map<String, Value> = match value {
        Value::Object(entries) => entries,
        _ => return Err(mismatch("object", value)),
    };
    for (key, entry) in entries {
        check(entry).map_err(|e| ValidationError::ObjectPropertyError {
            property: key.clone(),
            source: Box::new(e),
        })?;
    }
    Ok(())
}

fn expect_string(value: &Value) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| mismatch("string", value))
}

fn mismatch(expected: &str, value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        expected: expected.to_string(),
        actual: value_type(value).to_string(),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static HEADER: Shape = Shape {
        name: "Header",
        members: &[
            Member::required("Protocol", Kind::Enum(&["TCP", "UDP", "IP"])),
            Member::optional("Direction", Kind::Enum(&["FORWARD", "ANY"])),
        ],
    };

    static RULE: Shape = Shape {
        name: "Rule",
        members: &[
            Member::required("Header", Kind::Object(&HEADER)),
            Member::optional("Priority", Kind::Integer),
            Member::optional("Keywords", Kind::StringList),
        ],
    };

    #[test]
    fn accepts_conforming_nested_objects() {
        let value = json!([
            {"Header": {"Protocol": "TCP"}, "Priority": 10},
            {"Header": {"Protocol": "UDP", "Direction": "ANY"}, "Keywords": ["sid:1"]}
        ]);
        assert!(validate_value(&value, &Kind::ObjectList(&RULE)).is_ok());
    }

    #[test]
    fn reports_path_to_nested_violation() {
        let value = json!([
            {"Header": {"Protocol": "TCP"}},
            {"Header": {"Protocol": "SCTP"}}
        ]);
        let err = validate_value(&value, &Kind::ObjectList(&RULE)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[1]: Header: Protocol: 'SCTP' is not one of TCP, UDP, IP"
        );
    }

    #[test]
    fn rejects_unknown_and_missing_members() {
        let unknown = json!({"Header": {"Protocol": "IP"}, "Bogus": 1});
        assert_eq!(
            validate_value(&unknown, &Kind::Object(&RULE)),
            Err(ValidationError::UnknownProperty {
                property: "Bogus".to_string()
            })
        );

        let missing = json!({"Priority": 1});
        assert_eq!(
            validate_value(&missing, &Kind::Object(&RULE)),
            Err(ValidationError::MissingRequiredProperty {
                property: "Header".to_string()
            })
        );
    }

    #[test]
    fn maps_validate_every_entry() {
        let ok = json!({"region": "us-east-1", "bucket": "logs"});
        assert!(validate_value(&ok, &Kind::StringMap).is_ok());

        let bad = json!({"region": "us-east-1", "retention": 7});
        let err = validate_value(&bad, &Kind::StringMap).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ObjectPropertyError { ref property, .. } if property == "retention"
        ));
    }

    #[test]
    fn scalars_check_their_type() {
        assert!(validate_value(&json!(5), &Kind::Integer).is_ok());
        assert!(validate_value(&json!(5.5), &Kind::Integer).is_err());
        assert!(validate_value(&json!(true), &Kind::Boolean).is_ok());
        assert!(validate_value(&json!("true"), &Kind::Boolean).is_err());
        assert!(validate_value(&json!({"anything": [1, 2]}), &Kind::Any).is_ok());
    }

    #[test]
    fn type_names_describe_kinds() {
        assert_eq!(Kind::ObjectList(&RULE).type_name(), "Rule[]");
        assert_eq!(Kind::Enum(&["A", "B"]).type_name(), "A|B");
        assert!(Kind::StringList.is_list());
        assert!(!Kind::StringMap.is_list());
    }
}
