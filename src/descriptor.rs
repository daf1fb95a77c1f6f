//! # Operation Descriptors
//!
//! Every remote action is described by data rather than by code. An
//! [`OperationDescriptor`] names the action, lists its parameters in order,
//! maps each parameter onto a dotted request-field path, and records how the
//! response is shaped by default.
//!
//! Paths define the nested "populate sub-object" groups of a request: the
//! parameters `EncryptionConfiguration_KeyId` and `EncryptionConfiguration_Type`
//! map to `EncryptionConfiguration.KeyId` and `EncryptionConfiguration.Type`,
//! so both belong to the `EncryptionConfiguration` group.
//!
//! ```rust
//! use nfwctl::{Kind, OperationDescriptor, ParameterSpec};
//!
//! let op = OperationDescriptor::new("DescribeFirewall")
//!     .parameter(ParameterSpec::new("FirewallName", Kind::String))
//!     .parameter(ParameterSpec::new("FirewallArn", Kind::String))
//!     .require_any(&["FirewallName", "FirewallArn"])
//!     .responds_with(&["UpdateToken", "Firewall", "FirewallStatus"]);
//!
//! assert_eq!(op.command_name(), "describe-firewall");
//! assert!(op.find_parameter("firewallname").is_some());
//! assert!(op.mutation.is_none());
//! ```

use crate::shape::Kind;

/// One named, typed parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name as typed on the command line.
    pub name: &'static str,
    /// Value type.
    pub kind: Kind,
    /// Whether the parameter must be bound to a non-null value.
    pub required: bool,
    /// Alternative names accepted for the parameter.
    pub aliases: &'static [&'static str],
    /// Dotted request-field path the value is copied to.
    pub path: &'static str,
    /// Regular expression string values must match.
    pub pattern: Option<&'static str>,
}

impl ParameterSpec {
    /// An optional parameter copied to the top-level request field of the same name.
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: false,
            aliases: &[],
            path: name,
            pattern: None,
        }
    }

    /// Marks the parameter as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Copies the value to `path` instead of the parameter name.
    pub const fn at(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }

    /// Adds alternative names.
    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Constrains string values to a regular expression.
    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Returns true if `name` is this parameter's name or one of its aliases, ignoring ASCII case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// The request-field path split into its segments.
    pub fn path_segments(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('.')
    }
}

/// What an operation emits when the caller does not choose a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOutput {
    /// The whole response document.
    Whole,
    /// One top-level field of the response, e.g. the collection of a list call.
    Field(&'static str),
}

/// Extra metadata carried by state-mutating operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// Parameters whose bound values identify the target in confirmation prompts.
    pub target: &'static [&'static str],
    /// Parameter echoed by the legacy `--pass-thru` flag.
    pub pass_thru: Option<&'static str>,
}

/// Static description of one remote API action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// API action name, e.g. `CreateFirewall`.
    pub name: &'static str,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterSpec>,
    /// Groups of parameters of which at least one must be bound.
    pub require_any: Vec<&'static [&'static str]>,
    /// Top-level fields of the response document.
    pub response_fields: &'static [&'static str],
    /// Default projection of the response.
    pub default_output: DefaultOutput,
    /// Present for operations that change remote state.
    pub mutation: Option<Mutation>,
}

impl OperationDescriptor {
    /// Starts a read-only descriptor with no parameters that emits the whole response.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            parameters: Vec::new(),
            require_any: Vec::new(),
            response_fields: &[],
            default_output: DefaultOutput::Whole,
            mutation: None,
        }
    }

    /// Appends a parameter.
    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Appends several parameters.
    pub fn parameters<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = ParameterSpec>,
    {
        self.parameters.extend(specs);
        self
    }

    /// Requires at least one of `names` to be bound.
    pub fn require_any(mut self, names: &'static [&'static str]) -> Self {
        self.require_any.push(names);
        self
    }

    /// Declares the top-level response fields.
    pub fn responds_with(mut self, fields: &'static [&'static str]) -> Self {
        self.response_fields = fields;
        self
    }

    /// Emits only `field` of the response by default.
    pub fn default_field(mut self, field: &'static str) -> Self {
        self.default_output = DefaultOutput::Field(field);
        self
    }

    /// Marks the operation as mutating; `target` identifies the resource in prompts.
    pub fn mutating(mut self, target: &'static [&'static str]) -> Self {
        self.mutation = Some(Mutation {
            target,
            pass_thru: None,
        });
        self
    }

    /// Marks the operation as mutating with a legacy pass-thru parameter.
    pub fn mutating_with_pass_thru(
        mut self,
        target: &'static [&'static str],
        pass_thru: &'static str,
    ) -> Self {
        self.mutation = Some(Mutation {
            target,
            pass_thru: Some(pass_thru),
        });
        self
    }

    /// The kebab-case command name, e.g. `create-firewall-policy`.
    pub fn command_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 4);
        let chars: Vec<char> = self.name.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if c.is_ascii_uppercase() {
                let prev_lower = i > 0 && !chars[i - 1].is_ascii_uppercase();
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
                if i > 0 && (prev_lower || (prev_upper && next_lower)) {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(*c);
            }
        }
        out
    }

    /// Returns true if `name` is the action name or the command name, ignoring ASCII case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.command_name().eq_ignore_ascii_case(name)
    }

    /// Finds a parameter by name or alias.
    pub fn find_parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.answers_to(name))
    }

    /// Returns true if the operation changes remote state.
    pub fn is_mutating(&self) -> bool {
        self.mutation.is_some()
    }
}
