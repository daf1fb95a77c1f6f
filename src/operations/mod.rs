//! # Operation Catalog
//!
//! Declarations for every action of the firewall management API, grouped by
//! the resource they act on. The catalog is built once on first use and is
//! read-only afterwards.
//!
//! ## Structure
//!
//! - `firewall` - Firewalls, their subnets and protection flags
//! - `firewall_policy` - Firewall policies
//! - `rule_group` - Stateless and stateful rule groups
//! - `logging` - Firewall logging configuration
//! - `resource_policy` - Resource policies for sharing
//! - `tagging` - Resource tags
//! - `shapes` - Structured value shapes shared by the declarations

use std::sync::LazyLock;

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

pub mod firewall;
pub mod firewall_policy;
pub mod logging;
pub mod resource_policy;
pub mod rule_group;
pub mod shapes;
pub mod tagging;

/// Names of firewalls, policies and rule groups.
pub const NAME_PATTERN: &str = "^[a-zA-Z0-9-]{1,128}$";

/// Resource ARNs.
pub const ARN_PATTERN: &str = "^arn:aws[a-z-]*:";

/// VPC identifiers.
pub const VPC_ID_PATTERN: &str = "^vpc-[0-9a-f]+$";

/// Tokens returned by list calls for the next page.
pub const NEXT_TOKEN_PATTERN: &str = "^[0-9A-Za-z:\\/+=]+$";

static CATALOG: LazyLock<Vec<OperationDescriptor>> = LazyLock::new(|| {
    let mut all = Vec::new();
    all.extend(firewall::descriptors());
    all.extend(firewall_policy::descriptors());
    all.extend(rule_group::descriptors());
    all.extend(logging::descriptors());
    all.extend(resource_policy::descriptors());
    all.extend(tagging::descriptors());
    all.sort_by_key(|d| d.name);
    all
});

/// Every declared operation, sorted by name.
pub fn all() -> &'static [OperationDescriptor] {
    &CATALOG
}

/// Finds an operation by action name (`DescribeFirewall`) or command name
/// (`describe-firewall`), ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static OperationDescriptor> {
    CATALOG.iter().find(|d| d.answers_to(name))
}

pub(crate) fn firewall_arn() -> ParameterSpec {
    ParameterSpec::new("FirewallArn", Kind::String).pattern(ARN_PATTERN)
}

pub(crate) fn firewall_name() -> ParameterSpec {
    ParameterSpec::new("FirewallName", Kind::String).pattern(NAME_PATTERN)
}

pub(crate) fn update_token() -> ParameterSpec {
    ParameterSpec::new("UpdateToken", Kind::String)
}

pub(crate) fn description() -> ParameterSpec {
    ParameterSpec::new("Description", Kind::String)
}

pub(crate) fn dry_run() -> ParameterSpec {
    ParameterSpec::new("DryRun", Kind::Boolean)
}

pub(crate) fn tags() -> ParameterSpec {
    ParameterSpec::new("Tag", Kind::ObjectList(&shapes::TAG))
        .at("Tags")
        .aliases(&["Tags"])
}

pub(crate) fn next_token() -> ParameterSpec {
    ParameterSpec::new("NextToken", Kind::String).pattern(NEXT_TOKEN_PATTERN)
}

pub(crate) fn max_results() -> ParameterSpec {
    ParameterSpec::new("MaxResult", Kind::Integer)
        .at("MaxResults")
        .aliases(&["MaxResults", "MaxItems"])
}

/// The `EncryptionConfiguration` group shared by firewalls, policies and rule groups.
pub(crate) fn encryption_configuration() -> [ParameterSpec; 2] {
    [
        ParameterSpec::new("EncryptionConfiguration_KeyId", Kind::String)
            .at("EncryptionConfiguration.KeyId"),
        ParameterSpec::new(
            "EncryptionConfiguration_Type",
            Kind::Enum(shapes::ENCRYPTION_TYPES),
        )
        .at("EncryptionConfiguration.Type"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EXPECTED: &[&str] = &[
        "AssociateFirewallPolicy",
        "AssociateSubnets",
        "CreateFirewall",
        "CreateFirewallPolicy",
        "CreateRuleGroup",
        "DeleteFirewall",
        "DeleteFirewallPolicy",
        "DeleteResourcePolicy",
        "DeleteRuleGroup",
        "DescribeFirewall",
        "DescribeFirewallPolicy",
        "DescribeLoggingConfiguration",
        "DescribeResourcePolicy",
        "DescribeRuleGroup",
        "DescribeRuleGroupMetadata",
        "DisassociateSubnets",
        "ListFirewallPolicies",
        "ListFirewalls",
        "ListRuleGroups",
        "ListTagsForResource",
        "PutResourcePolicy",
        "TagResource",
        "UntagResource",
        "UpdateFirewallDeleteProtection",
        "UpdateFirewallDescription",
        "UpdateFirewallEncryptionConfiguration",
        "UpdateFirewallPolicy",
        "UpdateFirewallPolicyChangeProtection",
        "UpdateLoggingConfiguration",
        "UpdateRuleGroup",
        "UpdateSubnetChangeProtection",
    ];

    #[test]
    fn catalog_lists_every_operation_once() {
        let names: Vec<_> = all().iter().map(|d| d.name).collect();
        assert_eq!(names, EXPECTED);
    }

    #[test]
    fn find_accepts_both_spellings() {
        assert_eq!(find("create-firewall").unwrap().name, "CreateFirewall");
        assert_eq!(find("DESCRIBERULEGROUPMETADATA").unwrap().name, "DescribeRuleGroupMetadata");
        assert!(find("create-firewall-rule").is_none());
    }

    #[test]
    fn parameter_names_and_paths_are_unique() {
        for op in all() {
            let mut names = HashSet::new();
            let mut paths = HashSet::new();
            for p in &op.parameters {
                assert!(names.insert(p.name.to_ascii_lowercase()), "{}: {}", op.name, p.name);
                for alias in p.aliases {
                    assert!(
                        op.parameters
                            .iter()
                            .filter(|other| other.answers_to(alias))
                            .count()
                            == 1,
                        "{}: alias {} is ambiguous",
                        op.name,
                        alias
                    );
                }
                assert!(paths.insert(p.path), "{}: duplicate path {}", op.name, p.path);
            }
        }
    }

    #[test]
    fn no_leaf_path_is_also_a_group() {
        for op in all() {
            for leaf in &op.parameters {
                let prefix = format!("{}.", leaf.path);
                assert!(
                    !op.parameters.iter().any(|p| p.path.starts_with(&prefix)),
                    "{}: {} is both a value and a group",
                    op.name,
                    leaf.path
                );
            }
        }
    }

    #[test]
    fn constraints_and_targets_name_declared_parameters() {
        for op in all() {
            for group in &op.require_any {
                for name in group.iter() {
                    assert!(op.find_parameter(name).is_some(), "{}: {}", op.name, name);
                }
            }
            if let Some(mutation) = &op.mutation {
                for name in mutation.target {
                    assert!(op.find_parameter(name).is_some(), "{}: {}", op.name, name);
                }
                if let Some(echo) = mutation.pass_thru {
                    assert!(op.find_parameter(echo).is_some(), "{}: {}", op.name, echo);
                }
            }
            if let crate::descriptor::DefaultOutput::Field(field) = op.default_output {
                assert!(op.response_fields.contains(&field), "{}: {}", op.name, field);
            }
        }
    }

    #[test]
    fn only_reads_skip_confirmation() {
        for op in all() {
            let reads = op.name.starts_with("Describe") || op.name.starts_with("List");
            assert_eq!(op.is_mutating(), !reads, "{}", op.name);
        }
    }

    #[test]
    fn list_operations_default_to_their_collection() {
        for op in all().iter().filter(|d| d.name.starts_with("List")) {
            assert!(
                matches!(op.default_output, crate::descriptor::DefaultOutput::Field(_)),
                "{}",
                op.name
            );
        }
    }
}
