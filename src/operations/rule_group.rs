//! Rule group operations.
//!
//! Rule group contents nest deepest of all: the rules live under
//! `RuleGroup.RulesSource`, and a domain list sits one level further down in
//! `RuleGroup.RulesSource.RulesSourceList`. Only one kind of rules source is
//! accepted by the service; that choice is left to it.

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

use super::shapes::{
    CUSTOM_ACTION, GENERATED_RULES_TYPES, IP_SET, IP_SET_REFERENCE, MANAGED_TYPES, PORT_SET,
    RESOURCE_SCOPES, RULE_GROUP_TYPES, RULE_ORDERS, STATEFUL_RULE, STATELESS_RULE,
};
use super::{
    ARN_PATTERN, NAME_PATTERN, description, dry_run, encryption_configuration, max_results,
    next_token, tags, update_token,
};

const BY_ARN_OR_NAME: &[&str] = &["RuleGroupArn", "RuleGroupName"];

fn rule_group_type() -> ParameterSpec {
    ParameterSpec::new("Type", Kind::Enum(RULE_GROUP_TYPES))
}

fn identified(name: &'static str) -> OperationDescriptor {
    OperationDescriptor::new(name)
        .parameter(ParameterSpec::new("RuleGroupName", Kind::String).pattern(NAME_PATTERN))
        .parameter(ParameterSpec::new("RuleGroupArn", Kind::String).pattern(ARN_PATTERN))
        .parameter(rule_group_type())
        .require_any(BY_ARN_OR_NAME)
}

/// The members of the `RuleGroup` group.
fn rule_group_document() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new("RuleVariables_IPSet", Kind::ObjectMap(&IP_SET))
            .at("RuleGroup.RuleVariables.IPSets"),
        ParameterSpec::new("RuleVariables_PortSet", Kind::ObjectMap(&PORT_SET))
            .at("RuleGroup.RuleVariables.PortSets"),
        ParameterSpec::new("ReferenceSets_IPSetReference", Kind::ObjectMap(&IP_SET_REFERENCE))
            .at("RuleGroup.ReferenceSets.IPSetReferences"),
        ParameterSpec::new("RulesSource_RulesString", Kind::String)
            .at("RuleGroup.RulesSource.RulesString"),
        ParameterSpec::new(
            "RulesSourceList_GeneratedRulesType",
            Kind::Enum(GENERATED_RULES_TYPES),
        )
        .at("RuleGroup.RulesSource.RulesSourceList.GeneratedRulesType"),
        ParameterSpec::new("RulesSourceList_Target", Kind::StringList)
            .at("RuleGroup.RulesSource.RulesSourceList.Targets"),
        ParameterSpec::new("RulesSourceList_TargetType", Kind::StringList)
            .at("RuleGroup.RulesSource.RulesSourceList.TargetTypes"),
        ParameterSpec::new("RulesSource_StatefulRule", Kind::ObjectList(&STATEFUL_RULE))
            .at("RuleGroup.RulesSource.StatefulRules"),
        ParameterSpec::new(
            "StatelessRulesAndCustomActions_StatelessRule",
            Kind::ObjectList(&STATELESS_RULE),
        )
        .at("RuleGroup.RulesSource.StatelessRulesAndCustomActions.StatelessRules"),
        ParameterSpec::new(
            "StatelessRulesAndCustomActions_CustomAction",
            Kind::ObjectList(&CUSTOM_ACTION),
        )
        .at("RuleGroup.RulesSource.StatelessRulesAndCustomActions.CustomActions"),
        ParameterSpec::new("StatefulRuleOptions_RuleOrder", Kind::Enum(RULE_ORDERS))
            .at("RuleGroup.StatefulRuleOptions.RuleOrder"),
    ]
}

fn source_metadata() -> [ParameterSpec; 2] {
    [
        ParameterSpec::new("SourceMetadata_SourceArn", Kind::String)
            .at("SourceMetadata.SourceArn")
            .pattern(ARN_PATTERN),
        ParameterSpec::new("SourceMetadata_SourceUpdateToken", Kind::String)
            .at("SourceMetadata.SourceUpdateToken"),
    ]
}

/// Suricata rules given as one string instead of structured rules.
fn rules_string() -> ParameterSpec {
    ParameterSpec::new("Rule", Kind::String)
        .at("Rules")
        .aliases(&["Rules"])
}

/// Declarations for the rule group resource.
pub fn descriptors() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("CreateRuleGroup")
            .parameter(
                ParameterSpec::new("RuleGroupName", Kind::String)
                    .pattern(NAME_PATTERN)
                    .required(),
            )
            .parameters(rule_group_document())
            .parameter(rules_string())
            .parameter(rule_group_type().required())
            .parameter(description())
            .parameter(ParameterSpec::new("Capacity", Kind::Integer).required())
            .parameter(tags())
            .parameter(dry_run())
            .parameters(encryption_configuration())
            .parameters(source_metadata())
            .responds_with(&["UpdateToken", "RuleGroupResponse"])
            .mutating(&["RuleGroupName", "Type"]),
        identified("DeleteRuleGroup")
            .responds_with(&["RuleGroupResponse"])
            .mutating(BY_ARN_OR_NAME),
        identified("DescribeRuleGroup").responds_with(&[
            "UpdateToken",
            "RuleGroup",
            "RuleGroupResponse",
        ]),
        identified("DescribeRuleGroupMetadata").responds_with(&[
            "RuleGroupArn",
            "RuleGroupName",
            "Description",
            "Type",
            "Capacity",
            "StatefulRuleOptions",
            "LastModifiedTime",
        ]),
        OperationDescriptor::new("ListRuleGroups")
            .parameter(next_token())
            .parameter(max_results())
            .parameter(ParameterSpec::new("Scope", Kind::Enum(RESOURCE_SCOPES)))
            .parameter(ParameterSpec::new("ManagedType", Kind::Enum(MANAGED_TYPES)))
            .parameter(rule_group_type())
            .responds_with(&["NextToken", "RuleGroups"])
            .default_field("RuleGroups"),
        identified("UpdateRuleGroup")
            .parameter(update_token().required())
            .parameters(rule_group_document())
            .parameter(rules_string())
            .parameter(description())
            .parameter(dry_run())
            .parameters(encryption_configuration())
            .parameters(source_metadata())
            .responds_with(&["UpdateToken", "RuleGroupResponse"])
            .mutating(BY_ARN_OR_NAME),
    ]
}
