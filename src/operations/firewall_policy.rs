//! Firewall policy operations.
//!
//! A policy's settings all live under the nested `FirewallPolicy` group of the
//! request, with `StatefulEngineOptions`, its `FlowTimeouts` and the
//! `PolicyVariables` nested one and two levels further down.

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

use super::shapes::{
    CUSTOM_ACTION, IP_SET, RULE_ORDERS, STATEFUL_RULE_GROUP_REFERENCE,
    STATELESS_RULE_GROUP_REFERENCE, STREAM_EXCEPTION_POLICIES,
};
use super::{
    ARN_PATTERN, NAME_PATTERN, description, dry_run, encryption_configuration, max_results,
    next_token, tags, update_token,
};

const BY_ARN_OR_NAME: &[&str] = &["FirewallPolicyArn", "FirewallPolicyName"];

fn identified(name: &'static str) -> OperationDescriptor {
    OperationDescriptor::new(name)
        .parameter(
            ParameterSpec::new("FirewallPolicyName", Kind::String).pattern(NAME_PATTERN),
        )
        .parameter(ParameterSpec::new("FirewallPolicyArn", Kind::String).pattern(ARN_PATTERN))
        .require_any(BY_ARN_OR_NAME)
}

/// The members of the `FirewallPolicy` group.
fn policy_document() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new("FirewallPolicy_StatelessDefaultAction", Kind::StringList)
            .at("FirewallPolicy.StatelessDefaultActions")
            .required(),
        ParameterSpec::new("FirewallPolicy_StatelessFragmentDefaultAction", Kind::StringList)
            .at("FirewallPolicy.StatelessFragmentDefaultActions")
            .required(),
        ParameterSpec::new(
            "FirewallPolicy_StatelessCustomAction",
            Kind::ObjectList(&CUSTOM_ACTION),
        )
        .at("FirewallPolicy.StatelessCustomActions"),
        ParameterSpec::new(
            "FirewallPolicy_StatelessRuleGroupReference",
            Kind::ObjectList(&STATELESS_RULE_GROUP_REFERENCE),
        )
        .at("FirewallPolicy.StatelessRuleGroupReferences"),
        ParameterSpec::new(
            "FirewallPolicy_StatefulRuleGroupReference",
            Kind::ObjectList(&STATEFUL_RULE_GROUP_REFERENCE),
        )
        .at("FirewallPolicy.StatefulRuleGroupReferences"),
        ParameterSpec::new("FirewallPolicy_StatefulDefaultAction", Kind::StringList)
            .at("FirewallPolicy.StatefulDefaultActions"),
        ParameterSpec::new("StatefulEngineOptions_RuleOrder", Kind::Enum(RULE_ORDERS))
            .at("FirewallPolicy.StatefulEngineOptions.RuleOrder"),
        ParameterSpec::new(
            "StatefulEngineOptions_StreamExceptionPolicy",
            Kind::Enum(STREAM_EXCEPTION_POLICIES),
        )
        .at("FirewallPolicy.StatefulEngineOptions.StreamExceptionPolicy"),
        ParameterSpec::new("FlowTimeouts_TcpIdleTimeoutSecond", Kind::Integer)
            .at("FirewallPolicy.StatefulEngineOptions.FlowTimeouts.TcpIdleTimeoutSeconds"),
        ParameterSpec::new("PolicyVariables_RuleVariable", Kind::ObjectMap(&IP_SET))
            .at("FirewallPolicy.PolicyVariables.RuleVariables"),
        ParameterSpec::new("FirewallPolicy_TLSInspectionConfigurationArn", Kind::String)
            .at("FirewallPolicy.TLSInspectionConfigurationArn")
            .pattern(ARN_PATTERN),
    ]
}

/// Declarations for the firewall policy resource.
pub fn descriptors() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("CreateFirewallPolicy")
            .parameter(
                ParameterSpec::new("FirewallPolicyName", Kind::String)
                    .pattern(NAME_PATTERN)
                    .required(),
            )
            .parameters(policy_document())
            .parameter(description())
            .parameter(tags())
            .parameter(dry_run())
            .parameters(encryption_configuration())
            .responds_with(&["UpdateToken", "FirewallPolicyResponse"])
            .mutating(&["FirewallPolicyName"]),
        identified("DeleteFirewallPolicy")
            .responds_with(&["FirewallPolicyResponse"])
            .mutating(BY_ARN_OR_NAME),
        identified("DescribeFirewallPolicy").responds_with(&[
            "UpdateToken",
            "FirewallPolicyResponse",
            "FirewallPolicy",
        ]),
        OperationDescriptor::new("ListFirewallPolicies")
            .parameter(next_token())
            .parameter(max_results())
            .responds_with(&["NextToken", "FirewallPolicies"])
            .default_field("FirewallPolicies"),
        identified("UpdateFirewallPolicy")
            .parameter(update_token().required())
            .parameters(policy_document())
            .parameter(description())
            .parameter(dry_run())
            .parameters(encryption_configuration())
            .responds_with(&["UpdateToken", "FirewallPolicyResponse"])
            .mutating(BY_ARN_OR_NAME),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{Bindings, bind};
    use crate::request::RequestTemplate;
    use serde_json::json;

    fn create() -> OperationDescriptor {
        descriptors()
            .into_iter()
            .find(|d| d.name == "CreateFirewallPolicy")
            .unwrap()
    }

    #[test]
    fn policy_groups_nest_three_levels_deep() {
        let groups = RequestTemplate::for_operation(&create()).groups();
        assert!(groups.contains(&"FirewallPolicy".to_string()));
        assert!(groups.contains(&"FirewallPolicy.StatefulEngineOptions".to_string()));
        assert!(groups.contains(&"FirewallPolicy.StatefulEngineOptions.FlowTimeouts".to_string()));
        assert!(groups.contains(&"FirewallPolicy.PolicyVariables".to_string()));
        assert!(groups.contains(&"EncryptionConfiguration".to_string()));
    }

    #[test]
    fn unbound_engine_options_are_omitted() {
        let op = create();
        let bindings = Bindings::from_pairs([
            ("FirewallPolicyName", "base"),
            ("FirewallPolicy_StatelessDefaultAction", "aws:forward_to_sfe"),
            ("FirewallPolicy_StatelessFragmentDefaultAction", "aws:pass"),
            ("FlowTimeouts_TcpIdleTimeoutSecond", "350"),
        ]);
        let ctx = bind(&op, &bindings).unwrap();
        let request = RequestTemplate::for_operation(&op).build(&ctx);
        assert_eq!(
            serde_json::Value::Object(request),
            json!({
                "FirewallPolicyName": "base",
                "FirewallPolicy": {
                    "StatelessDefaultActions": ["aws:forward_to_sfe"],
                    "StatelessFragmentDefaultActions": ["aws:pass"],
                    "StatefulEngineOptions": {
                        "FlowTimeouts": {"TcpIdleTimeoutSeconds": 350}
                    }
                }
            })
        );
    }

    #[test]
    fn rule_variables_are_validated_per_entry() {
        let op = create();
        let good = Bindings::from_pairs([
            ("FirewallPolicyName", "base"),
            ("FirewallPolicy_StatelessDefaultAction", "aws:drop"),
            ("FirewallPolicy_StatelessFragmentDefaultAction", "aws:drop"),
            ("PolicyVariables_RuleVariable", r#"{"HOME_NET": {"Definition": ["10.0.0.0/16"]}}"#),
        ]);
        assert!(bind(&op, &good).is_ok());

        let bad = Bindings::from_pairs([
            ("FirewallPolicyName", "base"),
            ("FirewallPolicy_StatelessDefaultAction", "aws:drop"),
            ("FirewallPolicy_StatelessFragmentDefaultAction", "aws:drop"),
            ("PolicyVariables_RuleVariable", r#"{"HOME_NET": {"Definition": "10.0.0.0/16"}}"#),
        ]);
        assert!(bind(&op, &bad).is_err());
    }
}
