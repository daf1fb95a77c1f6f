//! Firewall operations.

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

use super::shapes::SUBNET_MAPPING;
use super::{
    ARN_PATTERN, NAME_PATTERN, VPC_ID_PATTERN, description, encryption_configuration,
    firewall_arn, firewall_name, max_results, next_token, tags, update_token,
};

const BY_ARN_OR_NAME: &[&str] = &["FirewallArn", "FirewallName"];

/// Parameters that identify an existing firewall.
fn identified(name: &'static str) -> OperationDescriptor {
    OperationDescriptor::new(name)
        .parameter(firewall_arn())
        .parameter(firewall_name())
        .require_any(BY_ARN_OR_NAME)
}

fn subnet_mappings() -> ParameterSpec {
    ParameterSpec::new("SubnetMapping", Kind::ObjectList(&SUBNET_MAPPING))
        .at("SubnetMappings")
        .aliases(&["SubnetMappings"])
        .required()
}

fn protection_update(
    name: &'static str,
    flag: &'static str,
    response_fields: &'static [&'static str],
) -> OperationDescriptor {
    identified(name)
        .parameter(update_token())
        .parameter(ParameterSpec::new(flag, Kind::Boolean).required())
        .responds_with(response_fields)
        .mutating(BY_ARN_OR_NAME)
}

/// Declarations for the firewall resource.
pub fn descriptors() -> Vec<OperationDescriptor> {
    vec![
        identified("AssociateFirewallPolicy")
            .parameter(update_token())
            .parameter(
                ParameterSpec::new("FirewallPolicyArn", Kind::String)
                    .pattern(ARN_PATTERN)
                    .required(),
            )
            .responds_with(&["FirewallArn", "FirewallName", "FirewallPolicyArn", "UpdateToken"])
            .mutating(BY_ARN_OR_NAME),
        identified("AssociateSubnets")
            .parameter(update_token())
            .parameter(subnet_mappings())
            .responds_with(&["FirewallArn", "FirewallName", "SubnetMappings", "UpdateToken"])
            .mutating(BY_ARN_OR_NAME),
        OperationDescriptor::new("CreateFirewall")
            .parameter(
                ParameterSpec::new("FirewallName", Kind::String)
                    .pattern(NAME_PATTERN)
                    .required(),
            )
            .parameter(
                ParameterSpec::new("FirewallPolicyArn", Kind::String)
                    .pattern(ARN_PATTERN)
                    .required(),
            )
            .parameter(
                ParameterSpec::new("VpcId", Kind::String)
                    .pattern(VPC_ID_PATTERN)
                    .required(),
            )
            .parameter(subnet_mappings())
            .parameter(ParameterSpec::new("DeleteProtection", Kind::Boolean))
            .parameter(ParameterSpec::new("SubnetChangeProtection", Kind::Boolean))
            .parameter(ParameterSpec::new("FirewallPolicyChangeProtection", Kind::Boolean))
            .parameter(description())
            .parameter(tags())
            .parameters(encryption_configuration())
            .responds_with(&["Firewall", "FirewallStatus"])
            .mutating(&["FirewallName"]),
        identified("DeleteFirewall")
            .responds_with(&["Firewall", "FirewallStatus"])
            .mutating(BY_ARN_OR_NAME),
        identified("DescribeFirewall").responds_with(&["UpdateToken", "Firewall", "FirewallStatus"]),
        identified("DisassociateSubnets")
            .parameter(update_token())
            .parameter(
                ParameterSpec::new("SubnetId", Kind::StringList)
                    .at("SubnetIds")
                    .aliases(&["SubnetIds"])
                    .required(),
            )
            .responds_with(&["FirewallArn", "FirewallName", "SubnetMappings", "UpdateToken"])
            .mutating(BY_ARN_OR_NAME),
        OperationDescriptor::new("ListFirewalls")
            .parameter(next_token())
            .parameter(
                ParameterSpec::new("VpcId", Kind::StringList)
                    .at("VpcIds")
                    .aliases(&["VpcIds"]),
            )
            .parameter(max_results())
            .responds_with(&["NextToken", "Firewalls"])
            .default_field("Firewalls"),
        protection_update(
            "UpdateFirewallDeleteProtection",
            "DeleteProtection",
            &["FirewallArn", "FirewallName", "DeleteProtection", "UpdateToken"],
        ),
        identified("UpdateFirewallDescription")
            .parameter(update_token())
            .parameter(description())
            .responds_with(&["FirewallArn", "FirewallName", "Description", "UpdateToken"])
            .mutating(BY_ARN_OR_NAME),
        identified("UpdateFirewallEncryptionConfiguration")
            .parameter(update_token())
            .parameters(encryption_configuration())
            .responds_with(&[
                "FirewallArn",
                "FirewallName",
                "UpdateToken",
                "EncryptionConfiguration",
            ])
            .mutating(BY_ARN_OR_NAME),
        protection_update(
            "UpdateFirewallPolicyChangeProtection",
            "FirewallPolicyChangeProtection",
            &[
                "UpdateToken",
                "FirewallArn",
                "FirewallName",
                "FirewallPolicyChangeProtection",
            ],
        ),
        protection_update(
            "UpdateSubnetChangeProtection",
            "SubnetChangeProtection",
            &[
                "UpdateToken",
                "FirewallArn",
                "FirewallName",
                "SubnetChangeProtection",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::shapes::IP_ADDRESS_TYPES;
    use crate::binder::{Bindings, bind};
    use crate::request::RequestTemplate;
    use serde_json::json;

    fn find(name: &str) -> OperationDescriptor {
        descriptors().into_iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn create_firewall_builds_flat_request_without_encryption() {
        let op = find("CreateFirewall");
        let bindings = Bindings::from_pairs([
            ("FirewallName", "edge-fw"),
            (
                "FirewallPolicyArn",
                "arn:aws:network-firewall:us-east-1:123456789012:firewall-policy/base",
            ),
            ("VpcId", "vpc-0abc"),
            ("SubnetMapping", r#"[{"SubnetId":"subnet-1"}]"#),
        ]);
        let ctx = bind(&op, &bindings).unwrap();
        let request = RequestTemplate::for_operation(&op).build(&ctx);
        assert_eq!(
            serde_json::Value::Object(request),
            json!({
                "FirewallName": "edge-fw",
                "FirewallPolicyArn": "arn:aws:network-firewall:us-east-1:123456789012:firewall-policy/base",
                "VpcId": "vpc-0abc",
                "SubnetMappings": [{"SubnetId": "subnet-1"}]
            })
        );
    }

    #[test]
    fn vpc_and_name_patterns_are_enforced() {
        let op = find("CreateFirewall");
        let bindings = Bindings::from_pairs([
            ("FirewallName", "edge fw"),
            ("FirewallPolicyArn", "arn:aws:network-firewall:::firewall-policy/base"),
            ("VpcId", "vpc-0abc"),
            ("SubnetMapping", r#"{"SubnetId":"subnet-1"}"#),
        ]);
        assert!(bind(&op, &bindings).is_err());

        let bindings = Bindings::from_pairs([
            ("FirewallName", "edge-fw"),
            ("FirewallPolicyArn", "arn:aws:network-firewall:::firewall-policy/base"),
            ("VpcId", "subnet-0abc"),
            ("SubnetMapping", r#"{"SubnetId":"subnet-1"}"#),
        ]);
        assert!(bind(&op, &bindings).is_err());
    }

    #[test]
    fn protection_updates_require_their_flag() {
        let op = find("UpdateSubnetChangeProtection");
        assert!(op.response_fields.contains(&"SubnetChangeProtection"));
        let err = bind(&op, &Bindings::from_pairs([("FirewallName", "fw1")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation UpdateSubnetChangeProtection requires parameter 'SubnetChangeProtection'"
        );
    }

    #[test]
    fn subnet_mappings_accept_address_families() {
        let op = find("AssociateSubnets");
        for family in IP_ADDRESS_TYPES {
            let mapping = format!(r#"{{"SubnetId":"subnet-1","IPAddressType":"{}"}}"#, family);
            let bindings = Bindings::from_pairs([
                ("FirewallName", "fw1"),
                ("SubnetMapping", mapping.as_str()),
            ]);
            assert!(bind(&op, &bindings).is_ok(), "{}", family);
        }
        let bindings = Bindings::from_pairs([
            ("FirewallName", "fw1"),
            ("SubnetMapping", r#"{"SubnetId":"subnet-1","IPAddressType":"IPV5"}"#),
        ]);
        assert!(bind(&op, &bindings).is_err());
    }
}
