//! Resource policy operations.
//!
//! Resource policies share firewall policies and rule groups with other
//! accounts. The mutating calls return nothing useful, so they declare
//! `ResourceArn` as their pass-thru parameter.

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

use super::ARN_PATTERN;

fn resource_arn() -> ParameterSpec {
    ParameterSpec::new("ResourceArn", Kind::String)
        .pattern(ARN_PATTERN)
        .required()
}

/// Declarations for resource policies.
pub fn descriptors() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("DeleteResourcePolicy")
            .parameter(resource_arn())
            .mutating_with_pass_thru(&["ResourceArn"], "ResourceArn"),
        OperationDescriptor::new("DescribeResourcePolicy")
            .parameter(resource_arn())
            .responds_with(&["Policy"])
            .default_field("Policy"),
        OperationDescriptor::new("PutResourcePolicy")
            .parameter(resource_arn())
            .parameter(ParameterSpec::new("Policy", Kind::String).required())
            .mutating_with_pass_thru(&["ResourceArn"], "ResourceArn"),
    ]
}
