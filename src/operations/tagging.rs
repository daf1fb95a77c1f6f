//! Tagging operations.

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

use super::{ARN_PATTERN, max_results, next_token, tags};

fn resource_arn() -> ParameterSpec {
    ParameterSpec::new("ResourceArn", Kind::String)
        .pattern(ARN_PATTERN)
        .required()
}

/// Declarations for resource tags.
pub fn descriptors() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("ListTagsForResource")
            .parameter(next_token())
            .parameter(max_results())
            .parameter(resource_arn())
            .responds_with(&["NextToken", "Tags"])
            .default_field("Tags"),
        OperationDescriptor::new("TagResource")
            .parameter(resource_arn())
            .parameter(tags().required())
            .mutating_with_pass_thru(&["ResourceArn"], "ResourceArn"),
        OperationDescriptor::new("UntagResource")
            .parameter(resource_arn())
            .parameter(
                ParameterSpec::new("TagKey", Kind::StringList)
                    .at("TagKeys")
                    .aliases(&["TagKeys"])
                    .required(),
            )
            .mutating_with_pass_thru(&["ResourceArn"], "ResourceArn"),
    ]
}
