//! Firewall logging operations.

use crate::descriptor::{OperationDescriptor, ParameterSpec};
use crate::shape::Kind;

use super::shapes::LOG_DESTINATION_CONFIG;
use super::{firewall_arn, firewall_name};

const BY_ARN_OR_NAME: &[&str] = &["FirewallArn", "FirewallName"];

/// Declarations for firewall logging.
pub fn descriptors() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new("DescribeLoggingConfiguration")
            .parameter(firewall_arn())
            .parameter(firewall_name())
            .require_any(BY_ARN_OR_NAME)
            .responds_with(&["FirewallArn", "LoggingConfiguration"]),
        OperationDescriptor::new("UpdateLoggingConfiguration")
            .parameter(firewall_arn())
            .parameter(firewall_name())
            .parameter(
                ParameterSpec::new(
                    "LoggingConfiguration_LogDestinationConfig",
                    Kind::ObjectList(&LOG_DESTINATION_CONFIG),
                )
                .at("LoggingConfiguration.LogDestinationConfigs"),
            )
            .require_any(BY_ARN_OR_NAME)
            .responds_with(&["FirewallArn", "FirewallName", "LoggingConfiguration"])
            .mutating(BY_ARN_OR_NAME),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{Bindings, bind};
    use crate::request::RequestTemplate;
    use serde_json::json;

    #[test]
    fn destinations_accumulate_under_logging_configuration() {
        let op = descriptors().pop().unwrap();
        let bindings = Bindings::from_pairs([
            ("FirewallName", "edge-fw"),
            (
                "LoggingConfiguration_LogDestinationConfig",
                r#"{"LogType":"FLOW","LogDestinationType":"S3","LogDestination":{"bucketName":"flows"}}"#,
            ),
            (
                "LoggingConfiguration_LogDestinationConfig",
                r#"{"LogType":"ALERT","LogDestinationType":"CloudWatchLogs","LogDestination":{"logGroup":"alerts"}}"#,
            ),
        ]);
        let ctx = bind(&op, &bindings).unwrap();
        let request = RequestTemplate::for_operation(&op).build(&ctx);
        let configs = &request["LoggingConfiguration"]["LogDestinationConfigs"];
        assert_eq!(configs.as_array().unwrap().len(), 2);
        assert_eq!(configs[1]["LogType"], json!("ALERT"));
    }

    #[test]
    fn clearing_logging_sends_no_configuration() {
        let op = descriptors().pop().unwrap();
        let ctx = bind(&op, &Bindings::from_pairs([("FirewallName", "edge-fw")])).unwrap();
        let request = RequestTemplate::for_operation(&op).build(&ctx);
        assert_eq!(serde_json::Value::Object(request), json!({"FirewallName": "edge-fw"}));
    }
}
