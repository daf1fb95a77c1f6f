//! Structured value shapes shared by the operation declarations.

use crate::shape::{Kind, Member, Shape};

/// Address families a firewall endpoint or subnet may use.
pub const IP_ADDRESS_TYPES: &[&str] = &["DUALSTACK", "IPV4", "IPV6"];

/// Encryption key types.
pub const ENCRYPTION_TYPES: &[&str] = &["CUSTOMER_KMS", "AWS_OWNED_KMS_KEY"];

/// Rule group types.
pub const RULE_GROUP_TYPES: &[&str] = &["STATELESS", "STATEFUL"];

/// Resource managed-by filters for list calls.
pub const RESOURCE_SCOPES: &[&str] = &["MANAGED", "ACCOUNT"];

/// Managed rule group categories for list calls.
pub const MANAGED_TYPES: &[&str] = &["AWS_MANAGED_THREAT_SIGNATURES", "AWS_MANAGED_DOMAIN_LISTS"];

/// Evaluation order of stateful rules.
pub const RULE_ORDERS: &[&str] = &["DEFAULT_ACTION_ORDER", "STRICT_ORDER"];

/// What the stateful engine does with a broken stream.
pub const STREAM_EXCEPTION_POLICIES: &[&str] = &["DROP", "CONTINUE", "REJECT"];

/// Domain list match types.
pub const GENERATED_RULES_TYPES: &[&str] = &["ALLOWLIST", "DENYLIST"];

/// Domain list inspection targets.
pub const TARGET_TYPES: &[&str] = &["TLS_SNI", "HTTP_HOST"];

const STATEFUL_ACTIONS: &[&str] = &["PASS", "DROP", "ALERT", "REJECT"];

const PROTOCOLS: &[&str] = &[
    "IP", "TCP", "UDP", "ICMP", "HTTP", "FTP", "TLS", "SMB", "DNS", "DCERPC", "SSH", "SMTP",
    "IMAP", "MSN", "KRB5", "IKEV2", "TFTP", "NTP", "DHCP",
];

const DIRECTIONS: &[&str] = &["FORWARD", "ANY"];

const LOG_TYPES: &[&str] = &["ALERT", "FLOW", "TLS"];

const LOG_DESTINATION_TYPES: &[&str] = &["S3", "CloudWatchLogs", "KinesisDataFirehose"];

/// A subnet the firewall places an endpoint in.
pub static SUBNET_MAPPING: Shape = Shape {
    name: "SubnetMapping",
    members: &[
        Member::required("SubnetId", Kind::String),
        Member::optional("IPAddressType", Kind::Enum(IP_ADDRESS_TYPES)),
    ],
};

/// A key/value resource tag.
pub static TAG: Shape = Shape {
    name: "Tag",
    members: &[
        Member::required("Key", Kind::String),
        Member::required("Value", Kind::String),
    ],
};

static STATEFUL_RULE_GROUP_OVERRIDE: Shape = Shape {
    name: "StatefulRuleGroupOverride",
    members: &[Member::optional("Action", Kind::Enum(&["DROP_TO_ALERT"]))],
};

/// A stateful rule group referenced by a firewall policy.
pub static STATEFUL_RULE_GROUP_REFERENCE: Shape = Shape {
    name: "StatefulRuleGroupReference",
    members: &[
        Member::required("ResourceArn", Kind::String),
        Member::optional("Priority", Kind::Integer),
        Member::optional("Override", Kind::Object(&STATEFUL_RULE_GROUP_OVERRIDE)),
    ],
};

/// A stateless rule group referenced by a firewall policy.
pub static STATELESS_RULE_GROUP_REFERENCE: Shape = Shape {
    name: "StatelessRuleGroupReference",
    members: &[
        Member::required("ResourceArn", Kind::String),
        Member::required("Priority", Kind::Integer),
    ],
};

static DIMENSION: Shape = Shape {
    name: "Dimension",
    members: &[Member::required("Value", Kind::String)],
};

static PUBLISH_METRIC_ACTION: Shape = Shape {
    name: "PublishMetricAction",
    members: &[Member::required("Dimensions", Kind::ObjectList(&DIMENSION))],
};

static ACTION_DEFINITION: Shape = Shape {
    name: "ActionDefinition",
    members: &[Member::optional(
        "PublishMetricAction",
        Kind::Object(&PUBLISH_METRIC_ACTION),
    )],
};

/// A named custom action for stateless processing.
pub static CUSTOM_ACTION: Shape = Shape {
    name: "CustomAction",
    members: &[
        Member::required("ActionName", Kind::String),
        Member::required("ActionDefinition", Kind::Object(&ACTION_DEFINITION)),
    ],
};

/// A set of IP address ranges used as a rule variable.
pub static IP_SET: Shape = Shape {
    name: "IPSet",
    members: &[Member::required("Definition", Kind::StringList)],
};

/// A set of port ranges used as a rule variable.
pub static PORT_SET: Shape = Shape {
    name: "PortSet",
    members: &[Member::optional("Definition", Kind::StringList)],
};

/// A reference to a managed prefix list or resource group.
pub static IP_SET_REFERENCE: Shape = Shape {
    name: "IPSetReference",
    members: &[Member::optional("ReferenceArn", Kind::String)],
};

static HEADER: Shape = Shape {
    name: "Header",
    members: &[
        Member::required("Protocol", Kind::Enum(PROTOCOLS)),
        Member::required("Source", Kind::String),
        Member::required("SourcePort", Kind::String),
        Member::required("Direction", Kind::Enum(DIRECTIONS)),
        Member::required("Destination", Kind::String),
        Member::required("DestinationPort", Kind::String),
    ],
};

static RULE_OPTION: Shape = Shape {
    name: "RuleOption",
    members: &[
        Member::required("Keyword", Kind::String),
        Member::optional("Settings", Kind::StringList),
    ],
};

/// A Suricata-compatible stateful rule in structured form.
pub static STATEFUL_RULE: Shape = Shape {
    name: "StatefulRule",
    members: &[
        Member::required("Action", Kind::Enum(STATEFUL_ACTIONS)),
        Member::required("Header", Kind::Object(&HEADER)),
        Member::required("RuleOptions", Kind::ObjectList(&RULE_OPTION)),
    ],
};

static RULE_DEFINITION: Shape = Shape {
    name: "RuleDefinition",
    members: &[
        Member::required("MatchAttributes", Kind::Any),
        Member::required("Actions", Kind::StringList),
    ],
};

/// A stateless rule with its priority.
pub static STATELESS_RULE: Shape = Shape {
    name: "StatelessRule",
    members: &[
        Member::required("RuleDefinition", Kind::Object(&RULE_DEFINITION)),
        Member::required("Priority", Kind::Integer),
    ],
};

/// Where one type of firewall log is delivered.
pub static LOG_DESTINATION_CONFIG: Shape = Shape {
    name: "LogDestinationConfig",
    members: &[
        Member::required("LogType", Kind::Enum(LOG_TYPES)),
        Member::required("LogDestinationType", Kind::Enum(LOG_DESTINATION_TYPES)),
        Member::required("LogDestination", Kind::StringMap),
    ],
};
