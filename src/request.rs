//! # Request Builder
//!
//! Copies bound parameters into the request document. Parameter paths form a
//! tree: leaves are parameters and interior nodes are nested groups such as
//! `EncryptionConfiguration` or `RuleGroup.RulesSource.RulesSourceList`.
//!
//! Each group passes through the same gate: it is emitted only when at least
//! one leaf beneath it is bound, and it then contains exactly the members that
//! are bound. A group with nothing bound is left out of the request entirely,
//! never sent as `null` or `{}`. Lists and maps are copied verbatim.
//!
//! ```rust
//! use nfwctl::{Bindings, Kind, OperationDescriptor, ParameterSpec, RequestTemplate, bind};
//! use serde_json::json;
//!
//! let op = OperationDescriptor::new("CreateFirewall")
//!     .parameter(ParameterSpec::new("FirewallName", Kind::String))
//!     .parameter(ParameterSpec::new("EncryptionConfiguration_KeyId", Kind::String)
//!         .at("EncryptionConfiguration.KeyId"))
//!     .parameter(ParameterSpec::new("EncryptionConfiguration_Type", Kind::String)
//!         .at("EncryptionConfiguration.Type"));
//!
//! let ctx = bind(&op, &Bindings::from_pairs([("FirewallName", "fw1")])).unwrap();
//! let request = RequestTemplate::for_operation(&op).build(&ctx);
//! assert_eq!(serde_json::Value::Object(request), json!({"FirewallName": "fw1"}));
//! ```

use serde_json::{Map, Value};

use crate::binder::InvocationContext;
use crate::descriptor::OperationDescriptor;

/// A request document, built fresh for every invocation.
pub type Request = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Leaf(&'static str),
    Group(Vec<(&'static str, Node)>),
}

/// The group tree of one operation's request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    root: Vec<(&'static str, Node)>,
}

impl RequestTemplate {
    /// Compiles the parameter paths of an operation into a group tree.
    ///
    /// Members keep the order in which their first parameter is declared.
    pub fn for_operation(descriptor: &OperationDescriptor) -> Self {
        let mut root: Vec<(&'static str, Node)> = Vec::new();
        for spec in &descriptor.parameters {
            let segments: Vec<&'static str> = spec.path_segments().collect();
            insert(&mut root, &segments, spec.name);
        }
        Self { root }
    }

    /// Builds the request from bound values.
    ///
    /// # Arguments
    /// * `ctx` - The bound values of this invocation
    ///
    /// # Returns
    /// The request document. Unbound leaves are absent, and so is every
    /// group without a bound leaf beneath it.
    pub fn build(&self, ctx: &InvocationContext) -> Request {
        build_group(&self.root, ctx).unwrap_or_default()
    }

    /// Returns the dotted paths of every group in the tree, outermost first.
    pub fn groups(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_groups(&self.root, "", &mut out);
        out
    }
}

fn insert(children: &mut Vec<(&'static str, Node)>, segments: &[&'static str], param: &'static str) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let position = children.iter().position(|(name, _)| name == head);
    if rest.is_empty() {
        match position {
            Some(i) => children[i].1 = Node::Leaf(param),
            None => children.push((head, Node::Leaf(param))),
        }
        return;
    }
    let index = match position {
        Some(i) if matches!(children[i].1, Node::Group(_)) => i,
        Some(i) => {
            children[i].1 = Node::Group(Vec::new());
            i
        }
        None => {
            children.push((head, Node::Group(Vec::new())));
            children.len() - 1
        }
    };
    if let Node::Group(grandchildren) = &mut children[index].1 {
        insert(grandchildren, rest, param);
    }
}

/// Builds one group; `None` when nothing beneath it is bound.
fn build_group(children: &[(&'static str, Node)], ctx: &InvocationContext) -> Option<Request> {
    let mut out = Map::new();
    for (name, node) in children {
        match node {
            Node::Leaf(param) => {
                if let Some(value) = ctx.get(param) {
                    out.insert(name.to_string(), value.to_value());
                }
            }
            Node::Group(members) => {
                if let Some(group) = build_group(members, ctx) {
                    out.insert(name.to_string(), Value::Object(group));
                }
            }
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

fn collect_groups(children: &[(&'static str, Node)], prefix: &str, out: &mut Vec<String>) {
    for (name, node) in children {
        if let Node::Group(members) = node {
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", prefix, name)
            };
            out.push(path.clone());
            collect_groups(members, &path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{Bindings, bind};
    use crate::descriptor::ParameterSpec;
    use crate::shape::Kind;
    use serde_json::json;

    fn rule_group_op() -> OperationDescriptor {
        OperationDescriptor::new("CreateRuleGroup")
            .parameter(ParameterSpec::new("RuleGroupName", Kind::String))
            .parameter(
                ParameterSpec::new("RulesSource_RulesString", Kind::String)
                    .at("RuleGroup.RulesSource.RulesString"),
            )
            .parameter(
                ParameterSpec::new("RulesSourceList_GeneratedRulesType", Kind::String)
                    .at("RuleGroup.RulesSource.RulesSourceList.GeneratedRulesType"),
            )
            .parameter(
                ParameterSpec::new("RulesSourceList_Target", Kind::StringList)
                    .at("RuleGroup.RulesSource.RulesSourceList.Targets"),
            )
            .parameter(
                ParameterSpec::new("RulesSourceList_TargetType", Kind::StringList)
                    .at("RuleGroup.RulesSource.RulesSourceList.TargetTypes"),
            )
            .parameter(
                ParameterSpec::new("RuleVariables_IPSet", Kind::Any)
                    .at("RuleGroup.RuleVariables.IPSets"),
            )
    }

    fn build(pairs: &[(&str, &str)]) -> Value {
        let op = rule_group_op();
        let ctx = bind(&op, &Bindings::from_pairs(pairs.iter().copied())).unwrap();
        Value::Object(RequestTemplate::for_operation(&op).build(&ctx))
    }

    #[test]
    fn unbound_groups_are_absent() {
        assert_eq!(build(&[("RuleGroupName", "rg")]), json!({"RuleGroupName": "rg"}));
        assert_eq!(build(&[]), json!({}));
    }

    #[test]
    fn innermost_leaf_pulls_in_its_ancestors_only() {
        let request = build(&[("RulesSourceList_Target", ".example.com")]);
        assert_eq!(
            request,
            json!({
                "RuleGroup": {
                    "RulesSource": {
                        "RulesSourceList": {"Targets": [".example.com"]}
                    }
                }
            })
        );
    }

    #[test]
    fn sibling_groups_gate_independently() {
        let request = build(&[
            ("RulesSource_RulesString", "pass tcp any any -> any any (sid:1;)"),
            ("RuleVariables_IPSet", r#"{"HOME_NET":{"Definition":["10.0.0.0/16"]}}"#),
        ]);
        assert_eq!(
            request,
            json!({
                "RuleGroup": {
                    "RulesSource": {"RulesString": "pass tcp any any -> any any (sid:1;)"},
                    "RuleVariables": {"IPSets": {"HOME_NET": {"Definition": ["10.0.0.0/16"]}}}
                }
            })
        );
    }

    #[test]
    fn groups_are_listed_outermost_first() {
        let template = RequestTemplate::for_operation(&rule_group_op());
        assert_eq!(
            template.groups(),
            vec![
                "RuleGroup",
                "RuleGroup.RulesSource",
                "RuleGroup.RulesSource.RulesSourceList",
                "RuleGroup.RuleVariables",
            ]
        );
    }
}
