//! Rule output aggregation

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use floorgen_core::Diagnostics;
use floorgen_rules::Rule;

/// The merged rule output, one entry per input rule in input order.
///
/// Each entry is the rule's `rules` mapping with the resolved `entities`
/// list added, ready to be dumped as the ha-floorplan configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MergedRuleSet(Vec<Value>);

impl MergedRuleSet {
    pub(crate) fn new(entries: Vec<Value>) -> Self {
        Self(entries)
    }

    /// Entries in input-rule order
    pub fn entries(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dump the set as a YAML document
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }
}

/// Build one rule's output entry: its `rules` mapping plus the resolved
/// entity list. The input rule is left untouched.
pub(crate) fn rule_output(rule: &Rule, entities: &[String], diagnostics: &mut Diagnostics) -> Value {
    let mut mapping = match &rule.rules {
        Value::Mapping(mapping) => mapping.clone(),
        Value::Null => Mapping::new(),
        other => {
            diagnostics.warn(
                Some(&rule.entity_type),
                format!(
                    "rules section is {} instead of a mapping, replacing it",
                    yaml_kind(other)
                ),
            );
            Mapping::new()
        }
    };

    mapping.insert(
        Value::String("entities".into()),
        Value::Sequence(entities.iter().cloned().map(Value::String).collect()),
    );
    Value::Mapping(mapping)
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
