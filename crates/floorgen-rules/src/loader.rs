//! Rule file loading with per-item fault tolerance

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use floorgen_core::Diagnostics;

use crate::error::{RulesError, RulesResult};
use crate::model::Rule;

/// Load rules from a YAML file.
///
/// A file that cannot be read or is not well-formed YAML is a structural
/// fault and aborts loading. An individual entry that does not deserialize
/// into a [`Rule`] is reported through `diagnostics` and skipped, so one bad
/// entry does not take the rest of the file down with it.
pub fn load_rules(path: impl AsRef<Path>, diagnostics: &mut Diagnostics) -> RulesResult<Vec<Rule>> {
    let path = path.as_ref();
    debug!("Loading rule file: {:?}", path);

    let content = fs::read_to_string(path).map_err(|e| RulesError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_rules(&content, diagnostics).map_err(|e| match e {
        RulesError::ParseYaml { source, .. } => RulesError::ParseYaml {
            path: path.to_path_buf(),
            source,
        },
        RulesError::NotASequence { .. } => RulesError::NotASequence {
            path: path.to_path_buf(),
        },
        other => other,
    })
}

/// Parse rules from a YAML string. See [`load_rules`].
pub fn parse_rules(content: &str, diagnostics: &mut Diagnostics) -> RulesResult<Vec<Rule>> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| RulesError::ParseYaml {
        path: "<inline>".into(),
        source: e,
    })?;

    let Value::Sequence(items) = value else {
        return Err(RulesError::NotASequence {
            path: "<inline>".into(),
        });
    };

    let mut rules = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_yaml::from_value::<Rule>(item) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                diagnostics.warn(None, format!("skipping malformed rule at index {i}: {e}"));
            }
        }
    }
    Ok(rules)
}
