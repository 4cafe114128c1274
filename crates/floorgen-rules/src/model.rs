//! Rule model as read from the YAML rule file

use serde::Deserialize;
use serde_yaml::Value;

/// Narrows a rule's candidates to entities with an exact attribute value
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeFilter {
    /// Required `device_class` attribute value (exact match)
    pub device_class: String,
}

/// One declarative rule from the rule file.
///
/// `type` selects the entity domain; `svg_primitive` overrides the visual
/// category the matched entities are grouped under (it defaults to the type).
/// `rules` is the downstream ha-floorplan configuration fragment: the merge
/// passes it through untouched except for the computed `entities` list.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Entity domain to match (e.g. "light")
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Visual category override; defaults to the type
    #[serde(default)]
    pub svg_primitive: Option<String>,

    /// Optional device-class narrowing
    #[serde(default)]
    pub attribute: Option<AttributeFilter>,

    /// Case-insensitive friendly-name substring, assumed already lowercased
    #[serde(default)]
    pub friendly_name_includes: Option<String>,

    /// Embedded YAML snippet, validated for well-formedness only
    #[serde(default)]
    pub rule_snippet: Option<String>,

    /// Downstream configuration fragment, passed through to the output
    #[serde(default)]
    pub rules: Value,
}

impl Rule {
    /// The visual category this rule's elements are grouped under
    pub fn visual_category(&self) -> &str {
        self.svg_primitive.as_deref().unwrap_or(&self.entity_type)
    }

    /// Check the embedded rule snippet parses as YAML.
    ///
    /// The snippet's content is not used by the merge; this is early
    /// validation so a broken snippet is flagged before the output file is
    /// fed to ha-floorplan.
    pub fn validate_snippet(&self) -> Result<(), serde_yaml::Error> {
        if let Some(snippet) = &self.rule_snippet {
            serde_yaml::from_str::<Value>(snippet)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_defaults_to_type() {
        let rule: Rule = serde_yaml::from_str("type: light\nrules: {}\n").unwrap();
        assert_eq!(rule.visual_category(), "light");

        let rule: Rule =
            serde_yaml::from_str("type: binary_sensor\nsvg_primitive: door\nrules: {}\n").unwrap();
        assert_eq!(rule.visual_category(), "door");
    }

    #[test]
    fn snippet_validation() {
        let rule: Rule = serde_yaml::from_str(
            "type: light\nrule_snippet: |\n  tap_action:\n    action: toggle\n",
        )
        .unwrap();
        assert!(rule.validate_snippet().is_ok());

        let rule: Rule =
            serde_yaml::from_str("type: light\nrule_snippet: \"{broken: [\"\n").unwrap();
        assert!(rule.validate_snippet().is_err());

        let rule: Rule = serde_yaml::from_str("type: light\n").unwrap();
        assert!(rule.validate_snippet().is_ok());
    }
}
