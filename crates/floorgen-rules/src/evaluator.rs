//! Pure rule evaluation against the entity index

use tracing::trace;

use floorgen_core::{Diagnostics, EntityIndex, ATTR_DEVICE_CLASS, ATTR_FRIENDLY_NAME};

use crate::model::Rule;

/// Resolve a rule to its matched entity ids.
///
/// Candidates are the entities of the rule's domain, in the index's snapshot
/// order; that order carries through to the result. The optional filters
/// narrow the candidates:
///
/// - `attribute.device_class` keeps candidates whose `device_class` matches
///   exactly. A candidate without the attribute is reported and dropped.
/// - `friendly_name_includes` keeps candidates whose lowercased
///   `friendly_name` contains the substring. A candidate without a friendly
///   name is silently dropped; unnamed entities are commonplace.
///
/// Evaluation never mutates anything; a rule matching nothing yields an
/// empty list, which still appears in the final output.
pub fn evaluate_rule(index: &EntityIndex, rule: &Rule, diagnostics: &mut Diagnostics) -> Vec<String> {
    let mut matched: Vec<String> = index
        .domain_entity_ids(&rule.entity_type)
        .to_vec();

    if let Some(filter) = &rule.attribute {
        matched.retain(|id| {
            let entity = match index.get(id) {
                Some(entity) => entity,
                None => return false,
            };
            match entity.attribute_str(ATTR_DEVICE_CLASS) {
                Some(class) => class == filter.device_class,
                None => {
                    diagnostics.warn(
                        Some(&rule.entity_type),
                        format!("entity {id} has no device_class attribute"),
                    );
                    false
                }
            }
        });
    }

    if let Some(needle) = &rule.friendly_name_includes {
        matched.retain(|id| {
            let name = index
                .get(id)
                .and_then(|entity| entity.attribute_str(ATTR_FRIENDLY_NAME));
            match name {
                Some(name) => name.to_lowercase().contains(needle.as_str()),
                None => {
                    trace!(entity_id = %id, "no friendly_name attribute, treating as non-match");
                    false
                }
            }
        });
    }

    diagnostics.info(
        Some(&rule.entity_type),
        format!(
            "found {} entities of type {}, device_class: {}, friendly_name_includes: {}",
            matched.len(),
            rule.entity_type,
            rule.attribute
                .as_ref()
                .map(|a| a.device_class.as_str())
                .unwrap_or("<none>"),
            rule.friendly_name_includes.as_deref().unwrap_or("<none>"),
        ),
    );

    matched
}
