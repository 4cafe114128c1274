//! The merge itself

use tracing::instrument;

use floorgen_core::{Diagnostic, Diagnostics, EntityIndex};
use floorgen_rules::{evaluate_rule, Rule};
use floorgen_svg::{
    ensure_layer, find_template, Document, NodeId, TemplateLookup, ID_ATTR, LABEL_ATTR,
};

use crate::aggregator::{rule_output, MergedRuleSet};

/// What a merge run produced besides the mutated document
#[derive(Debug)]
pub struct MergeOutcome {
    /// One output entry per input rule, in input order
    pub rules: MergedRuleSet,
    /// Everything worth reporting, in the order it happened
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the merge: one visual element per matched entity, one output entry
/// per rule.
///
/// Rules are processed in input order; entities within a rule in snapshot
/// order. The document is mutated in place: layers are created on demand and
/// an element is cloned from the rule's template for every matched entity
/// that has none yet. Per-rule and per-entity faults (broken snippet, missing
/// or ambiguous template, missing attributes) are collected as diagnostics
/// and never abort the run.
#[instrument(skip_all, fields(rules = rules.len(), entities = index.len()))]
pub fn merge(index: &EntityIndex, rules: &[Rule], doc: &mut Document) -> MergeOutcome {
    let mut sink = Diagnostics::new();
    let mut outputs = Vec::with_capacity(rules.len());

    for rule in rules {
        if let Err(e) = rule.validate_snippet() {
            sink.error(
                Some(&rule.entity_type),
                format!("error in rule snippet: {e}"),
            );
        }

        let category = rule.visual_category().to_string();
        let (layer, created) = ensure_layer(doc, &category);
        if created {
            sink.info(
                Some(&rule.entity_type),
                format!("layer {category} does not exist - creating it"),
            );
        }

        let matched = evaluate_rule(index, rule, &mut sink);

        // no template means no elements; the entity list is still reported
        if let Some(template) = resolve_template(doc, rule, &category, &mut sink) {
            for entity_id in &matched {
                attach_entity(doc, layer, template, entity_id, &rule.entity_type, &mut sink);
            }
        }

        outputs.push(rule_output(rule, &matched, &mut sink));
    }

    MergeOutcome {
        rules: MergedRuleSet::new(outputs),
        diagnostics: sink.into_entries(),
    }
}

fn resolve_template(
    doc: &Document,
    rule: &Rule,
    category: &str,
    sink: &mut Diagnostics,
) -> Option<NodeId> {
    match find_template(doc, category) {
        TemplateLookup::Unique(template) => Some(template),
        TemplateLookup::Ambiguous { first, count } => {
            sink.warn(
                Some(&rule.entity_type),
                format!("more than one svg snippet found for {category} ({count}), using the first"),
            );
            Some(first)
        }
        TemplateLookup::Missing => {
            sink.error(
                Some(&rule.entity_type),
                format!("no svg snippet for {} found", rule.entity_type),
            );
            None
        }
    }
}

/// Add one entity's element unless it is already in the document.
///
/// The id lookup is the idempotence guarantee: an element whose `id` equals
/// the entity id, wherever it sits, suppresses creation.
fn attach_entity(
    doc: &mut Document,
    layer: NodeId,
    template: NodeId,
    entity_id: &str,
    rule_type: &str,
    sink: &mut Diagnostics,
) {
    if doc.find_by_attr(ID_ATTR, entity_id).is_some() {
        sink.info(
            Some(rule_type),
            format!("entity {entity_id} already exists in SVG"),
        );
        return;
    }

    let element = doc.clone_subtree(template);
    doc.set_attr(element, ID_ATTR, entity_id);
    doc.set_attr(element, LABEL_ATTR, entity_id);
    doc.append_element(layer, element);
    sink.info(
        Some(rule_type),
        format!("entity {entity_id} has been added to SVG"),
    );
}
