//! Layer and template resolution
//!
//! Layers are group nodes labelled with a visual category; templates are the
//! prototype nodes labelled `floorplan.<category>` that get cloned for each
//! new entity element. Lookup is pure; `ensure_layer` is the only function
//! here that mutates the document, and only when the layer is absent.

use tracing::debug;

use crate::document::{Document, NodeId};

/// Inkscape label attribute, carries the visual category on layers
pub const LABEL_ATTR: &str = "inkscape:label";

/// Inkscape group-mode attribute, marks a group as a layer
pub const GROUPMODE_ATTR: &str = "inkscape:groupmode";

/// Plain XML id attribute
pub const ID_ATTR: &str = "id";

/// Find the layer node for a visual category, if one exists
pub fn find_layer(doc: &Document, category: &str) -> Option<NodeId> {
    doc.find_by_attr(LABEL_ATTR, category)
}

/// Find the layer for a category, creating it at root scope when absent.
///
/// Returns the layer and whether it was created by this call. Because the
/// created layer is attached immediately, a later rule sharing the category
/// finds it and creation happens at most once per category per run.
pub fn ensure_layer(doc: &mut Document, category: &str) -> (NodeId, bool) {
    if let Some(layer) = find_layer(doc, category) {
        return (layer, false);
    }

    debug!(category, "creating layer");
    let layer = doc.new_element("g");
    doc.set_attr(layer, GROUPMODE_ATTR, "layer");
    doc.set_attr(layer, ID_ATTR, &format!("layer_{category}"));
    doc.set_attr(layer, LABEL_ATTR, category);
    let root = doc.root();
    doc.append_element(root, layer);
    (layer, true)
}

/// Outcome of a template snippet lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLookup {
    /// Exactly one snippet found
    Unique(NodeId),
    /// Several snippets found; the first is used
    Ambiguous { first: NodeId, count: usize },
    /// No snippet for this category anywhere in the document
    Missing,
}

/// Find the template snippet for a visual category.
///
/// Matches on `inkscape:label == "floorplan.<category>"` first, falling back
/// to the plain `id` attribute when no labelled snippet exists.
pub fn find_template(doc: &Document, category: &str) -> TemplateLookup {
    let wanted = format!("floorplan.{category}");
    let mut matches = doc.find_all_by_attr(LABEL_ATTR, &wanted);
    if matches.is_empty() {
        matches = doc.find_all_by_attr(ID_ATTR, &wanted);
    }

    match matches.len() {
        0 => TemplateLookup::Missing,
        1 => TemplateLookup::Unique(matches[0]),
        count => TemplateLookup::Ambiguous {
            first: matches[0],
            count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <g inkscape:groupmode="layer" id="layer1" inkscape:label="light">
    <circle inkscape:label="floorplan.light" r="5"/>
  </g>
  <rect id="floorplan.door" width="4" height="1"/>
</svg>
"#;

    #[test]
    fn finds_existing_layer() {
        let doc = Document::parse(SVG).unwrap();
        let layer = find_layer(&doc, "light").unwrap();
        assert_eq!(doc.attr(layer, "id"), Some("layer1"));
    }

    #[test]
    fn ensure_layer_creates_at_most_once() {
        let mut doc = Document::parse(SVG).unwrap();

        let (layer, created) = ensure_layer(&mut doc, "door");
        assert!(created);
        assert_eq!(doc.attr(layer, ID_ATTR), Some("layer_door"));
        assert_eq!(doc.attr(layer, GROUPMODE_ATTR), Some("layer"));
        assert_eq!(doc.attr(layer, LABEL_ATTR), Some("door"));

        // second call finds the layer made by the first
        let (again, created) = ensure_layer(&mut doc, "door");
        assert!(!created);
        assert_eq!(again, layer);

        // existing layers are never recreated
        let (_, created) = ensure_layer(&mut doc, "light");
        assert!(!created);
    }

    #[test]
    fn template_lookup_prefers_label_then_id() {
        let doc = Document::parse(SVG).unwrap();

        match find_template(&doc, "light") {
            TemplateLookup::Unique(node) => assert_eq!(doc.name(node), "circle"),
            other => panic!("expected unique template, got {other:?}"),
        }

        // no labelled snippet for "door", falls back to the id attribute
        match find_template(&doc, "door") {
            TemplateLookup::Unique(node) => assert_eq!(doc.name(node), "rect"),
            other => panic!("expected unique template, got {other:?}"),
        }

        assert_eq!(find_template(&doc, "cover"), TemplateLookup::Missing);
    }

    #[test]
    fn ambiguous_templates_use_the_first() {
        let svg = r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <circle inkscape:label="floorplan.light" id="a" r="1"/>
  <circle inkscape:label="floorplan.light" id="b" r="2"/>
</svg>"#;
        let doc = Document::parse(svg).unwrap();
        match find_template(&doc, "light") {
            TemplateLookup::Ambiguous { first, count } => {
                assert_eq!(count, 2);
                assert_eq!(doc.attr(first, "id"), Some("a"));
            }
            other => panic!("expected ambiguous template, got {other:?}"),
        }
    }
}
