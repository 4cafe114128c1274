//! Mutable SVG document handling for floorgen
//!
//! The document is an arena of element nodes parsed from an SVG file.
//! Qualified names (`inkscape:label`, `xmlns:svg`) and attribute order are
//! kept verbatim so a re-serialized file stays diffable against the input.
//!
//! On top of the tree, the anchor module resolves the two kinds of nodes the
//! merge cares about: the per-category layer group and the template snippet
//! cloned for each new entity element.

mod anchor;
mod document;
mod error;

pub use anchor::{
    ensure_layer, find_layer, find_template, TemplateLookup, GROUPMODE_ATTR, ID_ATTR, LABEL_ATTR,
};
pub use document::{Document, NodeId};
pub use error::{SvgError, SvgResult};
