//! Error types for SVG document handling

use thiserror::Error;

/// Result type for SVG operations
pub type SvgResult<T> = Result<T, SvgError>;

/// Errors from parsing or serializing an SVG document.
///
/// All of these are structural faults: a document that does not parse means
/// the run stops before any mutation happens.
#[derive(Debug, Error)]
pub enum SvgError {
    /// The XML is malformed
    #[error("failed to parse SVG document: {0}")]
    Parse(#[from] quick_xml::Error),

    /// An attribute is malformed
    #[error("malformed attribute in SVG document: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document contains no root element
    #[error("SVG document has no root element")]
    NoRoot,

    /// More than one top-level element
    #[error("SVG document has more than one top-level element")]
    MultipleRoots,

    /// A closing tag without a matching open tag
    #[error("unbalanced closing tag in SVG document")]
    UnbalancedTag,

    /// Serialization failed
    #[error("failed to write SVG document: {0}")]
    Write(#[from] std::io::Error),
}
