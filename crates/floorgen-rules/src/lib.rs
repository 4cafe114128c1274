//! Declarative entity-matching rules
//!
//! A rule maps one entity domain (optionally narrowed by device class and a
//! friendly-name substring) to a visual category in the floor-plan SVG, and
//! carries an opaque `rules` mapping handed through to the downstream
//! ha-floorplan configuration.
//!
//! This crate owns the rule model, the YAML rule-file loader, and the
//! evaluator that resolves each rule to its matched entity ids. Matching is
//! pure: it reads the entity index and returns a new list, never touching
//! shared state.

mod error;
mod evaluator;
mod loader;
mod model;

pub use error::{RulesError, RulesResult};
pub use evaluator::evaluate_rule;
pub use loader::{load_rules, parse_rules};
pub use model::{AttributeFilter, Rule};
