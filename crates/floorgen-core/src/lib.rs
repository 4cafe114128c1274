//! Core types for floorgen
//!
//! This crate provides the fundamental types shared by the floorgen crates:
//! EntityId, the Entity snapshot record, the EntityIndex read view, and the
//! Diagnostics sink used to collect per-rule and per-entity findings.

mod diagnostics;
mod entity;
mod entity_id;
mod index;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use entity::Entity;
pub use entity_id::{EntityId, EntityIdError};
pub use index::EntityIndex;

/// Attribute key carrying an entity's device class (e.g. "temperature")
pub const ATTR_DEVICE_CLASS: &str = "device_class";

/// Attribute key carrying an entity's human-readable name
pub const ATTR_FRIENDLY_NAME: &str = "friendly_name";
