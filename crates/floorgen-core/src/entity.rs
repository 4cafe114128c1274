//! Entity snapshot record as returned by the states API

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// One entity's snapshot from `GET /api/states`.
///
/// The snapshot is immutable for the duration of a run: entities are fetched
/// once, indexed, and only read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// The entity this record belongs to
    pub entity_id: EntityId,

    /// The state value (e.g. "on", "off", "23.5", "unavailable")
    #[serde(default)]
    pub state: String,

    /// Attributes reported alongside the state
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,

    /// When the state last changed, if the server reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<DateTime<Utc>>,

    /// When the state was last written, if the server reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Entity {
    /// Get an attribute as a string slice, None if absent or not a string.
    ///
    /// Attribute absence is a normal case, not an error: many entities have
    /// no `device_class` or `friendly_name` at all.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_states_payload() {
        let json = r#"{
            "entity_id": "light.kitchen",
            "state": "on",
            "attributes": {"friendly_name": "Kitchen Light", "brightness": 254},
            "last_changed": "2024-05-01T10:00:00+00:00",
            "last_updated": "2024-05-01T10:00:00+00:00"
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.entity_id.domain(), "light");
        assert_eq!(entity.state, "on");
        assert_eq!(entity.attribute_str("friendly_name"), Some("Kitchen Light"));
        // Non-string attributes are not visible through attribute_str
        assert_eq!(entity.attribute_str("brightness"), None);
        assert_eq!(entity.attribute_str("device_class"), None);
    }

    #[test]
    fn timestamps_are_optional() {
        let entity: Entity =
            serde_json::from_str(r#"{"entity_id": "sensor.hum", "state": "42"}"#).unwrap();
        assert!(entity.last_changed.is_none());
        assert!(entity.attributes.is_empty());
    }
}
