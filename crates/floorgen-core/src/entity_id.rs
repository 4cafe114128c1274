//! Entity ID type representing a domain.object_id pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid entity IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("entity_id '{0}' must contain exactly one '.' separator")]
    InvalidFormat(String),

    #[error("entity_id '{0}' has an empty domain")]
    EmptyDomain(String),

    #[error("entity_id '{0}' has an empty object_id")]
    EmptyObjectId(String),
}

/// A Home Assistant entity ID (e.g. "light.living_room").
///
/// Entity IDs consist of a domain and an object_id separated by a period.
/// Parsing is lenient on character set: snapshots come from a live server
/// and are treated as ground truth, so only the shape is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    domain: String,
    object_id: String,
}

impl EntityId {
    /// Create a new EntityId from domain and object_id parts
    pub fn new(
        domain: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Result<Self, EntityIdError> {
        let domain = domain.into();
        let object_id = object_id.into();

        if domain.is_empty() {
            return Err(EntityIdError::EmptyDomain(format!(".{object_id}")));
        }
        if object_id.is_empty() {
            return Err(EntityIdError::EmptyObjectId(format!("{domain}.")));
        }

        Ok(Self { domain, object_id })
    }

    /// The domain part of the entity ID (e.g. "light")
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The object_id part of the entity ID (e.g. "living_room")
    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((domain, object_id)) if !object_id.contains('.') => {
                if domain.is_empty() {
                    Err(EntityIdError::EmptyDomain(s.to_string()))
                } else if object_id.is_empty() {
                    Err(EntityIdError::EmptyObjectId(s.to_string()))
                } else {
                    Ok(Self {
                        domain: domain.to_string(),
                        object_id: object_id.to_string(),
                    })
                }
            }
            _ => Err(EntityIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_period() {
        let id: EntityId = "sensor.outdoor_temperature".parse().unwrap();
        assert_eq!(id.domain(), "sensor");
        assert_eq!(id.object_id(), "outdoor_temperature");
        assert_eq!(id.to_string(), "sensor.outdoor_temperature");
    }

    #[test]
    fn rejects_missing_or_extra_separator() {
        assert_eq!(
            "no_separator".parse::<EntityId>().unwrap_err(),
            EntityIdError::InvalidFormat("no_separator".into())
        );
        assert_eq!(
            "too.many.parts".parse::<EntityId>().unwrap_err(),
            EntityIdError::InvalidFormat("too.many.parts".into())
        );
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(matches!(
            ".kitchen".parse::<EntityId>(),
            Err(EntityIdError::EmptyDomain(_))
        ));
        assert!(matches!(
            "light.".parse::<EntityId>(),
            Err(EntityIdError::EmptyObjectId(_))
        ));
    }

    #[test]
    fn serde_uses_string_form() {
        let id = EntityId::new("switch", "kitchen").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"switch.kitchen\"");

        let parsed: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
