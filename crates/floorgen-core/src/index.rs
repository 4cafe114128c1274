//! Read-only lookup view over one entity snapshot

use std::collections::HashMap;

use crate::Entity;

/// Index over a fetched entity snapshot.
///
/// Built once per run from the `/api/states` payload, then only read. The
/// index preserves the snapshot's enumeration order: `domain_entity_ids`
/// yields ids in the order the server returned them, which is the order
/// matched entities appear in rule output.
#[derive(Debug, Default)]
pub struct EntityIndex {
    /// Entities in snapshot order
    entities: Vec<Entity>,
    /// Position in `entities` keyed by entity id string
    by_id: HashMap<String, usize>,
    /// Entity ids per domain, in snapshot order
    by_domain: HashMap<String, Vec<String>>,
}

impl EntityIndex {
    /// Build the index from a snapshot.
    ///
    /// If the snapshot repeats an entity id (should not happen for a single
    /// fetch), the first occurrence wins and later ones are ignored.
    pub fn new(snapshot: Vec<Entity>) -> Self {
        let mut index = Self::default();
        for entity in snapshot {
            let id = entity.entity_id.to_string();
            if index.by_id.contains_key(&id) {
                continue;
            }
            index.by_id.insert(id.clone(), index.entities.len());
            index
                .by_domain
                .entry(entity.entity_id.domain().to_string())
                .or_default()
                .push(id);
            index.entities.push(entity);
        }
        index
    }

    /// Look up an entity by its id string
    pub fn get(&self, entity_id: &str) -> Option<&Entity> {
        self.by_id.get(entity_id).map(|&i| &self.entities[i])
    }

    /// All entity ids of a domain, in snapshot order
    pub fn domain_entity_ids(&self, domain: &str) -> &[String] {
        self.by_domain.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entities in the snapshot
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the snapshot was empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str) -> Entity {
        serde_json::from_value(serde_json::json!({"entity_id": id, "state": "on"})).unwrap()
    }

    #[test]
    fn domain_enumeration_preserves_snapshot_order() {
        let index = EntityIndex::new(vec![
            entity("light.kitchen"),
            entity("sensor.hum"),
            entity("light.hall"),
            entity("light.attic"),
        ]);
        assert_eq!(
            index.domain_entity_ids("light"),
            ["light.kitchen", "light.hall", "light.attic"]
        );
        assert_eq!(index.domain_entity_ids("sensor"), ["sensor.hum"]);
        assert!(index.domain_entity_ids("switch").is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let index = EntityIndex::new(vec![entity("light.kitchen")]);
        assert!(index.get("light.kitchen").is_some());
        assert!(index.get("light.basement").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut first = entity("light.kitchen");
        first.state = "on".into();
        let mut second = entity("light.kitchen");
        second.state = "off".into();

        let index = EntityIndex::new(vec![first, second]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("light.kitchen").unwrap().state, "on");
        assert_eq!(index.domain_entity_ids("light").len(), 1);
    }
}
