//! Entity id generation.
//!
//! Ids have the form `e{n}`. [`SequentialIds`] resumes past the highest `n`
//! already present in a layout, so a freshly issued id can never collide with
//! a loaded or generated one.

use crate::entity::{EntityId, PlacedEntity};

const ID_PREFIX: char = 'e';

pub trait IdSource: Send + Sync {
    fn next_id(&mut self) -> EntityId;

    /// Make sure future ids do not collide with anything in `entities`.
    fn observe(&mut self, entities: &[PlacedEntity]);
}

#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn resume_after(entities: &[PlacedEntity]) -> Self {
        let mut ids = Self::default();
        ids.observe(entities);
        ids
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> EntityId {
        let id = format_id(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// An `e{n}` id with no successor (`n == u64::MAX`) is treated as foreign.
    fn observe(&mut self, entities: &[PlacedEntity]) {
        let successor = entities
            .iter()
            .filter_map(|e| parse_id(&e.id)?.checked_add(1))
            .max();
        if let Some(successor) = successor {
            self.next = self.next.max(successor);
        }
    }
}

pub fn format_id(n: u64) -> EntityId {
    EntityId(format!("{ID_PREFIX}{n}"))
}

/// Numeric part of an `e{n}` id. Foreign ids (e.g. from older saves) yield `None`.
pub fn parse_id(id: &EntityId) -> Option<u64> {
    id.as_str().strip_prefix(ID_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_template;
    use crate::entity::EntityType;

    #[test]
    fn test_sequential_ids_are_monotonic() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id().as_str(), "e0");
        assert_eq!(ids.next_id().as_str(), "e1");
        assert_eq!(ids.next_id().as_str(), "e2");
    }

    #[test]
    fn test_resume_skips_existing_ids() {
        let t = find_template(EntityType::Home).unwrap();
        let entities = vec![
            t.instantiate(EntityId::new("e4"), 0, 0),
            t.instantiate(EntityId::new("e17"), 2, 0),
            t.instantiate(EntityId::new("legacy-99"), 4, 0),
        ];
        let mut ids = SequentialIds::resume_after(&entities);
        assert_eq!(ids.next_id().as_str(), "e18");
    }

    #[test]
    fn test_observe_never_moves_backwards() {
        let t = find_template(EntityType::Bush).unwrap();
        let mut ids = SequentialIds::starting_at(50);
        ids.observe(&[t.instantiate(EntityId::new("e3"), 0, 0)]);
        assert_eq!(ids.next_id().as_str(), "e50");
    }

    #[test]
    fn test_observe_skips_id_without_successor() {
        let t = find_template(EntityType::Tree).unwrap();
        let entities = vec![
            t.instantiate(EntityId::new(format!("e{}", u64::MAX)), 0, 0),
            t.instantiate(EntityId::new("e9"), 1, 0),
        ];
        let mut ids = SequentialIds::resume_after(&entities);
        assert_eq!(ids.next_id().as_str(), "e10");

        let mut ids = SequentialIds::resume_after(&entities[..1]);
        assert_eq!(ids.next_id().as_str(), "e0");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(&EntityId::new("e12")), Some(12));
        assert_eq!(parse_id(&EntityId::new("e")), None);
        assert_eq!(parse_id(&EntityId::new("road-3")), None);
    }
}
