//! The set of placed entities plus its occupancy index.
//!
//! Every mutation goes through [`CityLayout::insert`] or
//! [`CityLayout::remove`], which keep the index in sync and refuse anything
//! that would break the layout invariants (bounds, no overlap, unique ids).

use std::collections::HashSet;
use std::fmt;

use crate::entity::{EntityId, Footprint, PlacedEntity};
use crate::occupancy::{CellOccupant, OccupancyGrid};
use crate::placement::{check_placement_indexed, PlacementError};

#[derive(Debug, Clone, Default)]
pub struct CityLayout {
    entities: Vec<PlacedEntity>,
    occupancy: OccupancyGrid,
}

/// A stored entity list that does not form a legal layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLayout {
    pub entity: EntityId,
    pub reason: PlacementError,
}

impl fmt::Display for InvalidLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {} cannot be placed: {}", self.entity, self.reason)
    }
}

impl std::error::Error for InvalidLayout {}

impl CityLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from a list, validating every entity against the ones
    /// before it.
    pub fn from_entities(entities: Vec<PlacedEntity>) -> Result<Self, InvalidLayout> {
        let mut layout = Self::new();
        for entity in entities {
            let id = entity.id.clone();
            layout
                .insert(entity)
                .map_err(|reason| InvalidLayout { entity: id, reason })?;
        }
        Ok(layout)
    }

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn to_vec(&self) -> Vec<PlacedEntity> {
        self.entities.clone()
    }

    pub fn into_entities(self) -> Vec<PlacedEntity> {
        self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: &EntityId) -> Option<&PlacedEntity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn contains_id(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn occupant(&self, x: i32, y: i32) -> Option<&CellOccupant> {
        self.occupancy.get(x, y)
    }

    /// Entity covering cell `(x, y)`, if any.
    pub fn entity_at(&self, x: i32, y: i32) -> Option<&PlacedEntity> {
        let occupant = self.occupancy.get(x, y)?;
        self.get(&occupant.id)
    }

    pub fn check_placement(&self, candidate: &Footprint) -> Result<(), PlacementError> {
        check_placement_indexed(candidate, &self.occupancy)
    }

    pub fn can_place(&self, candidate: &Footprint) -> bool {
        self.check_placement(candidate).is_ok()
    }

    pub fn insert(&mut self, entity: PlacedEntity) -> Result<(), PlacementError> {
        if self.contains_id(&entity.id) {
            return Err(PlacementError::DuplicateId(entity.id));
        }
        self.check_placement(&entity.footprint())?;
        self.occupancy.insert(&entity);
        self.entities.push(entity);
        Ok(())
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<PlacedEntity> {
        let pos = self.entities.iter().position(|e| &e.id == id)?;
        let entity = self.entities.remove(pos);
        self.occupancy.remove(&entity.id, &entity.footprint());
        Some(entity)
    }

    /// Removes and returns whatever covers cell `(x, y)`.
    pub fn take_at(&mut self, x: i32, y: i32) -> Option<PlacedEntity> {
        let id = self.occupancy.get(x, y)?.id.clone();
        self.remove(&id)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.occupancy.clear();
    }

    /// Re-checks every invariant from scratch. Intended for tests and for
    /// validating data that did not come through `insert`.
    pub fn verify(&self) -> Result<(), InvalidLayout> {
        let mut ids = HashSet::new();
        for (i, e) in self.entities.iter().enumerate() {
            let fp = e.footprint();
            if !fp.in_bounds() {
                return Err(InvalidLayout {
                    entity: e.id.clone(),
                    reason: PlacementError::OutOfBounds(fp),
                });
            }
            if !ids.insert(&e.id) {
                return Err(InvalidLayout {
                    entity: e.id.clone(),
                    reason: PlacementError::DuplicateId(e.id.clone()),
                });
            }
            if let Some(other) = self.entities[..i]
                .iter()
                .find(|o| o.footprint().intersects(&fp))
            {
                return Err(InvalidLayout {
                    entity: e.id.clone(),
                    reason: PlacementError::Overlaps(other.id.clone()),
                });
            }
        }
        Ok(())
    }
}
