//! Placement validation.
//!
//! A candidate footprint is legal when
//!
//! 1. it lies entirely inside the grid (negative anchors and empty footprints
//!    are rejected),
//! 2. it does not touch a road (`BlockedByRoad`), and
//! 3. it does not intersect any other entity (`Overlaps`).
//!
//! Rule 2 is a special case of rule 3 because roads occupy cells like any
//! other entity. It is kept as its own rule so a road blocker is reported as
//! such.
//!
//! Two evaluation strategies give the same verdict: [`check_placement`] scans
//! an entity slice, while [`CityLayout::check_placement`] uses the occupancy
//! index.
//!
//! [`CityLayout::check_placement`]: crate::city_layout::CityLayout::check_placement

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, Footprint, PlacedEntity};
use crate::occupancy::OccupancyGrid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementError {
    /// Footprint leaves the grid or is empty.
    OutOfBounds(Footprint),
    /// Footprint intersects a road.
    BlockedByRoad(EntityId),
    /// Footprint intersects another entity.
    Overlaps(EntityId),
    /// An entity with this id is already placed.
    DuplicateId(EntityId),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds(fp) => write!(
                f,
                "footprint at ({}, {}) with size {} is out of bounds",
                fp.x, fp.y, fp.size
            ),
            PlacementError::BlockedByRoad(id) => write!(f, "blocked by road {id}"),
            PlacementError::Overlaps(id) => write!(f, "overlaps entity {id}"),
            PlacementError::DuplicateId(id) => write!(f, "duplicate entity id {id}"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Boolean form of [`check_placement`].
pub fn can_place(candidate: &Footprint, entities: &[PlacedEntity]) -> bool {
    check_placement(candidate, entities).is_ok()
}

/// Linear-scan validator over a plain entity list.
pub fn check_placement(
    candidate: &Footprint,
    entities: &[PlacedEntity],
) -> Result<(), PlacementError> {
    if !candidate.in_bounds() {
        return Err(PlacementError::OutOfBounds(*candidate));
    }
    if let Some(road) = entities
        .iter()
        .find(|e| e.entity_type.is_road() && e.footprint().intersects(candidate))
    {
        return Err(PlacementError::BlockedByRoad(road.id.clone()));
    }
    if let Some(other) = entities.iter().find(|e| e.footprint().intersects(candidate)) {
        return Err(PlacementError::Overlaps(other.id.clone()));
    }
    Ok(())
}

/// Indexed validator: O(size²) cell lookups.
pub fn check_placement_indexed(
    candidate: &Footprint,
    occupancy: &OccupancyGrid,
) -> Result<(), PlacementError> {
    if !candidate.in_bounds() {
        return Err(PlacementError::OutOfBounds(*candidate));
    }
    let mut first_blocker: Option<&EntityId> = None;
    for occupant in occupancy.query_footprint(candidate) {
        if occupant.entity_type.is_road() {
            return Err(PlacementError::BlockedByRoad(occupant.id.clone()));
        }
        if first_blocker.is_none() {
            first_blocker = Some(&occupant.id);
        }
    }
    match first_blocker {
        Some(id) => Err(PlacementError::Overlaps(id.clone())),
        None => Ok(()),
    }
}
