use crate::config::{GRID_SIZE, TOTAL_CELLS};
use crate::entity::{EntityId, EntityType, Footprint, PlacedEntity};

/// What sits on a single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellOccupant {
    pub id: EntityId,
    pub entity_type: EntityType,
    /// True on the footprint's top-left cell.
    pub is_anchor: bool,
}

/// Cell -> occupant index, maintained incrementally as entities are inserted
/// and removed so occupancy checks cost O(size²) instead of a full scan.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    cells: Vec<Option<CellOccupant>>,
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self {
            cells: vec![None; TOTAL_CELLS],
        }
    }
}

impl OccupancyGrid {
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Marks every in-bounds cell of the entity's footprint. Callers validate
    /// placement first; out-of-bounds cells are ignored.
    pub fn insert(&mut self, entity: &PlacedEntity) {
        let footprint = entity.footprint();
        for (x, y) in footprint.cells() {
            if let Some(idx) = Self::flat_index(x, y) {
                self.cells[idx] = Some(CellOccupant {
                    id: entity.id.clone(),
                    entity_type: entity.entity_type,
                    is_anchor: x == footprint.x && y == footprint.y,
                });
            }
        }
    }

    /// Clears the footprint cells that still belong to `id`.
    pub fn remove(&mut self, id: &EntityId, footprint: &Footprint) {
        for (x, y) in footprint.cells() {
            if let Some(idx) = Self::flat_index(x, y) {
                if self.cells[idx].as_ref().is_some_and(|c| &c.id == id) {
                    self.cells[idx] = None;
                }
            }
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&CellOccupant> {
        Self::flat_index(x, y).and_then(|idx| self.cells[idx].as_ref())
    }

    #[inline]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none()
    }

    /// Occupants overlapping `footprint`, in row-major cell order, one entry
    /// per cell.
    pub fn query_footprint<'a>(
        &'a self,
        footprint: &Footprint,
    ) -> impl Iterator<Item = &'a CellOccupant> + 'a {
        footprint.cells().filter_map(move |(x, y)| self.get(x, y))
    }

    #[inline]
    fn flat_index(x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < GRID_SIZE && y < GRID_SIZE {
            Some(y as usize * GRID_SIZE as usize + x as usize)
        } else {
            None
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
