// =============================================================================
// Default layout: a deterministic starter city.
//
// Roads form a closed crosshatch, towers sit in the centre block, civic and
// commercial buildings line the blocks around it, homes fill the corner
// blocks, bushes line the roads and trees frame the perimeter.
// =============================================================================

mod buildings;
mod decorations;
mod roads;


use bevy::prelude::*;

use crate::catalog::find_template;
use crate::city_layout::CityLayout;
use crate::entity::{EntityType, PlacedEntity};
use crate::ids::format_id;

pub use self::roads::{ROAD_AXES, ROAD_SPAN};

/// Generate the default city as a flat entity list.
///
/// Pure: two calls always return identical lists, including ids.
pub fn generate() -> Vec<PlacedEntity> {
    generate_layout().into_entities()
}

pub fn generate_layout() -> CityLayout {
    let mut city = CityBuilder::default();

    roads::lay_road_grid(&mut city);
    buildings::place_tower_cluster(&mut city);
    buildings::place_civic_blocks(&mut city);
    buildings::infill_residential_corners(&mut city);
    decorations::line_roads_with_bushes(&mut city);
    decorations::frame_perimeter_with_trees(&mut city);

    debug!("Generated default layout with {} entities", city.layout.len());
    city.layout
}

// =============================================================================
// Helpers
// =============================================================================

/// Accumulates the generated city. Ids come from a counter local to one
/// generation run, so every run numbers its entities identically.
#[derive(Default)]
pub(super) struct CityBuilder {
    layout: CityLayout,
    next_id: u64,
}

impl CityBuilder {
    /// Place a catalog entity if the footprint is free. Returns whether it
    /// was placed.
    pub(super) fn try_place(&mut self, entity_type: EntityType, x: i32, y: i32) -> bool {
        let Some(template) = find_template(entity_type) else {
            return false;
        };
        let entity = template.instantiate(format_id(self.next_id), x, y);
        if self.layout.insert(entity).is_err() {
            return false;
        }
        self.next_id += 1;
        true
    }

    /// Like [`Self::try_place`] for entities the plan expects to fit.
    pub(super) fn place(&mut self, entity_type: EntityType, x: i32, y: i32) {
        if !self.try_place(entity_type, x, y) {
            warn!("Default layout: could not place {entity_type} at ({x}, {y})");
        }
    }
}
