//! Back-to-front list of everything on the grid, in screen space.

use bevy::prelude::*;

use layout::iso::{draw_depth, draw_order, grid_to_iso};
use layout::{CityLayout, EntityId, EntityType, PlacedEntity};

use crate::palette::facing_toward_road;
use crate::visual::{Drawable, VisualProvider, VisualRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub id: EntityId,
    pub entity_type: EntityType,
    /// Projected position of the footprint's anchor cell.
    pub screen_x: i32,
    pub screen_y: i32,
    pub depth: i64,
    pub drawable: Drawable,
}

/// Draw items sorted so nearer entities come later.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub items: Vec<DrawItem>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }
}

pub fn build_draw_list(layout: &CityLayout, provider: &dyn VisualProvider) -> DrawList {
    let mut sorted: Vec<&PlacedEntity> = layout.entities().iter().collect();
    sorted.sort_by(|a, b| draw_order(a, b));

    let items = sorted
        .into_iter()
        .map(|entity| {
            let mut request = VisualRequest::for_entity(entity);
            if !entity.is_decoration && !entity.entity_type.is_road() {
                request = request.with_facing(facing_toward_road(layout, entity));
            }
            let (screen_x, screen_y) = grid_to_iso(entity.grid_x, entity.grid_y);
            DrawItem {
                id: entity.id.clone(),
                entity_type: entity.entity_type,
                screen_x,
                screen_y,
                depth: draw_depth(entity),
                drawable: provider.drawable(&request),
            }
        })
        .collect();

    DrawList { items }
}
