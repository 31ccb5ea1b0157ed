//! Default visuals: flat tints per entity type and catalog icon names as
//! asset references.

use bevy::prelude::*;

use layout::catalog::find_template;
use layout::{CityLayout, EntityType, PlacedEntity};

use crate::visual::{Drawable, Facing, VisualProvider, VisualRequest};

// ---------------------------------------------------------------------------
// Entity tints
// ---------------------------------------------------------------------------

pub fn entity_color(entity_type: EntityType) -> Color {
    match entity_type {
        EntityType::Home => Color::srgb(0.85, 0.55, 0.40),
        EntityType::Guild => Color::srgb(0.55, 0.35, 0.60),
        EntityType::Store => Color::srgb(0.30, 0.60, 0.85),
        EntityType::Market => Color::srgb(0.95, 0.70, 0.25),
        EntityType::Bank => Color::srgb(0.80, 0.75, 0.45),
        EntityType::Hospital => Color::srgb(0.95, 0.95, 0.95),
        EntityType::Police => Color::srgb(0.20, 0.30, 0.65),
        EntityType::Gym => Color::srgb(0.90, 0.35, 0.30),
        EntityType::School => Color::srgb(0.85, 0.45, 0.20),
        EntityType::Library => Color::srgb(0.50, 0.40, 0.30),
        EntityType::Park => Color::srgb(0.35, 0.70, 0.35),
        EntityType::Fountain => Color::srgb(0.45, 0.75, 0.90),
        EntityType::Bush => Color::srgb(0.25, 0.55, 0.25),
        EntityType::Tree => Color::srgb(0.15, 0.50, 0.20),
        EntityType::Tree2 => Color::srgb(0.10, 0.40, 0.25),
        EntityType::Road => Color::srgb(0.35, 0.35, 0.38),
        EntityType::Tower2 => Color::srgb(0.60, 0.65, 0.75),
        EntityType::Tower3 => Color::srgb(0.45, 0.50, 0.65),
    }
}

// ---------------------------------------------------------------------------
// Facing
// ---------------------------------------------------------------------------

/// Side of `entity` that borders a road, checked south, east, north, west.
/// Defaults to south when no road touches the footprint.
pub fn facing_toward_road(layout: &CityLayout, entity: &PlacedEntity) -> Facing {
    let fp = entity.footprint();
    let is_road = |x: i32, y: i32| {
        layout
            .occupant(x, y)
            .is_some_and(|o| o.entity_type.is_road())
    };
    let span = 0..fp.size;

    if span.clone().any(|i| is_road(fp.x + i, fp.y + fp.size)) {
        Facing::South
    } else if span.clone().any(|i| is_road(fp.x + fp.size, fp.y + i)) {
        Facing::East
    } else if span.clone().any(|i| is_road(fp.x + i, fp.y - 1)) {
        Facing::North
    } else if span.clone().any(|i| is_road(fp.x - 1, fp.y + i)) {
        Facing::West
    } else {
        Facing::South
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteVisuals;

impl VisualProvider for PaletteVisuals {
    fn drawable(&self, request: &VisualRequest) -> Drawable {
        let asset = find_template(request.entity_type)
            .map(|t| t.icon)
            .unwrap_or_else(|| request.entity_type.as_str());
        Drawable {
            asset: asset.to_string(),
            color: request
                .color
                .unwrap_or_else(|| entity_color(request.entity_type)),
            width: request.width,
            height: request.height,
            facing: request.facing.unwrap_or(Facing::South),
        }
    }
}
