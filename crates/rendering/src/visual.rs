//! Contract between the layout and whatever draws it.
//!
//! The layout never draws. A front end installs a [`VisualProvider`] and the
//! draw list asks it for one [`Drawable`] per entity.

use bevy::prelude::*;

use layout::iso::footprint_screen_size;
use layout::{EntityType, PlacedEntity};

/// Direction a building's front faces on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualRequest {
    pub entity_type: EntityType,
    /// Screen-space width derived from the footprint size.
    pub width: i32,
    /// Screen-space height derived from the footprint size.
    pub height: i32,
    /// Tint override; the provider picks one when `None`.
    pub color: Option<Color>,
    pub facing: Option<Facing>,
}

impl VisualRequest {
    pub fn for_entity(entity: &PlacedEntity) -> Self {
        let (width, height) = footprint_screen_size(entity.size);
        Self {
            entity_type: entity.entity_type,
            width,
            height,
            color: None,
            facing: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = Some(facing);
        self
    }
}

/// What the renderer needs to put one entity on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Asset reference understood by the front end.
    pub asset: String,
    pub color: Color,
    pub width: i32,
    pub height: i32,
    pub facing: Facing,
}

pub trait VisualProvider: Send + Sync {
    fn drawable(&self, request: &VisualRequest) -> Drawable;
}
