//! Grid layout engine for the isometric city builder.
//!
//! Pure data and rules live in the leaf modules (`entity`, `catalog`, `iso`,
//! `placement`, `generator`); [`session::EditSession`] owns the live layout
//! and [`LayoutPlugin`] wires it into a Bevy app.

pub mod catalog;
pub mod city_layout;
pub mod config;
pub mod entity;
pub mod generator;
pub mod ids;
pub mod iso;
pub mod occupancy;
pub mod placement;
pub mod session;

#[cfg(test)]
mod test_harness;

pub use catalog::{find_template, list_templates, Template};
pub use city_layout::{CityLayout, InvalidLayout};
pub use entity::{EntityId, EntityType, Footprint, PlacedEntity};
pub use generator::{generate, generate_layout};
pub use placement::{can_place, check_placement, PlacementError};
pub use session::{
    EditMode, EditSession, Feedback, FeedbackEvent, LayoutPlugin, PersistRequested,
    SessionCommand, SessionInput, SessionOutcome, SessionSet,
};
