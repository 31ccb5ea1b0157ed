//! Edit session state machine.
//!
//! [`EditSession`] is the single container for the layout and the user's
//! pending intent. Every input goes through [`EditSession::handle`], which
//! applies exactly one transition and reports what happened. Persistence is
//! returned as a [`SessionEffect`] for the caller to execute, so the machine
//! itself does no I/O.
//!
//! ```text
//! Browsing  --choose-->      Placing(t)  --tap ok-->   Browsing
//! Browsing  <--toggle-->     EditingIdle --tap entity--> EditingMoving
//! EditingMoving --tap ok-->  EditingIdle
//! EditingMoving --cancel-->  EditingIdle (entity back at origin)
//! EditingIdle --save-->      Browsing
//! any       --reset-->       Browsing (fresh default layout)
//! ```

pub mod log;
pub mod plugin;
pub mod types;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::catalog::find_template;
use crate::city_layout::CityLayout;
use crate::entity::{EntityId, EntityType, Footprint, PlacedEntity};
use crate::generator::generate_layout;
use crate::ids::{IdSource, SequentialIds};

pub use log::{CommandResolved, TransitionLog, TransitionRecord, HISTORY_CAPACITY};
pub use plugin::{FeedbackEvent, LayoutPlugin, PersistRequested, SessionInput, SessionSet};
pub use types::{EditMode, Feedback, SessionCommand, SessionEffect, SessionOutcome, Transition};

#[derive(Resource)]
pub struct EditSession {
    layout: CityLayout,
    mode: EditMode,
    ids: Box<dyn IdSource>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(CityLayout::new())
    }
}

impl EditSession {
    /// Session over `layout` with a sequential id source resumed past the
    /// ids already present.
    pub fn new(layout: CityLayout) -> Self {
        let ids = SequentialIds::resume_after(layout.entities());
        Self::with_id_source(layout, Box::new(ids))
    }

    pub fn with_id_source(layout: CityLayout, mut ids: Box<dyn IdSource>) -> Self {
        ids.observe(layout.entities());
        Self {
            layout,
            mode: EditMode::Browsing,
            ids,
        }
    }

    pub fn layout(&self) -> &CityLayout {
        &self.layout
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    /// The entity currently picked up, if any.
    pub fn held(&self) -> Option<&PlacedEntity> {
        match &self.mode {
            EditMode::EditingMoving { entity, .. } => Some(entity),
            _ => None,
        }
    }

    /// Swap in a layout from outside (e.g. after loading). Pending intent is
    /// discarded.
    pub fn replace_layout(&mut self, layout: CityLayout) {
        self.ids.observe(layout.entities());
        self.layout = layout;
        self.mode = EditMode::Browsing;
    }

    pub fn handle(&mut self, command: SessionCommand) -> Transition {
        match command {
            SessionCommand::ChooseTemplate { entity_type } => {
                Transition::new(self.choose_template(entity_type))
            }
            SessionCommand::TapTile { x, y } => Transition::new(self.tap_tile(x, y)),
            SessionCommand::ToggleEdit => Transition::new(self.toggle_edit()),
            SessionCommand::Cancel => Transition::new(self.cancel()),
            SessionCommand::Save => {
                self.return_held();
                self.mode = EditMode::Browsing;
                Transition::new(SessionOutcome::Saved)
                    .with_effect(SessionEffect::Persist(self.layout.to_vec()))
            }
            SessionCommand::Reset => {
                self.replace_layout(generate_layout());
                info!("Layout reset to default ({} entities)", self.layout.len());
                Transition::new(SessionOutcome::Reset)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn choose_template(&mut self, entity_type: EntityType) -> SessionOutcome {
        let Some(template) = find_template(entity_type) else {
            return SessionOutcome::UnknownTemplate(entity_type);
        };
        self.return_held();
        self.mode = EditMode::Placing(*template);
        SessionOutcome::ModeChanged
    }

    fn tap_tile(&mut self, x: i32, y: i32) -> SessionOutcome {
        match std::mem::take(&mut self.mode) {
            EditMode::Browsing => SessionOutcome::Ignored,
            EditMode::Placing(template) => {
                let footprint = Footprint::new(x, y, template.size);
                if let Err(reason) = self.layout.check_placement(&footprint) {
                    self.mode = EditMode::Placing(template);
                    return SessionOutcome::Rejected(reason);
                }
                let id = self.ids.next_id();
                match self.layout.insert(template.instantiate(id.clone(), x, y)) {
                    Ok(()) => SessionOutcome::Placed(id),
                    Err(reason) => {
                        self.mode = EditMode::Placing(template);
                        SessionOutcome::Rejected(reason)
                    }
                }
            }
            EditMode::EditingIdle => match self.layout.take_at(x, y) {
                Some(entity) => {
                    let id = entity.id.clone();
                    self.mode = EditMode::EditingMoving {
                        origin: (entity.grid_x, entity.grid_y),
                        entity,
                    };
                    SessionOutcome::PickedUp(id)
                }
                None => {
                    self.mode = EditMode::EditingIdle;
                    SessionOutcome::Ignored
                }
            },
            EditMode::EditingMoving { entity, origin } => {
                let footprint = Footprint::new(x, y, entity.size);
                if let Err(reason) = self.layout.check_placement(&footprint) {
                    self.mode = EditMode::EditingMoving { entity, origin };
                    return SessionOutcome::Rejected(reason);
                }
                let id = entity.id.clone();
                match self.layout.insert(entity.clone().moved_to(x, y)) {
                    Ok(()) => {
                        self.mode = EditMode::EditingIdle;
                        SessionOutcome::Moved(id)
                    }
                    Err(reason) => {
                        self.mode = EditMode::EditingMoving { entity, origin };
                        SessionOutcome::Rejected(reason)
                    }
                }
            }
        }
    }

    fn toggle_edit(&mut self) -> SessionOutcome {
        if self.return_held().is_some() {
            self.mode = EditMode::Browsing;
            return SessionOutcome::ModeChanged;
        }
        self.mode = match self.mode {
            EditMode::EditingIdle => EditMode::Browsing,
            _ => EditMode::EditingIdle,
        };
        SessionOutcome::ModeChanged
    }

    fn cancel(&mut self) -> SessionOutcome {
        if let Some(id) = self.return_held() {
            return SessionOutcome::Returned(id);
        }
        if matches!(self.mode, EditMode::Placing(_)) {
            self.mode = EditMode::Browsing;
            return SessionOutcome::ModeChanged;
        }
        SessionOutcome::Ignored
    }

    /// Put a held entity back at its origin and drop to `EditingIdle`.
    /// No-op in any other mode.
    fn return_held(&mut self) -> Option<EntityId> {
        if !matches!(self.mode, EditMode::EditingMoving { .. }) {
            return None;
        }
        let EditMode::EditingMoving { entity, origin } =
            std::mem::replace(&mut self.mode, EditMode::EditingIdle)
        else {
            return None;
        };
        let id = entity.id.clone();
        // Nothing can be placed while an entity is held, so the origin is free.
        if let Err(e) = self.layout.insert(entity.moved_to(origin.0, origin.1)) {
            error!("Could not return {id} to ({}, {}): {e}", origin.0, origin.1);
            return None;
        }
        Some(id)
    }
}
