//! Commands, modes and outcomes of the edit session.

use serde::{Deserialize, Serialize};

use crate::catalog::Template;
use crate::entity::{EntityId, EntityType, PlacedEntity};
use crate::placement::PlacementError;

/// One user intent: a tile tap or a toolbar action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Queue a catalog template for placement.
    ChooseTemplate { entity_type: EntityType },
    /// The player tapped the tile at `(x, y)`.
    TapTile { x: i32, y: i32 },
    /// Enter or leave edit mode.
    ToggleEdit,
    /// Drop a queued template, or put a held entity back where it came from.
    Cancel,
    /// Persist the layout and return to browsing.
    Save,
    /// Replace the layout with a freshly generated default city.
    Reset,
}

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Nothing pending.
    #[default]
    Browsing,
    /// A template is queued and the next valid tap places it.
    Placing(Template),
    /// Edit mode on, nothing held.
    EditingIdle,
    /// An entity has been picked up and is waiting for a destination. It is
    /// not part of the layout while held.
    EditingMoving {
        entity: PlacedEntity,
        origin: (i32, i32),
    },
}

impl EditMode {
    pub fn name(&self) -> &'static str {
        match self {
            EditMode::Browsing => "browsing",
            EditMode::Placing(_) => "placing",
            EditMode::EditingIdle => "editing_idle",
            EditMode::EditingMoving { .. } => "editing_moving",
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::EditingIdle | EditMode::EditingMoving { .. })
    }
}

/// Advisory signal for the haptic/feedback collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Success,
    Error,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// A new entity was stamped from the queued template.
    Placed(EntityId),
    /// An entity was lifted off the layout.
    PickedUp(EntityId),
    /// A held entity was put down at a new cell.
    Moved(EntityId),
    /// A held entity went back to its original cell.
    Returned(EntityId),
    /// The mode changed without touching the layout.
    ModeChanged,
    Saved,
    Reset,
    /// The command does not apply in the current mode.
    Ignored,
    /// The target footprint is illegal; nothing changed.
    Rejected(PlacementError),
    /// No catalog template exists for the requested type.
    UnknownTemplate(EntityType),
}

impl SessionOutcome {
    pub fn feedback(&self) -> Option<Feedback> {
        match self {
            SessionOutcome::Placed(_) | SessionOutcome::Moved(_) | SessionOutcome::Saved => {
                Some(Feedback::Success)
            }
            SessionOutcome::Rejected(_) | SessionOutcome::UnknownTemplate(_) => {
                Some(Feedback::Error)
            }
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, SessionOutcome::Rejected(_) | SessionOutcome::UnknownTemplate(_))
    }
}

/// Side effect the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Write this snapshot through the layout store.
    Persist(Vec<PlacedEntity>),
}

/// Result of [`EditSession::handle`](super::EditSession::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub outcome: SessionOutcome,
    pub effect: Option<SessionEffect>,
}

impl Transition {
    pub fn new(outcome: SessionOutcome) -> Self {
        Self {
            outcome,
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: SessionEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.outcome.feedback()
    }
}
