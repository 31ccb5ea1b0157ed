//! JSON command/response types for the headless driver.
//!
//! Each line of stdin is one [`AgentCommand`] tagged by `"cmd"`. Each line of
//! stdout is one [`AgentResponse`] carrying `"protocol_version"` and a
//! `"type"`-tagged payload.

use serde::{Deserialize, Serialize};

use layout::session::{Feedback, SessionCommand, SessionOutcome};
use layout::{EntityId, EntityType, PlacedEntity};

/// Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Commands (stdin)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Snapshot of the session, the layout and the save status.
    Observe,
    Choose { entity_type: EntityType },
    Tap { x: i32, y: i32 },
    ToggleEdit,
    Cancel,
    Save,
    Reset,
    /// Apply several session commands in one frame, in order.
    Batch { commands: Vec<SessionCommand> },
    Quit,
}

impl AgentCommand {
    /// The session command this maps onto, if it is one.
    pub fn session_command(&self) -> Option<SessionCommand> {
        let command = match self {
            AgentCommand::Choose { entity_type } => SessionCommand::ChooseTemplate {
                entity_type: *entity_type,
            },
            AgentCommand::Tap { x, y } => SessionCommand::TapTile { x: *x, y: *y },
            AgentCommand::ToggleEdit => SessionCommand::ToggleEdit,
            AgentCommand::Cancel => SessionCommand::Cancel,
            AgentCommand::Save => SessionCommand::Save,
            AgentCommand::Reset => SessionCommand::Reset,
            AgentCommand::Observe | AgentCommand::Batch { .. } | AgentCommand::Quit => {
                return None
            }
        };
        Some(command)
    }
}

// ---------------------------------------------------------------------------
// Responses (stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    Ready,
    Observation {
        observation: Observation,
    },
    /// Result of one session command.
    Outcome {
        outcome: SessionOutcome,
        mode: &'static str,
        feedback: Vec<Feedback>,
    },
    BatchResult {
        outcomes: Vec<SessionOutcome>,
        mode: &'static str,
        feedback: Vec<Feedback>,
    },
    Error {
        message: String,
    },
    Goodbye,
}

/// What an `observe` reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Observation {
    pub mode: &'static str,
    /// Template queued for placement, if any.
    pub placing: Option<EntityType>,
    /// Entity picked up and not yet put down, if any.
    pub held: Option<EntityId>,
    pub entity_count: usize,
    pub entities: Vec<PlacedEntity>,
    pub draw_items: usize,
    pub last_load: Option<String>,
    pub saves_requested: u64,
    pub saves_written: u64,
    pub save_error: Option<String>,
}

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}
