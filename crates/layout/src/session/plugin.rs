//! Plugin that wires the edit session into a Bevy app: input events in,
//! feedback and persistence requests out.

use bevy::prelude::*;

use super::log::{CommandResolved, TransitionLog};
use super::{EditSession, Feedback, SessionCommand, SessionEffect};
use crate::entity::PlacedEntity;

/// A user intent, sent by whatever front end drives the session.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SessionInput(pub SessionCommand);

/// Advisory signal for the haptic/feedback collaborator.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackEvent(pub Feedback);

/// The session asked for this snapshot to be written to the layout store.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PersistRequested {
    pub entities: Vec<PlacedEntity>,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionSet {
    /// Applies queued [`SessionInput`]s.
    Input,
    /// Reacts to the effects of this frame's transitions.
    Effects,
}

/// Registers the session resource, its events, and the input system.
pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditSession>()
            .init_resource::<TransitionLog>()
            .add_event::<SessionInput>()
            .add_event::<FeedbackEvent>()
            .add_event::<PersistRequested>()
            .add_event::<CommandResolved>()
            .configure_sets(Update, (SessionSet::Input, SessionSet::Effects).chain())
            .add_systems(Update, process_session_input.in_set(SessionSet::Input));
    }
}

/// Drains all pending inputs and applies them in order.
pub fn process_session_input(
    mut inputs: EventReader<SessionInput>,
    mut session: ResMut<EditSession>,
    mut log: ResMut<TransitionLog>,
    mut feedback: EventWriter<FeedbackEvent>,
    mut persist: EventWriter<PersistRequested>,
    mut resolved: EventWriter<CommandResolved>,
) {
    for SessionInput(command) in inputs.read() {
        let transition = session.handle(command.clone());

        if let Some(signal) = transition.feedback() {
            feedback.send(FeedbackEvent(signal));
        }
        if let Some(SessionEffect::Persist(entities)) = transition.effect {
            persist.send(PersistRequested { entities });
        }
        if transition.outcome.is_rejection() {
            debug!("{command:?} rejected: {:?}", transition.outcome);
        }
        let record = log.record(command.clone(), transition.outcome, session.mode());
        resolved.send(CommandResolved(record));
    }
}
