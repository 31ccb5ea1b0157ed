//! # TestSession: headless harness for the edit session
//!
//! Wraps `bevy::app::App` + [`LayoutPlugin`] so tests can push commands
//! through the same event path a front end uses, then inspect the session
//! and the events it produced.

mod assertions;

use bevy::app::App;
use bevy::prelude::*;

use crate::city_layout::CityLayout;
use crate::entity::PlacedEntity;
use crate::generator::generate_layout;
use crate::session::{
    CommandResolved, EditMode, EditSession, Feedback, FeedbackEvent, LayoutPlugin,
    PersistRequested, SessionCommand, SessionInput, TransitionLog, TransitionRecord,
};

pub struct TestSession {
    app: App,
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSession {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Session over an empty grid.
    pub fn new() -> Self {
        Self::with_layout(CityLayout::new())
    }

    /// Session over the generated default city.
    pub fn with_default_city() -> Self {
        Self::with_layout(generate_layout())
    }

    pub fn with_layout(layout: CityLayout) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(LayoutPlugin);
        app.insert_resource(EditSession::new(layout));
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Queue one command and run a frame.
    pub fn send(&mut self, command: SessionCommand) -> &mut Self {
        self.app.world_mut().send_event(SessionInput(command));
        self.app.update();
        self
    }

    /// Queue several commands for the same frame.
    pub fn send_batch(&mut self, commands: impl IntoIterator<Item = SessionCommand>) -> &mut Self {
        for command in commands {
            self.app.world_mut().send_event(SessionInput(command));
        }
        self.app.update();
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn session(&self) -> &EditSession {
        self.app.world().resource::<EditSession>()
    }

    pub fn mode(&self) -> &EditMode {
        self.session().mode()
    }

    pub fn entities(&self) -> Vec<PlacedEntity> {
        self.session().layout().to_vec()
    }

    pub fn entity_count(&self) -> usize {
        self.session().layout().len()
    }

    pub fn log(&self) -> &TransitionLog {
        self.app.world().resource::<TransitionLog>()
    }

    /// Feedback signals emitted since the last drain.
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        self.app
            .world_mut()
            .resource_mut::<Events<FeedbackEvent>>()
            .drain()
            .map(|FeedbackEvent(signal)| signal)
            .collect()
    }

    /// Persistence requests emitted since the last drain.
    pub fn drain_persist_requests(&mut self) -> Vec<Vec<PlacedEntity>> {
        self.app
            .world_mut()
            .resource_mut::<Events<PersistRequested>>()
            .drain()
            .map(|request| request.entities)
            .collect()
    }

    /// One record per command applied since the last drain, in input order.
    pub fn drain_resolved(&mut self) -> Vec<TransitionRecord> {
        self.app
            .world_mut()
            .resource_mut::<Events<CommandResolved>>()
            .drain()
            .map(|CommandResolved(record)| record)
            .collect()
    }
}
