use bevy::prelude::*;

use layout::config::LAYOUT_STORAGE_KEY;
use layout::session::{EditSession, Feedback, FeedbackEvent, PersistRequested, SessionSet};

use crate::layout_store::{LayoutStore, LoadOutcome};
use crate::store::{KeyValueStore, MemoryStore};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Where the layout is stored. Insert before [`SavePlugin`] to override.
#[derive(Resource, Debug, Clone)]
pub struct StorageConfig {
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: LAYOUT_STORAGE_KEY.to_string(),
        }
    }
}

/// The store the session is persisted through. Insert before [`SavePlugin`]
/// to pick a backend; an in-memory store is used otherwise.
#[derive(Resource)]
pub struct LayoutStorage(pub LayoutStore);

impl LayoutStorage {
    pub fn new(backend: Box<dyn KeyValueStore>, config: &StorageConfig) -> Self {
        Self(LayoutStore::with_key(backend, config.key.clone()))
    }
}

/// Bookkeeping for loads and saves, readable by drivers and tests.
///
/// Every persist request gets the next sequence number. Only the newest
/// request of a frame is written, and a write never goes out with a sequence
/// at or below `written`.
#[derive(Resource, Debug, Clone, Default)]
pub struct SaveStatus {
    pub last_load: Option<LoadOutcome>,
    pub requested: u64,
    pub written: u64,
    pub last_error: Option<String>,
}

impl SaveStatus {
    pub fn is_pending(&self) -> bool {
        self.written < self.requested
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event, Debug, Clone)]
pub struct LayoutLoaded {
    pub outcome: LoadOutcome,
    pub entity_count: usize,
}

#[derive(Event, Debug, Clone)]
pub struct LayoutSaved {
    pub sequence: u64,
    pub entity_count: usize,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Loads the layout into [`EditSession`] at startup and writes it back on
/// every [`PersistRequested`]. Requires `LayoutPlugin`.
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StorageConfig>()
            .init_resource::<SaveStatus>()
            .add_event::<LayoutLoaded>()
            .add_event::<LayoutSaved>();

        if !app.world().contains_resource::<LayoutStorage>() {
            let config = app.world().resource::<StorageConfig>().clone();
            app.insert_resource(LayoutStorage::new(Box::new(MemoryStore::new()), &config));
        }

        app.add_systems(Startup, load_layout_on_startup)
            .add_systems(Update, persist_layout.in_set(SessionSet::Effects));
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn load_layout_on_startup(
    mut storage: ResMut<LayoutStorage>,
    mut session: ResMut<EditSession>,
    mut status: ResMut<SaveStatus>,
    mut loaded: EventWriter<LayoutLoaded>,
) {
    let result = storage.0.load();
    let entity_count = result.layout.len();
    if result.outcome.is_fallback() {
        info!("Started with default city ({entity_count} entities): {}", result.outcome);
    } else {
        info!("Loaded layout ({entity_count} entities): {}", result.outcome);
    }
    session.replace_layout(result.layout);
    status.last_load = Some(result.outcome.clone());
    loaded.send(LayoutLoaded {
        outcome: result.outcome,
        entity_count,
    });
}

/// Writes the newest snapshot requested this frame. Older requests in the
/// same frame are superseded and never reach the store.
fn persist_layout(
    mut requests: EventReader<PersistRequested>,
    mut storage: ResMut<LayoutStorage>,
    mut status: ResMut<SaveStatus>,
    mut feedback: EventWriter<FeedbackEvent>,
    mut saved: EventWriter<LayoutSaved>,
) {
    let mut latest = None;
    for request in requests.read() {
        status.requested += 1;
        latest = Some((status.requested, &request.entities));
    }
    let Some((sequence, entities)) = latest else {
        return;
    };
    if sequence <= status.written {
        return;
    }

    match storage.0.save(entities) {
        Ok(()) => {
            status.written = sequence;
            status.last_error = None;
            debug!("Saved layout #{sequence} ({} entities)", entities.len());
            saved.send(LayoutSaved {
                sequence,
                entity_count: entities.len(),
            });
        }
        Err(e) => {
            error!("Layout save #{sequence} failed: {e}");
            status.last_error = Some(e.to_string());
            feedback.send(FeedbackEvent(Feedback::Error));
        }
    }
}
