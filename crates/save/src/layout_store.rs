//! Loading and saving the city layout through a [`KeyValueStore`].
//!
//! `load` never fails: anything that is not a valid saved city (missing key,
//! unreadable backend, corrupt or unsupported payload, entities breaking the
//! layout invariants) falls back to the generated default city, which is
//! persisted immediately. The [`LoadOutcome`] says which path was taken.

use std::fmt;

use bevy::prelude::*;

use layout::catalog::find_template;
use layout::config::LAYOUT_STORAGE_KEY;
use layout::generator::generate_layout;
use layout::{CityLayout, PlacedEntity};

use crate::envelope::{self, UnwrapError};
use crate::save_error::SaveError;
use crate::save_migrate::{migrate_layout, VersionedLayout};
use crate::store::{KeyValueStore, MemoryStore};

/// How a load resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Current-format layout read from the store.
    Loaded,
    /// Older-format layout read and migrated.
    Migrated { from_version: u32 },
    /// Nothing stored under the key.
    Missing,
    /// Backend read failed.
    ReadFailed(String),
    /// Stored value is not decodable or fails its checksum.
    Corrupt(String),
    /// Stored value uses a format version this build cannot read.
    Unsupported(u32),
    /// Stored value decodes but does not form a legal layout.
    Invalid(String),
}

impl LoadOutcome {
    /// True when the default city was generated instead of reading one.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, LoadOutcome::Loaded | LoadOutcome::Migrated { .. })
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded => f.write_str("loaded"),
            LoadOutcome::Migrated { from_version } => write!(f, "migrated from v{from_version}"),
            LoadOutcome::Missing => f.write_str("no saved layout"),
            LoadOutcome::ReadFailed(msg) => write!(f, "read failed: {msg}"),
            LoadOutcome::Corrupt(msg) => write!(f, "corrupt: {msg}"),
            LoadOutcome::Unsupported(v) => write!(f, "unsupported format v{v}"),
            LoadOutcome::Invalid(msg) => write!(f, "invalid layout: {msg}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedLayout {
    pub layout: CityLayout,
    pub outcome: LoadOutcome,
}

pub struct LayoutStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}

impl LayoutStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, LAYOUT_STORAGE_KEY)
    }

    pub fn with_key(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Read the stored layout, or generate and persist the default city.
    pub fn load(&mut self) -> LoadedLayout {
        match self.read() {
            Ok(loaded) => loaded,
            Err(outcome) => {
                warn!("Layout under {:?} unusable ({outcome}); using default city", self.key);
                let layout = generate_layout();
                if let Err(e) = self.save(layout.entities()) {
                    error!("Failed to persist default layout: {e}");
                }
                LoadedLayout { layout, outcome }
            }
        }
    }

    /// Plain entity list form of [`Self::load`].
    pub fn load_entities(&mut self) -> Vec<PlacedEntity> {
        self.load().layout.into_entities()
    }

    pub fn save(&mut self, entities: &[PlacedEntity]) -> Result<(), SaveError> {
        let raw = envelope::wrap(entities)?;
        self.backend.set(&self.key, &raw)?;
        Ok(())
    }

    /// Read without fallback. `Err` carries the reason the stored value is
    /// unusable.
    fn read(&self) -> Result<LoadedLayout, LoadOutcome> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(LoadOutcome::Missing),
            Err(e) => return Err(LoadOutcome::ReadFailed(e.to_string())),
        };

        let mut stored = envelope::unwrap(&raw).map_err(|e| match e {
            UnwrapError::Unsupported(v) => LoadOutcome::Unsupported(v),
            other => LoadOutcome::Corrupt(other.to_string()),
        })?;

        let report = migrate_layout(&mut stored).map_err(|e| LoadOutcome::Corrupt(e.to_string()))?;
        let layout = validate(stored).map_err(LoadOutcome::Invalid)?;

        let outcome = if report.steps_applied() > 0 {
            info!(
                "Migrated stored layout from v{} to v{}",
                report.original_version, report.final_version
            );
            LoadOutcome::Migrated {
                from_version: report.original_version,
            }
        } else {
            LoadOutcome::Loaded
        };
        Ok(LoadedLayout { layout, outcome })
    }
}

/// Structural check of a decoded layout: non-empty, catalog sizes, bounds,
/// no overlaps, unique ids.
fn validate(stored: VersionedLayout) -> Result<CityLayout, String> {
    if stored.entities.is_empty() {
        return Err("no entities".to_string());
    }
    for entity in &stored.entities {
        let expected = find_template(entity.entity_type).map(|t| t.size);
        if expected != Some(entity.size) {
            return Err(format!(
                "entity {} has size {} but {} is {:?}",
                entity.id, entity.size, entity.entity_type, expected
            ));
        }
    }
    CityLayout::from_entities(stored.entities).map_err(|e| e.to_string())
}
