// ---------------------------------------------------------------------------
// Layout migration chain
// ---------------------------------------------------------------------------
//
// Each step takes a stored layout from `from_version` to `from_version + 1`.
// Version 0 is the headerless bare array written before the envelope format
// existed.

use layout::catalog::find_template;
use layout::config::LAYOUT_FORMAT_VERSION;
use layout::PlacedEntity;

use crate::save_error::SaveError;

/// Entity list tagged with the format version it was read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedLayout {
    pub version: u32,
    pub entities: Vec<PlacedEntity>,
}

pub(crate) struct MigrationStep {
    pub from_version: u32,
    pub description: &'static str,
    pub migrate_fn: fn(&mut Vec<PlacedEntity>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub original_version: u32,
    pub final_version: u32,
    pub step_descriptions: Vec<&'static str>,
}

impl MigrationReport {
    pub fn steps_applied(&self) -> usize {
        self.step_descriptions.len()
    }
}

pub(crate) const MIGRATION_STEPS: &[MigrationStep] = &[MigrationStep {
    from_version: 0,
    description: "Bare entity array -> v1 envelope; fill icon and decoration flag from catalog",
    migrate_fn: fill_from_catalog,
}];

/// Legacy records could omit `icon` and `isDecoration`.
fn fill_from_catalog(entities: &mut Vec<PlacedEntity>) {
    for entity in entities.iter_mut() {
        let Some(template) = find_template(entity.entity_type) else {
            continue;
        };
        if entity.icon.is_empty() {
            entity.icon = template.icon.to_string();
        }
        entity.is_decoration = template.is_decoration;
    }
}

/// Bring `layout` up to [`LAYOUT_FORMAT_VERSION`].
///
/// # Errors
///
/// `SaveError::MigrationFailed` when the version is newer than this build or
/// a step in the chain is missing.
pub fn migrate_layout(layout: &mut VersionedLayout) -> Result<MigrationReport, SaveError> {
    let original_version = layout.version;
    if layout.version > LAYOUT_FORMAT_VERSION {
        return Err(SaveError::MigrationFailed(format!(
            "layout is v{}, this build supports up to v{LAYOUT_FORMAT_VERSION}",
            layout.version
        )));
    }

    let mut step_descriptions = Vec::new();
    while layout.version < LAYOUT_FORMAT_VERSION {
        let Some(step) = MIGRATION_STEPS
            .iter()
            .find(|s| s.from_version == layout.version)
        else {
            return Err(SaveError::MigrationFailed(format!(
                "no migration step from v{}",
                layout.version
            )));
        };
        (step.migrate_fn)(&mut layout.entities);
        layout.version = step.from_version + 1;
        step_descriptions.push(step.description);
    }

    Ok(MigrationReport {
        original_version,
        final_version: layout.version,
        step_descriptions,
    })
}
