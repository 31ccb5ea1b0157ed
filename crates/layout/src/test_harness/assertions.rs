//! Assertion helpers for `TestSession` integration tests.

use crate::entity::EntityType;

use super::TestSession;

impl TestSession {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert that cell `(x, y)` is covered by an entity of type `ty`.
    pub fn assert_entity_at(&self, x: i32, y: i32, ty: EntityType) {
        let found = self.session().layout().entity_at(x, y).map(|e| e.entity_type);
        assert_eq!(found, Some(ty), "Expected {ty} at ({x}, {y}), found {found:?}");
    }

    /// Assert that cell `(x, y)` is free.
    pub fn assert_empty_at(&self, x: i32, y: i32) {
        let found = self.session().layout().entity_at(x, y);
        assert!(found.is_none(), "Expected ({x}, {y}) to be free, found {found:?}");
    }

    pub fn assert_entity_count(&self, expected: usize) {
        let count = self.entity_count();
        assert_eq!(count, expected, "Expected {expected} entities, got {count}");
    }

    /// Assert the mode by its short name (`browsing`, `placing`, ...).
    pub fn assert_mode(&self, expected: &str) {
        let mode = self.mode().name();
        assert_eq!(mode, expected, "Expected mode {expected}, got {mode}");
    }

    /// Assert the layout still satisfies every placement invariant.
    pub fn assert_layout_valid(&self) {
        if let Err(e) = self.session().layout().verify() {
            panic!("Layout invariant broken: {e}");
        }
    }
}
