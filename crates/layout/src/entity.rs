use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GRID_SIZE;

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Home,
    Guild,
    Store,
    Market,
    Bank,
    Hospital,
    Police,
    Gym,
    School,
    Library,
    Park,
    Fountain,
    Bush,
    Tree,
    Tree2,
    Road,
    Tower2,
    Tower3,
}

impl EntityType {
    pub fn is_road(self) -> bool {
        matches!(self, EntityType::Road)
    }

    pub fn is_tree(self) -> bool {
        matches!(self, EntityType::Tree | EntityType::Tree2)
    }

    /// Stable lowercase name, identical to the persisted representation.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Home => "home",
            EntityType::Guild => "guild",
            EntityType::Store => "store",
            EntityType::Market => "market",
            EntityType::Bank => "bank",
            EntityType::Hospital => "hospital",
            EntityType::Police => "police",
            EntityType::Gym => "gym",
            EntityType::School => "school",
            EntityType::Library => "library",
            EntityType::Park => "park",
            EntityType::Fountain => "fountain",
            EntityType::Bush => "bush",
            EntityType::Tree => "tree",
            EntityType::Tree2 => "tree2",
            EntityType::Road => "road",
            EntityType::Tower2 => "tower2",
            EntityType::Tower3 => "tower3",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity ids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// The `size x size` square of cells anchored at `(x, y)` as its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Footprint {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self { x, y, size }
    }

    /// True when every cell of the footprint lies inside the grid and the
    /// footprint is non-empty. Written so no anchor or size can overflow.
    pub fn in_bounds(&self) -> bool {
        self.size > 0
            && self.size <= GRID_SIZE
            && self.x >= 0
            && self.y >= 0
            && self.x <= GRID_SIZE - self.size
            && self.y <= GRID_SIZE - self.size
    }

    /// Exclusive end of the footprint on each axis, widened so far-off-grid
    /// records still compare correctly.
    #[inline]
    fn end(&self) -> (i64, i64) {
        let size = i64::from(self.size.max(0));
        (i64::from(self.x) + size, i64::from(self.y) + size)
    }

    /// Axis-aligned overlap test on half-open cell ranges.
    #[inline]
    pub fn intersects(&self, other: &Footprint) -> bool {
        let (end_x, end_y) = self.end();
        let (other_end_x, other_end_y) = other.end();
        !(end_x <= i64::from(other.x)
            || i64::from(self.x) >= other_end_x
            || end_y <= i64::from(other.y)
            || i64::from(self.y) >= other_end_y)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (end_x, end_y) = self.end();
        x >= self.x && i64::from(x) < end_x && y >= self.y && i64::from(y) < end_y
    }

    /// Iterates the covered cells row by row. Cells past `i32::MAX` are cut off.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let Footprint { x, y, size } = *self;
        let size = size.max(0);
        let end_x = x.saturating_add(size);
        let end_y = y.saturating_add(size);
        (y..end_y).flat_map(move |cy| (x..end_x).map(move |cx| (cx, cy)))
    }
}

// ---------------------------------------------------------------------------
// Placed entity
// ---------------------------------------------------------------------------

/// A building, road segment or decoration placed on the grid.
///
/// Field names serialize in camelCase (`gridX`, `isDecoration`) so stored
/// layouts stay readable by other clients of the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedEntity {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    pub grid_x: i32,
    pub grid_y: i32,
    pub size: i32,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub is_decoration: bool,
}

impl PlacedEntity {
    #[inline]
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.grid_x, self.grid_y, self.size)
    }

    /// Same entity anchored at a new cell. Identity, type and size are kept.
    pub fn moved_to(mut self, grid_x: i32, grid_y: i32) -> Self {
        self.grid_x = grid_x;
        self.grid_y = grid_y;
        self
    }
}
