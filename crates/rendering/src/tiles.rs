//! Per-cell ground classification for the tile pass, read straight from the
//! occupancy index.

use layout::config::GRID_SIZE;
use layout::CityLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Grass,
    Road,
    /// Covered by a building or decoration. Only the anchor cell draws the
    /// sprite; the rest are skipped.
    Covered { is_anchor: bool },
    /// Outside the grid.
    Void,
}

pub fn classify_tile(layout: &CityLayout, x: i32, y: i32) -> TileKind {
    if x < 0 || y < 0 || x >= GRID_SIZE || y >= GRID_SIZE {
        return TileKind::Void;
    }
    match layout.occupant(x, y) {
        None => TileKind::Grass,
        Some(o) if o.entity_type.is_road() => TileKind::Road,
        Some(o) => TileKind::Covered {
            is_anchor: o.is_anchor,
        },
    }
}
