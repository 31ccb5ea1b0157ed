// =============================================================================
// Decorations: roadside bushes and perimeter trees
// =============================================================================

use crate::config::GRID_SIZE;
use crate::entity::EntityType;

use super::roads::{ROAD_AXES, ROAD_SPAN};
use super::CityBuilder;

/// Distance between consecutive bushes along a road.
pub const BUSH_STRIDE: usize = 3;

/// Bushes on the east side of north-south roads and the south side of
/// east-west roads. Cells already taken by a building or crossing road are
/// skipped.
pub(super) fn line_roads_with_bushes(city: &mut CityBuilder) {
    let (start, end) = ROAD_SPAN;
    for &axis in &ROAD_AXES {
        for t in (start..=end).step_by(BUSH_STRIDE) {
            city.try_place(EntityType::Bush, axis + 1, t);
        }
        for t in (start..=end).step_by(BUSH_STRIDE) {
            city.try_place(EntityType::Bush, t, axis + 1);
        }
    }
}

/// Trees on every cell of the outer ring, alternating the two tree kinds,
/// walked clockwise from the top-left corner.
pub(super) fn frame_perimeter_with_trees(city: &mut CityBuilder) {
    for (i, (x, y)) in perimeter_cells().enumerate() {
        let kind = if i % 2 == 0 {
            EntityType::Tree
        } else {
            EntityType::Tree2
        };
        city.place(kind, x, y);
    }
}

pub(super) fn perimeter_cells() -> impl Iterator<Item = (i32, i32)> {
    let last = GRID_SIZE - 1;
    let top = (0..GRID_SIZE).map(|x| (x, 0));
    let right = (1..GRID_SIZE).map(move |y| (last, y));
    let bottom = (0..last).rev().map(move |x| (x, last));
    let left = (1..last).rev().map(|y| (0, y));
    top.chain(right).chain(bottom).chain(left)
}
