// =============================================================================
// Road grid
// =============================================================================

use crate::entity::EntityType;

use super::CityBuilder;

/// Column (and row) indices of the crosshatch roads.
pub const ROAD_AXES: [i32; 4] = [7, 19, 30, 42];

/// Inclusive cell range every road spans. It runs from the first to the last
/// axis, so the outer roads close the grid.
pub const ROAD_SPAN: (i32, i32) = (7, 42);

pub(super) fn lay_road_grid(city: &mut CityBuilder) {
    let (start, end) = ROAD_SPAN;

    // North-south roads first; they own the intersections.
    for &x in &ROAD_AXES {
        for y in start..=end {
            city.place(EntityType::Road, x, y);
        }
    }

    for &y in &ROAD_AXES {
        for x in start..=end {
            if ROAD_AXES.contains(&x) {
                continue;
            }
            city.place(EntityType::Road, x, y);
        }
    }
}
