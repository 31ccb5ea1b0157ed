// =============================================================================
// Landmarks, civic blocks and housing
// =============================================================================

use crate::entity::EntityType;

use super::CityBuilder;

/// First interior cell of the low and high corner blocks.
const CORNER_BLOCKS: [i32; 2] = [8, 31];
/// Offsets of homes inside a corner block, leaving the first row and column
/// free for roadside bushes.
const HOME_OFFSETS: [i32; 3] = [2, 5, 8];

pub(super) fn place_tower_cluster(city: &mut CityBuilder) {
    city.place(EntityType::Tower3, 23, 23);
    city.place(EntityType::Tower2, 25, 23);
    city.place(EntityType::Tower2, 23, 25);
    city.place(EntityType::Tower3, 25, 25);
    city.place(EntityType::Fountain, 27, 27);
}

/// Civic and commercial buildings in the four blocks bordering the centre,
/// each placed against the road it faces.
pub(super) fn place_civic_blocks(city: &mut CityBuilder) {
    // North block, facing the road at y = 19.
    city.place(EntityType::Bank, 21, 16);
    city.place(EntityType::Market, 25, 16);
    city.place(EntityType::Store, 28, 17);

    // South block, facing the road at y = 30.
    city.place(EntityType::Hospital, 21, 31);
    city.place(EntityType::Police, 25, 31);
    city.place(EntityType::Gym, 28, 31);

    // West block, facing the road at x = 19.
    city.place(EntityType::Guild, 17, 21);
    city.place(EntityType::School, 17, 24);
    city.place(EntityType::Library, 17, 27);

    // East block, facing the road at x = 30.
    city.place(EntityType::Store, 31, 21);
    city.place(EntityType::Market, 31, 24);
    city.place(EntityType::Park, 31, 28);
}

pub(super) fn infill_residential_corners(city: &mut CityBuilder) {
    for &bx in &CORNER_BLOCKS {
        for &by in &CORNER_BLOCKS {
            for &dy in &HOME_OFFSETS {
                for &dx in &HOME_OFFSETS {
                    city.place(EntityType::Home, bx + dx, by + dy);
                }
            }
        }
    }
}
