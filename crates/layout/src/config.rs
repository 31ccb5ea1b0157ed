pub const GRID_SIZE: i32 = 50;
pub const TOTAL_CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Projected width of one diamond tile in screen units.
pub const TILE_WIDTH: i32 = 40;
/// Projected height of one diamond tile in screen units.
pub const TILE_HEIGHT: i32 = 20;

/// Key under which the layout is stored in the key-value collaborator.
pub const LAYOUT_STORAGE_KEY: &str = "city_layout";

/// Current version of the persisted layout envelope. Bare JSON arrays written
/// before the envelope existed are treated as version 0.
pub const LAYOUT_FORMAT_VERSION: u32 = 1;
