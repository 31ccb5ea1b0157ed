//! Isometric projection between grid cells and screen space.
//!
//! A cell `(gx, gy)` projects to the top vertex of its diamond tile:
//!
//! ```text
//! x = (gx - gy) * TILE_WIDTH / 2
//! y = (gx + gy) * TILE_HEIGHT / 2
//! ```
//!
//! The transform is linear with a non-zero determinant, so distinct cells never
//! share a projected position.

use std::cmp::Ordering;

use crate::config::{TILE_HEIGHT, TILE_WIDTH};
use crate::entity::PlacedEntity;

const HALF_W: i32 = TILE_WIDTH / 2;
const HALF_H: i32 = TILE_HEIGHT / 2;

#[inline]
pub fn grid_to_iso(gx: i32, gy: i32) -> (i32, i32) {
    ((gx - gy) * HALF_W, (gx + gy) * HALF_H)
}

/// Exact inverse of [`grid_to_iso`]. Returns `None` when `(x, y)` is not the
/// projected origin of any cell.
pub fn iso_to_grid(x: i32, y: i32) -> Option<(i32, i32)> {
    if x % HALF_W != 0 || y % HALF_H != 0 {
        return None;
    }
    let diff = x / HALF_W;
    let sum = y / HALF_H;
    if (sum + diff) % 2 != 0 {
        return None;
    }
    Some(((sum + diff) / 2, (sum - diff) / 2))
}

/// Cell whose diamond contains the screen point `(sx, sy)`.
pub fn screen_to_grid(sx: f32, sy: f32) -> (i32, i32) {
    let a = sx / HALF_W as f32;
    let b = sy / HALF_H as f32;
    (((a + b) / 2.0).floor() as i32, ((b - a) / 2.0).floor() as i32)
}

/// Screen-space width and height of a `size x size` footprint.
pub fn footprint_screen_size(size: i32) -> (i32, i32) {
    (size * TILE_WIDTH, size * TILE_HEIGHT)
}

/// Depth key: larger values are nearer the viewer and draw later.
#[inline]
pub fn draw_depth(entity: &PlacedEntity) -> i64 {
    i64::from(entity.grid_x) + i64::from(entity.grid_y) + i64::from(entity.size)
}

/// Back-to-front ordering for entities. Ties break on `grid_x`, then id, so the
/// order is total and stable across frames.
pub fn draw_order(a: &PlacedEntity, b: &PlacedEntity) -> Ordering {
    draw_depth(a)
        .cmp(&draw_depth(b))
        .then(a.grid_x.cmp(&b.grid_x))
        .then_with(|| a.id.cmp(&b.id))
}
