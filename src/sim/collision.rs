//! Grid collision
//!
//! Movement is resolved one axis at a time so a blocked diagonal still
//! slides along the wall.

use glam::Vec2;

use crate::map::TileMap;

/// Move `pos` by `delta`, keeping `radius` clear of walls on each axis
///
/// X is resolved first; Y is then tested from the (possibly) updated X.
/// Both edge samples sit at `destination ± radius` on the moving axis, so a move is
/// accepted only if neither side of the body would end up inside a wall.
/// An axis with no movement is left untouched.
pub fn move_with_collision(map: &TileMap, pos: Vec2, delta: Vec2, radius: f32) -> Vec2 {
    let mut out = pos;

    if delta.x != 0.0 {
        let nx = out.x + delta.x;
        if !map.is_wall(nx + radius, out.y) && !map.is_wall(nx - radius, out.y) {
            out.x = nx;
        }
    }

    if delta.y != 0.0 {
        let ny = out.y + delta.y;
        if !map.is_wall(out.x, ny + radius) && !map.is_wall(out.x, ny - radius) {
            out.y = ny;
        }
    }

    out
}

/// Move a point-sized body (enemies use their centre only)
#[inline]
pub fn move_point(map: &TileMap, pos: Vec2, delta: Vec2) -> Vec2 {
    move_with_collision(map, pos, delta, 0.0)
}

/// True if no wall sample lies strictly between `from` and `to`
///
/// The segment is sampled at `steps` evenly spaced interior points; fewer
/// than two steps means there is nothing between the endpoints to test.
pub fn line_of_sight(map: &TileMap, from: Vec2, to: Vec2, steps: u32) -> bool {
    (1..steps).all(|i| {
        let t = i as f32 / steps as f32;
        let p = from.lerp(to, t);
        !map.is_wall(p.x, p.y)
    })
}
