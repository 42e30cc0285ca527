//! DDA grid raycasting
//!
//! One ray per screen column. The resulting `RayHit` buffer is both the wall
//! column source and the depth buffer for sprite occlusion.

use glam::Vec2;
use serde::Serialize;

use crate::map::{OPEN, TileMap, WallKind};

/// Which kind of grid line a ray struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WallSide {
    /// Crossed a vertical grid line (stepped along x)
    Vertical,
    /// Crossed a horizontal grid line (stepped along y)
    Horizontal,
}

/// First solid cell along a ray
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayHit {
    /// Length along the ray (cast_ray) or along the view axis (cast_rays)
    pub distance: f32,
    /// Wall code of the hit cell, boundary code outside the grid
    pub wall_type: u8,
    pub side: WallSide,
    /// Fractional position along the struck face
    pub tex_x: f32,
    pub map_x: i32,
    pub map_y: i32,
}

/// March a single ray from `(px, py)` until it lands in a solid cell or leaves the grid
pub fn cast_ray(map: &TileMap, px: f32, py: f32, angle: f32) -> RayHit {
    let dir = Vec2::new(angle.cos(), angle.sin());

    let mut map_x = px.floor() as i32;
    let mut map_y = py.floor() as i32;

    let delta_x = if dir.x == 0.0 { f32::INFINITY } else { (1.0 / dir.x).abs() };
    let delta_y = if dir.y == 0.0 { f32::INFINITY } else { (1.0 / dir.y).abs() };

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (px - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - px) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (py - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - py) * delta_y)
    };

    // Every step moves one cell, so the march leaves any finite grid
    let limit = map.width() + map.height() + 2;
    let mut side = WallSide::Vertical;
    let mut wall_type = WallKind::BOUNDARY.code();

    for _ in 0..limit {
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = WallSide::Vertical;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = WallSide::Horizontal;
        }

        match map.cell(map_x, map_y) {
            None => {
                wall_type = WallKind::BOUNDARY.code();
                break;
            }
            Some(code) if code != OPEN => {
                wall_type = code;
                break;
            }
            Some(_) => {}
        }
    }

    let distance = match side {
        WallSide::Vertical => (map_x as f32 - px + (1 - step_x) as f32 / 2.0) / dir.x,
        WallSide::Horizontal => (map_y as f32 - py + (1 - step_y) as f32 / 2.0) / dir.y,
    };
    let distance = if distance.is_finite() { distance.max(0.0) } else { 0.0 };

    let wall_x = match side {
        WallSide::Vertical => py + distance * dir.y,
        WallSide::Horizontal => px + distance * dir.x,
    };

    RayHit {
        distance,
        wall_type,
        side,
        tex_x: wall_x - wall_x.floor(),
        map_x,
        map_y,
    }
}

/// Cast one ray per column across `fov`, returning view-axis distances
pub fn cast_rays(
    map: &TileMap,
    px: f32,
    py: f32,
    player_angle: f32,
    columns: usize,
    fov: f32,
) -> Vec<RayHit> {
    let half_tan = (fov / 2.0).tan();

    (0..columns)
        .map(|x| {
            let camera_x = 2.0 * x as f32 / columns as f32 - 1.0;
            let offset = (camera_x * half_tan).atan();
            let mut hit = cast_ray(map, px, py, player_angle + offset);
            hit.distance *= offset.cos();
            hit
        })
        .collect()
}
