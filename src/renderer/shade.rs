//! Flat wall shading and column sizing

use super::raycast::{RayHit, WallSide};
use crate::map::WallKind;

/// Distance at which walls reach their darkest shade
const FADE_DISTANCE: f32 = 20.0;
/// Floor on the distance falloff so far walls never go fully black
const MIN_BRIGHTNESS: f32 = 0.15;
/// Horizontal-side hits are dimmed to separate the two wall orientations
const SIDE_DIM: f32 = 0.7;

/// Base colour for a wall kind
pub fn base_color(kind: WallKind) -> [u8; 3] {
    match kind {
        WallKind::Outdoor => [139, 69, 19],
        WallKind::Stone => [100, 100, 120],
        WallKind::Blood => [160, 40, 40],
        WallKind::Foliage => [60, 80, 60],
        WallKind::MansionExterior => [180, 160, 120],
        WallKind::MansionInterior => [120, 80, 60],
        WallKind::Stairs => [255, 255, 80],
    }
}

/// Distance falloff factor in [MIN_BRIGHTNESS, 1]
#[inline]
pub fn distance_shade(distance: f32) -> f32 {
    (1.0 - distance / FADE_DISTANCE).max(MIN_BRIGHTNESS)
}

/// Shaded colour for one wall column
///
/// Unknown codes fall back to the boundary colour.
pub fn wall_color(hit: &RayHit) -> [u8; 3] {
    let kind = WallKind::from_code(hit.wall_type).unwrap_or(WallKind::BOUNDARY);
    let side = match hit.side {
        WallSide::Vertical => 1.0,
        WallSide::Horizontal => SIDE_DIM,
    };
    let factor = side * distance_shade(hit.distance);
    base_color(kind).map(|c| (c as f32 * factor) as u8)
}

/// Top and bottom rows of a wall column on a screen `height` rows tall
///
/// The column is `height / distance` rows, centred and clamped to the screen.
pub fn column_extent(distance: f32, height: usize) -> (usize, usize) {
    let h = height as f32;
    if distance <= 0.0 {
        return (0, height);
    }
    let line = h / distance;
    let top = ((h - line) / 2.0).max(0.0);
    let bottom = ((h + line) / 2.0).min(h);
    (top as usize, bottom as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(wall_type: u8, side: WallSide, distance: f32) -> RayHit {
        RayHit {
            distance,
            wall_type,
            side,
            tex_x: 0.5,
            map_x: 0,
            map_y: 0,
        }
    }

    #[test]
    fn test_close_vertical_hit_is_base_colour() {
        assert_eq!(wall_color(&hit(2, WallSide::Vertical, 0.0)), [100, 100, 120]);
    }

    #[test]
    fn test_horizontal_side_is_darker() {
        let v = wall_color(&hit(5, WallSide::Vertical, 4.0));
        let h = wall_color(&hit(5, WallSide::Horizontal, 4.0));
        assert!(h.iter().zip(v.iter()).all(|(a, b)| a < b));
    }

    #[test]
    fn test_falloff_floors_at_minimum() {
        assert_eq!(distance_shade(100.0), MIN_BRIGHTNESS);
        assert_eq!(distance_shade(10.0), 0.5);
    }

    #[test]
    fn test_unknown_code_uses_boundary_colour() {
        assert_eq!(
            wall_color(&hit(42, WallSide::Vertical, 0.0)),
            base_color(WallKind::BOUNDARY)
        );
    }

    #[test]
    fn test_column_extent() {
        assert_eq!(column_extent(2.0, 100), (25, 75));
        assert_eq!(column_extent(0.5, 100), (0, 100));
        assert_eq!(column_extent(0.0, 100), (0, 100));
    }
}
