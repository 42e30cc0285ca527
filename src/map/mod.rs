//! Tile grids, floors and the stairs table
//!
//! A floor is a row-major grid of wall codes. Anything outside the grid is
//! solid, so every query here is total.

pub mod layouts;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Wall code for open floor
pub const OPEN: u8 = 0;

/// Wall codes used by the layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum WallKind {
    Outdoor = 1,
    Stone = 2,
    Blood = 3,
    Foliage = 4,
    MansionExterior = 5,
    MansionInterior = 6,
    Stairs = 7,
}

impl WallKind {
    /// Code reported for rays that leave the grid
    pub const BOUNDARY: WallKind = WallKind::Outdoor;

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WallKind::Outdoor),
            2 => Some(WallKind::Stone),
            3 => Some(WallKind::Blood),
            4 => Some(WallKind::Foliage),
            5 => Some(WallKind::MansionExterior),
            6 => Some(WallKind::MansionInterior),
            7 => Some(WallKind::Stairs),
            _ => None,
        }
    }
}

/// Player spawn pose stored with a floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

/// One floor's wall grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    pub spawn: Pose,
}

impl TileMap {
    /// Create a grid of open cells
    pub fn new(width: usize, height: usize, spawn: Pose) -> Self {
        Self {
            width,
            height,
            cells: vec![OPEN; width * height],
            spawn,
        }
    }

    /// Parse rows of digit characters (`'0'` open, `'1'..='7'` walls)
    ///
    /// Rows shorter than the first are padded with solid boundary cells;
    /// anything that isn't a digit is treated as open floor.
    pub fn from_rows(rows: &[&str], spawn: Pose) -> Self {
        let width = rows.first().map_or(0, |r| r.len());
        let mut map = Self::new(width, rows.len(), spawn);
        for (y, row) in rows.iter().enumerate() {
            let bytes = row.as_bytes();
            for x in 0..width {
                let code = match bytes.get(x) {
                    Some(b) if b.is_ascii_digit() => b - b'0',
                    Some(_) => OPEN,
                    None => WallKind::BOUNDARY.code(),
                };
                map.set(x, y, code);
            }
        }
        map
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Code at integer cell coordinates, `None` when out of bounds
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Overwrite a cell (ignored out of bounds)
    pub fn set(&mut self, x: usize, y: usize, code: u8) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = code;
        }
    }

    /// True if the cell containing (x, y) is a wall or outside the grid
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        self.wall_type(x, y) != OPEN
    }

    /// Wall code of the cell containing (x, y); boundary code out of bounds
    #[inline]
    pub fn wall_type(&self, x: f32, y: f32) -> u8 {
        if !x.is_finite() || !y.is_finite() {
            return WallKind::BOUNDARY.code();
        }
        self.cell(x.floor() as i32, y.floor() as i32)
            .unwrap_or(WallKind::BOUNDARY.code())
    }
}

/// Mansion footprint on the ground floor (inclusive, map units)
pub const MANSION_MIN_X: f32 = 24.0;
pub const MANSION_MAX_X: f32 = 38.0;
pub const MANSION_MIN_Y: f32 = 12.0;
pub const MANSION_MAX_Y: f32 = 38.0;

/// True inside the mansion: any upper floor, or the footprint on floor 1
pub fn in_mansion(x: f32, y: f32, floor: u8) -> bool {
    if floor > 1 {
        return true;
    }
    floor == 1
        && (MANSION_MIN_X..=MANSION_MAX_X).contains(&x)
        && (MANSION_MIN_Y..=MANSION_MAX_Y).contains(&y)
}

/// A stairs trigger cell leading from one floor to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StairLink {
    pub x: i32,
    pub y: i32,
    pub from_floor: u8,
    pub to_floor: u8,
}

/// Destination floor for a position standing on a stairs trigger
pub fn stair_destination(links: &[StairLink], x: f32, y: f32, floor: u8) -> Option<u8> {
    let (cx, cy) = (x.floor() as i32, y.floor() as i32);
    links
        .iter()
        .find(|l| l.x == cx && l.y == cy && l.from_floor == floor)
        .map(|l| l.to_floor)
}

/// Pure floor construction function
pub type FloorBuilder = fn(u8) -> TileMap;

/// Floors built on first use and kept for the rest of the session
#[derive(Debug, Clone)]
pub struct FloorCache {
    builder: FloorBuilder,
    built: BTreeMap<u8, TileMap>,
}

impl FloorCache {
    pub fn new(builder: FloorBuilder) -> Self {
        Self {
            builder,
            built: BTreeMap::new(),
        }
    }

    /// Fetch a floor, building it if this is the first visit
    pub fn floor(&mut self, index: u8) -> &TileMap {
        let builder = self.builder;
        self.built.entry(index).or_insert_with(|| {
            log::debug!("Building floor {}", index);
            builder(index)
        })
    }

    /// Drop every built floor so the next visit rebuilds it
    pub fn clear(&mut self) {
        self.built.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TileMap {
        TileMap::from_rows(
            &["11111", "10001", "10201", "10001", "11111"],
            Pose { x: 1.5, y: 1.5, angle: 0.0 },
        )
    }

    #[test]
    fn test_is_wall_and_wall_type() {
        let map = small();
        assert!(!map.is_wall(1.5, 1.5));
        assert!(map.is_wall(0.5, 2.5));
        assert_eq!(map.wall_type(2.2, 2.9), WallKind::Stone.code());
        assert_eq!(map.wall_type(3.99, 3.0), OPEN);
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let map = small();
        assert!(map.is_wall(-0.1, 2.0));
        assert!(map.is_wall(2.0, 5.0));
        assert!(map.is_wall(100.0, 100.0));
        assert!(map.is_wall(f32::NAN, 1.0));
        assert_eq!(map.wall_type(-3.0, -3.0), WallKind::BOUNDARY.code());
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let map = TileMap::from_rows(&["000", "0"], Pose { x: 0.5, y: 0.5, angle: 0.0 });
        assert_eq!(map.width(), 3);
        assert_eq!(map.cell(2, 1), Some(WallKind::BOUNDARY.code()));
        assert_eq!(map.cell(0, 1), Some(OPEN));
    }

    #[test]
    fn test_in_mansion() {
        assert!(in_mansion(0.0, 0.0, 2));
        assert!(in_mansion(30.0, 20.0, 1));
        assert!(in_mansion(24.0, 38.0, 1));
        assert!(!in_mansion(23.9, 20.0, 1));
        assert!(!in_mansion(30.0, 11.0, 1));
    }

    #[test]
    fn test_stair_destination_matches_floor_and_cell() {
        let links = [
            StairLink { x: 3, y: 4, from_floor: 1, to_floor: 2 },
            StairLink { x: 2, y: 4, from_floor: 2, to_floor: 1 },
        ];
        assert_eq!(stair_destination(&links, 3.5, 4.9, 1), Some(2));
        assert_eq!(stair_destination(&links, 3.5, 4.9, 2), None);
        assert_eq!(stair_destination(&links, 2.1, 4.1, 2), Some(1));
        assert_eq!(stair_destination(&links, 4.0, 4.0, 1), None);
    }

    #[test]
    fn test_floor_cache_builds_once() {
        use std::sync::atomic::{AtomicU32, Ordering};
        static BUILDS: AtomicU32 = AtomicU32::new(0);

        fn build(index: u8) -> TileMap {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            let mut map = TileMap::new(4, 4, Pose { x: 1.5, y: 1.5, angle: 0.0 });
            map.set(0, 0, index);
            map
        }
        let mut cache = FloorCache::new(build);
        assert_eq!(cache.floor(2).cell(0, 0), Some(2));
        assert_eq!(cache.floor(2).cell(0, 0), Some(2));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        cache.clear();
        assert_eq!(cache.floor(2).cell(0, 0), Some(2));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 2);
    }
}
