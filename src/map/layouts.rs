//! Floor construction
//!
//! Every floor is built by a pure function of its index. Rectangles are
//! inclusive on both ends.

use super::{OPEN, Pose, TileMap, WallKind};

/// Small drawing helper over a `TileMap`
struct Grid {
    map: TileMap,
}

impl Grid {
    fn new(width: usize, height: usize, spawn: Pose) -> Self {
        Self {
            map: TileMap::new(width, height, spawn),
        }
    }

    fn fill(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, kind: WallKind) -> &mut Self {
        self.paint(x0, y0, x1, y1, kind.code())
    }

    fn clear(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> &mut Self {
        self.paint(x0, y0, x1, y1, OPEN)
    }

    fn paint(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, code: u8) -> &mut Self {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.map.set(x, y, code);
            }
        }
        self
    }

    fn outline(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, kind: WallKind) -> &mut Self {
        self.fill(x0, y0, x1, y0, kind)
            .fill(x0, y1, x1, y1, kind)
            .fill(x0, y0, x0, y1, kind)
            .fill(x1, y0, x1, y1, kind)
    }

    fn hline(&mut self, x0: usize, x1: usize, y: usize, kind: WallKind) -> &mut Self {
        self.fill(x0, y, x1, y, kind)
    }

    fn vline(&mut self, x: usize, y0: usize, y1: usize, kind: WallKind) -> &mut Self {
        self.fill(x, y0, x, y1, kind)
    }

    fn open(&mut self, x: usize, y: usize) -> &mut Self {
        self.map.set(x, y, OPEN);
        self
    }

    fn mark(&mut self, x: usize, y: usize, kind: WallKind) -> &mut Self {
        self.map.set(x, y, kind.code());
        self
    }

    fn finish(&mut self) -> TileMap {
        self.map.clone()
    }
}

pub const CLASSIC_SIZE: usize = 24;
pub const MANSION_SIZE: usize = 40;

/// Single-floor arena used by the classic variant (the index is ignored)
pub fn classic_floor(_floor: u8) -> TileMap {
    use WallKind::*;

    let n = CLASSIC_SIZE - 1;
    Grid::new(CLASSIC_SIZE, CLASSIC_SIZE, Pose { x: 2.5, y: 2.5, angle: 0.0 })
        .outline(0, 0, n, n, Outdoor)
        // Stone bar across the north-west room
        .hline(2, 8, 8, Stone)
        // Stone divider with a doorway at y = 3
        .vline(15, 1, 2, Stone)
        .vline(15, 4, 6, Stone)
        // Blood chamber, door on its north face
        .outline(8, 12, 13, 16, Blood)
        .open(10, 12)
        // Overgrown pillar block
        .fill(18, 10, 19, 11, Foliage)
        // Southern stone wall
        .hline(14, 19, 18, Stone)
        .mark(4, 12, Stone)
        .mark(6, 12, Stone)
        .finish()
}

/// Mansion floors 1..=3; anything else falls back to the ground floor
pub fn mansion_floor(floor: u8) -> TileMap {
    match floor {
        2 => mansion_second_floor(),
        3 => mansion_top_floor(),
        _ => mansion_ground_floor(),
    }
}

fn mansion_ground_floor() -> TileMap {
    use WallKind::*;

    let n = MANSION_SIZE - 1;
    Grid::new(MANSION_SIZE, MANSION_SIZE, Pose { x: 2.5, y: 20.5, angle: 0.0 })
        .outline(0, 0, n, n, Outdoor)
        // Stone ruin with a south door
        .outline(4, 4, 10, 9, Stone)
        .open(7, 9)
        // Blood-stained wall
        .vline(15, 14, 20, Blood)
        // Hedges
        .hline(3, 12, 28, Foliage)
        .hline(6, 18, 32, Foliage)
        .fill(19, 2, 20, 3, Foliage)
        // Mansion shell with the front door facing west
        .outline(24, 12, 38, 38, MansionExterior)
        .open(24, 22)
        // Interior partitions
        .hline(25, 37, 18, MansionInterior)
        .clear(30, 18, 31, 18)
        .hline(25, 37, 30, MansionInterior)
        .clear(27, 30, 28, 30)
        // Stairs up at (30, 24)
        .mark(31, 24, Stairs)
        .finish()
}

/// Upper floors share the mansion footprint; everything outside it is solid
fn upper_floor_shell() -> Grid {
    use WallKind::*;

    let n = MANSION_SIZE - 1;
    let mut grid = Grid::new(MANSION_SIZE, MANSION_SIZE, Pose { x: 30.5, y: 24.5, angle: 0.0 });
    grid.fill(0, 0, n, n, MansionExterior).clear(25, 13, 37, 37);
    grid
}

fn mansion_second_floor() -> TileMap {
    use WallKind::*;

    upper_floor_shell()
        .hline(25, 37, 20, MansionInterior)
        .clear(33, 20, 34, 20)
        .hline(25, 37, 30, MansionInterior)
        .open(26, 30)
        // Stairs down at (29, 24), up at (34, 16)
        .mark(28, 24, Stairs)
        .mark(35, 16, Stairs)
        .finish()
}

fn mansion_top_floor() -> TileMap {
    use WallKind::*;

    upper_floor_shell()
        .hline(25, 37, 22, MansionInterior)
        .clear(34, 22, 35, 22)
        // Princess chamber along the south wall
        .hline(25, 37, 33, MansionInterior)
        .open(30, 33)
        // Stairs down at (33, 16)
        .mark(32, 16, Stairs)
        .finish()
}
