//! Static level tables: spawns, pickups, stairs and the rescue objective

use glam::Vec2;

use super::state::EnemyKind;
use crate::map::layouts::{classic_floor, mansion_floor};
use crate::map::{FloorBuilder, StairLink};
use crate::settings::Variant;

/// Enemy placed at the centre of a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub x: i32,
    pub y: i32,
    pub kind: EnemyKind,
    pub floor: u8,
}

/// Ammo pickup placed at the centre of a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawn {
    pub x: i32,
    pub y: i32,
    pub floor: u8,
}

/// Rescue objective location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincessSpawn {
    pub pos: Vec2,
    pub floor: u8,
}

/// Everything needed to (re)start a run
#[derive(Debug, Clone)]
pub struct Level {
    pub floors: FloorBuilder,
    pub start_floor: u8,
    pub enemies: Vec<EnemySpawn>,
    pub pickups: Vec<PickupSpawn>,
    pub stairs: Vec<StairLink>,
    /// Present only in the mansion variant; its absence selects the
    /// "kill everything" win rule
    pub princess: Option<PrincessSpawn>,
    /// Where the compass points while the player is still outdoors
    pub entrance: Option<Vec2>,
    /// Emit zone events when crossing the mansion boundary
    pub tracks_zone: bool,
}

const fn enemy(x: i32, y: i32, kind: EnemyKind, floor: u8) -> EnemySpawn {
    EnemySpawn { x, y, kind, floor }
}

const fn pickup(x: i32, y: i32, floor: u8) -> PickupSpawn {
    PickupSpawn { x, y, floor }
}

const fn stairs(x: i32, y: i32, from_floor: u8, to_floor: u8) -> StairLink {
    StairLink { x, y, from_floor, to_floor }
}

impl Level {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Mansion => Self::mansion(),
        }
    }

    /// One floor, fifteen enemies, win by clearing them all
    pub fn classic() -> Self {
        use EnemyKind::*;

        Self {
            floors: classic_floor,
            start_floor: 1,
            enemies: vec![
                enemy(5, 5, Imp, 1),
                enemy(7, 3, Imp, 1),
                enemy(12, 6, Demon, 1),
                enemy(14, 4, Imp, 1),
                enemy(10, 10, Demon, 1),
                enemy(11, 11, Imp, 1),
                enemy(17, 5, Imp, 1),
                enemy(20, 3, Demon, 1),
                enemy(5, 15, Baron, 1),
                enemy(10, 18, Demon, 1),
                enemy(16, 16, Imp, 1),
                enemy(20, 15, Baron, 1),
                enemy(3, 20, Imp, 1),
                enemy(20, 20, Demon, 1),
                enemy(12, 14, Imp, 1),
            ],
            pickups: Vec::new(),
            stairs: Vec::new(),
            princess: None,
            entrance: None,
            tracks_zone: false,
        }
    }

    /// Three floors; kill the overlord on the top floor, then rescue the princess
    pub fn mansion() -> Self {
        use EnemyKind::*;

        Self {
            floors: mansion_floor,
            start_floor: 1,
            enemies: vec![
                // Grounds
                enemy(6, 6, Imp, 1),
                enemy(12, 4, Imp, 1),
                enemy(18, 8, Demon, 1),
                enemy(8, 16, Imp, 1),
                enemy(19, 22, Demon, 1),
                enemy(10, 24, Imp, 1),
                enemy(5, 35, Baron, 1),
                enemy(16, 36, Imp, 1),
                enemy(21, 30, Demon, 1),
                // Ground floor rooms
                enemy(27, 15, Imp, 1),
                enemy(35, 20, Demon, 1),
                enemy(27, 26, Imp, 1),
                enemy(33, 34, Baron, 1),
                // Second floor
                enemy(27, 15, Demon, 2),
                enemy(36, 14, Imp, 2),
                enemy(30, 27, Imp, 2),
                enemy(35, 25, Baron, 2),
                enemy(27, 33, Demon, 2),
                enemy(34, 35, Imp, 2),
                // Top floor
                enemy(26, 14, Imp, 3),
                enemy(37, 18, Imp, 3),
                enemy(27, 26, Brute, 3),
                enemy(36, 27, Brute, 3),
                enemy(31, 31, Overlord, 3),
            ],
            pickups: vec![
                pickup(3, 3, 1),
                pickup(14, 11, 1),
                pickup(22, 36, 1),
                pickup(28, 21, 1),
                pickup(36, 33, 1),
                pickup(26, 22, 2),
                pickup(36, 36, 2),
                pickup(25, 20, 3),
                pickup(37, 24, 3),
            ],
            stairs: vec![
                stairs(30, 24, 1, 2),
                stairs(29, 24, 2, 1),
                stairs(34, 16, 2, 3),
                stairs(33, 16, 3, 2),
            ],
            princess: Some(PrincessSpawn {
                pos: Vec2::new(34.5, 35.5),
                floor: 3,
            }),
            entrance: Some(Vec2::new(24.5, 22.5)),
            tracks_zone: true,
        }
    }

    /// Highest floor index referenced by the level
    pub fn top_floor(&self) -> u8 {
        self.stairs
            .iter()
            .map(|s| s.to_floor.max(s.from_floor))
            .max()
            .unwrap_or(self.start_floor)
    }
}
