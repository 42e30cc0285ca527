//! Manor Caster - a first-person grid raycaster
//!
//! Core modules:
//! - `map`: Tile grids per floor, stairs table, mansion zone
//! - `sim`: Simulation (player, enemies, pickups, combat, session state)
//! - `renderer`: Ray buffer and sprite projection handed to a presenter
//! - `audio`: Outbound audio cues
//! - `settings`: Host configuration

pub mod audio;
pub mod map;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError, Variant};

/// Game configuration constants
///
/// Time-based values are in frame units: `dt = 1.0` is one nominal frame.
pub mod consts {
    use std::f32::consts::PI;

    /// Nominal frame rate the simulation is tuned for
    pub const FRAME_RATE: f32 = 60.0;
    /// Nominal frame interval in milliseconds
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
    /// Largest dt a single tick may take (after a stall)
    pub const MAX_FRAME_STEP: f32 = 3.0;

    /// Horizontal field of view (radians)
    pub const FOV: f32 = PI / 3.0;

    /// Player movement
    pub const PLAYER_SPEED: f32 = 0.06;
    pub const PLAYER_TURN_SPEED: f32 = 0.04;
    pub const PLAYER_RADIUS: f32 = 0.25;
    /// Radians of yaw per pointer unit
    pub const LOOK_SENSITIVITY: f32 = 0.003;
    /// Head bob advance per frame while walking
    pub const BOB_RATE: f32 = 0.15;

    /// Player vitals
    pub const MAX_HEALTH: i32 = 100;
    pub const START_AMMO: i32 = 50;
    pub const MAX_AMMO: i32 = 99;

    /// Weapon
    pub const SHOOT_COOLDOWN: f32 = 8.0;
    pub const SHOOT_DAMAGE: i32 = 35;
    pub const SHOOT_RANGE: f32 = 16.0;
    /// Base hit-scan acceptance radius (grows by `SHOOT_SPREAD` at max range)
    pub const SHOOT_HIT_RADIUS: f32 = 0.5;
    pub const SHOOT_SPREAD: f32 = 0.1;
    /// Line-of-sight samples per map unit of projected distance
    pub const SHOOT_LOS_SAMPLES: f32 = 4.0;
    pub const HIT_FLASH_FRAMES: f32 = 6.0;

    /// Enemy behaviour
    pub const ENEMY_AGGRO_RADIUS: f32 = 20.0;
    pub const ENEMY_ATTACK_RANGE: f32 = 1.5;
    /// Frames a death animation plays for
    pub const DEATH_ANIM_FRAMES: f32 = 30.0;

    /// Floor transitions
    pub const STAIRS_COOLDOWN: f32 = 60.0;

    /// Ammo pickups
    pub const PICKUP_RADIUS: f32 = 0.6;
    pub const PICKUP_RESPAWN_FRAMES: f32 = 600.0;
    pub const PICKUP_MIN_GRANT: i32 = 8;
    pub const PICKUP_MAX_GRANT: i32 = 16;
    pub const PICKUP_BOB_RATE: f32 = 0.05;

    /// Rescue objective
    pub const RESCUE_RADIUS: f32 = 1.0;

    /// Sprite culling
    pub const SPRITE_FOV_MARGIN: f32 = 0.2;
    pub const SPRITE_MIN_DISTANCE: f32 = 0.3;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
