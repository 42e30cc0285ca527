//! Frame composition
//!
//! Produces the per-frame render output: the column depth buffer, the player
//! HUD values and the sorted sprite list. Drawing pixels is the presenter's job;
//! `FrameView::to_ascii` is a coarse text presenter for the headless host.

pub mod raycast;
pub mod shade;
pub mod sprites;

use glam::Vec2;
use serde::Serialize;

pub use raycast::{RayHit, WallSide, cast_ray, cast_rays};
pub use shade::{column_extent, wall_color};
pub use sprites::{SpriteKind, SpriteView, project_sprites};

use crate::consts::FOV;
use crate::settings::Settings;
use crate::sim::objective::{Objective, objective_target};
use crate::sim::state::{GameState, SessionPhase};

/// Projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewConfig {
    /// Rays per frame, one per screen column
    pub columns: usize,
    pub fov: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: 120,
            fov: FOV,
        }
    }
}

impl ViewConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            columns: settings.columns,
            fov: settings.fov,
        }
    }
}

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub phase: SessionPhase,
    pub rays: Vec<RayHit>,
    pub sprites: Vec<SpriteView>,
    pub player_pos: Vec2,
    pub player_angle: f32,
    pub bob_phase: f32,
    pub health: i32,
    pub ammo: i32,
    pub floor: u8,
    pub kill_count: u32,
    pub in_mansion: bool,
    pub objective: Option<Objective>,
}

/// Snapshot the state into a frame; never mutates it
pub fn compose_frame(state: &GameState, config: &ViewConfig) -> FrameView {
    let p = &state.player;
    let rays = cast_rays(&state.map, p.pos.x, p.pos.y, p.angle, config.columns, config.fov);
    let sprites = project_sprites(state, &rays, config.fov);

    FrameView {
        phase: state.phase,
        sprites,
        rays,
        player_pos: p.pos,
        player_angle: p.angle,
        bob_phase: p.bob_phase,
        health: p.health,
        ammo: p.ammo,
        floor: p.floor,
        kill_count: state.kill_count,
        in_mansion: state.in_mansion,
        objective: objective_target(state),
    }
}

impl FrameView {
    /// Text rendering, one character per column
    ///
    /// Walls use a glyph per brightness band, sprites are drawn over walls
    /// they are in front of.
    pub fn to_ascii(&self, rows: usize) -> String {
        const SHADES: [char; 4] = ['@', '#', '+', '.'];

        let cols = self.rays.len();
        let mut grid = vec![vec![' '; cols]; rows];

        for (x, hit) in self.rays.iter().enumerate() {
            let (top, bottom) = column_extent(hit.distance, rows);
            let band = ((hit.distance / 5.0) as usize).min(SHADES.len() - 1);
            let glyph = if hit.wall_type == crate::map::WallKind::Stairs.code() {
                '='
            } else {
                SHADES[band]
            };
            for row in grid.iter_mut().take(bottom).skip(top) {
                row[x] = glyph;
            }
        }

        for sprite in &self.sprites {
            let x = sprite.screen_x.floor();
            if x < 0.0 || x as usize >= cols {
                continue;
            }
            let x = x as usize;
            if self.rays[x].distance < sprite.distance {
                continue;
            }
            let glyph = match sprite.kind {
                SpriteKind::Enemy { alive: false, .. } => '_',
                SpriteKind::Enemy { kind, .. } if kind.is_boss() => 'B',
                SpriteKind::Enemy { .. } => 'E',
                SpriteKind::Ammo { .. } => 'a',
                SpriteKind::Princess { .. } => 'P',
            };
            let half = rows as f32 * sprite.scale / 2.0;
            let mid = rows as f32 / 2.0;
            let top = (mid - half).max(0.0) as usize;
            let bottom = ((mid + half).min(rows as f32) as usize).max(top + 1).min(rows);
            for row in grid.iter_mut().take(bottom).skip(top) {
                row[x] = glyph;
            }
        }

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
