//! Billboard sprite projection
//!
//! Entities on the player's floor are mapped to a screen column by their
//! angle relative to the view direction and sorted far to near. Pickups and
//! the princess are culled against the wall depth buffer at their centre
//! column; enemies are not, since they span many columns and a single-column
//! test makes their silhouettes flicker.

use glam::Vec2;
use serde::Serialize;

use super::raycast::RayHit;
use crate::consts::{SPRITE_FOV_MARGIN, SPRITE_MIN_DISTANCE};
use crate::normalize_angle;
use crate::sim::state::{EnemyKind, GameState, Player};

/// Ammo box height relative to a wall at the same distance
const AMMO_SPRITE_SCALE: f32 = 0.4;
const PRINCESS_SPRITE_SCALE: f32 = 1.2;

/// What a sprite depicts, with the state a presenter needs to draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Enemy {
        id: u32,
        kind: EnemyKind,
        alive: bool,
        health: i32,
        max_health: i32,
        /// Frames of hit flash remaining
        hit_flash: f32,
        /// 0..=1 through the death animation
        death_progress: f32,
    },
    Ammo {
        id: u32,
        amount: i32,
        bob_phase: f32,
    },
    Princess {
        /// Final boss is down; touching her wins
        rescuable: bool,
    },
}

/// A projected sprite, ready to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub distance: f32,
    /// Angle from the view direction, in (-π, π]
    pub rel_angle: f32,
    /// Horizontal centre in columns; may fall slightly outside the screen
    pub screen_x: f32,
    /// Height as a fraction of the screen height
    pub scale: f32,
}

/// Relative angle, distance and screen column of `pos`, if it is in view
fn project(player: &Player, pos: Vec2, columns: usize, fov: f32) -> Option<(f32, f32, f32)> {
    let to = pos - player.pos;
    let distance = to.length();
    let rel_angle = normalize_angle(to.y.atan2(to.x) - player.angle);
    let half_fov = fov / 2.0;

    if rel_angle.abs() >= half_fov + SPRITE_FOV_MARGIN || distance <= SPRITE_MIN_DISTANCE {
        return None;
    }

    let half_width = columns as f32 / 2.0;
    let screen_x = half_width + (rel_angle / half_fov) * half_width;
    Some((distance, rel_angle, screen_x))
}

/// True if the wall at the sprite's centre column is nearer than the sprite
pub fn behind_wall(rays: &[RayHit], screen_x: f32, distance: f32) -> bool {
    let column = screen_x.floor();
    if column < 0.0 {
        return false;
    }
    rays.get(column as usize).is_some_and(|hit| hit.distance < distance)
}

/// Project every visible entity on the player's floor, farthest first
pub fn project_sprites(state: &GameState, rays: &[RayHit], fov: f32) -> Vec<SpriteView> {
    let player = &state.player;
    let columns = rays.len();
    let mut sprites = Vec::new();

    for enemy in state.enemies.iter().filter(|e| e.floor == player.floor) {
        let Some((distance, rel_angle, screen_x)) = project(player, enemy.pos, columns, fov) else {
            continue;
        };
        sprites.push(SpriteView {
            kind: SpriteKind::Enemy {
                id: enemy.id,
                kind: enemy.kind,
                alive: enemy.alive,
                health: enemy.health.max(0),
                max_health: enemy.max_health,
                hit_flash: enemy.hit_flash,
                death_progress: enemy.death_progress(),
            },
            pos: enemy.pos,
            distance,
            rel_angle,
            screen_x,
            scale: enemy.kind.stats().sprite_scale / distance,
        });
    }

    for pickup in state.pickups.iter().filter(|p| p.active && p.floor == player.floor) {
        let Some((distance, rel_angle, screen_x)) = project(player, pickup.pos, columns, fov) else {
            continue;
        };
        if behind_wall(rays, screen_x, distance) {
            continue;
        }
        sprites.push(SpriteView {
            kind: SpriteKind::Ammo {
                id: pickup.id,
                amount: pickup.amount,
                bob_phase: pickup.bob_phase,
            },
            pos: pickup.pos,
            distance,
            rel_angle,
            screen_x,
            scale: AMMO_SPRITE_SCALE / distance,
        });
    }

    if let Some(princess) = state
        .princess
        .as_ref()
        .filter(|p| !p.rescued && p.floor == player.floor)
        && let Some((distance, rel_angle, screen_x)) = project(player, princess.pos, columns, fov)
        && !behind_wall(rays, screen_x, distance)
    {
        sprites.push(SpriteView {
            kind: SpriteKind::Princess {
                rescuable: state.boss_defeated,
            },
            pos: princess.pos,
            distance,
            rel_angle,
            screen_x,
            scale: PRINCESS_SPRITE_SCALE / distance,
        });
    }

    sprites.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    sprites
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Pose, TileMap};
    use crate::renderer::raycast::cast_rays;
    use crate::sim::level::{Level, PrincessSpawn};
    use std::f32::consts::PI;

    const FOV: f32 = PI / 3.0;
    const COLUMNS: usize = 64;

    fn hall(_floor: u8) -> TileMap {
        TileMap::from_rows(
            &[
                "111111111111111", //
                "100000000000001",
                "100000000000001",
                "100000010000001",
                "100000000000001",
                "111111111111111",
            ],
            Pose { x: 1.5, y: 3.5, angle: 0.0 },
        )
    }

    fn state_with(princess: Option<PrincessSpawn>) -> GameState {
        let level = Level {
            floors: hall,
            start_floor: 1,
            enemies: Vec::new(),
            pickups: Vec::new(),
            stairs: Vec::new(),
            princess,
            entrance: None,
            tracks_zone: false,
        };
        let mut state = GameState::new(level, 1);
        state.reset();
        state
    }

    fn project_all(state: &GameState) -> Vec<SpriteView> {
        let p = &state.player;
        let rays = cast_rays(&state.map, p.pos.x, p.pos.y, p.angle, COLUMNS, FOV);
        project_sprites(state, &rays, FOV)
    }

    #[test]
    fn test_centre_sprite_maps_to_middle_column() {
        let mut state = state_with(None);
        state.player.pos = Vec2::new(1.5, 1.5);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(5.5, 1.5), 1);
        let sprites = project_all(&state);
        assert_eq!(sprites.len(), 1);
        assert!((sprites[0].screen_x - COLUMNS as f32 / 2.0).abs() < 1e-3);
        assert!((sprites[0].scale - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_sorted_far_to_near() {
        let mut state = state_with(None);
        state.player.pos = Vec2::new(1.5, 1.5);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(3.5, 1.5), 1);
        state.spawn_enemy(EnemyKind::Demon, Vec2::new(9.5, 2.0), 1);
        state.spawn_enemy(EnemyKind::Baron, Vec2::new(6.5, 1.2), 1);
        let sprites = project_all(&state);
        assert_eq!(sprites.len(), 3);
        assert!(sprites.windows(2).all(|w| w[0].distance >= w[1].distance));
    }

    #[test]
    fn test_culls_outside_fov_too_close_and_other_floor() {
        let mut state = state_with(None);
        state.player.pos = Vec2::new(6.5, 2.5);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(3.5, 2.5), 1);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(6.6, 2.5), 1);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(9.5, 2.5), 2);
        assert!(project_all(&state).is_empty());
    }

    #[test]
    fn test_margin_keeps_edge_sprites() {
        let mut state = state_with(None);
        state.player.pos = Vec2::new(1.5, 1.5);
        // Just past the FOV edge but inside the margin
        let angle = FOV / 2.0 + SPRITE_FOV_MARGIN / 2.0;
        let pos = state.player.pos + Vec2::new(angle.cos(), angle.sin()) * 2.0;
        state.spawn_enemy(EnemyKind::Imp, pos, 1);
        let sprites = project_all(&state);
        assert_eq!(sprites.len(), 1);
        assert!(sprites[0].screen_x > COLUMNS as f32);
    }

    #[test]
    fn test_wall_hides_pickup_but_not_enemy() {
        let mut state = state_with(None);
        // Pillar at (7, 3) sits between the player and both entities
        state.player.pos = Vec2::new(4.5, 3.5);
        state.spawn_pickup(Vec2::new(10.5, 3.5), 10, 1);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(11.5, 3.5), 1);
        let sprites = project_all(&state);
        assert_eq!(sprites.len(), 1);
        assert!(matches!(sprites[0].kind, SpriteKind::Enemy { .. }));
    }

    #[test]
    fn test_inactive_pickup_and_rescued_princess_hidden() {
        let mut state = state_with(Some(PrincessSpawn {
            pos: Vec2::new(5.5, 1.5),
            floor: 1,
        }));
        state.player.pos = Vec2::new(1.5, 1.5);
        let id = state.spawn_pickup(Vec2::new(3.5, 1.5), 10, 1);
        let sprites = project_all(&state);
        assert_eq!(sprites.len(), 2);
        assert!(matches!(sprites[0].kind, SpriteKind::Princess { rescuable: false }));

        state.pickups.iter_mut().find(|p| p.id == id).unwrap().active = false;
        state.princess.as_mut().unwrap().rescued = true;
        assert!(project_all(&state).is_empty());
    }

    #[test]
    fn test_dead_enemy_projected_with_progress() {
        let mut state = state_with(None);
        state.player.pos = Vec2::new(1.5, 1.5);
        state.spawn_enemy(EnemyKind::Overlord, Vec2::new(4.5, 1.5), 1);
        state.enemies[0].alive = false;
        state.enemies[0].death_timer = 15.0;
        let sprites = project_all(&state);
        match sprites[0].kind {
            SpriteKind::Enemy { alive, death_progress, .. } => {
                assert!(!alive);
                assert!((death_progress - 0.5).abs() < 1e-6);
            }
            other => panic!("unexpected sprite {:?}", other),
        }
        assert!((sprites[0].scale - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_behind_wall_ignores_off_screen_columns() {
        let mut state = state_with(None);
        state.player.pos = Vec2::new(1.5, 1.5);
        let p = &state.player;
        let rays = cast_rays(&state.map, p.pos.x, p.pos.y, p.angle, COLUMNS, FOV);
        assert!(!behind_wall(&rays, -3.0, 100.0));
        assert!(!behind_wall(&rays, COLUMNS as f32 + 2.0, 100.0));
        assert!(behind_wall(&rays, 32.0, 100.0));
    }
}
