//! Per-frame simulation update
//!
//! `tick` advances the game by `dt` frame units. Steps run in a fixed order:
//! look/turn, move, cooldowns, shooting, stairs, pickups, rescue, zone,
//! enemies. A terminal phase change ends the tick on the spot.

use glam::Vec2;

use super::collision::{move_point, move_with_collision};
use super::combat::{direction_to, fire};
use super::events::SimEvent;
use super::state::{GameState, SessionPhase};
use crate::consts::*;
use crate::map::{in_mansion, stair_destination};
use crate::normalize_angle;

/// Intent flags for a single tick
///
/// The host translates keys, pointer and touch into these; the simulation
/// never sees raw device events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub shoot: bool,
    /// Pointer/touch yaw since the last tick, in pointer units
    pub yaw_delta: f32,
}

/// Advance the game state by `dt` frames
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != SessionPhase::Running {
        return;
    }

    state.time_ticks += 1;

    steer_player(state, input, dt);

    state.player.shoot_cooldown = (state.player.shoot_cooldown - dt).max(0.0);
    state.stairs_cooldown = (state.stairs_cooldown - dt).max(0.0);

    if input.shoot {
        fire(state);
    }
    if state.wins_by_clearing() && state.all_enemies_dead() {
        finish(state, SessionPhase::GameWon);
        return;
    }

    take_stairs(state);
    update_pickups(state, dt);

    if try_rescue(state) {
        finish(state, SessionPhase::GameWon);
        return;
    }

    track_zone(state);

    if update_enemies(state, dt) {
        finish(state, SessionPhase::GameOver);
    }
}

/// Enter a terminal phase
fn finish(state: &mut GameState, phase: SessionPhase) {
    state.phase = phase;
    match phase {
        SessionPhase::GameWon => {
            state.events.push(SimEvent::GameWon);
            log::info!("Game won after {} ticks, {} kills", state.time_ticks, state.kill_count);
        }
        SessionPhase::GameOver => {
            state.events.push(SimEvent::GameOver);
            log::info!("Game over after {} ticks, {} kills", state.time_ticks, state.kill_count);
        }
        _ => {}
    }
}

/// Turning and translation with per-axis wall collision
fn steer_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;

    player.angle += input.yaw_delta * state.look_sensitivity;
    if input.turn_left {
        player.angle -= PLAYER_TURN_SPEED * dt;
    }
    if input.turn_right {
        player.angle += PLAYER_TURN_SPEED * dt;
    }
    player.angle = normalize_angle(player.angle);

    let forward = player.forward();
    let right = forward.perp();
    let step = PLAYER_SPEED * dt;

    let mut movement = Vec2::ZERO;
    if input.forward {
        movement += forward * step;
    }
    if input.backward {
        movement -= forward * step;
    }
    if input.strafe_right {
        movement += right * step;
    }
    if input.strafe_left {
        movement -= right * step;
    }

    player.pos = move_with_collision(&state.map, player.pos, movement, PLAYER_RADIUS);

    if movement.x.abs() > 0.001 || movement.y.abs() > 0.001 {
        player.bob_phase += BOB_RATE * dt;
    }
}

/// Switch floors when standing on a stairs cell and the cooldown has expired
fn take_stairs(state: &mut GameState) {
    if state.stairs_cooldown > 0.0 {
        return;
    }

    let (pos, from) = (state.player.pos, state.player.floor);
    let Some(to) = stair_destination(state.stairs(), pos.x, pos.y, from) else {
        return;
    };

    state.enter_floor(to);
    state.stairs_cooldown = STAIRS_COOLDOWN;
    state.events.push(SimEvent::FloorChanged { from, to });
    log::info!("Stairs: floor {} -> {}", from, to);
}

/// Collect nearby ammo and count down respawns on every floor
fn update_pickups(state: &mut GameState, dt: f32) {
    let (pos, floor) = (state.player.pos, state.player.floor);

    for idx in 0..state.pickups.len() {
        let pickup = &mut state.pickups[idx];
        pickup.bob_phase += PICKUP_BOB_RATE * dt;

        if pickup.active {
            if pickup.floor == floor && pickup.pos.distance(pos) < PICKUP_RADIUS {
                pickup.active = false;
                pickup.respawn_timer = PICKUP_RESPAWN_FRAMES;
                let amount = pickup.amount;
                state.player.grant_ammo(amount);
                state.events.push(SimEvent::Pickup { amount });
                log::debug!("Picked up {} ammo (now {})", amount, state.player.ammo);
            }
            continue;
        }

        pickup.respawn_timer -= dt;
        if pickup.respawn_timer <= 0.0 {
            let amount = state.roll_pickup_amount();
            let pickup = &mut state.pickups[idx];
            pickup.respawn_timer = 0.0;
            pickup.amount = amount;
            pickup.active = true;
        }
    }
}

/// Rescue the princess once the final boss is down; true if rescued this tick
fn try_rescue(state: &mut GameState) -> bool {
    if !state.boss_defeated {
        return false;
    }
    let (pos, floor) = (state.player.pos, state.player.floor);
    let Some(princess) = state.princess.as_mut() else {
        return false;
    };
    if princess.rescued || princess.floor != floor || princess.pos.distance(pos) >= RESCUE_RADIUS {
        return false;
    }

    princess.rescued = true;
    state.events.push(SimEvent::Rescue);
    true
}

/// Signal crossings of the mansion boundary
fn track_zone(state: &mut GameState) {
    if !state.level().tracks_zone {
        return;
    }
    let p = &state.player;
    let inside = in_mansion(p.pos.x, p.pos.y, p.floor);
    if inside != state.in_mansion {
        state.in_mansion = inside;
        state.events.push(if inside {
            SimEvent::ZoneEntered
        } else {
            SimEvent::ZoneLeft
        });
    }
}

/// Chase and attack; returns true if the player died
fn update_enemies(state: &mut GameState, dt: f32) -> bool {
    let floor = state.player.floor;
    let map = &state.map;
    let player = &mut state.player;

    for enemy in state.enemies.iter_mut().filter(|e| e.floor == floor) {
        if !enemy.alive {
            enemy.death_timer += dt;
            continue;
        }

        if enemy.hit_flash > 0.0 {
            enemy.hit_flash = (enemy.hit_flash - dt).max(0.0);
        }

        let dist = enemy.pos.distance(player.pos);
        if dist >= ENEMY_AGGRO_RADIUS {
            continue;
        }

        let step = direction_to(enemy.pos, player.pos) * enemy.speed * dt;
        enemy.pos = move_point(map, enemy.pos, step);

        if dist < ENEMY_ATTACK_RANGE {
            enemy.attack_timer += dt;
            if enemy.attack_timer >= enemy.attack_cooldown {
                enemy.attack_timer = 0.0;
                player.health -= enemy.damage;
                state.events.push(SimEvent::PlayerHurt {
                    damage: enemy.damage,
                });
                if player.health <= 0 {
                    player.health = 0;
                    return true;
                }
            }
        }
    }

    false
}
