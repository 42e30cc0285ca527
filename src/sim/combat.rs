//! Hit-scan shooting

use glam::Vec2;

use super::collision::line_of_sight;
use super::events::SimEvent;
use super::state::{Enemy, GameState, Player};
use crate::consts::*;
use crate::map::TileMap;

/// What a trigger pull did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Cooldown running or out of ammo; nothing consumed
    Refused,
    /// Fired and hit nothing
    Miss,
    /// Fired and hit the enemy with this id
    Hit { id: u32, killed: bool },
}

/// Index of the enemy a shot from `player` would hit, if any
///
/// Candidates are living enemies on the player's floor, in front of the
/// player and within range, whose perpendicular offset from the aim line is
/// under an acceptance radius that widens slightly with distance. The nearest
/// candidate along the aim line with a clear line of sight wins.
pub fn find_target(map: &TileMap, player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let dir = player.forward();
    let mut best: Option<(usize, f32)> = None;

    for (idx, enemy) in enemies.iter().enumerate() {
        if !enemy.alive || enemy.floor != player.floor {
            continue;
        }

        let to_enemy = enemy.pos - player.pos;
        let dist = to_enemy.length();
        if dist > SHOOT_RANGE {
            continue;
        }

        // Projection onto the aim line; behind the player never counts
        let along = to_enemy.dot(dir);
        if along <= 0.0 {
            continue;
        }

        let offset = to_enemy.perp_dot(dir).abs();
        if offset >= hit_radius(dist) {
            continue;
        }

        if best.is_some_and(|(_, nearest)| along >= nearest) {
            continue;
        }

        let steps = (along * SHOOT_LOS_SAMPLES).floor() as u32;
        if !line_of_sight(map, player.pos, enemy.pos, steps) {
            continue;
        }

        best = Some((idx, along));
    }

    best.map(|(idx, _)| idx)
}

/// Acceptance radius around the aim line at a given distance
#[inline]
pub fn hit_radius(dist: f32) -> f32 {
    SHOOT_HIT_RADIUS + SHOOT_SPREAD * (dist / SHOOT_RANGE)
}

/// Pull the trigger
pub fn fire(state: &mut GameState) -> ShotOutcome {
    if state.player.shoot_cooldown > 0.0 || state.player.ammo <= 0 {
        return ShotOutcome::Refused;
    }

    state.player.ammo -= 1;
    state.player.shoot_cooldown = SHOOT_COOLDOWN;
    state.events.push(SimEvent::Shoot);

    let Some(idx) = find_target(&state.map, &state.player, &state.enemies) else {
        return ShotOutcome::Miss;
    };

    let enemy = &mut state.enemies[idx];
    enemy.health -= SHOOT_DAMAGE;
    enemy.hit_flash = HIT_FLASH_FRAMES;
    let (id, kind) = (enemy.id, enemy.kind);
    state.events.push(SimEvent::Hit { kind });

    if enemy.health > 0 {
        return ShotOutcome::Hit { id, killed: false };
    }

    enemy.alive = false;
    enemy.death_timer = 0.0;
    state.kill_count += 1;
    state.events.push(SimEvent::Death { kind });
    log::debug!("{:?} #{} killed ({} kills)", kind, id, state.kill_count);

    if kind.is_final_boss() {
        state.boss_defeated = true;
        state.events.push(SimEvent::BossDefeated);
        log::info!("Final boss down, rescue objective open");
    }

    ShotOutcome::Hit { id, killed: true }
}

/// Unit vector from `from` toward `to`, zero when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Pose, TileMap};
    use crate::sim::level::Level;
    use crate::sim::state::EnemyKind;

    fn arena(_floor: u8) -> TileMap {
        TileMap::from_rows(
            &[
                "111111111111", //
                "100000000001",
                "100000000001",
                "100000100001",
                "100000000001",
                "111111111111",
            ],
            Pose { x: 1.5, y: 1.5, angle: 0.0 },
        )
    }

    fn empty_state() -> GameState {
        let level = Level {
            floors: arena,
            enemies: Vec::new(),
            pickups: Vec::new(),
            stairs: Vec::new(),
            princess: None,
            entrance: None,
            tracks_zone: false,
            start_floor: 1,
        };
        let mut state = GameState::new(level, 1);
        state.reset();
        state
    }

    #[test]
    fn test_adjacent_imp_scenario() {
        let mut state = empty_state();
        let id = state.spawn_enemy(EnemyKind::Imp, Vec2::new(3.0, 1.5), 1);
        let ammo = state.player.ammo;

        let outcome = fire(&mut state);
        assert_eq!(outcome, ShotOutcome::Hit { id, killed: false });
        assert_eq!(state.player.ammo, ammo - 1);
        let imp = state.enemy(id).unwrap();
        assert_eq!(imp.health, 40 - SHOOT_DAMAGE);
        assert!(imp.alive);
        assert_eq!(state.kill_count, 0);
    }

    #[test]
    fn test_shots_to_kill_matches_ceiling() {
        for kind in EnemyKind::ALL {
            let mut state = empty_state();
            let id = state.spawn_enemy(kind, Vec2::new(4.5, 1.5), 1);
            state.player.ammo = MAX_AMMO;
            let needed = (kind.stats().health + SHOOT_DAMAGE - 1) / SHOOT_DAMAGE;

            for _ in 0..needed - 1 {
                state.player.shoot_cooldown = 0.0;
                assert!(matches!(fire(&mut state), ShotOutcome::Hit { killed: false, .. }));
            }
            let enemy = state.enemy(id).unwrap();
            assert!(enemy.alive && enemy.health > 0, "{:?}", kind);

            state.player.shoot_cooldown = 0.0;
            assert_eq!(fire(&mut state), ShotOutcome::Hit { id, killed: true });
            assert!(!state.enemy(id).unwrap().alive);
            assert_eq!(state.kill_count, 1);
            assert_eq!(state.boss_defeated, kind.is_final_boss());
        }
    }

    #[test]
    fn test_only_nearest_enemy_is_hit() {
        let mut state = empty_state();
        let near = state.spawn_enemy(EnemyKind::Baron, Vec2::new(4.5, 1.5), 1);
        let far = state.spawn_enemy(EnemyKind::Baron, Vec2::new(8.5, 1.6), 1);
        assert_eq!(fire(&mut state), ShotOutcome::Hit { id: near, killed: false });
        assert_eq!(state.enemy(far).unwrap().health, 150);
    }

    #[test]
    fn test_wall_blocks_shot() {
        let mut state = empty_state();
        state.player.pos = Vec2::new(2.5, 3.5);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(9.5, 3.5), 1);
        assert_eq!(fire(&mut state), ShotOutcome::Miss);
        // Ammo is still spent on a miss
        assert_eq!(state.player.ammo, START_AMMO - 1);
    }

    #[test]
    fn test_ignores_behind_off_axis_and_other_floors() {
        let mut state = empty_state();
        state.player.pos = Vec2::new(5.5, 2.5);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(3.5, 2.5), 1);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(8.5, 4.4), 1);
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(8.5, 2.5), 2);
        assert_eq!(fire(&mut state), ShotOutcome::Miss);
    }

    #[test]
    fn test_refused_without_ammo_or_during_cooldown() {
        let mut state = empty_state();
        state.spawn_enemy(EnemyKind::Imp, Vec2::new(3.0, 1.5), 1);
        state.player.ammo = 0;
        assert_eq!(fire(&mut state), ShotOutcome::Refused);
        assert_eq!(state.player.ammo, 0);
        assert!(state.events.is_empty());

        state.player.ammo = 5;
        state.player.shoot_cooldown = 2.0;
        assert_eq!(fire(&mut state), ShotOutcome::Refused);
        assert_eq!(state.player.ammo, 5);
    }

    #[test]
    fn test_hit_radius_grows_with_distance() {
        assert!(hit_radius(SHOOT_RANGE) > hit_radius(1.0));
        assert!((hit_radius(0.0) - SHOOT_HIT_RADIUS).abs() < 1e-6);
    }
}
