//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity. Renderers read it
//! between ticks and never mutate it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::EventQueue;
use super::level::Level;
use crate::consts::*;
use crate::map::{FloorCache, StairLink, TileMap, in_mansion};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created but never started
    NotStarted,
    /// Active gameplay
    Running,
    /// Player died
    GameOver,
    /// Run won (all enemies dead, or princess rescued)
    GameWon,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::GameOver | SessionPhase::GameWon)
    }
}

/// Enemy types, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Imp,
    Demon,
    Baron,
    /// Mini-boss
    Brute,
    /// Named boss guarding the princess
    Overlord,
}

/// Per-kind tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    /// Map units per frame
    pub speed: f32,
    pub damage: i32,
    /// Frames between attacks while in range
    pub attack_cooldown: f32,
    /// Sprite height relative to a wall of the same distance
    pub sprite_scale: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Imp,
        EnemyKind::Demon,
        EnemyKind::Baron,
        EnemyKind::Brute,
        EnemyKind::Overlord,
    ];

    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Imp => EnemyStats {
                health: 40,
                speed: 0.025,
                damage: 8,
                attack_cooldown: 40.0,
                sprite_scale: 1.0,
            },
            EnemyKind::Demon => EnemyStats {
                health: 80,
                speed: 0.03,
                damage: 15,
                attack_cooldown: 40.0,
                sprite_scale: 1.0,
            },
            EnemyKind::Baron => EnemyStats {
                health: 150,
                speed: 0.02,
                damage: 20,
                attack_cooldown: 60.0,
                sprite_scale: 1.0,
            },
            EnemyKind::Brute => EnemyStats {
                health: 300,
                speed: 0.022,
                damage: 25,
                attack_cooldown: 50.0,
                sprite_scale: 2.5,
            },
            EnemyKind::Overlord => EnemyStats {
                health: 600,
                speed: 0.018,
                damage: 30,
                attack_cooldown: 45.0,
                sprite_scale: 3.0,
            },
        }
    }

    /// Killing this enemy opens the rescue objective
    pub fn is_final_boss(self) -> bool {
        self == EnemyKind::Overlord
    }

    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::Brute | EnemyKind::Overlord)
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians, normalized to (-π, π])
    pub angle: f32,
    /// 0..=MAX_HEALTH
    pub health: i32,
    /// 0..=MAX_AMMO
    pub ammo: i32,
    /// Frames until the next shot is allowed
    pub shoot_cooldown: f32,
    /// Walk cycle phase (presentation only)
    pub bob_phase: f32,
    pub floor: u8,
}

impl Player {
    pub fn spawn(map: &TileMap, floor: u8) -> Self {
        Self {
            pos: Vec2::new(map.spawn.x, map.spawn.y),
            angle: crate::normalize_angle(map.spawn.angle),
            health: MAX_HEALTH,
            ammo: START_AMMO,
            shoot_cooldown: 0.0,
            bob_phase: 0.0,
            floor,
        }
    }

    /// Unit vector the player is facing
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Add ammo up to the cap
    pub fn grant_ammo(&mut self, amount: i32) {
        self.ammo = (self.ammo + amount.max(0)).clamp(0, MAX_AMMO);
    }
}

/// An enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub kind: EnemyKind,
    pub speed: f32,
    pub damage: i32,
    pub attack_cooldown: f32,
    /// Frames spent in attack range since the last attack
    pub attack_timer: f32,
    /// Frames of hit flash remaining
    pub hit_flash: f32,
    /// Frames since death
    pub death_timer: f32,
    pub floor: u8,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, floor: u8) -> Self {
        let stats = kind.stats();
        Self {
            id,
            pos,
            health: stats.health,
            max_health: stats.health,
            alive: true,
            kind,
            speed: stats.speed,
            damage: stats.damage,
            attack_cooldown: stats.attack_cooldown,
            attack_timer: 0.0,
            hit_flash: 0.0,
            death_timer: 0.0,
            floor,
        }
    }

    /// 0 while alive, rising to 1 as the death animation completes
    pub fn death_progress(&self) -> f32 {
        if self.alive {
            0.0
        } else {
            (self.death_timer / DEATH_ANIM_FRAMES).min(1.0)
        }
    }
}

/// A respawning ammo box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPickup {
    pub id: u32,
    pub pos: Vec2,
    /// Ammo granted on pickup
    pub amount: i32,
    pub active: bool,
    /// Frames until reactivation (inactive only)
    pub respawn_timer: f32,
    pub bob_phase: f32,
    pub floor: u8,
}

/// Rescue objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Princess {
    pub pos: Vec2,
    pub rescued: bool,
    pub floor: u8,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for pickup rolls
    pub seed: u64,
    pub phase: SessionPhase,
    pub player: Player,
    /// Sorted by id; dead enemies stay until reset
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<AmmoPickup>,
    pub princess: Option<Princess>,
    pub kill_count: u32,
    /// Final boss is dead; the princess can be rescued
    pub boss_defeated: bool,
    /// Frames until stairs can trigger again
    pub stairs_cooldown: f32,
    /// Player was inside the mansion at the end of the last tick
    pub in_mansion: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Radians of yaw per pointer unit
    pub look_sensitivity: f32,
    /// Active floor grid (swapped wholesale on floor change)
    #[serde(skip)]
    pub map: TileMap,
    #[serde(skip)]
    level: Level,
    #[serde(skip)]
    floors: FloorCache,
    #[serde(skip)]
    rng: Pcg32,
    /// Events awaiting the host
    #[serde(skip)]
    pub events: EventQueue,
    next_id: u32,
}

impl GameState {
    /// Create a state with entities at their level-start spawns, not yet running
    pub fn new(level: Level, seed: u64) -> Self {
        let mut floors = FloorCache::new(level.floors);
        let map = floors.floor(level.start_floor).clone();
        let player = Player::spawn(&map, level.start_floor);
        let mut state = Self {
            seed,
            phase: SessionPhase::NotStarted,
            player,
            enemies: Vec::new(),
            pickups: Vec::new(),
            princess: None,
            kill_count: 0,
            boss_defeated: false,
            stairs_cooldown: 0.0,
            in_mansion: false,
            time_ticks: 0,
            look_sensitivity: LOOK_SENSITIVITY,
            map,
            level,
            floors,
            rng: Pcg32::seed_from_u64(seed),
            events: EventQueue::default(),
            next_id: 1,
        };
        state.populate();
        state
    }

    /// Put every entity back at its level-start spawn and enter `Running`
    pub fn reset(&mut self) {
        self.populate();
        self.phase = SessionPhase::Running;
    }

    fn populate(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.floors.clear();
        self.map = self.floors.floor(self.level.start_floor).clone();
        self.player = Player::spawn(&self.map, self.level.start_floor);

        let enemy_spawns = self.level.enemies.clone();
        self.enemies = enemy_spawns
            .iter()
            .map(|s| {
                let id = self.next_entity_id();
                Enemy::new(id, s.kind, cell_centre(s.x, s.y), s.floor)
            })
            .collect();

        let pickup_spawns = self.level.pickups.clone();
        self.pickups = pickup_spawns
            .iter()
            .map(|s| {
                let id = self.next_entity_id();
                let amount = self.roll_pickup_amount();
                AmmoPickup {
                    id,
                    pos: cell_centre(s.x, s.y),
                    amount,
                    active: true,
                    respawn_timer: 0.0,
                    bob_phase: 0.0,
                    floor: s.floor,
                }
            })
            .collect();

        self.princess = self.level.princess.map(|p| Princess {
            pos: p.pos,
            rescued: false,
            floor: p.floor,
        });

        self.kill_count = 0;
        self.boss_defeated = false;
        self.stairs_cooldown = 0.0;
        self.time_ticks = 0;
        self.in_mansion = self.level.tracks_zone
            && in_mansion(self.player.pos.x, self.player.pos.y, self.player.floor);
        self.events.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Draw a fresh pickup grant
    pub fn roll_pickup_amount(&mut self) -> i32 {
        self.rng.random_range(PICKUP_MIN_GRANT..=PICKUP_MAX_GRANT)
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn stairs(&self) -> &[StairLink] {
        &self.level.stairs
    }

    /// Swap the active grid to another floor and move the player onto it
    pub fn enter_floor(&mut self, floor: u8) {
        self.map = self.floors.floor(floor).clone();
        self.player.floor = floor;
    }

    /// Living enemies on the player's floor
    pub fn living_on_player_floor(&self) -> impl Iterator<Item = &Enemy> {
        let floor = self.player.floor;
        self.enemies.iter().filter(move |e| e.alive && e.floor == floor)
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.alive)
    }

    /// Kill-everything win rule applies (no rescue objective)
    pub fn wins_by_clearing(&self) -> bool {
        self.princess.is_none()
    }

    /// Add an enemy outside the level table (scripted encounters, tests)
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, floor: u8) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, floor));
        id
    }

    /// Add a pickup outside the level table
    pub fn spawn_pickup(&mut self, pos: Vec2, amount: i32, floor: u8) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(AmmoPickup {
            id,
            pos,
            amount,
            active: true,
            respawn_timer: 0.0,
            bob_phase: 0.0,
            floor,
        });
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
}

#[inline]
fn cell_centre(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_not_started_with_spawns() {
        let state = GameState::new(Level::classic(), 7);
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.enemies.len(), 15);
        assert!(state.enemies.iter().all(|e| e.alive && e.health == e.max_health));
        assert_eq!(state.player.health, MAX_HEALTH);
        assert_eq!(state.player.ammo, START_AMMO);
        assert!(state.princess.is_none());
        assert!(state.wins_by_clearing());
    }

    #[test]
    fn test_reset_restores_spawns() {
        let mut state = GameState::new(Level::mansion(), 7);
        state.reset();
        let first_amounts: Vec<i32> = state.pickups.iter().map(|p| p.amount).collect();
        state.enemies[0].alive = false;
        state.player.health = 3;
        state.kill_count = 4;
        state.enter_floor(3);
        state.reset();
        assert!(state.enemies.iter().all(|e| e.alive));
        assert_eq!(state.player.health, MAX_HEALTH);
        assert_eq!(state.player.floor, 1);
        assert_eq!(state.kill_count, 0);
        assert_eq!(state.phase, SessionPhase::Running);
        let again: Vec<i32> = state.pickups.iter().map(|p| p.amount).collect();
        assert_eq!(first_amounts, again);
    }

    #[test]
    fn test_enemy_ids_are_stable_and_sorted() {
        let state = GameState::new(Level::mansion(), 1);
        assert!(state.enemies.windows(2).all(|w| w[0].id < w[1].id));
        let id = state.enemies[3].id;
        assert_eq!(state.enemy(id).map(|e| e.id), Some(id));
    }

    #[test]
    fn test_pickup_amounts_in_range() {
        let state = GameState::new(Level::mansion(), 42);
        assert!(state
            .pickups
            .iter()
            .all(|p| (PICKUP_MIN_GRANT..=PICKUP_MAX_GRANT).contains(&p.amount)));
    }

    #[test]
    fn test_grant_ammo_caps() {
        let mut state = GameState::new(Level::classic(), 1);
        state.player.ammo = MAX_AMMO - 2;
        state.player.grant_ammo(10);
        assert_eq!(state.player.ammo, MAX_AMMO);
    }

    #[test]
    fn test_enemy_table_ordering() {
        for pair in EnemyKind::ALL.windows(2) {
            assert!(pair[0].stats().health < pair[1].stats().health);
        }
        assert!(EnemyKind::Overlord.is_final_boss());
        assert!(!EnemyKind::Brute.is_final_boss());
    }
}
