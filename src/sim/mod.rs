//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-unit timestep supplied by the host
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod events;
pub mod level;
pub mod objective;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{line_of_sight, move_point, move_with_collision};
pub use combat::{ShotOutcome, find_target, fire};
pub use events::{EventQueue, SimEvent};
pub use level::Level;
pub use objective::{Objective, ObjectiveKind, objective_target};
pub use session::{FrameClock, Session};
pub use state::{AmmoPickup, Enemy, EnemyKind, GameState, Player, Princess, SessionPhase};
pub use tick::{TickInput, tick};
