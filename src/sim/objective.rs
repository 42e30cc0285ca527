//! Compass target for the mansion crawl

use glam::Vec2;
use serde::Serialize;

use super::state::GameState;

/// What the compass is pointing at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectiveKind {
    Entrance,
    StairsUp,
    Boss,
    Princess,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub pos: Vec2,
}

/// Current navigation goal, or `None` when there is nothing left to find
///
/// Outdoors the goal is the mansion entrance. Inside, each floor points at
/// its up stairs until the top floor, where the goal is the final boss and,
/// once it is dead, the princess.
pub fn objective_target(state: &GameState) -> Option<Objective> {
    let princess = state.princess.as_ref().filter(|p| !p.rescued)?;
    let level = state.level();
    let floor = state.player.floor;

    if floor == level.start_floor
        && !state.in_mansion
        && let Some(pos) = level.entrance
    {
        return Some(Objective {
            kind: ObjectiveKind::Entrance,
            pos,
        });
    }

    if floor < level.top_floor() {
        return state
            .stairs()
            .iter()
            .find(|l| l.from_floor == floor && l.to_floor > floor)
            .map(|l| Objective {
                kind: ObjectiveKind::StairsUp,
                pos: Vec2::new(l.x as f32 + 0.5, l.y as f32 + 0.5),
            });
    }

    if !state.boss_defeated
        && let Some(boss) = state
            .enemies
            .iter()
            .find(|e| e.alive && e.floor == floor && e.kind.is_final_boss())
    {
        return Some(Objective {
            kind: ObjectiveKind::Boss,
            pos: boss.pos,
        });
    }

    Some(Objective {
        kind: ObjectiveKind::Princess,
        pos: princess.pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;

    fn mansion() -> GameState {
        let mut state = GameState::new(Level::mansion(), 5);
        state.reset();
        state
    }

    #[test]
    fn test_classic_has_no_objective() {
        let mut state = GameState::new(Level::classic(), 5);
        state.reset();
        assert_eq!(objective_target(&state), None);
    }

    #[test]
    fn test_outdoors_points_at_entrance() {
        let state = mansion();
        let target = objective_target(&state).unwrap();
        assert_eq!(target.kind, ObjectiveKind::Entrance);
        assert_eq!(target.pos, Vec2::new(24.5, 22.5));
    }

    #[test]
    fn test_inside_points_up_the_stairs() {
        let mut state = mansion();
        state.in_mansion = true;
        let target = objective_target(&state).unwrap();
        assert_eq!(target.kind, ObjectiveKind::StairsUp);
        assert_eq!(target.pos, Vec2::new(30.5, 24.5));

        state.enter_floor(2);
        let target = objective_target(&state).unwrap();
        assert_eq!(target.pos, Vec2::new(34.5, 16.5));
    }

    #[test]
    fn test_top_floor_boss_then_princess() {
        let mut state = mansion();
        state.enter_floor(3);
        state.in_mansion = true;
        assert_eq!(objective_target(&state).unwrap().kind, ObjectiveKind::Boss);

        for enemy in state.enemies.iter_mut().filter(|e| e.kind.is_final_boss()) {
            enemy.alive = false;
        }
        state.boss_defeated = true;
        let target = objective_target(&state).unwrap();
        assert_eq!(target.kind, ObjectiveKind::Princess);
        assert_eq!(target.pos, Vec2::new(34.5, 35.5));

        state.princess.as_mut().unwrap().rescued = true;
        assert_eq!(objective_target(&state), None);
    }
}
