//! Outbound simulation events
//!
//! The tick pushes events and never looks at them again. The host drains the
//! queue after each tick and forwards whatever it cares about (audio cues,
//! HUD flashes, logging).

use std::collections::VecDeque;

use serde::Serialize;

use super::state::EnemyKind;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimEvent {
    /// A shot was fired
    Shoot,
    /// A shot hit an enemy (followed by `Death` if it was lethal)
    Hit { kind: EnemyKind },
    /// An enemy died
    Death { kind: EnemyKind },
    /// The final boss died and the rescue objective is open
    BossDefeated,
    /// Ammo picked up
    Pickup { amount: i32 },
    /// Player changed floor through a stairs cell
    FloorChanged { from: u8, to: u8 },
    /// Player was hit by an enemy
    PlayerHurt { damage: i32 },
    /// Princess rescued
    Rescue,
    /// Player walked into the mansion
    ZoneEntered,
    /// Player walked out of the mansion
    ZoneLeft,
    GameOver,
    GameWon,
}

/// FIFO of events awaiting the host
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<SimEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending event in emission order
    pub fn drain(&mut self) -> impl Iterator<Item = SimEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = EventQueue::default();
        queue.push(SimEvent::Shoot);
        queue.push(SimEvent::Hit { kind: EnemyKind::Imp });
        queue.push(SimEvent::ZoneEntered);
        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![SimEvent::Shoot, SimEvent::Hit { kind: EnemyKind::Imp }, SimEvent::ZoneEntered]
        );
        assert!(queue.is_empty());
    }
}
