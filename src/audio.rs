//! Audio cues
//!
//! The simulation never plays sound. It emits `SimEvent`s; the host maps them
//! to `AudioCue`s and hands them to a `CueSink`, which is free to drop them.
//! Each cue carries a procedural tone description so a synth backend needs
//! no sample files.

use crate::settings::Settings;
use crate::sim::events::SimEvent;
use crate::sim::state::EnemyKind;

/// Fire-and-forget sound requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Gun fired
    Shoot,
    /// Shot landed
    Hit { kind: EnemyKind },
    /// Enemy died; bigger enemies get deeper groans
    Death { kind: EnemyKind },
    /// Ammo collected
    Pickup,
    /// Princess rescued
    Rescue,
    ZoneEntered,
    ZoneLeft,
    GameOver,
    GameWon,
}

/// Oscillator shape for the procedural synth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single swept tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Start frequency (Hz)
    pub start_hz: f32,
    /// End frequency (Hz), reached with an exponential ramp
    pub end_hz: f32,
    pub duration_ms: u32,
    /// Relative loudness before volume settings (0.0 - 1.0)
    pub gain: f32,
}

impl AudioCue {
    /// Cue for an event, if it has one
    pub fn from_event(event: SimEvent) -> Option<Self> {
        match event {
            SimEvent::Shoot => Some(AudioCue::Shoot),
            SimEvent::Hit { kind } => Some(AudioCue::Hit { kind }),
            SimEvent::Death { kind } => Some(AudioCue::Death { kind }),
            SimEvent::Pickup { .. } => Some(AudioCue::Pickup),
            SimEvent::Rescue => Some(AudioCue::Rescue),
            SimEvent::ZoneEntered => Some(AudioCue::ZoneEntered),
            SimEvent::ZoneLeft => Some(AudioCue::ZoneLeft),
            SimEvent::GameOver => Some(AudioCue::GameOver),
            SimEvent::GameWon => Some(AudioCue::GameWon),
            SimEvent::BossDefeated | SimEvent::FloorChanged { .. } | SimEvent::PlayerHurt { .. } => {
                None
            }
        }
    }

    /// Procedural tone for this cue
    pub fn tone(self) -> Tone {
        match self {
            AudioCue::Shoot => tone(Waveform::Square, 220.0, 60.0, 90, 0.4),
            AudioCue::Hit { kind } => {
                let pitch = 600.0 / voice_depth(kind);
                tone(Waveform::Triangle, pitch, pitch * 0.7, 60, 0.3)
            }
            AudioCue::Death { kind } => {
                let pitch = 300.0 / voice_depth(kind);
                tone(Waveform::Sawtooth, pitch, pitch * 0.25, 250 + 100 * voice_depth(kind) as u32, 0.5)
            }
            AudioCue::Pickup => tone(Waveform::Sine, 660.0, 1320.0, 120, 0.35),
            AudioCue::Rescue => tone(Waveform::Sine, 523.0, 1046.0, 600, 0.5),
            AudioCue::ZoneEntered => tone(Waveform::Triangle, 180.0, 240.0, 400, 0.25),
            AudioCue::ZoneLeft => tone(Waveform::Triangle, 240.0, 180.0, 400, 0.25),
            AudioCue::GameOver => tone(Waveform::Sawtooth, 200.0, 40.0, 900, 0.5),
            AudioCue::GameWon => tone(Waveform::Square, 392.0, 784.0, 700, 0.4),
        }
    }
}

const fn tone(waveform: Waveform, start_hz: f32, end_hz: f32, duration_ms: u32, gain: f32) -> Tone {
    Tone {
        waveform,
        start_hz,
        end_hz,
        duration_ms,
        gain,
    }
}

/// Pitch divisor by enemy size
fn voice_depth(kind: EnemyKind) -> f32 {
    match kind {
        EnemyKind::Imp => 1.0,
        EnemyKind::Demon => 1.3,
        EnemyKind::Baron => 1.6,
        EnemyKind::Brute => 2.0,
        EnemyKind::Overlord => 3.0,
    }
}

/// Something that plays cues
///
/// Implementations must not fail loudly; a cue that cannot be played is dropped.
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sink that logs the tone it would synthesize
#[derive(Debug, Clone)]
pub struct LogCueSink {
    sfx_volume: f32,
    muted: bool,
    played: u32,
}

impl Default for LogCueSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogCueSink {
    pub fn new() -> Self {
        Self {
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut sink = Self::new();
        sink.set_sfx_volume(settings.sfx_volume);
        sink.set_muted(settings.muted);
        sink
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Cues that passed the volume gate
    pub fn played(&self) -> u32 {
        self.played
    }
}

impl CueSink for LogCueSink {
    fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let tone = cue.tone();
        self.played += 1;
        log::debug!(
            "cue {:?}: {:?} {:.0}->{:.0} Hz, {} ms, gain {:.2}",
            cue,
            tone.waveform,
            tone.start_hz,
            tone.end_hz,
            tone.duration_ms,
            tone.gain * vol
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(AudioCue::from_event(SimEvent::Shoot), Some(AudioCue::Shoot));
        assert_eq!(
            AudioCue::from_event(SimEvent::Death { kind: EnemyKind::Baron }),
            Some(AudioCue::Death { kind: EnemyKind::Baron })
        );
        assert_eq!(AudioCue::from_event(SimEvent::Pickup { amount: 9 }), Some(AudioCue::Pickup));
        assert_eq!(AudioCue::from_event(SimEvent::FloorChanged { from: 1, to: 2 }), None);
        assert_eq!(AudioCue::from_event(SimEvent::PlayerHurt { damage: 3 }), None);
    }

    #[test]
    fn test_bigger_enemies_die_lower() {
        let imp = AudioCue::Death { kind: EnemyKind::Imp }.tone();
        let boss = AudioCue::Death { kind: EnemyKind::Overlord }.tone();
        assert!(boss.start_hz < imp.start_hz);
        assert!(boss.duration_ms > imp.duration_ms);
    }

    #[test]
    fn test_muted_sink_drops_cues() {
        let mut sink = LogCueSink::new();
        sink.play(AudioCue::Shoot);
        sink.set_muted(true);
        sink.play(AudioCue::Shoot);
        sink.set_muted(false);
        sink.set_sfx_volume(0.0);
        sink.play(AudioCue::GameWon);
        assert_eq!(sink.played(), 1);
    }

    #[test]
    fn test_sink_from_settings() {
        let settings = Settings { muted: true, ..Default::default() };
        let mut sink = LogCueSink::from_settings(&settings);
        sink.play(AudioCue::Rescue);
        assert_eq!(sink.played(), 0);
    }
}
