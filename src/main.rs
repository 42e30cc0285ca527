//! Manor Caster entry point
//!
//! Headless native host: loads settings, drives a session from simulated
//! timestamps with a simple autopilot, forwards audio cues to a logging sink
//! and prints the final frame as text.
//!
//! Usage: `manor-caster [settings.json] [classic|mansion]`

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use manor_caster::audio::{AudioCue, CueSink, LogCueSink};
    use manor_caster::consts::FRAME_INTERVAL_MS;
    use manor_caster::normalize_angle;
    use manor_caster::renderer::ViewConfig;
    use manor_caster::settings::{Settings, Variant};
    use manor_caster::sim::{FrameClock, GameState, Session, TickInput, find_target, objective_target};

    /// Simulated host hiccup, in milliseconds
    const STALL_MS: f64 = 750.0;
    /// Frames between strafe direction flips when walking
    const WIGGLE_PERIOD: u32 = 90;
    /// Aim tolerance before the autopilot stops turning (radians)
    const AIM_SLACK: f32 = 0.05;

    /// Chase the nearest enemy on this floor, otherwise follow the compass
    fn autopilot(state: &GameState, frame: u32) -> TickInput {
        let p = &state.player;
        let mut input = TickInput::default();

        let target = state
            .living_on_player_floor()
            .min_by(|a, b| a.pos.distance(p.pos).total_cmp(&b.pos.distance(p.pos)))
            .map(|e| e.pos)
            .or_else(|| objective_target(state).map(|o| o.pos));

        let Some(target) = target else {
            input.turn_right = true;
            return input;
        };

        let to = target - p.pos;
        let rel = normalize_angle(to.y.atan2(to.x) - p.angle);
        input.turn_right = rel > AIM_SLACK;
        input.turn_left = rel < -AIM_SLACK;
        input.shoot = find_target(&state.map, p, &state.enemies).is_some();
        input.forward = rel.abs() < 0.5 && to.length() > 1.2;
        if input.forward && (frame / WIGGLE_PERIOD) % 3 == 2 {
            input.strafe_left = true;
        }
        input
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let mut settings = match args.next() {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        if let Some(name) = args.next() {
            match Variant::parse(&name) {
                Some(variant) => settings.variant = variant,
                None => log::warn!("Unknown variant '{}', keeping {}", name, settings.variant.as_str()),
            }
        }
        log::info!(
            "Manor Caster (headless): {} variant, {} columns, {} frames",
            settings.variant.as_str(),
            settings.columns,
            settings.frames
        );

        let view = ViewConfig::from_settings(&settings);
        let mut sink = LogCueSink::from_settings(&settings);
        let mut clock = FrameClock::new(settings.max_frame_step);
        let mut session = Session::new(&settings);
        session.start();

        let mut now_ms = 0.0;
        for frame in 0..settings.frames {
            now_ms += FRAME_INTERVAL_MS;
            if frame == settings.frames / 2 {
                log::info!("Simulating a {} ms stall", STALL_MS);
                now_ms += STALL_MS;
            }
            let dt = clock.advance(now_ms);

            let input = autopilot(session.state(), frame);
            session.tick(&input, dt);

            for event in session.drain_events() {
                if let Some(cue) = AudioCue::from_event(event) {
                    sink.play(cue);
                }
            }

            if session.phase().is_terminal() {
                break;
            }
        }

        let frame = session.frame(&view);
        println!("{}", frame.to_ascii(24));

        let state = session.state();
        log::info!(
            "Finished: {:?} after {} ticks | floor {} | health {} | ammo {} | kills {} | cues {}",
            state.phase,
            state.time_ticks,
            state.player.floor,
            state.player.health,
            state.player.ammo,
            state.kill_count,
            sink.played()
        );
        session.stop();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is driven by an embedding page
}
