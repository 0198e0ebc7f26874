//! Grid Arena headless driver
//!
//! Runs the simulation at a fixed timestep, either paced against the wall clock
//! or as fast as possible, then prints the final state as JSON.

use std::time::{Duration, Instant};

use grid_arena::Settings;
use grid_arena::consts::*;
use grid_arena::sim::{GamePhase, GameState, TickInput, tick};

/// Ticks between progress log lines
const REPORT_INTERVAL: u64 = 600;

/// Game instance holding all state
struct Game {
    state: GameState,
    input: TickInput,
    accumulator: f32,
    /// Ticks run by this driver (the state's own counter freezes in terminal phases)
    ticks_run: u32,
    tick_budget: u32,
    last_phase: GamePhase,
    settings: Settings,
}

impl Game {
    fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = GameState::with_rules(seed, settings.rules());
        settings.apply(&mut state);
        Self {
            last_phase: state.phase,
            state,
            input: TickInput {
                idle_mode: settings.autopilot,
                ..Default::default()
            },
            accumulator: 0.0,
            ticks_run: 0,
            tick_budget: settings.ticks,
            settings: settings.clone(),
        }
    }

    fn finished(&self) -> bool {
        if self.input.quit || self.ticks_run >= self.tick_budget {
            return true;
        }
        // Without the autopilot nothing will ever press reset
        !self.input.idle_mode && self.state.phase.is_terminal()
    }

    /// Run as many simulation ticks as `dt` covers
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && !self.finished() {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Run a single tick
    fn step(&mut self) {
        let input = self.input.clone();
        let was_terminal = self.state.phase.is_terminal();
        tick(&mut self.state, &input);
        self.ticks_run += 1;

        // A reset puts the camera back to first person
        if input.reset || (was_terminal && !self.state.phase.is_terminal()) {
            self.settings.apply(&mut self.state);
        }

        // Clear one-shot inputs after processing
        self.input.reset = false;
        self.input.toggle_camera = false;
        self.input.toggle_fog = false;

        self.report();
    }

    fn report(&mut self) {
        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!("Phase {:?} -> {:?} at tick {}", self.last_phase, phase, self.ticks_run);
            self.last_phase = phase;
        }
        if self.ticks_run as u64 % REPORT_INTERVAL == 0 {
            log::info!(
                "tick {}: score {} health {:.0} energy {:.0} enemies {} bullets {}/{}",
                self.ticks_run,
                self.state.score,
                self.state.player.health,
                self.state.player.energy,
                self.state.enemies.len(),
                self.state.player_bullets.len(),
                self.state.enemy_bullets.len()
            );
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Grid Arena (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}, {} ticks, autopilot {}", seed, settings.ticks, settings.autopilot);

    let mut game = Game::new(seed, &settings);
    if settings.realtime {
        let frame = Duration::from_secs_f32(SIM_DT);
        let mut last_time = Instant::now();
        while !game.finished() {
            std::thread::sleep(frame);
            let now = Instant::now();
            game.update(now.duration_since(last_time).as_secs_f32());
            last_time = now;
        }
    } else {
        while !game.finished() {
            game.update(SIM_DT * MAX_SUBSTEPS as f32);
        }
    }

    log::info!(
        "Finished after {} ticks: {:?}, score {}, high score {}",
        game.ticks_run,
        game.state.phase,
        game.state.score,
        game.state.high_score
    );

    match serde_json::to_string_pretty(&game.state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}
