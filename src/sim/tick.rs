//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step. The pass order below is
//! load-bearing: combat assumes every entity has already committed its move.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::bullet::BulletOwner;
use super::combat::{CombatEvent, resolve_combat};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Intent snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Forward/back axis (-1..1, W = +1)
    pub move_forward: f32,
    /// Strafe axis (-1..1, D = +1)
    pub move_right: f32,
    /// Camera target yaw increment (degrees)
    pub look_yaw: f32,
    /// Camera target pitch increment (degrees, positive looks down)
    pub look_pitch: f32,
    pub jump: bool,
    /// Fire is a held action: the weapon cooldown paces it
    pub fire: bool,
    pub toggle_camera: bool,
    pub toggle_fog: bool,
    pub reset: bool,
    /// Handled by the driver, never by `tick`
    pub quit: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Movement axes in the player's input space (x = right, z = back)
    pub fn move_vector(&self) -> Vec3 {
        Vec3::new(self.move_right, 0.0, -self.move_forward).normalize_or_zero()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<CombatEvent> {
    let input = if input.idle_mode {
        autopilot::drive(state, input)
    } else {
        input.clone()
    };

    if input.reset {
        state.reset();
        return Vec::new();
    }

    // Terminal phases only accept a reset
    if state.phase.is_terminal() {
        return Vec::new();
    }

    state.time_ticks += 1;
    state.visual_time += 0.08;

    apply_input(state, &input);
    state.camera.smooth();

    state.player.update(&state.arena);

    let player_pos = state.player.pos();
    let mut shots = Vec::new();
    for enemy in &mut state.enemies {
        enemy.update(player_pos, &state.arena);
        if let Some(shot) = enemy.shoot(player_pos, &mut state.rng) {
            shots.push(shot);
        }
    }
    for shot in shots {
        state.spawn_bullet(shot, BulletOwner::Enemy);
    }

    for bullet in &mut state.player_bullets {
        bullet.update(&state.arena);
    }
    for bullet in &mut state.enemy_bullets {
        bullet.update(&state.arena);
    }

    for item in &mut state.collectibles {
        item.animate();
    }
    for power_up in &mut state.power_ups {
        power_up.animate();
    }

    state.arena.animate(state.time_ticks);
    state.compact();

    let events = resolve_combat(state);
    state.maintain_population();
    evaluate_outcome(state);

    events
}

/// Apply the sampled intent: movement, look, and discrete actions
fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.toggle_camera {
        state.camera.mode = state.camera.mode.toggled();
    }
    if input.toggle_fog {
        state.fog = !state.fog;
    }

    let movement = input.move_vector();
    if movement != Vec3::ZERO {
        state.player.apply_move_intent(movement, state.camera.yaw);
    }
    state.camera.look(input.look_yaw, input.look_pitch);

    if input.jump {
        state.player.jump();
    }

    if input.fire {
        let aim = state.player.aim_direction(&state.camera);
        if let Some(shot) = state.player.shoot(aim, &mut state.rng) {
            // With player bullets disabled the shot spends the cooldown and goes nowhere
            if state.rules.player_bullets {
                state.spawn_bullet(shot, BulletOwner::Player);
            }
        }
    }
}

/// Check the terminal transitions. Death wins over a simultaneous victory.
fn evaluate_outcome(state: &mut GameState) {
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        state.high_score = state.high_score.max(state.score);
        log::info!("Game over with score {} after {} ticks", state.score, state.time_ticks);
    } else if state.score >= WIN_SCORE {
        state.phase = GamePhase::Victory;
        state.high_score = state.high_score.max(state.score);
        log::info!("Victory with score {} after {} ticks", state.score, state.time_ticks);
    }
}
