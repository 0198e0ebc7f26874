//! Idle/demo mode
//!
//! Synthesizes a `TickInput` from the current state so the game plays itself:
//! turn toward the nearest enemy, shoot when it is in the sights, wander toward
//! pickups and back off when something gets too close. Hazard tiles hurt even
//! mid-jump, so the autopilot walks around them.

use glam::Vec3;

use super::arena::TileKind;
use super::state::{Body, GameState};
use super::tick::TickInput;
use crate::consts::*;
use crate::{horizontal_length, wrap_degrees, yaw_to_direction};

/// Largest camera turn per tick (degrees)
const MAX_TURN: f32 = 6.0;
const MAX_PITCH_TURN: f32 = 3.0;
/// Enemies nearer than this are fled from instead of picking things up
const FLEE_RADIUS: f32 = 3.0;
/// Hold fire while the target is within this many degrees of the sights
const FIRE_CONE: f32 = 12.0;
const FIRE_RANGE: f32 = 12.0;
/// How far ahead to look for tiles worth stepping around
const LOOKAHEAD: f32 = 1.2;

/// Build this tick's input. Driver-level flags (`quit`, `reset`, toggles) pass through.
pub fn drive(state: &GameState, input: &TickInput) -> TickInput {
    let mut out = TickInput {
        reset: input.reset,
        toggle_camera: input.toggle_camera,
        toggle_fog: input.toggle_fog,
        quit: input.quit,
        idle_mode: true,
        ..Default::default()
    };

    // Restart as soon as a run ends
    if state.phase.is_terminal() {
        out.reset = true;
        return out;
    }

    let player_pos = state.player.pos();
    let nearest_enemy = nearest(state.enemies.iter().map(|e| &e.body), player_pos);

    if let Some(enemy) = nearest_enemy {
        let to_enemy = enemy.pos - player_pos;

        // The sights point along (-sin yaw, -cos yaw), so invert the direction for atan2
        let desired_yaw = (-to_enemy.x).atan2(-to_enemy.z).to_degrees();
        out.look_yaw = wrap_degrees(desired_yaw - state.camera.target_yaw).clamp(-MAX_TURN, MAX_TURN);

        let drop = player_pos.y + MUZZLE_HEIGHT - enemy.pos.y;
        let desired_pitch = drop.atan2(horizontal_length(to_enemy)).to_degrees();
        out.look_pitch = (desired_pitch - state.camera.target_pitch).clamp(-MAX_PITCH_TURN, MAX_PITCH_TURN);

        let aim = state.player.aim_direction(&state.camera);
        let off_axis = aim.angle_between(to_enemy.normalize_or_zero()).to_degrees();
        out.fire = off_axis < FIRE_CONE && to_enemy.length() < FIRE_RANGE;
    }

    let heading = match nearest_enemy {
        Some(enemy) if enemy.distance_to(player_pos) < FLEE_RADIUS => player_pos - enemy.pos,
        _ => {
            let pickups = state
                .collectibles
                .iter()
                .map(|c| &c.body)
                .chain(state.power_ups.iter().map(|p| &p.body));
            nearest(pickups, player_pos).map_or(Vec3::ZERO, |p| p.pos - player_pos)
        }
    };
    let heading = avoid_hazards(state, Vec3::new(heading.x, 0.0, heading.z).normalize_or_zero());

    if heading != Vec3::ZERO {
        // Express the world heading in the camera-relative axes the player reads
        let forward = yaw_to_direction(state.camera.yaw);
        let right = Vec3::new(forward.z, 0.0, -forward.x);
        out.move_right = heading.dot(right);
        out.move_forward = -heading.dot(forward);
    }

    out
}

/// Turn a quarter left or right when the tile ahead is a Hazard. Keeps the
/// heading if neither side is clear floor.
fn avoid_hazards(state: &GameState, heading: Vec3) -> Vec3 {
    let pos = state.player.pos();
    let tile_ahead = |dir: Vec3| {
        let ahead = pos + dir * LOOKAHEAD;
        state.arena.tile_at(ahead.x, ahead.z)
    };
    if heading == Vec3::ZERO || tile_ahead(heading) != TileKind::Hazard {
        return heading;
    }

    let left = Vec3::new(-heading.z, 0.0, heading.x);
    [left, -left]
        .into_iter()
        .find(|&dir| tile_ahead(dir) == TileKind::Floor)
        .unwrap_or(heading)
}

/// Closest active body to `from`
fn nearest<'a>(bodies: impl Iterator<Item = &'a Body>, from: Vec3) -> Option<&'a Body> {
    bodies.filter(|b| b.active).min_by(|a, b| {
        a.distance_to(from)
            .partial_cmp(&b.distance_to(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
