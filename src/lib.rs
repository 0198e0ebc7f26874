//! Grid Arena - a tile-arena shooter simulation
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (arena, physics, AI, combat, game state)
//! - `settings`: Driver configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena grid side length (cells), centered on the origin
    pub const ARENA_SIZE: usize = 22;
    /// Centered cell indices with |i| below this stay Floor
    pub const SAFE_ZONE_HALF: i32 = 4;
    pub const WALL_CHANCE: f32 = 0.15;
    /// Cumulative threshold: rolls in [WALL_CHANCE, HAZARD_CHANCE) become Hazard
    pub const HAZARD_CHANCE: f32 = 0.20;
    pub const WALL_MIN_HEIGHT: f32 = 1.5;
    pub const WALL_MAX_HEIGHT: f32 = 3.0;

    /// Player movement and physics (per tick)
    pub const MOVE_SPEED: f32 = 0.015;
    pub const PLAYER_MAX_SPEED: f32 = 0.15;
    pub const SPEED_BOOST_FACTOR: f32 = 1.8;
    pub const GROUND_FRICTION: f32 = 0.85;
    pub const AIR_FRICTION: f32 = 0.92;
    pub const GRAVITY: f32 = -0.015;
    pub const MAX_FALL_SPEED: f32 = -0.5;
    pub const JUMP_SPEED: f32 = 0.18;
    pub const GROUND_HEIGHT: f32 = 1.0;
    pub const PLAYER_SIZE: f32 = 0.7;
    /// Half-width of the player's collision box
    pub const PLAYER_HALF_WIDTH: f32 = 0.3;
    pub const PLAYER_BOUND: f32 = 9.3;

    /// Player meters
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_MAX_ENERGY: f32 = 100.0;
    pub const ENERGY_REGEN: f32 = 0.3;
    pub const JUMP_COST: f32 = 15.0;
    pub const POWER_UP_COST: f32 = 25.0;
    pub const HAZARD_DAMAGE: f32 = 4.0;
    pub const HAZARD_COOLDOWN: u32 = 80;

    /// Buff durations (ticks)
    pub const SPEED_BOOST_TICKS: u32 = 500;
    pub const SHIELD_TICKS: u32 = 800;
    pub const RAPID_FIRE_TICKS: u32 = 300;

    /// Player weapon
    pub const SHOOT_COOLDOWN: u32 = 10;
    pub const RAPID_SHOOT_COOLDOWN: u32 = 4;
    pub const PLAYER_SPREAD: f32 = 0.02;
    pub const MUZZLE_HEIGHT: f32 = 0.4;
    pub const BARREL_LENGTH: f32 = 0.8;
    pub const PLAYER_BULLET_SPEED: f32 = 0.5;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 0.9;
    pub const ENEMY_BOUND: f32 = 9.2;
    pub const ENEMY_HEALTH: i32 = 2;
    /// Boss carries three times the health of a regular enemy
    pub const BOSS_HEALTH: i32 = ENEMY_HEALTH * 3;
    pub const ENEMY_SHOOT_COOLDOWN: u32 = 150;
    pub const ENEMY_MUZZLE_HEIGHT: f32 = 0.3;

    pub const HUNTER_ENGAGE_RADIUS: f32 = 1.8;
    pub const HUNTER_SPEED: f32 = 0.004;
    pub const HUNTER_DETECT_RADIUS: f32 = 10.0;
    pub const HUNTER_ALERT_STEP: f32 = 2.0;
    pub const HUNTER_MAX_ALERT: f32 = 120.0;
    pub const HUNTER_ALERT_SPEEDUP: f32 = 0.008;

    pub const SNIPER_MIN_RANGE: f32 = 5.0;
    pub const SNIPER_MAX_RANGE: f32 = 12.0;
    pub const SNIPER_RETREAT_SPEED: f32 = 0.002;
    pub const SNIPER_APPROACH_SPEED: f32 = 0.003;
    pub const SNIPER_SPREAD: f32 = 0.08;
    pub const SNIPER_BULLET_SPEED: f32 = 0.08;

    pub const BOSS_MOVE_INTERVAL: u32 = 120;
    pub const BOSS_MIN_RANGE: f32 = 4.0;
    pub const BOSS_SPEED: f32 = 0.003;
    pub const BOSS_SPREAD: f32 = 0.15;
    pub const BOSS_BULLET_SPEED: f32 = 0.12;

    /// Bullets
    pub const BULLET_SIZE: f32 = 0.15;
    pub const BULLET_LIFETIME: u32 = 700;
    pub const BULLET_BOUND: f32 = 9.8;
    pub const BULLET_TRAIL_LENGTH: usize = 6;

    /// Pickups
    pub const COLLECTIBLE_SIZE: f32 = 0.4;
    pub const POWER_UP_SIZE: f32 = 0.5;
    pub const PICKUP_HEIGHT: f32 = 0.8;

    /// Interaction distances (center to center)
    pub const CONTACT_RANGE: f32 = 1.4;
    pub const ENEMY_BULLET_HIT_RANGE: f32 = 1.0;
    pub const PLAYER_BULLET_HIT_RANGE: f32 = 1.3;
    pub const PICKUP_RANGE: f32 = 1.3;

    /// Damage
    pub const CONTACT_DAMAGE: f32 = 5.0;
    pub const BOSS_CONTACT_DAMAGE: f32 = 8.0;
    pub const CONTACT_COOLDOWN: u32 = 100;
    pub const ENEMY_BULLET_DAMAGE: f32 = 6.0;

    /// Scoring
    pub const ENEMY_KILL_SCORE: u64 = 10;
    pub const BOSS_KILL_SCORE: u64 = 50;
    pub const CRYSTAL_SCORE: u64 = 5;
    pub const POWER_CORE_SCORE: u64 = 8;
    pub const WIN_SCORE: u64 = 300;

    /// Camera
    pub const CAMERA_SMOOTHING: f32 = 0.12;
    pub const CAMERA_MAX_PITCH: f32 = 85.0;
}

/// Wrap an angle in degrees to [-180, 180)
#[inline]
pub fn wrap_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Facing yaw (degrees) of a horizontal direction; 0 faces +Z
#[inline]
pub fn yaw_of(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z).to_degrees()
}

/// Unit horizontal direction for a yaw in degrees
#[inline]
pub fn yaw_to_direction(yaw_deg: f32) -> Vec3 {
    let yaw = yaw_deg.to_radians();
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Length of a vector ignoring the vertical axis
#[inline]
pub fn horizontal_length(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(190.0) - -170.0).abs() < 1e-4);
        assert!((wrap_degrees(-540.0) - -180.0).abs() < 1e-4);
        assert!((wrap_degrees(45.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_yaw_round_trip() {
        for yaw in [-170.0_f32, -90.0, 0.0, 33.0, 120.0] {
            let dir = yaw_to_direction(yaw);
            assert!((yaw_of(dir) - yaw).abs() < 1e-3);
        }
    }
}
