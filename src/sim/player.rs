//! Player controller: movement integration, jumping, meters, buffs and the weapon
//!
//! The player never looks back into the game. Camera yaw and aim are passed in
//! by the tick.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, TileKind};
use super::bullet::Shot;
use super::collision::box_hits_wall;
use super::state::{Body, Camera, CameraMode, PowerUpKind};
use crate::consts::*;
use crate::{horizontal_length, yaw_of, yaw_to_direction};

/// Spawn position at the center of the safe zone
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, GROUND_HEIGHT, 0.0);

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub velocity: Vec3,
    /// Accumulated movement intent, consumed by the next `update`
    pub acceleration: Vec3,
    /// Facing yaw in degrees
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub speed_boost: u32,
    pub shield: u32,
    pub rapid_fire: u32,
    pub damage_cooldown: u32,
    pub shoot_cooldown: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(PLAYER_SPAWN, PLAYER_SIZE),
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            facing: 0.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            energy: PLAYER_MAX_ENERGY,
            max_energy: PLAYER_MAX_ENERGY,
            grounded: true,
            vertical_velocity: 0.0,
            speed_boost: 0,
            shield: 0,
            rapid_fire: 0,
            damage_cooldown: 0,
            shoot_cooldown: 0,
        }
    }

    /// Restore the spawn pose and full meters
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.body.pos
    }

    /// Current horizontal speed cap
    pub fn max_speed(&self) -> f32 {
        if self.speed_boost > 0 {
            PLAYER_MAX_SPEED * SPEED_BOOST_FACTOR
        } else {
            PLAYER_MAX_SPEED
        }
    }

    /// Whether the collision box at `pos` leaves the arena or touches a wall
    pub fn blocked_at(pos: Vec3, arena: &Arena) -> bool {
        box_hits_wall(arena, pos, PLAYER_HALF_WIDTH, PLAYER_BOUND)
    }

    /// Add camera-relative movement intent.
    ///
    /// `input` is (right, forward-negative) in the x/z plane, as combined from key
    /// state: W gives z = -1, D gives x = +1.
    pub fn apply_move_intent(&mut self, input: Vec3, camera_yaw: f32) {
        let mut speed = MOVE_SPEED;
        if self.speed_boost > 0 {
            speed *= SPEED_BOOST_FACTOR;
        }

        let forward = yaw_to_direction(camera_yaw);
        let right = Vec3::new(forward.z, 0.0, -forward.x);
        let movement = (forward * input.z + right * input.x).normalize_or_zero();
        if movement != Vec3::ZERO {
            self.acceleration += movement * speed;
            self.facing = yaw_of(movement);
        }
    }

    /// Advance one tick of physics and timers
    pub fn update(&mut self, arena: &Arena) {
        // Vertical
        if !self.grounded {
            self.vertical_velocity = (self.vertical_velocity + GRAVITY).max(MAX_FALL_SPEED);
            self.body.pos.y += self.vertical_velocity;
            if self.body.pos.y <= GROUND_HEIGHT {
                self.body.pos.y = GROUND_HEIGHT;
                self.vertical_velocity = 0.0;
                self.grounded = true;
            }
        }

        // Horizontal
        let friction = if self.grounded { GROUND_FRICTION } else { AIR_FRICTION };
        self.velocity.x *= friction;
        self.velocity.z *= friction;
        self.velocity += self.acceleration;
        self.acceleration = Vec3::ZERO;

        let speed = horizontal_length(self.velocity);
        let max_speed = self.max_speed();
        if speed > max_speed {
            let scale = max_speed / speed;
            self.velocity.x *= scale;
            self.velocity.z *= scale;
        }

        self.resolve_move(arena);

        self.speed_boost = self.speed_boost.saturating_sub(1);
        self.shield = self.shield.saturating_sub(1);
        self.rapid_fire = self.rapid_fire.saturating_sub(1);
        self.damage_cooldown = self.damage_cooldown.saturating_sub(1);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        if arena.tile_at(self.body.pos.x, self.body.pos.z) == TileKind::Hazard
            && self.damage_cooldown == 0
        {
            self.take_damage(HAZARD_DAMAGE);
            self.damage_cooldown = HAZARD_COOLDOWN;
        }

        self.energy = (self.energy + ENERGY_REGEN).min(self.max_energy);
    }

    /// Commit the horizontal move, clamping to the arena and sliding along walls
    fn resolve_move(&mut self, arena: &Arena) {
        let mut target = self.body.pos + Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        if target.x.abs() > PLAYER_BOUND {
            target.x = PLAYER_BOUND.copysign(target.x);
            self.velocity.x = 0.0;
        }
        if target.z.abs() > PLAYER_BOUND {
            target.z = PLAYER_BOUND.copysign(target.z);
            self.velocity.z = 0.0;
        }

        if !Self::blocked_at(target, arena) {
            self.body.pos = target;
            return;
        }

        let slide_x = Vec3::new(target.x, self.body.pos.y, self.body.pos.z);
        let slide_z = Vec3::new(self.body.pos.x, self.body.pos.y, target.z);
        if !Self::blocked_at(slide_x, arena) {
            self.body.pos.x = target.x;
            self.velocity.z = 0.0;
        } else if !Self::blocked_at(slide_z, arena) {
            self.body.pos.z = target.z;
            self.velocity.x = 0.0;
        } else {
            self.velocity.x = 0.0;
            self.velocity.z = 0.0;
        }
    }

    /// Jump if grounded and energy allows. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded || self.energy < JUMP_COST {
            return false;
        }
        self.vertical_velocity = JUMP_SPEED;
        self.grounded = false;
        self.energy -= JUMP_COST;
        true
    }

    /// Apply damage unless shielded. Health stays within [0, max].
    pub fn take_damage(&mut self, amount: f32) {
        if self.shield > 0 {
            return;
        }
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Spend energy to start a timed buff. Returns whether it activated.
    pub fn use_power_up(&mut self, kind: PowerUpKind) -> bool {
        if self.energy < POWER_UP_COST {
            return false;
        }
        self.energy -= POWER_UP_COST;
        let duration = kind.duration();
        match kind {
            PowerUpKind::Speed => self.speed_boost = duration,
            PowerUpKind::Shield => self.shield = duration,
            PowerUpKind::RapidFire => self.rapid_fire = duration,
        }
        true
    }

    /// Unit aim direction for the current camera mode
    pub fn aim_direction(&self, camera: &Camera) -> Vec3 {
        match camera.mode {
            CameraMode::FirstPerson => {
                let (sin_y, cos_y) = camera.yaw.to_radians().sin_cos();
                let (sin_p, cos_p) = camera.pitch.to_radians().sin_cos();
                Vec3::new(-sin_y * cos_p, -sin_p, -cos_y * cos_p)
            }
            CameraMode::Overhead => yaw_to_direction(self.facing),
        }
    }

    /// Fire along `aim` if the weapon is ready
    pub fn shoot<R: Rng>(&mut self, aim: Vec3, rng: &mut R) -> Option<Shot> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = if self.rapid_fire > 0 {
            RAPID_SHOOT_COOLDOWN
        } else {
            SHOOT_COOLDOWN
        };

        let jitter = Vec3::new(
            (rng.random::<f32>() - 0.5) * PLAYER_SPREAD,
            (rng.random::<f32>() - 0.5) * PLAYER_SPREAD * 0.6,
            (rng.random::<f32>() - 0.5) * PLAYER_SPREAD,
        );
        let direction = (aim + jitter).normalize_or_zero();
        let origin = self.body.pos + Vec3::new(0.0, MUZZLE_HEIGHT, 0.0) + aim * BARREL_LENGTH;

        Some(Shot {
            origin,
            direction,
            speed: PLAYER_BULLET_SPEED,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Cell index for a world coordinate in a default-size arena
    fn cell(world: f32) -> usize {
        (world + ARENA_SIZE as f32 / 2.0).floor() as usize
    }

    #[test]
    fn test_jump_arc_lands() {
        let arena = Arena::empty();
        let mut player = Player::new();
        assert!(player.jump());
        assert_eq!(player.energy, PLAYER_MAX_ENERGY - JUMP_COST);
        assert!(!player.grounded);
        assert!(!player.jump(), "no double jump");

        let mut peak = GROUND_HEIGHT;
        for _ in 0..60 {
            player.update(&arena);
            peak = peak.max(player.pos().y);
        }
        assert!(player.grounded);
        assert_eq!(player.pos().y, GROUND_HEIGHT);
        assert!(peak > GROUND_HEIGHT + 0.5);
    }

    #[test]
    fn test_jump_needs_energy() {
        let mut player = Player::new();
        player.energy = JUMP_COST - 1.0;
        assert!(!player.jump());
        assert!(player.grounded);
    }

    #[test]
    fn test_speed_clamped() {
        let arena = Arena::empty();
        let mut player = Player::new();
        player.acceleration = Vec3::new(5.0, 0.0, 0.0);
        player.update(&arena);
        assert!((horizontal_length(player.velocity) - PLAYER_MAX_SPEED).abs() < 1e-5);

        player.speed_boost = 10;
        player.acceleration = Vec3::new(5.0, 0.0, 0.0);
        player.update(&arena);
        let boosted = PLAYER_MAX_SPEED * SPEED_BOOST_FACTOR;
        assert!((horizontal_length(player.velocity) - boosted).abs() < 1e-5);
    }

    #[test]
    fn test_move_intent_is_camera_relative() {
        let mut player = Player::new();
        // Forward (W) with camera yaw 0 moves toward -Z
        player.apply_move_intent(Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(player.acceleration.z < 0.0);
        assert!(player.acceleration.x.abs() < 1e-6);

        // Same key with the camera turned 90 degrees moves toward -X
        let mut player = Player::new();
        player.apply_move_intent(Vec3::new(0.0, 0.0, -1.0), 90.0);
        assert!(player.acceleration.x < 0.0);
        assert!(player.acceleration.z.abs() < 1e-6);
    }

    #[test]
    fn test_clamped_at_arena_bounds() {
        let arena = Arena::empty();
        let mut player = Player::new();
        player.body.pos.x = PLAYER_BOUND - 0.05;
        player.velocity = Vec3::new(0.14, 0.0, 0.0);
        player.update(&arena);
        assert_eq!(player.pos().x, PLAYER_BOUND);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn test_slides_along_wall() {
        let mut arena = Arena::empty();
        // Wall column directly east of the player
        for cz in 0..ARENA_SIZE {
            arena.set_tile(cell(1.0), cz, TileKind::Wall, 2.0);
        }
        let mut player = Player::new();
        player.body.pos = Vec3::new(0.65, GROUND_HEIGHT, 0.0);
        player.velocity = Vec3::new(0.1, 0.0, 0.1);
        player.update(&arena);

        // X is blocked, Z slides
        assert!(player.pos().x < 1.0 - PLAYER_HALF_WIDTH + 1e-4);
        assert!(player.pos().z > 0.0);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn test_boxed_in_stops() {
        let mut arena = Arena::empty();
        arena.fill(TileKind::Wall);
        arena.set_tile(cell(0.0), cell(0.0), TileKind::Floor, 0.0);
        let mut player = Player::new();
        player.body.pos = Vec3::new(0.65, GROUND_HEIGHT, 0.65);
        player.velocity = Vec3::new(0.1, 0.0, 0.1);
        player.update(&arena);
        assert_eq!(player.pos(), Vec3::new(0.65, GROUND_HEIGHT, 0.65));
        assert_eq!(player.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_hazard_damage_with_cooldown() {
        let mut arena = Arena::empty();
        arena.set_tile(cell(0.0), cell(0.0), TileKind::Hazard, 0.0);
        let mut player = Player::new();
        player.body.pos = Vec3::new(0.5, GROUND_HEIGHT, 0.5);

        player.update(&arena);
        assert_eq!(player.health, PLAYER_MAX_HEALTH - HAZARD_DAMAGE);
        assert_eq!(player.damage_cooldown, HAZARD_COOLDOWN);

        for _ in 0..HAZARD_COOLDOWN - 1 {
            player.update(&arena);
        }
        assert_eq!(player.health, PLAYER_MAX_HEALTH - HAZARD_DAMAGE);
        player.update(&arena);
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 2.0 * HAZARD_DAMAGE);
    }

    #[test]
    fn test_shield_blocks_damage() {
        let mut player = Player::new();
        player.shield = 5;
        player.take_damage(50.0);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_damage_clamps() {
        let mut player = Player::new();
        player.take_damage(-30.0);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
        player.take_damage(500.0);
        assert_eq!(player.health, 0.0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_energy_regen_capped() {
        let arena = Arena::empty();
        let mut player = Player::new();
        player.energy = PLAYER_MAX_ENERGY - 0.1;
        player.update(&arena);
        assert_eq!(player.energy, PLAYER_MAX_ENERGY);
    }

    #[test]
    fn test_use_power_up() {
        let mut player = Player::new();
        assert!(player.use_power_up(PowerUpKind::Shield));
        assert_eq!(player.shield, SHIELD_TICKS);
        assert_eq!(player.energy, PLAYER_MAX_ENERGY - POWER_UP_COST);

        player.energy = POWER_UP_COST - 0.5;
        assert!(!player.use_power_up(PowerUpKind::RapidFire));
        assert_eq!(player.rapid_fire, 0);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut player = Player::new();
        let aim = Vec3::new(0.0, 0.0, -1.0);

        let shot = player.shoot(aim, &mut rng).expect("weapon ready");
        assert!((shot.direction.length() - 1.0).abs() < 1e-5);
        assert!(shot.direction.dot(aim) > 0.99);
        assert_eq!(player.shoot_cooldown, SHOOT_COOLDOWN);
        assert!(player.shoot(aim, &mut rng).is_none());

        player.shoot_cooldown = 0;
        player.rapid_fire = 10;
        assert!(player.shoot(aim, &mut rng).is_some());
        assert_eq!(player.shoot_cooldown, RAPID_SHOOT_COOLDOWN);
    }

    #[test]
    fn test_aim_direction_modes() {
        let mut player = Player::new();
        let mut camera = Camera::default();
        let aim = player.aim_direction(&camera);
        assert!((aim - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        camera.pitch = 90.0;
        let aim = player.aim_direction(&camera);
        assert!((aim.y + 1.0).abs() < 1e-5);

        camera.mode = CameraMode::Overhead;
        player.facing = 90.0;
        let aim = player.aim_direction(&camera);
        assert!((aim - Vec3::X).length() < 1e-5);
    }
}
