//! Bullet kinematics
//!
//! Bullets travel in a straight line at a fixed speed. Each move is sub-stepped
//! against the grid so fast bullets cannot skip over a wall cell.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::segment_hits_wall;
use super::state::Body;
use crate::consts::*;

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A fire action's result, turned into a `Bullet` by the game state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    pub speed: f32,
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub body: Body,
    pub direction: Vec3,
    pub speed: f32,
    /// Remaining ticks
    pub lifetime: u32,
    pub owner: BulletOwner,
    /// Recent positions for rendering (newest first)
    pub trail: Vec<Vec3>,
}

impl Bullet {
    pub fn new(id: u32, shot: Shot, owner: BulletOwner) -> Self {
        Self {
            id,
            body: Body::new(shot.origin, BULLET_SIZE),
            direction: shot.direction.normalize_or_zero(),
            speed: shot.speed,
            lifetime: BULLET_LIFETIME,
            owner,
            trail: vec![shot.origin; BULLET_TRAIL_LENGTH],
        }
    }

    /// Number of grid samples per move
    #[inline]
    pub fn substeps(&self) -> u32 {
        ((self.speed * 10.0).round() as u32).max(1)
    }

    /// Advance one tick
    pub fn update(&mut self, arena: &Arena) {
        if !self.body.active {
            return;
        }

        let from = self.body.pos;
        let to = from + self.direction * self.speed;
        if to.x.abs() > BULLET_BOUND || to.z.abs() > BULLET_BOUND {
            self.body.active = false;
            return;
        }

        if let Some(hit) = segment_hits_wall(arena, from, to, self.substeps()) {
            self.body.pos = hit;
            self.body.active = false;
            return;
        }

        self.body.pos = to;
        self.record_trail();
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.body.active = false;
        }
    }

    fn record_trail(&mut self) {
        self.trail.insert(0, self.body.pos);
        self.trail.truncate(BULLET_TRAIL_LENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::TileKind;

    fn shot(origin: Vec3, direction: Vec3, speed: f32) -> Shot {
        Shot {
            origin,
            direction,
            speed,
        }
    }

    #[test]
    fn test_moves_and_ages() {
        let arena = Arena::empty();
        let mut bullet = Bullet::new(1, shot(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 0.5), BulletOwner::Player);
        bullet.update(&arena);
        assert!(bullet.body.active);
        assert!((bullet.body.pos.x - 0.5).abs() < 1e-6);
        assert_eq!(bullet.lifetime, BULLET_LIFETIME - 1);
        assert_eq!(bullet.trail.len(), BULLET_TRAIL_LENGTH);
        assert_eq!(bullet.trail[0], bullet.body.pos);
    }

    #[test]
    fn test_expires_at_zero_lifetime() {
        let arena = Arena::empty();
        let mut bullet = Bullet::new(1, shot(Vec3::ZERO, Vec3::Z, 0.001), BulletOwner::Enemy);
        bullet.lifetime = 2;
        bullet.update(&arena);
        assert!(bullet.body.active);
        bullet.update(&arena);
        assert!(!bullet.body.active);
        assert_eq!(bullet.lifetime, 0);
    }

    #[test]
    fn test_culled_beyond_bound_without_moving() {
        let arena = Arena::empty();
        let start = Vec3::new(9.7, 1.0, 0.0);
        let mut bullet = Bullet::new(1, shot(start, Vec3::X, 0.5), BulletOwner::Player);
        bullet.update(&arena);
        assert!(!bullet.body.active);
        assert_eq!(bullet.body.pos, start);
        assert_eq!(bullet.lifetime, BULLET_LIFETIME);
    }

    #[test]
    fn test_stopped_by_wall() {
        let mut arena = Arena::empty();
        // World x in [1, 2)
        arena.set_tile(12, 11, TileKind::Wall, 2.0);
        let mut bullet = Bullet::new(1, shot(Vec3::new(0.8, 1.0, 0.5), Vec3::X, 0.5), BulletOwner::Player);
        bullet.update(&arena);
        assert!(!bullet.body.active);
        assert!(bullet.body.pos.x >= 1.0 && bullet.body.pos.x < 1.3 + 1e-5);
    }

    #[test]
    fn test_hazard_does_not_stop() {
        let mut arena = Arena::empty();
        arena.fill(TileKind::Hazard);
        let mut bullet = Bullet::new(1, shot(Vec3::ZERO, Vec3::X, 0.5), BulletOwner::Player);
        bullet.update(&arena);
        assert!(bullet.body.active);
    }

    #[test]
    fn test_substeps() {
        let arena_bullet = |speed| Bullet::new(0, shot(Vec3::ZERO, Vec3::X, speed), BulletOwner::Enemy);
        assert_eq!(arena_bullet(PLAYER_BULLET_SPEED).substeps(), 5);
        assert_eq!(arena_bullet(SNIPER_BULLET_SPEED).substeps(), 1);
        assert_eq!(arena_bullet(BOSS_BULLET_SPEED).substeps(), 1);
        assert_eq!(arena_bullet(0.01).substeps(), 1);
    }
}
