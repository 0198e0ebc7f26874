//! Enemy AI
//!
//! Three behaviors share one `Enemy` record and are dispatched on the `Behavior`
//! tag:
//! - Hunter: chases the player, speeding up as its alert level builds. Never fires.
//! - Sniper: keeps a comfortable distance band and fires accurate, slow shots.
//! - Boss: creeps forward on a timer and fires faster, wider shots.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::bullet::Shot;
use super::collision::box_hits_wall;
use super::state::Body;
use crate::consts::*;
use crate::yaw_of;

/// Enemy variant without its transient state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Hunter,
    Sniper,
    Boss,
}

impl EnemyKind {
    pub fn max_health(self) -> i32 {
        match self {
            EnemyKind::Boss => BOSS_HEALTH,
            _ => ENEMY_HEALTH,
        }
    }

    pub fn kill_score(self) -> u64 {
        match self {
            EnemyKind::Boss => BOSS_KILL_SCORE,
            _ => ENEMY_KILL_SCORE,
        }
    }

    pub fn contact_damage(self) -> f32 {
        match self {
            EnemyKind::Boss => BOSS_CONTACT_DAMAGE,
            _ => CONTACT_DAMAGE,
        }
    }
}

/// Variant-specific AI state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Hunter {
        /// Aggression built up while the player is close (0..=120)
        alert: f32,
    },
    Sniper,
    Boss {
        move_timer: u32,
    },
}

impl Behavior {
    pub fn fresh(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Hunter => Behavior::Hunter { alert: 0.0 },
            EnemyKind::Sniper => Behavior::Sniper,
            EnemyKind::Boss => Behavior::Boss { move_timer: 0 },
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Hunter { .. } => EnemyKind::Hunter,
            Behavior::Sniper => EnemyKind::Sniper,
            Behavior::Boss { .. } => EnemyKind::Boss,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    /// Facing yaw in degrees
    pub facing: f32,
    pub behavior: Behavior,
    pub health: i32,
    pub max_health: i32,
    /// Ticks since the last shot
    pub since_shot: u32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec3, kind: EnemyKind) -> Self {
        let health = kind.max_health();
        Self {
            id,
            body: Body::new(pos, ENEMY_SIZE),
            facing: 0.0,
            behavior: Behavior::fresh(kind),
            health,
            max_health: health,
            since_shot: 0,
        }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    /// Advance the AI one tick
    pub fn update(&mut self, player_pos: Vec3, arena: &Arena) {
        if !self.body.active {
            return;
        }

        let to_player = player_pos - self.body.pos;
        let distance = to_player.length();
        // Movement stays on the ground plane even while the player is airborne
        let toward = Vec3::new(to_player.x, 0.0, to_player.z).normalize_or_zero();

        match &mut self.behavior {
            Behavior::Hunter { alert } => {
                if distance > HUNTER_ENGAGE_RADIUS {
                    let mut speed = HUNTER_SPEED;
                    if distance < HUNTER_DETECT_RADIUS {
                        *alert = (*alert + HUNTER_ALERT_STEP).min(HUNTER_MAX_ALERT);
                        speed *= 1.0 + *alert * HUNTER_ALERT_SPEEDUP;
                    }
                    if step(&mut self.body, toward * speed, arena) {
                        self.facing = yaw_of(toward);
                    }
                }
            }
            Behavior::Sniper => {
                self.since_shot += 1;
                self.facing = yaw_of(toward);
                if distance < SNIPER_MIN_RANGE {
                    step(&mut self.body, -toward * SNIPER_RETREAT_SPEED, arena);
                } else if distance > SNIPER_MAX_RANGE {
                    step(&mut self.body, toward * SNIPER_APPROACH_SPEED, arena);
                }
            }
            Behavior::Boss { move_timer } => {
                self.facing = yaw_of(toward);
                *move_timer += 1;
                if *move_timer % BOSS_MOVE_INTERVAL == 0 && distance > BOSS_MIN_RANGE {
                    step(&mut self.body, toward * BOSS_SPEED, arena);
                }
                self.since_shot += 1;
            }
        }
    }

    /// Fire at the player if this variant shoots and its cooldown has elapsed
    pub fn shoot<R: Rng>(&mut self, player_pos: Vec3, rng: &mut R) -> Option<Shot> {
        let (spread, speed) = match self.kind() {
            EnemyKind::Hunter => return None,
            EnemyKind::Sniper => (SNIPER_SPREAD, SNIPER_BULLET_SPEED),
            EnemyKind::Boss => (BOSS_SPREAD, BOSS_BULLET_SPEED),
        };
        if !self.body.active || self.since_shot < ENEMY_SHOOT_COOLDOWN {
            return None;
        }
        self.since_shot = 0;

        let mut direction = (player_pos - self.body.pos).normalize_or_zero();
        direction.x += (rng.random::<f32>() - 0.5) * spread;
        direction.z += (rng.random::<f32>() - 0.5) * spread;

        Some(Shot {
            origin: self.body.pos + Vec3::new(0.0, ENEMY_MUZZLE_HEIGHT, 0.0),
            direction: direction.normalize_or_zero(),
            speed,
        })
    }

    /// Take one hit. Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self) -> bool {
        if !self.body.active {
            return false;
        }
        self.health -= 1;
        if self.health <= 0 {
            self.body.active = false;
            return true;
        }
        false
    }
}

/// Move a body by `delta` unless the destination is blocked. Returns whether it moved.
fn step(body: &mut Body, delta: Vec3, arena: &Arena) -> bool {
    let target = body.pos + delta;
    if box_hits_wall(arena, target, body.radius / 2.0, ENEMY_BOUND) {
        return false;
    }
    body.pos = target;
    true
}
