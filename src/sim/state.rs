//! Game state and core simulation types
//!
//! Everything a frontend reads lives here. Frontends only ever get `&GameState`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::bullet::{Bullet, BulletOwner, Shot};
use super::enemy::Enemy;
use super::player::Player;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health reached zero
    GameOver,
    /// Score reached the win threshold
    Victory,
}

impl GamePhase {
    /// Terminal phases only accept a reset
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Positional record shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec3,
    pub radius: f32,
    /// Cleared to delete; the container is compacted at the end of the tick
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec3, radius: f32) -> Self {
        Self {
            pos,
            radius,
            active: true,
        }
    }

    #[inline]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (self.pos - point).length()
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Crystal,
    PowerCore,
}

impl CollectibleKind {
    pub fn score(self) -> u64 {
        match self {
            CollectibleKind::Crystal => CRYSTAL_SCORE,
            CollectibleKind::PowerCore => POWER_CORE_SCORE,
        }
    }
}

/// A score pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub body: Body,
    pub kind: CollectibleKind,
    /// Spin angle in degrees (visual only)
    pub spin: f32,
    /// Bobbing phase (visual only)
    pub bob: f32,
}

impl Collectible {
    pub fn new(id: u32, pos: Vec3, kind: CollectibleKind) -> Self {
        Self {
            id,
            body: Body::new(pos, COLLECTIBLE_SIZE),
            kind,
            spin: 0.0,
            bob: 0.0,
        }
    }

    pub fn animate(&mut self) {
        self.spin = (self.spin + 2.5) % 360.0;
        self.bob += 0.12;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Shield,
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Speed, PowerUpKind::Shield, PowerUpKind::RapidFire];

    /// Buff duration in ticks
    pub fn duration(self) -> u32 {
        match self {
            PowerUpKind::Speed => SPEED_BOOST_TICKS,
            PowerUpKind::Shield => SHIELD_TICKS,
            PowerUpKind::RapidFire => RAPID_FIRE_TICKS,
        }
    }
}

/// A buff pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub body: Body,
    pub kind: PowerUpKind,
    pub spin: f32,
    pub bob: f32,
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(id: u32, pos: Vec3, kind: PowerUpKind) -> Self {
        Self {
            id,
            body: Body::new(pos, POWER_UP_SIZE),
            kind,
            spin: 0.0,
            bob: 0.0,
            pulse: 0.0,
        }
    }

    pub fn animate(&mut self) {
        self.spin = (self.spin + 1.8) % 360.0;
        self.bob += 0.1;
        self.pulse += 0.15;
    }
}

/// Camera view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    Overhead,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::FirstPerson => CameraMode::Overhead,
            CameraMode::Overhead => CameraMode::FirstPerson,
        }
    }
}

/// Look angles (degrees). The current angles chase the targets each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub mode: CameraMode,
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
}

impl Camera {
    /// Apply look increments to the targets
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.target_yaw += yaw_delta;
        self.target_pitch = (self.target_pitch + pitch_delta).clamp(-CAMERA_MAX_PITCH, CAMERA_MAX_PITCH);
    }

    /// Ease the current angles toward the targets
    pub fn smooth(&mut self) {
        self.pitch += (self.target_pitch - self.pitch) * CAMERA_SMOOTHING;
        self.yaw += (self.target_yaw - self.yaw) * CAMERA_SMOOTHING;

        // Keep the target within half a turn so the camera takes the short way round
        let diff = self.target_yaw - self.yaw;
        if diff > 180.0 {
            self.target_yaw -= 360.0;
        } else if diff < -180.0 {
            self.target_yaw += 360.0;
        }
    }
}

/// Behavior switches that are a product decision rather than content
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rules {
    /// Whether the player's fire action puts its bullet into the world
    pub player_bullets: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            player_bullets: true,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Single shared random stream
    pub rng: Pcg32,
    pub rules: Rules,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score of this process, carried across resets
    pub high_score: u64,
    /// Simulation tick counter (all gameplay timing derives from this)
    pub time_ticks: u64,
    /// Cosmetic clock for sky and pulsing (never read by gameplay)
    pub visual_time: f32,
    pub arena: Arena,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub boss_active: bool,
    /// Total enemies requested from the spawn director this run
    pub enemies_spawned: u32,
    pub camera: Camera,
    /// Cosmetic fog toggle
    pub fog: bool,
    next_id: u32,
}

/// Starting populations after a reset
pub const START_COLLECTIBLES: usize = 5;
pub const START_ENEMIES: usize = 4;

impl GameState {
    /// Create a new game with the given seed and default rules
    pub fn new(seed: u64) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u64, rules: Rules) -> Self {
        let mut state = Self::bare(seed, rules);
        state.reset();
        state
    }

    /// A Playing state with an all-Floor arena and no entities besides the player
    pub fn bare(seed: u64, rules: Rules) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            phase: GamePhase::Playing,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            visual_time: 0.0,
            arena: Arena::empty(),
            player: Player::new(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            boss_active: false,
            enemies_spawned: 0,
            camera: Camera::default(),
            fog: true,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run: regenerate the arena and spawn the starting populations
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.player.reset();
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.collectibles.clear();
        self.power_ups.clear();
        self.boss_active = false;
        self.enemies_spawned = 0;
        self.camera = Camera {
            mode: CameraMode::FirstPerson,
            ..Camera::default()
        };
        self.visual_time = 0.0;
        self.arena.generate(&mut self.rng);

        self.spawn_collectibles(START_COLLECTIBLES);
        self.spawn_enemies(START_ENEMIES);

        log::info!(
            "New run: {} enemies, {} collectibles (high score {})",
            self.enemies.len(),
            self.collectibles.len(),
            self.high_score
        );
    }

    /// Turn a fired shot into a live bullet
    pub fn spawn_bullet(&mut self, shot: Shot, owner: BulletOwner) {
        let id = self.next_entity_id();
        let bullet = Bullet::new(id, shot, owner);
        match owner {
            BulletOwner::Player => self.player_bullets.push(bullet),
            BulletOwner::Enemy => self.enemy_bullets.push(bullet),
        }
    }

    /// Drop every deactivated entity from its container
    pub fn compact(&mut self) {
        self.player_bullets.retain(|b| b.body.active);
        self.enemy_bullets.retain(|b| b.body.active);
        self.enemies.retain(|e| e.body.active);
        self.collectibles.retain(|c| c.body.active);
        self.power_ups.retain(|p| p.body.active);
    }
}
