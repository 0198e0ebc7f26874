//! Spawn director
//!
//! New entities are placed by rejection sampling: draw a point inside a region,
//! keep it if the tile is Floor (and, for enemies, far enough from the player),
//! otherwise re-roll until the attempt budget runs out. A spawn that runs out of
//! attempts is skipped.

use glam::Vec3;
use rand::Rng;

use super::arena::TileKind;
use super::enemy::{Enemy, EnemyKind};
use super::state::{Collectible, CollectibleKind, GameState, PowerUp, PowerUpKind};

/// Where and how hard to look for a spawn point
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Candidates are drawn from [-extent, extent] on both horizontal axes
    pub extent: f32,
    pub height: f32,
    pub attempts: u32,
    /// Minimum distance from the player (0 = unconstrained)
    pub min_player_distance: f32,
}

pub const COLLECTIBLE_PLACEMENT: Placement = Placement {
    extent: 9.0,
    height: 0.8,
    attempts: 40,
    min_player_distance: 0.0,
};

pub const ENEMY_PLACEMENT: Placement = Placement {
    extent: 8.5,
    height: 1.0,
    attempts: 40,
    min_player_distance: 6.0,
};

pub const BOSS_PLACEMENT: Placement = Placement {
    extent: 7.0,
    height: 1.5,
    attempts: 40,
    min_player_distance: 8.0,
};

pub const POWER_UP_PLACEMENT: Placement = Placement {
    extent: 8.0,
    height: 0.8,
    attempts: 25,
    min_player_distance: 0.0,
};

pub const HUNTER_WEIGHT: f32 = 0.75;
pub const POWER_CORE_CHANCE: f32 = 0.3;
pub const POWER_UP_DROP_CHANCE: f32 = 0.7;

/// A boss is due whenever the score sits on a multiple of this
pub const BOSS_SCORE_STEP: u64 = 100;
pub const BASE_ENEMY_TARGET: u64 = 3;
/// Score needed for each extra enemy in the target population
pub const SCORE_PER_EXTRA_ENEMY: u64 = 25;
pub const MAX_ENEMY_TARGET: u64 = 12;
pub const MIN_COLLECTIBLES: usize = 3;
pub const COLLECTIBLE_REFILL: usize = 2;

/// Enemy population the director tops up toward at a given score
pub fn enemy_target(score: u64) -> usize {
    (BASE_ENEMY_TARGET + score / SCORE_PER_EXTRA_ENEMY).min(MAX_ENEMY_TARGET) as usize
}

impl GameState {
    /// Rejection-sample a spawn point for `placement`
    pub fn find_spawn_point(&mut self, placement: Placement) -> Option<Vec3> {
        let player_pos = self.player.pos();
        for _ in 0..placement.attempts {
            let candidate = Vec3::new(
                self.rng.random_range(-placement.extent..=placement.extent),
                placement.height,
                self.rng.random_range(-placement.extent..=placement.extent),
            );
            let clear_of_player = placement.min_player_distance <= 0.0
                || (candidate - player_pos).length() > placement.min_player_distance;
            if clear_of_player && self.arena.tile_at(candidate.x, candidate.z) == TileKind::Floor {
                return Some(candidate);
            }
        }
        None
    }

    /// Place up to `count` crystals/power cores. Returns how many were placed.
    pub fn spawn_collectibles(&mut self, count: usize) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            let Some(pos) = self.find_spawn_point(COLLECTIBLE_PLACEMENT) else {
                log::debug!("Collectible spawn skipped: no free tile found");
                continue;
            };
            let kind = if self.rng.random::<f32>() < POWER_CORE_CHANCE {
                CollectibleKind::PowerCore
            } else {
                CollectibleKind::Crystal
            };
            let id = self.next_entity_id();
            self.collectibles.push(Collectible::new(id, pos, kind));
            placed += 1;
        }
        placed
    }

    /// Place up to `count` hunters/snipers. Returns how many were placed.
    pub fn spawn_enemies(&mut self, count: usize) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            let Some(pos) = self.find_spawn_point(ENEMY_PLACEMENT) else {
                log::debug!("Enemy spawn skipped: no free tile away from the player");
                continue;
            };
            let kind = if self.rng.random::<f32>() < HUNTER_WEIGHT {
                EnemyKind::Hunter
            } else {
                EnemyKind::Sniper
            };
            let id = self.next_entity_id();
            self.enemies.push(Enemy::new(id, pos, kind));
            placed += 1;
        }
        self.enemies_spawned += count as u32;
        placed
    }

    /// Place the boss unless one is already active. Returns whether it was placed.
    pub fn spawn_boss(&mut self) -> bool {
        if self.boss_active {
            return false;
        }
        let Some(pos) = self.find_spawn_point(BOSS_PLACEMENT) else {
            log::debug!("Boss spawn skipped: no free tile away from the player");
            return false;
        };
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, EnemyKind::Boss));
        self.boss_active = true;
        log::info!("Boss spawned at ({:.1}, {:.1}) with score {}", pos.x, pos.z, self.score);
        true
    }

    /// Roll for a power-up drop after a kill. Returns whether one was placed.
    pub fn roll_power_up_drop(&mut self) -> bool {
        if self.rng.random::<f32>() >= POWER_UP_DROP_CHANCE {
            return false;
        }
        let Some(pos) = self.find_spawn_point(POWER_UP_PLACEMENT) else {
            log::debug!("Power-up drop skipped: no free tile found");
            return false;
        };
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, pos, kind));
        true
    }

    /// Keep populations topped up for the current score
    pub fn maintain_population(&mut self) {
        if self.score >= BOSS_SCORE_STEP && self.score % BOSS_SCORE_STEP == 0 && !self.boss_active {
            self.spawn_boss();
        }

        if self.enemies.len() < enemy_target(self.score) && !self.boss_active {
            self.spawn_enemies(1);
        }

        if self.collectibles.len() < MIN_COLLECTIBLES {
            self.spawn_collectibles(COLLECTIBLE_REFILL);
        }
    }
}
