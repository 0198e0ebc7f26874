//! Combat resolution
//!
//! Runs once per tick after everything has moved. Interactions are plain
//! center-distance tests, resolved in a fixed order.

use serde::{Deserialize, Serialize};

use super::collision::within;
use super::enemy::EnemyKind;
use super::state::{CollectibleKind, GameState, PowerUpKind};
use crate::consts::*;

/// Something that happened during combat resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An enemy touched the player
    Contact { enemy_id: u32, damage: f32 },
    /// An enemy bullet hit the player
    PlayerHit { bullet_id: u32, damage: f32 },
    /// A player bullet hit an enemy that survived
    EnemyHit { enemy_id: u32, bullet_id: u32 },
    /// A player bullet killed an enemy
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        score: u64,
        dropped_power_up: bool,
    },
    Collected {
        id: u32,
        kind: CollectibleKind,
        score: u64,
    },
    /// The pickup is consumed either way; `activated` reports the energy check
    PowerUpTaken {
        id: u32,
        kind: PowerUpKind,
        activated: bool,
    },
}

/// Resolve every interaction for this tick
pub fn resolve_combat(state: &mut GameState) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    enemy_contact(state, &mut events);
    enemy_bullets_vs_player(state, &mut events);
    player_bullets_vs_enemies(state, &mut events);
    collect_items(state, &mut events);
    collect_power_ups(state, &mut events);

    for event in &events {
        log::debug!("{:?}", event);
    }
    events
}

fn enemy_contact(state: &mut GameState, events: &mut Vec<CombatEvent>) {
    let player_pos = state.player.pos();
    for enemy in &state.enemies {
        if enemy.body.active
            && within(enemy.body.pos, player_pos, CONTACT_RANGE)
            && state.player.damage_cooldown == 0
        {
            let damage = enemy.kind().contact_damage();
            state.player.take_damage(damage);
            state.player.damage_cooldown = CONTACT_COOLDOWN;
            events.push(CombatEvent::Contact {
                enemy_id: enemy.id,
                damage,
            });
        }
    }
}

fn enemy_bullets_vs_player(state: &mut GameState, events: &mut Vec<CombatEvent>) {
    let player_pos = state.player.pos();
    for bullet in &mut state.enemy_bullets {
        if bullet.body.active && within(bullet.body.pos, player_pos, ENEMY_BULLET_HIT_RANGE) {
            state.player.take_damage(ENEMY_BULLET_DAMAGE);
            bullet.body.active = false;
            events.push(CombatEvent::PlayerHit {
                bullet_id: bullet.id,
                damage: ENEMY_BULLET_DAMAGE,
            });
        }
    }
}

fn player_bullets_vs_enemies(state: &mut GameState, events: &mut Vec<CombatEvent>) {
    for bi in 0..state.player_bullets.len() {
        if !state.player_bullets[bi].body.active {
            continue;
        }
        let bullet_pos = state.player_bullets[bi].body.pos;
        let bullet_id = state.player_bullets[bi].id;

        let target = state
            .enemies
            .iter()
            .position(|e| e.body.active && within(bullet_pos, e.body.pos, PLAYER_BULLET_HIT_RANGE));
        let Some(ei) = target else {
            continue;
        };

        state.player_bullets[bi].body.active = false;
        let enemy = &mut state.enemies[ei];
        let enemy_id = enemy.id;
        let kind = enemy.kind();
        if !enemy.take_damage() {
            events.push(CombatEvent::EnemyHit { enemy_id, bullet_id });
            continue;
        }

        let score = kind.kill_score();
        state.score += score;
        if kind == EnemyKind::Boss {
            state.boss_active = false;
            log::info!("Boss defeated, score {}", state.score);
        }
        let dropped_power_up = state.roll_power_up_drop();
        events.push(CombatEvent::EnemyKilled {
            enemy_id,
            kind,
            score,
            dropped_power_up,
        });
    }
}

fn collect_items(state: &mut GameState, events: &mut Vec<CombatEvent>) {
    let player_pos = state.player.pos();
    for item in &mut state.collectibles {
        if item.body.active && within(item.body.pos, player_pos, PICKUP_RANGE) {
            item.body.active = false;
            let score = item.kind.score();
            state.score += score;
            events.push(CombatEvent::Collected {
                id: item.id,
                kind: item.kind,
                score,
            });
        }
    }
}

fn collect_power_ups(state: &mut GameState, events: &mut Vec<CombatEvent>) {
    let player_pos = state.player.pos();
    for power_up in &mut state.power_ups {
        if power_up.body.active && within(power_up.body.pos, player_pos, PICKUP_RANGE) {
            let activated = state.player.use_power_up(power_up.kind);
            power_up.body.active = false;
            events.push(CombatEvent::PowerUpTaken {
                id: power_up.id,
                kind: power_up.kind,
                activated,
            });
        }
    }
}
