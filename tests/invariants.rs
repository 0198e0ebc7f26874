//! Property tests over random seeds and input sequences

use std::collections::HashMap;

use grid_arena::consts::*;
use grid_arena::sim::{Arena, EnemyKind, GamePhase, GameState, Rules, TickInput, TileKind, tick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn tick_input() -> impl Strategy<Value = TickInput> {
    (
        -1.0f32..=1.0,
        -1.0f32..=1.0,
        -10.0f32..=10.0,
        -5.0f32..=5.0,
        any::<bool>(),
        any::<bool>(),
        prop::bool::weighted(0.05),
    )
        .prop_map(|(move_forward, move_right, look_yaw, look_pitch, jump, fire, toggle_camera)| TickInput {
            move_forward,
            move_right,
            look_yaw,
            look_pitch,
            jump,
            fire,
            toggle_camera,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn tick_invariants_hold(
        seed in any::<u64>(),
        player_bullets in any::<bool>(),
        inputs in prop::collection::vec(tick_input(), 1..400),
    ) {
        let mut state = GameState::with_rules(seed, Rules { player_bullets });

        for input in &inputs {
            let was_playing = state.phase == GamePhase::Playing;
            let score_before = state.score;
            let lifetimes: HashMap<u32, u32> = state
                .player_bullets
                .iter()
                .chain(&state.enemy_bullets)
                .filter(|b| b.body.active)
                .map(|b| (b.id, b.lifetime))
                .collect();

            tick(&mut state, input);

            let player = &state.player;
            prop_assert!(player.health >= 0.0 && player.health <= player.max_health);
            prop_assert!(player.energy >= 0.0 && player.energy <= player.max_energy);

            if was_playing {
                prop_assert!(state.score >= score_before);
                for bullet in state.player_bullets.iter().chain(&state.enemy_bullets) {
                    if !bullet.body.active {
                        continue;
                    }
                    let expected = lifetimes.get(&bullet.id).map_or(BULLET_LIFETIME, |l| *l) - 1;
                    prop_assert_eq!(bullet.lifetime, expected);
                }
            }

            for enemy in &state.enemies {
                prop_assert_eq!(enemy.body.active, enemy.health > 0);
            }
            if !player_bullets {
                prop_assert!(state.player_bullets.is_empty());
            }
            let bosses = state
                .enemies
                .iter()
                .filter(|e| e.body.active && e.kind() == EnemyKind::Boss)
                .count();
            prop_assert!(bosses <= 1);
        }
    }

    #[test]
    fn tile_queries_are_stable(seed in any::<u64>(), x in -15.0f32..15.0, z in -15.0f32..15.0) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = Arena::generate_new(&mut rng);
        let kind = arena.tile_at(x, z);
        prop_assert_eq!(arena.tile_at(x, z), kind);
        prop_assert_eq!(arena.height_at(x, z), arena.height_at(x, z));

        let half = ARENA_SIZE as f32 / 2.0;
        if x < -half || x >= half || z < -half || z >= half {
            prop_assert_eq!(arena.cell_of(x, z), None);
        }
        if arena.cell_of(x, z).is_none() {
            prop_assert_eq!(kind, TileKind::Floor);
            prop_assert_eq!(arena.height_at(x, z), 0.0);
        }
    }
}
