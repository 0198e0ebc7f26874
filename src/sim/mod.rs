//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each container)
//! - No rendering or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod bullet;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, Tile, TileKind};
pub use bullet::{Bullet, BulletOwner, Shot};
pub use collision::{box_hits_wall, segment_hits_wall, within};
pub use combat::{CombatEvent, resolve_combat};
pub use enemy::{Behavior, Enemy, EnemyKind};
pub use player::Player;
pub use state::{
    Body, Camera, CameraMode, Collectible, CollectibleKind, GamePhase, GameState, PowerUp, PowerUpKind, Rules,
};
pub use tick::{TickInput, tick};
