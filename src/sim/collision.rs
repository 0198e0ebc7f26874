//! Collision queries against the tile grid and between entities
//!
//! Movers approximate their footprint as an axis-aligned box and sample the four
//! corners plus the center against the grid. Any sample on a Wall blocks.

use glam::Vec3;

use super::arena::{Arena, TileKind};

/// Whether a box of half-width `half` centered at `pos` touches a Wall, or its
/// center lies outside `±bound` on either horizontal axis
pub fn box_hits_wall(arena: &Arena, pos: Vec3, half: f32, bound: f32) -> bool {
    if pos.x.abs() > bound || pos.z.abs() > bound {
        return true;
    }

    let samples = [
        (pos.x - half, pos.z - half),
        (pos.x - half, pos.z + half),
        (pos.x + half, pos.z - half),
        (pos.x + half, pos.z + half),
        (pos.x, pos.z),
    ];
    samples
        .iter()
        .any(|&(x, z)| arena.tile_at(x, z) == TileKind::Wall)
}

/// First Wall sample along the segment `from -> to`, using `steps` evenly spaced
/// samples (the start point is not sampled)
pub fn segment_hits_wall(arena: &Arena, from: Vec3, to: Vec3, steps: u32) -> Option<Vec3> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|step| from.lerp(to, step as f32 / steps as f32))
        .find(|p| arena.tile_at(p.x, p.z) == TileKind::Wall)
}

/// Center-to-center proximity test
#[inline]
pub fn within(a: Vec3, b: Vec3, range: f32) -> bool {
    (a - b).length() < range
}
