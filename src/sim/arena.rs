//! Tile arena: a square grid of Floor/Wall/Hazard cells centered on the origin
//!
//! World coordinates map to cells with `cell = floor(world + SIZE/2)`. Anything
//! outside the grid reads as a virtual Floor tile of height 0.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Floor,
    /// Blocks movement and bullets at any height
    Wall,
    /// Damages the player; blocks nothing
    Hazard,
}

/// A single grid cell
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Only meaningful for walls
    pub height: f32,
}

/// The arena grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    size: usize,
    tiles: Vec<Tile>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::empty()
    }
}

impl Arena {
    /// An all-Floor arena
    pub fn empty() -> Self {
        Self {
            size: ARENA_SIZE,
            tiles: vec![Tile::default(); ARENA_SIZE * ARENA_SIZE],
        }
    }

    /// Create and procedurally generate an arena
    pub fn generate_new<R: Rng>(rng: &mut R) -> Self {
        let mut arena = Self::empty();
        arena.generate(rng);
        arena
    }

    /// Grid side length in cells
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half the arena extent in world units
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size as f32 / 2.0
    }

    /// Regenerate every tile in place. The safe zone around the origin is always Floor.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        let half = (self.size / 2) as i32;
        for cx in 0..self.size {
            for cz in 0..self.size {
                let (ix, iz) = (cx as i32 - half, cz as i32 - half);
                let tile = if ix.abs() < SAFE_ZONE_HALF && iz.abs() < SAFE_ZONE_HALF {
                    Tile::default()
                } else {
                    let roll: f32 = rng.random();
                    if roll < WALL_CHANCE {
                        Tile {
                            kind: TileKind::Wall,
                            height: rng.random_range(WALL_MIN_HEIGHT..=WALL_MAX_HEIGHT),
                        }
                    } else if roll < HAZARD_CHANCE {
                        Tile {
                            kind: TileKind::Hazard,
                            height: 0.0,
                        }
                    } else {
                        Tile::default()
                    }
                };
                self.tiles[cx * self.size + cz] = tile;
            }
        }

        log::debug!(
            "Arena generated: {} walls, {} hazards",
            self.count(TileKind::Wall),
            self.count(TileKind::Hazard)
        );
    }

    /// Overwrite every tile with the given kind
    pub fn fill(&mut self, kind: TileKind) {
        let height = if kind == TileKind::Wall { WALL_MIN_HEIGHT } else { 0.0 };
        self.tiles.fill(Tile { kind, height });
    }

    /// Set a single cell by grid index. Out-of-range indices are ignored.
    pub fn set_tile(&mut self, cx: usize, cz: usize, kind: TileKind, height: f32) {
        if cx < self.size && cz < self.size {
            self.tiles[cx * self.size + cz] = Tile { kind, height };
        }
    }

    /// Grid index of a world coordinate, if it falls inside the arena
    #[inline]
    pub fn cell_of(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let half = self.half_extent();
        let cx = (x + half).floor();
        let cz = (z + half).floor();
        let size = self.size as f32;
        if cx >= 0.0 && cx < size && cz >= 0.0 && cz < size {
            Some((cx as usize, cz as usize))
        } else {
            None
        }
    }

    /// Cell by grid index
    #[inline]
    pub fn tile(&self, cx: usize, cz: usize) -> Option<&Tile> {
        if cx < self.size && cz < self.size {
            self.tiles.get(cx * self.size + cz)
        } else {
            None
        }
    }

    /// Tile type at a world position (Floor outside the grid)
    #[inline]
    pub fn tile_at(&self, x: f32, z: f32) -> TileKind {
        self.cell_of(x, z)
            .and_then(|(cx, cz)| self.tile(cx, cz))
            .map_or(TileKind::Floor, |t| t.kind)
    }

    /// Tile height at a world position (0 outside the grid)
    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.cell_of(x, z)
            .and_then(|(cx, cz)| self.tile(cx, cz))
            .map_or(0.0, |t| t.height)
    }

    /// Animate wall heights from the simulation tick counter
    pub fn animate(&mut self, time_ticks: u64) {
        let t = time_ticks as f32 * SIM_DT;
        for cx in 0..self.size {
            for cz in 0..self.size {
                let tile = &mut self.tiles[cx * self.size + cz];
                if tile.kind == TileKind::Wall {
                    let step = (cx + cz) % 3;
                    let base = WALL_MIN_HEIGHT + step as f32 * 0.5;
                    tile.height = base + (t * 0.8 + (cx + cz) as f32).sin() * 0.15;
                }
            }
        }
    }

    /// All cells with their grid indices, row-major (for rendering)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Tile)> {
        let size = self.size;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i / size, i % size, tile))
    }

    /// Wall cells with their current heights
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.cells()
            .filter(|(_, _, tile)| tile.kind == TileKind::Wall)
            .map(|(cx, cz, tile)| (cx, cz, tile.height))
    }

    /// Number of tiles of a kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_safe_zone_is_floor() {
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let arena = Arena::generate_new(&mut rng);
            for x in -3..=3 {
                for z in -3..=3 {
                    let (wx, wz) = (x as f32 + 0.5, z as f32 + 0.5);
                    assert_eq!(arena.tile_at(wx, wz), TileKind::Floor);
                }
            }
        }
    }

    #[test]
    fn test_generation_mix() {
        let mut rng = Pcg32::seed_from_u64(7);
        let arena = Arena::generate_new(&mut rng);
        let walls = arena.count(TileKind::Wall);
        let hazards = arena.count(TileKind::Hazard);
        // 484 cells minus the 49-cell safe zone: expect roughly 65 walls and 22 hazards
        assert!(walls > 20 && walls < 130, "walls = {walls}");
        assert!(hazards > 3 && hazards < 60, "hazards = {hazards}");
        for (_, _, tile) in arena.cells() {
            if tile.kind == TileKind::Wall {
                assert!((WALL_MIN_HEIGHT..=WALL_MAX_HEIGHT).contains(&tile.height));
            }
        }
    }

    #[test]
    fn test_world_to_cell_mapping() {
        let arena = Arena::empty();
        assert_eq!(arena.cell_of(0.0, 0.0), Some((11, 11)));
        assert_eq!(arena.cell_of(-0.01, 0.0), Some((10, 11)));
        assert_eq!(arena.cell_of(-11.0, 10.99), Some((0, 21)));
        assert_eq!(arena.cell_of(11.0, 0.0), None);
        assert_eq!(arena.cell_of(0.0, -11.5), None);
    }

    #[test]
    fn test_out_of_range_reads_floor() {
        let mut arena = Arena::empty();
        arena.fill(TileKind::Wall);
        assert_eq!(arena.tile_at(50.0, 0.0), TileKind::Floor);
        assert_eq!(arena.height_at(0.0, -50.0), 0.0);
        assert_eq!(arena.tile_at(0.0, 0.0), TileKind::Wall);
    }

    #[test]
    fn test_set_tile_and_query() {
        let mut arena = Arena::empty();
        arena.set_tile(13, 11, TileKind::Hazard, 0.0);
        assert_eq!(arena.tile_at(2.5, 0.5), TileKind::Hazard);
        assert_eq!(arena.tile_at(1.5, 0.5), TileKind::Floor);
        // Ignored silently
        arena.set_tile(99, 0, TileKind::Wall, 2.0);
        assert_eq!(arena.count(TileKind::Wall), 0);
    }

    #[test]
    fn test_animate_only_moves_walls() {
        let mut arena = Arena::empty();
        arena.set_tile(0, 0, TileKind::Wall, 2.0);
        arena.set_tile(0, 1, TileKind::Hazard, 0.0);
        arena.animate(0);
        let wall = arena.tile(0, 0).map(|t| t.height).unwrap_or_default();
        assert!((wall - WALL_MIN_HEIGHT).abs() < 1e-5);
        arena.animate(90);
        let wall = arena.tile(0, 0).map(|t| t.height).unwrap_or_default();
        assert!((wall - WALL_MIN_HEIGHT).abs() <= 0.15 + 1e-5);
        assert_eq!(arena.tile(0, 1).map(|t| t.height), Some(0.0));
        assert_eq!(arena.tile(0, 0).map(|t| t.kind), Some(TileKind::Wall));
    }

    #[test]
    fn test_walls_lists_only_walls() {
        let mut arena = Arena::empty();
        assert_eq!(arena.walls().count(), 0);
        arena.set_tile(3, 5, TileKind::Wall, 2.5);
        arena.set_tile(7, 1, TileKind::Wall, 1.5);
        arena.set_tile(4, 4, TileKind::Hazard, 0.0);

        let walls: Vec<_> = arena.walls().collect();
        assert_eq!(walls, vec![(3, 5, 2.5), (7, 1, 1.5)]);

        let mut rng = Pcg32::seed_from_u64(8);
        arena.generate(&mut rng);
        assert_eq!(arena.walls().count(), arena.count(TileKind::Wall));
    }
}
