/// Procedural terrain: a 2D Perlin height field extruded into voxel columns
pub mod noise;

pub use noise::Perlin2;

use crate::voxel::BlockType;
use crate::world::{World, WorldConfig};
use glam::IVec3;
use rayon::prelude::*;

/// Surface height of one (x, z) column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub x: i32,
    pub z: i32,
    pub height: i32,
}

pub struct TerrainGenerator {
    config: WorldConfig,
    noise: Perlin2,
}

impl TerrainGenerator {
    pub fn new(config: WorldConfig) -> Self {
        let noise = Perlin2::new(config.seed);
        Self { config, noise }
    }

    /// Surface height at (x, z): base + noise mapped from [-1, 1] to
    /// [0, height_variation].
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let scale = self.config.noise_scale;
        let n = self
            .noise
            .get(x as f64 * scale, z as f64 * scale)
            .clamp(-1.0, 1.0);
        let lifted = (n + 1.0) * 0.5 * self.config.height_variation as f64;
        self.config.base_height + lifted.floor() as i32
    }

    /// Column heights for the whole grid, centred on the origin, in x-major
    /// order. Sampled in parallel; the ordering does not depend on threads.
    pub fn height_field(&self) -> Vec<Column> {
        let width = self.config.width as i32;
        let depth = self.config.depth as i32;
        let x0 = -width / 2;
        let z0 = -depth / 2;

        (0..width * depth)
            .into_par_iter()
            .map(|i| {
                let x = x0 + i / depth;
                let z = z0 + i % depth;
                Column {
                    x,
                    z,
                    height: self.column_height(x, z),
                }
            })
            .collect()
    }

    /// Fill `world` with stone up to h-2, dirt at h-1 and grass at h.
    pub fn populate(&self, world: &mut World) {
        crate::perf_scope!("terrain generation");
        for column in self.height_field() {
            let h = column.height;
            for y in 0..=h {
                let block = if y == h {
                    BlockType::Grass
                } else if y == h - 1 {
                    BlockType::Dirt
                } else {
                    BlockType::Stone
                };
                world.insert(IVec3::new(column.x, y, column.z), block);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> WorldConfig {
        WorldConfig {
            width: 16,
            depth: 16,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn heights_stay_within_configured_band() {
        let config = small_config(5);
        let gen = TerrainGenerator::new(config.clone());
        let max = config.base_height + config.height_variation as i32;
        for column in gen.height_field() {
            assert!(column.height >= config.base_height && column.height <= max);
        }
    }

    #[test]
    fn height_field_covers_centred_grid() {
        let gen = TerrainGenerator::new(small_config(5));
        let field = gen.height_field();
        assert_eq!(field.len(), 256);
        assert_eq!((field[0].x, field[0].z), (-8, -8));
        assert_eq!((field[255].x, field[255].z), (7, 7));
    }

    #[test]
    fn columns_are_layered_grass_dirt_stone() {
        let gen = TerrainGenerator::new(small_config(11));
        let mut world = World::new();
        gen.populate(&mut world);

        for column in gen.height_field() {
            let at = |y| world.get(IVec3::new(column.x, y, column.z));
            let h = column.height;
            assert_eq!(at(h), Some(BlockType::Grass));
            assert_eq!(at(h + 1), None);
            assert_eq!(at(h - 1), Some(BlockType::Dirt));
            for y in 0..h - 1 {
                assert_eq!(at(y), Some(BlockType::Stone));
            }
            assert_eq!(at(-1), None);
        }
    }

    #[test]
    fn short_columns_degrade_gracefully() {
        let config = WorldConfig {
            width: 4,
            depth: 4,
            base_height: 0,
            height_variation: 0,
            ..Default::default()
        };
        let world = World::generate(&config);
        assert_eq!(world.len(), 16);
        assert!(world.iter().all(|(pos, b)| pos.y == 0 && b == BlockType::Grass));
    }
}
