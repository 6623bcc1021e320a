/// Sparse voxel world
/// Hash-keyed map from integer voxel coordinate to block type; absent keys
/// are empty space. Generated once at startup and read-only afterwards.
use crate::terrain::TerrainGenerator;
use crate::voxel::{BlockType, VoxelCoord};
use glam::IVec3;
use std::collections::HashMap;

/// World generation parameters
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Number of columns along X
    pub width: u32,
    /// Number of columns along Z
    pub depth: u32,
    /// Height added to every column before the noise term
    pub base_height: i32,
    /// Noise contributes a value in [0, height_variation]
    pub height_variation: u32,
    /// World units -> noise units
    pub noise_scale: f64,
    /// Seed for the noise permutation table
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 48,
            depth: 48,
            base_height: 4,
            height_variation: 8,
            noise_scale: 0.08,
            seed: 12345,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct World {
    blocks: HashMap<VoxelCoord, BlockType>,
    /// Inclusive y range of occupied voxels, for column scans
    y_range: Option<(i32, i32)>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate terrain for the configured column grid.
    pub fn generate(config: &WorldConfig) -> Self {
        let mut world = Self::new();
        TerrainGenerator::new(config.clone()).populate(&mut world);
        log::info!(
            "generated {}x{} columns, {} voxels (seed {})",
            config.width,
            config.depth,
            world.len(),
            config.seed
        );
        world
    }

    pub fn from_blocks<I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = (VoxelCoord, BlockType)>,
    {
        let mut world = Self::new();
        for (pos, block) in blocks {
            world.insert(pos, block);
        }
        world
    }

    /// Insert or replace the block at `pos`.
    pub fn insert(&mut self, pos: VoxelCoord, block: BlockType) -> Option<BlockType> {
        self.y_range = Some(match self.y_range {
            Some((lo, hi)) => (lo.min(pos.y), hi.max(pos.y)),
            None => (pos.y, pos.y),
        });
        self.blocks.insert(pos, block)
    }

    #[inline]
    pub fn get(&self, pos: VoxelCoord) -> Option<BlockType> {
        self.blocks.get(&pos).copied()
    }

    #[inline]
    pub fn contains(&self, pos: VoxelCoord) -> bool {
        self.blocks.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Unordered iteration over occupied voxels.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, BlockType)> + '_ {
        self.blocks.iter().map(|(pos, block)| (*pos, *block))
    }

    /// Occupied coordinates sorted by (x, y, z), for deterministic traversal.
    pub fn sorted_coords(&self) -> Vec<VoxelCoord> {
        let mut coords: Vec<VoxelCoord> = self.blocks.keys().copied().collect();
        coords.sort_unstable_by_key(|p| (p.x, p.y, p.z));
        coords
    }

    /// Highest occupied y in the (x, z) column.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        let (lo, hi) = self.y_range?;
        (lo..=hi).rev().find(|&y| self.contains(IVec3::new(x, y, z)))
    }
}
