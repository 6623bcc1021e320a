/// Player AABB and its overlap test against the voxel world
use crate::voxel::{voxel_containing, VoxelCoord};
use crate::world::World;
use glam::{IVec3, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Body volume for an eye at `eye`: `half_width` on X/Z, `height` tall,
    /// feet `eye_offset` below the eye.
    pub fn around_eye(eye: Vec3, half_width: f32, height: f32, eye_offset: f32) -> Self {
        let feet = eye.y - eye_offset;
        Self {
            min: Vec3::new(eye.x - half_width, feet, eye.z - half_width),
            max: Vec3::new(eye.x + half_width, feet + height, eye.z + half_width),
        }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Integer voxel range touched by the box, inclusive on both ends.
    pub fn voxel_range(&self) -> (IVec3, IVec3) {
        (voxel_containing(self.min), voxel_containing(self.max))
    }
}

/// Occupied voxels whose unit cube overlaps `aabb`, in (x, y, z) order.
pub fn overlapping_voxels(world: &World, aabb: &Aabb) -> Vec<VoxelCoord> {
    let (lo, hi) = aabb.voxel_range();
    let mut hits = Vec::new();
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                let pos = IVec3::new(x, y, z);
                if world.contains(pos) {
                    hits.push(pos);
                }
            }
        }
    }
    hits
}
