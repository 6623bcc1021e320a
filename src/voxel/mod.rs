/// Core voxel vocabulary shared by the world, mesher and collision code
pub mod block_type;

pub use block_type::{AtlasRegion, BlockType, FaceRegionTable, BLOCK_TYPE_COUNT};

use glam::{IVec3, Vec3};

/// Integer voxel coordinate. The voxel is the unit cube centred on this
/// point, spanning ±0.5 on each axis.
pub type VoxelCoord = IVec3;

/// The six axis-aligned faces of a voxel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceDir {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl FaceDir {
    /// Fixed iteration order used by the mesher.
    pub const ALL: [FaceDir; 6] = [
        FaceDir::PosX,
        FaceDir::NegX,
        FaceDir::PosY,
        FaceDir::NegY,
        FaceDir::PosZ,
        FaceDir::NegZ,
    ];

    #[inline]
    pub const fn normal(self) -> Vec3 {
        match self {
            FaceDir::PosX => Vec3::X,
            FaceDir::NegX => Vec3::NEG_X,
            FaceDir::PosY => Vec3::Y,
            FaceDir::NegY => Vec3::NEG_Y,
            FaceDir::PosZ => Vec3::Z,
            FaceDir::NegZ => Vec3::NEG_Z,
        }
    }

    /// Offset to the neighbouring voxel across this face.
    #[inline]
    pub const fn offset(self) -> IVec3 {
        match self {
            FaceDir::PosX => IVec3::X,
            FaceDir::NegX => IVec3::NEG_X,
            FaceDir::PosY => IVec3::Y,
            FaceDir::NegY => IVec3::NEG_Y,
            FaceDir::PosZ => IVec3::Z,
            FaceDir::NegZ => IVec3::NEG_Z,
        }
    }
}

/// The voxel whose unit cube contains `p`.
#[inline]
pub fn voxel_containing(p: Vec3) -> VoxelCoord {
    IVec3::new(
        (p.x + 0.5).floor() as i32,
        (p.y + 0.5).floor() as i32,
        (p.z + 0.5).floor() as i32,
    )
}
