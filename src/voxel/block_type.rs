use super::FaceDir;
use self::AtlasRegion::{Bottom, Side, Top};

/// Block type enumeration
/// Using u8 representation for memory efficiency
///
/// Empty space is the absence of a key in the world map, so there is no
/// `Air` variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BlockType {
    Grass = 0,
    Dirt = 1,
    Stone = 2,
}

pub const BLOCK_TYPE_COUNT: usize = 3;

/// One of the three equal-width vertical strips of a block atlas image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AtlasRegion {
    Top = 0,
    Side = 1,
    Bottom = 2,
}

impl AtlasRegion {
    /// Horizontal texture-coordinate span `[u0, u1]` of this strip.
    #[inline]
    pub fn u_range(self) -> (f32, f32) {
        const THIRD: f32 = 1.0 / 3.0;
        const TWO_THIRDS: f32 = 2.0 / 3.0;
        match self {
            AtlasRegion::Top => (0.0, THIRD),
            AtlasRegion::Side => (THIRD, TWO_THIRDS),
            AtlasRegion::Bottom => (TWO_THIRDS, 1.0),
        }
    }
}

// Face -> atlas region, indexed [block][FaceDir as usize]
// (PosX, NegX, PosY, NegY, PosZ, NegZ). Only grass gives its top and bottom
// faces their own strips; the other blocks use the side strip everywhere.
const FACE_REGION_LUT: [[AtlasRegion; 6]; BLOCK_TYPE_COUNT] = [
    [Side, Side, Top, Bottom, Side, Side], // Grass
    [Side, Side, Side, Side, Side, Side],  // Dirt
    [Side, Side, Side, Side, Side, Side],  // Stone
];

const BLOCK_NAMES: [&str; BLOCK_TYPE_COUNT] = ["grass", "dirt", "stone"];

impl BlockType {
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] =
        [BlockType::Grass, BlockType::Dirt, BlockType::Stone];

    /// Dense index used by the per-block lookup tables and the texture atlas.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name, also the texture file stem.
    #[inline]
    pub const fn name(self) -> &'static str {
        BLOCK_NAMES[self as usize]
    }

    /// Atlas strip sampled by the given face of this block.
    #[inline]
    pub const fn face_region(self, face: FaceDir) -> AtlasRegion {
        FACE_REGION_LUT[self as usize][face as usize]
    }
}

/// Per-block face -> region mapping that can be overridden at mesh time.
///
/// `FaceRegionTable::default()` reproduces the built-in table; callers that
/// want, say, distinct stone caps edit a row without touching the mesher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceRegionTable {
    rows: [[AtlasRegion; 6]; BLOCK_TYPE_COUNT],
}

impl Default for FaceRegionTable {
    fn default() -> Self {
        Self {
            rows: FACE_REGION_LUT,
        }
    }
}

impl FaceRegionTable {
    #[inline]
    pub fn region(&self, block: BlockType, face: FaceDir) -> AtlasRegion {
        self.rows[block.index()][face as usize]
    }

    pub fn set(&mut self, block: BlockType, face: FaceDir, region: AtlasRegion) {
        self.rows[block.index()][face as usize] = region;
    }

    /// Give `block` distinct top and bottom strips, like grass.
    pub fn with_caps(mut self, block: BlockType) -> Self {
        self.set(block, FaceDir::PosY, AtlasRegion::Top);
        self.set(block, FaceDir::NegY, AtlasRegion::Bottom);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_has_distinct_caps() {
        assert_eq!(BlockType::Grass.face_region(FaceDir::PosY), AtlasRegion::Top);
        assert_eq!(BlockType::Grass.face_region(FaceDir::NegY), AtlasRegion::Bottom);
        assert_eq!(BlockType::Grass.face_region(FaceDir::PosX), AtlasRegion::Side);
    }

    #[test]
    fn other_blocks_use_side_strip_everywhere() {
        for block in [BlockType::Dirt, BlockType::Stone] {
            for face in FaceDir::ALL {
                assert_eq!(block.face_region(face), AtlasRegion::Side);
            }
        }
    }

    #[test]
    fn table_override_leaves_other_rows_alone() {
        let table = FaceRegionTable::default().with_caps(BlockType::Stone);
        assert_eq!(table.region(BlockType::Stone, FaceDir::PosY), AtlasRegion::Top);
        assert_eq!(table.region(BlockType::Dirt, FaceDir::PosY), AtlasRegion::Side);
    }

    #[test]
    fn regions_tile_the_unit_interval() {
        assert_eq!(AtlasRegion::Top.u_range().0, 0.0);
        assert_eq!(AtlasRegion::Top.u_range().1, AtlasRegion::Side.u_range().0);
        assert_eq!(AtlasRegion::Side.u_range().1, AtlasRegion::Bottom.u_range().0);
        assert_eq!(AtlasRegion::Bottom.u_range().1, 1.0);
    }

    #[test]
    fn index_and_name_follow_declaration_order() {
        for (i, block) in BlockType::ALL.into_iter().enumerate() {
            assert_eq!(block.index(), i);
        }
        assert_eq!(BlockType::Stone.name(), "stone");
    }
}
