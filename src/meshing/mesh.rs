/// Triangle soup produced by the mesher and consumed by the rasterizer
use crate::math::triangle_normal;
use crate::voxel::{AtlasRegion, BlockType, FaceDir, FaceRegionTable};
use glam::{Vec2, Vec3};

/// One textured triangle. Positions are in object space; the normal is the
/// precomputed `cross(p1 - p0, p2 - p0)` of those positions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub uvs: [Vec2; 3],
    pub normal: Vec3,
    /// Selects the atlas image the uvs index into
    pub block: BlockType,
}

impl Triangle {
    pub fn new(positions: [Vec3; 3], uvs: [Vec2; 3], block: BlockType) -> Self {
        let normal = triangle_normal(positions[0], positions[1], positions[2]);
        Self {
            positions,
            uvs,
            normal,
            block,
        }
    }
}

/// Ordered, immutable-after-build list of triangles.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

// Cube corners relative to the voxel centre. Letters: left/right on X,
// bottom/top on Y, front (-Z) / back (+Z) on Z.
const LBF: Vec3 = Vec3::new(-0.5, -0.5, -0.5);
const LTF: Vec3 = Vec3::new(-0.5, 0.5, -0.5);
const RTF: Vec3 = Vec3::new(0.5, 0.5, -0.5);
const RBF: Vec3 = Vec3::new(0.5, -0.5, -0.5);
const LBB: Vec3 = Vec3::new(-0.5, -0.5, 0.5);
const LTB: Vec3 = Vec3::new(-0.5, 0.5, 0.5);
const RTB: Vec3 = Vec3::new(0.5, 0.5, 0.5);
const RBB: Vec3 = Vec3::new(0.5, -0.5, 0.5);

/// Corners of the atlas region a face samples from.
#[derive(Copy, Clone)]
enum Uv {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Uv {
    #[inline]
    fn resolve(self, (u0, u1): (f32, f32)) -> Vec2 {
        match self {
            Uv::TopLeft => Vec2::new(u0, 0.0),
            Uv::TopRight => Vec2::new(u1, 0.0),
            Uv::BottomLeft => Vec2::new(u0, 1.0),
            Uv::BottomRight => Vec2::new(u1, 1.0),
        }
    }
}

type QuadTemplate = [([Vec3; 3], [Uv; 3]); 2];

const SIDE_UVS: [[Uv; 3]; 2] = [
    [Uv::BottomLeft, Uv::TopLeft, Uv::TopRight],
    [Uv::BottomLeft, Uv::TopRight, Uv::BottomRight],
];
const CAP_UVS: [[Uv; 3]; 2] = [
    [Uv::TopLeft, Uv::BottomLeft, Uv::BottomRight],
    [Uv::TopLeft, Uv::BottomRight, Uv::TopRight],
];

/// Winding is chosen so every template triangle's normal points out of the cube.
#[inline]
fn quad_template(face: FaceDir) -> QuadTemplate {
    let (corners, uvs) = match face {
        FaceDir::PosX => ([[RBF, RTF, RTB], [RBF, RTB, RBB]], SIDE_UVS),
        FaceDir::NegX => ([[LBB, LTB, LTF], [LBB, LTF, LBF]], SIDE_UVS),
        FaceDir::PosY => ([[LTF, LTB, RTB], [LTF, RTB, RTF]], CAP_UVS),
        FaceDir::NegY => ([[LBB, LBF, RBF], [LBB, RBF, RBB]], CAP_UVS),
        FaceDir::PosZ => ([[RBB, RTB, LTB], [RBB, LTB, LBB]], SIDE_UVS),
        FaceDir::NegZ => ([[LBF, LTF, RTF], [LBF, RTF, RBF]], SIDE_UVS),
    };
    [(corners[0], uvs[0]), (corners[1], uvs[1])]
}

/// The two triangles covering one face of the voxel centred at `center`.
pub fn face_triangles(
    center: Vec3,
    face: FaceDir,
    region: AtlasRegion,
    block: BlockType,
) -> [Triangle; 2] {
    let range = region.u_range();
    quad_template(face).map(|(corners, uvs)| {
        Triangle::new(
            corners.map(|c| center + c),
            uvs.map(|uv| uv.resolve(range)),
            block,
        )
    })
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangles),
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Append both triangles of one voxel face.
    pub fn push_face(&mut self, center: Vec3, face: FaceDir, region: AtlasRegion, block: BlockType) {
        self.triangles
            .extend(face_triangles(center, face, region, block));
    }

    /// A standalone unit cube centred on the origin: 12 triangles, every face
    /// textured with the default region table.
    pub fn unit_cube(block: BlockType) -> Self {
        let table = FaceRegionTable::default();
        let mut mesh = Self::with_capacity(12);
        for face in FaceDir::ALL {
            mesh.push_face(Vec3::ZERO, face, table.region(block, face), block);
        }
        mesh
    }
}
