/// Integration tests for face-culling meshing
use glam::{IVec3, Vec3};
use softvox::voxel::voxel_containing;
use softvox::*;

fn mesh_of(blocks: &[(IVec3, BlockType)]) -> Mesh {
    FaceCullingMesher::default().build(&World::from_blocks(blocks.iter().copied()))
}

#[test]
fn isolated_voxel_has_twelve_triangles() {
    let mesh = mesh_of(&[(IVec3::ZERO, BlockType::Grass)]);
    assert_eq!(mesh.len(), 12);
}

#[test]
fn adjacent_pair_drops_the_shared_faces() {
    for axis in [IVec3::X, IVec3::Y, IVec3::Z] {
        let mesh = mesh_of(&[(IVec3::ZERO, BlockType::Stone), (axis, BlockType::Dirt)]);
        assert_eq!(mesh.len(), 20, "pair along {axis}");
    }
}

#[test]
fn diagonal_neighbours_do_not_cull() {
    let mesh = mesh_of(&[(IVec3::ZERO, BlockType::Stone), (IVec3::ONE, BlockType::Stone)]);
    assert_eq!(mesh.len(), 24);
}

#[test]
fn coplanar_faces_are_not_merged() {
    let row: Vec<_> = (0..4).map(|x| (IVec3::new(x, 0, 0), BlockType::Stone)).collect();
    let mesh = mesh_of(&row);
    // 4 voxels: tops, bottoms, fronts and backs stay separate, plus two end caps.
    assert_eq!(mesh.len(), (4 * 4 + 2) * 2);
}

#[test]
fn terrain_mesh_only_exposes_faces_toward_empty_space() {
    let config = WorldConfig {
        width: 12,
        depth: 12,
        seed: 77,
        ..Default::default()
    };
    let world = World::generate(&config);
    let mesh = FaceCullingMesher::default().build(&world);
    assert!(!mesh.is_empty());

    for tri in &mesh.triangles {
        let centroid = (tri.positions[0] + tri.positions[1] + tri.positions[2]) / 3.0;
        let owner = voxel_containing(centroid - tri.normal * 0.25);
        let neighbour = owner + tri.normal.round().as_ivec3();
        assert!(world.contains(owner), "face at {centroid} has no owner");
        assert!(!world.contains(neighbour), "face at {centroid} is buried");
        assert_eq!(world.get(owner), Some(tri.block));
    }
}

#[test]
fn grass_top_and_sides_sample_different_thirds() {
    let mesh = mesh_of(&[(IVec3::ZERO, BlockType::Grass)]);
    let top = mesh.triangles.iter().find(|t| t.normal == Vec3::Y).unwrap();
    let side = mesh.triangles.iter().find(|t| t.normal == Vec3::X).unwrap();
    let bottom = mesh.triangles.iter().find(|t| t.normal == Vec3::NEG_Y).unwrap();
    assert!(top.uvs.iter().all(|uv| uv.x < 0.34));
    assert!(side.uvs.iter().all(|uv| uv.x > 0.33 && uv.x < 0.67));
    assert!(bottom.uvs.iter().all(|uv| uv.x > 0.66));
}
