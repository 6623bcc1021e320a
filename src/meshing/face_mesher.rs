/// Per-voxel hidden-face culling mesher
/// Emits one quad (two triangles) for every voxel face whose neighbour is
/// empty. Coplanar faces are never merged.
use super::mesh::Mesh;
use crate::voxel::{FaceDir, FaceRegionTable};
use crate::world::World;

#[derive(Clone, Debug, Default)]
pub struct FaceCullingMesher {
    regions: FaceRegionTable,
}

impl FaceCullingMesher {
    pub fn new(regions: FaceRegionTable) -> Self {
        Self { regions }
    }

    /// Mesh every occupied voxel. Voxels are visited in (x, y, z) order and
    /// faces in `FaceDir::ALL` order, so the output is stable across runs.
    pub fn build(&self, world: &World) -> Mesh {
        crate::perf_scope!("mesh build");
        let mut mesh = Mesh::with_capacity(world.len() * 4);

        for pos in world.sorted_coords() {
            let Some(block) = world.get(pos) else {
                continue;
            };
            let center = pos.as_vec3();
            for face in FaceDir::ALL {
                if world.contains(pos + face.offset()) {
                    continue;
                }
                mesh.push_face(center, face, self.regions.region(block, face), block);
            }
        }

        log::info!(
            "meshed {} voxels into {} triangles",
            world.len(),
            mesh.len()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::{AtlasRegion, BlockType};
    use glam::{IVec3, Vec3};

    #[test]
    fn empty_world_yields_empty_mesh() {
        assert!(FaceCullingMesher::default().build(&World::new()).is_empty());
    }

    #[test]
    fn buried_voxel_emits_nothing() {
        let mut world = World::new();
        world.insert(IVec3::ZERO, BlockType::Stone);
        for face in FaceDir::ALL {
            world.insert(face.offset(), BlockType::Dirt);
        }
        let mesh = FaceCullingMesher::default().build(&world);
        // 6 neighbours x 5 exposed faces x 2
        assert_eq!(mesh.len(), 60);
        assert!(mesh.triangles.iter().all(|t| t.block == BlockType::Dirt));
    }

    #[test]
    fn stone_caps_follow_the_region_table() {
        let world = World::from_blocks([(IVec3::ZERO, BlockType::Stone)]);
        let default_mesh = FaceCullingMesher::default().build(&world);
        let top = default_mesh
            .triangles
            .iter()
            .find(|t| t.normal == Vec3::Y)
            .copied();
        let (u0, _) = AtlasRegion::Side.u_range();
        assert_eq!(top.map(|t| t.uvs[0].x), Some(u0));

        let capped = FaceCullingMesher::new(FaceRegionTable::default().with_caps(BlockType::Stone));
        let mesh = capped.build(&world);
        let top = mesh.triangles.iter().find(|t| t.normal == Vec3::Y).copied();
        assert_eq!(top.map(|t| t.uvs[0].x), Some(0.0));
    }

    #[test]
    fn output_order_is_reproducible() {
        let blocks = [
            (IVec3::new(3, 0, 0), BlockType::Grass),
            (IVec3::new(-2, 1, 4), BlockType::Dirt),
            (IVec3::new(0, 0, 0), BlockType::Stone),
        ];
        let a = FaceCullingMesher::default().build(&World::from_blocks(blocks));
        let b = FaceCullingMesher::default().build(&World::from_blocks(blocks.into_iter().rev()));
        assert_eq!(a.triangles, b.triangles);
        // First voxel in x order, first face (+X), first corner.
        assert_eq!(a.triangles[0].positions[0], Vec3::new(-1.5, 0.5, 3.5));
    }
}
