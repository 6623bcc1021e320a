pub mod camera;
pub mod math;
pub mod meshing;
pub mod perf;
pub mod player;
pub mod rendering;
pub mod terrain;
/// Softvox - software-rasterized voxel world
/// Terrain, face-culled meshing, first-person physics and a CPU rasterizer
pub mod voxel;
pub mod world;

pub use camera::{Camera, Projection};
pub use meshing::{FaceCullingMesher, Mesh, Triangle};
pub use perf::{FrameStats, FrameTimings, PerfTimer};
pub use player::{Action, InputEvent, InputState, PhysicsConfig, PlayerController, TickInput};
pub use rendering::{Framebuffer, Rasterizer, ShadingConfig, Texture, TextureAtlas, SKY_COLOR};
pub use terrain::{Perlin2, TerrainGenerator};
pub use voxel::{AtlasRegion, BlockType, FaceDir, FaceRegionTable, VoxelCoord};
pub use world::{World, WorldConfig};
