/// First-person player: input integration, gravity and per-axis voxel
/// collision. Publishes an immutable `Camera` snapshot for the renderer.
pub mod collision;
pub mod input;

pub use collision::{overlapping_voxels, Aabb};
pub use input::{Action, InputEvent, InputState, TickInput};

use crate::camera::Camera;
use crate::world::World;
use glam::Vec3;

#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Horizontal speed per active direction, units/s
    pub move_speed: f32,
    pub gravity: f32,
    /// Maximum fall speed (positive)
    pub terminal_velocity: f32,
    pub jump_speed: f32,
    pub half_width: f32,
    pub body_height: f32,
    /// Eye height above the feet
    pub eye_offset: f32,
    /// Gap left between the body and a surface after a snap
    pub skin: f32,
    /// Distance below the feet checked for ground contact
    pub ground_probe: f32,
    /// Radians per unit of pointer motion
    pub mouse_sensitivity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: 20.0,
            terminal_velocity: 50.0,
            jump_speed: 8.0,
            half_width: 0.3,
            body_height: 1.8,
            eye_offset: 1.6,
            skin: 1e-3,
            ground_probe: 0.05,
            mouse_sensitivity: 0.002,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

pub struct PlayerController {
    config: PhysicsConfig,
    camera: Camera,
    velocity_y: f32,
    on_ground: bool,
}

impl PlayerController {
    /// Facing +Z.
    pub const DEFAULT_YAW: f32 = std::f32::consts::FRAC_PI_2;

    pub fn new(eye: Vec3, config: PhysicsConfig) -> Self {
        Self {
            config,
            camera: Camera::new(eye, Self::DEFAULT_YAW, 0.0),
            velocity_y: 0.0,
            on_ground: false,
        }
    }

    /// Stand on top of the (x, z) column, or at eye height above y = 0 if
    /// the column is empty.
    pub fn spawn_above(world: &World, x: i32, z: i32, config: PhysicsConfig) -> Self {
        let feet = world
            .surface_height(x, z)
            .map_or(0.0, |h| h as f32 + 0.5 + config.skin);
        let eye = Vec3::new(x as f32, feet + config.eye_offset, z as f32);
        log::info!("spawning player at {eye}");
        Self::new(eye, config)
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.camera = Camera::new(self.camera.position, yaw, pitch);
    }

    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.velocity_y
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Snapshot handed to the renderer.
    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    fn body(&self) -> Aabb {
        Aabb::around_eye(
            self.camera.position,
            self.config.half_width,
            self.config.body_height,
            self.config.eye_offset,
        )
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, input: &TickInput, world: &World, dt: f32) {
        self.camera.rotate(input.look, self.config.mouse_sensitivity);

        let step = self.config.move_speed * dt;
        let forward = self.camera.flat_forward();
        let right = self.camera.right();
        let mut delta = Vec3::ZERO;
        if input.forward {
            delta += forward * step;
        }
        if input.backward {
            delta -= forward * step;
        }
        if input.right {
            delta += right * step;
        }
        if input.left {
            delta -= right * step;
        }

        self.move_horizontal(Axis::X, delta.x, world);
        self.move_horizontal(Axis::Z, delta.z, world);
        self.move_vertical(world, dt);
        self.probe_ground(world);

        if input.jump && self.on_ground {
            self.velocity_y = self.config.jump_speed;
            self.on_ground = false;
        }
    }

    fn move_horizontal(&mut self, axis: Axis, amount: f32, world: &World) {
        if amount == 0.0 {
            return;
        }
        match axis {
            Axis::X => self.camera.position.x += amount,
            Axis::Z => self.camera.position.z += amount,
        }

        let hits = overlapping_voxels(world, &self.body());
        if hits.is_empty() {
            return;
        }

        let coord = |v: &crate::voxel::VoxelCoord| match axis {
            Axis::X => v.x as f32,
            Axis::Z => v.z as f32,
        };
        let reach = self.config.half_width + self.config.skin;
        let snapped = if amount > 0.0 {
            let near_face = hits.iter().map(coord).fold(f32::INFINITY, f32::min) - 0.5;
            near_face - reach
        } else {
            let near_face = hits.iter().map(coord).fold(f32::NEG_INFINITY, f32::max) + 0.5;
            near_face + reach
        };
        match axis {
            Axis::X => self.camera.position.x = snapped,
            Axis::Z => self.camera.position.z = snapped,
        }
    }

    fn move_vertical(&mut self, world: &World, dt: f32) {
        self.velocity_y = (self.velocity_y - self.config.gravity * dt).max(-self.config.terminal_velocity);
        self.camera.position.y += self.velocity_y * dt;

        let hits = overlapping_voxels(world, &self.body());
        if hits.is_empty() {
            return;
        }

        if self.velocity_y < 0.0 {
            let top = hits.iter().map(|v| v.y).max().unwrap_or_default() as f32 + 0.5;
            self.camera.position.y = top + self.config.skin + self.config.eye_offset;
            self.velocity_y = 0.0;
            self.on_ground = true;
        } else if self.velocity_y > 0.0 {
            let bottom = hits.iter().map(|v| v.y).min().unwrap_or_default() as f32 - 0.5;
            let head_above_eye = self.config.body_height - self.config.eye_offset;
            self.camera.position.y = bottom - self.config.skin - head_above_eye;
            self.velocity_y = 0.0;
        }
    }

    /// Ground contact from a thin probe under the feet, independent of
    /// whatever the vertical step resolved.
    fn probe_ground(&mut self, world: &World) {
        let body = self.body();
        let feet = body.min.y;
        let probe = body.translated(Vec3::new(0.0, -self.config.ground_probe, 0.0));
        let support = overlapping_voxels(world, &probe)
            .into_iter()
            .map(|v| v.y as f32 + 0.5)
            .filter(|top| *top <= feet + self.config.skin)
            .fold(None, |best: Option<f32>, top| Some(best.map_or(top, |b| b.max(top))));

        match support {
            Some(top) => {
                self.on_ground = true;
                if self.velocity_y <= 0.0 {
                    self.camera.position.y = top + self.config.skin + self.config.eye_offset;
                    self.velocity_y = 0.0;
                }
            }
            None => self.on_ground = false,
        }
    }
}
