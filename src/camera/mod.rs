/// First-person camera snapshot and projection settings
/// The controller owns the mutable state and publishes a `Camera` each tick
use crate::math::{look_at, perspective};
use glam::{Mat4, Vec2, Vec3};

/// Pitch stays just short of straight up/down so the look-at basis never
/// degenerates.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Immutable view of the player's eye: position plus yaw/pitch in radians.
/// Yaw 0 faces +X, yaw π/2 faces +Z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
        }
    }

    /// Camera at `position` oriented toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        let yaw = dir.z.atan2(dir.x);
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        Self::new(position, yaw, pitch)
    }

    /// Unit view direction, including pitch.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cy * cp, sp, sy * cp)
    }

    /// Horizontal walking direction (pitch ignored).
    pub fn flat_forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, sy)
    }

    /// Horizontal strafe direction, to the right of `flat_forward`.
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(sy, 0.0, -cy)
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Apply a pointer delta: moving right turns right, moving down looks down.
    pub fn rotate(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }
}

/// Perspective settings; aspect comes from the target size at use time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Projection for a `width` x `height` target (aspect = height / width).
    pub fn matrix(&self, width: usize, height: usize) -> Mat4 {
        let aspect = height.max(1) as f32 / width.max(1) as f32;
        perspective(self.fov_degrees, aspect, self.near, self.far)
    }
}
