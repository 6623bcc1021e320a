/// Flat directional lighting.
/// Kept separate from the rasterizer so lighting models
/// can evolve independently of the rasterization pipeline.
use glam::Vec3;

/// Single directional light with an ambient floor.
#[derive(Copy, Clone, Debug)]
pub struct ShadingConfig {
    /// Direction toward the light (world space), normalised
    pub light_dir: Vec3,
    /// Lower bound of the light factor for faces turned away from the light
    pub ambient_floor: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            light_dir: Vec3::new(0.5, 1.0, -0.5).normalize(),
            ambient_floor: 0.2,
        }
    }
}

impl ShadingConfig {
    /// Lambert factor for a face normal: `max(ambient_floor, n · l)`.
    #[inline]
    pub fn face_light(&self, normal: Vec3) -> f32 {
        normal.dot(self.light_dir).max(self.ambient_floor)
    }

    /// Scale each channel of an ARGB32 color by `light`, truncating. The
    /// result is opaque.
    #[inline]
    pub fn shade_color_u32(&self, base: u32, light: f32) -> u32 {
        let channel = |shift: u32| {
            let c = ((base >> shift) & 0xFF) as f32;
            ((c * light) as u32).min(255) << shift
        };
        0xFF000000 | channel(16) | channel(8) | channel(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_away_from_light_get_the_floor() {
        let shading = ShadingConfig::default();
        assert_eq!(shading.face_light(Vec3::NEG_Y), 0.2);
        assert_eq!(shading.face_light(Vec3::X.cross(Vec3::Y) * 0.0), 0.2);
    }

    #[test]
    fn top_faces_are_brightest_of_the_axes() {
        let shading = ShadingConfig::default();
        let top = shading.face_light(Vec3::Y);
        for n in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z, Vec3::NEG_Y] {
            assert!(shading.face_light(n) < top);
        }
        assert!((top - 1.0 / 1.5f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn shading_truncates_each_channel() {
        let shading = ShadingConfig::default();
        assert_eq!(shading.shade_color_u32(0x80FF8001, 0.5), 0xFF7F4000);
        assert_eq!(shading.shade_color_u32(0xFF646464, 1.0), 0xFF646464);
    }
}
