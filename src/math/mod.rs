//! Math kernel for the software pipeline
//! Thin constructors over glam so every stage shares one set of types
//!
//! Matrices use glam's column-vector convention (`m * v`). A row-vector table
//! `m[r][c]` with translation in row 3 maps to glam column `r`, component `c`,
//! which is why every constructor below is written column by column.

pub use glam::{IVec3, Mat4, Vec2, Vec3, Vec4};

/// Rotation about +X.
#[inline]
pub fn rotation_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols(
        Vec4::X,
        Vec4::new(0.0, c, s, 0.0),
        Vec4::new(0.0, -s, c, 0.0),
        Vec4::W,
    )
}

/// Rotation about +Y.
#[inline]
pub fn rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols(
        Vec4::new(c, 0.0, s, 0.0),
        Vec4::Y,
        Vec4::new(-s, 0.0, c, 0.0),
        Vec4::W,
    )
}

/// World-to-view transform for an eye looking at `target`.
///
/// View space is left-handed: +Z points from the eye towards the target,
/// +X is `up × forward`, +Y completes the basis. A point in front of the
/// camera therefore has a positive view-space z.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z_axis = (target - eye).normalize_or_zero();
    let x_axis = up.cross(z_axis).normalize_or_zero();
    let y_axis = z_axis.cross(x_axis);

    Mat4::from_cols(
        Vec4::new(x_axis.x, y_axis.x, z_axis.x, 0.0),
        Vec4::new(x_axis.y, y_axis.y, z_axis.y, 0.0),
        Vec4::new(x_axis.z, y_axis.z, z_axis.z, 0.0),
        Vec4::new(-x_axis.dot(eye), -y_axis.dot(eye), -z_axis.dot(eye), 1.0),
    )
}

/// Perspective projection.
///
/// `aspect_ratio` is height / width and scales the x term. View-space z is
/// copied into w so the perspective divide happens after the multiply.
pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    let fov_rad = 1.0 / (fov_degrees * 0.5).to_radians().tan();
    let depth_scale = far / (far - near);

    Mat4::from_cols(
        Vec4::new(aspect_ratio * fov_rad, 0.0, 0.0, 0.0),
        Vec4::new(0.0, fov_rad, 0.0, 0.0),
        Vec4::new(0.0, 0.0, depth_scale, 1.0),
        Vec4::new(0.0, 0.0, -far * near / (far - near), 0.0),
    )
}

/// Full homogeneous transform of a point (w = 1). The result is not divided.
#[inline]
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec4 {
    *m * p.extend(1.0)
}

/// Transform a direction: translation is ignored and the result has w = 0.
#[inline]
pub fn transform_direction(m: &Mat4, d: Vec3) -> Vec3 {
    m.transform_vector3(d)
}

/// Divide x, y, z by w. A zero w leaves the components untouched.
#[inline]
pub fn perspective_divide(v: Vec4) -> Vec3 {
    if v.w != 0.0 {
        v.truncate() / v.w
    } else {
        v.truncate()
    }
}

/// Face normal from three positions: `cross(p2 - p1, p3 - p1)` normalised.
#[inline]
pub fn triangle_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    (p2 - p1).cross(p3 - p1).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn point_on_forward_axis_projects_to_ndc_center() {
        let proj = perspective(90.0, 1.0, 0.1, 1000.0);
        for z in [0.1, 1.0, 42.0, 999.0] {
            let ndc = perspective_divide(transform_point(&proj, Vec3::new(0.0, 0.0, z)));
            assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS, "z={z} -> {ndc:?}");
        }
    }

    #[test]
    fn perspective_layout_matches_table() {
        let (near, far) = (0.1, 1000.0);
        let proj = perspective(90.0, 0.5, near, far);
        // tan(45deg) = 1 so fovRad = 1
        assert!((proj.x_axis.x - 0.5).abs() < EPS);
        assert!((proj.y_axis.y - 1.0).abs() < EPS);
        assert!((proj.z_axis.z - far / (far - near)).abs() < EPS);
        assert_eq!(proj.z_axis.w, 1.0);
        assert!((proj.w_axis.z - (-far * near / (far - near))).abs() < 1e-4);
        assert_eq!(proj.w_axis.w, 0.0);
    }

    #[test]
    fn near_and_far_planes_map_to_depth_range() {
        let proj = perspective(70.0, 1.0, 0.5, 50.0);
        let near = perspective_divide(transform_point(&proj, Vec3::new(0.0, 0.0, 0.5)));
        let far = perspective_divide(transform_point(&proj, Vec3::new(0.0, 0.0, 50.0)));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn look_at_moves_eye_to_origin_and_target_onto_z() {
        let eye = Vec3::new(3.0, 2.0, -7.0);
        let target = Vec3::new(-1.0, 4.0, 5.0);
        let view = look_at(eye, target, Vec3::Y);

        let eye_view = transform_point(&view, eye);
        assert!(approx(eye_view.truncate(), Vec3::ZERO));
        assert_eq!(eye_view.w, 1.0);

        let target_view = transform_point(&view, target).truncate();
        let dist = (target - eye).length();
        assert!(approx(target_view, Vec3::new(0.0, 0.0, dist)));
    }

    #[test]
    fn look_at_along_positive_z_keeps_x_to_the_right() {
        let view = look_at(Vec3::ZERO, Vec3::Z, Vec3::Y);
        let right = transform_point(&view, Vec3::X).truncate();
        let up = transform_point(&view, Vec3::Y).truncate();
        assert!(approx(right, Vec3::X));
        assert!(approx(up, Vec3::Y));
    }

    #[test]
    fn look_at_with_degenerate_up_does_not_produce_nan() {
        let view = look_at(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(!view.is_nan());
    }

    #[test]
    fn rotations_turn_axes_by_a_quarter() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let ry = transform_direction(&rotation_y(quarter), Vec3::X);
        assert!(approx(ry, Vec3::Z));
        let rx = transform_direction(&rotation_x(quarter), Vec3::Y);
        assert!(approx(rx, Vec3::Z));
    }

    #[test]
    fn composed_matrices_apply_right_to_left() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0)) * rotation_y(quarter);
        let p = transform_point(&m, Vec3::X).truncate();
        assert!(approx(p, Vec3::new(0.0, 0.0, 4.0)));
    }

    #[test]
    fn direction_transform_ignores_translation() {
        let m = Mat4::from_translation(Vec3::new(10.0, -4.0, 2.0));
        assert!(approx(transform_direction(&m, Vec3::Y), Vec3::Y));
        assert_eq!(transform_point(&m, Vec3::ZERO).truncate(), Vec3::new(10.0, -4.0, 2.0));
    }

    #[test]
    fn zero_length_normal_is_guarded() {
        let n = triangle_normal(Vec3::ONE, Vec3::ONE, Vec3::ONE);
        assert_eq!(n, Vec3::ZERO);
    }
}
