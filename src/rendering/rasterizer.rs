/// Software rasterizer: per-triangle transform, cull, project and
/// barycentric fill with perspective-correct depth and texture coordinates
use super::framebuffer::{FrameSlice, Framebuffer, SKY_COLOR};
use super::shading::ShadingConfig;
use super::texture::TextureAtlas;
use crate::camera::{Camera, Projection};
use crate::math::{perspective_divide, transform_direction, transform_point};
use crate::meshing::{Mesh, Triangle};
use crate::perf::{FrameStats, PerfTimer};
use crate::voxel::BlockType;
use glam::{Mat4, Vec2, Vec3};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

/// Screen-space area below which a triangle is treated as degenerate.
const AREA_EPS: f32 = 1e-6;
const SLOW_FRAME: Duration = Duration::from_millis(33);

/// Abstraction over a render target that supports depth-tested pixel writes.
pub trait PixelTarget {
    /// Full framebuffer width.
    fn width(&self) -> usize;
    /// Framebuffer rows this target may write.
    fn rows(&self) -> Range<usize>;
    /// Strict-less depth test; on success stores the depth and returns the
    /// index to pass to `write_color`.
    fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: f32) -> Option<usize>;
    fn write_color(&mut self, index: usize, color: u32);
}

impl<'a> PixelTarget for FrameSlice<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn rows(&self) -> Range<usize> {
        FrameSlice::rows(self)
    }

    #[inline]
    fn test_depth_and_get_index(&mut self, x: usize, y: usize, depth: f32) -> Option<usize> {
        FrameSlice::test_depth_and_get_index(self, x, y, depth)
    }

    #[inline]
    fn write_color(&mut self, index: usize, color: u32) {
        FrameSlice::write_color(self, index, color);
    }
}

/// A triangle that survived culling, ready for scan conversion.
#[derive(Copy, Clone, Debug)]
pub struct ScreenTriangle {
    pub screen: [Vec2; 3],
    /// View-space z per vertex, used for perspective-correct interpolation
    pub view_z: [f32; 3],
    pub uvs: [Vec2; 3],
    pub light: f32,
    pub block: BlockType,
    /// Signed screen-space area (edge function of the three vertices)
    area: f32,
    /// Inclusive pixel bounds, clamped to the framebuffer
    min: (usize, usize),
    max: (usize, usize),
}

/// Outcome of the per-triangle front end.
#[derive(Copy, Clone, Debug)]
pub enum Prepared {
    BackFacing,
    BehindNear,
    Degenerate,
    /// Entirely outside the framebuffer
    Offscreen,
    Visible(ScreenTriangle),
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

pub struct Rasterizer {
    pub backface_culling: bool,
    pub shading: ShadingConfig,
    pub projection: Projection,
    /// Shared texture atlas for all block types.
    pub atlas: Arc<TextureAtlas>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new_with_atlas(Arc::new(TextureAtlas::default()))
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rasterizer with a specific texture atlas.
    pub fn new_with_atlas(atlas: Arc<TextureAtlas>) -> Self {
        Self {
            backface_culling: true,
            shading: ShadingConfig::default(),
            projection: Projection::default(),
            atlas,
        }
    }

    /// Transform, cull and project one triangle for a `width` x `height` target.
    pub fn prepare(
        &self,
        triangle: &Triangle,
        model_view: &Mat4,
        projection: &Mat4,
        width: usize,
        height: usize,
    ) -> Prepared {
        let view = triangle
            .positions
            .map(|p| transform_point(model_view, p).truncate());

        if self.backface_culling {
            let normal = transform_direction(model_view, triangle.normal);
            if normal.dot(view[0].normalize_or_zero()) >= 0.0 {
                return Prepared::BackFacing;
            }
        }

        let clip = view.map(|v| transform_point(projection, v));
        if clip.iter().any(|c| c.w < self.projection.near) {
            return Prepared::BehindNear;
        }

        let light = self.shading.face_light(triangle.normal);

        let (w, h) = (width as f32, height as f32);
        let screen = clip.map(|c| {
            let ndc = perspective_divide(c);
            Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h)
        });

        let area = edge(screen[0], screen[1], screen[2]);
        if area.abs() < AREA_EPS {
            return Prepared::Degenerate;
        }

        let lo = screen[0].min(screen[1]).min(screen[2]).floor();
        let hi = screen[0].max(screen[1]).max(screen[2]).ceil();
        if width == 0 || height == 0 || hi.x < 0.0 || hi.y < 0.0 || lo.x > w - 1.0 || lo.y > h - 1.0 {
            return Prepared::Offscreen;
        }
        let clamp_x = |v: f32| (v.max(0.0) as usize).min(width - 1);
        let clamp_y = |v: f32| (v.max(0.0) as usize).min(height - 1);

        Prepared::Visible(ScreenTriangle {
            screen,
            view_z: view.map(|v| v.z),
            uvs: triangle.uvs,
            light,
            block: triangle.block,
            area,
            min: (clamp_x(lo.x), clamp_y(lo.y)),
            max: (clamp_x(hi.x), clamp_y(hi.y)),
        })
    }

    /// Scan-convert one prepared triangle into the rows `target` owns.
    /// Returns the number of pixels written.
    pub fn rasterize<T: PixelTarget>(&self, tri: &ScreenTriangle, target: &mut T) -> u64 {
        let rows = target.rows();
        let y_start = tri.min.1.max(rows.start);
        let y_end = (tri.max.1 + 1).min(rows.end);
        if y_start >= y_end {
            return 0;
        }

        let [s0, s1, s2] = tri.screen;
        let inv_area = 1.0 / tri.area;
        let inv_z = tri.view_z.map(|z| 1.0 / z);
        let texture = self.atlas.get(tri.block);
        let mut written = 0u64;

        for y in y_start..y_end {
            for x in tri.min.0..=tri.max.0.min(target.width().saturating_sub(1)) {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(s1, s2, p) * inv_area;
                let w1 = edge(s2, s0, p) * inv_area;
                let w2 = edge(s0, s1, p) * inv_area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let b = Vec3::new(w0 * inv_z[0], w1 * inv_z[1], w2 * inv_z[2]);
                let depth = 1.0 / (b.x + b.y + b.z);
                let Some(index) = target.test_depth_and_get_index(x, y, depth) else {
                    continue;
                };

                let uv = (tri.uvs[0] * b.x + tri.uvs[1] * b.y + tri.uvs[2] * b.z) * depth;
                let texel = texture.sample_nearest(uv);
                target.write_color(index, self.shading.shade_color_u32(texel, tri.light));
                written += 1;
            }
        }
        written
    }

    fn tally(prepared: &[Prepared], stats: &mut FrameStats) {
        stats.submitted += prepared.len();
        for p in prepared {
            match p {
                Prepared::BackFacing => stats.culled_backface += 1,
                Prepared::BehindNear => stats.clipped_near += 1,
                Prepared::Degenerate => stats.degenerate += 1,
                Prepared::Offscreen => {}
                Prepared::Visible(_) => stats.rasterized += 1,
            }
        }
    }

    /// Render `mesh` seen through `model_view` into any pixel target,
    /// serially and in mesh order.
    pub fn render_into_target<T: PixelTarget>(
        &self,
        mesh: &Mesh,
        model_view: &Mat4,
        full_width: usize,
        full_height: usize,
        target: &mut T,
    ) -> FrameStats {
        let projection = self.projection.matrix(full_width, full_height);
        let prepared: Vec<Prepared> = mesh
            .triangles
            .iter()
            .map(|t| self.prepare(t, model_view, &projection, full_width, full_height))
            .collect();

        let mut stats = FrameStats::default();
        Self::tally(&prepared, &mut stats);
        for p in &prepared {
            if let Prepared::Visible(tri) = p {
                stats.pixels_written += self.rasterize(tri, target);
            }
        }
        stats
    }

    /// Render a mesh to the full framebuffer (single-threaded path).
    /// The framebuffer is not cleared.
    pub fn render_mesh(&self, mesh: &Mesh, view: &Mat4, framebuffer: &mut Framebuffer) -> FrameStats {
        let (width, height) = (framebuffer.width, framebuffer.height);
        let mut slice = framebuffer.as_full_slice_mut();
        self.render_into_target(mesh, view, width, height, &mut slice)
    }

    /// Same as `render_mesh` with an object transform applied before the view.
    pub fn render_mesh_with_model(
        &self,
        mesh: &Mesh,
        model: &Mat4,
        view: &Mat4,
        framebuffer: &mut Framebuffer,
    ) -> FrameStats {
        self.render_mesh(mesh, &(*view * *model), framebuffer)
    }

    /// Multi-core render: triangles are prepared in parallel, binned into
    /// horizontal stripes by their bounding rows, and each stripe is filled
    /// by one worker in mesh order. Produces the same pixels as `render_mesh`.
    pub fn render_mesh_parallel(&self, mesh: &Mesh, view: &Mat4, framebuffer: &mut Framebuffer) -> FrameStats {
        let (width, height) = (framebuffer.width, framebuffer.height);
        let projection = self.projection.matrix(width, height);

        // --- 1. PROJECTION PASS ---
        let prepared: Vec<Prepared> = mesh
            .triangles
            .par_iter()
            .map(|t| self.prepare(t, view, &projection, width, height))
            .collect();

        let mut stats = FrameStats::default();
        Self::tally(&prepared, &mut stats);
        let visible: Vec<&ScreenTriangle> = prepared
            .iter()
            .filter_map(|p| match p {
                Prepared::Visible(tri) => Some(tri),
                _ => None,
            })
            .collect();
        if visible.is_empty() || height == 0 {
            return stats;
        }

        // --- 2. STRIPE BINNING PASS ---
        // Over-subscribe stripes so work stealing can balance uneven rows.
        let stripe_count = (rayon::current_num_threads() * 4).min(height).max(1);
        let stripe_h = height.div_ceil(stripe_count);
        let mut bins: Vec<Vec<usize>> = vec![Vec::new(); stripe_count];
        for (i, tri) in visible.iter().enumerate() {
            let start = (tri.min.1 / stripe_h).min(stripe_count - 1);
            let end = (tri.max.1 / stripe_h).min(stripe_count - 1);
            for bin in &mut bins[start..=end] {
                bin.push(i);
            }
        }

        // --- 3. PARALLEL STRIPE RENDERING ---
        let slices = framebuffer.split_into_stripes(stripe_count);
        stats.pixels_written = slices
            .into_par_iter()
            .zip(bins.par_iter())
            .map(|(mut slice, bin)| {
                bin.iter()
                    .map(|&i| self.rasterize(visible[i], &mut slice))
                    .sum::<u64>()
            })
            .sum();
        stats
    }

    /// Clear to sky, then render the mesh from `camera`.
    pub fn render_frame(&self, mesh: &Mesh, camera: &Camera, framebuffer: &mut Framebuffer) -> FrameStats {
        let timer = PerfTimer::new("render frame");
        framebuffer.clear(SKY_COLOR);
        let stats = self.render_mesh_parallel(mesh, &camera.view_matrix(), framebuffer);

        let elapsed = timer.elapsed();
        if elapsed > SLOW_FRAME {
            log::warn!("slow frame: {:.2}ms", elapsed.as_secs_f64() * 1e3);
        }
        log::debug!("{stats:?}");
        stats
    }
}
