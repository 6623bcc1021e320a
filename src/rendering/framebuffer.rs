/// Framebuffer for software rendering
/// Stores color and depth information
///
/// Color and depth live in separate allocations of identical dimensions; a
/// resize reallocates both.
use std::ops::Range;

/// Clear color: opaque sky blue.
pub const SKY_COLOR: u32 = 0xFF87CEEB;

/// View into a contiguous set of rows in the framebuffer.
/// Used for multi-core rasterization where each worker owns a disjoint slice.
pub struct FrameSlice<'a> {
    pub width: usize,
    pub y0: usize,
    pub height: usize,
    pub color: &'a mut [u32],
    pub depth: &'a mut [f32],
}

impl<'a> FrameSlice<'a> {
    /// Rows covered by this slice, in framebuffer coordinates.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.y0..self.y0 + self.height
    }

    /// Strict-less depth test at (x, y_global). On success the depth is
    /// stored and the local index for the color write is returned.
    #[inline]
    pub fn test_depth_and_get_index(&mut self, x: usize, y_global: usize, depth: f32) -> Option<usize> {
        if x >= self.width || !self.rows().contains(&y_global) {
            return None;
        }
        let index = (y_global - self.y0) * self.width + x;
        if depth < self.depth[index] {
            self.depth[index] = depth;
            Some(index)
        } else {
            None
        }
    }

    #[inline]
    pub fn write_color(&mut self, index: usize, color: u32) {
        self.color[index] = color;
    }
}

pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<u32>, // ARGB
    pub depth_buffer: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_count = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; pixel_count],
            depth_buffer: vec![f32::INFINITY; pixel_count],
        }
    }

    /// Fill color with `clear_color` and reset depth to +infinity.
    pub fn clear(&mut self, clear_color: u32) {
        self.color_buffer.fill(clear_color);
        self.depth_buffer.fill(f32::INFINITY);
    }

    /// Reallocate both rasters for the new dimensions. Contents are reset.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!("framebuffer resize {}x{} -> {}x{}", self.width, self.height, width, height);
        *self = Self::new(width, height);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.color_buffer[y * self.width + x])
    }

    #[inline]
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.depth_buffer[y * self.width + x])
    }

    /// Set pixel with depth test
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        let index = y * self.width + x;
        if depth < self.depth_buffer[index] {
            self.color_buffer[index] = color;
            self.depth_buffer[index] = depth;
            true
        } else {
            false
        }
    }

    pub fn color_buffer_slice(&self) -> &[u32] {
        &self.color_buffer
    }

    /// A single slice covering every row.
    pub fn as_full_slice_mut(&mut self) -> FrameSlice<'_> {
        FrameSlice {
            width: self.width,
            y0: 0,
            height: self.height,
            color: &mut self.color_buffer,
            depth: &mut self.depth_buffer,
        }
    }

    /// Split the framebuffer into horizontal stripes for multi-core rendering.
    /// Each stripe owns a disjoint subset of rows, so they can be rendered in parallel.
    pub fn split_into_stripes(&mut self, stripes: usize) -> Vec<FrameSlice<'_>> {
        let stripes = stripes.max(1);
        let width = self.width;
        let height = self.height;
        let rows_per_stripe = height.div_ceil(stripes).max(1);

        let mut slices = Vec::with_capacity(stripes);
        let mut remaining_color: &mut [u32] = self.color_buffer.as_mut_slice();
        let mut remaining_depth: &mut [f32] = self.depth_buffer.as_mut_slice();

        let mut y0 = 0usize;
        while y0 < height {
            let rows = (height - y0).min(rows_per_stripe);
            let pixels = rows * width;

            let (color_head, color_tail) = std::mem::take(&mut remaining_color).split_at_mut(pixels);
            let (depth_head, depth_tail) = std::mem::take(&mut remaining_depth).split_at_mut(pixels);

            slices.push(FrameSlice {
                width,
                y0,
                height: rows,
                color: color_head,
                depth: depth_head,
            });

            remaining_color = color_tail;
            remaining_depth = depth_tail;
            y0 += rows;
        }

        slices
    }
}
