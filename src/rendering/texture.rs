/// Block textures: one ARGB image per block type, each split into
/// top/side/bottom thirds along U.
use crate::voxel::{BlockType, BLOCK_TYPE_COUNT};
use anyhow::{ensure, Context};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    /// Row-major ARGB, row 0 is v = 0
    pixels: Vec<u32>,
}

impl Texture {
    pub fn from_argb(width: usize, height: usize, pixels: Vec<u32>) -> anyhow::Result<Self> {
        ensure!(width > 0 && height > 0, "texture must not be empty ({width}x{height})");
        ensure!(
            pixels.len() == width * height,
            "expected {} pixels for {width}x{height}, got {}",
            width * height,
            pixels.len()
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 1x1 texture of a single color.
    pub fn solid(color: u32) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    pub fn from_rgba_image(image: &image::RgbaImage) -> anyhow::Result<Self> {
        let pixels = image
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            })
            .collect();
        Self::from_argb(image.width() as usize, image.height() as usize, pixels)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to decode texture {}", path.display()))?
            .to_rgba8();
        Self::from_rgba_image(&image).with_context(|| format!("invalid texture {}", path.display()))
    }

    /// Three noisy strips (top, side, bottom) of `strip` x `strip` texels,
    /// laid out left to right.
    pub fn noise_strips(top: u32, side: u32, bottom: u32, strip: usize, seed: u64) -> Self {
        let strip = strip.max(1);
        let width = strip * 3;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pixels = Vec::with_capacity(width * strip);
        for _ in 0..strip {
            for x in 0..width {
                let base = [top, side, bottom][x / strip];
                pixels.push(darken(base, rng.gen_range(0.8..=1.0)));
            }
        }
        Self {
            width,
            height: strip,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Nearest-texel lookup; coordinates are clamped to the image, never wrapped.
    #[inline]
    pub fn sample_nearest(&self, uv: Vec2) -> u32 {
        let x = ((uv.x * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((uv.y * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as usize;
        self.texel(x, y)
    }
}

#[inline]
fn darken(color: u32, factor: f32) -> u32 {
    let scale = |shift: u32| ((((color >> shift) & 0xFF) as f32 * factor) as u32) << shift;
    (color & 0xFF000000) | scale(16) | scale(8) | scale(0)
}

/// Texture Atlas holding all block textures, indexed by `BlockType::index()`.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    pub textures: Vec<Texture>,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::procedural()
    }
}

impl TextureAtlas {
    /// Load `<dir>/<block name>.png` for every block type.
    pub fn load_dir(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let textures = BlockType::ALL
            .iter()
            .map(|block| {
                let path = dir.join(format!("{}.png", block.name()));
                Texture::load(&path).with_context(|| format!("loading {} texture", block.name()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("loaded {} block textures from {}", textures.len(), dir.display());
        Ok(Self { textures })
    }

    /// Same texture for every block type.
    pub fn uniform(texture: Texture) -> Self {
        Self {
            textures: vec![texture; BLOCK_TYPE_COUNT],
        }
    }

    /// Generated stand-in textures, used when no asset directory is needed.
    pub fn procedural() -> Self {
        let textures = BlockType::ALL
            .iter()
            .map(|block| match block {
                BlockType::Grass => Texture::noise_strips(0xFF4CAF50, 0xFF6D8B3A, 0xFF8B5A2B, 16, 1),
                BlockType::Dirt => Texture::noise_strips(0xFF8B5A2B, 0xFF8B5A2B, 0xFF8B5A2B, 16, 2),
                BlockType::Stone => Texture::noise_strips(0xFF8A8A8A, 0xFF8A8A8A, 0xFF8A8A8A, 16, 3),
            })
            .collect();
        Self { textures }
    }

    #[inline]
    pub fn get(&self, block: BlockType) -> &Texture {
        &self.textures[block.index()]
    }
}
