/// Seeded 2D Perlin gradient noise
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Gradient directions picked by `hash & 7`.
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

#[derive(Clone)]
pub struct Perlin2 {
    /// 256-entry shuffled table, duplicated so lookups never wrap
    perm: [u8; 512],
}

impl Perlin2 {
    /// Build the permutation table with a Fisher–Yates shuffle driven by `seed`.
    pub fn new(seed: u64) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Noise value at (x, y), roughly in [-1, 1]. Zero on lattice points.
    pub fn get(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let a = p[xi] as usize;
        let b = p[xi + 1] as usize;
        let aa = p[a + yi];
        let ab = p[a + yi + 1];
        let ba = p[b + yi];
        let bb = p[b + yi + 1];

        let bottom = lerp(u, grad(aa, xf, yf), grad(ba, xf - 1.0, yf));
        let top = lerp(u, grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0));
        lerp(v, bottom, top)
    }
}

/// 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let (gx, gy) = GRADIENTS[(hash & 0x0F) as usize & 7];
    gx * x + gy * y
}
