//! Seeded hashing and gradient noise for the synthetic world.
//! Everything is a pure function of its inputs; no RNG state in per-cell code.

/// Murmur3 32-bit finalizer.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^ (h >> 16)
}

/// Murmur3 64-bit finalizer.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    k ^= k >> 33;
    k = k.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    k ^ (k >> 33)
}

/// Independent 32-bit stream seed for one use of the world seed.
#[inline]
pub fn salted(seed: i32, salt: u64) -> u32 {
    fmix64(seed as u32 as u64 ^ salt) as u32
}

#[inline]
pub fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let h = fmix32(seed.wrapping_add((ix as u32).wrapping_mul(0x9E37_79B1)));
    fmix32(h ^ (iy as u32).wrapping_mul(0x27D4_EB2F))
}

/// Hash of a lattice point mapped to `[0, 1)`.
#[inline]
pub fn hash2_unit(ix: i32, iy: i32, seed: u32) -> f32 {
    (hash2(ix, iy, seed) >> 8) as f32 / 16777216.0
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn corner(hash: u32, dx: f32, dy: f32) -> f32 {
    // Eight gradients: axes and diagonals.
    const D: f32 = std::f32::consts::FRAC_1_SQRT_2;
    match hash & 7 {
        0 => dx,
        1 => -dx,
        2 => dy,
        3 => -dy,
        4 => D * (dx + dy),
        5 => D * (dx - dy),
        6 => D * (-dx + dy),
        _ => D * (-dx - dy),
    }
}

/// 2D gradient noise, roughly in `[-1, 1]`.
pub fn gradient_noise(x: f32, y: f32, seed: u32) -> f32 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let fx = x - ix as f32;
    let fy = y - iy as f32;

    let v00 = corner(hash2(ix, iy, seed), fx, fy);
    let v10 = corner(hash2(ix + 1, iy, seed), fx - 1.0, fy);
    let v01 = corner(hash2(ix, iy + 1, seed), fx, fy - 1.0);
    let v11 = corner(hash2(ix + 1, iy + 1, seed), fx - 1.0, fy - 1.0);

    let sx = fade(fx);
    lerp(lerp(v00, v10, sx), lerp(v01, v11, sx), fade(fy)) * std::f32::consts::SQRT_2
}

/// Fractal sum of `octaves` gradient noise layers, normalized by total amplitude.
pub fn fbm(x: f32, y: f32, seed: u32, octaves: u32, lacunarity: f32, gain: f32) -> f32 {
    let mut sum = 0.0;
    let mut norm = 0.0;
    let mut amp = 1.0;
    let mut freq = 1.0;
    for i in 0..octaves {
        sum += gradient_noise(x * freq, y * freq, seed.wrapping_add(i)) * amp;
        norm += amp;
        amp *= gain;
        freq *= lacunarity;
    }
    if norm > 0.0 { sum / norm } else { 0.0 }
}

/// Draw `channel` of item `index` from a seeded stream, scaled to `[lo, hi)`.
#[inline]
pub fn draw_range(index: i32, channel: i32, seed: u32, lo: f32, hi: f32) -> f32 {
    lo + hash2_unit(index, channel, seed) * (hi - lo)
}

/// Draw `channel` of item `index` as an index below `n`.
#[inline]
pub fn draw_index(index: i32, channel: i32, seed: u32, n: usize) -> usize {
    hash2(index, channel, seed) as usize % n
}
