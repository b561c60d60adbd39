//! Mask blur
//!
//! Gaussian blur of 8-bit coverage masks approximated by three box blurs, and
//! the per-pixel combination of a blurred mask with its sharp source for each
//! [`BlurMode`].

use hudkit_types::BlurMode;

const BOX_PASSES: usize = 3;

/// Convert a user-facing blur radius into a gaussian sigma
pub fn sigma_from_radius(radius: f32) -> f32 {
    if radius <= 0.0 {
        0.0
    } else {
        radius * 0.577_35 + 0.5
    }
}

/// Pixels of padding needed around a shape so its blur is not cut off
pub fn extent(sigma: f32) -> u32 {
    (sigma * 3.0).ceil().max(0.0) as u32
}

/// Box widths (odd) whose successive application approximates a gaussian
fn box_sizes(sigma: f32) -> [usize; BOX_PASSES] {
    let n = BOX_PASSES as f32;
    let ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut lower = ideal.floor() as i32;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower + 2;

    let (l, s) = (lower as f32, sigma);
    let m = ((12.0 * s * s - n * l * l - 4.0 * n * l - 3.0 * n) / (-4.0 * l - 4.0)).round() as i32;

    let mut sizes = [0; BOX_PASSES];
    for (i, size) in sizes.iter_mut().enumerate() {
        *size = if (i as i32) < m { lower } else { upper } as usize;
    }
    sizes
}

/// Blur `mask` in place. Pixels outside the mask count as transparent.
pub fn gaussian_blur(mask: &mut [u8], width: usize, height: usize, sigma: f32) {
    if sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(mask.len(), width * height);

    let mut scratch = vec![0u8; mask.len()];
    for size in box_sizes(sigma) {
        let r = (size - 1) / 2;
        if r == 0 {
            continue;
        }
        // Horizontal then vertical
        box_pass(mask, &mut scratch, width, height, 1, width, r);
        box_pass(&scratch, mask, height, width, width, 1, r);
    }
}

/// One box blur over `count` lines of `len` pixels each
fn box_pass(
    src: &[u8],
    dst: &mut [u8],
    len: usize,
    count: usize,
    along: usize,
    across: usize,
    r: usize,
) {
    let div = (2 * r + 1) as u32;

    for line in 0..count {
        let base = line * across;
        let at = |i: usize| src[base + i * along] as u32;

        let mut sum: u32 = (0..len.min(r + 1)).map(at).sum();
        for i in 0..len {
            dst[base + i * along] = ((sum + div / 2) / div) as u8;
            if i + r + 1 < len {
                sum += at(i + r + 1);
            }
            if i >= r {
                sum -= at(i - r);
            }
        }
    }
}

/// Merge the blurred mask with the sharp one according to `mode`
pub fn combine(mode: BlurMode, sharp: &[u8], blurred: &mut [u8]) {
    debug_assert_eq!(sharp.len(), blurred.len());

    for (b, &s) in blurred.iter_mut().zip(sharp) {
        *b = match mode {
            BlurMode::Normal => *b,
            BlurMode::Solid => (*b).max(s),
            BlurMode::Outer => mul(*b, 255 - s),
            BlurMode::Inner => mul(*b, s),
        };
    }
}

#[inline]
fn mul(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, inset: usize) -> Vec<u8> {
        let mut mask = vec![0u8; size * size];
        for y in inset..size - inset {
            for x in inset..size - inset {
                mask[y * size + x] = 255;
            }
        }
        mask
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let mut mask = square(8, 2);
        let before = mask.clone();
        gaussian_blur(&mut mask, 8, 8, 0.0);
        assert_eq!(mask, before);
        assert_eq!(sigma_from_radius(0.0), 0.0);
    }

    #[test]
    fn test_box_sizes_are_odd() {
        for sigma in [0.6, 1.0, 2.5, 8.0, 46.7] {
            for size in box_sizes(sigma) {
                assert_eq!(size % 2, 1, "sigma {sigma}");
            }
        }
    }

    #[test]
    fn test_blur_spreads_and_softens_edges() {
        let mut mask = square(32, 10);
        gaussian_blur(&mut mask, 32, 32, 3.0);

        // Center of a 12px square stays mostly opaque
        assert!(mask[16 * 32 + 16] > 200);
        // Edge softened from both sides
        assert!(mask[16 * 32 + 10] < 255 && mask[16 * 32 + 10] > 0);
        assert!(mask[16 * 32 + 8] > 0);
        // Far corner untouched
        assert_eq!(mask[0], 0);
        // Symmetric
        assert_eq!(mask[16 * 32 + 8], mask[16 * 32 + 23]);
    }

    #[test]
    fn test_combine_modes() {
        let sharp = [255, 0, 255];
        let blurred = [100, 100, 255];

        let mut b = blurred;
        combine(BlurMode::Normal, &sharp, &mut b);
        assert_eq!(b, blurred);

        let mut b = blurred;
        combine(BlurMode::Solid, &sharp, &mut b);
        assert_eq!(b, [255, 100, 255]);

        let mut b = blurred;
        combine(BlurMode::Outer, &sharp, &mut b);
        assert_eq!(b, [0, 100, 0]);

        let mut b = blurred;
        combine(BlurMode::Inner, &sharp, &mut b);
        assert_eq!(b, [100, 0, 255]);
    }

    #[test]
    fn test_extent_covers_three_sigma() {
        assert_eq!(extent(0.0), 0);
        assert_eq!(extent(1.1), 4);
    }
}
