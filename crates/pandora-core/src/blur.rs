//! Fast approximate Gaussian blur using a sliding-window box blur.
//!
//! Each iteration runs a horizontal pass into row-major side buffers and a
//! vertical pass back into the pixel buffer. Both passes keep a running sum
//! over a `2 * radius + 1` window, so the cost per pass is O(width * height)
//! regardless of radius. Edge samples are clamped to the nearest valid
//! row/column.
//!
//! The window average is taken with a multiply and a shift instead of a
//! division, using [`MUL_TABLE`] and [`SHG_TABLE`] indexed by radius.
//! Color channels are accumulated premultiplied by alpha and divided back
//! out after the vertical pass; fully transparent results carry no color.

use crate::{PixelBuffer, CHANNELS};
use tracing::debug;

/// Largest supported blur radius.
pub const MAX_RADIUS: usize = 255;

/// Maximum number of blur iterations.
pub const MAX_ITERATIONS: usize = 3;

const TABLE_LEN: usize = MAX_RADIUS + 1;

/// Multipliers for normalizing a window sum, indexed by radius.
pub const MUL_TABLE: [u64; TABLE_LEN] = NORMALIZE_TABLES.0;

/// Shift amounts paired with [`MUL_TABLE`], indexed by radius.
pub const SHG_TABLE: [u32; TABLE_LEN] = NORMALIZE_TABLES.1;

const NORMALIZE_TABLES: ([u64; TABLE_LEN], [u32; TABLE_LEN]) = build_normalize_tables();

/// Build `(mul, shg)` pairs with `(sum * mul) >> shg == sum / n` for every
/// `sum <= 255 * n`, where `n = (2r + 1)^2` is the two-pass window area.
///
/// With `mul = ceil(2^shg / n)` the rounding excess is `sum * e / 2^shg`
/// for some `e < n`, which stays below `1 / n` once `2^shg > 255 * n^2`.
const fn build_normalize_tables() -> ([u64; TABLE_LEN], [u32; TABLE_LEN]) {
    let mut mul = [0u64; TABLE_LEN];
    let mut shg = [0u32; TABLE_LEN];
    let mut r = 0;
    while r < TABLE_LEN {
        let side = (2 * r + 1) as u64;
        let n = side * side;
        let shift = 64 - (255 * n * n).leading_zeros();
        mul[r] = ((1u64 << shift) + n - 1) / n;
        shg[r] = shift;
        r += 1;
    }
    (mul, shg)
}

/// Blur `buffer` in place.
///
/// * `radius` - Window radius; truncated to an integer and capped at
///   [`MAX_RADIUS`]. NaN or values below 1 leave the buffer untouched.
/// * `iterations` - Number of blur passes; truncated and clamped to
///   `1..=3`. NaN counts as 1.
pub fn box_blur(buffer: &mut PixelBuffer, radius: f64, iterations: f64) {
    if radius.is_nan() || radius < 1.0 {
        return;
    }
    let radius = (radius.trunc() as usize).min(MAX_RADIUS);
    let iterations = if iterations.is_nan() {
        1
    } else {
        iterations.trunc().clamp(1.0, MAX_ITERATIONS as f64) as usize
    };

    let width = buffer.width as usize;
    let height = buffer.height as usize;
    if width == 0 || height == 0 {
        return;
    }
    debug!(width, height, radius, iterations, "box blur");

    let wh = width * height;
    let wm = width - 1;
    let hm = height - 1;
    let rad1 = radius + 1;

    // Sliding-window entry/exit positions, clamped to the image
    let enter_x: Vec<usize> = (0..width).map(|x| (x + rad1).min(wm)).collect();
    let leave_x: Vec<usize> = (0..width).map(|x| x.saturating_sub(radius)).collect();
    let enter_y: Vec<usize> = (0..height).map(|y| (y + rad1).min(hm) * width).collect();
    let leave_y: Vec<usize> = (0..height).map(|y| y.saturating_sub(radius) * width).collect();

    let mut r = vec![0u32; wh];
    let mut g = vec![0u32; wh];
    let mut b = vec![0u32; wh];
    let mut a = vec![0u32; wh];

    let mul_sum = MUL_TABLE[radius];
    let shg_sum = SHG_TABLE[radius];

    for _ in 0..iterations {
        let pixels = &buffer.pixels;

        // Horizontal pass
        for y in 0..height {
            let row = y * width;
            let sample = |x: usize| premultiplied(pixels, (row + x) * CHANNELS);

            let [pr, pg, pb, pa] = sample(0);
            let (mut rsum, mut gsum, mut bsum, mut asum) =
                (pr * rad1 as u32, pg * rad1 as u32, pb * rad1 as u32, pa * rad1 as u32);

            for i in 1..=radius {
                let [pr, pg, pb, pa] = sample(i.min(wm));
                rsum += pr;
                gsum += pg;
                bsum += pb;
                asum += pa;
            }

            for x in 0..width {
                let yi = row + x;
                r[yi] = rsum;
                g[yi] = gsum;
                b[yi] = bsum;
                a[yi] = asum;

                let [nr, ng, nb, na] = sample(enter_x[x]);
                let [or, og, ob, oa] = sample(leave_x[x]);
                rsum = rsum + nr - or;
                gsum = gsum + ng - og;
                bsum = bsum + nb - ob;
                asum = asum + na - oa;
            }
        }

        // Vertical pass
        let pixels = &mut buffer.pixels;
        for x in 0..width {
            let (mut rsum, mut gsum, mut bsum, mut asum) = (
                r[x] as u64 * rad1 as u64,
                g[x] as u64 * rad1 as u64,
                b[x] as u64 * rad1 as u64,
                a[x] as u64 * rad1 as u64,
            );

            for i in 1..=radius {
                let yp = i.min(hm) * width + x;
                rsum += r[yp] as u64;
                gsum += g[yp] as u64;
                bsum += b[yp] as u64;
                asum += a[yp] as u64;
            }

            for y in 0..height {
                let yi = (y * width + x) * CHANNELS;
                let alpha = ((asum * mul_sum) >> shg_sum) as u8;
                pixels[yi + 3] = alpha;
                if alpha > 0 {
                    // Un-premultiply: the alpha-weighted color average
                    let half = asum / 2;
                    pixels[yi] = ((rsum + half) / asum) as u8;
                    pixels[yi + 1] = ((gsum + half) / asum) as u8;
                    pixels[yi + 2] = ((bsum + half) / asum) as u8;
                } else {
                    pixels[yi] = 0;
                    pixels[yi + 1] = 0;
                    pixels[yi + 2] = 0;
                }

                let p1 = x + enter_y[y];
                let p2 = x + leave_y[y];
                rsum = rsum + r[p1] as u64 - r[p2] as u64;
                gsum = gsum + g[p1] as u64 - g[p2] as u64;
                bsum = bsum + b[p1] as u64 - b[p2] as u64;
                asum = asum + a[p1] as u64 - a[p2] as u64;
            }
        }
    }
}

/// Read the pixel at byte offset `idx` as `[r*a, g*a, b*a, a]`.
#[inline]
fn premultiplied(pixels: &[u8], idx: usize) -> [u32; 4] {
    let alpha = pixels[idx + 3] as u32;
    [
        pixels[idx] as u32 * alpha,
        pixels[idx + 1] as u32 * alpha,
        pixels[idx + 2] as u32 * alpha,
        alpha,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_tables_normalize_exactly() {
        for radius in 0..=MAX_RADIUS {
            let side = (2 * radius + 1) as u64;
            let n = side * side;
            for v in [0u64, 1, 127, 128, 205, 254, 255] {
                let sum = v * n;
                assert_eq!(
                    (sum * MUL_TABLE[radius]) >> SHG_TABLE[radius],
                    v,
                    "radius {} value {}",
                    radius,
                    v
                );
                // One short of the next multiple still floors down
                if v > 0 {
                    assert_eq!(((sum - 1) * MUL_TABLE[radius]) >> SHG_TABLE[radius], v - 1);
                }
            }
        }
    }

    #[test]
    fn test_radius_below_one_is_noop() {
        let src = checkerboard(6, 5);
        for radius in [0.0, 0.99, -3.0, f64::NAN] {
            let mut buf = src.clone();
            box_blur(&mut buf, radius, 1.0);
            assert_eq!(buf, src, "radius {} should be a no-op", radius);
        }
    }

    #[test]
    fn test_uniform_buffer_unchanged() {
        let src = PixelBuffer::filled(9, 7, [205, 17, 99, 205]);
        for radius in [1.0, 3.0, 10.0, 255.0] {
            for iterations in [1.0, 2.0, 3.0] {
                let mut buf = src.clone();
                box_blur(&mut buf, radius, iterations);
                assert_eq!(buf, src, "radius {} iterations {}", radius, iterations);
            }
        }
    }

    #[test]
    fn test_transparent_pixels_lose_color() {
        let mut buf = PixelBuffer::filled(4, 4, [90, 80, 70, 0]);
        box_blur(&mut buf, 2.0, 1.0);
        assert!(buf.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_blur_smooths_checkerboard() {
        let mut buf = checkerboard(8, 8);
        box_blur(&mut buf, 1.0, 1.0);
        for chunk in buf.pixels.chunks_exact(CHANNELS) {
            assert!(chunk[0] > 60 && chunk[0] < 200, "value {} not smoothed", chunk[0]);
            assert_eq!(chunk[3], 255);
        }
    }

    #[test]
    fn test_transparent_neighbors_do_not_darken() {
        // A red pixel next to transparent black keeps its hue after blurring
        let mut pixels = vec![0u8; 3 * 4];
        pixels[4..8].copy_from_slice(&[255, 0, 0, 255]);
        let mut buf = PixelBuffer::new(3, 1, pixels).unwrap();
        box_blur(&mut buf, 1.0, 1.0);
        let center = buf.pixel(1, 0).unwrap();
        assert_eq!(&center[..3], &[255, 0, 0]);
        assert!(center[3] > 0 && center[3] < 255);
    }

    #[test]
    fn test_iterations_clamped() {
        let src = checkerboard(6, 6);

        let mut three = src.clone();
        box_blur(&mut three, 1.0, 3.0);
        let mut many = src.clone();
        box_blur(&mut many, 1.0, 50.0);
        assert_eq!(three, many);

        let mut one = src.clone();
        box_blur(&mut one, 1.0, 1.0);
        let mut nan = src.clone();
        box_blur(&mut nan, 1.0, f64::NAN);
        let mut zero = src.clone();
        box_blur(&mut zero, 1.0, 0.0);
        assert_eq!(one, nan);
        assert_eq!(one, zero);
    }

    #[test]
    fn test_radius_truncated() {
        let src = checkerboard(6, 6);
        let mut a = src.clone();
        box_blur(&mut a, 2.9, 1.0);
        let mut b = src.clone();
        box_blur(&mut b, 2.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_pixel_image() {
        let src = PixelBuffer::filled(1, 1, [12, 34, 56, 255]);
        let mut buf = src.clone();
        box_blur(&mut buf, 5.0, 3.0);
        assert_eq!(buf, src);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Blurring a constant field returns the same field.
        #[test]
        fn prop_uniform_field_preserved(
            (width, height) in (1u32..=24, 1u32..=24),
            (r, g, b, a) in (any::<u8>(), any::<u8>(), any::<u8>(), 1u8..=255),
            radius in 1u32..=40,
            iterations in 1u32..=3,
        ) {
            let src = PixelBuffer::filled(width, height, [r, g, b, a]);
            let mut buf = src.clone();
            box_blur(&mut buf, radius as f64, iterations as f64);
            prop_assert_eq!(buf, src);
        }

        /// Property: Blurring never changes dimensions or byte length.
        #[test]
        fn prop_dimensions_preserved(
            (width, height) in (1u32..=16, 1u32..=16),
            seed in any::<u8>(),
            radius in 1u32..=8,
        ) {
            let len = PixelBuffer::byte_len(width, height);
            let pixels: Vec<u8> = (0..len).map(|i| ((i * 37) as u8).wrapping_add(seed)).collect();
            let mut buf = PixelBuffer::new(width, height, pixels).unwrap();
            box_blur(&mut buf, radius as f64, 1.0);
            prop_assert_eq!(buf.width, width);
            prop_assert_eq!(buf.height, height);
            prop_assert_eq!(buf.pixels.len(), len);
        }
    }
}
