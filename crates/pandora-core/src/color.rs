//! Color-space conversions between RGB, HSL, HSV and CMYK.
//!
//! RGB values are on the 0-255 scale (as `f64`, so intermediate results
//! outside the byte range survive until write-back). HSL, HSV saturation and
//! value, and CMYK components are normalized to 0-1.

/// RGB triple on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue, saturation, lightness, all normalized to 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Hue in degrees (0-360, or -1 for black), saturation and value in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Cyan, magenta, yellow, key, normalized to 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

/// Convert RGB (0-255) to normalized HSL.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h / 6.0, s, l }
}

/// Convert normalized HSL to RGB (0-255).
///
/// Zero saturation yields an achromatic pixel `r = g = b = l * 255`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    if s == 0.0 {
        let v = l * 255.0;
        return Rgb { r: v, g: v, b: v };
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb {
        r: hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        g: hue_to_channel(p, q, h) * 255.0,
        b: hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    }
}

#[inline]
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert RGB (0-255) to HSV with hue in degrees.
///
/// A black pixel (max channel 0) has no defined hue; it is reported as
/// `h = -1` with `s = 0`. Gray pixels get hue 0.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if max == 0.0 {
        return Hsv {
            h: -1.0,
            s: 0.0,
            v: max,
        };
    }
    if delta == 0.0 {
        return Hsv {
            h: 0.0,
            s: 0.0,
            v: max,
        };
    }

    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    Hsv {
        h,
        s: delta / max,
        v: max,
    }
}

/// Convert RGB (0-255) to normalized CMYK.
pub fn rgb_to_cmyk(r: f64, g: f64, b: f64) -> Cmyk {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;
    let k = 1.0 - r.max(g).max(b);

    if k >= 1.0 {
        return Cmyk {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 1.0,
        };
    }

    Cmyk {
        c: (1.0 - r - k) / (1.0 - k),
        m: (1.0 - g - k) / (1.0 - k),
        y: (1.0 - b - k) / (1.0 - k),
        k,
    }
}

/// Convert normalized CMYK to RGB (0-255).
pub fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> Rgb {
    Rgb {
        r: 255.0 * (1.0 - c) * (1.0 - k),
        g: 255.0 * (1.0 - m) * (1.0 - k),
        b: 255.0 * (1.0 - y) * (1.0 - k),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: HSL round trip reproduces every RGB triple within one unit.
        #[test]
        fn prop_hsl_round_trip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let hsl = rgb_to_hsl(r as f64, g as f64, b as f64);
            let rgb = hsl_to_rgb(hsl.h, hsl.s, hsl.l);
            prop_assert!((rgb.r - r as f64).abs() <= 1.0, "r {} -> {}", r, rgb.r);
            prop_assert!((rgb.g - g as f64).abs() <= 1.0, "g {} -> {}", g, rgb.g);
            prop_assert!((rgb.b - b as f64).abs() <= 1.0, "b {} -> {}", b, rgb.b);
        }

        /// Property: HSL components stay normalized.
        #[test]
        fn prop_hsl_normalized(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let hsl = rgb_to_hsl(r as f64, g as f64, b as f64);
            prop_assert!((0.0..1.0).contains(&hsl.h));
            prop_assert!((0.0..=1.0).contains(&hsl.s));
            prop_assert!((0.0..=1.0).contains(&hsl.l));
        }
    }
}
