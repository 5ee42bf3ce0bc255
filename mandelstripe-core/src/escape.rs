use serde::{Deserialize, Serialize};

use crate::bounds::PlaneBounds;

/// Packed ARGB for points inside the set.
pub const IN_SET_COLOR: u32 = 0xff00_0000;

/// Orbits with `|z| >= 2` escape. `|z|` is taken with `hypot`; a squared-norm
/// test rounds differently for points right on the circle.
const ESCAPE_RADIUS: f64 = 2.0;

/// Number of `z ← z² + c` steps before the orbit of pixel `(i, j)` escapes.
///
/// The count is the zero-based index of the escaping step, so a point that
/// escapes on the very first step (e.g. `c = 2`) returns `0`.  A return
/// value equal to `max_iterations` means the orbit never escaped and the
/// point is treated as inside the set.
#[inline]
pub fn iterations_for(
    i: u32,
    j: u32,
    bounds: &PlaneBounds,
    screen_width: u32,
    screen_height: u32,
    max_iterations: u32,
) -> u32 {
    let (c_re, c_im) = bounds.pixel_to_plane(i, j, screen_width, screen_height);
    escape_count(c_re, c_im, max_iterations)
}

/// Escape-time count for a single plane point `c = c_re + c_im·i`.
#[inline]
pub fn escape_count(c_re: f64, c_im: f64, max_iterations: u32) -> u32 {
    let mut z_re = 0.0;
    let mut z_im = 0.0;

    for n in 0..max_iterations {
        // z = z² + c
        let re = z_re * z_re - z_im * z_im + c_re;
        z_im = 2.0 * z_re * z_im + c_im;
        z_re = re;

        if z_re.hypot(z_im) >= ESCAPE_RADIUS {
            return n;
        }
    }

    max_iterations
}

/// Bernstein-polynomial palette.
///
/// The arithmetic is evaluated left to right in `f64` and truncated, which
/// keeps the output stable across releases for image comparisons.
#[inline]
pub fn color_for(count: u32, max_iterations: u32) -> u32 {
    if count >= max_iterations {
        return IN_SET_COLOR;
    }

    let f = count as f64 / max_iterations as f64;
    let h = 1.0 - f;

    let r = (9.0 * h * f * f * f * 255.0) as u32;
    let g = (15.0 * h * h * f * f * 255.0) as u32;
    let b = (8.5 * h * h * h * f * 255.0) as u32;

    pack_rgb(r, g, b)
}

#[inline]
fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    IN_SET_COLOR | (r << 16) | (g << 8) | b
}

/// Maps an escape count to a packed ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Smooth blue-orange gradient from [`color_for`].
    #[default]
    Bernstein,
    /// Linear black-to-white ramp.
    Grayscale,
    /// Red-heavy ramp, brightest near the boundary.
    Ember,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [Self::Bernstein, Self::Grayscale, Self::Ember];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bernstein => "Bernstein",
            Self::Grayscale => "Grayscale",
            Self::Ember => "Ember",
        }
    }

    /// The scheme after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Color for `count` out of `max_iterations`. In-set points are always
    /// opaque black.
    #[inline]
    pub fn color(self, count: u32, max_iterations: u32) -> u32 {
        if count >= max_iterations {
            return IN_SET_COLOR;
        }
        match self {
            Self::Bernstein => color_for(count, max_iterations),
            Self::Grayscale => {
                let v = (count as f64 / max_iterations as f64 * 255.0) as u32;
                pack_rgb(v, v, v)
            }
            Self::Ember => {
                let f = count as f64 / max_iterations as f64;
                let r = (f.sqrt() * 255.0) as u32;
                let g = (f * f * 255.0) as u32;
                let b = (f * f * f * f * 128.0) as u32;
                pack_rgb(r, g, b)
            }
        }
    }
}
