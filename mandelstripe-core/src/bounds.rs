/// A rectangle on the complex plane, `[x_min, x_max] x [y_min, y_max]`.
///
/// Pixel `(0, 0)` maps to `(x_min, y_min)`; increasing pixel-y moves towards
/// `y_max`.  There is no axis flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlaneBounds {
    /// Bounds of a `zoom`-scaled `x_range x y_range` window centred on
    /// `(center_x, center_y)`.
    pub fn around(center_x: f64, center_y: f64, zoom: f64, x_range: f64, y_range: f64) -> Self {
        Self {
            x_min: center_x - zoom * (x_range / 2.0),
            x_max: center_x + zoom * (x_range / 2.0),
            y_min: center_y - zoom * (y_range / 2.0),
            y_max: center_y + zoom * (y_range / 2.0),
        }
    }

    /// Horizontal extent in plane units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent in plane units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Map a screen pixel to its plane coordinate `(re, im)`.
    ///
    /// The map is linear over `[0, screen_width) x [0, screen_height)`: the
    /// left/top edge lands exactly on `x_min`/`y_min` and the far edge is
    /// never reached.
    #[inline]
    pub fn pixel_to_plane(&self, i: u32, j: u32, screen_width: u32, screen_height: u32) -> (f64, f64) {
        (
            self.x_min + (i as f64 / screen_width as f64) * self.width(),
            self.y_min + (j as f64 / screen_height as f64) * self.height(),
        )
    }
}
