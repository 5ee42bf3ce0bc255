use crate::bounds::PlaneBounds;

/// Selections whose diagonal is shorter than this (in pixels) are treated as
/// clicks and do not zoom.
pub const MIN_SELECTION_DIAGONAL: f64 = 4.0;

/// Screen-space drag rectangle.  `w`/`h` are relative to the drag origin and
/// may be negative when the pointer moves up or left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SelectionRect {
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    /// Zero-size rectangle anchored at `(x, y)`.
    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y, w: 0, h: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 && self.h == 0
    }
}

/// New centre and zoom produced by a drag-to-zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTarget {
    pub center_x: f64,
    pub center_y: f64,
    /// Multiplier to apply to the current zoom.
    pub zoom_factor: f64,
}

/// Translate a finished drag from `origin` to `(x, y)` into a [`ZoomTarget`].
///
/// The new centre is the plane point under the (integer) midpoint of the
/// selection.  The zoom factor is the ratio of the selection's diagonal to
/// the screen's diagonal, so a full-screen drag keeps the zoom and a small
/// drag zooms in sharply.  Returns `None` for selections below
/// [`MIN_SELECTION_DIAGONAL`], which would otherwise collapse the zoom to
/// (nearly) zero.
pub fn translate_selection(
    origin: (i32, i32),
    end: (i32, i32),
    bounds: &PlaneBounds,
    screen_width: u32,
    screen_height: u32,
) -> Option<ZoomTarget> {
    let (x_start, x_end) = (origin.0.min(end.0), origin.0.max(end.0));
    let (y_start, y_end) = (origin.1.min(end.1), origin.1.max(end.1));

    let sel_w = (x_end as i64 - x_start as i64) as f64;
    let sel_h = (y_end as i64 - y_start as i64) as f64;
    let selection_diagonal = sel_w.hypot(sel_h);
    if selection_diagonal < MIN_SELECTION_DIAGONAL {
        return None;
    }
    let screen_diagonal = (screen_width as f64).hypot(screen_height as f64);

    let x_mid = x_start as f64 + (sel_w / 2.0).trunc();
    let y_mid = y_start as f64 + (sel_h / 2.0).trunc();

    Some(ZoomTarget {
        center_x: bounds.x_min + (x_mid / screen_width as f64) * bounds.width(),
        center_y: bounds.y_min + (y_mid / screen_height as f64) * bounds.height(),
        zoom_factor: selection_diagonal / screen_diagonal,
    })
}
