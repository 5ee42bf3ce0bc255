use tracing::{debug, warn};

use crate::bounds::PlaneBounds;
use crate::error::CoreError;
use crate::escape::ColorScheme;
use crate::selection::{translate_selection, SelectionRect};

/// Default real-axis extent at zoom 1.0.
pub const DEFAULT_X_RANGE: f64 = 3.0;
/// Default imaginary-axis extent at zoom 1.0.
pub const DEFAULT_Y_RANGE: f64 = 2.5;
pub const DEFAULT_CENTER: (f64, f64) = (-1.0, 0.0);
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Per-step zoom multipliers.
pub const ZOOM_IN_FACTOR: f64 = 0.95;
pub const ZOOM_OUT_FACTOR: f64 = 1.05;
/// Pan distance per step, as a fraction of the current zoom.
pub const PAN_STEP: f64 = 0.1;
pub const ITERATION_STEP: u32 = 10;

/// The visible region of the complex plane and the knobs that shape it.
///
/// All state changes go through the named operations below. Each one
/// recomputes the derived [`PlaneBounds`] (when geometry changed) and marks
/// the viewport dirty so the next frame is dispatched.
#[derive(Debug, Clone)]
pub struct Viewport {
    screen_width: u32,
    screen_height: u32,

    center_x: f64,
    center_y: f64,
    zoom: f64,
    x_range: f64,
    y_range: f64,
    bounds: PlaneBounds,

    max_iterations: u32,
    color_scheme: ColorScheme,

    selection: SelectionRect,
    dragging: bool,

    dirty: bool,
}

impl Viewport {
    /// Default view for a `screen_width x screen_height` pixel surface.
    ///
    /// The new viewport starts dirty so the first frame gets rendered.
    pub fn new(screen_width: u32, screen_height: u32) -> crate::Result<Self> {
        if screen_width == 0 || screen_height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: screen_width,
                height: screen_height,
            });
        }
        let mut vp = Self {
            screen_width,
            screen_height,
            center_x: DEFAULT_CENTER.0,
            center_y: DEFAULT_CENTER.1,
            zoom: 1.0,
            x_range: DEFAULT_X_RANGE,
            y_range: DEFAULT_Y_RANGE,
            bounds: PlaneBounds::around(
                DEFAULT_CENTER.0,
                DEFAULT_CENTER.1,
                1.0,
                DEFAULT_X_RANGE,
                DEFAULT_Y_RANGE,
            ),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            color_scheme: ColorScheme::default(),
            selection: SelectionRect::EMPTY,
            dragging: false,
            dirty: false,
        };
        vp.recompute_bounds();
        Ok(vp)
    }

    // -- Accessors --

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn x_range(&self) -> f64 {
        self.x_range
    }

    pub fn y_range(&self) -> f64 {
        self.y_range
    }

    pub fn bounds(&self) -> PlaneBounds {
        self.bounds
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// The in-progress drag rectangle, for drawing an overlay.
    pub fn selection(&self) -> SelectionRect {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// `true` when the pixel buffer no longer reflects this viewport.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge that a frame for the current state has been dispatched.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Window-title summary of the current view.
    pub fn title(&self) -> String {
        let b = &self.bounds;
        format!(
            "{} iterations -- top-left@({:.6},{:.6}) -- bottom-right@({:.6},{:.6})",
            self.max_iterations, b.x_min, b.y_min, b.x_max, b.y_max
        )
    }

    // -- Navigation --

    /// Return to the default centre, zoom, and iteration cap.
    pub fn reset_bounds(&mut self) {
        self.zoom = 1.0;
        (self.center_x, self.center_y) = DEFAULT_CENTER;
        self.max_iterations = DEFAULT_MAX_ITERATIONS;
        self.recompute_bounds();
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_IN_FACTOR;
        self.recompute_bounds();
    }

    pub fn zoom_out(&mut self) {
        self.zoom *= ZOOM_OUT_FACTOR;
        self.recompute_bounds();
    }

    // Pan speed scales with zoom so the on-screen step stays constant.

    pub fn move_up(&mut self) {
        self.center_y -= PAN_STEP * self.zoom;
        self.recompute_bounds();
    }

    pub fn move_down(&mut self) {
        self.center_y += PAN_STEP * self.zoom;
        self.recompute_bounds();
    }

    pub fn move_left(&mut self) {
        self.center_x -= PAN_STEP * self.zoom;
        self.recompute_bounds();
    }

    pub fn move_right(&mut self) {
        self.center_x += PAN_STEP * self.zoom;
        self.recompute_bounds();
    }

    // -- Iterations and coloring --

    pub fn increase_iterations(&mut self) {
        self.max_iterations = self.max_iterations.saturating_add(ITERATION_STEP);
        self.dirty = true;
    }

    /// Lower the iteration cap by one step. No-op once the cap is zero.
    pub fn decrease_iterations(&mut self) {
        if self.max_iterations > 0 {
            self.max_iterations = self.max_iterations.saturating_sub(ITERATION_STEP);
            self.dirty = true;
        }
    }

    pub fn next_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
        debug!(scheme = self.color_scheme.label(), "Color scheme changed");
        self.dirty = true;
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if scheme != self.color_scheme {
            self.color_scheme = scheme;
            self.dirty = true;
        }
    }

    // -- Drag-to-zoom --

    pub fn begin_selection(&mut self, x: i32, y: i32) {
        self.selection = SelectionRect::at(x, y);
        self.dragging = true;
    }

    pub fn update_selection(&mut self, x: i32, y: i32) {
        if self.dragging {
            self.selection.w = x - self.selection.x;
            self.selection.h = y - self.selection.y;
        }
    }

    /// Finish a drag at `(x, y)`, zooming into the selected rectangle.
    ///
    /// Clicks and drags below the minimum selection size leave the view
    /// unchanged.  The selection and drag state are always cleared and the
    /// viewport is always marked dirty.
    pub fn end_selection(&mut self, x: i32, y: i32) {
        if self.dragging {
            let origin = (self.selection.x, self.selection.y);
            match translate_selection(
                origin,
                (x, y),
                &self.bounds,
                self.screen_width,
                self.screen_height,
            ) {
                Some(target) => {
                    self.center_x = target.center_x;
                    self.center_y = target.center_y;
                    self.zoom *= target.zoom_factor;
                    debug!(
                        zoom = self.zoom,
                        center_x = self.center_x,
                        center_y = self.center_y,
                        "Zoomed to selection"
                    );
                }
                None => warn!(?origin, end = ?(x, y), "Selection too small, ignoring"),
            }
        } else {
            warn!(x, y, "Selection ended without a drag in progress");
        }

        self.recompute_bounds();
        self.selection = SelectionRect::EMPTY;
        self.dragging = false;
        self.dirty = true;
    }

    fn recompute_bounds(&mut self) {
        self.bounds = PlaneBounds::around(
            self.center_x,
            self.center_y,
            self.zoom,
            self.x_range,
            self.y_range,
        );
        self.dirty = true;
    }
}
