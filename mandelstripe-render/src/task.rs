use std::sync::Arc;

use mandelstripe_core::{iterations_for, ColorScheme, PlaneBounds, Viewport};

use crate::buffer::PixelBuffer;

/// Everything a worker needs to know about the view, captured by value.
///
/// Taking a copy here, rather than a reference to the live [`Viewport`],
/// lets the control thread keep mutating the viewport while workers render
/// an older frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub bounds: PlaneBounds,
    pub max_iterations: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub color_scheme: ColorScheme,
}

impl FrameSnapshot {
    pub fn of(viewport: &Viewport) -> Self {
        Self {
            bounds: viewport.bounds(),
            max_iterations: viewport.max_iterations(),
            screen_width: viewport.screen_width(),
            screen_height: viewport.screen_height(),
            color_scheme: viewport.color_scheme(),
        }
    }

    /// Packed color of pixel `(i, j)`.
    #[inline]
    pub fn pixel(&self, i: u32, j: u32) -> u32 {
        let n = iterations_for(
            i,
            j,
            &self.bounds,
            self.screen_width,
            self.screen_height,
            self.max_iterations,
        );
        self.color_scheme.color(n, self.max_iterations)
    }
}

/// One worker's share of a frame: rows `row_offset, row_offset + row_stride, …`.
///
/// A task is immutable once built and is consumed by [`run`](Self::run).
#[derive(Debug)]
pub struct RenderTask {
    frame: FrameSnapshot,
    row_offset: u32,
    row_stride: u32,
    generation: u32,
    pixels: Arc<PixelBuffer>,
}

impl RenderTask {
    /// `row_stride` must be non-zero.
    pub fn new(
        frame: FrameSnapshot,
        row_offset: u32,
        row_stride: u32,
        generation: u32,
        pixels: Arc<PixelBuffer>,
    ) -> Self {
        debug_assert!(row_stride > 0, "row stride must be non-zero");
        Self {
            frame,
            row_offset,
            row_stride,
            generation,
            pixels,
        }
    }

    pub fn frame(&self) -> &FrameSnapshot {
        &self.frame
    }

    pub fn row_offset(&self) -> u32 {
        self.row_offset
    }

    pub fn row_stride(&self) -> u32 {
        self.row_stride
    }

    /// Dispatch generation this task was built for.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Screen rows this task is responsible for, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        let height = self.frame.screen_height.min(self.pixels.height());
        (self.row_offset..height).step_by(self.row_stride.max(1) as usize)
    }

    /// Compute every assigned row and write it into the shared buffer.
    ///
    /// Returns the number of rows written.
    pub fn run(self) -> usize {
        let width = self.frame.screen_width.min(self.pixels.width());
        let mut row = vec![0u32; width as usize];
        let mut written = 0;
        for j in self.rows() {
            for (i, px) in (0..width).zip(row.iter_mut()) {
                *px = self.frame.pixel(i, j);
            }
            self.pixels.write_row(j, &row);
            written += 1;
        }
        written
    }
}
