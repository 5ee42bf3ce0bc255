use std::sync::Arc;

use tracing::info;

use mandelstripe_core::{SelectionRect, Viewport};

use crate::buffer::PixelBuffer;
use crate::dispatch::{Dispatcher, FrameInfo};
use crate::error::RenderError;
use crate::pool::WorkerPool;
use crate::progress::RenderProgress;
use crate::queue::TaskQueue;

/// The control-thread side of the engine.
///
/// Owns the viewport, the shared pixel buffer, and the worker pool.  A host
/// loop mutates the view through [`viewport_mut`](Self::viewport_mut), calls
/// [`poll_frame`](Self::poll_frame) once per tick, and presents
/// [`pixels`](Self::pixels) on its own cadence. Nothing here blocks on the
/// workers.
pub struct Explorer {
    viewport: Viewport,
    pixels: Arc<PixelBuffer>,
    progress: Arc<RenderProgress>,
    dispatcher: Dispatcher,
    pool: WorkerPool,
    running: bool,
}

impl Explorer {
    /// Start an engine for a `screen_width x screen_height` surface rendered
    /// by `thread_count` workers.
    pub fn new(screen_width: u32, screen_height: u32, thread_count: usize) -> crate::Result<Self> {
        let stripes =
            u32::try_from(thread_count).map_err(|_| RenderError::InvalidThreadCount(thread_count))?;
        let viewport = Viewport::new(screen_width, screen_height)?;

        let pixels = Arc::new(PixelBuffer::new(screen_width, screen_height));
        let queue = Arc::new(TaskQueue::new());
        let progress = Arc::new(RenderProgress::new());
        let pool = WorkerPool::spawn(thread_count, Arc::clone(&queue), Arc::clone(&progress))?;
        let dispatcher =
            Dispatcher::new(queue, Arc::clone(&progress), Arc::clone(&pixels), stripes)?;

        info!(
            width = screen_width,
            height = screen_height,
            threads = thread_count,
            "Explorer ready"
        );

        Ok(Self {
            viewport,
            pixels,
            progress,
            dispatcher,
            pool,
            running: true,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Entry point for input handling; every mutation marks the view dirty.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Dispatch a new frame if the view changed since the last one.
    ///
    /// Returns the frame summary when a dispatch happened; that is the point
    /// at which a presenter should refresh its title.
    pub fn poll_frame(&mut self) -> Option<FrameInfo> {
        if !self.running {
            return None;
        }
        self.dispatcher.dispatch_if_dirty(&mut self.viewport)
    }

    /// Shared pixel surface, packed ARGB, row-major.
    pub fn pixels(&self) -> &Arc<PixelBuffer> {
        &self.pixels
    }

    pub fn snapshot(&self) -> Vec<u32> {
        self.pixels.snapshot()
    }

    /// Drag rectangle to draw over the image.
    pub fn selection(&self) -> SelectionRect {
        self.viewport.selection()
    }

    /// `(done, total)` tasks for the most recent dispatch.
    pub fn progress(&self) -> (usize, usize) {
        self.progress.progress()
    }

    /// `true` once every stripe of the latest frame has been written.
    pub fn is_frame_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn thread_count(&self) -> usize {
        self.pool.thread_count()
    }

    /// Ask the host loop to finish. No further frames are dispatched.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the workers and wait for them.  Also runs on drop.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.pool.shutdown();
    }
}

impl Drop for Explorer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
