use std::sync::Arc;

use tracing::debug;

use mandelstripe_core::Viewport;

use crate::buffer::PixelBuffer;
use crate::error::RenderError;
use crate::progress::RenderProgress;
use crate::queue::TaskQueue;
use crate::task::{FrameSnapshot, RenderTask};

/// Summary of a dispatched frame, handed to the presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    /// Window-title text for the dispatched view.
    pub title: String,
    pub generation: u32,
    pub tasks: usize,
}

/// Split a frame into `stripes` interleaved row sets.
///
/// Task `r` owns rows `r, r + stripes, r + 2·stripes, …`.  Interleaving keeps
/// a half-finished frame evenly covered instead of leaving the bottom blank.
pub fn build_stripe_tasks(
    frame: FrameSnapshot,
    stripes: u32,
    generation: u32,
    pixels: &Arc<PixelBuffer>,
) -> Vec<RenderTask> {
    (0..stripes)
        .map(|r| RenderTask::new(frame, r, stripes, generation, Arc::clone(pixels)))
        .collect()
}

/// Turns dirty viewports into batches of stripe tasks.
#[derive(Debug)]
pub struct Dispatcher {
    queue: Arc<TaskQueue<RenderTask>>,
    progress: Arc<RenderProgress>,
    pixels: Arc<PixelBuffer>,
    stripes: u32,
}

impl Dispatcher {
    /// One stripe per worker; `stripes` must be non-zero.
    pub fn new(
        queue: Arc<TaskQueue<RenderTask>>,
        progress: Arc<RenderProgress>,
        pixels: Arc<PixelBuffer>,
        stripes: u32,
    ) -> crate::Result<Self> {
        if stripes == 0 {
            return Err(RenderError::InvalidThreadCount(0));
        }
        Ok(Self {
            queue,
            progress,
            pixels,
            stripes,
        })
    }

    /// If `viewport` is dirty, replace any queued work with a fresh batch and
    /// clear the dirty flag.
    ///
    /// Tasks already taken by a worker are not recalled. They run to
    /// completion and may write stale rows; if one finishes after the fresh
    /// task for the same rows, those rows stay stale until the next dispatch.
    pub fn dispatch_if_dirty(&self, viewport: &mut Viewport) -> Option<FrameInfo> {
        if !viewport.is_dirty() {
            return None;
        }
        Some(self.dispatch(viewport))
    }

    /// Unconditionally dispatch a batch for the current viewport.
    pub fn dispatch(&self, viewport: &mut Viewport) -> FrameInfo {
        self.queue.clear();

        let frame = FrameSnapshot::of(viewport);
        let generation = self.progress.begin(self.stripes as usize);
        let tasks = build_stripe_tasks(frame, self.stripes, generation, &self.pixels);
        let count = tasks.len();
        for task in tasks {
            self.queue.send(task);
        }

        viewport.clear_dirty();
        debug!(
            generation,
            tasks = count,
            max_iter = frame.max_iterations,
            zoom = viewport.zoom(),
            "Dispatched frame"
        );

        FrameInfo {
            title: viewport.title(),
            generation,
            tasks: count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(stripes: u32) -> (Dispatcher, Arc<TaskQueue<RenderTask>>, Viewport) {
        let vp = Viewport::new(32, 24).unwrap();
        let queue = Arc::new(TaskQueue::new());
        let progress = Arc::new(RenderProgress::new());
        let pixels = Arc::new(PixelBuffer::new(32, 24));
        let d = Dispatcher::new(Arc::clone(&queue), progress, pixels, stripes).unwrap();
        (d, queue, vp)
    }

    #[test]
    fn stripes_cover_every_row_once() {
        let frame = FrameSnapshot::of(&Viewport::new(10, 23).unwrap());
        let pixels = Arc::new(PixelBuffer::new(10, 23));
        let tasks = build_stripe_tasks(frame, 4, 1, &pixels);
        assert_eq!(tasks.len(), 4);

        let mut seen = vec![0u32; 23];
        for task in &tasks {
            assert_eq!(task.row_stride(), 4);
            for row in task.rows() {
                seen[row as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "rows covered: {seen:?}");
    }

    #[test]
    fn zero_stripes_are_rejected() {
        let queue = Arc::new(TaskQueue::new());
        let progress = Arc::new(RenderProgress::new());
        let pixels = Arc::new(PixelBuffer::new(8, 8));
        let result = Dispatcher::new(queue, progress, pixels, 0);
        assert!(matches!(result, Err(RenderError::InvalidThreadCount(0))));
    }

    #[test]
    fn clean_viewport_is_not_dispatched() {
        let (d, queue, mut vp) = setup(4);
        vp.clear_dirty();
        assert!(d.dispatch_if_dirty(&mut vp).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn dispatch_clears_dirty_and_queues_one_task_per_stripe() {
        let (d, queue, mut vp) = setup(4);
        let info = d.dispatch_if_dirty(&mut vp).unwrap();
        assert!(!vp.is_dirty());
        assert_eq!(info.tasks, 4);
        assert_eq!(queue.len(), 4);
        assert_eq!(info.title, vp.title());
    }

    #[test]
    fn redispatch_replaces_stale_batch() {
        let (d, queue, mut vp) = setup(3);
        let first = d.dispatch(&mut vp);
        vp.zoom_in();
        let second = d.dispatch(&mut vp);
        assert_ne!(first.generation, second.generation);
        assert_eq!(queue.len(), 3);

        let zoomed = vp.bounds();
        while let Some(task) = queue.receive() {
            assert_eq!(task.generation(), second.generation);
            assert_eq!(task.frame().bounds, zoomed);
        }
    }

    #[test]
    fn tasks_snapshot_the_viewport() {
        let (d, queue, mut vp) = setup(2);
        d.dispatch(&mut vp);
        let before = vp.bounds();
        // Mutating after dispatch must not leak into queued tasks.
        vp.move_left();
        vp.increase_iterations();
        let task = queue.receive().unwrap();
        assert_eq!(task.frame().bounds, before);
        assert_eq!(task.frame().max_iterations, 50);
    }
}
