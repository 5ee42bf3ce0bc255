use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, trace, warn};

use crate::error::RenderError;
use crate::progress::RenderProgress;
use crate::queue::TaskQueue;
use crate::task::RenderTask;

/// A fixed set of long-lived render threads fed from a [`TaskQueue`].
///
/// Workers only ever see immutable [`RenderTask`] snapshots and the shared
/// pixel buffer; they never touch the viewport.
pub struct WorkerPool {
    queue: Arc<TaskQueue<RenderTask>>,
    running: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `thread_count` workers pulling from `queue`.
    pub fn spawn(
        thread_count: usize,
        queue: Arc<TaskQueue<RenderTask>>,
        progress: Arc<RenderProgress>,
    ) -> crate::Result<Self> {
        if thread_count == 0 {
            return Err(RenderError::InvalidThreadCount(thread_count));
        }

        let running = Arc::new(AtomicBool::new(true));
        let mut pool = Self {
            queue,
            running,
            workers: Vec::with_capacity(thread_count),
        };

        for index in 0..thread_count {
            let queue = Arc::clone(&pool.queue);
            let running = Arc::clone(&pool.running);
            let progress = Arc::clone(&progress);
            let handle = thread::Builder::new()
                .name(format!("render-worker-{index}"))
                .spawn(move || worker_loop(index, &queue, &running, &progress));
            match handle {
                Ok(handle) => pool.workers.push(handle),
                Err(e) => {
                    // Dropping `pool` joins the workers spawned so far.
                    warn!(index, "Failed to spawn render worker: {e}");
                    return Err(RenderError::Spawn(e));
                }
            }
        }

        info!(threads = thread_count, "Render worker pool started");
        Ok(pool)
    }

    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop every worker and wait for it to exit.
    ///
    /// Workers blocked in the queue wake within one receive timeout; a worker
    /// in the middle of a task finishes it first.  Calling this more than
    /// once is harmless.
    pub fn shutdown(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.running.store(false, Ordering::Release);
        self.queue.stop();
        self.queue.clear();

        let count = self.workers.len();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("Render worker panicked");
            }
        }
        info!(threads = count, "Render worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(
    index: usize,
    queue: &TaskQueue<RenderTask>,
    running: &AtomicBool,
    progress: &RenderProgress,
) {
    debug!(index, "Render worker started");
    while running.load(Ordering::Acquire) {
        let Some(task) = queue.receive() else {
            continue;
        };
        let generation = task.generation();
        let (offset, stride) = (task.row_offset(), task.row_stride());
        let rows = task.run();
        let current = progress.complete(generation);
        trace!(index, offset, stride, rows, generation, current, "Task done");
    }
    debug!(index, "Render worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn zero_threads_is_rejected() {
        let queue = Arc::new(TaskQueue::new());
        let progress = Arc::new(RenderProgress::new());
        assert!(matches!(
            WorkerPool::spawn(0, queue, progress),
            Err(RenderError::InvalidThreadCount(0))
        ));
    }

    #[test]
    fn idle_pool_shuts_down_promptly() {
        let queue = Arc::new(TaskQueue::new());
        let progress = Arc::new(RenderProgress::new());
        let mut pool = WorkerPool::spawn(4, Arc::clone(&queue), progress).unwrap();
        assert_eq!(pool.thread_count(), 4);

        thread::sleep(Duration::from_millis(30));
        let start = Instant::now();
        pool.shutdown();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(!pool.is_running());
        assert!(!queue.is_running());
        assert_eq!(pool.thread_count(), 0);

        // Second call is a no-op.
        pool.shutdown();
    }
}
