use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long [`TaskQueue::receive`] waits before giving the caller a chance
/// to re-check its own shutdown condition.
pub const RECEIVE_TIMEOUT: Duration = Duration::from_millis(20);

/// Unbounded hand-off between one producer and many consumer threads.
///
/// Tasks are popped last-in-first-out.  That is not a priority scheme: all
/// tasks in one dispatch batch are equally urgent and carry their own row
/// assignment, so any ordering would do.
///
/// Cancellation is coarse: [`clear`](Self::clear) drops everything still
/// queued, but a task a consumer has already taken runs to completion.
#[derive(Debug)]
pub struct TaskQueue<T> {
    tasks: Mutex<VecDeque<T>>,
    available: Condvar,
    running: AtomicBool,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            running: AtomicBool::new(true),
        }
    }

    /// Queue a task and wake one waiting consumer.
    pub fn send(&self, task: T) {
        self.lock().push_back(task);
        self.available.notify_one();
    }

    /// Take the most recently sent task, waiting up to [`RECEIVE_TIMEOUT`].
    ///
    /// Returns `None` on timeout or once the queue has been stopped.
    pub fn receive(&self) -> Option<T> {
        self.receive_timeout(RECEIVE_TIMEOUT)
    }

    /// Like [`receive`](Self::receive) with an explicit timeout.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        if !self.is_running() {
            return None;
        }
        let guard = self.lock();
        let (mut tasks, _timeout) = self
            .available
            .wait_timeout_while(guard, timeout, |tasks| {
                tasks.is_empty() && self.running.load(Ordering::Acquire)
            })
            .unwrap_or_else(PoisonError::into_inner);
        if !self.is_running() {
            return None;
        }
        tasks.pop_back()
    }

    /// Drop every queued task and wake all waiting consumers.
    pub fn clear(&self) {
        self.lock().clear();
        self.available.notify_all();
    }

    /// Mark the queue as stopped.  Subsequent receives return `None`.
    ///
    /// This does not wake consumers that are already waiting; pair it with
    /// [`clear`](Self::clear) for a prompt shutdown.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of tasks currently queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking holder cannot leave the deque half-updated, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
