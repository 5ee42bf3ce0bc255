use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Tracks the current dispatch generation and how much of it is done.
///
/// Every dispatch starts a new generation. Workers report finished tasks
/// tagged with the generation they were built for; reports from stale
/// generations are ignored so a superseded frame cannot inflate the count.
///
/// The generation and the done-count share one atomic word (generation in
/// the high half), so a report can never land in the wrong generation.
#[derive(Debug)]
pub struct RenderProgress {
    state: AtomicU64,
    total: AtomicUsize,
}

#[inline]
fn pack(generation: u32, done: u32) -> u64 {
    ((generation as u64) << 32) | done as u64
}

#[inline]
fn unpack(state: u64) -> (u32, u32) {
    ((state >> 32) as u32, state as u32)
}

impl RenderProgress {
    pub fn new() -> Self {
        Self {
            state: AtomicU64::new(0),
            total: AtomicUsize::new(0),
        }
    }

    /// Start a new generation with `total` tasks. Returns the new generation.
    pub fn begin(&self, total: usize) -> u32 {
        let next = self.generation().wrapping_add(1);
        self.total.store(total, Ordering::Relaxed);
        self.state.store(pack(next, 0), Ordering::SeqCst);
        next
    }

    /// Read the current generation.
    pub fn generation(&self) -> u32 {
        unpack(self.state.load(Ordering::SeqCst)).0
    }

    /// Record one finished task. Returns `false` if it was stale.
    pub fn complete(&self, generation: u32) -> bool {
        self.state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |state| {
                let (current, done) = unpack(state);
                (current == generation).then(|| pack(current, done.saturating_add(1)))
            })
            .is_ok()
    }

    /// Read the current progress as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let (_, done) = unpack(self.state.load(Ordering::SeqCst));
        (done as usize, self.total.load(Ordering::Relaxed))
    }

    /// `true` once every task of the current generation has reported in.
    pub fn is_complete(&self) -> bool {
        let (done, total) = self.progress();
        total > 0 && done >= total
    }
}

impl Default for RenderProgress {
    fn default() -> Self {
        Self::new()
    }
}
