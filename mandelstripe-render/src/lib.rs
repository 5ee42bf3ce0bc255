pub mod buffer;
pub mod dispatch;
pub mod error;
pub mod explorer;
pub mod pool;
pub mod progress;
pub mod queue;
pub mod task;

pub use buffer::PixelBuffer;
pub use dispatch::{build_stripe_tasks, Dispatcher, FrameInfo};
pub use error::RenderError;
pub use explorer::Explorer;
pub use pool::WorkerPool;
pub use progress::RenderProgress;
pub use queue::{TaskQueue, RECEIVE_TIMEOUT};
pub use task::{FrameSnapshot, RenderTask};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
