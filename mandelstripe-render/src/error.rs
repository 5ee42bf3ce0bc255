use thiserror::Error;

/// Errors originating from the render engine.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid thread count: {0} (must be >= 1)")]
    InvalidThreadCount(usize),

    #[error("failed to spawn render worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] mandelstripe_core::CoreError),
}
