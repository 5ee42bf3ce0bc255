pub mod bounds;
pub mod error;
pub mod escape;
pub mod selection;
pub mod viewport;

// Re-export primary types for convenience.
pub use bounds::PlaneBounds;
pub use error::CoreError;
pub use escape::{color_for, escape_count, iterations_for, ColorScheme, IN_SET_COLOR};
pub use selection::{translate_selection, SelectionRect, ZoomTarget, MIN_SELECTION_DIAGONAL};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
