use serde::{Deserialize, Serialize};
use tracing::debug;

use mandelstripe_render::Explorer;

/// A single viewport command, independent of how it was produced (key,
/// mouse gesture, or a scripted list in the preferences file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Reset,
    ZoomIn,
    ZoomOut,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    IncreaseIterations,
    DecreaseIterations,
    NextColorScheme,
    /// A complete drag-to-zoom gesture between two screen points.
    Select { from: (i32, i32), to: (i32, i32) },
    Quit,
}

impl Action {
    pub fn apply(self, explorer: &mut Explorer) {
        debug!(action = ?self, "Applying action");
        match self {
            Action::Reset => explorer.viewport_mut().reset_bounds(),
            Action::ZoomIn => explorer.viewport_mut().zoom_in(),
            Action::ZoomOut => explorer.viewport_mut().zoom_out(),
            Action::MoveUp => explorer.viewport_mut().move_up(),
            Action::MoveDown => explorer.viewport_mut().move_down(),
            Action::MoveLeft => explorer.viewport_mut().move_left(),
            Action::MoveRight => explorer.viewport_mut().move_right(),
            Action::IncreaseIterations => explorer.viewport_mut().increase_iterations(),
            Action::DecreaseIterations => explorer.viewport_mut().decrease_iterations(),
            Action::NextColorScheme => explorer.viewport_mut().next_color_scheme(),
            Action::Select { from, to } => {
                let vp = explorer.viewport_mut();
                vp.begin_selection(from.0, from.1);
                vp.update_selection(to.0, to.1);
                vp.end_selection(to.0, to.1);
            }
            Action::Quit => explorer.stop(),
        }
    }
}
