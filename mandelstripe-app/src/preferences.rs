use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mandelstripe_core::ColorScheme;

use crate::input::Action;

// ---------------------------------------------------------------------------
// Host preferences
// ---------------------------------------------------------------------------

/// Settings for the headless host.
///
/// These describe the rendering surface and the host loop only. The
/// viewport itself is never persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
    /// Worker count. `None` uses every available core.
    #[serde(default)]
    pub thread_count: Option<usize>,
    /// How often the host "repaints" (reports progress), in milliseconds.
    #[serde(default = "default_repaint_interval_ms")]
    pub repaint_interval_ms: u64,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    /// Viewport actions applied before the first frame.
    #[serde(default)]
    pub startup_actions: Vec<Action>,
}

fn default_screen_width() -> u32 {
    800
}
fn default_screen_height() -> u32 {
    600
}
fn default_repaint_interval_ms() -> u64 {
    1000 / 24
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            thread_count: None,
            repaint_interval_ms: default_repaint_interval_ms(),
            color_scheme: ColorScheme::default(),
            startup_actions: Vec::new(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from the OS config directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load preferences from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs;
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    /// Worker count to start the engine with.
    pub fn resolved_thread_count(&self) -> usize {
        match self.thread_count {
            Some(n) => n,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }

    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_interval_ms.max(1))
    }
}

fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "mandelstripe")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("preferences.json")
}
