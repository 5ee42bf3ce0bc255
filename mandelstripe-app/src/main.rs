mod input;
mod preferences;

use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use mandelstripe_core::IN_SET_COLOR;
use mandelstripe_render::Explorer;

use preferences::AppPreferences;

/// Drive the engine until the current frame is fully rendered or a `quit`
/// action stops it.
///
/// The host dispatches whenever the view is dirty and "repaints" on a fixed
/// cadence regardless of how far the workers have got.
fn run(explorer: &mut Explorer, prefs: &AppPreferences) {
    let interval = prefs.repaint_interval();
    let started = Instant::now();
    let mut last_repaint = Instant::now();

    while explorer.is_running() {
        if let Some(frame) = explorer.poll_frame() {
            info!(generation = frame.generation, tasks = frame.tasks, "{}", frame.title);
        }

        let elapsed = last_repaint.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
            continue;
        }
        last_repaint = Instant::now();

        let (done, total) = explorer.progress();
        debug!(done, total, "Repaint");

        if explorer.is_frame_complete() {
            let pixels = explorer.snapshot();
            let in_set = pixels.iter().filter(|&&p| p == IN_SET_COLOR).count();
            info!(
                elapsed_ms = started.elapsed().as_millis(),
                pixels = pixels.len(),
                in_set,
                "Frame complete"
            );
            explorer.stop();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting mandelstripe");

    let prefs = AppPreferences::load();
    let threads = prefs.resolved_thread_count();
    let mut explorer = Explorer::new(prefs.screen_width, prefs.screen_height, threads)?;
    explorer.viewport_mut().set_color_scheme(prefs.color_scheme);

    for action in &prefs.startup_actions {
        action.apply(&mut explorer);
    }

    run(&mut explorer, &prefs);
    explorer.shutdown();

    info!("Exiting");
    Ok(())
}
