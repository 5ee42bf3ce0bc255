use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use mandelstripe_core::{ColorScheme, Viewport};
use mandelstripe_render::{
    Dispatcher, Explorer, FrameSnapshot, PixelBuffer, RenderProgress, TaskQueue, WorkerPool,
};

fn wait_for_frame(explorer: &Explorer) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while !explorer.is_frame_complete() {
        assert!(Instant::now() < deadline, "frame did not finish in time");
        thread::sleep(Duration::from_millis(2));
    }
}

/// Reference image computed on the calling thread.
fn single_threaded(viewport: &Viewport) -> Vec<u32> {
    let frame = FrameSnapshot::of(viewport);
    let mut out = Vec::with_capacity((frame.screen_width * frame.screen_height) as usize);
    for j in 0..frame.screen_height {
        for i in 0..frame.screen_width {
            out.push(frame.pixel(i, j));
        }
    }
    out
}

#[test]
fn four_workers_match_single_threaded_render() {
    let mut explorer = Explorer::new(160, 120, 4).unwrap();
    let info = explorer.poll_frame().unwrap();
    assert_eq!(info.tasks, 4);

    wait_for_frame(&explorer);
    explorer.shutdown();

    let expected = single_threaded(explorer.viewport());
    assert_eq!(explorer.snapshot(), expected);
}

#[test]
fn odd_height_and_many_workers_cover_every_row() {
    // More workers than some stripes have rows; 7 rows over 5 workers.
    let mut explorer = Explorer::new(33, 7, 5).unwrap();
    explorer.viewport_mut().increase_iterations();
    explorer.poll_frame().unwrap();
    wait_for_frame(&explorer);
    explorer.shutdown();

    assert_eq!(explorer.snapshot(), single_threaded(explorer.viewport()));
}

#[test]
fn image_contains_set_and_escaping_points() {
    let mut explorer = Explorer::new(120, 100, 3).unwrap();
    explorer.poll_frame().unwrap();
    wait_for_frame(&explorer);
    explorer.shutdown();

    let pixels = explorer.snapshot();
    assert_eq!(pixels.len(), 120 * 100);
    assert!(pixels.iter().all(|p| p >> 24 == 0xff), "every pixel is opaque");
    assert!(pixels.iter().any(|&p| p == 0xff00_0000));
    assert!(pixels.iter().any(|&p| p != 0xff00_0000));
}

#[test]
fn rapid_input_counts_only_latest_generation() {
    let mut explorer = Explorer::new(200, 150, 4).unwrap();
    let mut last = None;
    for _ in 0..10 {
        explorer.viewport_mut().zoom_in();
        explorer.viewport_mut().move_left();
        last = explorer.poll_frame();
    }
    let last = last.unwrap();
    wait_for_frame(&explorer);

    let (done, total) = explorer.progress();
    assert_eq!(total, 4);
    assert_eq!(done, 4);
    assert_eq!(last.title, explorer.viewport().title());
}

#[test]
fn settled_redraw_after_view_change_matches_reference() {
    let mut explorer = Explorer::new(96, 64, 4).unwrap();
    explorer.poll_frame().unwrap();
    wait_for_frame(&explorer);

    explorer.viewport_mut().begin_selection(24, 16);
    explorer.viewport_mut().update_selection(72, 48);
    explorer.viewport_mut().end_selection(72, 48);
    explorer.viewport_mut().next_color_scheme();
    explorer.poll_frame().unwrap();
    wait_for_frame(&explorer);
    explorer.shutdown();

    assert_eq!(explorer.viewport().color_scheme(), ColorScheme::Grayscale);
    assert!((explorer.viewport().zoom() - 0.5).abs() < 1e-12);
    assert_eq!(explorer.snapshot(), single_threaded(explorer.viewport()));
}

#[test]
fn shutdown_drains_blocked_workers_quickly() {
    let queue = Arc::new(TaskQueue::new());
    let progress = Arc::new(RenderProgress::new());
    let mut pool = WorkerPool::spawn(8, Arc::clone(&queue), progress).unwrap();

    // Let every worker settle into the queue's timed wait.
    thread::sleep(Duration::from_millis(50));

    let start = Instant::now();
    pool.shutdown();
    assert!(
        start.elapsed() < Duration::from_millis(500),
        "shutdown took {:?}",
        start.elapsed()
    );
}

#[test]
fn taken_task_survives_redispatch() {
    let mut viewport = Viewport::new(32, 24).unwrap();
    let queue = Arc::new(TaskQueue::new());
    let progress = Arc::new(RenderProgress::new());
    let pixels = Arc::new(PixelBuffer::new(32, 24));
    let dispatcher =
        Dispatcher::new(Arc::clone(&queue), Arc::clone(&progress), Arc::clone(&pixels), 3)
            .unwrap();

    let old_frame = FrameSnapshot::of(&viewport);
    let first = dispatcher.dispatch(&mut viewport);
    // A worker takes one task of the first batch before the view changes.
    let stale = queue.receive().unwrap();
    assert_eq!(stale.generation(), first.generation);

    viewport.zoom_in();
    viewport.next_color_scheme();
    let second = dispatcher.dispatch(&mut viewport);
    assert_eq!(queue.len(), 3);

    // The taken task is not recalled: it writes all of its rows.
    let rows: Vec<u32> = stale.rows().collect();
    let generation = stale.generation();
    assert_eq!(stale.run(), rows.len());
    for &j in &rows {
        for i in 0..32 {
            assert_eq!(pixels.get(i, j), old_frame.pixel(i, j), "pixel ({i}, {j})");
        }
    }
    assert!(!progress.complete(generation), "stale task must not count");
    assert_eq!(progress.progress(), (0, 3));

    while let Some(task) = queue.receive() {
        assert_eq!(task.generation(), second.generation);
        let generation = task.generation();
        task.run();
        assert!(progress.complete(generation));
    }
    assert_eq!(progress.progress(), (3, 3));
    assert_eq!(pixels.snapshot(), single_threaded(&viewport));
}

#[test]
fn shutdown_finishes_running_task_and_discards_queued_work() {
    // One worker, two heavy stripes: the worker holds one while the other
    // waits in the queue.
    let mut viewport = Viewport::new(200, 200).unwrap();
    for _ in 0..300 {
        viewport.increase_iterations();
    }
    let queue = Arc::new(TaskQueue::new());
    let progress = Arc::new(RenderProgress::new());
    let pixels = Arc::new(PixelBuffer::new(200, 200));
    let mut pool = WorkerPool::spawn(1, Arc::clone(&queue), Arc::clone(&progress)).unwrap();
    let dispatcher =
        Dispatcher::new(Arc::clone(&queue), Arc::clone(&progress), pixels, 2).unwrap();

    dispatcher.dispatch(&mut viewport);
    let deadline = Instant::now() + Duration::from_secs(10);
    while queue.len() > 1 {
        assert!(Instant::now() < deadline, "worker never took a task");
        thread::yield_now();
    }
    pool.shutdown();

    assert!(queue.is_empty());
    assert_eq!(progress.progress(), (1, 2));
    assert!(!progress.is_complete());
}

#[test]
fn dropping_explorer_joins_workers() {
    let mut explorer = Explorer::new(64, 48, 4).unwrap();
    explorer.poll_frame().unwrap();
    let pixels = Arc::clone(explorer.pixels());
    drop(explorer);

    // Workers are gone: the buffer no longer changes.
    let a = pixels.snapshot();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(a, pixels.snapshot());
}
