mod common;

use common::{CountingSurface, CountingUniverse, EmptyUniverse, ManualHost, at_60hz};
use life_universe::{Cell, Universe};
use playback::{CellPos, Config, PlaybackSession, PlaybackState, SurfaceRect};
use std::time::Duration;

fn session_at(speed: u32) -> PlaybackSession<CountingUniverse> {
    let config = Config {
        initial_speed: Some(speed),
        ..Config::default()
    };
    PlaybackSession::new(CountingUniverse::new(10, 10), config)
}

/// Delivers `frames` display refreshes, answering whatever request is pending.
fn run_frames<U: Universe>(
    session: &mut PlaybackSession<U>,
    host: &mut ManualHost,
    surface: &mut CountingSurface,
    first_frame: u64,
    frames: u64,
) {
    for frame in first_frame..first_frame + frames {
        let request = host.pending_frame.expect("a frame should be pending");
        assert!(session.on_frame(request, at_60hz(frame), host, surface));
    }
}

#[test]
fn median_speed_ticks_once_per_frame() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);

    let mut window_lengths = vec![];
    for frame in 0..5 {
        let request = host.pending_frame.unwrap();
        session.on_frame(request, at_60hz(frame), &mut host, &mut surface);
        window_lengths.push(session.fps().len());
    }

    assert_eq!(session.universe().ticks, 5);
    assert_eq!(session.generation(), 5);
    assert!(window_lengths.windows(2).all(|w| w[0] <= w[1]));
    assert!(window_lengths.iter().all(|&len| len <= 5));
}

#[test]
fn slowest_speed_ticks_on_frames_five_and_ten() {
    let mut session = session_at(1);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);

    run_frames(&mut session, &mut host, &mut surface, 0, 4);
    assert_eq!(session.universe().ticks, 0);
    run_frames(&mut session, &mut host, &mut surface, 4, 1);
    assert_eq!(session.universe().ticks, 1);
    run_frames(&mut session, &mut host, &mut surface, 5, 5);
    assert_eq!(session.universe().ticks, 2);
}

#[test]
fn fastest_speed_ticks_eleven_times_in_one_frame() {
    let mut session = session_at(11);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);

    run_frames(&mut session, &mut host, &mut surface, 0, 1);
    assert_eq!(session.universe().ticks, 11);
}

#[test]
fn every_frame_draws_grid_and_cells() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);

    run_frames(&mut session, &mut host, &mut surface, 0, 3);
    assert_eq!(surface.strokes, 3);
    assert_eq!(surface.fills, 3 * 100);
    assert_eq!(session.frames_rendered(), 3);
}

#[test]
fn pause_stops_frame_production() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 3);

    let late = host.pending_frame.unwrap();
    assert!(session.pause(&mut host));
    assert_eq!(host.pending_frame, None);
    assert_eq!(host.live_timer, None);

    let ticks = session.universe().ticks;
    let window = session.fps().len();
    assert!(!session.on_frame(late, at_60hz(3), &mut host, &mut surface));
    assert_eq!(session.universe().ticks, ticks);
    assert_eq!(session.fps().len(), window);
    assert_eq!(session.state(), PlaybackState::Stopped);
}

#[test]
fn resume_restarts_frame_production() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 2);
    session.pause(&mut host);

    assert!(session.play(&mut host));
    run_frames(&mut session, &mut host, &mut surface, 600, 2);
    assert_eq!(session.universe().ticks, 4);
    // The first frame after resuming only restarts the clock.
    assert_eq!(session.fps().len(), 1 + 1);
    assert!(session.fps().stats().unwrap().min > 59.0);
}

#[test]
fn play_and_pause_are_idempotent() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();

    assert!(!session.pause(&mut host));
    assert_eq!(host.frames_cancelled, 0);

    assert!(session.play(&mut host));
    assert!(!session.play(&mut host));
    assert_eq!(host.frames_requested, 1);

    assert!(session.pause(&mut host));
    assert!(!session.pause(&mut host));
    assert_eq!(host.frames_cancelled, 1);
    assert_eq!(host.timers_cancelled, 1);
}

#[test]
fn toggle_switches_state() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();
    session.toggle(&mut host);
    assert!(session.is_running());
    session.toggle(&mut host);
    assert!(!session.is_running());
}

#[test]
fn wrong_request_is_ignored_while_running() {
    let mut session = session_at(6);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    let current = host.pending_frame.unwrap();
    let bogus = playback::FrameRequest(current.0 + 100);
    assert!(!session.on_frame(bogus, at_60hz(0), &mut host, &mut surface));
    assert_eq!(session.universe().ticks, 0);
    assert_eq!(session.state(), PlaybackState::Running { pending: current });
}

#[test]
fn readout_counts_ticks_per_period() {
    let mut session = session_at(8);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 3);

    let (timer, period) = host.live_timer.unwrap();
    assert_eq!(period, Config::READOUT_PERIOD);
    let readout = session.on_readout_timer(timer, period).unwrap();
    assert_eq!(readout.ticks, 24);
    assert_eq!(readout.generation, 24);
    assert_eq!(readout.speed.get(), 8);
    assert!((readout.ticks_per_second() - 24.0).abs() < 1e-9);
    assert!(readout.fps.is_some());

    assert_eq!(session.on_readout_timer(timer, period).unwrap().ticks, 0);

    session.pause(&mut host);
    assert_eq!(session.on_readout_timer(timer, period), None);
}

#[test]
fn late_readout_divides_by_elapsed_time() {
    let mut session = session_at(8);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 3);

    let (timer, _) = host.live_timer.unwrap();
    let readout = session
        .on_readout_timer(timer, Duration::from_secs(3))
        .unwrap();
    assert_eq!(readout.ticks, 24);
    assert_eq!(readout.period, Duration::from_secs(3));
    assert!((readout.ticks_per_second() - 8.0).abs() < 1e-9);
}

#[test]
fn speed_change_restarts_sub_sampling() {
    let mut session = session_at(1);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 3);
    assert_eq!(session.frame_counter(), 3);

    assert_eq!(session.set_speed(2).get(), 2);
    assert_eq!(session.frame_counter(), 0);
    run_frames(&mut session, &mut host, &mut surface, 3, 3);
    assert_eq!(session.universe().ticks, 0);
    run_frames(&mut session, &mut host, &mut surface, 6, 1);
    assert_eq!(session.universe().ticks, 1);
}

#[test]
fn unchanged_speed_keeps_frame_counter() {
    let mut session = session_at(1);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 2);
    session.set_speed(0);
    assert_eq!(session.speed().get(), 1);
    assert_eq!(session.frame_counter(), 2);
}

#[test]
fn frame_counter_survives_pause() {
    let mut session = session_at(1);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 3);
    session.pause(&mut host);
    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 100, 2);
    assert_eq!(session.universe().ticks, 1);
}

#[test]
fn faster_and_slower_step_one_notch() {
    let mut session = session_at(6);
    assert_eq!(session.faster().get(), 7);
    assert_eq!(session.slower().get(), 6);
    assert_eq!(session.slower().get(), 5);
}

#[test]
fn toggle_redraws_while_paused() {
    let mut session = session_at(6);
    let mut surface = CountingSurface::default();
    let before = session.universe().cells()[3 * 10 + 4];

    session.toggle_at(CellPos { row: 3, col: 4 }, &mut surface);

    let after = session.universe().cells()[3 * 10 + 4];
    assert_ne!(before, after);
    assert_eq!(surface.strokes, 1);
    assert_eq!(surface.fills, 100);
    assert_eq!(session.universe().ticks, 0);
}

#[test]
fn click_maps_through_the_session() {
    let session = session_at(6);
    let (width, height) = session.surface_size();
    assert_eq!((width, height), (61, 61));
    let rect = SurfaceRect {
        left: 10.0,
        top: 10.0,
        width: width as f64 * 2.0,
        height: height as f64 * 2.0,
    };
    assert_eq!(
        session.cell_at((10.0 + 2.0 * 13.0, 10.0 + 2.0 * 55.0), rect),
        Some(CellPos { row: 9, col: 2 })
    );
}

#[test]
fn step_once_only_while_stopped() {
    let mut session = session_at(1);
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();

    assert!(session.step_once(&mut surface));
    assert_eq!(session.universe().ticks, 1);
    assert_eq!(surface.strokes, 1);

    session.play(&mut host);
    assert!(!session.step_once(&mut surface));
    assert_eq!(session.universe().ticks, 1);
}

#[test]
fn redraw_does_not_step() {
    let session = session_at(6);
    let mut surface = CountingSurface::default();
    session.redraw(&mut surface);
    assert_eq!(session.universe().ticks, 0);
    assert_eq!(surface.fills, 100);
    assert!(session.universe().cells().contains(&Cell::Alive));
}

#[test]
fn zero_width_universe_plays_without_drawing() {
    let mut session = PlaybackSession::new(EmptyUniverse::new(0, 10), Config::default());
    let mut host = ManualHost::default();
    let mut surface = CountingSurface::default();
    assert_eq!(session.surface_size(), (1, 61));

    session.play(&mut host);
    run_frames(&mut session, &mut host, &mut surface, 0, 3);
    assert_eq!(session.frames_rendered(), 3);
    assert_eq!(session.universe().ticks, 3);
    assert_eq!(surface.strokes, 0);
    assert_eq!(surface.fills, 0);

    let rect = SurfaceRect {
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 61.0,
    };
    assert_eq!(session.cell_at((0.0, 30.0), rect), None);

    session.pause(&mut host);
    assert!(session.step_once(&mut surface));
    assert_eq!(session.generation(), 4);
}
