use crate::{
    CellPos, Config, FpsStats, FrameRateMonitor, Speed, Surface, SurfaceRect, TickRateController,
    draw_cells, draw_grid, pointer_to_cell, surface_size,
};
use life_universe::Universe;
use log::{debug, info, trace};
use std::time::Duration;

/// Ticket for one pending display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Ticket for the periodic readout timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// What a [`PlaybackSession`] needs from the host's scheduler: one-shot
/// next-frame callbacks and a cancellable periodic timer.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
    fn start_timer(&mut self, period: Duration) -> TimerHandle;
    fn cancel_timer(&mut self, handle: TimerHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running { pending: FrameRequest },
}

/// Once-per-period report for the text readout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    pub ticks: u64,
    /// Time actually covered, which exceeds the timer period when it fired late.
    pub period: Duration,
    pub generation: u64,
    pub speed: Speed,
    pub fps: Option<FpsStats>,
}

impl Readout {
    pub fn ticks_per_second(&self) -> f64 {
        if self.period.is_zero() {
            0.0
        } else {
            self.ticks as f64 / self.period.as_secs_f64()
        }
    }
}

/// Owns a universe and everything that paces and paints it.
///
/// Each running frame steps the universe per the current speed, samples the
/// frame rate, draws, then asks the host for the next frame. Pausing drops
/// the pending frame request, so a late callback for it does nothing.
///
/// The sub-sampling frame counter restarts whenever the speed changes and is
/// kept across pause and play.
pub struct PlaybackSession<U: Universe> {
    universe: U,
    config: Config,
    controller: TickRateController,
    frame_counter: u32,
    monitor: FrameRateMonitor,
    state: PlaybackState,
    readout_timer: Option<TimerHandle>,
    ticks_since_readout: u64,
    generation: u64,
    frames_rendered: u64,
}

impl<U: Universe> PlaybackSession<U> {
    pub fn new(universe: U, config: Config) -> Self {
        let controller = TickRateController::new(config.speed_range, config.initial_speed());
        let monitor = FrameRateMonitor::new(config.fps_window);
        info!(
            "playback session for {}x{} universe at speed {}",
            universe.width(),
            universe.height(),
            controller.speed().get()
        );
        Self {
            universe,
            config,
            controller,
            frame_counter: 0,
            monitor,
            state: PlaybackState::Stopped,
            readout_timer: None,
            ticks_since_readout: 0,
            generation: 0,
            frames_rendered: 0,
        }
    }

    pub fn universe(&self) -> &U {
        &self.universe
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PlaybackState::Running { .. })
    }

    pub fn speed(&self) -> Speed {
        self.controller.speed()
    }

    pub fn controller(&self) -> &TickRateController {
        &self.controller
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn fps(&self) -> &FrameRateMonitor {
        &self.monitor
    }

    pub fn surface_size(&self) -> (u32, u32) {
        surface_size(
            self.universe.width(),
            self.universe.height(),
            self.config.cell_size,
        )
    }

    /// Starts the frame loop and the readout timer. Returns `false` when
    /// already running.
    pub fn play<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.is_running() {
            debug!("play ignored: already running");
            return false;
        }
        self.state = PlaybackState::Running {
            pending: host.request_frame(),
        };
        self.ticks_since_readout = 0;
        self.readout_timer = Some(host.start_timer(self.config.readout_period));
        info!("playing at speed {}", self.speed().get());
        true
    }

    /// Cancels the pending frame and the readout timer before returning.
    /// Returns `false` when already stopped.
    pub fn pause<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let PlaybackState::Running { pending } = self.state else {
            debug!("pause ignored: already stopped");
            return false;
        };
        host.cancel_frame(pending);
        if let Some(timer) = self.readout_timer.take() {
            host.cancel_timer(timer);
        }
        self.state = PlaybackState::Stopped;
        self.monitor.reset_clock();
        info!("paused at generation {}", self.generation);
        true
    }

    pub fn toggle<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.is_running() {
            self.pause(host)
        } else {
            self.play(host)
        }
    }

    /// Runs one frame if `request` is the one currently pending. Returns
    /// whether a frame ran.
    pub fn on_frame<H, S>(
        &mut self,
        request: FrameRequest,
        now: Duration,
        host: &mut H,
        surface: &mut S,
    ) -> bool
    where
        H: FrameHost + ?Sized,
        S: Surface + ?Sized,
    {
        if self.state != (PlaybackState::Running { pending: request }) {
            debug!("ignoring stale frame request {}", request.0);
            return false;
        }

        let (steps, next_counter) = self.controller.steps_for_frame(self.frame_counter);
        self.frame_counter = next_counter;
        self.advance(steps);
        self.monitor.sample(now);
        self.draw(surface);
        self.frames_rendered += 1;
        trace!(
            "frame {}: {} steps, generation {}",
            self.frames_rendered, steps, self.generation
        );

        self.state = PlaybackState::Running {
            pending: host.request_frame(),
        };
        true
    }

    /// Reports and restarts the tick count when `handle` is the live timer.
    /// `elapsed` is the time since the previous readout or since play.
    pub fn on_readout_timer(&mut self, handle: TimerHandle, elapsed: Duration) -> Option<Readout> {
        if self.readout_timer != Some(handle) {
            debug!("ignoring stale readout timer {}", handle.0);
            return None;
        }
        let readout = Readout {
            ticks: std::mem::take(&mut self.ticks_since_readout),
            period: elapsed,
            generation: self.generation,
            speed: self.speed(),
            fps: self.monitor.stats(),
        };
        debug!(
            "{:.0} ticks/s, generation {}",
            readout.ticks_per_second(),
            readout.generation
        );
        Some(readout)
    }

    /// Changes the speed, clamped to the configured range. Takes effect on
    /// the next frame with a fresh sub-sampling window.
    pub fn set_speed(&mut self, value: u32) -> Speed {
        let before = self.speed();
        let speed = self.controller.set_speed(value);
        self.on_speed_change(before);
        speed
    }

    pub fn faster(&mut self) -> Speed {
        let before = self.speed();
        let speed = self.controller.faster();
        self.on_speed_change(before);
        speed
    }

    pub fn slower(&mut self) -> Speed {
        let before = self.speed();
        let speed = self.controller.slower();
        self.on_speed_change(before);
        speed
    }

    fn on_speed_change(&mut self, before: Speed) {
        if self.speed() != before {
            self.frame_counter = 0;
        }
    }

    /// Advances one generation and redraws. Only allowed while stopped.
    pub fn step_once<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.is_running() {
            debug!("step ignored while running");
            return false;
        }
        self.advance(1);
        self.draw(surface);
        true
    }

    /// Flips one cell and redraws right away, so the change shows while paused.
    pub fn toggle_at<S: Surface + ?Sized>(&mut self, pos: CellPos, surface: &mut S) {
        debug!("toggle cell ({}, {})", pos.row, pos.col);
        self.universe.toggle_cell(pos.row, pos.col);
        self.draw(surface);
    }

    /// Cell under a pointer, for a surface displayed at `rect`.
    pub fn cell_at(&self, pointer: (f64, f64), rect: SurfaceRect) -> Option<CellPos> {
        pointer_to_cell(
            pointer,
            rect,
            self.surface_size(),
            self.config.cell_size,
            (self.universe.width(), self.universe.height()),
        )
    }

    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.draw(surface);
    }

    fn advance(&mut self, steps: u32) {
        for _ in 0..steps {
            self.universe.tick();
        }
        self.generation += steps as u64;
        self.ticks_since_readout += steps as u64;
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = (self.universe.width(), self.universe.height());
        let cell_size = self.config.cell_size;
        draw_grid(surface, width, height, cell_size, self.config.grid_color);
        draw_cells(
            surface,
            self.universe.cells(),
            width,
            height,
            cell_size,
            self.config.cell_colors,
        );
    }
}
