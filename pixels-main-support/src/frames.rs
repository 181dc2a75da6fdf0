use playback::{FrameHost, FrameRequest, TimerHandle};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::window::Window;

/// Periodic deadline driven by `ControlFlow::WaitUntil`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ReadoutTimer {
    pub handle: TimerHandle,
    period: Duration,
    pub deadline: Instant,
    last_fired: Instant,
}

impl ReadoutTimer {
    pub fn new(handle: TimerHandle, period: Duration, now: Instant) -> Self {
        Self {
            handle,
            period,
            deadline: now + period,
            last_fired: now,
        }
    }

    /// Fires at most once per call; missed periods are skipped, not queued.
    /// Also returns the time since the previous firing.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<(TimerHandle, Duration)> {
        if self.deadline > now {
            return None;
        }
        if self.period.is_zero() {
            self.deadline = now;
        } else {
            while self.deadline <= now {
                self.deadline += self.period;
            }
        }
        let elapsed = now - std::mem::replace(&mut self.last_fired, now);
        Some((self.handle, elapsed))
    }
}

/// [`FrameHost`] backed by winit redraw requests.
///
/// winit cannot withdraw a redraw request, so cancelling only forgets the
/// pending ticket; a redraw that still arrives finds nothing to run.
pub(crate) struct WindowFrames {
    window: Arc<Window>,
    next_id: u64,
    pub pending: Option<FrameRequest>,
    pub timer: Option<ReadoutTimer>,
}

impl WindowFrames {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
            timer: None,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for WindowFrames {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending = Some(request);
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn start_timer(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timer = Some(ReadoutTimer::new(handle, period, Instant::now()));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        if self.timer.is_some_and(|timer| timer.handle == handle) {
            self.timer = None;
        }
    }
}
