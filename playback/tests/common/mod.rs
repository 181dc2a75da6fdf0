#![allow(dead_code)]

use life_universe::{Cell, ConwayUniverse, Universe};
use playback::{FrameHost, FrameRequest, Rgba, Surface, TimerHandle};
use std::time::Duration;

/// Hands out sequential tickets and remembers what is still live.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: u64,
    pub pending_frame: Option<FrameRequest>,
    pub live_timer: Option<(TimerHandle, Duration)>,
    pub frames_requested: usize,
    pub frames_cancelled: usize,
    pub timers_cancelled: usize,
}

impl ManualHost {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next());
        self.pending_frame = Some(request);
        self.frames_requested += 1;
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame == Some(request) {
            self.pending_frame = None;
        }
        self.frames_cancelled += 1;
    }

    fn start_timer(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next());
        self.live_timer = Some((handle, period));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        if self.live_timer.map(|(live, _)| live) == Some(handle) {
            self.live_timer = None;
        }
        self.timers_cancelled += 1;
    }
}

/// Counts drawing calls without keeping any pixels.
#[derive(Debug, Default)]
pub struct CountingSurface {
    pub strokes: usize,
    pub fills: usize,
}

impl Surface for CountingSurface {
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _x: u32, _y: u32) {}
    fn line_to(&mut self, _x: u32, _y: u32) {}
    fn stroke(&mut self, _color: Rgba) {
        self.strokes += 1;
    }
    fn fill_rect(&mut self, _x: u32, _y: u32, _width: u32, _height: u32, _color: Rgba) {
        self.fills += 1;
    }
}

/// Counts engine `tick` calls.
#[derive(Clone, Debug)]
pub struct CountingUniverse {
    inner: ConwayUniverse,
    pub ticks: usize,
}

impl CountingUniverse {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: ConwayUniverse::new(width, height),
            ticks: 0,
        }
    }
}

impl Universe for CountingUniverse {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn cells(&self) -> &[Cell] {
        self.inner.cells()
    }

    fn tick(&mut self) {
        self.ticks += 1;
        self.inner.tick();
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        self.inner.toggle_cell(row, col);
    }
}

/// Universe with no cells, for degenerate dimensions.
#[derive(Clone, Debug)]
pub struct EmptyUniverse {
    width: u32,
    height: u32,
    pub ticks: usize,
}

impl EmptyUniverse {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width == 0 || height == 0);
        Self {
            width,
            height,
            ticks: 0,
        }
    }
}

impl Universe for EmptyUniverse {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cells(&self) -> &[Cell] {
        &[]
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        panic!("no cell at ({row}, {col}) in an empty universe");
    }
}

pub fn at_60hz(frame: u64) -> Duration {
    Duration::from_micros(16_667 * frame)
}
