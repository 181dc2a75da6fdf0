use crate::{CellColors, FrameRateMonitor, Rgba, SpeedRange};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub cell_size: u32,
    pub grid_color: Rgba,
    pub cell_colors: CellColors,
    pub speed_range: SpeedRange,
    /// `None` starts at the range's median speed.
    pub initial_speed: Option<u32>,
    pub fps_window: usize,
    pub readout_period: Duration,
}

impl Config {
    pub const CELL_SIZE: u32 = 5;
    pub const GRID_COLOR: Rgba = [0xcc, 0xcc, 0xcc, 0xff];
    pub const DEAD_COLOR: Rgba = [0xff, 0xff, 0xff, 0xff];
    pub const ALIVE_COLOR: Rgba = [0x00, 0x00, 0x00, 0xff];
    pub const READOUT_PERIOD: Duration = Duration::from_secs(1);

    pub fn initial_speed(&self) -> u32 {
        self.initial_speed
            .unwrap_or_else(|| self.speed_range.median())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: Self::CELL_SIZE,
            grid_color: Self::GRID_COLOR,
            cell_colors: CellColors {
                dead: Self::DEAD_COLOR,
                alive: Self::ALIVE_COLOR,
            },
            speed_range: SpeedRange::default(),
            initial_speed: None,
            fps_window: FrameRateMonitor::DEFAULT_CAPACITY,
            readout_period: Self::READOUT_PERIOD,
        }
    }
}
