#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Adaptive playback for a Game of Life universe: how many generations run
//! per painted frame, a rolling frames-per-second estimate, and a run/pause
//! state machine driven by a host's display-refresh callbacks.

mod cadence;
mod config;
mod fps;
mod pointer;
mod render;
mod session;
mod speed;
mod surface;

pub use cadence::SelfPacedUniverse;
pub use config::Config;
pub use fps::{FpsStats, FrameRateMonitor};
pub use pointer::{CellPos, SurfaceRect, pointer_to_cell};
pub use render::{CellColors, draw_cells, draw_grid, surface_size};
pub use session::{FrameHost, FrameRequest, PlaybackSession, PlaybackState, Readout, TimerHandle};
pub use speed::{RangeError, Speed, SpeedError, SpeedRange, TickPolicy, TickRateController};
pub use surface::{Rgba, RgbaSurface, Surface};

pub use life_universe::{Cell, Universe};
