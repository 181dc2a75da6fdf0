use crate::{RangeError, Speed, SpeedRange, TickRateController};
use life_universe::{Cell, Universe};

/// A universe that paces itself: the host calls [`advance_frame`] once per
/// frame and the wrapper decides how many generations that frame gets.
///
/// [`advance_frame`]: SelfPacedUniverse::advance_frame
#[derive(Clone, Debug)]
pub struct SelfPacedUniverse<U> {
    universe: U,
    controller: TickRateController,
    frame_counter: u32,
}

impl<U: Universe> SelfPacedUniverse<U> {
    pub fn new(universe: U) -> Self {
        Self {
            universe,
            controller: TickRateController::default(),
            frame_counter: 0,
        }
    }

    /// Sets the top of the speed range. The median becomes `max / 2 + 1`.
    pub fn set_max_tpf(&mut self, max: u32) -> Result<(), RangeError> {
        let range = SpeedRange::new(max)?;
        self.controller.set_range(range);
        self.frame_counter = 0;
        Ok(())
    }

    pub fn update_tick_rate(&mut self, tick_rate: u32) -> Speed {
        let before = self.controller.speed();
        let speed = self.controller.set_speed(tick_rate);
        if speed != before {
            self.frame_counter = 0;
        }
        speed
    }

    pub fn controller(&self) -> &TickRateController {
        &self.controller
    }

    /// Runs this frame's share of generations and returns how many ran.
    pub fn advance_frame(&mut self) -> u32 {
        let (steps, next_counter) = self.controller.steps_for_frame(self.frame_counter);
        self.frame_counter = next_counter;
        for _ in 0..steps {
            self.universe.tick();
        }
        steps
    }
}

impl<U: Universe> Universe for SelfPacedUniverse<U> {
    fn width(&self) -> u32 {
        self.universe.width()
    }

    fn height(&self) -> u32 {
        self.universe.height()
    }

    fn cells(&self) -> &[Cell] {
        self.universe.cells()
    }

    fn tick(&mut self) {
        self.universe.tick();
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        self.universe.toggle_cell(row, col);
    }
}
