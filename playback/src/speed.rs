use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("speed range maximum must be odd and at least {min}, got {max}")]
    InvalidMax { max: u32, min: u32 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpeedError {
    #[error("speed {value} is outside {min}..={max}")]
    OutOfRange { value: u32, min: u32, max: u32 },
}

/// Inclusive `[MIN, max]` range of speed settings. `max` is odd so the range
/// has a unique median, the speed that runs one generation per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedRange {
    max: u32,
}

impl SpeedRange {
    pub const MIN: u32 = 1;
    pub const DEFAULT_MAX: u32 = 11;

    pub fn new(max: u32) -> Result<Self, RangeError> {
        if max < Self::MIN || max.is_multiple_of(2) {
            return Err(RangeError::InvalidMax {
                max,
                min: Self::MIN,
            });
        }
        Ok(Self { max })
    }

    pub fn min(&self) -> u32 {
        Self::MIN
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn median(&self) -> u32 {
        self.max / 2 + 1
    }

    pub fn contains(&self, value: u32) -> bool {
        (Self::MIN..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(Self::MIN, self.max)
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            max: Self::DEFAULT_MAX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u32);

impl Speed {
    pub fn new(value: u32, range: SpeedRange) -> Result<Self, SpeedError> {
        if range.contains(value) {
            Ok(Self(value))
        } else {
            Err(SpeedError::OutOfRange {
                value,
                min: range.min(),
                max: range.max(),
            })
        }
    }

    pub fn clamped(value: u32, range: SpeedRange) -> Self {
        Self(range.clamp(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPolicy {
    /// One generation every frame.
    PerFrame,
    /// `steps` generations every frame.
    Accelerated { steps: u32 },
    /// One generation every `every` frames.
    SubSampled { every: u32 },
}

impl TickPolicy {
    pub fn for_speed(speed: Speed, range: SpeedRange) -> Self {
        let median = range.median();
        let speed = speed.get();
        if speed > median {
            TickPolicy::Accelerated { steps: speed }
        } else if speed < median {
            TickPolicy::SubSampled {
                every: median - speed,
            }
        } else {
            TickPolicy::PerFrame
        }
    }

    /// Returns `(steps, next_frame_counter)` for a frame that starts with
    /// `frame_counter` frames already elapsed since the last sub-sampled step.
    pub fn steps_for_frame(self, frame_counter: u32) -> (u32, u32) {
        match self {
            TickPolicy::PerFrame => (1, 0),
            TickPolicy::Accelerated { steps } => (steps, 0),
            TickPolicy::SubSampled { every } => {
                let next = frame_counter.saturating_add(1);
                if next >= every { (1, 0) } else { (0, next) }
            }
        }
    }

    /// Long-run generations per frame.
    pub fn average_steps_per_frame(self) -> f64 {
        match self {
            TickPolicy::PerFrame => 1.0,
            TickPolicy::Accelerated { steps } => steps as f64,
            TickPolicy::SubSampled { every } => 1.0 / every as f64,
        }
    }
}

/// Maps the user's linear speed control onto generations per frame.
#[derive(Clone, Debug)]
pub struct TickRateController {
    range: SpeedRange,
    speed: Speed,
}

impl TickRateController {
    pub fn new(range: SpeedRange, initial: u32) -> Self {
        Self {
            range,
            speed: Speed::clamped(initial, range),
        }
    }

    pub fn range(&self) -> SpeedRange {
        self.range
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn policy(&self) -> TickPolicy {
        TickPolicy::for_speed(self.speed, self.range)
    }

    /// Out-of-range settings are clamped, not rejected.
    pub fn set_speed(&mut self, value: u32) -> Speed {
        let speed = Speed::clamped(value, self.range);
        if speed.get() != value {
            warn!(
                "speed {} outside {}..={}, using {}",
                value,
                self.range.min(),
                self.range.max(),
                speed.get()
            );
        }
        if speed != self.speed {
            debug!("speed {} -> {}", self.speed.get(), speed.get());
        }
        self.speed = speed;
        speed
    }

    pub fn faster(&mut self) -> Speed {
        let value = (self.speed.get() + 1).min(self.range.max());
        self.set_speed(value)
    }

    pub fn slower(&mut self) -> Speed {
        let value = self.speed.get().saturating_sub(1).max(self.range.min());
        self.set_speed(value)
    }

    /// Swaps in a new range, keeping the current speed when it still fits.
    pub fn set_range(&mut self, range: SpeedRange) {
        self.range = range;
        self.speed = Speed::clamped(self.speed.get(), range);
    }

    pub fn steps_for_frame(&self, frame_counter: u32) -> (u32, u32) {
        self.policy().steps_for_frame(frame_counter)
    }
}

impl Default for TickRateController {
    fn default() -> Self {
        let range = SpeedRange::default();
        Self::new(range, range.median())
    }
}
