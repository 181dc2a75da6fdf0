use log::trace;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsStats {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Rolling window of instantaneous frame rates, one sample per rendered frame.
#[derive(Clone, Debug)]
pub struct FrameRateMonitor {
    samples: VecDeque<f64>,
    capacity: usize,
    last_timestamp: Option<Duration>,
    stats: Option<FpsStats>,
}

impl FrameRateMonitor {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_timestamp: None,
            stats: None,
        }
    }

    /// Records the frame at `now`. The first call after construction or
    /// [`reset_clock`](Self::reset_clock) only starts the clock. A frame that
    /// is not strictly later than the previous one is dropped.
    pub fn sample(&mut self, now: Duration) -> Option<FpsStats> {
        let Some(last) = self.last_timestamp.replace(now) else {
            return self.stats;
        };
        let delta = match now.checked_sub(last) {
            Some(delta) if !delta.is_zero() => delta,
            _ => {
                trace!("dropping frame sample: {now:?} is not after {last:?}");
                return self.stats;
            }
        };

        let fps = 1000.0 / (delta.as_secs_f64() * 1000.0);
        self.samples.push_back(fps);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self.stats = Some(self.compute_stats(fps));
        self.stats
    }

    fn compute_stats(&self, latest: f64) -> FpsStats {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &fps in &self.samples {
            min = min.min(fps);
            max = max.max(fps);
            sum += fps;
        }
        FpsStats {
            latest,
            mean: sum / self.samples.len() as f64,
            min,
            max,
        }
    }

    /// Forgets the previous frame time so an idle gap is never sampled.
    pub fn reset_clock(&mut self) {
        self.last_timestamp = None;
    }

    pub fn stats(&self) -> Option<FpsStats> {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for FrameRateMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
