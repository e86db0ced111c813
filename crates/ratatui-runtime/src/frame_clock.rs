use std::time::{Duration, Instant};

/// Measures frame times and paces the frame loop.
///
/// [`FrameClock::restart`] works like a stopwatch: it returns the time since
/// the last restart and starts counting again. Instants are passed in rather
/// than read, so the arithmetic can be tested without sleeping.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_interval: Duration,
    last_frame: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn new(frame_interval: Duration, now: Instant) -> Self {
        Self {
            frame_interval,
            last_frame: now,
        }
    }

    /// Creates a clock from a frame rate (FPS).
    ///
    /// Rates that are not positive and finite, or too small for the frame
    /// interval to fit in a [`Duration`], fall back to [`Self::DEFAULT_RATE`].
    #[must_use]
    pub fn from_rate(rate: f64, now: Instant) -> Self {
        Self::new(interval_from_rate(rate), now)
    }

    pub const DEFAULT_RATE: f64 = 60.0;

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn set_frame_rate(&mut self, rate: f64) {
        self.frame_interval = interval_from_rate(rate);
    }

    /// Returns the time since the previous restart and restarts the clock at `now`.
    pub fn restart(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    /// Returns how long to wait at `now` before the next frame is due.
    #[must_use]
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        (self.last_frame + self.frame_interval).saturating_duration_since(now)
    }
}

fn default_interval() -> Duration {
    Duration::from_secs_f64(1.0 / FrameClock::DEFAULT_RATE)
}

fn interval_from_rate(rate: f64) -> Duration {
    if !(rate.is_finite() && rate > 0.0) {
        return default_interval();
    }
    Duration::try_from_secs_f64(1.0 / rate).unwrap_or_else(|_| default_interval())
}
