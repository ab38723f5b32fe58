use std::time::{Duration, Instant};

/// Timing numbers for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Instant the tick was taken.
    pub now: Instant,
    /// Frames ticked so far.
    pub frame_index: u64,
}

/// Produces one `FrameTime` per presented frame.
///
/// Delta time is clamped into `[dt_min, dt_max]`: the lower bound keeps
/// uncapped tight loops from reporting zero dt, the upper bound keeps a
/// debugger pause or a minimized window from producing a movement teleport
/// on the next frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    prev: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with caller-chosen delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            dt_min,
            dt_max,
            prev: Instant::now(),
            frame_index: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.prev)
            .clamp(self.dt_min, self.dt_max);
        self.prev = now;

        let frame_index = self.frame_index;
        self.frame_index = self.frame_index.wrapping_add(1);

        FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_increments_frame_index() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(b.frame_index, a.frame_index + 1);
    }

    #[test]
    fn dt_respects_min_clamp() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(250));
        // Two immediate ticks: raw dt is near zero, clamped up to 5ms.
        clock.tick();
        let ft = clock.tick();
        assert!(ft.dt >= 0.005);
    }

    #[test]
    fn dt_respects_max_clamp() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_micros(100), Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));
        let ft = clock.tick();
        assert!(ft.dt <= 0.010 + f32::EPSILON);
    }
}
