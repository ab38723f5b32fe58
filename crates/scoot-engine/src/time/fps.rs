/// Smoothed frames-per-second counter for diagnostic overlays.
///
/// Accumulates frames over a fixed refresh window (0.5s) and publishes a new
/// rate each time the window elapses, which keeps the on-screen number stable
/// enough to read at uncapped frame rates.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    accum: f32,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            window: 0.5,
            accum: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Records one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.frames += 1;
        self.accum += dt;

        if self.accum >= self.window {
            self.fps = self.frames as f32 / self.accum;
            self.frames = 0;
            self.accum = 0.0;
        }
    }

    /// Last published rate. Zero until the first window elapses.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_steady_rate() {
        let mut counter = FpsCounter::new();
        for _ in 0..60 {
            counter.tick(1.0 / 60.0);
        }
        let fps = counter.fps();
        assert!((fps - 60.0).abs() < 1.0, "fps was {fps}");
    }

    #[test]
    fn zero_before_first_window() {
        let mut counter = FpsCounter::new();
        counter.tick(0.016);
        assert_eq!(counter.fps(), 0.0);
    }
}
