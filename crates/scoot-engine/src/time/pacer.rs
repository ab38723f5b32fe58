use std::time::{Duration, Instant};

/// Sleep-based frame-rate cap.
///
/// With a target set, `pace()` blocks until the current frame's budget is
/// spent, so the loop runs at the target rate even when the surface presents
/// without vsync. With no target, `pace()` returns immediately and the loop
/// runs as fast as the CPU/GPU allow.
///
/// Deadlines accumulate from frame to frame so oversleep on one frame is paid
/// back on the next. If the loop falls more than one full budget behind, the
/// deadline re-anchors to now instead of trying to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    /// Creates an uncapped pacer.
    pub fn new() -> Self {
        Self {
            target: None,
            next_deadline: None,
        }
    }

    /// Creates a pacer capped at `fps` frames per second.
    pub fn with_target_fps(fps: u32) -> Self {
        let mut pacer = Self::new();
        pacer.set_target_fps(Some(fps));
        pacer
    }

    /// Sets or clears the frame-rate cap. `Some(0)` is treated as uncapped.
    pub fn set_target_fps(&mut self, fps: Option<u32>) {
        self.target = match fps {
            Some(0) | None => None,
            Some(f) => Some(Duration::from_secs(1) / f),
        };
        self.next_deadline = None;
    }

    /// Returns the current cap, if any.
    pub fn target_fps(&self) -> Option<u32> {
        self.target
            .map(|budget| (1.0 / budget.as_secs_f64()).round() as u32)
    }

    /// Blocks until the frame budget is spent. No-op when uncapped.
    pub fn pace(&mut self) {
        let Some(budget) = self.target else {
            self.next_deadline = None;
            return;
        };

        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now + budget);

        if deadline > now {
            std::thread::sleep(deadline - now);
            self.next_deadline = Some(deadline + budget);
        } else if now.duration_since(deadline) > budget {
            // Too far behind to catch up; re-anchor.
            self.next_deadline = Some(now + budget);
        } else {
            self.next_deadline = Some(deadline + budget);
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_pace_is_immediate() {
        let mut pacer = FramePacer::new();
        let start = Instant::now();
        for _ in 0..100 {
            pacer.pace();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn capped_pace_enforces_budget() {
        let mut pacer = FramePacer::with_target_fps(100); // 10ms budget
        let start = Instant::now();
        pacer.pace();
        pacer.pace();
        pacer.pace();
        // Three paced frames need at least ~two full budgets.
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn zero_fps_means_uncapped() {
        let mut pacer = FramePacer::new();
        pacer.set_target_fps(Some(0));
        assert_eq!(pacer.target_fps(), None);
    }

    #[test]
    fn retarget_round_trips() {
        let mut pacer = FramePacer::with_target_fps(60);
        assert_eq!(pacer.target_fps(), Some(60));
        pacer.set_target_fps(None);
        assert_eq!(pacer.target_fps(), None);
    }
}
