use crate::core::constants::MAX_FRAME_DELTA_MS;
use instant::Instant;

/// Measures the time between animation frames for hosts that do not
/// supply their own frame delta.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call, capped at `MAX_FRAME_DELTA_MS`.
    /// The first call after creation or `reset` returns 0.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        delta.min(MAX_FRAME_DELTA_MS)
    }

    /// Forget the previous frame, e.g. when the animation loop was idle
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn test_tick_measures_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.tick();
        std::thread::sleep(Duration::from_millis(5));
        let delta = clock.tick();
        assert!(delta >= 5.0);
        assert!(delta <= MAX_FRAME_DELTA_MS);

        clock.reset();
        assert_eq!(clock.tick(), 0.0);
    }
}
