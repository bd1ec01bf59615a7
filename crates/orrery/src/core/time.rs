/// Variable-step frame clock.
/// Turns monotonic timestamps into per-frame deltas for the orbital updater.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the previous tick, in seconds. `None` until the first tick.
    last: Option<f64>,
    /// Number of ticks observed so far.
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current timestamp (seconds). Returns the delta since the last call.
    ///
    /// The very first call returns 0.0 so the scene never jumps by a whole
    /// clock epoch. A clock that runs backwards also yields 0.0.
    pub fn tick(&mut self, now_seconds: f64) -> f32 {
        self.frames += 1;
        let dt = match self.last {
            None => {
                log::debug!("frame clock: first tick at {:.3}s, delta suppressed", now_seconds);
                0.0
            }
            Some(prev) if now_seconds >= prev => (now_seconds - prev) as f32,
            Some(prev) => {
                log::debug!("frame clock: time went backwards ({:.3}s -> {:.3}s)", prev, now_seconds);
                0.0
            }
        };
        self.last = Some(now_seconds);
        dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the previous timestamp; the next tick reports a zero delta again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
