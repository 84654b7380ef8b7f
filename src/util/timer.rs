use std::time::{Duration, Instant};

pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Timer {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Runs `f` and returns its result along with the wall time it took.
    pub fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
        let timer = Timer::new();
        let out = f();
        (out, timer.elapsed())
    }
}
