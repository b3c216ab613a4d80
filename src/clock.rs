use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

/// Whole-second elapsed counter that only runs while unpaused.
///
/// Time is fed in by the caller through [`PauseClock::advance`]; the clock never
/// reads the wall clock itself. Progress towards the next tick survives a
/// pause, so resuming continues the interrupted second instead of restarting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PauseClock {
    elapsed_seconds: u64,
    partial: Duration,
    paused: bool,
}

impl PauseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by `dt` and returns how many one-second ticks fired.
    pub fn advance(&mut self, dt: Duration) -> u64 {
        if self.paused {
            return 0;
        }

        self.partial += dt;
        let mut ticks = 0;
        while self.partial >= SECOND {
            self.partial -= SECOND;
            ticks += 1;
        }
        self.elapsed_seconds += ticks;
        ticks
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}
