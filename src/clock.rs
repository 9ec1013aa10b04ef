use std::{thread::sleep, time::{Duration, Instant}};

/// Holds the main loop to a fixed number of ticks per second.
pub struct Clock {
    tick_interval: Duration,
    last_tick: Instant,
}

impl Clock {
    pub fn new(ticks_per_second: u32) -> Self {
        let tick_interval = Duration::from_secs(1) / ticks_per_second.max(1);
        Clock { tick_interval, last_tick: Instant::now() }
    }

    #[cfg(test)]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Sleeps for whatever is left of the current tick.
    pub fn tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if let Some(remaining) = self.tick_interval.checked_sub(elapsed) {
            sleep(remaining);
        }
        self.last_tick = Instant::now();
    }
}
