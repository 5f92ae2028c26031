#[cfg(test)]
#[path = "rest_timer_test.rs"]
mod tests;

use std::time::Duration;

use tokio::time;

pub const DEFAULT_REST_SECONDS: u64 = 30;
pub const DEFAULT_TOTAL_SETS: u32 = 5;

/// `MM:SS`, minutes keep counting past 59.
pub fn format_timer(seconds: u64) -> String {
    return format!("{:02}:{:02}", seconds / 60, seconds % 60);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SetProgress {
    pub current: u32,
    pub total: u32,
}

impl SetProgress {
    pub fn new(current: u32, total: u32) -> SetProgress {
        return SetProgress {
            current: current.min(total),
            total,
        };
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }

        return (u64::from(self.current) * 100 / u64::from(self.total)) as u32;
    }

    pub fn label(&self) -> String {
        return format!("{} / {}", self.current, self.total);
    }
}

/// Countdown for the rest between two sets.
pub struct RestTimer {
    remaining: u64,
}

impl RestTimer {
    pub fn new(seconds: u64) -> RestTimer {
        return RestTimer { remaining: seconds };
    }

    pub fn is_done(&self) -> bool {
        return self.remaining == 0;
    }

    /// Counts one second down. Returns false once the timer has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        return !self.is_done();
    }

    /// Reports the remaining seconds straight away, then once per `period` until it
    /// reaches zero.
    pub async fn run<F: FnMut(u64)>(&mut self, period: Duration, mut on_tick: F) {
        on_tick(self.remaining);

        let mut interval = time::interval(period);
        // The first tick of an interval completes immediately.
        interval.tick().await;

        while !self.is_done() {
            interval.tick().await;
            self.tick();
            on_tick(self.remaining);
        }
    }
}
