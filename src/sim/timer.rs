/// Periodic timers for the cooperative host loop.
///
/// A timer never fires on its own: the host polls it with the current
/// instant. A poll fires at most once and re-arms from that instant, so a
/// late poll never produces a burst of catch-up activations.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct Timer {
    period: Duration,
    next_due: Option<Instant>,
}

impl Timer {
    /// Running timer, first due one period after `now`.
    pub fn started(period: Duration, now: Instant) -> Self {
        Timer { period, next_due: Some(now + period) }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the period. A running timer restarts its countdown from the
    /// instant it was last armed, so calling this from inside the timer's
    /// own activation behaves like re-arming at that instant.
    pub fn set_period(&mut self, period: Duration) {
        if let Some(due) = self.next_due {
            self.next_due = Some(due - self.period + period);
        }
        self.period = period;
    }

    /// Fire if due. Returns whether the activation should run.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

/// The two periodic activities of a session.
#[derive(Clone, Copy, Debug)]
pub struct Timers {
    pub tick: Timer,
    pub spawn: Timer,
}

impl Timers {
    pub fn started(tick_period: Duration, spawn_period: Duration, now: Instant) -> Self {
        Timers {
            tick: Timer::started(tick_period, now),
            spawn: Timer::started(spawn_period, now),
        }
    }

    pub fn stop_all(&mut self) {
        self.tick.stop();
        self.spawn.stop();
    }
}
