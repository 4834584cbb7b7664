//! Independent per-period deadlines.
//!
//! Each distinct period owns its own deadline; periods are never derived from
//! a common tick. When the loop stalls past one or more deadlines the period
//! fires once and the missed ticks are dropped.
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Deadline state of one period.
pub struct PeriodTimer {
    pub period_ms: u32,
    /// Absolute time of the next firing, in timer milliseconds.
    pub next_due_ms: u64,
    /// Number of times this period has fired.
    pub fired: u64,
}

/// Set of period timers driven by [`GatewayRunner`](super::GatewayRunner).
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    timers: Vec<PeriodTimer>,
}

impl Schedule {
    /// Arm one timer per period; each first fires one period after `start_ms`.
    /// Zero periods are ignored.
    pub fn new(periods: &[u32], start_ms: u64) -> Self {
        let timers = periods
            .iter()
            .filter(|&&period_ms| period_ms != 0)
            .map(|&period_ms| PeriodTimer {
                period_ms,
                next_due_ms: start_ms + period_ms as u64,
                fired: 0,
            })
            .collect();
        Self { timers }
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn timers(&self) -> &[PeriodTimer] {
        &self.timers
    }

    /// Earliest pending deadline, `None` when nothing is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|timer| timer.next_due_ms).min()
    }

    /// Periods due at `now_ms`, in arming order. Each due period is returned
    /// once and its deadline moves past `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<u32> {
        let mut due = Vec::new();
        for timer in self.timers.iter_mut() {
            if now_ms < timer.next_due_ms {
                continue;
            }
            let period = timer.period_ms as u64;
            let missed = (now_ms - timer.next_due_ms) / period;
            if missed > 0 {
                warn!(
                    "{} ms cycle late by {} ms, skipping {} missed tick(s)",
                    timer.period_ms,
                    now_ms - timer.next_due_ms,
                    missed
                );
            }
            timer.next_due_ms += (missed + 1) * period;
            timer.fired += 1;
            due.push(timer.period_ms);
        }
        due
    }
}
