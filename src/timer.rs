//! Stopwatch state machine.
//!
//! Time is never advanced by a ticking interval. Instead, elapsed time is
//! recomputed from the recorded start instant whenever it is queried, so
//! every operation takes the current time as an argument.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    /// Nothing measured yet, or the last time was declined.
    Idle,

    /// Elapsed time increases with the clock.
    Running,

    /// Elapsed time is frozen, and can be submitted or declined.
    Stopped,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    /// Epoch millis at which the current run would have started if it had
    /// never been paused: the resume instant minus the time accumulated
    /// before it.
    start_epoch: i64,

    /// The frozen elapsed time. Only meaningful while not running.
    elapsed_millis: u64,

    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.elapsed_millis == 0 {
            TimerPhase::Idle
        } else {
            TimerPhase::Stopped
        }
    }

    /// Start or resume the stopwatch if it is not running, or stop it
    /// if it is.
    ///
    /// Stopping does not reset the elapsed time: starting again continues
    /// from the frozen value.
    pub fn toggle_start_stop(&mut self, now_millis: i64) {
        if self.running {
            self.elapsed_millis = self.since_start(now_millis);
            self.running = false;
        } else {
            let accumulated = i64::try_from(self.elapsed_millis).unwrap_or(i64::MAX);
            self.start_epoch = now_millis.saturating_sub(accumulated);
            self.running = true;
        }
    }

    /// The measured time: increasing while running, frozen while stopped.
    pub fn current_elapsed_millis(&self, now_millis: i64) -> u64 {
        if self.running {
            self.since_start(now_millis)
        } else {
            self.elapsed_millis
        }
    }

    /// The frozen time, or `None` while running.
    pub fn stopped_millis(&self) -> Option<u64> {
        if self.running {
            None
        } else {
            Some(self.elapsed_millis)
        }
    }

    /// Whether there is a stopped, non-zero time that can be accepted
    /// or declined.
    pub fn can_submit(&self) -> bool {
        !self.running && self.elapsed_millis > 0
    }

    /// Discard the frozen time, and return to idle.
    pub fn reset(&mut self) {
        self.elapsed_millis = 0;
        self.running = false;
    }

    /// The measured time, formatted with `format_display`.
    pub fn display(&self, now_millis: i64) -> String {
        format_display(self.current_elapsed_millis(now_millis))
    }

    // A clock that went backwards counts as no time passed.
    fn since_start(&self, now_millis: i64) -> u64 {
        u64::try_from(now_millis.saturating_sub(self.start_epoch)).unwrap_or(0)
    }
}

/// Format milliseconds as "SS.mmm".
///
/// Seconds are padded to two digits, but not truncated: 100 seconds and
/// above produce a wider field, f.e. "123.456".
pub fn format_display(elapsed_millis: u64) -> String {
    let secs = elapsed_millis / 1000;
    let millis = elapsed_millis % 1000;
    format!("{:02}.{:03}", secs, millis)
}
