//! Progress derivation for the progress bar

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Elapsed position within a track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    elapsed: Duration,
    total: Duration,
}

impl Progress {
    /// Elapsed is clamped to total
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self {
            elapsed: elapsed.min(total),
            total,
        }
    }

    /// Ratio of progress (0.0 to 1.0), 0.0 for a zero-length track
    pub fn ratio(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Progress bar width (0.0 to 100.0)
    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }
}

impl fmt::Display for Progress {
    /// `1:05 / 5:16`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}",
            format_clock(self.elapsed),
            format_clock(self.total)
        )
    }
}

/// Format a duration as `m:ss` (whole seconds, minutes unbounded)
pub fn format_clock(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
