//! Run statistics.

use std::time::Duration;

use dispatcher::DispatchStats;

/// Summary of one daemon run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Dispatch loop counters
    pub stats: DispatchStats,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Notifications handled per second
    pub fn notifications_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.stats.notifications as f64 / secs
        } else {
            0.0
        }
    }

    /// Print a human-readable summary to stdout
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===\n");
        println!("  Notifications: {}", self.stats.notifications);
        println!("  Renders:       {}", self.stats.renders);
        println!("  Failures:      {}", self.stats.failures);
        println!("  Duration:      {:.2}s", self.duration.as_secs_f64());
        println!("  Rate:          {:.2} notifications/s", self.notifications_per_sec());
        println!();
    }
}
