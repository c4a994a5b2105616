//! Metric descriptions
//!
//! The dispatcher emits these counters through the `metrics` facade; this
//! module registers their descriptions with the installed recorder. Names
//! here must stay in sync with the call sites.

use metrics::describe_counter;

/// Change notifications received by the dispatch loop
pub const NOTIFICATIONS_TOTAL: &str = "tmpld_notifications_total";

/// Successful template renders
pub const RENDERS_TOTAL: &str = "tmpld_renders_total";

/// Failed render attempts
pub const RENDER_FAILURES_TOTAL: &str = "tmpld_render_failures_total";

/// Messages delivered to queue targets
pub const QUEUE_MESSAGES_TOTAL: &str = "tmpld_queue_messages_total";

/// Register metric descriptions with the installed recorder
pub fn describe_metrics() {
    describe_counter!(
        NOTIFICATIONS_TOTAL,
        "Change notifications received by the dispatch loop"
    );
    describe_counter!(RENDERS_TOTAL, "Successful template renders");
    describe_counter!(RENDER_FAILURES_TOTAL, "Failed render attempts");
    describe_counter!(QUEUE_MESSAGES_TOTAL, "Messages delivered to queue targets");
}
