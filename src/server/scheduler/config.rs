use chrono::Duration;

pub mod reconcile {
    use super::*;

    /// Cron expression for the no-show reconciliation sweep
    /// Runs every 15 minutes at second 0 (00:00, 00:15, 00:30, etc.)
    pub const CRON_EXPRESSION: &str = "0 */15 * * * *";

    /// Time after the pickup time before an uncollected reservation counts as a no-show
    pub const NO_SHOW_GRACE_PERIOD: Duration = Duration::minutes(30);
}
