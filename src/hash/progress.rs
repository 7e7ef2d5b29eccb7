// Progress reporting and cooperative cancellation
// The engine polls a reporter between chunks and files; callers supply one

/// Observer for long-running hash operations
///
/// The engine reports progress as input is consumed and checks the
/// cancellation flag before every read. Percentages within one operation are
/// monotonically non-decreasing and reach exactly 100 on natural completion.
pub trait ProgressReporter {
    /// Report overall progress as a percentage (0-100)
    fn report_percent(&self, percent: u8);

    /// True when the caller wants the operation stopped
    fn is_cancelled(&self) -> bool;
}

/// Reporter that discards progress and never cancels
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report_percent(&self, _percent: u8) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}
