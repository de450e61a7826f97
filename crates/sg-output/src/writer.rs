//! The `OutputWriter` trait implemented by backend writers.

use crate::{InterceptionRow, OutputResult, PortalEventRow, TickSummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    fn write_interception(&mut self, row: &InterceptionRow) -> OutputResult<()>;

    fn write_portal_event(&mut self, row: &PortalEventRow) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
