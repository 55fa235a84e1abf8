mod console;
mod forward;
mod memory;

use super::*;

pub use console::ConsoleSink;
pub use forward::TracingSink;
pub use memory::{MemorySink, SinkEvent};

/// Output device for records and for the group/timer pass-throughs.
///
/// Implementations are expected not to fail: write errors are swallowed
/// rather than surfaced to the log call.
pub trait LogSink {
    /// Writes one record. `record.message()` is the header line,
    /// `record.style` the presentation hint and `record.args` the values.
    fn emit(&mut self, record: &LogRecord);

    fn begin_group(&mut self, name: &str);

    /// Closes the most recently opened group.
    fn end_group(&mut self);

    fn start_timer(&mut self, label: &str);

    /// Reports the time elapsed since `start_timer(label)`.
    fn stop_timer(&mut self, label: &str);
}
