use super::*;

/// One log entry. Built and handed to the sink inside a single emitter
/// call, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
    pub caller: String,
    pub context: Option<String>,
    pub style: StyleDescriptor,
    pub args: Vec<Arg>,
}

impl LogRecord {
    pub(crate) fn new(
        level: Level,
        caller: String,
        context: Option<&str>,
        style: StyleDescriptor,
        args: Vec<Arg>,
    ) -> Self {
        Self {
            level,
            timestamp: LogTime::now(),
            caller,
            context: context.map(ToOwned::to_owned),
            style,
            args,
        }
    }

    /// `<timestamp> [<LEVEL>] (<caller>)`
    pub fn message(&self) -> String {
        format!("{} {} ({})", self.timestamp, self.level.prefix(), self.caller)
    }

    /// Arguments rendered and joined by single spaces.
    pub fn payload(&self) -> String {
        self.args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
