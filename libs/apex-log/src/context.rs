use super::*;
use std::panic::Location;

/// Logger bound to a context string, created by [`Apex::create_logger`].
///
/// Unlike the top-level entry points it honours the context filter, and it
/// prefixes every record with a `[<context>]` tag.
#[derive(Debug, Clone)]
pub struct ContextLogger {
    apex: Apex,
    context: String,
}

impl ContextLogger {
    pub(crate) fn new(apex: Apex, context: String) -> Self {
        Self { apex, context }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    #[track_caller]
    pub fn log(&self, level: Level, args: Vec<Arg>) {
        self.dispatch(level, Location::caller(), args);
    }

    #[track_caller]
    pub fn info(&self, args: Vec<Arg>) {
        self.dispatch(Level::Info, Location::caller(), args);
    }

    #[track_caller]
    pub fn warn(&self, args: Vec<Arg>) {
        self.dispatch(Level::Warn, Location::caller(), args);
    }

    #[track_caller]
    pub fn error(&self, args: Vec<Arg>) {
        self.dispatch(Level::Error, Location::caller(), args);
    }

    #[track_caller]
    pub fn debug(&self, args: Vec<Arg>) {
        self.dispatch(Level::Debug, Location::caller(), args);
    }

    fn dispatch(&self, level: Level, location: &Location<'_>, args: Vec<Arg>) {
        if !self.apex.allows_context(&self.context) {
            return;
        }

        let mut tagged = Vec::with_capacity(args.len() + 1);
        tagged.push(Arg::Str(format!("[{}]", self.context)));
        tagged.extend(args);

        self.apex.emit(level, Some(&self.context), location, tagged);
    }
}
