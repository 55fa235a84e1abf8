use super::*;
use std::{
    collections::HashMap,
    io::{stdout, Stdout, Write},
    time::Instant,
};

const GROUP_INDENT: &str = "  ";

/// Line-oriented terminal sink. Groups indent their contents by two
/// spaces per level; timers report milliseconds.
pub struct ConsoleSink<W: Write = Stdout> {
    writer: W,
    colorful: bool,
    depth: usize,
    timers: HashMap<String, Instant>,
}

impl ConsoleSink<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(stdout())
    }
}

impl Default for ConsoleSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Colours follow the logger setting: on in debug builds or when
    /// `APEX_LOG_COLORFUL` is set.
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            colorful: colorful_logs(),
            depth: 0,
            timers: HashMap::new(),
        }
    }

    pub fn colorful(mut self, colorful: bool) -> Self {
        self.colorful = colorful;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, text: &str) {
        let indent = GROUP_INDENT.repeat(self.depth);
        if text.is_empty() {
            let _ = writeln!(self.writer, "{indent}");
            return;
        }
        for line in text.lines() {
            let _ = writeln!(self.writer, "{indent}{line}");
        }
    }
}

impl<W: Write> LogSink for ConsoleSink<W> {
    fn emit(&mut self, record: &LogRecord) {
        let message = record.message();
        let header = if self.colorful {
            record.style.paint(&message)
        } else {
            message
        };

        let line = if record.args.is_empty() {
            header
        } else {
            format!("{} {}", header, record.payload())
        };
        self.write_line(&line);
    }

    fn begin_group(&mut self, name: &str) {
        self.write_line(name);
        self.depth += 1;
    }

    fn end_group(&mut self) {
        if self.depth == 0 {
            tracing::debug!("group end without an open group");
            return;
        }
        self.depth -= 1;
    }

    fn start_timer(&mut self, label: &str) {
        if self.timers.contains_key(label) {
            self.write_line(&format!("Timer '{label}' already exists"));
            return;
        }
        self.timers.insert(label.to_owned(), Instant::now());
    }

    fn stop_timer(&mut self, label: &str) {
        match self.timers.remove(label) {
            Some(started) => {
                let elapsed = started.elapsed().as_secs_f64() * 1000.0;
                self.write_line(&format!("{label}: {elapsed:.3}ms"));
            }
            None => {
                tracing::warn!("timer {} was never started", label);
                self.write_line(&format!("Timer '{label}' does not exist"));
            }
        }
    }
}
