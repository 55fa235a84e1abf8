use super::*;
use std::{collections::HashMap, time::Instant};
use tracing::span::EnteredSpan;

/// Forwards records into the `tracing` ecosystem. Groups become entered
/// spans, so an installed subscriber sees nested output the same way.
#[derive(Default)]
pub struct TracingSink {
    groups: Vec<EnteredSpan>,
    timers: HashMap<String, Instant>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for TracingSink {
    fn emit(&mut self, record: &LogRecord) {
        let caller = record.caller.as_str();
        let payload = record.payload();
        match record.level {
            Level::Info => tracing::info!(target: APEX_TARGET, caller, "{}", payload),
            Level::Warn => tracing::warn!(target: APEX_TARGET, caller, "{}", payload),
            Level::Error => tracing::error!(target: APEX_TARGET, caller, "{}", payload),
            Level::Debug => tracing::debug!(target: APEX_TARGET, caller, "{}", payload),
        }
    }

    fn begin_group(&mut self, name: &str) {
        self.groups
            .push(tracing::info_span!(target: APEX_TARGET, "group", name).entered());
    }

    fn end_group(&mut self) {
        if self.groups.pop().is_none() {
            tracing::debug!("group end without an open group");
        }
    }

    fn start_timer(&mut self, label: &str) {
        self.timers
            .entry(label.to_owned())
            .or_insert_with(Instant::now);
    }

    fn stop_timer(&mut self, label: &str) {
        match self.timers.remove(label) {
            Some(started) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                tracing::info!(target: APEX_TARGET, label, elapsed_ms, "timer finished");
            }
            None => tracing::warn!(target: APEX_TARGET, label, "timer does not exist"),
        }
    }
}
