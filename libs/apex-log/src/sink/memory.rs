use super::*;
use std::{cell::RefCell, rc::Rc};

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Emit(LogRecord),
    BeginGroup(String),
    EndGroup,
    StartTimer(String),
    StopTimer(String),
}

/// Records every sink call in memory. Clones share the same buffer, so a
/// clone kept by the caller observes what the logger wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<SinkEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    /// Only the emitted records, in order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Emit(record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: SinkEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl LogSink for MemorySink {
    fn emit(&mut self, record: &LogRecord) {
        self.push(SinkEvent::Emit(record.clone()));
    }

    fn begin_group(&mut self, name: &str) {
        self.push(SinkEvent::BeginGroup(name.to_owned()));
    }

    fn end_group(&mut self) {
        self.push(SinkEvent::EndGroup);
    }

    fn start_timer(&mut self, label: &str) {
        self.push(SinkEvent::StartTimer(label.to_owned()));
    }

    fn stop_timer(&mut self, label: &str) {
        self.push(SinkEvent::StopTimer(label.to_owned()));
    }
}
