use super::*;
use serde_json::Value;
use std::{cell::RefCell, panic::Location, rc::Rc};

struct Inner {
    store: ConfigStore,
    sink: RefCell<Box<dyn LogSink>>,
    caller_mode: CallerMode,
}

/// Logger handle. Owns its configuration and sink; clones share both.
///
/// The handle is single-threaded (`!Send`, `!Sync`). Every public entry
/// point is `#[track_caller]`, so records are attributed to the code that
/// called it.
#[derive(Clone)]
pub struct Apex {
    inner: Rc<Inner>,
}

impl Default for Apex {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for Apex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Apex")
            .field("config", &self.config())
            .field("caller_mode", &self.inner.caller_mode)
            .finish()
    }
}

impl Apex {
    /// Default configuration writing to `sink`.
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self::builder().sink(sink).build()
    }

    pub fn builder() -> ApexBuilder {
        ApexBuilder::default()
    }

    /// Console logger configured from `APEX_LOG_*` environment variables.
    pub fn from_env() -> ApexResult<Self> {
        Ok(Self::builder().config(Config::from_env()?).build())
    }

    pub fn config(&self) -> Config {
        self.inner.store.config()
    }

    pub fn set_config(&self, patch: ConfigPatch) {
        self.inner.store.set_config(patch);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.store.set_enabled(enabled);
    }

    pub fn set_filters(&self, patch: FilterPatch) {
        self.inner.store.set_filters(patch);
    }

    pub fn create_logger(&self, context: impl Into<String>) -> ContextLogger {
        ContextLogger::new(self.clone(), context.into())
    }

    /// Low-level entry point. Ignores the context filter.
    #[track_caller]
    pub fn log(&self, level: Level, args: Vec<Arg>) {
        self.emit(level, None, Location::caller(), args);
    }

    #[track_caller]
    pub fn info(&self, args: Vec<Arg>) {
        self.emit(Level::Info, None, Location::caller(), args);
    }

    #[track_caller]
    pub fn warn(&self, args: Vec<Arg>) {
        self.emit(Level::Warn, None, Location::caller(), args);
    }

    #[track_caller]
    pub fn error(&self, args: Vec<Arg>) {
        self.emit(Level::Error, None, Location::caller(), args);
    }

    #[track_caller]
    pub fn debug(&self, args: Vec<Arg>) {
        self.emit(Level::Debug, None, Location::caller(), args);
    }

    pub fn group(&self, name: &str) {
        self.with_sink("group", |sink| sink.begin_group(name));
    }

    pub fn group_end(&self) {
        self.with_sink("group end", |sink| sink.end_group());
    }

    pub fn time(&self, label: &str) {
        self.with_sink("timer start", |sink| sink.start_timer(label));
    }

    pub fn time_end(&self, label: &str) {
        self.with_sink("timer stop", |sink| sink.stop_timer(label));
    }

    /// Runs `f` on the sink unless a sink call is already in progress, in
    /// which case the nested call is dropped.
    fn with_sink(&self, what: &str, f: impl FnOnce(&mut dyn LogSink)) {
        match self.inner.sink.try_borrow_mut() {
            Ok(mut sink) => f(&mut **sink),
            Err(_) => tracing::warn!("sink is busy, dropping nested {}", what),
        }
    }

    pub(crate) fn allows_context(&self, context: &str) -> bool {
        self.inner
            .store
            .with(|config| config.filters.allows_context(context))
    }

    pub(crate) fn emit(
        &self,
        level: Level,
        context: Option<&str>,
        location: &Location<'_>,
        args: Vec<Arg>,
    ) {
        let gate = self.inner.store.with(|config| {
            (config.logging_enabled && config.filters.allows_level(level))
                .then(|| (config.theme.clone(), config.format_objects_as_json))
        });
        let Some((theme, as_json)) = gate else {
            return;
        };

        let caller = self.inner.caller_mode.resolve(location);
        let style = style::resolve_style(&theme, level);
        let args = if as_json { json_args(args) } else { args };
        let record = LogRecord::new(level, caller, context, style, args);

        self.with_sink(level.as_str(), |sink| sink.emit(&record));
    }
}

fn pretty(value: &Value) -> ApexResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Replaces structured arguments with their 2-space indented JSON text.
/// Everything else passes through in place.
pub(crate) fn json_args(args: Vec<Arg>) -> Vec<Arg> {
    args.into_iter()
        .map(|arg| match arg {
            Arg::Structured(value) => match pretty(&value) {
                Ok(text) => Arg::Str(text),
                Err(e) => {
                    tracing::warn!("failed to format log argument: {}", e);
                    Arg::Unserializable(e.to_string())
                }
            },
            other => other,
        })
        .collect()
}

#[derive(Default)]
pub struct ApexBuilder {
    config: Config,
    sink: Option<Box<dyn LogSink>>,
    caller_mode: CallerMode,
}

impl ApexBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn caller_mode(mut self, mode: CallerMode) -> Self {
        self.caller_mode = mode;
        self
    }

    pub fn build(self) -> Apex {
        Apex {
            inner: Rc::new(Inner {
                store: ConfigStore::new(self.config),
                sink: RefCell::new(
                    self.sink
                        .unwrap_or_else(|| Box::new(ConsoleSink::new())),
                ),
                caller_mode: self.caller_mode,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apex() -> (Apex, MemorySink) {
        let sink = MemorySink::new();
        (Apex::new(sink.clone()), sink)
    }

    #[test]
    fn test_emit_one_record() {
        let (apex, sink) = apex();
        let line = line!() + 1;
        apex.warn(vec![Arg::from("disk"), Arg::from(91)]);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.level, Level::Warn);
        assert_eq!(record.caller, format!("apex.rs:{line}"));
        assert_eq!(record.context, None);
        assert_eq!(record.style.directive(), "color: #FFD60A;");
        assert_eq!(record.args, vec![Arg::from("disk"), Arg::from(91)]);
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let (apex, sink) = apex();
        apex.set_enabled(false);
        for level in Level::ALL {
            apex.log(level, vec![Arg::from("x")]);
        }
        assert!(sink.is_empty());

        apex.set_enabled(true);
        apex.info(vec![]);
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_level_filter_is_exact() {
        let (apex, sink) = apex();
        apex.set_filters(FilterPatch::new().level(Level::Warn));

        apex.error(vec![Arg::from("no")]);
        apex.debug(vec![Arg::from("no")]);
        apex.info(vec![Arg::from("no")]);
        assert!(sink.is_empty());

        apex.warn(vec![Arg::from("yes")]);
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_json_mode() {
        let (apex, sink) = apex();
        apex.set_config(ConfigPatch::new().format_objects_as_json(true));
        apex.info(vec![
            Arg::from("user"),
            Arg::from(json!({ "id": 7, "tags": ["a"] })),
            Arg::Null,
            Arg::from(3),
        ]);

        let args = &sink.records()[0].args;
        assert_eq!(
            args,
            &vec![
                Arg::from("user"),
                Arg::Str("{\n  \"id\": 7,\n  \"tags\": [\n    \"a\"\n  ]\n}".into()),
                Arg::Null,
                Arg::Int(3),
            ]
        );
    }

    #[test]
    fn test_structured_kept_without_json_mode() {
        let (apex, sink) = apex();
        let value = json!([1, 2]);
        apex.debug(vec![Arg::from(value.clone())]);
        assert_eq!(sink.records()[0].args, vec![Arg::Structured(value)]);
    }

    #[test]
    fn test_theme_switch_and_unknown_theme() {
        let (apex, sink) = apex();
        apex.set_config(ConfigPatch::new().theme(Theme::Light));
        apex.error(vec![]);
        apex.set_config(ConfigPatch::new().theme("nope"));
        apex.error(vec![]);

        let records = sink.records();
        assert_eq!(records[0].style.directive(), "color: #FF3B30;");
        assert_eq!(records[1].style, StyleDescriptor::EMPTY);
    }

    #[test]
    fn test_pass_throughs_ignore_gates() {
        let (apex, sink) = apex();
        apex.set_enabled(false);
        apex.group("g");
        apex.time("t");
        apex.time_end("t");
        apex.group_end();

        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::BeginGroup("g".into()),
                SinkEvent::StartTimer("t".into()),
                SinkEvent::StopTimer("t".into()),
                SinkEvent::EndGroup,
            ]
        );
    }

    #[test]
    fn test_stack_walk_mode() {
        let sink = MemorySink::new();
        let apex = Apex::builder()
            .sink(sink.clone())
            .caller_mode(CallerMode::StackWalk { depth: 100_000 })
            .build();
        apex.info(vec![]);
        assert_eq!(sink.records()[0].caller, UNKNOWN_CALLER);
    }

    #[test]
    fn test_clones_share_config() {
        let (apex, sink) = apex();
        let other = apex.clone();
        other.set_enabled(false);
        apex.info(vec![]);
        assert!(sink.is_empty());
        assert!(!apex.config().logging_enabled);
    }

    #[derive(Default)]
    struct Echo {
        apex: Rc<RefCell<Option<Apex>>>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl LogSink for Echo {
        fn emit(&mut self, record: &LogRecord) {
            self.calls.borrow_mut().push(record.payload());
            if let Some(apex) = self.apex.borrow().as_ref() {
                apex.group("nested");
                apex.time("nested");
                apex.time_end("nested");
                apex.group_end();
                apex.info(vec![Arg::from("nested")]);
            }
        }

        fn begin_group(&mut self, name: &str) {
            self.calls.borrow_mut().push(format!("group {name}"));
        }

        fn end_group(&mut self) {
            self.calls.borrow_mut().push("group end".into());
        }

        fn start_timer(&mut self, label: &str) {
            self.calls.borrow_mut().push(format!("time {label}"));
        }

        fn stop_timer(&mut self, label: &str) {
            self.calls.borrow_mut().push(format!("time end {label}"));
        }
    }

    #[test]
    fn test_nested_sink_calls_are_dropped() {
        let echo = Echo::default();
        let (slot, calls) = (echo.apex.clone(), echo.calls.clone());
        let apex = Apex::new(echo);
        *slot.borrow_mut() = Some(apex.clone());

        apex.info(vec![Arg::from("outer")]);
        apex.group("after");

        assert_eq!(*calls.borrow(), vec!["outer".to_owned(), "group after".to_owned()]);
        slot.borrow_mut().take();
    }
}
