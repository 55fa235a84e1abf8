use apex_log::{
    log_info, Apex, Arg, Config, ConfigPatch, FilterPatch, FilterSpec, Level, MemorySink, Theme,
};
use proptest::prelude::*;
use serde::Serialize;
use serde_json::json;

fn setup() -> (Apex, MemorySink) {
    let sink = MemorySink::new();
    (Apex::new(sink.clone()), sink)
}

fn level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

fn distinct_levels() -> impl Strategy<Value = (Level, Level)> {
    (level(), level()).prop_filter("levels must differ", |(a, b)| a != b)
}

fn distinct_contexts() -> impl Strategy<Value = (String, String)> {
    ("[a-z]{1,6}", "[a-z]{1,6}").prop_filter("contexts must differ", |(a, b)| a != b)
}

proptest! {
    #[test]
    fn disabled_logging_writes_nothing(level in level(), context in "[a-z]{1,8}") {
        let (apex, sink) = setup();
        apex.set_enabled(false);

        apex.log(level, vec![Arg::from("top")]);
        apex.create_logger(context).log(level, vec![Arg::from("ctx")]);

        prop_assert!(sink.is_empty());
    }

    #[test]
    fn level_filter_matches_exactly((kept, dropped) in distinct_levels()) {
        let (apex, sink) = setup();
        apex.set_filters(FilterPatch::new().level(kept));

        apex.log(dropped, vec![Arg::from("dropped")]);
        prop_assert_eq!(sink.records().len(), 0);

        apex.log(kept, vec![Arg::from("kept")]);
        let records = sink.records();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].level, kept);
    }

    #[test]
    fn context_filter_only_gates_context_loggers(
        (wanted, other) in distinct_contexts(),
        level in level(),
    ) {
        let (apex, sink) = setup();
        apex.set_filters(FilterPatch::new().context(wanted.clone()));

        apex.create_logger(other).log(level, vec![Arg::from("dropped")]);
        prop_assert!(sink.is_empty());

        apex.create_logger(wanted.clone()).log(level, vec![Arg::from("kept")]);
        prop_assert_eq!(sink.records().len(), 1);

        // top-level entry points ignore the context filter
        apex.log(level, vec![Arg::from("top")]);
        prop_assert_eq!(sink.records().len(), 2);
    }
}

#[test]
fn top_level_entry_points_bypass_context_filter() {
    let (apex, sink) = setup();
    apex.set_filters(FilterPatch::new().context("billing"));

    apex.info(vec![Arg::from("i")]);
    apex.warn(vec![Arg::from("w")]);
    apex.error(vec![Arg::from("e")]);
    apex.debug(vec![Arg::from("d")]);
    apex.create_logger("search").info(vec![Arg::from("dropped")]);

    let levels = sink.records().into_iter().map(|r| r.level).collect::<Vec<_>>();
    assert_eq!(levels, Level::ALL.to_vec());
}

#[test]
fn set_filters_merges_and_set_config_replaces() {
    let (apex, _) = setup();

    apex.set_filters(FilterPatch::new().context("X"));
    apex.set_filters(FilterPatch::new().level(Level::Warn));
    assert_eq!(
        apex.config().filters,
        FilterSpec {
            level: Some(Level::Warn),
            context: Some("X".into()),
        }
    );

    apex.set_config(ConfigPatch::new().filters(FilterSpec::level(Level::Warn)));
    assert_eq!(apex.config().filters.context, None);
    assert_eq!(apex.config().filters.level, Some(Level::Warn));
}

#[test]
fn json_mode_formats_only_structured_values() {
    #[derive(Serialize)]
    struct Order {
        id: u32,
        items: Vec<&'static str>,
    }

    let (apex, sink) = setup();
    apex.set_config(ConfigPatch::new().format_objects_as_json(true));

    let order = Order {
        id: 12,
        items: vec!["tea"],
    };
    log_info!(apex, "created", Arg::structured(&order), 5);

    let args = sink.records().remove(0).args;
    assert_eq!(args.len(), 3);
    assert_eq!(args[0], Arg::from("created"));
    assert_eq!(
        args[1].as_str(),
        Some("{\n  \"id\": 12,\n  \"items\": [\n    \"tea\"\n  ]\n}")
    );
    assert_eq!(args[2], Arg::Int(5));
}

#[test]
fn json_mode_off_keeps_structured_values() {
    let (apex, sink) = setup();
    log_info!(apex, json!({ "a": 1 }));
    assert_eq!(sink.records()[0].args, vec![Arg::Structured(json!({ "a": 1 }))]);
    assert_eq!(sink.records()[0].payload(), r#"{"a":1}"#);
}

#[test]
fn context_logger_prefixes_tag() {
    let (apex, sink) = setup();
    apex.create_logger("X").info(vec![Arg::from("a")]);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].args, vec![Arg::from("[X]"), Arg::from("a")]);
    assert!(records[0].message().contains("[INFO]"));
}

#[test]
fn default_configuration() {
    let (apex, _) = setup();
    let config = apex.config();
    assert_eq!(config, Config::default());
    assert!(config.logging_enabled);
    assert_eq!(config.theme, Theme::Dark);
    assert!(!config.format_objects_as_json);
    assert_eq!(config.filters.level, None);
    assert_eq!(config.filters.context, None);
}

#[test]
fn unserializable_argument_does_not_poison_the_logger() {
    use std::collections::BTreeMap;

    let (apex, sink) = setup();
    apex.set_config(ConfigPatch::new().format_objects_as_json(true));

    let mut bad = BTreeMap::new();
    bad.insert((1, 2), "tuple keys are not json");
    apex.error(vec![Arg::from("before"), Arg::structured(&bad)]);
    apex.info(vec![Arg::from("after")]);

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert!(matches!(records[0].args[1], Arg::Unserializable(_)));
    assert!(records[0].payload().starts_with("before <unserializable: "));
    assert_eq!(records[1].args, vec![Arg::from("after")]);
    assert!(apex.config().format_objects_as_json);
}
