use std::{cell::RefCell, rc::Rc};

use apex_log::{
    init_logger, log_debug, log_info, log_warn, Apex, Arg, Config, ConfigPatch, ConsoleSink,
    FilterPatch, Level, TracingSink, WatchCallback,
};
use clap::Parser;
use serde::Serialize;

/// apex-log playground
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Color theme (dark or light), overrides APEX_LOG_THEME
    #[arg(short, long)]
    theme: Option<String>,

    /// Pretty-print structured arguments as json
    #[arg(short, long)]
    json: bool,

    /// Only emit records of this level
    #[arg(short, long)]
    level: Option<String>,

    /// Only emit context loggers with this context
    #[arg(short, long)]
    context: Option<String>,

    /// Route records through the global tracing subscriber
    #[arg(long)]
    tracing: bool,
}

#[derive(Serialize)]
struct Order {
    id: u32,
    items: Vec<&'static str>,
    paid: bool,
}

type Watcher = WatchCallback<(i64, i64), ()>;

/// Tiny reactive counter to demonstrate watch instrumentation.
#[derive(Default)]
struct Counter {
    value: RefCell<i64>,
    watchers: RefCell<Vec<Watcher>>,
}

impl Counter {
    fn watch(&self, _source: Watcher, callback: Watcher) -> usize {
        let mut watchers = self.watchers.borrow_mut();
        watchers.push(callback);
        watchers.len()
    }

    fn increment(&self) {
        let old = *self.value.borrow();
        let new = old + 1;
        self.value.replace(new);
        for watcher in self.watchers.borrow_mut().iter_mut() {
            watcher((new, old));
        }
    }
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(theme) = &args.theme {
        config.theme = theme.as_str().into();
    }
    if args.json {
        config.format_objects_as_json = true;
    }
    if let Some(level) = &args.level {
        config.filters.level = Some(level.parse()?);
    }
    if let Some(context) = &args.context {
        config.filters.context = Some(context.clone());
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    let apex = if args.tracing {
        init_logger(&config)?;
        Apex::builder().config(config).sink(TracingSink::new()).build()
    } else {
        Apex::builder().config(config).sink(ConsoleSink::new()).build()
    };

    log_info!(apex, "apex-demo started", format!("theme={}", apex.config().theme));
    log_debug!(apex, "levels", Level::ALL.len());

    let order = Order {
        id: 42,
        items: vec!["tea", "scone"],
        paid: false,
    };
    apex.info(vec![Arg::from("order received"), Arg::structured(&order)]);

    let billing = apex.create_logger("billing");
    let search = apex.create_logger("search");

    apex.group("checkout");
    apex.time("checkout");
    billing.info(vec![Arg::from("charging order"), Arg::from(order.id)]);
    search.debug(vec![Arg::from("reindexing"), Arg::from(order.items.len())]);
    billing.warn(vec![Arg::from("card expires soon")]);
    apex.time_end("checkout");
    apex.group_end();

    let counter = Rc::new(Counter::default());
    let watcher = counter.clone();
    let subscription = apex.auto_log_watch(
        move |source: Watcher, callback: Watcher, _: ()| watcher.watch(source, callback),
        |(new, old): (i64, i64)| {
            if new - old != 1 {
                eprintln!("counter skipped from {old} to {new}");
            }
        },
        (),
    );
    log_debug!(apex, "watchers registered", subscription);
    for _ in 0..3 {
        counter.increment();
    }

    apex.set_filters(FilterPatch::new().level(Level::Error));
    log_warn!(apex, "suppressed by level filter");
    apex.error(vec![Arg::from("only errors pass now"), Arg::from(None::<i32>)]);

    apex.set_config(ConfigPatch::new().logging_enabled(false));
    log_info!(apex, "never printed");

    Ok(())
}
