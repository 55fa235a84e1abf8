mod apex;
mod caller;
mod config;
mod context;
mod filter;
mod formatter;
mod logger;
#[macro_use]
mod macros;
mod record;
mod sink;
mod style;
mod types;
mod watch;

pub use apex::{Apex, ApexBuilder};
pub use caller::{frame_label, label_at_depth, location_label, CallerMode, UNKNOWN_CALLER};
pub use config::{Config, ConfigPatch, ConfigStore, FilterPatch, FilterSpec};
pub use context::ContextLogger;
pub use filter::ApexFilter;
pub use formatter::{ApexFormatter, LogTime};
pub use logger::init_logger;
pub use record::LogRecord;
pub use sink::{ConsoleSink, LogSink, MemorySink, SinkEvent, TracingSink};
pub use style::{resolve_style, StyleDescriptor};
pub use types::{ApexError, ApexResult, Arg, Level, Theme, ToArgs};
pub use watch::{Subscribe, WatchCallback, WATCH_TAG};

use filter::APEX_TARGET;
use formatter::colorful_logs;
