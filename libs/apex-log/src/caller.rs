use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    backtrace::{Backtrace, BacktraceStatus},
    panic::Location,
};

/// Label used when the call site cannot be determined.
pub const UNKNOWN_CALLER: &str = "unknown";

static FRAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/([^/]+):(\d+):\d+").expect("frame pattern is valid"));

/// How a record's `file:line` label is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerMode {
    /// Use the location captured by `#[track_caller]` at the public entry
    /// point. Independent of how many internal layers sit in between.
    #[default]
    Location,
    /// Capture a backtrace and take the frame at `depth`, counted from the
    /// frame that captures it. Needs debug info; wrappers shift the depth.
    StackWalk { depth: usize },
}

impl CallerMode {
    #[inline(never)]
    pub fn resolve(&self, location: &Location<'_>) -> String {
        match *self {
            CallerMode::Location => location_label(location),
            CallerMode::StackWalk { depth } => {
                let trace = Backtrace::force_capture();
                if trace.status() != BacktraceStatus::Captured {
                    return UNKNOWN_CALLER.to_owned();
                }
                label_at_depth(&trace.to_string(), depth)
            }
        }
    }
}

/// `file:line` for a compile-time captured location.
pub fn location_label(location: &Location<'_>) -> String {
    let path = location.file();
    let file = path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path);
    format!("{}:{}", file, location.line())
}

/// Extracts `file:line` from a frame of the form `.../<file>:<line>:<col>`.
pub fn frame_label(frame: &str) -> Option<String> {
    FRAME_PATTERN
        .captures(frame)
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
}

/// Splits a rendered backtrace into frames, keeping the source location of
/// each one when the trace has it.
fn frame_locations(trace: &str) -> Vec<Option<&str>> {
    let mut frames: Vec<Option<&str>> = Vec::new();
    for line in trace.lines() {
        let line = line.trim_start();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                if last.is_none() {
                    *last = Some(location);
                }
            }
        } else if line.split_once(':').map_or(false, |(index, _)| {
            !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())
        }) {
            frames.push(None);
        }
    }
    frames
}

/// Label of the frame at `depth` in a rendered backtrace, or
/// [`UNKNOWN_CALLER`] when the trace is too shallow or the frame carries no
/// usable location.
pub fn label_at_depth(trace: &str, depth: usize) -> String {
    frame_locations(trace)
        .get(depth)
        .copied()
        .flatten()
        .and_then(frame_label)
        .unwrap_or_else(|| UNKNOWN_CALLER.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "   0: apex_log::caller::CallerMode::resolve
             at ./libs/apex-log/src/caller.rs:33:29
   1: apex_log::apex::Apex::emit
             at ./libs/apex-log/src/apex.rs:120:22
   2: <unknown>
   3: demo::main
             at ./apps/apex-demo/src/main.rs:14:5
   4: core::ops::function::FnOnce::call_once
             at /rustc/abc/library/core/src/ops/function.rs:250:5";

    #[track_caller]
    fn here() -> &'static Location<'static> {
        Location::caller()
    }

    #[test]
    fn test_location_label() {
        let (location, line) = (here(), line!());
        assert_eq!(location_label(location), format!("caller.rs:{line}"));
        assert_eq!(CallerMode::Location.resolve(location), format!("caller.rs:{line}"));
    }

    #[test]
    fn test_frame_label() {
        assert_eq!(frame_label("at /home/me/app/src/main.rs:42:7").as_deref(), Some("main.rs:42"));
        assert_eq!(
            frame_label("http://localhost:3000/bundle.js:10:2").as_deref(),
            Some("bundle.js:10")
        );
        assert_eq!(frame_label("main.rs:42:7"), None);
        assert_eq!(frame_label("at /src/main.rs:42"), None);
    }

    #[test]
    fn test_label_at_depth() {
        assert_eq!(label_at_depth(TRACE, 0), "caller.rs:33");
        assert_eq!(label_at_depth(TRACE, 1), "apex.rs:120");
        assert_eq!(label_at_depth(TRACE, 3), "main.rs:14");
        assert_eq!(label_at_depth(TRACE, 4), "function.rs:250");
    }

    #[test]
    fn test_label_at_depth_degrades() {
        // frame without source location
        assert_eq!(label_at_depth(TRACE, 2), UNKNOWN_CALLER);
        // too shallow
        assert_eq!(label_at_depth(TRACE, 5), UNKNOWN_CALLER);
        assert_eq!(label_at_depth("", 0), UNKNOWN_CALLER);
        assert_eq!(label_at_depth("disabled backtrace", 0), UNKNOWN_CALLER);
    }

    #[test]
    fn test_stack_walk_out_of_range() {
        let mode = CallerMode::StackWalk { depth: 100_000 };
        assert_eq!(mode.resolve(here()), UNKNOWN_CALLER);
    }
}
