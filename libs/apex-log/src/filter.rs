use super::*;
use tracing::{subscriber::Interest, Level as TracingLevel, Metadata};
use tracing_subscriber::layer::{Context, Filter};

/// Target of everything forwarded by [`TracingSink`].
pub(crate) const APEX_TARGET: &str = "apex";

/// Applies the enable flag and the exact-match level filter of a [`Config`]
/// to `tracing` events.
///
/// Events under the `apex` target always pass: the [`Apex`] handle gated
/// them against its live configuration before forwarding.
pub struct ApexFilter {
    enabled: bool,
    level: Option<Level>,
}

const EXCLUDE_PREFIX: [&str; 3] = ["hyper::", "rustls::", "mio::"];

impl ApexFilter {
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.logging_enabled,
            level: config.filters.level,
        }
    }

    fn is_enabled(&self, metadata: &Metadata<'_>) -> bool {
        if metadata.target() == APEX_TARGET {
            return true;
        }

        let is_noisy = EXCLUDE_PREFIX
            .iter()
            .any(|prefix| metadata.target().starts_with(prefix))
            && *metadata.level() > TracingLevel::INFO;

        if !self.enabled || is_noisy {
            return false;
        }
        // spans carry grouping only
        if metadata.is_span() {
            return true;
        }
        self.level
            .map_or(true, |level| level == formatter::level_of(metadata.level()))
    }
}

impl<S> Filter<S> for ApexFilter {
    fn enabled(&self, metadata: &Metadata<'_>, _: &Context<'_, S>) -> bool {
        self.is_enabled(metadata)
    }

    fn callsite_enabled(&self, metadata: &'static Metadata<'static>) -> Interest {
        if self.is_enabled(metadata) {
            Interest::always()
        } else {
            Interest::never()
        }
    }
}
