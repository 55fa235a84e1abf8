use super::*;
use std::io::{stderr, stdout};
use tracing::Level as TracingLevel;
use tracing_subscriber::{fmt::writer::MakeWriterExt, prelude::*};

/// Installs a global `tracing` subscriber rendering events in the Apex
/// layout, themed and filtered by `config`. Warnings and errors go to
/// stderr, everything else to stdout.
///
/// Pair it with [`TracingSink`] to route an [`Apex`] logger through the
/// same pipeline. Fails if a global subscriber is already set.
pub fn init_logger(config: &Config) -> ApexResult<()> {
    let writer = stderr.with_max_level(TracingLevel::WARN).or_else(stdout);
    let colorful = colorful_logs();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(colorful)
                .event_format(ApexFormatter::new(config.theme.clone(), colorful))
                .with_filter(ApexFilter::new(config)),
        )
        .try_init()?;

    Ok(())
}
