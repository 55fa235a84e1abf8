/// Log at an explicit level through an [`Apex`](crate::Apex) or a
/// [`ContextLogger`](crate::ContextLogger).
///
/// ```ignore
/// log_at!(apex, Level::Warn, "queue depth", depth);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, vec![$($crate::Arg::from($arg)),*])
    };
}

/// ```ignore
/// log_info!(apex, "user", Arg::structured(&user));
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info(vec![$($crate::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn(vec![$($crate::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error(vec![$($crate::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug(vec![$($crate::Arg::from($arg)),*])
    };
}
