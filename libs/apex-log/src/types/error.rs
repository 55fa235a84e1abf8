use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApexError {
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("failed to serialize log argument")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to install the global subscriber")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),
}

pub type ApexResult<T, E = ApexError> = Result<T, E>;
