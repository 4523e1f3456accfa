use thiserror::Error;

/// Fatal configuration problems detected at startup.
///
/// Every variant means the process refuses to run rather than guess.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown IANA timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid sendTimeLocal {0:?} (expected HH:MM, 24h)")]
    InvalidSendTime(String),

    #[error("Invalid anchorDate {0:?} (expected YYYY-MM-DD)")]
    InvalidAnchorDate(String),

    #[error("Expected exactly 4 labels, found {0}")]
    LabelCount(usize),

    #[error("Invalid schedule: {0}")]
    Schedule(String),
}
