use thiserror::Error;

/// Errors that can be raised while parsing or validating a navigation table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("malformed table row {line:?}: {reason}")]
    MalformedRow { line: String, reason: String },

    #[error("invalid starting row level {level} for {path:?}: a table must start with level 1")]
    InvalidStartLevel { path: String, level: i64 },

    #[error("invalid row level {level} for {path:?}: zero or negative level values are invalid")]
    NonPositiveLevel { path: String, level: i64 },

    #[error(
        "invalid row level sequence at {path:?}: level jumped from {previous} to {level}, \
         jumps of more than 1 are invalid"
    )]
    LevelJump {
        path: String,
        previous: u32,
        level: u32,
    },
}
