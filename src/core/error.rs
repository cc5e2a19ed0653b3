use thiserror::Error;

use crate::core::time::{TimeInterval, TimeOfDay};

#[derive(Error, Debug)]
pub enum ActorError {
    #[error("State component not found: {kind}")]
    StateNotFound { kind: &'static str },

    #[error("Feature category '{0}' has no members to sample from")]
    EmptyCategory(String),

    #[error("Feature category '{0}' was not partitioned")]
    UnknownCategory(String),

    #[error("Invalid time of day: {hour}:{minute:02}")]
    InvalidTime { hour: u8, minute: u8 },

    #[error("Interval must start before it ends: {start}-{end}")]
    InvertedInterval { start: TimeOfDay, end: TimeOfDay },

    #[error("Shift {new} overlaps existing shift {existing}")]
    OverlappingShift {
        existing: TimeInterval,
        new: TimeInterval,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ActorError>;
