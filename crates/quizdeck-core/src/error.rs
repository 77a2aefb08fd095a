//! Core error types for quizdeck-core.
//!
//! This module defines the error hierarchy using thiserror. Playback
//! failures are the only errors a running show is expected to see; they are
//! recoverable and never fatal to the session.

use std::path::PathBuf;
use thiserror::Error;

use crate::playback::ChannelKind;

/// Core error type for quizdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Pack content errors
    #[error("Pack error: {0}")]
    Pack(#[from] PackError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Presenter state store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Playback start failures
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading read-only pack content.
#[derive(Error, Debug)]
pub enum PackError {
    /// Pack document could not be read
    #[error("Failed to read pack at {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// Pack document is not valid JSON for the pack schema
    #[error("Failed to parse pack: {0}")]
    ParseFailed(String),

    /// A question's media asset URL does not parse
    #[error("Invalid media URL '{url}' on question '{question_id}': {message}")]
    InvalidMediaUrl {
        question_id: String,
        url: String,
        message: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Presenter state store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be determined or created
    #[error("Failed to locate data directory: {0}")]
    DataDir(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Store is locked by another process
    #[error("Store is locked")]
    Locked,
}

/// A reported playback start failure.
///
/// Seek-before-ready is deliberately absent here: failed seeks are silently
/// ignored by the coordinator, while the failures below are surfaced to the
/// shell so the presenter can retry or move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The platform refused to start playback (autoplay policy)
    #[error("Autoplay rejected on {channel} channel: {reason}")]
    AutoplayRejected { channel: ChannelKind, reason: String },

    /// The media source could not be decoded
    #[error("Decode failed on {channel} channel: {reason}")]
    DecodeFailed { channel: ChannelKind, reason: String },

    /// The media source could not be fetched
    #[error("Network failure fetching media on {channel} channel: {reason}")]
    FetchFailed { channel: ChannelKind, reason: String },
}

impl PlaybackError {
    /// The channel the failed play call targeted.
    pub fn channel(&self) -> ChannelKind {
        match self {
            PlaybackError::AutoplayRejected { channel, .. } => *channel,
            PlaybackError::DecodeFailed { channel, .. } => *channel,
            PlaybackError::FetchFailed { channel, .. } => *channel,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
