use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::CountdownStatus;
use crate::playback::{ChannelKind, ChannelStatus};

/// Every state change in the runtime produces an Event.
/// The shell renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The presenter moved to a different deck item.
    SlideChanged {
        index: usize,
        location: String,
        at: DateTime<Utc>,
    },
    /// A new thinking time was shown without starting the countdown.
    CountdownPrimed {
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownStarted {
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownResumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The countdown was reset to its full duration.
    CountdownStopped {
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownFinished {
        at: DateTime<Utc>,
    },
    /// A play call settled successfully.
    PlaybackStarted {
        channel: ChannelKind,
        url: String,
        at: DateTime<Utc>,
    },
    PlaybackStopped {
        channel: ChannelKind,
        at: DateTime<Utc>,
    },
    /// A play call settled with a reported failure; the channel is left
    /// stopped and consistent, ready for an explicit retry.
    PlaybackFailed {
        channel: ChannelKind,
        reason: String,
        at: DateTime<Utc>,
    },
    /// Full countdown state, emitted on demand.
    CountdownSnapshot {
        status: CountdownStatus,
        remaining_ms: u64,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    /// Full session state, emitted on demand.
    SessionSnapshot {
        index: usize,
        location: Option<String>,
        kind: Option<String>,
        countdown: CountdownStatus,
        remaining_ms: u64,
        duration_ms: u64,
        clip: ChannelStatus,
        timer: ChannelStatus,
        at: DateTime<Utc>,
    },
}
