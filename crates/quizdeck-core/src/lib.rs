//! # Quizdeck Core Library
//!
//! This library provides the live presentation runtime for Quizdeck: the
//! logic that drives a quiz pack in front of an audience. Authoring,
//! accounts and media upload live elsewhere; this crate only consumes
//! read-only pack content and keeps a running show correct across pauses,
//! throttled timers and flaky media playback.
//!
//! ## Architecture
//!
//! - **Deck**: addressing into the ordered sequence of round markers and
//!   questions, serialized as a compact resumable key
//! - **Countdown**: a wall-clock-anchored state machine that requires the
//!   caller to periodically invoke `tick()` for progress updates
//! - **Playback**: two independent best-effort channels (`clip`, `timer`)
//!   bound to media elements the rendering layer owns
//! - **Session**: the shell-facing object composing the three; components
//!   never call each other directly
//! - **Storage**: TOML-based configuration and SQLite-backed presenter state
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: per-question countdown state machine
//! - [`PlaybackCoordinator`]: two-channel media coordination
//! - [`PresentationSession`]: one live show, owned by the shell
//! - [`Config`]: presenter configuration management

pub mod countdown;
pub mod deck;
pub mod error;
pub mod events;
pub mod pack;
pub mod playback;
pub mod session;
pub mod storage;

pub use countdown::{CountdownEngine, CountdownStatus};
pub use deck::{location_of, resolve, DeckItem, DeckLocation, ItemKind, QuestionKind};
pub use error::{ConfigError, CoreError, PackError, PlaybackError, StoreError};
pub use events::Event;
pub use pack::{Media, Pack, Question, Round};
pub use playback::{ChannelKind, ChannelStatus, MediaElement, PlayToken, PlaybackCoordinator};
pub use session::{PresentationSession, QuestionStarted, SessionOptions};
pub use storage::{Config, StateStore};
