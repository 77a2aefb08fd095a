//! Two best-effort playback channels bound to externally owned media
//! elements.
//!
//! The coordinator never constructs or destroys an element; the rendering
//! layer hands one over when it mounts and takes it back when it unmounts.
//! Every operation tolerates an unbound channel.

mod coordinator;
mod element;

pub use coordinator::{ChannelKind, ChannelStatus, PlayToken, PlaybackCoordinator};
pub use element::MediaElement;
