//! Two-channel playback coordination.
//!
//! Each channel holds a weak, replaceable reference to an element the
//! rendering layer owns. Play calls settle asynchronously; a per-call
//! generation counter makes sure a settle that arrives after a newer
//! `play`/`stop` cannot resurrect playback the presenter already stopped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::events::Event;

use super::element::MediaElement;

/// The two independent output channels of a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Foreground playback of a question's media clip.
    Clip,
    /// Looping "thinking time" track accompanying the countdown.
    Timer,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Clip => "clip",
            ChannelKind::Timer => "timer",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel playback status as the coordinator last observed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Stopped,
    /// A play call was issued and its outcome has not settled yet.
    Pending,
    Playing,
}

/// Handle identifying one play call, echoed back on settle so stale
/// completions can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayToken {
    channel: ChannelKind,
    generation: u64,
}

impl PlayToken {
    pub fn channel(&self) -> ChannelKind {
        self.channel
    }
}

#[derive(Debug)]
struct Channel {
    element: Option<Weak<RefCell<dyn MediaElement>>>,
    source: Option<String>,
    looping: bool,
    status: ChannelStatus,
    /// Bumped on every play and stop; a settle for an older call is stale.
    generation: u64,
}

impl Channel {
    fn new() -> Self {
        Self {
            element: None,
            source: None,
            looping: false,
            status: ChannelStatus::Stopped,
            generation: 0,
        }
    }

    /// Live element, if one is bound and the rendering layer still owns it.
    fn element(&self) -> Option<Rc<RefCell<dyn MediaElement>>> {
        self.element.as_ref().and_then(Weak::upgrade)
    }
}

/// Coordinates the `clip` and `timer` channels for one presentation
/// session.
#[derive(Debug)]
pub struct PlaybackCoordinator {
    clip: Channel,
    timer: Channel,
    /// Shared volume level, `0.0..=1.0`, applied to both channels.
    volume: f64,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self {
            clip: Channel::new(),
            timer: Channel::new(),
            volume: 1.0,
        }
    }

    fn channel(&self, kind: ChannelKind) -> &Channel {
        match kind {
            ChannelKind::Clip => &self.clip,
            ChannelKind::Timer => &self.timer,
        }
    }

    fn channel_mut(&mut self, kind: ChannelKind) -> &mut Channel {
        match kind {
            ChannelKind::Clip => &mut self.clip,
            ChannelKind::Timer => &mut self.timer,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self, channel: ChannelKind) -> ChannelStatus {
        self.channel(channel).status
    }

    pub fn source(&self, channel: ChannelKind) -> Option<&str> {
        self.channel(channel).source.as_deref()
    }

    pub fn is_looping(&self, channel: ChannelKind) -> bool {
        self.channel(channel).looping
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    // ── Binding ──────────────────────────────────────────────────────

    /// Attach (or clear) the element for a channel.
    ///
    /// The current shared volume is applied immediately on attach. Binding
    /// never implies ownership; the element outlives any binding and may be
    /// replaced at any time as the rendering layer mounts and unmounts.
    pub fn bind(&mut self, channel: ChannelKind, element: Option<Weak<RefCell<dyn MediaElement>>>) {
        let volume = self.volume;
        let ch = self.channel_mut(channel);
        ch.element = element;
        if let Some(el) = ch.element() {
            el.borrow_mut().set_volume(volume);
        }
    }

    /// Clamp to `0.0..=1.0` and apply to both bound elements immediately.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        for kind in [ChannelKind::Clip, ChannelKind::Timer] {
            if let Some(el) = self.channel(kind).element() {
                el.borrow_mut().set_volume(self.volume);
            }
        }
    }

    // ── Playback ─────────────────────────────────────────────────────

    /// Load `url` into the channel and begin playback.
    ///
    /// No-op (returns `None`) when `url` is empty or absent, or when the
    /// channel has no live element. The source is only rewritten when it
    /// differs from what the element already holds; the rewind to the start
    /// is best-effort. The returned token must be echoed back through
    /// [`PlaybackCoordinator::settle_play`] once the platform reports the
    /// outcome.
    pub fn play(
        &mut self,
        channel: ChannelKind,
        url: Option<&str>,
        looping: bool,
    ) -> Option<PlayToken> {
        let url = match url {
            Some(u) if !u.is_empty() => u,
            _ => return None,
        };
        let ch = self.channel_mut(channel);
        let el = ch.element()?;
        {
            let mut el = el.borrow_mut();
            if el.source().as_deref() != Some(url) {
                el.set_source(url);
            }
            el.set_looping(looping);
            // Seek failures (source not ready yet) are silently ignored.
            let _ = el.seek_to_start();
            el.begin_play();
        }
        ch.source = Some(url.to_string());
        ch.looping = looping;
        ch.status = ChannelStatus::Pending;
        ch.generation += 1;
        Some(PlayToken {
            channel,
            generation: ch.generation,
        })
    }

    /// Report the asynchronous outcome of a play call.
    ///
    /// A settle carrying a stale token is discarded; a stale *success* is
    /// additionally paused again, so a stop issued while the play was
    /// pending wins. A current-generation failure leaves source and loop
    /// flag in place with the channel stopped, so an explicit retry is an
    /// ordinary `play` of the same URL.
    pub fn settle_play(
        &mut self,
        token: PlayToken,
        result: Result<(), PlaybackError>,
    ) -> Option<Event> {
        let ch = self.channel_mut(token.channel);
        if token.generation != ch.generation {
            if result.is_ok() && ch.status == ChannelStatus::Stopped {
                if let Some(el) = ch.element() {
                    el.borrow_mut().pause();
                }
            }
            return None;
        }
        match result {
            Ok(()) => {
                ch.status = ChannelStatus::Playing;
                Some(Event::PlaybackStarted {
                    channel: token.channel,
                    url: ch.source.clone().unwrap_or_default(),
                    at: Utc::now(),
                })
            }
            Err(error) => {
                ch.status = ChannelStatus::Stopped;
                Some(Event::PlaybackFailed {
                    channel: token.channel,
                    reason: error.to_string(),
                    at: Utc::now(),
                })
            }
        }
    }

    /// Pause the channel's element and rewind to the start (best-effort).
    /// No-op when the channel is unbound and already stopped.
    pub fn stop(&mut self, channel: ChannelKind) -> Option<Event> {
        let ch = self.channel_mut(channel);
        ch.generation += 1;
        let was = ch.status;
        ch.status = ChannelStatus::Stopped;
        if let Some(el) = ch.element() {
            let mut el = el.borrow_mut();
            el.pause();
            let _ = el.seek_to_start();
        }
        if was == ChannelStatus::Stopped {
            None
        } else {
            Some(Event::PlaybackStopped {
                channel,
                at: Utc::now(),
            })
        }
    }

    /// Stop both channels.
    pub fn stop_all(&mut self) -> Vec<Event> {
        [ChannelKind::Clip, ChannelKind::Timer]
            .into_iter()
            .filter_map(|kind| self.stop(kind))
            .collect()
    }

    /// Stop both channels and detach.
    ///
    /// The timer channel's source reference is released; the clip element
    /// is only unbound, never touched further, since the shell owns its
    /// lifecycle. Safe to call repeatedly and after a pending play.
    pub fn dispose(&mut self) {
        self.stop_all();
        self.timer.source = None;
        self.timer.element = None;
        self.clip.element = None;
    }
}

impl Default for PlaybackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
