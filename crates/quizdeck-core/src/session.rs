//! The presentation session: the one object a shell owns per live show.
//!
//! The session composes the deck, the countdown engine and the playback
//! coordinator. The components never call each other; the session is the
//! only place where a countdown transition turns into a playback command
//! (timer loop starts with the countdown, stops when it finishes).

use chrono::Utc;

use crate::countdown::{now_ms, CountdownEngine};
use crate::deck::{location_of, resolve, DeckItem, DeckLocation};
use crate::events::Event;
use crate::pack::{Pack, Question};
use crate::playback::{ChannelKind, PlayToken, PlaybackCoordinator};

/// Session-level options supplied by the shell.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// URL of the looping "thinking time" track, if the presenter uses one.
    pub timer_loop_url: Option<String>,
    /// Shared playback volume, `0.0..=1.0`.
    pub volume: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timer_loop_url: None,
            volume: 1.0,
        }
    }
}

/// Result of starting the current question: the events raised plus the
/// play tokens the shell settles once the platform reports each outcome.
#[derive(Debug)]
pub struct QuestionStarted {
    pub events: Vec<Event>,
    pub clip_play: Option<PlayToken>,
    pub timer_play: Option<PlayToken>,
}

/// One live show.
///
/// Created when the presenter opens a pack, discarded when they leave;
/// nothing in here is global.
pub struct PresentationSession {
    pack: Pack,
    deck: Vec<DeckItem>,
    index: usize,
    countdown: CountdownEngine,
    playback: PlaybackCoordinator,
    options: SessionOptions,
}

impl PresentationSession {
    pub fn new(pack: Pack, options: SessionOptions) -> Self {
        let deck = pack.deck();
        let mut playback = PlaybackCoordinator::new();
        playback.set_volume(options.volume);
        let mut session = Self {
            pack,
            deck,
            index: 0,
            countdown: CountdownEngine::new(),
            playback,
            options,
        };
        session.prime_current();
        session
    }

    /// Open a session at a previously saved position.
    ///
    /// A missing, malformed or no-longer-resolvable key falls back to the
    /// start of the deck.
    pub fn resume(pack: Pack, options: SessionOptions, saved_key: Option<&str>) -> Self {
        let mut session = Self::new(pack, options);
        if let Some(location) = DeckLocation::deserialize(saved_key) {
            if let Some(index) = resolve(&session.deck, &location) {
                session.index = index;
                session.prime_current();
            }
        }
        session
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn pack(&self) -> &Pack {
        &self.pack
    }

    pub fn deck(&self) -> &[DeckItem] {
        &self.deck
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&DeckItem> {
        self.deck.get(self.index)
    }

    /// Serialized position of the current item, the artifact a shell
    /// persists so a reloaded presentation resumes where it left off.
    pub fn location_key(&self) -> Option<String> {
        self.current().map(|item| location_of(item).serialize())
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.playback
    }

    /// The shell binds media elements and settles play outcomes through
    /// this; everything else goes through the session's own operations.
    pub fn playback_mut(&mut self) -> &mut PlaybackCoordinator {
        &mut self.playback
    }

    /// Build a full session snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::SessionSnapshot {
            index: self.index,
            location: self.location_key(),
            kind: self.current().map(|item| item.kind().as_str().to_string()),
            countdown: self.countdown.status(),
            remaining_ms: self.countdown.remaining_ms(),
            duration_ms: self.countdown.duration_ms(),
            clip: self.playback.status(ChannelKind::Clip),
            timer: self.playback.status(ChannelKind::Timer),
            at: Utc::now(),
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn next(&mut self) -> Option<Event> {
        if self.index + 1 >= self.deck.len() {
            return None;
        }
        self.move_to(self.index + 1)
    }

    pub fn prev(&mut self) -> Option<Event> {
        if self.index == 0 {
            return None;
        }
        self.move_to(self.index - 1)
    }

    /// Jump straight to a location; `None` when it does not resolve.
    pub fn jump(&mut self, location: &DeckLocation) -> Option<Event> {
        let index = resolve(&self.deck, location)?;
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> Option<Event> {
        self.index = index;
        self.playback.stop_all();
        self.countdown.stop();
        self.prime_current();
        Some(Event::SlideChanged {
            index,
            location: self.location_key().unwrap_or_default(),
            at: Utc::now(),
        })
    }

    /// Show the current item's thinking time without running. Round
    /// markers prime a zero duration.
    fn prime_current(&mut self) {
        let duration_ms = self
            .current_question()
            .map(|question| question.duration_ms())
            .unwrap_or(0);
        self.countdown.prime(duration_ms);
    }

    fn current_question(&self) -> Option<&Question> {
        match self.current()? {
            DeckItem::Question { question_id, .. } => self.pack.question(question_id),
            DeckItem::Round { .. } => None,
        }
    }

    // ── Question control ─────────────────────────────────────────────

    /// Start the current question: run the countdown, play the question's
    /// clip on the clip channel (audio/video questions) and the looping
    /// thinking-time track on the timer channel.
    ///
    /// No-op on a round marker or a zero-duration question.
    pub fn begin_question(&mut self) -> QuestionStarted {
        self.begin_question_at(now_ms())
    }

    /// Timestamp-explicit variant of [`PresentationSession::begin_question`].
    pub fn begin_question_at(&mut self, now_ms: u64) -> QuestionStarted {
        let mut started = QuestionStarted {
            events: Vec::new(),
            clip_play: None,
            timer_play: None,
        };
        let Some(question) = self.current_question() else {
            return started;
        };
        let duration_ms = question.duration_ms();
        let clip_url = question
            .media_url()
            .filter(|_| question.kind().is_playable())
            .map(str::to_string);

        let Some(event) = self.countdown.start_at(duration_ms, now_ms) else {
            return started;
        };
        started.events.push(event);
        started.clip_play = self.playback.play(ChannelKind::Clip, clip_url.as_deref(), false);
        let timer_url = self.options.timer_loop_url.clone();
        started.timer_play = self
            .playback
            .play(ChannelKind::Timer, timer_url.as_deref(), true);
        started
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.countdown.pause()
    }

    /// Timestamp-explicit variant of [`PresentationSession::pause`].
    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        self.countdown.pause_at(now_ms)
    }

    pub fn resume_countdown(&mut self) -> Option<Event> {
        self.countdown.resume()
    }

    /// Timestamp-explicit variant of [`PresentationSession::resume_countdown`].
    pub fn resume_countdown_at(&mut self, now_ms: u64) -> Option<Event> {
        self.countdown.resume_at(now_ms)
    }

    /// Stop the countdown and both playback channels.
    pub fn stop(&mut self) -> Vec<Event> {
        let mut events = self.playback.stop_all();
        if let Some(event) = self.countdown.stop() {
            events.push(event);
        }
        events
    }

    /// Periodic driver, called by the shell roughly every 250ms.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(now_ms())
    }

    /// Timestamp-explicit variant of [`PresentationSession::tick`].
    ///
    /// When the countdown finishes, the looping timer track is stopped.
    pub fn tick_at(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(event) = self.countdown.tick_at(now_ms) {
            events.push(event);
            if let Some(stopped) = self.playback.stop(ChannelKind::Timer) {
                events.push(stopped);
            }
        }
        events
    }

    /// Tear the session down: countdown stopped, channels stopped and
    /// detached. Safe to call more than once.
    pub fn close(&mut self) {
        self.countdown.stop();
        self.playback.dispose();
    }
}
