//! Countdown engine implementation.
//!
//! The countdown is a wall-clock-anchored state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically (~250ms works well). Remaining time is always recomputed
//! from absolute timestamps, so late or irregular ticks (a backgrounded tab
//! throttling its timers for seconds at a stretch) cannot skew the clock.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//! Running --(remaining hits 0)--> Finished
//! Running | Paused | Finished --stop--> Idle
//! ```
//!
//! Invalid calls (`pause()` while idle, `resume()` while running) are silent
//! no-ops, so the shell never has to guard its own event handlers.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Wall-clock countdown for a single question.
///
/// Elapsed time is `elapsed_before_pause + (now - run_started_at)`; nothing
/// ever decrements a counter per tick. Every time-sensitive command has a
/// timestamp-explicit `*_at` variant taking milliseconds since the epoch;
/// the plain variants anchor to the system clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    status: CountdownStatus,
    duration_ms: u64,
    /// Remaining time at the last recompute, kept in `0..=duration_ms`.
    remaining_ms: u64,
    /// Run time accumulated across previous pause cycles.
    #[serde(default)]
    elapsed_before_pause_ms: u64,
    /// Timestamp (ms since epoch) of the most recent start or resume.
    /// `None` unless the countdown is running.
    #[serde(default)]
    run_started_at_ms: Option<u64>,
}

impl CountdownEngine {
    /// Starts idle with a zero duration; `prime` it when a question shows.
    pub fn new() -> Self {
        Self {
            status: CountdownStatus::Idle,
            duration_ms: 0,
            remaining_ms: 0,
            elapsed_before_pause_ms: 0,
            run_started_at_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> CountdownStatus {
        self.status
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.remaining_ms)
    }

    /// 0.0 .. 1.0 progress through the current duration.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / self.duration_ms as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::CountdownSnapshot {
            status: self.status,
            remaining_ms: self.remaining_ms,
            duration_ms: self.duration_ms,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Show a new duration without running: back to idle, remaining at the
    /// full duration, anchors cleared. Valid for any duration, including 0.
    pub fn prime(&mut self, duration_ms: u64) -> Option<Event> {
        self.status = CountdownStatus::Idle;
        self.duration_ms = duration_ms;
        self.remaining_ms = duration_ms;
        self.elapsed_before_pause_ms = 0;
        self.run_started_at_ms = None;
        Some(Event::CountdownPrimed {
            duration_ms,
            at: Utc::now(),
        })
    }

    pub fn start(&mut self, duration_ms: u64) -> Option<Event> {
        self.start_at(duration_ms, now_ms())
    }

    /// Timestamp-explicit variant of [`CountdownEngine::start`].
    ///
    /// No-op for a zero duration; otherwise resets the anchors and runs,
    /// whatever the previous status was.
    pub fn start_at(&mut self, duration_ms: u64, now_ms: u64) -> Option<Event> {
        if duration_ms == 0 {
            return None;
        }
        self.status = CountdownStatus::Running;
        self.duration_ms = duration_ms;
        self.remaining_ms = duration_ms;
        self.elapsed_before_pause_ms = 0;
        self.run_started_at_ms = Some(now_ms);
        Some(Event::CountdownStarted {
            duration_ms,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// Timestamp-explicit variant of [`CountdownEngine::pause`].
    ///
    /// Folds the current run into the before-pause accumulator so depletion
    /// freezes. No-op unless running.
    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.status != CountdownStatus::Running {
            return None;
        }
        if let Some(started) = self.run_started_at_ms.take() {
            self.elapsed_before_pause_ms = self
                .elapsed_before_pause_ms
                .saturating_add(now_ms.saturating_sub(started));
        }
        self.remaining_ms = self.duration_ms.saturating_sub(self.elapsed_before_pause_ms);
        self.status = CountdownStatus::Paused;
        Some(Event::CountdownPaused {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    /// Timestamp-explicit variant of [`CountdownEngine::resume`].
    ///
    /// Re-anchors the run start to now. No-op unless paused.
    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.status != CountdownStatus::Paused {
            return None;
        }
        self.status = CountdownStatus::Running;
        self.run_started_at_ms = Some(now_ms);
        Some(Event::CountdownResumed {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Always effective: back to idle with remaining reset to the full
    /// duration and anchors cleared. No tick delivered after this call can
    /// mutate state.
    pub fn stop(&mut self) -> Option<Event> {
        self.status = CountdownStatus::Idle;
        self.remaining_ms = self.duration_ms;
        self.elapsed_before_pause_ms = 0;
        self.run_started_at_ms = None;
        Some(Event::CountdownStopped {
            duration_ms: self.duration_ms,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Recompute remaining time from the anchors.
    ///
    /// While running, raises the finished transition exactly once when
    /// remaining reaches 0 (clamped). In every other status, including after
    /// a `stop()` that outran an already-queued tick, this mutates nothing.
    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.status != CountdownStatus::Running {
            return None;
        }
        self.remaining_ms = self.remaining_at(now_ms);
        if self.remaining_ms == 0 {
            self.status = CountdownStatus::Finished;
            self.run_started_at_ms = None;
            return Some(Event::CountdownFinished { at: Utc::now() });
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn remaining_at(&self, now_ms: u64) -> u64 {
        let running = self
            .run_started_at_ms
            .map(|started| now_ms.saturating_sub(started))
            .unwrap_or(0);
        let elapsed = self.elapsed_before_pause_ms.saturating_add(running);
        self.duration_ms.saturating_sub(elapsed)
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn starts_idle_with_zero_duration() {
        let engine = CountdownEngine::new();
        assert_eq!(engine.status(), CountdownStatus::Idle);
        assert_eq!(engine.duration_ms(), 0);
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn prime_shows_duration_without_running() {
        let mut engine = CountdownEngine::new();
        engine.prime(30_000);
        assert_eq!(engine.status(), CountdownStatus::Idle);
        assert_eq!(engine.remaining_ms(), 30_000);
        assert!(engine.tick_at(T0).is_none());
        assert_eq!(engine.remaining_ms(), 30_000);
    }

    #[test]
    fn start_with_zero_duration_is_a_no_op() {
        let mut engine = CountdownEngine::new();
        assert!(engine.start_at(0, T0).is_none());
        assert_eq!(engine.status(), CountdownStatus::Idle);
    }

    #[test]
    fn remaining_tracks_wall_clock_not_tick_count() {
        let mut engine = CountdownEngine::new();
        engine.start_at(30_000, T0);
        // One very late tick, as a throttled background tab would deliver.
        assert!(engine.tick_at(T0 + 12_000).is_none());
        assert_eq!(engine.remaining_ms(), 18_000);
        assert_eq!(engine.status(), CountdownStatus::Running);
    }

    #[test]
    fn pause_freezes_depletion() {
        let mut engine = CountdownEngine::new();
        engine.start_at(10_000, T0);
        engine.tick_at(T0 + 4_000);
        engine.pause_at(T0 + 4_000);
        assert_eq!(engine.status(), CountdownStatus::Paused);
        assert_eq!(engine.remaining_ms(), 6_000);

        // Five seconds pass on the wall clock while paused.
        engine.resume_at(T0 + 9_000);
        assert_eq!(engine.remaining_ms(), 6_000);
        engine.tick_at(T0 + 9_000);
        assert_eq!(engine.remaining_ms(), 6_000);

        // Depletion continues from the resume anchor.
        engine.tick_at(T0 + 11_000);
        assert_eq!(engine.remaining_ms(), 4_000);
    }

    #[test]
    fn pause_twice_is_idempotent() {
        let mut engine = CountdownEngine::new();
        engine.start_at(10_000, T0);
        assert!(engine.pause_at(T0 + 3_000).is_some());
        let remaining = engine.remaining_ms();
        assert!(engine.pause_at(T0 + 5_000).is_none());
        assert_eq!(engine.remaining_ms(), remaining);
        assert_eq!(engine.status(), CountdownStatus::Paused);
    }

    #[test]
    fn resume_while_running_is_a_no_op() {
        let mut engine = CountdownEngine::new();
        engine.start_at(10_000, T0);
        assert!(engine.resume_at(T0 + 1_000).is_none());
        assert_eq!(engine.status(), CountdownStatus::Running);
    }

    #[test]
    fn finishes_exactly_once_with_clamped_remaining() {
        let mut engine = CountdownEngine::new();
        engine.start_at(1_000, T0);
        let finished = engine.tick_at(T0 + 1_500);
        assert!(matches!(finished, Some(Event::CountdownFinished { .. })));
        assert_eq!(engine.remaining_ms(), 0);
        assert_eq!(engine.status(), CountdownStatus::Finished);

        // Later ticks are inert.
        assert!(engine.tick_at(T0 + 2_000).is_none());
        assert_eq!(engine.remaining_ms(), 0);
        assert_eq!(engine.status(), CountdownStatus::Finished);
    }

    #[test]
    fn stop_resets_to_full_duration() {
        let mut engine = CountdownEngine::new();
        engine.start_at(10_000, T0);
        engine.tick_at(T0 + 7_000);
        engine.stop();
        assert_eq!(engine.status(), CountdownStatus::Idle);
        assert_eq!(engine.remaining_ms(), 10_000);
    }

    #[test]
    fn tick_after_stop_mutates_nothing() {
        let mut engine = CountdownEngine::new();
        engine.start_at(1_000, T0);
        engine.stop();
        // A tick that was already queued when stop() ran fires late.
        assert!(engine.tick_at(T0 + 5_000).is_none());
        assert_eq!(engine.status(), CountdownStatus::Idle);
        assert_eq!(engine.remaining_ms(), 1_000);
    }

    #[test]
    fn start_restarts_from_any_status() {
        let mut engine = CountdownEngine::new();
        engine.start_at(1_000, T0);
        engine.tick_at(T0 + 1_500);
        assert_eq!(engine.status(), CountdownStatus::Finished);

        engine.start_at(20_000, T0 + 2_000);
        assert_eq!(engine.status(), CountdownStatus::Running);
        assert_eq!(engine.remaining_ms(), 20_000);
        engine.tick_at(T0 + 3_000);
        assert_eq!(engine.remaining_ms(), 19_000);
    }

    #[test]
    fn remaining_stays_within_bounds() {
        let mut engine = CountdownEngine::new();
        engine.start_at(5_000, T0);
        for offset in [0, 1_000, 4_999, 5_000, 60_000] {
            engine.tick_at(T0 + offset);
            assert!(engine.remaining_ms() <= engine.duration_ms());
        }
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn snapshot_reports_current_state() {
        let mut engine = CountdownEngine::new();
        engine.prime(15_000);
        match engine.snapshot() {
            Event::CountdownSnapshot {
                status,
                remaining_ms,
                duration_ms,
                ..
            } => {
                assert_eq!(status, CountdownStatus::Idle);
                assert_eq!(remaining_ms, 15_000);
                assert_eq!(duration_ms, 15_000);
            }
            _ => panic!("Expected CountdownSnapshot"),
        }
    }

    #[test]
    fn serde_round_trip_preserves_anchors() {
        let mut engine = CountdownEngine::new();
        engine.start_at(10_000, T0);
        engine.pause_at(T0 + 2_500);

        let json = serde_json::to_string(&engine).unwrap();
        let mut restored: CountdownEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.status(), CountdownStatus::Paused);
        assert_eq!(restored.remaining_ms(), 7_500);

        restored.resume_at(T0 + 60_000);
        restored.tick_at(T0 + 61_000);
        assert_eq!(restored.remaining_ms(), 6_500);
    }
}
