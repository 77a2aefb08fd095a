/// An externally owned playable element (an `<audio>`/`<video>` element or
/// a native equivalent).
///
/// The rendering layer constructs and destroys these; the coordinator only
/// attaches to one, starts, stops and seeks it. Playback start is
/// asynchronous: `begin_play` returns immediately and the platform adapter
/// reports the outcome later through
/// [`PlaybackCoordinator::settle_play`](crate::playback::PlaybackCoordinator::settle_play).
pub trait MediaElement {
    /// Replace the element's current source URL.
    fn set_source(&mut self, url: &str);

    /// Source currently loaded into the element, if any.
    fn source(&self) -> Option<String>;

    fn set_looping(&mut self, looping: bool);

    /// Apply a volume level in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    /// Best-effort seek to the start of the medium. Returns `false` when
    /// the platform rejects the seek (e.g. before metadata loads); the
    /// coordinator ignores the result either way.
    fn seek_to_start(&mut self) -> bool;

    /// Begin playback.
    fn begin_play(&mut self);

    fn pause(&mut self);
}
