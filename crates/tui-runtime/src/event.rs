use std::time::Instant;

use crossterm::event::Event as CrosstermEvent;

/// One unit of work for the run loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum LoopEvent {
    /// Logic update due at the contained timestamp.
    Tick(Instant),
    /// Screen redraw due.
    Render,
    /// Terminal input, resize, and friends.
    Input(CrosstermEvent),
}
