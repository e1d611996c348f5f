use std::time::Instant;

use crossterm::event::Event;
use ratatui::Frame;

/// A terminal application driven by [`Runtime::run`](crate::Runtime::run).
pub trait App {
    /// Whether the run loop should stop. Checked before every event.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Advances application logic. Called once per tick with the tick's
    /// timestamp.
    fn update(&mut self, now: Instant);

    /// Draws the screen. Called on renders, which are throttled and only
    /// happen after a tick or input event.
    fn draw(&self, frame: &mut Frame);
}
