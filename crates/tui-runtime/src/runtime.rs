use std::{io, time::Duration};

use crate::{App, event::LoopEvent, event_loop::EventLoop};

/// Owns the terminal session and the event loop.
///
/// `run` puts the terminal in raw/alternate-screen mode through
/// [`ratatui::run`] and restores it on the way out, including on error.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a runtime from tick and render rates in Hz.
    #[must_use]
    pub fn with_rates(tick_rate: f64, render_rate: f64) -> Self {
        Self {
            events: EventLoop::new(
                Duration::from_secs_f64(1.0 / tick_rate),
                Duration::from_secs_f64(1.0 / render_rate),
            ),
        }
    }

    /// Drives `app` until [`App::should_exit`] returns true.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Tick(now) => app.update(now),
                    LoopEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    LoopEvent::Input(event) => app.handle_event(&event),
                }
            }
            Ok(())
        })
    }
}
