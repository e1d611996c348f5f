use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::LoopEvent;

/// Deadline bookkeeping for ticks and renders.
///
/// Ticks fire at a fixed cadence. Renders fire only when the dirty flag is
/// set (a tick or input event happened) and at most once per render interval,
/// so bursts of input are batched into one redraw. The time-based decisions
/// are separated from the blocking `poll` so they can be tested with
/// synthetic timestamps.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    render_interval: Duration,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration, render_interval: Duration) -> Self {
        let now = Instant::now();
        let past = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval,
            render_interval,
            // Both deadlines start in the past: the first iteration ticks and
            // renders immediately.
            last_tick: past,
            last_render: past,
            dirty: true,
        }
    }

    /// Blocks until the next tick or render deadline passes or a terminal
    /// event arrives.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }
            if event::poll(self.timeout(now))? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }

    /// Returns the deadline-driven event due at `now`, ticks taking priority
    /// over renders.
    fn due(&mut self, now: Instant) -> Option<LoopEvent> {
        if now.duration_since(self.last_tick) >= self.tick_interval {
            self.last_tick = now;
            self.dirty = true;
            return Some(LoopEvent::Tick(now));
        }
        if self.dirty && now.duration_since(self.last_render) >= self.render_interval {
            self.last_render = now;
            self.dirty = false;
            return Some(LoopEvent::Render);
        }
        None
    }

    /// How long `poll` may sleep before the next deadline.
    fn timeout(&self, now: Instant) -> Duration {
        let next_tick_at = self.last_tick + self.tick_interval;
        let next_render_at = self
            .dirty
            .then(|| self.last_render + self.render_interval);
        let next_deadline = next_render_at.map_or(next_tick_at, |at| at.min(next_tick_at));
        next_deadline.saturating_duration_since(now)
    }
}
