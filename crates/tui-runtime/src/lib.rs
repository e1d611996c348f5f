//! Minimal terminal application runtime.
//!
//! Multiplexes three event sources into one single-threaded loop: fixed-rate
//! logic ticks, throttled dirty-flag renders, and crossterm input. The loop
//! sleeps in `crossterm::event::poll` with a timeout computed from the next
//! deadline, so idle applications burn no CPU.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
