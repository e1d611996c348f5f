use std::time::{Duration, Instant};

use crate::engine::game::GameConfig;

/// Gates gravity steps on wall-clock time supplied by the caller.
///
/// The clock never reads the time itself; `should_step`/`mark_step` take
/// `Instant` values from the host loop, so gravity is testable with synthetic
/// timestamps.
#[derive(Debug, Clone)]
pub(crate) struct FallClock {
    drop_interval: Duration,
    fast_interval: Duration,
    min_interval: Duration,
    speed_factor: f64,
    fast_dropping: bool,
    level: u32,
    last_step: Instant,
}

impl FallClock {
    pub(crate) fn new(config: &GameConfig, now: Instant) -> Self {
        Self {
            drop_interval: config.initial_drop_interval,
            fast_interval: config.fast_drop_interval,
            min_interval: config.min_drop_interval,
            speed_factor: config.speed_up_factor,
            fast_dropping: false,
            level: 1,
            last_step: now,
        }
    }

    /// The interval currently gating gravity: the fast-drop constant while
    /// fast-dropping, the decaying drop interval otherwise.
    pub(crate) fn effective_interval(&self) -> Duration {
        if self.fast_dropping {
            self.fast_interval
        } else {
            self.drop_interval
        }
    }

    pub(crate) fn should_step(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_step) >= self.effective_interval()
    }

    /// Resets the gravity reference. Called after a committed step and after
    /// a spawn, so a fresh piece waits a full interval before falling.
    pub(crate) fn mark_step(&mut self, now: Instant) {
        self.last_step = now;
    }

    pub(crate) fn set_fast_dropping(&mut self, fast_dropping: bool) {
        self.fast_dropping = fast_dropping;
    }

    /// One difficulty escalation: multiply the drop interval by the decay
    /// factor, clamp to the floor, bump the level.
    pub(crate) fn speed_up(&mut self) {
        self.drop_interval = self
            .drop_interval
            .mul_f64(self.speed_factor)
            .max(self.min_interval);
        self.level += 1;
    }

    pub(crate) fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }
}

/// A fixed-cadence wall-clock trigger, used by hosts to drive the difficulty
/// escalation independently of the gravity gate.
#[derive(Debug, Clone)]
pub struct PeriodicTrigger {
    interval: Duration,
    last_fired: Instant,
}

impl PeriodicTrigger {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_fired: now,
        }
    }

    /// Returns `true` (and rearms) once per elapsed interval.
    pub fn fired(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fired) < self.interval {
            return false;
        }
        self.last_fired = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(now: Instant) -> FallClock {
        FallClock::new(&GameConfig::default(), now)
    }

    #[test]
    fn gates_on_elapsed_interval() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        assert!(!clock.should_step(t0 + Duration::from_millis(999)));
        assert!(clock.should_step(t0 + Duration::from_millis(1000)));

        clock.mark_step(t0 + Duration::from_millis(1000));
        assert!(!clock.should_step(t0 + Duration::from_millis(1500)));
        assert!(clock.should_step(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn fast_drop_switches_cadence_without_touching_decay() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        clock.set_fast_dropping(true);
        assert_eq!(clock.effective_interval(), Duration::from_millis(50));
        assert!(clock.should_step(t0 + Duration::from_millis(50)));

        clock.set_fast_dropping(false);
        assert_eq!(clock.effective_interval(), Duration::from_millis(1000));
        assert!(!clock.should_step(t0 + Duration::from_millis(51)));
    }

    #[test]
    fn speed_up_decays_geometrically() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        let mut expected = Duration::from_millis(1000);
        for n in 1..=5 {
            clock.speed_up();
            expected = expected.mul_f64(0.95);
            assert_eq!(clock.drop_interval(), expected, "escalation {n}");
            assert_eq!(clock.level(), 1 + n);
        }
    }

    #[test]
    fn speed_up_clamps_at_floor_but_level_keeps_rising() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        // 1000 * 0.95^n drops below 100 ms after 45 escalations.
        for _ in 0..60 {
            clock.speed_up();
        }
        assert_eq!(clock.drop_interval(), Duration::from_millis(100));
        assert_eq!(clock.level(), 61);

        clock.speed_up();
        assert_eq!(clock.drop_interval(), Duration::from_millis(100));
        assert_eq!(clock.level(), 62);
    }

    #[test]
    fn periodic_trigger_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut trigger = PeriodicTrigger::new(Duration::from_secs(30), t0);
        assert!(!trigger.fired(t0 + Duration::from_secs(29)));
        assert!(trigger.fired(t0 + Duration::from_secs(30)));
        assert!(!trigger.fired(t0 + Duration::from_secs(45)));
        assert!(trigger.fired(t0 + Duration::from_secs(60)));
    }
}
