use std::time::{Duration, Instant};

use super::LogicalControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Released,
    Pressed,
}

impl From<bool> for Level {
    fn from(pressed: bool) -> Self {
        if pressed {
            Level::Pressed
        } else {
            Level::Released
        }
    }
}

/// Two-state debounce machine for one control on one origin.
///
/// Only an accepted Released -> Pressed edge reports `true`. An edge that
/// arrives inside the interval still latches `Pressed`, so a bouncing contact
/// that stays down does not fire a late event once the interval expires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    control: LogicalControl,
    raw: Level,
    stable: Level,
    last_raw_change_at: Option<Instant>,
    last_edge_at: Option<Instant>,
    interval: Duration,
}

impl Debouncer {
    pub fn new(control: LogicalControl, interval: Duration) -> Self {
        Self {
            control,
            raw: Level::Released,
            stable: Level::Released,
            last_raw_change_at: None,
            last_edge_at: None,
            interval,
        }
    }

    pub fn control(&self) -> LogicalControl {
        self.control
    }

    pub fn raw(&self) -> Level {
        self.raw
    }

    pub fn stable(&self) -> Level {
        self.stable
    }

    pub fn last_raw_change_at(&self) -> Option<Instant> {
        self.last_raw_change_at
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed one raw sample; returns whether it produced an accepted rising edge.
    pub fn sample(&mut self, pressed: bool, now: Instant) -> bool {
        let level = Level::from(pressed);
        if level != self.raw {
            self.raw = level;
            self.last_raw_change_at = Some(now);
        }
        match (self.stable, level) {
            (Level::Released, Level::Pressed) => {
                self.stable = Level::Pressed;
                let accepted = self
                    .last_edge_at
                    .is_none_or(|at| now.saturating_duration_since(at) > self.interval);
                if accepted {
                    self.last_edge_at = Some(now);
                }
                accepted
            }
            (Level::Pressed, Level::Released) => {
                self.stable = Level::Released;
                false
            }
            _ => false,
        }
    }
}
