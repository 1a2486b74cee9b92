use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use super::{ButtonLine, Debouncer, HardwareInputPort, LogicalControl, Origin};
use crate::log_debug;

struct ButtonSource {
    debouncer: Debouncer,
    line: Box<dyn ButtonLine>,
}

/// Polls every keyboard and button source once per tick and merges the
/// accepted rising edges into one deduplicated, ordered list.
pub struct InputMultiplexer {
    keyboard: Vec<Debouncer>,
    buttons: Vec<ButtonSource>,
}

impl InputMultiplexer {
    /// Keyboard sources for every control, no buttons.
    pub fn new(debounce: Duration) -> Self {
        Self {
            keyboard: LogicalControl::ALL
                .iter()
                .map(|control| Debouncer::new(*control, debounce))
                .collect(),
            buttons: Vec::new(),
        }
    }

    /// Claim a button line for each control; unavailable lines are skipped.
    pub fn with_hardware(debounce: Duration, port: &mut dyn HardwareInputPort) -> Self {
        let mut mux = Self::new(debounce);
        let mut missing = Vec::new();
        for control in LogicalControl::ALL {
            match port.claim(control) {
                Ok(line) => mux.attach_button(control, line, debounce),
                Err(err) => {
                    log_debug(&format!("{err}"));
                    missing.push(control.label());
                }
            }
        }
        if !missing.is_empty() {
            tracing::warn!(
                missing = missing.join(","),
                "button lines unavailable; keyboard still active"
            );
        }
        mux
    }

    pub fn attach_button(
        &mut self,
        control: LogicalControl,
        line: Box<dyn ButtonLine>,
        debounce: Duration,
    ) {
        self.buttons.push(ButtonSource {
            debouncer: Debouncer::new(control, debounce),
            line,
        });
    }

    pub fn source_count(&self, origin: Origin) -> usize {
        match origin {
            Origin::Keyboard => self.keyboard.len(),
            Origin::Button => self.buttons.len(),
        }
    }

    /// `keyboard` lists the controls whose key arrived this tick.
    pub fn poll(&mut self, keyboard: &[LogicalControl], now: Instant) -> Vec<LogicalControl> {
        let mut edges = BTreeSet::new();
        for debouncer in &mut self.keyboard {
            let pressed = keyboard.contains(&debouncer.control());
            if debouncer.sample(pressed, now) {
                edges.insert(debouncer.control());
            }
        }
        for source in &mut self.buttons {
            let pressed = source.line.is_pressed();
            if source.debouncer.sample(pressed, now) {
                edges.insert(source.debouncer.control());
            }
        }
        edges.into_iter().collect()
    }
}
