//! The single-threaded tick loop tying input, navigation, and the display together.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::input::{map_key, InputMultiplexer, KeyInput};
use crate::log_debug;
use crate::nav::{NavigationController, NavigationEvent};
use crate::render::{list_rows, RenderPort};
use crate::signal;

/// Keys drained from the port in one tick; the rest wait for the next one.
const MAX_KEYS_PER_TICK: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `q` or Ctrl-C from the keyboard.
    Quit,
    /// SIGINT or SIGTERM.
    Interrupted,
}

pub struct TickLoop {
    tick: Duration,
    interrupt: fn() -> bool,
}

impl TickLoop {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            interrupt: signal::take_interrupt,
        }
    }

    /// Replace the interrupt check (the signal flag by default).
    pub fn with_interrupt(mut self, interrupt: fn() -> bool) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Run until quit or interrupt. Only display errors end the loop early.
    pub fn run(
        &self,
        controller: &mut NavigationController,
        mux: &mut InputMultiplexer,
        port: &mut dyn RenderPort,
    ) -> Result<ExitReason> {
        let mut last_viewport = None;
        loop {
            if (self.interrupt)() {
                log_debug("interrupt received; leaving menu loop");
                return Ok(ExitReason::Interrupted);
            }
            let started = Instant::now();

            let mut keyboard = Vec::new();
            for _ in 0..MAX_KEYS_PER_TICK {
                let Some(key) = port.poll_key()? else {
                    break;
                };
                match map_key(key) {
                    Some(KeyInput::Quit) => {
                        log_debug("quit key pressed; leaving menu loop");
                        return Ok(ExitReason::Quit);
                    }
                    Some(KeyInput::Control(control)) => keyboard.push(control),
                    None => {}
                }
            }

            let now = Instant::now();
            let events: Vec<NavigationEvent> = mux
                .poll(&keyboard, now)
                .into_iter()
                .map(NavigationEvent::from_control)
                .collect();
            controller.tick(&events, now);

            let viewport = port.viewport();
            let resized = last_viewport != Some(viewport);
            if controller.take_dirty() || resized {
                port.draw(&controller.view(list_rows(viewport.1)))?;
                last_viewport = Some(viewport);
            }

            thread::sleep(self.tick.saturating_sub(started.elapsed()));
        }
    }
}
