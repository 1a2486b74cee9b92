//! Physical button lines. A line that cannot be claimed is reported once and
//! then left out of polling; nothing here ever stops the tick loop.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::LogicalControl;
use crate::error::NavError;

/// One claimed input line.
pub trait ButtonLine: Send {
    fn is_pressed(&self) -> bool;
}

/// Source of button lines, one per logical control.
pub trait HardwareInputPort {
    fn claim(&mut self, control: LogicalControl) -> Result<Box<dyn ButtonLine>, NavError>;
}

/// Keyboard-only setups.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHardware;

impl HardwareInputPort for NoHardware {
    fn claim(&mut self, control: LogicalControl) -> Result<Box<dyn ButtonLine>, NavError> {
        Err(NavError::HardwareUnavailable {
            control,
            reason: "buttons disabled".to_string(),
        })
    }
}

/// Buttons exported through the sysfs GPIO interface (`<root>/gpio<N>/value`).
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
    pins: HashMap<LogicalControl, u32>,
    active_low: bool,
}

impl SysfsGpio {
    pub fn new(
        root: impl Into<PathBuf>,
        pins: impl IntoIterator<Item = (LogicalControl, u32)>,
    ) -> Self {
        Self {
            root: root.into(),
            pins: pins.into_iter().collect(),
            // Pull-up wiring: the line reads 0 while the button is held.
            active_low: true,
        }
    }

    pub fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    fn value_path(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{pin}")).join("value")
    }
}

impl HardwareInputPort for SysfsGpio {
    fn claim(&mut self, control: LogicalControl) -> Result<Box<dyn ButtonLine>, NavError> {
        let Some(pin) = self.pins.get(&control).copied() else {
            return Err(NavError::HardwareUnavailable {
                control,
                reason: "no pin assigned".to_string(),
            });
        };
        let path = self.value_path(pin);
        read_level(&path).map_err(|err| NavError::HardwareUnavailable {
            control,
            reason: format!("{}: {err}", path.display()),
        })?;
        Ok(Box::new(SysfsLine {
            path,
            active_low: self.active_low,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct SysfsLine {
    path: PathBuf,
    active_low: bool,
}

impl ButtonLine for SysfsLine {
    fn is_pressed(&self) -> bool {
        // A read failure after claiming reads as "not pressed".
        match read_level(&self.path) {
            Ok(high) => high != self.active_low,
            Err(_) => false,
        }
    }
}

fn read_level(path: &Path) -> std::io::Result<bool> {
    let raw = fs::read_to_string(path)?;
    match raw.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unexpected gpio value '{other}'"),
        )),
    }
}

/// In-memory line whose state is flipped by tests or the desktop build.
#[derive(Debug, Clone, Default)]
pub struct MockButton {
    pressed: Arc<AtomicBool>,
}

impl MockButton {
    pub fn set_pressed(&self, pressed: bool) {
        self.pressed.store(pressed, Ordering::SeqCst);
    }
}

impl ButtonLine for MockButton {
    fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::SeqCst)
    }
}

/// Hands out `MockButton`s for the controls it was built with.
#[derive(Debug, Clone, Default)]
pub struct MockButtons {
    lines: HashMap<LogicalControl, MockButton>,
}

impl MockButtons {
    pub fn new(controls: impl IntoIterator<Item = LogicalControl>) -> Self {
        Self {
            lines: controls
                .into_iter()
                .map(|control| (control, MockButton::default()))
                .collect(),
        }
    }

    pub fn all() -> Self {
        Self::new(LogicalControl::ALL)
    }

    pub fn button(&self, control: LogicalControl) -> Option<MockButton> {
        self.lines.get(&control).cloned()
    }
}

impl HardwareInputPort for MockButtons {
    fn claim(&mut self, control: LogicalControl) -> Result<Box<dyn ButtonLine>, NavError> {
        match self.lines.get(&control) {
            Some(line) => Ok(Box::new(line.clone())),
            None => Err(NavError::HardwareUnavailable {
                control,
                reason: "not wired".to_string(),
            }),
        }
    }
}
