//! Input sources: logical controls, debounce, hardware lines, and the per-tick merge.

mod debounce;
mod hardware;
mod keymap;
mod multiplexer;
#[cfg(test)]
mod tests;

pub use debounce::{Debouncer, Level};
pub use hardware::{
    ButtonLine, HardwareInputPort, MockButton, MockButtons, NoHardware, SysfsGpio, SysfsLine,
};
pub use keymap::{map_key, Key, KeyInput};
pub use multiplexer::InputMultiplexer;

/// An abstract navigation input, independent of where the press came from.
///
/// Declaration order is the order events are emitted within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalControl {
    Back,
    Select,
    Up,
    Down,
    Left,
    Right,
    VolUp,
    VolDown,
}

impl LogicalControl {
    pub const ALL: [LogicalControl; 8] = [
        LogicalControl::Back,
        LogicalControl::Select,
        LogicalControl::Up,
        LogicalControl::Down,
        LogicalControl::Left,
        LogicalControl::Right,
        LogicalControl::VolUp,
        LogicalControl::VolDown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LogicalControl::Back => "Back",
            LogicalControl::Select => "Select",
            LogicalControl::Up => "Up",
            LogicalControl::Down => "Down",
            LogicalControl::Left => "Left",
            LogicalControl::Right => "Right",
            LogicalControl::VolUp => "Volume up",
            LogicalControl::VolDown => "Volume down",
        }
    }

    /// Suffix used by the `--pin-*` flags.
    pub fn flag_name(self) -> &'static str {
        match self {
            LogicalControl::Back => "back",
            LogicalControl::Select => "select",
            LogicalControl::Up => "up",
            LogicalControl::Down => "down",
            LogicalControl::Left => "left",
            LogicalControl::Right => "right",
            LogicalControl::VolUp => "vol-up",
            LogicalControl::VolDown => "vol-down",
        }
    }
}

/// Concrete channel a press arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Keyboard,
    Button,
}
