//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::input::LogicalControl;

pub use defaults::{
    DEFAULT_ACK_MS, DEFAULT_CALIBRATE_CMD, DEFAULT_DEBOUNCE_MS, DEFAULT_GPIO_ROOT,
    DEFAULT_PIN_BACK, DEFAULT_PIN_DOWN, DEFAULT_PIN_LEFT, DEFAULT_PIN_RIGHT, DEFAULT_PIN_SELECT,
    DEFAULT_PIN_UP, DEFAULT_PIN_VOL_DOWN, DEFAULT_PIN_VOL_UP, DEFAULT_RESULT_MS,
    DEFAULT_ROOT_MENU, DEFAULT_TICK_MS, DEFAULT_VOICE_CMD, DEFAULT_VOLUME_DOWN_CMD,
    DEFAULT_VOLUME_UP_CMD,
};

/// CLI options for the panel menu. `validate` must run before the values are trusted.
#[derive(Debug, Parser, Clone)]
#[command(about = "panelnav: button and keyboard driven menu", author, version)]
pub struct AppConfig {
    /// Menu tree file (JSON or YAML); the built-in device menu is used when omitted
    #[arg(long = "menu", env = "PANELNAV_MENU")]
    pub menu_path: Option<PathBuf>,

    /// Id of the menu shown at startup
    #[arg(long = "root", default_value = DEFAULT_ROOT_MENU)]
    pub root_menu: String,

    /// Main loop tick length (milliseconds)
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Minimum time between two accepted presses of one input (milliseconds)
    #[arg(long = "debounce-ms", default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// How long command and function output stays on screen (milliseconds)
    #[arg(long = "result-ms", default_value_t = DEFAULT_RESULT_MS)]
    pub result_ms: u64,

    /// How long a plain "You selected" acknowledgement stays on screen (milliseconds)
    #[arg(long = "ack-ms", default_value_t = DEFAULT_ACK_MS)]
    pub ack_ms: u64,

    /// Directory holding exported sysfs GPIO lines
    #[arg(long = "gpio-root", default_value = DEFAULT_GPIO_ROOT)]
    pub gpio_root: PathBuf,

    /// Ignore physical buttons and use the keyboard only
    #[arg(long = "no-buttons", default_value_t = false)]
    pub no_buttons: bool,

    /// Use in-memory buttons that never press (for desktop testing)
    #[arg(long = "mock-buttons", default_value_t = false)]
    pub mock_buttons: bool,

    #[arg(long = "pin-select", default_value_t = DEFAULT_PIN_SELECT)]
    pub pin_select: u32,

    #[arg(long = "pin-back", default_value_t = DEFAULT_PIN_BACK)]
    pub pin_back: u32,

    #[arg(long = "pin-up", default_value_t = DEFAULT_PIN_UP)]
    pub pin_up: u32,

    #[arg(long = "pin-down", default_value_t = DEFAULT_PIN_DOWN)]
    pub pin_down: u32,

    #[arg(long = "pin-left", default_value_t = DEFAULT_PIN_LEFT)]
    pub pin_left: u32,

    #[arg(long = "pin-right", default_value_t = DEFAULT_PIN_RIGHT)]
    pub pin_right: u32,

    #[arg(long = "pin-vol-up", default_value_t = DEFAULT_PIN_VOL_UP)]
    pub pin_vol_up: u32,

    #[arg(long = "pin-vol-down", default_value_t = DEFAULT_PIN_VOL_DOWN)]
    pub pin_vol_down: u32,

    /// Shell command run by the volume-up button (empty disables it)
    #[arg(long = "volume-up-cmd", default_value = DEFAULT_VOLUME_UP_CMD)]
    pub volume_up_cmd: String,

    /// Shell command run by the volume-down button (empty disables it)
    #[arg(long = "volume-down-cmd", default_value = DEFAULT_VOLUME_DOWN_CMD)]
    pub volume_down_cmd: String,

    /// Command the `voice_recognition` background task runs
    #[arg(long = "voice-cmd", env = "PANELNAV_VOICE_CMD", default_value = DEFAULT_VOICE_CMD)]
    pub voice_cmd: String,

    /// Command the `profile_calibration` background task runs
    #[arg(
        long = "calibrate-cmd",
        env = "PANELNAV_CALIBRATE_CMD",
        default_value = DEFAULT_CALIBRATE_CMD
    )]
    pub calibrate_cmd: String,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "PANELNAV_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "PANELNAV_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging command output and file names (debug log only)
    #[arg(
        long = "log-content",
        env = "PANELNAV_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,

    /// Load and check the menu tree, print a summary, and exit
    #[arg(long = "check", default_value_t = false)]
    pub check: bool,
}

impl AppConfig {
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn transient_timing(&self) -> TransientTiming {
        TransientTiming {
            result: Duration::from_millis(self.result_ms),
            ack: Duration::from_millis(self.ack_ms),
        }
    }

    /// Physical line assigned to each logical control.
    pub fn pin_map(&self) -> [(LogicalControl, u32); 8] {
        [
            (LogicalControl::Back, self.pin_back),
            (LogicalControl::Select, self.pin_select),
            (LogicalControl::Up, self.pin_up),
            (LogicalControl::Down, self.pin_down),
            (LogicalControl::Left, self.pin_left),
            (LogicalControl::Right, self.pin_right),
            (LogicalControl::VolUp, self.pin_vol_up),
            (LogicalControl::VolDown, self.pin_vol_down),
        ]
    }

    pub fn volume_commands(&self) -> VolumeCommands {
        VolumeCommands {
            up: non_empty(&self.volume_up_cmd),
            down: non_empty(&self.volume_down_cmd),
        }
    }
}

/// Display durations for transient results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientTiming {
    pub result: Duration,
    pub ack: Duration,
}

impl Default for TransientTiming {
    fn default() -> Self {
        Self {
            result: Duration::from_millis(DEFAULT_RESULT_MS),
            ack: Duration::from_millis(DEFAULT_ACK_MS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeCommands {
    pub up: Option<String>,
    pub down: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
