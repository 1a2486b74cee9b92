use super::defaults::{
    MAX_COMMAND_BYTES, MAX_DEBOUNCE_MS, MAX_GPIO_PIN, MAX_TICK_MS, MAX_TRANSIENT_MS, MIN_TICK_MS,
    MIN_TRANSIENT_MS,
};
use super::AppConfig;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize paths.
    pub fn validate(&mut self) -> Result<()> {
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&self.tick_ms) {
            bail!(
                "--tick-ms must be between {MIN_TICK_MS} and {MAX_TICK_MS}, got {}",
                self.tick_ms
            );
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            bail!(
                "--debounce-ms must be between 0 and {MAX_DEBOUNCE_MS}, got {}",
                self.debounce_ms
            );
        }
        if !(MIN_TRANSIENT_MS..=MAX_TRANSIENT_MS).contains(&self.result_ms) {
            bail!(
                "--result-ms must be between {MIN_TRANSIENT_MS} and {MAX_TRANSIENT_MS}, got {}",
                self.result_ms
            );
        }
        if !(MIN_TRANSIENT_MS..=MAX_TRANSIENT_MS).contains(&self.ack_ms) {
            bail!(
                "--ack-ms must be between {MIN_TRANSIENT_MS} and {MAX_TRANSIENT_MS}, got {}",
                self.ack_ms
            );
        }

        self.root_menu = self.root_menu.trim().to_string();
        if self.root_menu.is_empty() {
            bail!("--root must not be empty");
        }

        if self.no_buttons && self.mock_buttons {
            bail!("--no-buttons and --mock-buttons cannot be combined");
        }
        if !self.no_buttons {
            validate_pins(self)?;
        }

        check_command(&self.volume_up_cmd, "--volume-up-cmd", true)?;
        check_command(&self.volume_down_cmd, "--volume-down-cmd", true)?;
        check_command(&self.voice_cmd, "--voice-cmd", false)?;
        check_command(&self.calibrate_cmd, "--calibrate-cmd", false)?;

        if let Some(path) = &mut self.menu_path {
            let canonical = path
                .canonicalize()
                .with_context(|| format!("menu file '{}' does not exist", path.display()))?;
            if !canonical.is_file() {
                bail!("menu file '{}' is not a regular file", canonical.display());
            }
            *path = canonical;
        }

        Ok(())
    }
}

fn validate_pins(config: &AppConfig) -> Result<()> {
    let mut seen = HashMap::new();
    for (control, pin) in config.pin_map() {
        if pin > MAX_GPIO_PIN {
            bail!(
                "--pin-{} must be between 0 and {MAX_GPIO_PIN}, got {pin}",
                control.flag_name()
            );
        }
        if let Some(previous) = seen.insert(pin, control) {
            bail!(
                "--pin-{} and --pin-{} both use GPIO {pin}",
                previous.flag_name(),
                control.flag_name()
            );
        }
    }
    Ok(())
}

/// Commands go straight to `sh -c`, so only the shape is checked here.
pub(super) fn check_command(value: &str, flag: &str, allow_empty: bool) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if allow_empty {
            return Ok(());
        }
        bail!("{flag} must not be empty");
    }
    if trimmed.len() > MAX_COMMAND_BYTES {
        bail!("{flag} must be at most {MAX_COMMAND_BYTES} bytes");
    }
    if trimmed.chars().any(|ch| matches!(ch, '\n' | '\r' | '\0')) {
        bail!("{flag} must be a single line");
    }
    Ok(())
}
