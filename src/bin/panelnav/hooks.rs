//! Built-in in-process capabilities and background tasks for the device menu.

use std::fs;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use panelnav::config::AppConfig;
use panelnav::dispatch::{CapabilityTable, TaskTable};
use panelnav::log_debug;

pub(crate) fn builtin_capabilities() -> CapabilityTable {
    let mut table = CapabilityTable::new();
    table.register("hostname", hostname);
    table.register("uptime", uptime);
    table.register("version", || {
        Ok(format!("panelnav {}", env!("CARGO_PKG_VERSION")))
    });
    table
}

/// `voice_recognition` and `profile_calibration` run the configured external programs.
pub(crate) fn builtin_tasks(config: &AppConfig) -> TaskTable {
    let mut table = TaskTable::new();
    let voice_cmd = config.voice_cmd.clone();
    table.register("voice_recognition", move || run_detached(&voice_cmd));
    let calibrate_cmd = config.calibrate_cmd.clone();
    table.register("profile_calibration", move || run_detached(&calibrate_cmd));
    table
}

fn hostname() -> Result<String> {
    let raw = fs::read_to_string("/proc/sys/kernel/hostname")
        .or_else(|_| fs::read_to_string("/etc/hostname"))
        .context("hostname unavailable")?;
    Ok(raw.trim().to_string())
}

fn uptime() -> Result<String> {
    let raw = fs::read_to_string("/proc/uptime").context("cannot read /proc/uptime")?;
    let seconds: f64 = raw
        .split_whitespace()
        .next()
        .context("empty /proc/uptime")?
        .parse()
        .context("malformed /proc/uptime")?;
    Ok(format_uptime(seconds as u64))
}

fn format_uptime(total: u64) -> String {
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    if days > 0 {
        format!("up {days}d {hours:02}:{minutes:02}")
    } else {
        format!("up {hours:02}:{minutes:02}")
    }
}

/// Runs on the background worker. Output is discarded so it cannot scribble over the menu.
fn run_detached(command: &str) -> Result<()> {
    log_debug(&format!("starting background command: {command}"));
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to start '{command}'"))?;
    if !status.success() {
        bail!("'{command}' exited with {status}");
    }
    Ok(())
}
