use super::validation::check_command;
use super::{AppConfig, DEFAULT_PIN_BACK, DEFAULT_PIN_SELECT};
use crate::input::LogicalControl;
use clap::Parser;
use std::fs;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn unique_temp_path(name: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("panelnav-config-{name}-{nanos}"))
}

#[test]
fn defaults_validate() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.root_menu, "main");
    assert_eq!(cfg.tick(), Duration::from_millis(50));
    assert_eq!(cfg.debounce(), Duration::from_millis(100));
}

#[test]
fn rejects_tick_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--tick-ms", "5"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--tick-ms", "1001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_tick_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--tick-ms", "10"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = AppConfig::parse_from(["test-app", "--tick-ms", "1000"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn accepts_zero_debounce_and_rejects_huge_debounce() {
    let mut cfg = AppConfig::parse_from(["test-app", "--debounce-ms", "0"]);
    assert!(cfg.validate().is_ok());

    let mut cfg = AppConfig::parse_from(["test-app", "--debounce-ms", "2001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_short_result_duration() {
    let mut cfg = AppConfig::parse_from(["test-app", "--result-ms", "50"]);
    assert!(cfg.validate().is_err());

    let mut cfg = AppConfig::parse_from(["test-app", "--ack-ms", "60001"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_blank_root() {
    let mut cfg = AppConfig::parse_from(["test-app", "--root", "   "]);
    assert!(cfg.validate().is_err());
}

#[test]
fn trims_root_menu() {
    let mut cfg = AppConfig::parse_from(["test-app", "--root", " settings "]);
    cfg.validate().expect("valid root");
    assert_eq!(cfg.root_menu, "settings");
}

#[test]
fn rejects_duplicate_pins() {
    let select = DEFAULT_PIN_SELECT.to_string();
    let mut cfg = AppConfig::parse_from(["test-app", "--pin-back", select.as_str()]);
    let err = cfg.validate().expect_err("duplicate pin");
    assert!(err.to_string().contains("both use GPIO"));
}

#[test]
fn duplicate_pins_are_ignored_without_buttons() {
    let select = DEFAULT_PIN_SELECT.to_string();
    let mut cfg =
        AppConfig::parse_from(["test-app", "--no-buttons", "--pin-back", select.as_str()]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_pin_out_of_range() {
    let mut cfg = AppConfig::parse_from(["test-app", "--pin-up", "5000"]);
    let err = cfg.validate().expect_err("pin too large");
    assert!(err.to_string().contains("--pin-up"));
}

#[test]
fn rejects_conflicting_button_modes() {
    let mut cfg = AppConfig::parse_from(["test-app", "--no-buttons", "--mock-buttons"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_empty_task_command() {
    let mut cfg = AppConfig::parse_from(["test-app", "--voice-cmd", ""]);
    assert!(cfg.validate().is_err());
}

#[test]
fn empty_volume_command_disables_control() {
    let mut cfg = AppConfig::parse_from(["test-app", "--volume-up-cmd", ""]);
    cfg.validate().expect("empty volume command is allowed");
    let commands = cfg.volume_commands();
    assert_eq!(commands.up, None);
    assert!(commands.down.is_some());
}

#[test]
fn check_command_rejects_multiline() {
    assert!(check_command("echo a\necho b", "--voice-cmd", false).is_err());
    assert!(check_command("echo ok", "--voice-cmd", false).is_ok());
}

#[test]
fn rejects_missing_menu_file() {
    let path = unique_temp_path("missing.json");
    let path_arg = path.to_string_lossy().to_string();
    let mut cfg = AppConfig::parse_from(["test-app", "--menu", path_arg.as_str()]);
    assert!(cfg.validate().is_err());
}

#[test]
fn canonicalizes_existing_menu_file() {
    let path = unique_temp_path("menu.json");
    fs::write(&path, "{}").expect("write menu file");
    let path_arg = path.to_string_lossy().to_string();
    let mut cfg = AppConfig::parse_from(["test-app", "--menu", path_arg.as_str()]);
    cfg.validate().expect("menu file exists");
    assert!(cfg.menu_path.as_ref().is_some_and(|p| p.is_absolute()));
    let _ = fs::remove_file(&path);
}

#[test]
fn pin_map_uses_defaults() {
    let cfg = AppConfig::parse_from(["test-app"]);
    let map = cfg.pin_map();
    assert!(map.contains(&(LogicalControl::Back, DEFAULT_PIN_BACK)));
    assert!(map.contains(&(LogicalControl::Select, DEFAULT_PIN_SELECT)));
}

#[test]
fn logging_requires_logs_without_no_logs() {
    let cfg = AppConfig::parse_from(["test-app", "--logs"]);
    assert!(cfg.logging_enabled());
    let cfg = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
    assert!(!cfg.logging_enabled());
}
