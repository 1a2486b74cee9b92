use super::*;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const DEBOUNCE: Duration = Duration::from_millis(100);

fn at(base: Instant, offset_ms: u64) -> Instant {
    base + Duration::from_millis(offset_ms)
}

fn temp_gpio_root(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let root = std::env::temp_dir().join(format!("panelnav-gpio-{name}-{nanos}"));
    fs::create_dir_all(&root).expect("create gpio root");
    root
}

fn write_pin(root: &std::path::Path, pin: u32, value: &str) {
    let dir = root.join(format!("gpio{pin}"));
    fs::create_dir_all(&dir).expect("create gpio dir");
    fs::write(dir.join("value"), value).expect("write gpio value");
}

#[test]
fn keyboard_and_button_down_in_same_tick_merge() {
    let mut buttons = MockButtons::all();
    let down = buttons.button(LogicalControl::Down).expect("down button");
    let mut mux = InputMultiplexer::with_hardware(DEBOUNCE, &mut buttons);

    down.set_pressed(true);
    let events = mux.poll(&[LogicalControl::Down], Instant::now());
    assert_eq!(events, vec![LogicalControl::Down]);
}

#[test]
fn two_edges_inside_interval_produce_one_event() {
    let mut buttons = MockButtons::new([LogicalControl::Select]);
    let select = buttons.button(LogicalControl::Select).expect("select");
    let mut mux = InputMultiplexer::with_hardware(DEBOUNCE, &mut buttons);
    let base = Instant::now();

    let mut total = 0;
    select.set_pressed(true);
    total += mux.poll(&[], base).len();
    select.set_pressed(false);
    total += mux.poll(&[], at(base, 30)).len();
    select.set_pressed(true);
    total += mux.poll(&[], at(base, 60)).len();
    assert_eq!(total, 1);
}

#[test]
fn sources_debounce_independently() {
    let mut buttons = MockButtons::new([LogicalControl::Up]);
    let up = buttons.button(LogicalControl::Up).expect("up");
    let mut mux = InputMultiplexer::with_hardware(DEBOUNCE, &mut buttons);
    let base = Instant::now();

    up.set_pressed(true);
    assert_eq!(mux.poll(&[], base), vec![LogicalControl::Up]);
    // The keyboard Up source has never fired, so its own edge is accepted.
    up.set_pressed(false);
    assert_eq!(mux.poll(&[LogicalControl::Up], at(base, 20)), vec![LogicalControl::Up]);
}

#[test]
fn events_come_out_in_control_order() {
    let mut mux = InputMultiplexer::new(DEBOUNCE);
    let events = mux.poll(
        &[LogicalControl::Down, LogicalControl::Back, LogicalControl::Select],
        Instant::now(),
    );
    assert_eq!(
        events,
        vec![LogicalControl::Back, LogicalControl::Select, LogicalControl::Down]
    );
}

#[test]
fn held_key_across_ticks_fires_once() {
    let mut mux = InputMultiplexer::new(DEBOUNCE);
    let base = Instant::now();
    assert_eq!(mux.poll(&[LogicalControl::Down], base).len(), 1);
    assert!(mux.poll(&[LogicalControl::Down], at(base, 50)).is_empty());
    assert!(mux.poll(&[LogicalControl::Down], at(base, 200)).is_empty());
    assert!(mux.poll(&[], at(base, 250)).is_empty());
    assert_eq!(mux.poll(&[LogicalControl::Down], at(base, 300)).len(), 1);
}

#[test]
fn missing_hardware_is_excluded_silently() {
    let mut mux = InputMultiplexer::with_hardware(DEBOUNCE, &mut NoHardware);
    assert_eq!(mux.source_count(Origin::Button), 0);
    assert_eq!(mux.source_count(Origin::Keyboard), LogicalControl::ALL.len());
    assert!(mux.poll(&[], Instant::now()).is_empty());
}

#[test]
fn partially_wired_mock_only_claims_known_lines() {
    let mut buttons = MockButtons::new([LogicalControl::Select, LogicalControl::Back]);
    let mux = InputMultiplexer::with_hardware(DEBOUNCE, &mut buttons);
    assert_eq!(mux.source_count(Origin::Button), 2);
}

#[test]
fn sysfs_lines_read_active_low() {
    let root = temp_gpio_root("active-low");
    write_pin(&root, 26, "1\n");
    let mut gpio = SysfsGpio::new(&root, [(LogicalControl::Select, 26)]);
    let line = gpio.claim(LogicalControl::Select).expect("claim select");
    assert!(!line.is_pressed());

    write_pin(&root, 26, "0\n");
    assert!(line.is_pressed());
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn sysfs_active_high_inverts() {
    let root = temp_gpio_root("active-high");
    write_pin(&root, 4, "1");
    let mut gpio = SysfsGpio::new(&root, [(LogicalControl::Up, 4)]).with_active_low(false);
    let line = gpio.claim(LogicalControl::Up).expect("claim up");
    assert!(line.is_pressed());
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn sysfs_missing_line_is_unavailable() {
    let root = temp_gpio_root("missing");
    let mut gpio = SysfsGpio::new(&root, [(LogicalControl::Back, 16)]);
    let err = gpio
        .claim(LogicalControl::Back)
        .err()
        .expect("line should be unavailable");
    assert!(matches!(
        err,
        crate::error::NavError::HardwareUnavailable {
            control: LogicalControl::Back,
            ..
        }
    ));
    assert!(gpio.claim(LogicalControl::Down).is_err());
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn sysfs_line_that_disappears_reads_released() {
    let root = temp_gpio_root("vanish");
    write_pin(&root, 20, "0");
    let mut gpio = SysfsGpio::new(&root, [(LogicalControl::Down, 20)]);
    let line = gpio.claim(LogicalControl::Down).expect("claim down");
    assert!(line.is_pressed());
    let _ = fs::remove_dir_all(&root);
    assert!(!line.is_pressed());
}
