pub const DEFAULT_ROOT_MENU: &str = "main";
pub const DEFAULT_TICK_MS: u64 = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_RESULT_MS: u64 = 2000;
pub const DEFAULT_ACK_MS: u64 = 1000;
pub const DEFAULT_GPIO_ROOT: &str = "/sys/class/gpio";

// BCM numbering, buttons wired active-low with pull-ups.
pub const DEFAULT_PIN_SELECT: u32 = 26;
pub const DEFAULT_PIN_BACK: u32 = 16;
pub const DEFAULT_PIN_UP: u32 = 4;
pub const DEFAULT_PIN_RIGHT: u32 = 22;
pub const DEFAULT_PIN_DOWN: u32 = 20;
pub const DEFAULT_PIN_LEFT: u32 = 21;
pub const DEFAULT_PIN_VOL_UP: u32 = 23;
pub const DEFAULT_PIN_VOL_DOWN: u32 = 24;

pub const DEFAULT_VOLUME_UP_CMD: &str = "amixer -q set Master 5%+";
pub const DEFAULT_VOLUME_DOWN_CMD: &str = "amixer -q set Master 5%-";
pub const DEFAULT_VOICE_CMD: &str = "voice-recognition";
pub const DEFAULT_CALIBRATE_CMD: &str = "profile-calibration";

pub(super) const MIN_TICK_MS: u64 = 10;
pub(super) const MAX_TICK_MS: u64 = 1000;
pub(super) const MAX_DEBOUNCE_MS: u64 = 2000;
pub(super) const MIN_TRANSIENT_MS: u64 = 100;
pub(super) const MAX_TRANSIENT_MS: u64 = 60_000;
pub(super) const MAX_COMMAND_BYTES: usize = 4096;
// The sysfs GPIO interface tops out well below this on every board we target.
pub(super) const MAX_GPIO_PIN: u32 = 1023;
