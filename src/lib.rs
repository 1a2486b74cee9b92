pub mod check;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
mod logging;
pub mod menu;
pub mod nav;
pub mod render;
pub mod runtime;
pub mod signal;
mod telemetry;
pub mod terminal_restore;

pub use error::NavError;
pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use telemetry::init_tracing;
