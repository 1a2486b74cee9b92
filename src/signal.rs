use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::log_debug;

/// Set by the SIGINT/SIGTERM handler; the tick loop exits when it sees it.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Only touches an atomic, so it is async-signal-safe.
extern "C" fn handle_interrupt(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn install_interrupt_handler() -> Result<()> {
    for (signal, name) in [(libc::SIGINT, "SIGINT"), (libc::SIGTERM, "SIGTERM")] {
        unsafe {
            // SAFETY: handle_interrupt is an extern "C" handler that only stores to an atomic.
            let handler = handle_interrupt as *const () as libc::sighandler_t;
            if libc::signal(signal, handler) == libc::SIG_ERR {
                log_debug(&format!("failed to install {name} handler"));
                return Err(anyhow!("failed to install {name} handler"));
            }
        }
    }
    Ok(())
}

pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Read and clear the flag.
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
