//! Single-slot background worker for long-running tasks such as voice recognition.
//!
//! The only state shared with the worker is the `running` flag. The dispatcher
//! claims it with a compare-exchange before spawning and the worker clears it
//! when the task returns, fails, or panics. The tick loop only ever reads it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::log_debug;
use crate::logging::panic_payload_text;
use crate::terminal_restore::catch_contained;

pub type BackgroundTask = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Named tasks reachable from `background` actions.
#[derive(Default, Clone)]
pub struct TaskTable {
    entries: HashMap<String, BackgroundTask>,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, task: F)
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(task));
    }

    pub fn get(&self, name: &str) -> Option<BackgroundTask> {
        self.entries.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for TaskTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskTable")
            .field("names", &self.names())
            .finish()
    }
}

/// What the worker reports back when a task ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskReport {
    Finished { name: String },
    Failed { name: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartResult {
    Started,
    Busy,
    SpawnFailed(String),
}

struct ClearOnDrop(Arc<AtomicBool>);

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct BackgroundSlot {
    running: Arc<AtomicBool>,
    report_tx: Sender<TaskReport>,
    report_rx: Receiver<TaskReport>,
    handle: Option<thread::JoinHandle<()>>,
}

impl BackgroundSlot {
    pub fn new() -> Self {
        let (report_tx, report_rx) = unbounded();
        Self {
            running: Arc::new(AtomicBool::new(false)),
            report_tx,
            report_rx,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start `task` unless one is already running. Never blocks.
    pub fn try_start(&mut self, name: &str, task: BackgroundTask) -> StartResult {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return StartResult::Busy;
        }

        let running = Arc::clone(&self.running);
        let report_tx = self.report_tx.clone();
        let task_name = name.to_string();
        let spawned = thread::Builder::new()
            .name(format!("panelnav-task-{name}"))
            .spawn(move || {
                let _clear = ClearOnDrop(running);
                let report = match catch_contained(|| task()) {
                    Ok(Ok(())) => TaskReport::Finished { name: task_name },
                    Ok(Err(err)) => TaskReport::Failed {
                        name: task_name,
                        error: format!("{err:#}"),
                    },
                    Err(payload) => TaskReport::Failed {
                        name: task_name,
                        error: panic_payload_text(payload.as_ref()),
                    },
                };
                let _ = report_tx.send(report);
            });

        match spawned {
            Ok(handle) => {
                // The previous worker has already cleared the flag, so it is done or exiting.
                self.handle = Some(handle);
                StartResult::Started
            }
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                log_debug(&format!("failed to spawn background task '{name}': {err}"));
                StartResult::SpawnFailed(err.to_string())
            }
        }
    }

    /// Reports from finished workers since the last call.
    pub fn drain_reports(&mut self) -> Vec<TaskReport> {
        let reports: Vec<TaskReport> = self.report_rx.try_iter().collect();
        if !reports.is_empty() && !self.is_running() {
            if let Some(handle) = self.handle.take() {
                if handle.is_finished() {
                    let _ = handle.join();
                } else {
                    self.handle = Some(handle);
                }
            }
        }
        reports
    }
}

impl std::fmt::Debug for BackgroundSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundSlot")
            .field("running", &self.is_running())
            .finish()
    }
}

impl Default for BackgroundSlot {
    fn default() -> Self {
        Self::new()
    }
}
