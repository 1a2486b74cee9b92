//! Executes the action attached to a menu option.
//!
//! Every failure is turned into display text here; nothing below this
//! boundary reaches the navigation loop as an error.

mod background;
mod capability;
mod shell;

pub use background::{BackgroundSlot, BackgroundTask, StartResult, TaskReport, TaskTable};
pub use capability::{Capability, CapabilityTable};
pub use shell::run_shell;

use crate::error::NavError;
use crate::log_debug;
use crate::menu::{ActionKind, ActionSpec};

/// Result of one dispatch, ready for the transient message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Output(String),
    Failed(String),
    BackgroundStarted,
    BackgroundBusy,
}

impl DispatchOutcome {
    /// Text to show, if any. Background outcomes render nothing.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Output(text) if text.is_empty() => Some("(no output)"),
            DispatchOutcome::Output(text) | DispatchOutcome::Failed(text) => Some(text),
            DispatchOutcome::BackgroundStarted | DispatchOutcome::BackgroundBusy => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ActionDispatcher {
    capabilities: CapabilityTable,
    tasks: TaskTable,
    background: BackgroundSlot,
}

impl ActionDispatcher {
    pub fn new(capabilities: CapabilityTable, tasks: TaskTable) -> Self {
        Self {
            capabilities,
            tasks,
            background: BackgroundSlot::new(),
        }
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    pub fn tasks(&self) -> &TaskTable {
        &self.tasks
    }

    pub fn dispatch(&mut self, action: &ActionSpec) -> DispatchOutcome {
        tracing::info!(kind = action.kind.label(), payload = %action.payload, "dispatch action");
        let outcome = match action.kind {
            ActionKind::Shell => run_shell(&action.payload),
            ActionKind::InProcess => self.capabilities.invoke(&action.payload),
            ActionKind::Background => self.start_background(&action.payload),
        };
        if let DispatchOutcome::Failed(text) = &outcome {
            tracing::warn!(kind = action.kind.label(), error = %text, "action failed");
        }
        outcome
    }

    fn start_background(&mut self, name: &str) -> DispatchOutcome {
        let Some(task) = self.tasks.get(name) else {
            return DispatchOutcome::Failed(NavError::UnknownCapability(name.to_string()).to_string());
        };
        match self.background.try_start(name, task) {
            StartResult::Started => {
                tracing::info!(task = name, "background task started");
                DispatchOutcome::BackgroundStarted
            }
            StartResult::Busy => {
                log_debug(&format!("background task '{name}' ignored: another task is running"));
                DispatchOutcome::BackgroundBusy
            }
            StartResult::SpawnFailed(reason) => {
                DispatchOutcome::Failed(NavError::ActionExecution(reason).to_string())
            }
        }
    }

    pub fn background_running(&self) -> bool {
        self.background.is_running()
    }

    /// Collect and log reports from workers that finished since the last tick.
    pub fn poll_background(&mut self) -> Vec<TaskReport> {
        let reports = self.background.drain_reports();
        for report in &reports {
            match report {
                TaskReport::Finished { name } => {
                    tracing::info!(task = %name, "background task finished");
                }
                TaskReport::Failed { name, error } => {
                    tracing::warn!(task = %name, error = %error, "background task failed");
                    log_debug(&format!("background task '{name}' failed: {error}"));
                }
            }
        }
        reports
    }
}
