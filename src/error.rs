//! Engine error taxonomy. None of these ever escape the tick loop; they are
//! turned into log lines or on-screen text where they occur.

use thiserror::Error;

use crate::input::LogicalControl;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    /// An input origin could not be claimed; it is left out of polling.
    #[error("input line for {control:?} unavailable: {reason}")]
    HardwareUnavailable {
        control: LogicalControl,
        reason: String,
    },

    #[error("Cannot read {dataset}: {reason}")]
    DatasetRead { dataset: String, reason: String },

    #[error("Error: {0}")]
    ActionExecution(String),

    #[error("Function '{0}' not found")]
    UnknownCapability(String),

    /// An option points at a menu id the registry does not know.
    #[error("menu '{0}' is not registered")]
    NavigationIntegrity(String),

    #[error("menu '{0}' not found")]
    NotFound(String),
}
