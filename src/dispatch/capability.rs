use std::collections::HashMap;

use super::DispatchOutcome;
use crate::error::NavError;
use crate::logging::panic_payload_text;
use crate::terminal_restore::catch_contained;

pub type Capability = Box<dyn Fn() -> anyhow::Result<String> + Send + Sync>;

/// Named zero-argument functions reachable from `in_process` actions.
#[derive(Default)]
pub struct CapabilityTable {
    entries: HashMap<String, Capability>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, capability: F)
    where
        F: Fn() -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Box::new(capability));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Call `name`; a missing entry, an `Err`, or a panic all come back as text.
    pub fn invoke(&self, name: &str) -> DispatchOutcome {
        let Some(capability) = self.entries.get(name) else {
            return DispatchOutcome::Failed(NavError::UnknownCapability(name.to_string()).to_string());
        };
        match catch_contained(|| capability()) {
            Ok(Ok(text)) => DispatchOutcome::Output(text),
            Ok(Err(err)) => {
                DispatchOutcome::Failed(NavError::ActionExecution(format!("{err:#}")).to_string())
            }
            Err(payload) => DispatchOutcome::Failed(
                NavError::ActionExecution(panic_payload_text(payload.as_ref())).to_string(),
            ),
        }
    }
}

impl std::fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("names", &self.names())
            .finish()
    }
}
