//! `--check`: a plain-text summary of the loaded menu tree and the configured hooks.

use std::fmt::Display;

use crate::config::AppConfig;
use crate::dispatch::{CapabilityTable, TaskTable};
use crate::menu::{ActionKind, MenuRegistry};
use crate::{crash_log_path, log_file_path};

pub struct CheckReport {
    lines: Vec<String>,
    problems: usize,
}

impl CheckReport {
    pub fn new(title: &str) -> Self {
        Self {
            lines: vec![title.to_string()],
            problems: 0,
        }
    }

    pub fn section(&mut self, title: &str) {
        self.lines.push(String::new());
        self.lines.push(format!("{title}:"));
    }

    pub fn push_kv(&mut self, key: &str, value: impl Display) {
        self.lines.push(format!("  {key}: {value}"));
    }

    pub fn push_problem(&mut self, line: impl Display) {
        self.problems += 1;
        self.lines.push(format!("  ! {line}"));
    }

    pub fn problems(&self) -> usize {
        self.problems
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

pub fn check_report(
    config: &AppConfig,
    registry: &MenuRegistry,
    capabilities: &CapabilityTable,
    tasks: &TaskTable,
) -> CheckReport {
    let mut report = CheckReport::new("panelnav check");
    report.push_kv("version", env!("CARGO_PKG_VERSION"));

    report.section("Config");
    report.push_kv(
        "menu",
        config
            .menu_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
    );
    report.push_kv("root", registry.root_id());
    report.push_kv("tick_ms", config.tick_ms);
    report.push_kv("debounce_ms", config.debounce_ms);
    let buttons = if config.no_buttons {
        "disabled".to_string()
    } else if config.mock_buttons {
        "mock".to_string()
    } else {
        format!("sysfs ({})", config.gpio_root.display())
    };
    report.push_kv("buttons", buttons);
    report.push_kv(
        "logs",
        if config.logging_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    );
    report.push_kv("log_file", log_file_path().display());
    report.push_kv("crash_log", crash_log_path().display());

    report.section("Menus");
    for id in registry.ids() {
        if registry.is_dynamic(id) {
            report.push_kv(id, "dynamic listing");
            continue;
        }
        let Ok(node) = registry.resolve(id) else {
            continue;
        };
        report.push_kv(id, format!("{} ({} options)", node.title, node.options.len()));
        for option in &node.options {
            let Some(action) = &option.action else {
                continue;
            };
            let known = match action.kind {
                ActionKind::Shell => true,
                ActionKind::InProcess => capabilities.contains(&action.payload),
                ActionKind::Background => tasks.get(&action.payload).is_some(),
            };
            if !known {
                report.push_problem(format!(
                    "'{}' in '{id}' uses unknown {} '{}'",
                    option.label,
                    action.kind.label(),
                    action.payload
                ));
            }
        }
    }
    for (menu, target) in registry.dangling_targets() {
        report.push_problem(format!("'{menu}' points at missing menu '{target}'"));
    }

    report.section("Hooks");
    report.push_kv("in_process", capabilities.names().join(", "));
    report.push_kv("background", tasks.names().join(", "));
    report
}
