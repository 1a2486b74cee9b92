//! Registry seed: the nested `{menu_id: {title, options: [...]}}` document loaded at startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::{
    ActionKind, ActionSpec, DynamicMenu, DynamicMenuProvider, ItemAction, MenuNode, MenuOption,
    MenuRegistry, Target,
};
use crate::log_debug;

const DEFAULT_PAGE_SIZE: usize = 5;

/// Device menu used when no `--menu` file is given.
pub const BUILTIN_SEED: &str = r#"{
  "main": {
    "title": "Main Menu",
    "options": [
      {"label": "Library", "target": "library"},
      {"label": "Settings", "target": "settings"},
      {"label": "Player", "target": "player"},
      {"label": "Voice Control", "action": "voice_recognition", "action_type": "background"}
    ]
  },
  "library": {
    "title": "Library",
    "options": [
      {"label": "Songs", "target": "songs"},
      {"label": "Back", "target": "back"}
    ]
  },
  "songs": {
    "title": "Songs",
    "dynamic": {
      "directory": "~/Music",
      "page_size": 5
    }
  },
  "settings": {
    "title": "Settings",
    "options": [
      {"label": "Change Time", "action": "date"},
      {"label": "Change Profile", "action": "profile_calibration", "action_type": "background"},
      {"label": "About", "action": "version", "action_type": "in_process"},
      {"label": "Back", "target": "back"}
    ]
  },
  "player": {
    "title": "Music Player",
    "options": [
      {"label": "Current Track"},
      {"label": "Time Remaining"},
      {"label": "Back", "target": "back"}
    ]
  }
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Yaml,
}

impl SeedFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => SeedFormat::Yaml,
            _ => SeedFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedMenu {
    title: String,
    #[serde(default)]
    options: Vec<SeedOption>,
    #[serde(default)]
    dynamic: Option<SeedDynamic>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedOption {
    label: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    action_type: Option<SeedActionType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedDynamic {
    directory: String,
    #[serde(default = "default_page_size")]
    page_size: usize,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    action_type: Option<SeedActionType>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Unknown strings are rejected by serde, so there is no fallback kind.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SeedActionType {
    Shell,
    #[serde(alias = "function", alias = "inprocess")]
    InProcess,
    Background,
}

impl From<SeedActionType> for ActionKind {
    fn from(value: SeedActionType) -> Self {
        match value {
            SeedActionType::Shell => ActionKind::Shell,
            SeedActionType::InProcess => ActionKind::InProcess,
            SeedActionType::Background => ActionKind::Background,
        }
    }
}

fn action_kind(action_type: Option<SeedActionType>) -> ActionKind {
    action_type.map(ActionKind::from).unwrap_or(ActionKind::Shell)
}

/// Parse a seed document into a registry rooted at `root`.
pub fn parse_seed(text: &str, format: SeedFormat, root: &str) -> Result<MenuRegistry> {
    let menus: BTreeMap<String, SeedMenu> = match format {
        SeedFormat::Json => serde_json::from_str(text).context("invalid JSON menu file")?,
        SeedFormat::Yaml => serde_yaml::from_str(text).context("invalid YAML menu file")?,
    };

    let mut registry = MenuRegistry::new(root);
    for (id, menu) in menus {
        if let Some(dynamic) = menu.dynamic {
            if !menu.options.is_empty() {
                bail!("menu '{id}' cannot have both options and a dynamic listing");
            }
            if dynamic.action_type.is_some() && dynamic.action.is_none() {
                bail!("menu '{id}' sets action_type without an action");
            }
            let item_action = dynamic
                .action
                .map(|template| ItemAction::new(action_kind(dynamic.action_type), template));
            let provider = DynamicMenuProvider::directory(item_action);
            registry.register_dynamic(
                id.clone(),
                DynamicMenu::new(menu.title, dynamic.directory, dynamic.page_size, provider),
            );
            continue;
        }

        let mut options = Vec::with_capacity(menu.options.len());
        for (index, option) in menu.options.into_iter().enumerate() {
            options.push(convert_option(&id, index, option)?);
        }
        registry.insert(MenuNode::new(id, menu.title, options));
    }

    if !registry.contains(root) {
        bail!("root menu '{root}' is not defined");
    }
    for (menu, target) in registry.dangling_targets() {
        log_debug(&format!("menu '{menu}' points at unknown menu '{target}'"));
    }
    Ok(registry)
}

fn convert_option(menu_id: &str, index: usize, option: SeedOption) -> Result<MenuOption> {
    let action = match (option.action, option.action_type) {
        (Some(payload), action_type) => {
            if payload.trim().is_empty() {
                bail!("menu '{menu_id}' option {index} has an empty action");
            }
            Some(ActionSpec::new(action_kind(action_type), payload))
        }
        (None, Some(_)) => {
            bail!("menu '{menu_id}' option {index} sets action_type without an action")
        }
        (None, None) => None,
    };
    Ok(MenuOption {
        label: option.label,
        target: Target::from_seed(option.target.as_deref()),
        action,
    })
}

/// Load the registry from `path`, or from the built-in seed.
pub fn load_registry(path: Option<&Path>, root: &str) -> Result<MenuRegistry> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read menu file '{}'", path.display()))?;
            parse_seed(&text, SeedFormat::from_path(path), root)
                .with_context(|| format!("failed to load menu file '{}'", path.display()))
        }
        None => parse_seed(BUILTIN_SEED, SeedFormat::Json, root),
    }
}
