//! Menu tree data: nodes, options, actions, the registry, and dynamic pages.

mod dynamic;
mod registry;
mod seed;

pub use dynamic::{
    DatasetSource, DirectoryListing, DynamicMenu, DynamicMenuProvider, ItemAction, PagingState,
};
pub use registry::{MenuRegistry, ResolvedMenu};
pub use seed::{load_registry, parse_seed, SeedFormat, BUILTIN_SEED};

/// Where activating an option leads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    None,
    Menu(String),
    Back,
    NextPage,
    PrevPage,
}

impl Target {
    /// Reserved seed tokens map to navigation targets; anything else is a menu id.
    pub fn from_seed(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Target::None,
            Some("back") => Target::Back,
            Some("next_page") => Target::NextPage,
            Some("prev_page") => Target::PrevPage,
            Some(id) => Target::Menu(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Shell,
    InProcess,
    Background,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Shell => "shell",
            ActionKind::InProcess => "in_process",
            ActionKind::Background => "background",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    /// Command line for `Shell`, capability or task name otherwise.
    pub payload: String,
}

impl ActionSpec {
    pub fn new(kind: ActionKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    pub fn shell(command: impl Into<String>) -> Self {
        Self::new(ActionKind::Shell, command)
    }

    pub fn in_process(name: impl Into<String>) -> Self {
        Self::new(ActionKind::InProcess, name)
    }

    pub fn background(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Background, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub target: Target,
    pub action: Option<ActionSpec>,
}

impl MenuOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Target::None,
            action: None,
        }
    }

    pub fn to_menu(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(label).with_target(Target::Menu(id.into()))
    }

    pub fn back() -> Self {
        Self::new("Back").with_target(Target::Back)
    }

    pub fn next_page() -> Self {
        Self::new("Next page").with_target(Target::NextPage)
    }

    pub fn prev_page() -> Self {
        Self::new("Previous page").with_target(Target::PrevPage)
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.action = Some(action);
        self
    }
}

/// A menu screen. Never edited after construction; dynamic menus build a new one per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: String,
    pub title: String,
    pub options: Vec<MenuOption>,
}

impl MenuNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
