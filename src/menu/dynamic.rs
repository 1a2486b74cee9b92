//! Menus regenerated from a dataset on every entry, such as a paginated file listing.
//!
//! Generation is a pure function of `(dataset, page, page_size)`: re-entering a
//! page always rebuilds it from scratch and yields the same options in the same
//! order, so nothing here holds state between calls.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{ActionKind, ActionSpec, MenuNode, MenuOption};
use crate::error::NavError;
use crate::log_debug;

/// Supplies the items a dynamic menu lists.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self, dataset_id: &str) -> Result<Vec<String>, NavError>;
}

/// Regular files in a directory (`dataset_id` is the path), sorted case-insensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryListing;

impl DatasetSource for DirectoryListing {
    fn fetch(&self, dataset_id: &str) -> Result<Vec<String>, NavError> {
        let read_error = |err: std::io::Error| NavError::DatasetRead {
            dataset: dataset_id.to_string(),
            reason: err.to_string(),
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(expand_home(dataset_id)).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let is_file = entry.file_type().map(|ty| ty.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                // A lossy label would bind an action to a path that does not exist.
                Err(raw) => {
                    log_debug(&format!("skipping non-UTF-8 entry {raw:?} in {dataset_id}"));
                }
            }
        }
        names.sort_by(|a, b| compare_case_insensitive(a, b));
        Ok(names)
    }
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// `~/` at the start of a dataset path means `$HOME/`.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// How each listed item is turned into an action.
///
/// `{name}` expands to the item name and `{path}` to `<dataset>/<name>`.
/// Shell templates get both values shell-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAction {
    pub kind: ActionKind,
    pub template: String,
}

impl ItemAction {
    pub fn new(kind: ActionKind, template: impl Into<String>) -> Self {
        Self {
            kind,
            template: template.into(),
        }
    }

    fn bind(&self, dataset_id: &str, item: &str) -> ActionSpec {
        let path = expand_home(dataset_id).join(item);
        let path = path.to_string_lossy();
        let quote = self.kind == ActionKind::Shell;
        let value = |text: &str| {
            if quote {
                shell_words::quote(text).into_owned()
            } else {
                text.to_string()
            }
        };
        let payload = fill_template(&self.template, |token| match token {
            "path" => Some(value(&path)),
            "name" => Some(value(item)),
            _ => None,
        });
        ActionSpec::new(self.kind, payload)
    }
}

/// Expand `{token}` placeholders in one left-to-right pass.
///
/// Substituted text is never scanned again, so an item name containing
/// `{name}` stays literal. Unknown tokens are copied through unchanged.
fn fill_template(template: &str, mut lookup: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after
            .find('}')
            .and_then(|close| lookup(&after[..close]).map(|text| (close, text)));
        match replaced {
            Some((close, text)) => {
                out.push_str(&text);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Dataset coordinates of the page currently shown by a dynamic menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState {
    pub dataset_id: String,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Clone)]
pub struct DynamicMenuProvider {
    source: Arc<dyn DatasetSource>,
    item_action: Option<ItemAction>,
}

impl std::fmt::Debug for DynamicMenuProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicMenuProvider")
            .field("item_action", &self.item_action)
            .finish_non_exhaustive()
    }
}

struct Page {
    index: usize,
    total: usize,
    options: Vec<MenuOption>,
}

impl DynamicMenuProvider {
    pub fn new(source: Arc<dyn DatasetSource>, item_action: Option<ItemAction>) -> Self {
        Self {
            source,
            item_action,
        }
    }

    pub fn directory(item_action: Option<ItemAction>) -> Self {
        Self::new(Arc::new(DirectoryListing), item_action)
    }

    /// Options for one page: the items, then `PrevPage`/`NextPage` when they
    /// apply, then `Back`. A read failure yields one informational option plus `Back`.
    pub fn generate(&self, dataset_id: &str, page: usize, page_size: usize) -> Vec<MenuOption> {
        self.page(dataset_id, page, page_size).options
    }

    fn page(&self, dataset_id: &str, page: usize, page_size: usize) -> Page {
        let items = match self.source.fetch(dataset_id) {
            Ok(items) => items,
            Err(err) => {
                return Page {
                    index: 0,
                    total: 1,
                    options: vec![MenuOption::new(err.to_string()), MenuOption::back()],
                }
            }
        };
        let page_size = page_size.max(1);
        let total = items.len().div_ceil(page_size).max(1);
        let index = page.min(total - 1);
        let start = index * page_size;
        let end = (start + page_size).min(items.len());

        let mut options: Vec<MenuOption> = items[start..end]
            .iter()
            .map(|item| {
                let option = MenuOption::new(item.as_str());
                match &self.item_action {
                    Some(action) => option.with_action(action.bind(dataset_id, item)),
                    None => option,
                }
            })
            .collect();
        if index > 0 {
            options.push(MenuOption::prev_page());
        }
        if end < items.len() {
            options.push(MenuOption::next_page());
        }
        options.push(MenuOption::back());
        Page {
            index,
            total,
            options,
        }
    }
}

/// A registered dynamic menu: a title, a dataset, and the provider that pages it.
#[derive(Debug, Clone)]
pub struct DynamicMenu {
    pub title: String,
    pub dataset_id: String,
    pub page_size: usize,
    pub provider: DynamicMenuProvider,
}

impl DynamicMenu {
    pub fn new(
        title: impl Into<String>,
        dataset_id: impl Into<String>,
        page_size: usize,
        provider: DynamicMenuProvider,
    ) -> Self {
        Self {
            title: title.into(),
            dataset_id: dataset_id.into(),
            page_size: page_size.max(1),
            provider,
        }
    }

    /// Fresh node for `page` (clamped to the last page) plus its paging coordinates.
    pub fn build(&self, id: &str, page: usize) -> (MenuNode, PagingState) {
        let Page {
            index,
            total,
            options,
        } = self.provider.page(&self.dataset_id, page, self.page_size);
        let title = if total > 1 {
            format!("{} ({}/{})", self.title, index + 1, total)
        } else {
            self.title.clone()
        };
        let paging = PagingState {
            dataset_id: self.dataset_id.clone(),
            page: index,
            page_size: self.page_size,
        };
        (MenuNode::new(id, title, options), paging)
    }
}
