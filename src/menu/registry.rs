use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::{DynamicMenu, MenuNode, PagingState, Target};
use crate::error::NavError;

/// A node ready to go on the navigation stack.
#[derive(Debug, Clone)]
pub struct ResolvedMenu {
    pub node: Arc<MenuNode>,
    pub paging: Option<PagingState>,
}

/// Static menu tree plus the dynamic ids whose nodes are rebuilt on entry.
#[derive(Debug, Clone)]
pub struct MenuRegistry {
    root: String,
    nodes: BTreeMap<String, Arc<MenuNode>>,
    dynamic: HashMap<String, DynamicMenu>,
}

impl MenuRegistry {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            nodes: BTreeMap::new(),
            dynamic: HashMap::new(),
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    /// Register a static node; a later insert with the same id replaces it.
    pub fn insert(&mut self, node: MenuNode) {
        self.dynamic.remove(&node.id);
        self.nodes.insert(node.id.clone(), Arc::new(node));
    }

    /// Bind `id` to a provider that runs every time the menu is entered.
    pub fn register_dynamic(&mut self, id: impl Into<String>, menu: DynamicMenu) {
        let id = id.into();
        self.nodes.remove(&id);
        self.dynamic.insert(id, menu);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id) || self.dynamic.contains_key(id)
    }

    pub fn is_dynamic(&self, id: &str) -> bool {
        self.dynamic.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered id, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .nodes
            .keys()
            .chain(self.dynamic.keys())
            .map(String::as_str)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Static node, or page 0 of a dynamic menu.
    pub fn resolve(&self, id: &str) -> Result<Arc<MenuNode>, NavError> {
        self.resolve_page(id, 0).map(|resolved| resolved.node)
    }

    /// Like `resolve`, keeping paging coordinates for dynamic menus.
    pub fn resolve_page(&self, id: &str, page: usize) -> Result<ResolvedMenu, NavError> {
        if let Some(node) = self.nodes.get(id) {
            return Ok(ResolvedMenu {
                node: Arc::clone(node),
                paging: None,
            });
        }
        let menu = self
            .dynamic
            .get(id)
            .ok_or_else(|| NavError::NotFound(id.to_string()))?;
        let (node, paging) = menu.build(id, page);
        Ok(ResolvedMenu {
            node: Arc::new(node),
            paging: Some(paging),
        })
    }

    /// `(menu id, missing target)` for static options that point nowhere.
    pub fn dangling_targets(&self) -> Vec<(String, String)> {
        let mut dangling = Vec::new();
        for node in self.nodes.values() {
            for option in &node.options {
                if let Target::Menu(target) = &option.target {
                    if !self.contains(target) {
                        dangling.push((node.id.clone(), target.clone()));
                    }
                }
            }
        }
        dangling
    }
}
