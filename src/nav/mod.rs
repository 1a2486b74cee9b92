//! Navigation stack and the controller that applies input to it.

mod controller;
#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use controller::{NavigationController, Transient};

use crate::input::LogicalControl;
use crate::menu::{MenuNode, MenuOption, PagingState, ResolvedMenu};

/// What one logical control means to the navigation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    MoveSelection(i32),
    Activate,
    Back,
    Page(i32),
    Volume(i32),
}

impl NavigationEvent {
    pub fn from_control(control: LogicalControl) -> Self {
        match control {
            LogicalControl::Up => NavigationEvent::MoveSelection(-1),
            LogicalControl::Down => NavigationEvent::MoveSelection(1),
            LogicalControl::Select => NavigationEvent::Activate,
            LogicalControl::Back => NavigationEvent::Back,
            LogicalControl::Left => NavigationEvent::Page(-1),
            LogicalControl::Right => NavigationEvent::Page(1),
            LogicalControl::VolUp => NavigationEvent::Volume(1),
            LogicalControl::VolDown => NavigationEvent::Volume(-1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub node: Arc<MenuNode>,
    pub paging: Option<PagingState>,
}

impl From<ResolvedMenu> for Frame {
    fn from(resolved: ResolvedMenu) -> Self {
        Self {
            node: resolved.node,
            paging: resolved.paging,
        }
    }
}

/// Stack of open menus plus the highlighted row of the top one.
///
/// The stack is never empty; the root frame cannot be popped.
#[derive(Debug, Clone)]
pub struct NavigationState {
    stack: Vec<Frame>,
    selected: usize,
}

impl NavigationState {
    pub fn new(root: ResolvedMenu) -> Self {
        Self {
            stack: vec![Frame::from(root)],
            selected: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> &Frame {
        // The constructor seeds one frame and `pop` never removes the last.
        &self.stack[self.stack.len() - 1]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&MenuOption> {
        self.top().node.options.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.top().node.options.len();
        if len == 0 {
            return;
        }
        let len = len as i64;
        self.selected = (self.selected as i64 + i64::from(delta)).rem_euclid(len) as usize;
    }

    pub fn push(&mut self, menu: ResolvedMenu) {
        self.stack.push(Frame::from(menu));
        self.selected = 0;
    }

    /// Returns false at the root, where nothing changes.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        self.selected = 0;
        true
    }

    /// Swap the top frame for a regenerated page of the same menu.
    pub fn replace_top(&mut self, menu: ResolvedMenu) {
        if let Some(top) = self.stack.last_mut() {
            *top = Frame::from(menu);
        }
        self.selected = 0;
    }

    pub fn menu_ids(&self) -> Vec<&str> {
        self.stack.iter().map(|frame| frame.node.id.as_str()).collect()
    }
}
