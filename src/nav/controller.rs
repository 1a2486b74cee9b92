use std::time::{Duration, Instant};

use super::{NavigationEvent, NavigationState};
use crate::config::{TransientTiming, VolumeCommands};
use crate::dispatch::{ActionDispatcher, DispatchOutcome};
use crate::error::NavError;
use crate::log_debug;
use crate::menu::{ActionSpec, MenuRegistry, Target};
use crate::render::{visible_window, MenuView};

/// A message shown in place of the menu until `until` or the next input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transient {
    pub text: String,
    pub until: Instant,
}

/// Applies navigation events to the stack, regenerates dynamic menus, and
/// runs actions through the dispatcher.
pub struct NavigationController {
    registry: MenuRegistry,
    state: NavigationState,
    dispatcher: ActionDispatcher,
    timing: TransientTiming,
    volume: VolumeCommands,
    transient: Option<Transient>,
    dirty: bool,
}

impl NavigationController {
    pub fn new(registry: MenuRegistry, dispatcher: ActionDispatcher) -> Result<Self, NavError> {
        let root = registry.resolve_page(registry.root_id(), 0)?;
        Ok(Self {
            registry,
            state: NavigationState::new(root),
            dispatcher,
            timing: TransientTiming::default(),
            volume: VolumeCommands::default(),
            transient: None,
            dirty: true,
        })
    }

    pub fn with_timing(mut self, timing: TransientTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_volume(mut self, volume: VolumeCommands) -> Self {
        self.volume = volume;
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn transient(&self) -> Option<&Transient> {
        self.transient.as_ref()
    }

    /// True once after anything visible changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// One loop step: expire the transient, collect worker reports, and apply
    /// the first event. Later events in the same tick are dropped.
    pub fn tick(&mut self, events: &[NavigationEvent], now: Instant) {
        if self
            .transient
            .as_ref()
            .is_some_and(|transient| now >= transient.until)
        {
            self.transient = None;
            self.dirty = true;
        }
        self.dispatcher.poll_background();
        if let Some(event) = events.first() {
            self.handle(*event, now);
        }
    }

    pub fn handle(&mut self, event: NavigationEvent, now: Instant) {
        if self.transient.take().is_some() {
            self.dirty = true;
            return;
        }
        match event {
            NavigationEvent::MoveSelection(delta) => {
                let before = self.state.selected();
                self.state.move_selection(delta);
                self.dirty |= before != self.state.selected();
            }
            NavigationEvent::Activate => self.activate(now),
            NavigationEvent::Back => self.back(),
            NavigationEvent::Page(delta) => {
                let token = if delta < 0 {
                    Target::PrevPage
                } else {
                    Target::NextPage
                };
                let offered = self
                    .state
                    .top()
                    .node
                    .options
                    .iter()
                    .any(|option| option.target == token);
                if offered {
                    self.turn_page(delta);
                }
            }
            NavigationEvent::Volume(delta) => self.adjust_volume(delta, now),
        }
    }

    fn activate(&mut self, now: Instant) {
        let Some(option) = self.state.selected_option().cloned() else {
            return;
        };
        match &option.target {
            Target::Back => return self.back(),
            Target::PrevPage => return self.turn_page(-1),
            Target::NextPage => return self.turn_page(1),
            Target::Menu(id) => return self.enter(id),
            Target::None => {}
        }
        match &option.action {
            Some(action) => {
                let outcome = self.dispatcher.dispatch(action);
                self.show_outcome(&outcome, now);
            }
            None => {
                let text = format!("You selected: {}", option.label);
                self.show(text, self.timing.ack, now);
            }
        }
    }

    fn back(&mut self) {
        if self.state.pop() {
            self.dirty = true;
        }
    }

    fn enter(&mut self, id: &str) {
        match self.registry.resolve_page(id, 0) {
            Ok(menu) => {
                self.state.push(menu);
                self.dirty = true;
            }
            Err(_) => {
                let from = &self.state.top().node.id;
                let err = NavError::NavigationIntegrity(id.to_string());
                tracing::error!(menu = %from, "{err}");
                log_debug(&format!("option in '{from}': {err}"));
            }
        }
    }

    fn turn_page(&mut self, delta: i32) {
        let top = self.state.top();
        let Some(paging) = top.paging.as_ref() else {
            return;
        };
        let Some(page) = paging.page.checked_add_signed(delta as isize) else {
            return;
        };
        if page == paging.page {
            return;
        }
        let id = top.node.id.clone();
        match self.registry.resolve_page(&id, page) {
            Ok(menu) => {
                self.state.replace_top(menu);
                self.dirty = true;
            }
            Err(err) => log_debug(&format!("page {page} of '{id}' unavailable: {err}")),
        }
    }

    fn adjust_volume(&mut self, delta: i32, now: Instant) {
        let command = if delta < 0 {
            self.volume.down.clone()
        } else {
            self.volume.up.clone()
        };
        let Some(command) = command else {
            return;
        };
        // Volume output is noise; only a failure is worth showing.
        if let outcome @ DispatchOutcome::Failed(_) =
            self.dispatcher.dispatch(&ActionSpec::shell(command))
        {
            self.show_outcome(&outcome, now);
        }
    }

    fn show_outcome(&mut self, outcome: &DispatchOutcome, now: Instant) {
        if let Some(text) = outcome.display_text() {
            self.show(text.to_string(), self.timing.result, now);
        }
    }

    fn show(&mut self, text: String, duration: Duration, now: Instant) {
        // Actions can block; count the display time from when they returned.
        let shown_at = Instant::now().max(now);
        self.transient = Some(Transient {
            text,
            until: shown_at + duration,
        });
        self.dirty = true;
    }

    /// Snapshot for the display, scrolled so the selection fits in `rows` lines.
    pub fn view(&self, rows: usize) -> MenuView {
        let node = &self.state.top().node;
        let labels: Vec<String> = node.options.iter().map(|o| o.label.clone()).collect();
        let selected = (!labels.is_empty()).then(|| self.state.selected());
        MenuView {
            title: node.title.clone(),
            scroll_offset: visible_window(labels.len(), self.state.selected(), rows),
            labels,
            selected,
            transient: self.transient.as_ref().map(|t| t.text.clone()),
        }
    }
}
