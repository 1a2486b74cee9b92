use super::*;
use crate::config::{TransientTiming, VolumeCommands};
use crate::dispatch::{ActionDispatcher, CapabilityTable, TaskTable};
use crate::error::NavError;
use crate::input::{InputMultiplexer, LogicalControl, MockButtons};
use crate::menu::{
    ActionSpec, DatasetSource, DynamicMenu, DynamicMenuProvider, MenuNode, MenuOption,
    MenuRegistry, Target,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Tracks(usize);

impl DatasetSource for Tracks {
    fn fetch(&self, _dataset_id: &str) -> Result<Vec<String>, NavError> {
        Ok((1..=self.0).map(|n| format!("track{n:02}.wav")).collect())
    }
}

fn registry() -> MenuRegistry {
    let mut registry = MenuRegistry::new("main");
    registry.insert(MenuNode::new(
        "main",
        "Main Menu",
        vec![
            MenuOption::to_menu("Library", "library"),
            MenuOption::to_menu("Songs", "songs"),
            MenuOption::new("Echo").with_action(ActionSpec::shell("echo hi")),
            MenuOption::new("Broken link").with_target(Target::Menu("ghost".to_string())),
            MenuOption::new("Plain"),
        ],
    ));
    registry.insert(MenuNode::new(
        "library",
        "Library",
        vec![MenuOption::new("Empty"), MenuOption::back()],
    ));
    registry.insert(MenuNode::new("empty", "Nothing here", Vec::new()));
    registry.register_dynamic(
        "songs",
        DynamicMenu::new(
            "Songs",
            "music",
            5,
            DynamicMenuProvider::new(Arc::new(Tracks(12)), None),
        ),
    );
    registry
}

fn controller() -> NavigationController {
    let mut capabilities = CapabilityTable::new();
    capabilities.register("version", || Ok("1.0".to_string()));
    NavigationController::new(
        registry(),
        ActionDispatcher::new(capabilities, TaskTable::new()),
    )
    .expect("root resolves")
}

fn press(controller: &mut NavigationController, event: NavigationEvent) {
    controller.handle(event, Instant::now());
}

fn select_label(controller: &mut NavigationController, label: &str) {
    let index = controller
        .state()
        .top()
        .node
        .options
        .iter()
        .position(|option| option.label == label)
        .expect("label present");
    while controller.state().selected() != index {
        press(controller, NavigationEvent::MoveSelection(1));
    }
}

#[test]
fn back_at_root_is_a_no_op() {
    let mut nav = controller();
    press(&mut nav, NavigationEvent::Back);
    assert_eq!(nav.state().depth(), 1);
    assert_eq!(nav.state().top().node.id, "main");
}

#[test]
fn n_moves_wrap_to_the_start() {
    let mut nav = controller();
    let len = nav.state().top().node.options.len();
    for _ in 0..len {
        press(&mut nav, NavigationEvent::MoveSelection(1));
    }
    assert_eq!(nav.state().selected(), 0);
    press(&mut nav, NavigationEvent::MoveSelection(-1));
    assert_eq!(nav.state().selected(), len - 1);
}

#[test]
fn activate_pushes_and_back_pops() {
    let mut nav = controller();
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(nav.state().menu_ids(), vec!["main", "library"]);
    assert_eq!(nav.state().selected(), 0);

    select_label(&mut nav, "Back");
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(nav.state().menu_ids(), vec!["main"]);
}

#[test]
fn unknown_target_is_a_no_op() {
    let mut nav = controller();
    select_label(&mut nav, "Broken link");
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(nav.state().depth(), 1);
    assert!(nav.transient().is_none());
}

#[test]
fn paging_replaces_the_top_frame() {
    let mut nav = controller();
    select_label(&mut nav, "Songs");
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(nav.state().depth(), 2);
    assert_eq!(nav.state().top().node.title, "Songs (1/3)");

    select_label(&mut nav, "Next page");
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(nav.state().depth(), 2);
    assert_eq!(nav.state().selected(), 0);
    assert_eq!(nav.state().top().paging.as_ref().map(|p| p.page), Some(1));

    press(&mut nav, NavigationEvent::Page(1));
    assert_eq!(nav.state().top().node.title, "Songs (3/3)");
    press(&mut nav, NavigationEvent::Page(1));
    assert_eq!(nav.state().top().paging.as_ref().map(|p| p.page), Some(2));

    press(&mut nav, NavigationEvent::Page(-1));
    assert_eq!(nav.state().top().paging.as_ref().map(|p| p.page), Some(1));

    press(&mut nav, NavigationEvent::Back);
    assert_eq!(nav.state().depth(), 1);
}

#[test]
fn reentering_a_dynamic_menu_starts_at_page_zero() {
    let mut nav = controller();
    select_label(&mut nav, "Songs");
    press(&mut nav, NavigationEvent::Activate);
    press(&mut nav, NavigationEvent::Page(1));
    press(&mut nav, NavigationEvent::Back);
    select_label(&mut nav, "Songs");
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(nav.state().top().paging.as_ref().map(|p| p.page), Some(0));
}

#[test]
fn page_on_static_menu_does_nothing() {
    let mut nav = controller();
    press(&mut nav, NavigationEvent::Page(1));
    assert_eq!(nav.state().depth(), 1);
    assert_eq!(nav.state().selected(), 0);
}

#[test]
fn plain_option_acknowledges_then_next_input_is_consumed() {
    let mut nav = controller();
    select_label(&mut nav, "Plain");
    let selected = nav.state().selected();
    press(&mut nav, NavigationEvent::Activate);
    assert_eq!(
        nav.transient().map(|t| t.text.as_str()),
        Some("You selected: Plain")
    );

    press(&mut nav, NavigationEvent::MoveSelection(1));
    assert!(nav.transient().is_none());
    assert_eq!(nav.state().selected(), selected);
}

#[test]
fn action_result_expires_after_its_duration() {
    let mut nav = controller().with_timing(TransientTiming {
        result: Duration::from_millis(200),
        ack: Duration::from_millis(100),
    });
    select_label(&mut nav, "Echo");
    let start = Instant::now();
    nav.tick(&[NavigationEvent::Activate], start);
    let transient = nav.transient().cloned().expect("shell output shown");
    assert_eq!(transient.text, "hi");
    assert!(transient.until >= start + Duration::from_millis(200));
    assert_eq!(nav.view(10).transient.as_deref(), Some("hi"));

    nav.tick(&[], transient.until);
    assert!(nav.transient().is_none());
    assert!(nav.view(10).transient.is_none());
}

#[test]
fn only_the_first_event_of_a_tick_applies() {
    let mut nav = controller();
    nav.tick(
        &[
            NavigationEvent::MoveSelection(1),
            NavigationEvent::MoveSelection(1),
        ],
        Instant::now(),
    );
    assert_eq!(nav.state().selected(), 1);
}

#[test]
fn same_tick_keyboard_and_button_move_once() {
    let buttons = MockButtons::all();
    let mut mux = InputMultiplexer::new(Duration::from_millis(100));
    for control in LogicalControl::ALL {
        let line = buttons.button(control).expect("mock line");
        mux.attach_button(control, Box::new(line), Duration::from_millis(100));
    }
    buttons
        .button(LogicalControl::Down)
        .expect("down line")
        .set_pressed(true);

    let now = Instant::now();
    let events: Vec<NavigationEvent> = mux
        .poll(&[LogicalControl::Down], now)
        .into_iter()
        .map(NavigationEvent::from_control)
        .collect();
    assert_eq!(events, vec![NavigationEvent::MoveSelection(1)]);

    let mut nav = controller();
    nav.tick(&events, now);
    assert_eq!(nav.state().selected(), 1);
}

#[test]
fn empty_menu_view_has_no_selection() {
    let mut registry = registry();
    registry.insert(MenuNode::new(
        "main",
        "Main",
        vec![MenuOption::to_menu("Empty", "empty")],
    ));
    let mut nav = NavigationController::new(registry, ActionDispatcher::default())
        .expect("root resolves");
    press(&mut nav, NavigationEvent::Activate);
    press(&mut nav, NavigationEvent::MoveSelection(1));
    press(&mut nav, NavigationEvent::Activate);

    let view = nav.view(5);
    assert_eq!(view.title, "Nothing here");
    assert!(view.labels.is_empty());
    assert_eq!(view.selected, None);
    assert_eq!(nav.state().depth(), 2);
}

#[test]
fn volume_without_command_is_ignored() {
    let mut nav = controller().with_volume(VolumeCommands::default());
    press(&mut nav, NavigationEvent::Volume(1));
    assert!(nav.transient().is_none());
}

#[test]
fn failing_volume_command_is_shown() {
    let mut nav = controller().with_volume(VolumeCommands {
        up: Some("echo mixer busy >&2; exit 1".to_string()),
        down: None,
    });
    press(&mut nav, NavigationEvent::Volume(1));
    assert_eq!(nav.transient().map(|t| t.text.as_str()), Some("mixer busy"));
    press(&mut nav, NavigationEvent::Volume(-1));
    assert!(nav.transient().is_none());
}

#[test]
fn controls_map_to_events() {
    assert_eq!(
        NavigationEvent::from_control(LogicalControl::Up),
        NavigationEvent::MoveSelection(-1)
    );
    assert_eq!(
        NavigationEvent::from_control(LogicalControl::Left),
        NavigationEvent::Page(-1)
    );
    assert_eq!(
        NavigationEvent::from_control(LogicalControl::VolDown),
        NavigationEvent::Volume(-1)
    );
}

#[test]
fn missing_root_is_not_found() {
    let err = NavigationController::new(MenuRegistry::new("main"), ActionDispatcher::default())
        .err()
        .expect("no root");
    assert_eq!(err, NavError::NotFound("main".to_string()));
}
