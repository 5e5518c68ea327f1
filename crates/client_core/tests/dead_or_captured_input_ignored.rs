use client_core::facade::controller::{ControllerState, InputQueue};
use client_core::systems::action_bindings::{Bindings, ButtonSnapshot, handle_buttons};
use ecs_core::components::Key;

#[test]
fn dead_player_emits_nothing() {
    let state = ControllerState {
        alive: false,
        ..Default::default()
    };
    let input = ButtonSnapshot::default().with(Key::Space);
    let mut out = InputQueue::default();
    handle_buttons(&Bindings::default(), &state, &input, &mut out);
    assert!(out.is_empty());
}

#[test]
fn ui_capture_swallows_buttons() {
    let state = ControllerState {
        in_ui_capture: true,
        ..Default::default()
    };
    let input = ButtonSnapshot::default().with(Key::MouseLeft);
    let mut out = InputQueue::default();
    handle_buttons(&Bindings::default(), &state, &input, &mut out);
    assert!(out.is_empty());
}
