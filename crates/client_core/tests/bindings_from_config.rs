#![allow(clippy::unwrap_used, clippy::expect_used)]

use client_core::facade::controller::{ControllerState, InputQueue};
use client_core::systems::action_bindings::{Bindings, ButtonSnapshot, handle_buttons};
use data_runtime::configs::catcher::CatcherCfg;
use ecs_core::components::{InputCommand, Key};

#[test]
fn rebound_keys_drive_commands() {
    let cfg = CatcherCfg {
        catch_key: "e".into(),
        throw_key: "mouse1".into(),
        ..Default::default()
    };
    let binds = Bindings::from_cfg(&cfg).unwrap();
    assert_eq!(binds.catch, Key::E);
    assert_eq!(binds.throw, Key::MouseRight);

    let mut out = InputQueue::default();
    // Old defaults no longer map to anything
    let old = ButtonSnapshot::default().with(Key::Space).with(Key::MouseLeft);
    handle_buttons(&binds, &ControllerState::default(), &old, &mut out);
    assert!(out.is_empty());

    let new = ButtonSnapshot::default().with(Key::MouseRight);
    handle_buttons(&binds, &ControllerState::default(), &new, &mut out);
    assert_eq!(out.drain().collect::<Vec<_>>(), vec![InputCommand::ThrowBomb]);
}

#[test]
fn duplicate_binding_is_rejected() {
    let cfg = CatcherCfg {
        catch_key: "Space".into(),
        throw_key: "space".into(),
        ..Default::default()
    };
    assert!(Bindings::from_cfg(&cfg).is_err());
}
