#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{InputCommand, Pose};
use glam::vec3;
use server_core::collab::FuseDisplay;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Text(String),
    Visible(bool),
}

struct RecordingDisplay(Rc<RefCell<Vec<Call>>>);

impl FuseDisplay for RecordingDisplay {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().push(Call::Text(text.to_string()));
    }
    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().push(Call::Visible(visible));
    }
}

#[test]
fn display_shows_fuse_while_held_and_hides_on_explosion() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher(
            "a",
            Pose::new(vec3(0.0, 5.0, 0.0), 0.0),
            &CatcherCfg::default(),
            Some(Box::new(RecordingDisplay(log.clone()))),
        )
        .unwrap();
    // Hidden at spawn
    assert_eq!(log.borrow().as_slice(), &[Call::Visible(false)]);
    log.borrow_mut().clear();

    let b = s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    s.command(a, InputCommand::CatchBomb);
    s.step_authoritative(0.5);
    assert_eq!(
        log.borrow().as_slice(),
        &[Call::Text("2.5".into()), Call::Visible(true)]
    );
    s.step_authoritative(0.5);
    assert_eq!(log.borrow().last(), Some(&Call::Text("2.0".into())));
    // Visibility toggles only on change
    assert_eq!(
        log.borrow().iter().filter(|c| matches!(c, Call::Visible(_))).count(),
        1
    );

    log.borrow_mut().clear();
    assert!(s.explode_bomb(b));
    assert_eq!(log.borrow().as_slice(), &[Call::Visible(false)]);
    s.step_authoritative(0.5);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn throwing_hides_the_display() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher(
            "a",
            Pose::new(vec3(0.0, 5.0, 0.0), 0.0),
            &CatcherCfg::default(),
            Some(Box::new(RecordingDisplay(log.clone()))),
        )
        .unwrap();
    s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    s.command(a, InputCommand::CatchBomb);
    s.step_authoritative(0.1);
    s.command(a, InputCommand::ThrowBomb);
    s.step_authoritative(0.1);
    assert_eq!(log.borrow().last(), Some(&Call::Visible(false)));
    let c = s.world.agent(a).unwrap().catcher.as_ref().unwrap();
    assert!(!c.display_visible());
}
