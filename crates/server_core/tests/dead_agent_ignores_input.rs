#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{BombState, InputCommand, Pose};
use glam::vec3;

#[test]
fn dead_agent_cannot_catch_or_throw() {
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher("a", Pose::new(vec3(0.0, 5.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    let bomb = s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    assert!(s.kill_agent(a));
    s.command(a, InputCommand::CatchBomb);
    s.step_authoritative(0.05);
    assert_eq!(s.world.bomb(bomb).unwrap().state(), BombState::Armed);
    assert!(s.drain_events().is_empty());
}

#[test]
fn agent_killed_while_holding_keeps_the_bomb() {
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher("a", Pose::new(vec3(0.0, 5.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    let bomb = s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    assert_eq!(s.try_catch_bomb(a), Some(bomb));
    s.kill_agent(a);
    s.command(a, InputCommand::ThrowBomb);
    s.step_authoritative(0.05);
    assert_eq!(s.world.bomb(bomb).unwrap().holder(), Some(a));
}
