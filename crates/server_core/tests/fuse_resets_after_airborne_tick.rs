#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{BombState, InputCommand, Pose};
use glam::vec3;

#[test]
fn thrown_bomb_restores_full_fuse_on_next_tick() {
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher("a", Pose::new(vec3(0.0, 20.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    let bomb = s.spawn_bomb(vec3(0.0, 20.0, 0.5), &BombCfg::default()).unwrap();
    s.command(a, InputCommand::CatchBomb);
    for _ in 0..10 {
        s.step_authoritative(0.1);
    }
    assert!(s.world.bomb(bomb).unwrap().fuse_remaining() < 2.5);

    s.command(a, InputCommand::ThrowBomb);
    s.step_authoritative(0.1);
    let bm = s.world.bomb(bomb).unwrap();
    assert_eq!(bm.state(), BombState::Armed);
    assert_eq!(bm.fuse_remaining(), 3.0);
}
