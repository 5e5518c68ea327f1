#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{BombState, Pose};
use glam::vec3;

#[test]
fn only_first_bomb_in_query_order_is_caught() {
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher("a", Pose::new(vec3(0.0, 5.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    // The farther bomb spawns first, so first-match and nearest-match disagree
    let far = s.spawn_bomb(vec3(1.2, 5.0, 0.0), &BombCfg::default()).unwrap();
    let near = s.spawn_bomb(vec3(0.2, 5.0, 0.0), &BombCfg::default()).unwrap();

    assert_eq!(s.try_catch_bomb(a), Some(far));
    assert_eq!(s.world.bomb(far).unwrap().holder(), Some(a));
    assert_eq!(s.world.bomb(near).unwrap().state(), BombState::Armed);
}
