#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::Pose;
use glam::vec3;
use server_core::events::GameEvent;

#[test]
fn exploded_bomb_despawns_after_grace_delay() {
    let mut s = server_core::ServerState::new();
    let a = s
        .spawn_agent_with_catcher("a", Pose::new(vec3(0.0, 5.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    let b = s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    assert_eq!(s.try_catch_bomb(a), Some(b));
    assert!(s.explode_bomb(b));
    assert!(s.world.agent(a).unwrap().catcher.as_ref().unwrap().held_bomb().is_none());

    // Still present during the 0.1 s grace period
    s.step_authoritative(0.05);
    assert!(s.world.bomb(b).is_some());
    s.step_authoritative(0.05);
    assert!(s.world.bomb(b).is_none());
    let despawned = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Despawned { bomb } if *bomb == b))
        .count();
    assert_eq!(despawned, 1);

    // Reusing the slot must not revive the old handle
    let fresh = s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    assert_eq!(fresh.0.index, b.0.index);
    assert!(s.world.bomb(b).is_none());
    assert!(!s.explode_bomb(b));
    assert!(s.world.bomb(fresh).is_some());
}
