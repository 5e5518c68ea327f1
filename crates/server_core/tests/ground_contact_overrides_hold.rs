#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{BombState, DetonationCause, Pose};
use glam::vec3;
use server_core::events::GameEvent;
use server_core::ground::FlatGround;

#[test]
fn held_bomb_touching_ground_explodes_with_fuse_left() {
    let mut s = server_core::ServerState::new().with_ground(FlatGround::new(0.0));
    let a = s
        .spawn_agent_with_catcher("a", Pose::new(vec3(0.0, 2.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    let bomb = s.spawn_bomb(vec3(0.0, 2.0, 0.5), &BombCfg::default()).unwrap();
    assert_eq!(s.try_catch_bomb(a), Some(bomb));
    s.step_authoritative(0.1);
    assert_eq!(s.world.bomb(bomb).unwrap().state(), BombState::Held { holder: a });

    // Crouch to the floor: the carried bomb now sits on the ground
    s.set_pose(a, Pose::new(vec3(0.0, 0.0, 0.0), 0.0));
    s.step_authoritative(0.1);
    let bm = s.world.bomb(bomb).unwrap();
    assert_eq!(bm.state(), BombState::Exploded);
    assert!(bm.fuse_remaining() > 2.0);
    let events = s.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Exploded { cause: DetonationCause::GroundContact, holder: Some(h), .. } if *h == a
    )));
    // Holder reference dropped together with the bomb's
    assert!(s.world.agent(a).unwrap().catcher.as_ref().unwrap().held_bomb().is_none());
}
