#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::configs::{bomb::BombCfg, catcher::CatcherCfg};
use ecs_core::components::{BombState, DetonationCause, InputCommand, Pose};
use glam::vec3;
use server_core::events::GameEvent;

#[test]
fn held_bomb_explodes_after_full_fuse() {
    let dt = 0.016_f32;
    let mut s = server_core::ServerState::new();
    let p = s
        .spawn_agent_with_catcher("p", Pose::new(vec3(0.0, 5.0, 0.0), 0.0), &CatcherCfg::default(), None)
        .unwrap();
    let b = s.spawn_bomb(vec3(0.0, 5.0, 0.5), &BombCfg::default()).unwrap();
    assert_eq!(s.world.bomb(b).unwrap().fuse_remaining(), 3.0);

    s.command(p, InputCommand::CatchBomb);
    let mut exploded_at = None;
    for _ in 0..400 {
        s.step_authoritative(dt);
        for ev in s.drain_events() {
            if let GameEvent::Exploded { cause, holder, time_s, .. } = ev {
                assert_eq!(cause, DetonationCause::FuseExpired);
                assert_eq!(holder, Some(p));
                exploded_at = Some(time_s);
            }
        }
        if exploded_at.is_some() {
            break;
        }
    }
    let t = exploded_at.expect("bomb should explode while held");
    assert!((t - 3.0).abs() <= f64::from(dt) + 1e-3, "exploded at {t}");
    assert_eq!(s.world.bomb(b).unwrap().state(), BombState::Exploded);
    assert_eq!(s.world.bomb(b).unwrap().fuse_remaining(), 0.0);
}
