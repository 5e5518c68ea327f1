//! End-of-tick effect dispatch: sounds -> animations -> game over -> despawn timers.

use crate::ServerState;
use crate::ecs::schedule::Ctx;
use crate::events::{Effect, GameEvent};

/// Hand queued effects to the injected collaborators. The game-over notice
/// is shown at most once per session.
pub(crate) fn dispatch_effects(srv: &mut ServerState, ctx: &mut Ctx) {
    for fx in ctx.effects.drain(..) {
        match fx {
            Effect::Sound { owner, name, opts } => {
                srv.services.audio.play_event(owner, name, opts);
            }
            Effect::Anim { agent, name } => {
                if let Some(anim) = srv.services.anim.as_mut() {
                    anim.trigger(agent, name);
                }
            }
            Effect::GameOver => {
                if srv.game_over_shown {
                    continue;
                }
                srv.game_over_shown = true;
                if let Some(sink) = srv.services.game_over.as_mut() {
                    sink.show_game_over();
                }
                ctx.events.push(GameEvent::GameOver);
            }
            Effect::Despawn { bomb, delay_s } => {
                srv.world
                    .schedule_despawn(bomb, ctx.time_s + f64::from(delay_s));
            }
        }
    }
}
