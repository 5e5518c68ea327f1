use anyhow::Result;
use hotpotato::client::systems::action_bindings::Bindings;
use hotpotato::data::configs::{bomb, catcher, telemetry};
use hotpotato::demo::{LocalMatch, default_script};
use hotpotato::server::collab::{GameOverSink, LogAudio, Services};
use hotpotato::server::events::GameEvent;
use hotpotato::server::scenario::run_scenario;

struct PrintGameOver;

impl GameOverSink for PrintGameOver {
    fn show_game_over(&mut self) {
        println!("*** GAME OVER ***");
    }
}

fn main() -> Result<()> {
    let tcfg = telemetry::load_default()?;
    let default = format!("{},hotpotato=info", tcfg.log_level.as_deref().unwrap_or("info"));
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let bomb_cfg = bomb::load_default()?;
    let catcher_cfg = catcher::load_default()?;
    let services = Services::default()
        .with_audio(LogAudio)
        .with_game_over(PrintGameOver);

    // Optional scenario file replaces the built-in face-off
    if let Some(path) = std::env::args().nth(1) {
        let scen = hotpotato::data::loader::load_scenario_path(std::path::Path::new(&path))?;
        let report = run_scenario(&scen, &bomb_cfg, &catcher_cfg, services)?;
        for ex in &report.explosions {
            log::info!(
                "boom at {:.2}s ({}), holder {}",
                ex.time_s,
                ex.cause.as_str(),
                ex.holder.as_deref().unwrap_or("-")
            );
        }
        return Ok(());
    }

    let mut m = LocalMatch::face_off(&bomb_cfg, &catcher_cfg, services)?;

    let fps = 60;
    let dt = 1.0 / fps as f32;
    let script = default_script(&Bindings::from_cfg(&catcher_cfg)?, fps);
    m.run(&script, fps * 5, dt);

    for ev in m.srv.drain_events() {
        match ev {
            GameEvent::Caught { agent, fuse_s, .. } => {
                log::info!("{agent:?} caught the bomb ({fuse_s:.1}s left)");
            }
            GameEvent::Thrown { agent, fuse_s, .. } => {
                log::info!("{agent:?} threw the bomb ({fuse_s:.1}s left)");
            }
            GameEvent::Exploded { cause, holder, time_s, .. } => {
                log::info!("boom at {time_s:.2}s ({}), holder {holder:?}", cause.as_str());
            }
            _ => {}
        }
    }
    Ok(())
}
