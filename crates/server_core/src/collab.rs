//! Outbound collaborator seams (audio, game-over, fuse display, animation).
//!
//! The sim never looks these up globally: a `Services` bundle is handed to
//! `ServerState` at construction and per-agent displays are handed to each
//! catch controller. Every seam is fire-and-forget; implementations swallow
//! their own failures.

use ecs_core::components::{AgentId, EntityRef};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayOpts {
    pub volume: f32,
    pub looped: bool,
    pub spatial: bool,
}

impl Default for PlayOpts {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looped: false,
            spatial: true,
        }
    }
}

pub mod sounds {
    pub const BOMB_CATCH: &str = "BombCatch";
    pub const BOMB_THROW: &str = "BombThrow";
    pub const BOMB_EXPLODE: &str = "BombExplode";
    pub const CATCH: &str = "CatchSound";
}

pub mod anim {
    pub const CATCH: &str = "Catch";
    pub const THROW: &str = "Throw";
}

pub trait AudioSink {
    /// Play `name` on `owner`. Unknown names are ignored.
    fn play_event(&mut self, owner: EntityRef, name: &str, opts: PlayOpts);
}

pub trait GameOverSink {
    fn show_game_over(&mut self);
}

/// Per-agent remaining-fuse readout.
pub trait FuseDisplay {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
}

pub trait AnimationSink {
    fn trigger(&mut self, agent: AgentId, name: &str);
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_event(&mut self, _owner: EntityRef, _name: &str, _opts: PlayOpts) {}
}

/// Audio sink that only logs; used by headless tools.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_event(&mut self, owner: EntityRef, name: &str, opts: PlayOpts) {
        log::debug!(
            "audio: {name} on {owner:?} (vol={:.2}, loop={}, spatial={})",
            opts.volume,
            opts.looped,
            opts.spatial
        );
    }
}

/// Injected collaborators. Optional seams are skipped when absent.
pub struct Services {
    pub audio: Box<dyn AudioSink>,
    pub game_over: Option<Box<dyn GameOverSink>>,
    pub anim: Option<Box<dyn AnimationSink>>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            audio: Box::new(NullAudio),
            game_over: None,
            anim: None,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("game_over", &self.game_over.is_some())
            .field("anim", &self.anim.is_some())
            .finish_non_exhaustive()
    }
}

impl Services {
    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_game_over(mut self, sink: impl GameOverSink + 'static) -> Self {
        self.game_over = Some(Box::new(sink));
        self
    }

    pub fn with_anim(mut self, sink: impl AnimationSink + 'static) -> Self {
        self.anim = Some(Box::new(sink));
        self
    }
}
