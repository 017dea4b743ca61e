//! Sound effect triggers
//!
//! The game never manages playback. Field events are mapped to fire-and-forget
//! effects and handed to an `AudioSink` along with the volume to play them at.

use crate::sim::{FieldEvent, Owner};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    PlayerShot,
    /// An enemy fires
    EnemyShot,
    /// Player struck (survived or not)
    PlayerHit,
    EnemyDestroyed,
    /// Boss struck and survived
    BossHit,
    BossDestroyed,
    /// Crate struck (damaged or broken)
    BlockHit,
    /// Round lost
    GameOver,
    /// Looping music, started once when the game opens
    BackgroundMusic,
}

impl SoundEffect {
    /// Effect for a field event, if it makes a sound
    pub fn from_event(event: &FieldEvent) -> Option<Self> {
        match event {
            FieldEvent::ProjectileFired { owner, .. } => Some(match owner {
                Owner::Player => SoundEffect::PlayerShot,
                Owner::Enemy => SoundEffect::EnemyShot,
            }),
            FieldEvent::PlayerHit { .. } | FieldEvent::PlayerKilled => Some(SoundEffect::PlayerHit),
            FieldEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyDestroyed),
            FieldEvent::BossDamaged { .. } => Some(SoundEffect::BossHit),
            FieldEvent::BossDestroyed { .. } => Some(SoundEffect::BossDestroyed),
            FieldEvent::BlockDamaged { .. } | FieldEvent::BlockDestroyed { .. } => {
                Some(SoundEffect::BlockHit)
            }
            FieldEvent::BorderHit { .. }
            | FieldEvent::BossExited { .. }
            | FieldEvent::BottomBreached { .. }
            | FieldEvent::WaveSpawned { .. }
            | FieldEvent::BossSpawned { .. } => None,
        }
    }

    /// Sample file under the asset root, for effects that have one
    pub fn sample(&self) -> Option<&'static str> {
        match self {
            SoundEffect::PlayerShot => Some("sounds/no.wav"),
            SoundEffect::EnemyShot => Some("sounds/paper_toss.wav"),
            SoundEffect::PlayerHit => Some("sounds/wilhelm.wav"),
            SoundEffect::BackgroundMusic => Some("sounds/background.wav"),
            _ => None,
        }
    }
}

/// Something that can play an effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink for headless runs: every trigger goes to the log
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound {:?} at volume {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self::with_sink(Box::new(LogSink))
    }

    pub fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever a frame's events call for, in order
    pub fn handle_events(&mut self, events: &[FieldEvent]) {
        for effect in events.iter().filter_map(SoundEffect::from_event) {
            self.play(effect);
        }
    }
}
