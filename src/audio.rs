/// Audio collaborator contract.
///
/// The simulation core raises `Sfx` cues; the frame driver forwards them
/// to whatever `AudioSink` is wired in.  Channels are a closed set of
/// identifiers mapped through an explicit name table, so a backend that
/// loads real assets gets compile-time exhaustiveness instead of string
/// lookups.  Nothing in this module can fail gameplay: bad volumes are
/// clamped, playback problems are at worst logged.

use log::debug;

// ── Channel identifiers ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    ButtonClick,
    Fire,
    AsteroidDestroyed,
    ShipHit,
    LoseLife,
}

impl Sfx {
    /// Channel name a playback backend keys its assets by.
    pub fn channel(&self) -> &'static str {
        match self {
            Sfx::ButtonClick => "button_click",
            Sfx::Fire => "fire",
            Sfx::AsteroidDestroyed => "asteroid_destroy",
            Sfx::ShipHit => "ship_asteroid",
            Sfx::LoseLife => "lose_life",
        }
    }

    /// Per-channel volume override.  The fire channel is much louder than
    /// the rest of the set, so it plays far below the shared SFX volume.
    pub fn volume_override(&self) -> Option<f32> {
        match self {
            Sfx::Fire => Some(0.05),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicTrack {
    Start,
    InGame,
    GameOver,
}

impl MusicTrack {
    pub fn channel(&self) -> &'static str {
        match self {
            MusicTrack::Start => "intro",
            MusicTrack::InGame => "ingame",
            MusicTrack::GameOver => "gameover",
        }
    }
}

// ── Volume handling ───────────────────────────────────────────────────────────

/// Clamp a requested volume into [0, 1].  Non-finite input falls back to
/// 0.5 rather than propagating an error.
pub fn validate_volume(volume: f32) -> f32 {
    if !volume.is_finite() {
        return 0.5;
    }
    volume.clamp(0.0, 1.0)
}

// ── Sink contract ─────────────────────────────────────────────────────────────

pub trait AudioSink {
    /// Fire-and-forget playback of a sound effect.
    fn play(&mut self, sfx: Sfx);
    /// Stops any current track and loops the new one.
    fn play_music(&mut self, track: MusicTrack);
    fn stop_all(&mut self);
}

/// Sink that logs playback instead of producing sound — the default for
/// the terminal build, and what tests observe through its getters.
pub struct LogSink {
    sfx_volume: f32,
    music_volume: f32,
    current_track: Option<MusicTrack>,
}

impl LogSink {
    pub fn new() -> Self {
        LogSink {
            sfx_volume: 0.6,
            music_volume: 0.5,
            current_track: None,
        }
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = validate_volume(volume);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = validate_volume(volume);
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink::new()
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, sfx: Sfx) {
        let volume = sfx
            .volume_override()
            .map(validate_volume)
            .unwrap_or(self.sfx_volume);
        debug!("sfx {} (volume {:.2})", sfx.channel(), volume);
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.current_track = Some(track);
        debug!(
            "music {} (volume {:.2}, looping)",
            track.channel(),
            self.music_volume
        );
    }

    fn stop_all(&mut self) {
        self.current_track = None;
        debug!("audio stopped");
    }
}
