/// All game entity types — pure data, no logic.
///
/// Positions are normalized device coordinates: the playfield is [-1, 1]
/// on each axis with +y pointing up.  Conversion to terminal cells happens
/// in the rendering layer only.

// ── Screens & input ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Which controls are currently held.  Written by the input layer between
/// frames (last write wins), sampled exactly once per update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntentFlags {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle given by its center and full extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    /// Constant during play; only the damage/new-game reset touches it.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal distance covered per frame while a direction is held.
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Per-frame velocity, fixed at fire time.
    pub speed_x: f32,
    pub speed_y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Remaining hits before destruction.  Never exceeds
    /// `initial_hit_points`.
    pub hit_points: u32,
    /// Rolled once at creation; scoring reads this, not the remainder.
    pub initial_hit_points: u32,
    /// Descent per frame, derived from the level at creation time and
    /// never re-derived afterwards.
    pub speed: f32,
    /// Cosmetic hit feedback countdown.  No gameplay effect.
    pub flash_timer: u32,
}

// ── Master session state ──────────────────────────────────────────────────────

/// The entire per-playthrough state.  Cloneable so pure update functions
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub screen: Screen,
    pub is_paused: bool,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub score: u32,
    /// Session maximum carried across playthroughs; persisted externally.
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    /// Session-clock milliseconds of the last shot; `None` = never fired,
    /// so the first shot is always allowed.
    pub last_shot_ms: Option<u64>,
    pub shoot_delay_ms: u64,
    /// Score at which the previous bonus life was awarded.
    pub last_bonus_life_score: u32,
    /// Per-frame spawn probability, level-derived.
    pub asteroid_spawn_rate: f32,
    pub max_asteroids_on_screen: usize,
    pub intent: IntentFlags,
}
