/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle and the session-clock
/// time) and returns a brand-new `GameSession`.  Side effects are limited
/// to the injected RNG; sound cues raised during a frame come back to the
/// caller as data.

use rand::Rng;

use crate::audio::Sfx;
use crate::entities::{Asteroid, Bullet, GameSession, IntentFlags, Player, Rect, Screen};

// ── Tuning constants ──────────────────────────────────────────────────────────

pub const INITIAL_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;
pub const MAX_LEVEL: u32 = 50;

/// Base score of a single hit point; destruction pays this times the
/// asteroid's initial hit points times min(level, 5).
pub const SCORE_PER_ASTEROID: u32 = 10;
pub const LEVEL_SCORE_THRESHOLD: u32 = 500;
/// One bonus life per this much score gained since the last award.
pub const BONUS_LIFE_THRESHOLD: u32 = 1000;

pub const SHOOT_DELAY_MS: u64 = 250;

/// Symmetric horizontal bound for both the player clamp and spawn x.
pub const FIELD_BOUND_X: f32 = 0.9;
pub const PLAYER_SPAWN_X: f32 = 0.0;
pub const PLAYER_SPAWN_Y: f32 = -0.8;
pub const PLAYER_SIZE: f32 = 0.16;
pub const PLAYER_SPEED: f32 = 0.02;

pub const BULLET_SPEED_Y: f32 = 0.02;
pub const BULLET_WIDTH: f32 = 0.02;
pub const BULLET_HEIGHT: f32 = 0.04;

pub const ASTEROID_SIZE: f32 = 0.2;
pub const ASTEROID_BASE_SPEED: f32 = 0.004;
pub const ASTEROID_SPEED_CAP: f32 = 0.006;
/// Asteroids enter just above the visible field.
pub const SPAWN_ROW_Y: f32 = 1.1;
/// No spawn while another asteroid is this close to the spawn row.
pub const MIN_SPAWN_SPACING: f32 = 0.3;

pub const INITIAL_SPAWN_RATE: f32 = 0.02;
pub const INITIAL_MAX_ASTEROIDS: usize = 5;

pub const FLASH_FRAMES: u32 = 10;

// ── Level-derived difficulty ──────────────────────────────────────────────────

pub fn level_for_score(score: u32) -> u32 {
    (score / LEVEL_SCORE_THRESHOLD + 1).min(MAX_LEVEL)
}

pub fn max_asteroids_for_level(level: u32) -> usize {
    (5 + level as usize / 3).min(12)
}

pub fn spawn_rate_for_level(level: u32) -> f32 {
    (0.02 + level as f32 * 0.002).min(0.08)
}

/// Descent speed rolled into an asteroid at creation; the level's
/// contribution flattens out at 20 and the result is capped outright.
pub fn asteroid_speed(level: u32) -> f32 {
    let multiplier = 1.0 + level.min(20) as f32 * 0.1;
    (ASTEROID_BASE_SPEED * multiplier).min(ASTEROID_SPEED_CAP)
}

fn asteroid_score(initial_hit_points: u32, level: u32) -> u32 {
    SCORE_PER_ASTEROID * initial_hit_points * level.min(5)
}

// ── Collision detector ────────────────────────────────────────────────────────

/// Standard AABB overlap over center/extent rectangles.  Touching edges
/// count as overlapping.
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.x + a.width / 2.0 < b.x - b.width / 2.0
        || a.x - a.width / 2.0 > b.x + b.width / 2.0
        || a.y + a.height / 2.0 < b.y - b.height / 2.0
        || a.y - a.height / 2.0 > b.y + b.height / 2.0)
}

pub fn player_rect(player: &Player) -> Rect {
    Rect {
        x: player.x,
        y: player.y,
        width: player.width,
        height: player.height,
    }
}

pub fn bullet_rect(bullet: &Bullet) -> Rect {
    Rect {
        x: bullet.x,
        y: bullet.y,
        width: bullet.width,
        height: bullet.height,
    }
}

pub fn asteroid_rect(asteroid: &Asteroid) -> Rect {
    Rect {
        x: asteroid.x,
        y: asteroid.y,
        width: asteroid.width,
        height: asteroid.height,
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

fn spawn_player() -> Player {
    Player {
        x: PLAYER_SPAWN_X,
        y: PLAYER_SPAWN_Y,
        width: PLAYER_SIZE,
        height: PLAYER_SIZE,
        speed: PLAYER_SPEED,
    }
}

/// A fresh session on the start screen, carrying a previously persisted
/// high score.
pub fn new_session(high_score: u32) -> GameSession {
    GameSession {
        screen: Screen::Start,
        is_paused: false,
        player: spawn_player(),
        bullets: Vec::new(),
        asteroids: Vec::new(),
        score: 0,
        high_score,
        lives: INITIAL_LIVES,
        level: 1,
        last_shot_ms: None,
        shoot_delay_ms: SHOOT_DELAY_MS,
        last_bonus_life_score: 0,
        asteroid_spawn_rate: INITIAL_SPAWN_RATE,
        max_asteroids_on_screen: INITIAL_MAX_ASTEROIDS,
        intent: IntentFlags::default(),
    }
}

/// Roll a new asteroid for the given level.  Hit points are uniform in
/// 1..=5 and recorded twice: the remainder that hits chip away, and the
/// immutable initial value that scoring reads.
pub fn spawn_asteroid(level: u32, rng: &mut impl Rng) -> Asteroid {
    let hit_points = rng.gen_range(1..=5);
    Asteroid {
        x: rng.gen_range(-FIELD_BOUND_X..FIELD_BOUND_X),
        y: SPAWN_ROW_Y,
        width: ASTEROID_SIZE,
        height: ASTEROID_SIZE,
        hit_points,
        initial_hit_points: hit_points,
        speed: asteroid_speed(level),
        flash_timer: 0,
    }
}

/// Capacity and spacing gate in front of `spawn_asteroid`.  Returns the
/// new asteroid only when the field can take one; entirely suppressed
/// once the session has ended.
pub fn try_spawn_asteroid(state: &GameSession, rng: &mut impl Rng) -> Option<Asteroid> {
    if state.screen == Screen::GameOver {
        return None;
    }
    if state.asteroids.len() >= state.max_asteroids_on_screen {
        return None;
    }
    if state
        .asteroids
        .iter()
        .any(|a| (a.y - SPAWN_ROW_Y).abs() < MIN_SPAWN_SPACING)
    {
        return None;
    }
    Some(spawn_asteroid(state.level, rng))
}

// ── State-machine transitions ─────────────────────────────────────────────────

/// Start (or restart) a playthrough: everything back to initial values,
/// only the high score survives.
pub fn start_game(state: &GameSession) -> GameSession {
    GameSession {
        screen: Screen::Playing,
        ..new_session(state.high_score)
    }
}

/// Only valid while playing; any other screen is returned unchanged.
pub fn pause_game(state: &GameSession) -> GameSession {
    if state.screen != Screen::Playing {
        return state.clone();
    }
    GameSession {
        screen: Screen::Paused,
        is_paused: true,
        ..state.clone()
    }
}

pub fn resume_game(state: &GameSession) -> GameSession {
    if state.screen != Screen::Paused {
        return state.clone();
    }
    GameSession {
        screen: Screen::Playing,
        is_paused: false,
        ..state.clone()
    }
}

/// Destructive: discards the playthrough.  The caller is responsible for
/// confirming with the user first.
pub fn return_to_menu(state: &GameSession) -> GameSession {
    match state.screen {
        Screen::Paused | Screen::GameOver => new_session(state.high_score),
        _ => state.clone(),
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// `now_ms` is the session clock in milliseconds (the shoot cooldown is
/// the only consumer).  All randomness comes through `rng` so callers
/// control determinism.  Returns the next state plus the sound cues
/// raised during the frame, in order.
///
/// The step order below is observable (scoring reads the pre-progression
/// level, spawn sees the post-progression parameters) and must not be
/// rearranged.
pub fn tick(state: &GameSession, rng: &mut impl Rng, now_ms: u64) -> (GameSession, Vec<Sfx>) {
    let mut cues = Vec::new();
    if state.screen != Screen::Playing || state.is_paused {
        return (state.clone(), cues);
    }
    let mut next = state.clone();

    // ── 1. Player movement from held intents ────────────────────────────────
    if next.intent.left {
        next.player.x = (next.player.x - next.player.speed).max(-FIELD_BOUND_X);
    }
    if next.intent.right {
        next.player.x = (next.player.x + next.player.speed).min(FIELD_BOUND_X);
    }

    // ── 2. Fire, gated by the wall-clock cooldown ───────────────────────────
    let cooldown_elapsed = next
        .last_shot_ms
        .map_or(true, |last| now_ms.saturating_sub(last) >= next.shoot_delay_ms);
    if next.intent.fire && cooldown_elapsed {
        next.bullets.push(Bullet {
            x: next.player.x,
            y: next.player.y + next.player.height / 2.0,
            speed_x: 0.0,
            speed_y: BULLET_SPEED_Y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
        });
        next.last_shot_ms = Some(now_ms);
        cues.push(Sfx::Fire);
    }

    // ── 3. Advance bullets; drop those past the top ─────────────────────────
    for bullet in &mut next.bullets {
        bullet.x += bullet.speed_x;
        bullet.y += bullet.speed_y;
    }
    next.bullets.retain(|b| b.y < 1.0);

    // ── 4. Advance asteroids; drop those past the bottom ────────────────────
    for asteroid in &mut next.asteroids {
        asteroid.y -= asteroid.speed;
        asteroid.flash_timer = asteroid.flash_timer.saturating_sub(1);
    }
    next.asteroids.retain(|a| a.y > -1.0);

    // ── 5. Bullets vs asteroids (two-phase mark, then compact) ──────────────
    // Each bullet consumes at most one hit, matched to the first asteroid
    // in collection order that overlaps and is not already marked
    // destroyed.  A hit that does not destroy still consumes the bullet.
    let mut used_bullets = vec![false; next.bullets.len()];
    let mut destroyed = vec![false; next.asteroids.len()];

    for (bi, bullet) in next.bullets.iter().enumerate() {
        let brect = bullet_rect(bullet);
        for ai in 0..next.asteroids.len() {
            if destroyed[ai] {
                continue;
            }
            if !aabb_overlap(&brect, &asteroid_rect(&next.asteroids[ai])) {
                continue;
            }
            used_bullets[bi] = true;

            let asteroid = &mut next.asteroids[ai];
            asteroid.hit_points = asteroid.hit_points.saturating_sub(1);
            asteroid.flash_timer = FLASH_FRAMES;
            if asteroid.hit_points == 0 {
                destroyed[ai] = true;
                next.score += asteroid_score(asteroid.initial_hit_points, next.level);
                cues.push(Sfx::AsteroidDestroyed);

                // Bonus life every BONUS_LIFE_THRESHOLD score gained since
                // the last award; the checkpoint only moves on an award.
                if next.score >= next.last_bonus_life_score + BONUS_LIFE_THRESHOLD
                    && next.lives < MAX_LIVES
                {
                    next.lives += 1;
                    next.last_bonus_life_score = next.score;
                }
            }
            break;
        }
    }

    let asteroids: Vec<Asteroid> = next
        .asteroids
        .iter()
        .enumerate()
        .filter(|(i, _)| !destroyed[*i])
        .map(|(_, a)| a.clone())
        .collect();
    let bullets: Vec<Bullet> = next
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets[*i])
        .map(|(_, b)| b.clone())
        .collect();
    next.asteroids = asteroids;
    next.bullets = bullets;

    // ── 6. Asteroids vs player ──────────────────────────────────────────────
    // The colliding asteroid stays in the field; the player respawns at
    // the origin.  The scan stops once the terminal transition has fired
    // so lives bottom out at exactly zero.
    let mut lives = next.lives;
    let mut player = next.player.clone();
    for asteroid in &next.asteroids {
        if next.screen == Screen::GameOver {
            break;
        }
        if aabb_overlap(&player_rect(&player), &asteroid_rect(asteroid)) {
            lives = lives.saturating_sub(1);
            cues.push(Sfx::ShipHit);
            player = spawn_player();
            if lives == 0 {
                next.screen = Screen::GameOver;
                if next.score > next.high_score {
                    next.high_score = next.score;
                }
            }
        }
    }
    next.lives = lives;
    next.player = player;

    // ── 7. Level progression (strictly increasing only) ─────────────────────
    let target = level_for_score(next.score);
    if target > next.level {
        next.level = target;
        next.max_asteroids_on_screen = max_asteroids_for_level(next.level);
        next.asteroid_spawn_rate = spawn_rate_for_level(next.level);
    }

    // ── 8. Probabilistic spawn attempt ──────────────────────────────────────
    if next.screen != Screen::GameOver && rng.gen::<f32>() < next.asteroid_spawn_rate {
        if let Some(asteroid) = try_spawn_asteroid(&next, rng) {
            next.asteroids.push(asteroid);
        }
    }

    (next, cues)
}
