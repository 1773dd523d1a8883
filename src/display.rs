/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Entities are drawn in the fixed order
/// player, bullets, asteroids.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use asteroid_shooter::entities::{Asteroid, GameSession, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_ASTEROID_LIGHT: Color = Color::Grey;
const C_ASTEROID_MEDIUM: Color = Color::DarkYellow;
const C_ASTEROID_HEAVY: Color = Color::Red;
const C_ASTEROID_FLASH: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate projection ─────────────────────────────────────────────────────

/// Map a normalized [-1, 1] position into the playfield cells (inside the
/// border, below the HUD).  Positions outside the field (e.g. an asteroid
/// still on the spawn row) are simply not drawn.
fn project(x: f32, y: f32, width: u16, height: u16) -> Option<(u16, u16)> {
    if !(-1.0..=1.0).contains(&x) || !(-1.0..=1.0).contains(&y) {
        return None;
    }
    let cols = width.saturating_sub(2);
    let rows = height.saturating_sub(4);
    if cols < 2 || rows < 2 {
        return None;
    }
    let col = 1.0 + (x + 1.0) / 2.0 * (cols - 1) as f32;
    let row = 2.0 + (1.0 - y) / 2.0 * (rows - 1) as f32;
    Some((col.round() as u16, row.round() as u16))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    draw_player(out, state, width, height)?;
    for bullet in &state.bullets {
        if let Some((col, row)) = project(bullet.x, bullet.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BULLET))?;
            out.queue(Print("║"))?;
        }
    }
    for asteroid in &state.asteroids {
        draw_asteroid(out, asteroid, width, height)?;
    }

    draw_controls_hint(out, height)?;

    match state.screen {
        Screen::Paused => draw_pause_overlay(out, width, height)?,
        Screen::GameOver => draw_game_over(out, state, width, height)?,
        _ => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession, width: u16) -> std::io::Result<()> {
    // Score and high score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if state.high_score > 0 {
        out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}",
            state.score, state.high_score
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", state.score)))?;
    }

    // Level — centre
    let level_str = format!("[ LEVEL {:>2} ]", state.level);
    let lx = (width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Lives — right
    let hearts: String = "♥".repeat(state.lives as usize);
    let lives_str = format!("Lives:{}", hearts);
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // Ship sprite (2 rows, 3 cols):
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let Some((col, row)) = project(state.player.x, state.player.y, width, height) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    let wing_row = row + 1;
    if wing_row < height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), wing_row))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_asteroid<W: Write>(
    out: &mut W,
    asteroid: &Asteroid,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some((col, row)) = project(asteroid.x, asteroid.y, width, height) else {
        return Ok(());
    };

    // Heavier rocks get denser glyphs, matching the remaining hit points;
    // a fresh hit flashes white for a few frames.
    let glyph = match asteroid.hit_points {
        0 | 1 => "(o)",
        2 | 3 => "(O)",
        _ => "(@)",
    };
    let color = if asteroid.flash_timer > 0 {
        C_ASTEROID_FLASH
    } else {
        match asteroid.hit_points {
            0 | 1 => C_ASTEROID_LIGHT,
            2 | 3 => C_ASTEROID_MEDIUM,
            _ => C_ASTEROID_HEAVY,
        }
    };

    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_pause_overlay<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Yellow),
        ("║     PAUSED       ║", Color::Yellow),
        ("╚══════════════════╝", Color::Yellow),
    ];
    let hint = "ESC - Resume  R - Restart  M - Menu";

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let hint_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameSession,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let best_line = if state.score >= state.high_score && state.score > 0 {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if state.score >= state.high_score && state.score > 0 {
        Color::Yellow
    } else {
        Color::DarkGrey
    };

    let cx = width / 2;
    let total_rows = lines.len() + 3;
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    let hint = "R - Play Again  M - Menu  Q - Quit";
    let hint_row = best_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
