mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::{info, warn, LevelFilter};
use rand::thread_rng;

use asteroid_shooter::audio::{AudioSink, LogSink, MusicTrack, Sfx};
use asteroid_shooter::compute::{
    new_session, pause_game, resume_game, start_game, tick,
};
use asteroid_shooter::entities::{GameSession, IntentFlags, Screen};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

const LOG_FILE: &str = "asteroid_shooter.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".asteroid_shooter_score")
}

/// Best-effort read; any failure counts as "no previous score".
fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

/// Best-effort write; a failure never interrupts play.
fn save_high_score(score: u32) {
    if let Err(err) = std::fs::write(high_score_path(), score.to_string()) {
        warn!("failed to persist high score: {}", err);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ASTEROID  SHOOTER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    // High score display
    if high_score > 0 {
        let hs_str = format!("High Score: {}", high_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(4),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    let blurb = "Blast the falling rocks before they reach your ship.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(blurb.chars().count() as u16 / 2),
        cy.saturating_sub(2),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(blurb))?;

    let rules: &[&str] = &[
        "Tough rocks take up to five hits; harder levels pay more.",
        "Every 1000 points earns a bonus life (up to five).",
    ];
    for (i, line) in rules.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*line))?;
    }

    let hint = "ENTER : Start   Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 4,
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

#[derive(PartialEq)]
enum GameExit {
    Quit,
    Menu,
}

/// Drive one playthrough (including any in-place restarts) until the user
/// quits or returns to the menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the directional and fire
/// keys still "fresh" (within `HOLD_WINDOW` frames) become the session's
/// intent flags, which the simulation samples exactly once per tick.
/// One-shot actions (pause, restart, menu, quit) act on the press event
/// itself.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    audio: &mut LogSink,
) -> std::io::Result<GameExit> {
    let mut rng = thread_rng();
    let clock = Instant::now();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => {
                            return Ok(GameExit::Quit);
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(GameExit::Quit);
                        }
                        KeyCode::Esc => {
                            audio.play(Sfx::ButtonClick);
                            match session.screen {
                                Screen::Playing => *session = pause_game(session),
                                Screen::Paused => *session = resume_game(session),
                                _ => {}
                            }
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
                            if matches!(session.screen, Screen::Paused | Screen::GameOver) =>
                        {
                            audio.play(Sfx::ButtonClick);
                            *session = start_game(session);
                            audio.play_music(MusicTrack::InGame);
                        }
                        KeyCode::Char('m') | KeyCode::Char('M')
                            if matches!(session.screen, Screen::Paused | Screen::GameOver) =>
                        {
                            audio.play(Sfx::ButtonClick);
                            return Ok(GameExit::Menu);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Sample intent flags once per frame ────────────────────────────────
        session.intent = IntentFlags {
            left: is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame),
            right: is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        // ── Advance the simulation ────────────────────────────────────────────
        if session.screen == Screen::Playing && !session.is_paused {
            let now_ms = clock.elapsed().as_millis() as u64;
            let (next, cues) = tick(session, &mut rng, now_ms);
            for cue in cues {
                audio.play(cue);
            }
            if next.screen == Screen::GameOver {
                info!("game over at score {} (level {})", next.score, next.level);
                save_high_score(next.high_score);
                audio.play_music(MusicTrack::GameOver);
            }
            *session = next;
        }

        let (width, height) = terminal::size()?;
        display::render(out, session, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Logging is best-effort; the game runs fine without a log file.
    let _ = simple_logging::log_to_file(LOG_FILE, LevelFilter::Info);
    info!("starting asteroid_shooter");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("shutting down");
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut audio = LogSink::new();
    let mut high_score = load_high_score();

    loop {
        audio.play_music(MusicTrack::Start);
        match show_menu(out, rx, high_score)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                audio.play(Sfx::ButtonClick);
                let mut session = start_game(&new_session(high_score));
                audio.play_music(MusicTrack::InGame);
                let exit = game_loop(out, &mut session, rx, &mut audio)?;

                // Persist a beaten high score even on a quit mid-game
                if session.high_score.max(session.score) > high_score {
                    high_score = session.high_score.max(session.score);
                    save_high_score(high_score);
                }

                if exit == GameExit::Quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    audio.stop_all();
    Ok(())
}
