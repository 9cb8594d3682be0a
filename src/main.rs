mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use fuel_shooter::compute::{new_session, restart, step};
use fuel_shooter::config::GameConfig;
use fuel_shooter::entities::SessionState;
use fuel_shooter::error::Result;
use fuel_shooter::input::ControlState;

use display::sprites::{SpriteKind, SpriteSet};
use display::Viewport;

#[derive(Parser, Debug)]
#[command(name = "fuel_shooter")]
#[command(about = "Vertical arcade shooter: down planes, grab fuel, don't run dry")]
struct Args {
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for enemy and fuel placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the text-art sprites
    #[arg(long, default_value = "assets/sprites")]
    sprites: PathBuf,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so 150 ms is always refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];

/// Restart keys never overlap `FIRE_KEYS`: auto-repeat of a held fire key
/// must not skip the game-over screen.
fn is_restart(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter)
}

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW`.
fn is_held(last_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|key| {
        last_seen
            .get(key)
            .map(|&seen| now.saturating_duration_since(seen) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Frame driver ──────────────────────────────────────────────────────────────

struct Driver<'a> {
    config: &'a GameConfig,
    session: SessionState,
    controls: ControlState,
    /// Maps each held key → the instant it was last seen (press or repeat).
    last_seen: HashMap<KeyCode, Instant>,
    viewport: Option<Viewport>,
}

impl<'a> Driver<'a> {
    fn new(config: &'a GameConfig, term_w: u16, term_h: u16) -> Self {
        Self {
            config,
            session: new_session(config),
            controls: ControlState::default(),
            last_seen: HashMap::new(),
            viewport: Viewport::fit(term_w, term_h, config.canvas.width, config.canvas.height),
        }
    }

    fn restart(&mut self) {
        restart(&mut self.session, self.config);
        self.controls.clear();
        self.last_seen.clear();
    }

    /// Left edge the player should slide to for a pointer at `column`.
    fn drag_target(&self, column: u16) -> Option<f32> {
        self.viewport
            .as_ref()
            .map(|vp| vp.world_x(column) - self.config.player.width / 2.0)
    }

    /// Fold one terminal event into the control record.  Returns `true` when
    /// the player asked to quit.
    ///
    /// Handlers only write into `controls` (plus the restart transition);
    /// entity state is touched by `step` alone.
    fn handle_event(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => match kind {
                KeyEventKind::Press => {
                    if is_quit(code, modifiers) {
                        return true;
                    }
                    if self.session.is_game_over() {
                        if is_restart(code) {
                            self.restart();
                        }
                        return false;
                    }
                    self.last_seen.insert(code, now);
                }
                KeyEventKind::Repeat => {
                    self.last_seen.insert(code, now);
                }
                KeyEventKind::Release => {
                    self.last_seen.remove(&code);
                }
            },
            Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
                MouseEventKind::Down(MouseButton::Left) if self.session.is_game_over() => {
                    self.restart();
                }
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    if let Some(target) = self.drag_target(column) {
                        self.controls.begin_drag(target);
                    }
                }
                MouseEventKind::Up(MouseButton::Left) => self.controls.end_drag(),
                _ => {}
            },
            Event::Resize(width, height) => {
                self.viewport = Viewport::fit(
                    width,
                    height,
                    self.config.canvas.width,
                    self.config.canvas.height,
                );
                tracing::debug!(width, height, fits = self.viewport.is_some(), "terminal resized");
            }
            _ => {}
        }
        false
    }

    fn refresh_held_keys(&mut self, now: Instant) {
        self.controls.left = is_held(&self.last_seen, &LEFT_KEYS, now);
        self.controls.right = is_held(&self.last_seen, &RIGHT_KEYS, now);
        self.controls.fire = is_held(&self.last_seen, &FIRE_KEYS, now);
    }
}

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep
/// the instant each key was last pressed or repeated and, every frame, treat
/// the "fresh" ones as held.  This lets Space and a direction be held
/// together.  Mouse press/drag/release stands in for touch dragging.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` of silence.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    sprites: &SpriteSet,
    rng: &mut StdRng,
) -> Result<()> {
    let (width, height) = terminal::size()?;
    let mut driver = Driver::new(config, width, height);
    let frame_budget = Duration::from_secs_f64(1.0 / config.frame.fps as f64);
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            if driver.handle_event(event, frame_start) {
                tracing::info!(score = driver.session.score, "player quit");
                return Ok(());
            }
        }
        driver.refresh_held_keys(frame_start);

        // ── Simulate, then draw ───────────────────────────────────────────────
        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;
        if !driver.session.is_game_over() {
            let intent = driver.controls.intent();
            step(&mut driver.session, dt, &intent, rng);
        }

        display::render(out, &driver.session, driver.viewport.as_ref(), sprites)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fuel_shooter=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let sprites = SpriteSet::load(&args.sprites);
    let missing: Vec<SpriteKind> = SpriteKind::ALL
        .into_iter()
        .filter(|kind| !sprites.is_ready(*kind))
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "drawing placeholder boxes");
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting fuel_shooter");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, &sprites, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("game loop failed: {}", e);
    }
    result
}
