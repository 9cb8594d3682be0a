//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session.  No game logic is performed; this module only maps world
//! rectangles onto terminal cells and queues the matching commands.

pub mod sprites;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use fuel_shooter::entities::{EnemyKind, GameOverReason, GameStatus, SessionState};
use fuel_shooter::geometry::{Bounded, Rect};

use sprites::{Sprite, SpriteKind, SpriteSet};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY_PLANE: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_FUEL_TANK: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// A terminal cell is roughly twice as tall as it is wide.
const CELL_ASPECT: f32 = 2.0;

/// Smallest field worth drawing, in cells.
const MIN_FIELD_COLS: u16 = 12;
const MIN_FIELD_ROWS: u16 = 8;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Where the play field sits in the terminal and how world pixels map onto
/// cells.  The field keeps the world's aspect ratio and is centred
/// horizontally; row 0 is the HUD and the border wraps the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// First interior column / row of the field.
    pub left: u16,
    pub top: u16,
    /// Interior size in cells.
    pub cols: u16,
    pub rows: u16,
    /// Cells per world pixel.
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Viewport {
    /// Fit a `world_w`×`world_h` field into a `term_w`×`term_h` terminal.
    /// Returns `None` when the terminal is too small to play in.
    pub fn fit(term_w: u16, term_h: u16, world_w: f32, world_h: f32) -> Option<Self> {
        // One column each side for the border; HUD, top border, bottom
        // border and hint line take four rows.
        let avail_cols = term_w.saturating_sub(2) as f32;
        let avail_rows = term_h.saturating_sub(4) as f32;
        let aspect = world_w / world_h;

        let mut width = avail_cols;
        let mut height = width / aspect;
        if height > avail_rows * CELL_ASPECT {
            height = avail_rows * CELL_ASPECT;
            width = height * aspect;
        }

        let cols = width.floor() as u16;
        let rows = (height / CELL_ASPECT).floor() as u16;
        if cols < MIN_FIELD_COLS || rows < MIN_FIELD_ROWS {
            return None;
        }

        Some(Self {
            left: 1 + (term_w.saturating_sub(2) - cols) / 2,
            top: 2,
            cols,
            rows,
            scale_x: cols as f32 / world_w,
            scale_y: rows as f32 / world_h,
        })
    }

    /// World x at the centre of a terminal column.
    pub fn world_x(&self, column: u16) -> f32 {
        let local = column as f32 - self.left as f32 + 0.5;
        local.clamp(0.0, self.cols as f32) / self.scale_x
    }

    /// Interior cell span `(col0, row0, col1, row1)` (end-exclusive) covered
    /// by `rect`, clipped to the field.  `None` when nothing is visible.
    pub fn cell_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = (rect.x * self.scale_x).floor() as i32;
        let r0 = (rect.y * self.scale_y).floor() as i32;
        let c1 = ((rect.x + rect.width) * self.scale_x).ceil() as i32;
        let r1 = ((rect.y + rect.height) * self.scale_y).ceil() as i32;

        let c0 = c0.clamp(0, self.cols as i32);
        let r0 = r0.clamp(0, self.rows as i32);
        let c1 = c1.clamp(0, self.cols as i32);
        let r1 = r1.clamp(0, self.rows as i32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &SessionState,
    viewport: Option<&Viewport>,
    sprites: &SpriteSet,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let Some(vp) = viewport else {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print("Terminal too small, enlarge the window"))?;
        out.queue(style::ResetColor)?;
        out.flush()?;
        return Ok(());
    };

    draw_border(out, vp)?;
    draw_hud(out, state, vp)?;

    for pickup in &state.fuel_pickups {
        draw_entity(out, vp, &pickup.bounds(), sprites.get(SpriteKind::FuelTank), C_FUEL_TANK)?;
    }
    for enemy in &state.enemies {
        let kind = match enemy.kind {
            EnemyKind::Plane => SpriteKind::EnemyPlane,
        };
        draw_entity(out, vp, &enemy.bounds(), sprites.get(kind), C_ENEMY_PLANE)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, vp, &bullet.bounds())?;
    }
    draw_entity(
        out,
        vp,
        &state.player.bounds(),
        sprites.get(SpriteKind::Player),
        C_PLAYER,
    )?;

    draw_controls_hint(out, vp)?;

    if let GameStatus::GameOver(reason) = state.status {
        draw_game_over(out, state, vp, reason)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.top + vp.rows + 1))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let left = vp.left - 1;
    let right = vp.left + vp.cols;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(left, vp.top - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(left, vp.top + vp.rows))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in vp.top..vp.top + vp.rows {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &SessionState, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(vp.left, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    let fuel = state.player.fuel_display();
    let ratio = state.player.fuel / state.player.max_fuel;
    let fuel_color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };
    let fuel_text = format!("Fuel: {}", fuel);
    let rx = (vp.left + vp.cols).saturating_sub(fuel_text.chars().count() as u16);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(fuel_color))?;
    out.queue(Print(&fuel_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw a sprite stretched over the entity's cells, or a solid placeholder
/// box when the sprite is not available.
fn draw_entity<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    sprite: Option<&Sprite>,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = vp.cell_span(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;

    // Rows clipped off the top still count when sampling the sprite, so a
    // plane sliding in shows its tail first.
    let full_rows = ((rect.height * vp.scale_y).ceil() as u16).max(1);
    let full_cols = ((rect.width * vp.scale_x).ceil() as u16).max(1);
    let first_row = (rect.y * vp.scale_y).floor() as i32;

    for row in r0..r1 {
        let line: String = match sprite {
            Some(sprite) => {
                let local_row = (row as i32 - first_row).max(0) as u16;
                (c0..c1)
                    .map(|col| {
                        let local_col = col - c0;
                        sprite.sample(local_row, local_col, full_rows, full_cols)
                    })
                    .collect()
            }
            None => "▒".repeat((c1 - c0) as usize),
        };
        out.queue(cursor::MoveTo(vp.left + c0, vp.top + row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, vp: &Viewport, rect: &Rect) -> std::io::Result<()> {
    let Some((c0, r0, _, r1)) = vp.cell_span(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_BULLET))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(vp.left + c0, vp.top + row))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

// ── Controls hint (below the field) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(vp.left, vp.top + vp.rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D / drag : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &SessionState,
    vp: &Viewport,
    reason: GameOverReason,
) -> std::io::Result<()> {
    let cause = match reason {
        GameOverReason::Collision => "Shot down by an enemy plane",
        GameOverReason::OutOfFuel => "Ran out of fuel",
    };
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (cause, Color::White),
        (&score_line, Color::Yellow),
        ("Click / R - Restart  Q - Quit", Color::White),
    ];

    let cx = vp.left + vp.cols / 2;
    let start_row = (vp.top + vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
