//! The per-frame simulation step.
//!
//! `step` mutates the session in a fixed order: player, firing, enemies,
//! bullets, fuel tanks, spawning, fuel check.  Each stage walks its own
//! collection once.  The only side effect outside the session is the
//! injected RNG used by the spawner.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{GameOverReason, GameStatus, Player, SessionState};
use crate::geometry::{overlaps, Bounded, Movable};
use crate::input::{Horizontal, Intent};
use crate::spawner::Spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: centred player, full tank, empty field, timers at
/// zero.
pub fn new_session(config: &GameConfig) -> SessionState {
    SessionState {
        player: Player::new(&config.player, config.bullet, config.canvas),
        enemies: Vec::new(),
        bullets: Vec::new(),
        fuel_pickups: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        spawner: Spawner::new(&config.spawner, config.enemy, config.fuel),
        width: config.canvas.width,
        height: config.canvas.height,
        max_dt: config.frame.max_dt,
        frame: 0,
    }
}

/// Replace the session with a brand-new one.
pub fn restart(session: &mut SessionState, config: &GameConfig) {
    info!(score = session.score, frames = session.frame, "restarting session");
    *session = new_session(config);
}

/// NaN, infinite and negative steps become zero; long stalls are cut to
/// `max_dt`.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the session by `dt` seconds.  Does nothing once the game is
/// over.
pub fn step(session: &mut SessionState, dt: f32, intent: &Intent, rng: &mut impl Rng) {
    if session.is_game_over() {
        return;
    }
    let dt = sanitize_dt(dt, session.max_dt);

    // ── 1. Player ────────────────────────────────────────────────────────────
    apply_intent(&mut session.player, intent);
    session.player.update(dt);

    // ── 2. Firing: explicit fire, or auto-fire while moving ─────────────────
    if intent.fire || session.player.is_moving() {
        if let Some(bullet) = session.player.shoot() {
            session.bullets.push(bullet);
        }
    }

    // ── 3. Enemies ───────────────────────────────────────────────────────────
    let height = session.height;
    for enemy in &mut session.enemies {
        enemy.advance(dt);
    }
    session.enemies.retain(|enemy| !enemy.bounds().is_below(height));
    if session
        .enemies
        .iter()
        .any(|enemy| overlaps(&session.player, enemy))
    {
        end_game(session, GameOverReason::Collision);
        return;
    }

    // ── 4. Bullets ↔ enemies ─────────────────────────────────────────────────
    let mut bullets = std::mem::take(&mut session.bullets);
    let enemies = &mut session.enemies;
    let score = &mut session.score;
    bullets.retain_mut(|bullet| {
        bullet.advance(dt);
        if bullet.bounds().is_above_top() {
            return false;
        }
        let Some(hit) = enemies.iter().position(|enemy| overlaps(&*bullet, enemy)) else {
            return true;
        };
        if enemies[hit].apply_damage(bullet.damage) {
            let destroyed = enemies.remove(hit);
            *score += destroyed.score_value;
            debug!(score = *score, "enemy destroyed");
        }
        false
    });
    session.bullets = bullets;

    // ── 5. Fuel tanks ────────────────────────────────────────────────────────
    let player = &mut session.player;
    session.fuel_pickups.retain_mut(|pickup| {
        pickup.advance(dt);
        if pickup.bounds().is_below(height) {
            return false;
        }
        if overlaps(&*player, &*pickup) {
            player.collect_fuel(pickup.amount);
            debug!(fuel = player.fuel, "fuel collected");
            return false;
        }
        true
    });

    // ── 6. Spawning ──────────────────────────────────────────────────────────
    let spawned = session.spawner.tick(dt, session.width, rng);
    if let Some(enemy) = spawned.enemy {
        debug!(x = enemy.x, "enemy spawned");
        session.enemies.push(enemy);
    }
    if let Some(pickup) = spawned.fuel_pickup {
        debug!(x = pickup.x, "fuel tank spawned");
        session.fuel_pickups.push(pickup);
    }

    // ── 7. Fuel check ────────────────────────────────────────────────────────
    if session.player.fuel <= 0.0 {
        end_game(session, GameOverReason::OutOfFuel);
    }

    session.frame += 1;
}

/// Keyboard direction overrides any drag; with no direction held the player
/// either follows the drag target or stands still.
fn apply_intent(player: &mut Player, intent: &Intent) {
    match intent.horizontal {
        Horizontal::Left => {
            player.velocity_x = -player.speed;
            player.is_dragging = false;
        }
        Horizontal::Right => {
            player.velocity_x = player.speed;
            player.is_dragging = false;
        }
        Horizontal::None => {
            player.velocity_x = 0.0;
            match intent.drag_target {
                Some(target_x) => {
                    player.is_dragging = true;
                    player.target_x = target_x;
                }
                None => player.is_dragging = false,
            }
        }
    }
}

fn end_game(session: &mut SessionState, reason: GameOverReason) {
    info!(?reason, score = session.score, frames = session.frame, "game over");
    session.status = GameStatus::GameOver(reason);
}
