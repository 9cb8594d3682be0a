use fuel_shooter::compute::*;
use fuel_shooter::config::GameConfig;
use fuel_shooter::entities::*;
use fuel_shooter::input::{Horizontal, Intent};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default tuning with spawning pushed far into the future, so a test only
/// sees the entities it placed itself.
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawner.enemy_interval = 1000.0;
    config.spawner.fuel_interval = 1000.0;
    config
}

fn make_state() -> SessionState {
    new_session(&quiet_config())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy::new(EnemyKind::Plane, x, y, &GameConfig::default().enemy)
}

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet::new(x, y, &GameConfig::default().bullet)
}

fn pickup_at(x: f32, y: f32) -> FuelPickup {
    FuelPickup::new(x, y, &GameConfig::default().fuel)
}

// ── new_session / restart ─────────────────────────────────────────────────────

#[test]
fn new_session_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 155.0); // 360 / 2 - 50 / 2
    assert_eq!(s.player.y, 540.0); // 640 - 100
    assert_eq!(s.player.fuel, 100.0);
}

#[test]
fn new_session_empty_collections() {
    let s = make_state();
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert!(s.fuel_pickups.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn restart_resets_everything() {
    let config = quiet_config();
    let mut s = new_session(&config);
    s.score = 700;
    s.player.fuel = 3.0;
    s.player.x = 10.0;
    s.enemies.push(enemy_at(10.0, 10.0));
    s.bullets.push(bullet_at(20.0, 20.0));
    s.fuel_pickups.push(pickup_at(30.0, 30.0));
    s.spawner.enemy_timer.elapsed = 1.5;
    s.spawner.fuel_timer.elapsed = 4.0;
    s.status = GameStatus::GameOver(GameOverReason::Collision);
    s.frame = 999;

    restart(&mut s, &config);

    assert_eq!(s.score, 0);
    assert_eq!(s.player.fuel, 100.0);
    assert_eq!(s.player.x, 155.0);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert!(s.fuel_pickups.is_empty());
    assert_eq!(s.spawner.enemy_timer.elapsed, 0.0);
    assert_eq!(s.spawner.fuel_timer.elapsed, 0.0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
}

// ── sanitize_dt ───────────────────────────────────────────────────────────────

#[test]
fn sanitize_dt_rejects_garbage() {
    assert_eq!(sanitize_dt(f32::NAN, 0.1), 0.0);
    assert_eq!(sanitize_dt(f32::INFINITY, 0.1), 0.0);
    assert_eq!(sanitize_dt(-0.5, 0.1), 0.0);
}

#[test]
fn sanitize_dt_clamps_long_frames() {
    assert_eq!(sanitize_dt(3.0, 0.1), 0.1);
    assert_eq!(sanitize_dt(0.05, 0.1), 0.05);
}

#[test]
fn bad_dt_does_not_corrupt_session() {
    let mut s = make_state();
    step(&mut s, f32::NAN, &Intent::idle(), &mut seeded_rng());
    step(&mut s, -1.0, &Intent::right(), &mut seeded_rng());
    assert_eq!(s.player.fuel, 100.0);
    assert_eq!(s.player.x, 155.0);
    assert_eq!(s.score, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── step — player & firing ───────────────────────────────────────────────────

#[test]
fn step_increments_frame() {
    let mut s = make_state();
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert_eq!(s.frame, 1);
}

#[test]
fn step_moves_right_at_speed() {
    let mut s = make_state();
    step(&mut s, 0.1, &Intent::right(), &mut seeded_rng());
    assert!((s.player.x - 175.0).abs() < 1e-3); // 155 + 200 * 0.1
}

#[test]
fn step_clamps_at_left_wall() {
    let mut s = make_state();
    s.player.x = 5.0;
    step(&mut s, 0.1, &Intent::left(), &mut seeded_rng());
    assert_eq!(s.player.x, 0.0);
}

#[test]
fn step_clamps_at_right_wall() {
    let mut s = make_state();
    s.player.x = 305.0;
    step(&mut s, 0.1, &Intent::right(), &mut seeded_rng());
    assert_eq!(s.player.x, 310.0); // 360 - 50
}

#[test]
fn step_drag_eases_toward_target() {
    let mut s = make_state();
    step(&mut s, 0.016, &Intent::drag_to(55.0), &mut seeded_rng());
    assert!(s.player.is_dragging);
    assert!((s.player.x - 145.0).abs() < 1e-3); // 10 % of the 100 px gap
}

#[test]
fn step_drag_snaps_when_close() {
    let mut s = make_state();
    step(&mut s, 0.016, &Intent::drag_to(155.5), &mut seeded_rng());
    assert_eq!(s.player.x, 155.5);
}

#[test]
fn step_keyboard_overrides_drag() {
    let mut s = make_state();
    let intent = Intent {
        horizontal: Horizontal::Left,
        fire: false,
        drag_target: Some(300.0),
    };
    step(&mut s, 0.1, &intent, &mut seeded_rng());
    assert!(!s.player.is_dragging);
    assert!((s.player.x - 135.0).abs() < 1e-3);
}

#[test]
fn step_releasing_drag_stops_player() {
    let mut s = make_state();
    step(&mut s, 0.016, &Intent::drag_to(0.0), &mut seeded_rng());
    let x = s.player.x;
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert!(!s.player.is_dragging);
    assert_eq!(s.player.x, x);
}

#[test]
fn step_fire_spawns_bullet_at_nose() {
    let mut s = make_state();
    step(&mut s, 0.0, &Intent::fire(), &mut seeded_rng());
    assert_eq!(s.bullets.len(), 1);
    let b = &s.bullets[0];
    assert_eq!(b.x, 178.0); // 155 + 25 - 2
    assert_eq!(b.y, 528.0); // 540 - 12
    assert_eq!(b.damage, 1);
}

#[test]
fn step_idle_does_not_fire() {
    let mut s = make_state();
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert!(s.bullets.is_empty());
}

#[test]
fn step_auto_fires_while_moving() {
    let mut s = make_state();
    step(&mut s, 0.016, &Intent::right(), &mut seeded_rng());
    assert_eq!(s.bullets.len(), 1);

    let mut s = make_state();
    step(&mut s, 0.016, &Intent::drag_to(0.0), &mut seeded_rng());
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn step_fire_rate_limited_by_cooldown() {
    // cooldown 0.25 s, frames of 0.1 s: shots on frames 1 and 4
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..3 {
        step(&mut s, 0.1, &Intent::fire(), &mut rng);
    }
    assert_eq!(s.bullets.len(), 1);
    step(&mut s, 0.1, &Intent::fire(), &mut rng);
    assert_eq!(s.bullets.len(), 2);
}

// ── step — enemies ───────────────────────────────────────────────────────────

#[test]
fn step_enemy_descends() {
    let mut s = make_state();
    s.enemies.push(enemy_at(10.0, 100.0));
    step(&mut s, 0.1, &Intent::idle(), &mut seeded_rng());
    assert!((s.enemies[0].y - 115.0).abs() < 1e-3);
    assert_eq!(s.enemies[0].x, 10.0);
}

#[test]
fn step_enemy_removed_below_screen_without_penalty() {
    let mut s = make_state();
    s.score = 300;
    // removed once y > 640 + 50
    s.enemies.push(enemy_at(10.0, 689.0));
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 300);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn step_enemy_collision_ends_game_immediately() {
    let mut s = make_state();
    let mut enemy = enemy_at(155.0, 500.0); // overlaps the player's top 10 px
    enemy.speed = 0.0;
    s.enemies.push(enemy);
    s.bullets.push(bullet_at(10.0, 300.0));

    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());

    assert_eq!(s.status, GameStatus::GameOver(GameOverReason::Collision));
    assert!(s.is_game_over());
    // Later stages never ran
    assert_eq!(s.bullets[0].y, 300.0);
    assert_eq!(s.frame, 0);
}

#[test]
fn scenario_d_touching_enemy_is_not_a_collision() {
    let mut s = make_state();
    // Bottom edge of the enemy exactly on the player's top edge
    let mut above = enemy_at(155.0, 490.0);
    above.speed = 0.0;
    // Left edge of the enemy exactly on the player's right edge
    let mut beside = enemy_at(205.0, 540.0);
    beside.speed = 0.0;
    s.enemies.push(above);
    s.enemies.push(beside);

    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());

    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.enemies.len(), 2);
}

#[test]
fn step_is_noop_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver(GameOverReason::OutOfFuel);
    s.enemies.push(enemy_at(10.0, 100.0));
    step(&mut s, 0.1, &Intent::right(), &mut seeded_rng());
    assert_eq!(s.player.x, 155.0);
    assert_eq!(s.enemies[0].y, 100.0);
    assert_eq!(s.frame, 0);
}

// ── step — bullets ↔ enemies ─────────────────────────────────────────────────

#[test]
fn step_bullet_moves_up() {
    let mut s = make_state();
    s.bullets.push(bullet_at(20.0, 300.0));
    step(&mut s, 0.1, &Intent::idle(), &mut seeded_rng());
    assert!((s.bullets[0].y - 260.0).abs() < 1e-3);
}

#[test]
fn step_bullet_removed_above_screen() {
    let mut s = make_state();
    // y + 12 < 0 after moving 6.4 px up
    s.bullets.push(bullet_at(20.0, -11.0));
    s.bullets.push(bullet_at(40.0, 0.0));
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].x, 40.0);
}

#[test]
fn scenario_b_bullet_damages_enemy() {
    let mut s = make_state();
    let mut enemy = enemy_at(90.0, 40.0);
    enemy.health = 2;
    s.enemies.push(enemy);
    s.bullets.push(bullet_at(100.0, 50.0));

    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());

    assert!(s.bullets.is_empty());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].health, 1);
    assert_eq!(s.score, 0);
}

#[test]
fn scenario_c_kill_scores_100() {
    let mut s = make_state();
    s.enemies.push(enemy_at(90.0, 40.0));
    s.bullets.push(bullet_at(100.0, 50.0));

    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());

    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 100);
}

#[test]
fn step_bullet_hits_at_most_one_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(90.0, 40.0));
    s.enemies.push(enemy_at(95.0, 45.0));
    s.bullets.push(bullet_at(100.0, 50.0));

    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.score, 100);
}

#[test]
fn step_two_bullets_two_kills() {
    let mut s = make_state();
    s.enemies.push(enemy_at(10.0, 40.0));
    s.enemies.push(enemy_at(200.0, 40.0));
    s.bullets.push(bullet_at(20.0, 50.0));
    s.bullets.push(bullet_at(210.0, 50.0));

    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 200);
}

#[test]
fn step_bullet_misses_enemy_outside_box() {
    let mut s = make_state();
    s.enemies.push(enemy_at(90.0, 40.0));
    s.bullets.push(bullet_at(170.0, 50.0)); // enemy spans x 90..160
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.bullets.len(), 1);
}

// ── step — fuel ──────────────────────────────────────────────────────────────

#[test]
fn step_collects_fuel_pickup() {
    let mut s = make_state();
    s.player.fuel = 50.0;
    s.fuel_pickups.push(pickup_at(160.0, 545.0));
    step(&mut s, 0.1, &Intent::idle(), &mut seeded_rng());
    assert!(s.fuel_pickups.is_empty());
    assert!((s.player.fuel - 74.5).abs() < 1e-3); // 50 - 0.5 + 25
}

#[test]
fn step_fuel_pickup_clamps_to_max() {
    let mut s = make_state();
    s.player.fuel = 90.0;
    s.fuel_pickups.push(pickup_at(160.0, 545.0));
    step(&mut s, 0.1, &Intent::idle(), &mut seeded_rng());
    assert_eq!(s.player.fuel, 100.0);
}

#[test]
fn step_fuel_pickup_removed_below_screen() {
    let mut s = make_state();
    s.fuel_pickups.push(pickup_at(10.0, 679.0)); // removed once y > 680
    step(&mut s, 0.016, &Intent::idle(), &mut seeded_rng());
    assert!(s.fuel_pickups.is_empty());
    assert_eq!(s.player.fuel, 100.0 - 5.0 * 0.016);
}

#[test]
fn scenario_a_fuel_runs_out() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    // 100 fuel at 5 fuel/s lasts exactly 20 simulated seconds
    for _ in 0..200 {
        step(&mut s, 0.1, &Intent::idle(), &mut rng);
    }
    assert_eq!(s.player.fuel, 0.0);
    assert_eq!(s.status, GameStatus::GameOver(GameOverReason::OutOfFuel));
}

#[test]
fn step_still_playing_before_fuel_runs_out() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..190 {
        step(&mut s, 0.1, &Intent::idle(), &mut rng);
    }
    assert!(s.player.fuel > 0.0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── step — spawning ──────────────────────────────────────────────────────────

#[test]
fn step_spawns_enemy_after_interval() {
    let mut s = new_session(&GameConfig::default());
    let mut rng = seeded_rng();
    for _ in 0..25 {
        step(&mut s, 0.1, &Intent::idle(), &mut rng);
    }
    assert_eq!(s.enemies.len(), 1);
    assert!(s.fuel_pickups.is_empty());
    let e = &s.enemies[0];
    assert!(e.x >= 0.0 && e.x <= 290.0);
    assert!(e.y > -50.0 && e.y < 100.0);
}

#[test]
fn step_spawns_fuel_after_interval() {
    let mut config = GameConfig::default();
    config.spawner.enemy_interval = 1000.0;
    let mut s = new_session(&config);
    let mut rng = seeded_rng();
    for _ in 0..55 {
        step(&mut s, 0.1, &Intent::idle(), &mut rng);
    }
    assert_eq!(s.fuel_pickups.len(), 1);
    assert!(s.enemies.is_empty());
}

#[test]
fn restart_after_game_over_plays_again() {
    let config = quiet_config();
    let mut s = new_session(&config);
    s.status = GameStatus::GameOver(GameOverReason::OutOfFuel);
    restart(&mut s, &config);
    step(&mut s, 0.1, &Intent::right(), &mut seeded_rng());
    assert_eq!(s.frame, 1);
    assert!(s.player.x > 155.0);
}
