use space_invader::config::GameConfig;
use space_invader::entities::{Alien, GameStatus, Outcome};
use space_invader::formation::init_formation;
use space_invader::input::{HeldKeys, Key};
use space_invader::scheduler::{Clock, ManualClock};
use space_invader::session::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn session() -> Session {
    Session::new(GameConfig::default())
}

fn started() -> Session {
    let mut s = session();
    s.start();
    s
}

// ── Idle ──────────────────────────────────────────────────────────────────────

#[test]
fn new_session_is_idle() {
    let mut s = session();
    assert_eq!(s.status(), GameStatus::Idle);
    assert!(!s.is_playing());
    assert_eq!(s.score(), 0);
    assert_eq!(s.lives(), 3);
    assert!(s.pending_frame().is_none());
    assert!(!s.run_frame());
}

#[test]
fn idle_prompt_invites_to_start() {
    let prompt = session().prompt().expect("prompt while idle");
    assert_eq!(prompt.title, "Space Invader");
    assert_eq!(prompt.action, "Start");
    assert!(prompt.lines.iter().any(|l| l.contains("SPACE")));
}

#[test]
fn keys_before_start_do_nothing() {
    let mut s = session();
    s.key_down(Key::Left, 0);
    s.key_down(Key::Fire, 0);
    assert_eq!(s.input().held(), HeldKeys::default());
    assert!(s.input().staged().is_empty());
}

// ── Start / frames ────────────────────────────────────────────────────────────

#[test]
fn start_begins_playing_and_schedules_a_frame() {
    let s = started();
    assert!(s.is_playing());
    assert!(s.pending_frame().is_some());
    assert!(s.prompt().is_none());
    assert_eq!(s.state().aliens.len(), 32);
}

#[test]
fn each_frame_runs_one_tick_and_reschedules() {
    let mut s = started();
    for n in 1..=10 {
        assert!(s.run_frame());
        assert_eq!(s.state().frame, n);
        assert!(s.pending_frame().is_some());
    }
}

#[test]
fn restarting_keeps_a_single_frame_chain() {
    let mut s = session();
    let first = s.start();
    let second = s.start();
    assert_ne!(first, second);
    assert_eq!(s.pending_frame(), Some(second));

    assert!(s.run_frame());
    assert_eq!(s.state().frame, 1);
    // Exactly one follow-up frame, not two
    assert!(s.run_frame());
    assert_eq!(s.state().frame, 2);
}

#[test]
fn teardown_cancels_the_pending_frame() {
    let mut s = started();
    s.key_down(Key::Right, 0);
    s.teardown();
    assert!(s.pending_frame().is_none());
    assert!(!s.run_frame());
    assert!(!s.is_playing());
    assert_eq!(s.status(), GameStatus::Idle);
    assert_eq!(s.input().held(), HeldKeys::default());
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn three_hundred_idle_ticks() {
    let mut s = started();
    let start_x = s.state().player.x;
    let start_y = s.state().aliens[0].y;

    for _ in 0..300 {
        assert!(s.run_frame());
    }

    assert!(s.is_playing());
    assert_eq!(s.score(), 0);
    assert_eq!(s.lives(), 3);
    assert_eq!(s.state().player.x, start_x);
    // At least one bounce, each worth a 20-unit drop
    let dropped = s.state().aliens[0].y - start_y;
    assert!(dropped >= 20.0);
    assert_eq!(dropped % 20.0, 0.0);
}

#[test]
fn held_key_moves_the_player_each_tick() {
    let mut s = started();
    s.key_down(Key::Left, 0);
    s.run_frame();
    s.run_frame();
    assert_eq!(s.state().player.x, 210.0);
    s.key_up(Key::Left);
    s.run_frame();
    assert_eq!(s.state().player.x, 210.0);
}

#[test]
fn fire_twice_quickly_then_again() {
    let clock = ManualClock::new(0);
    let mut s = started();

    s.key_down(Key::Fire, clock.now_ms());
    clock.set(100);
    s.key_down(Key::Fire, clock.now_ms());
    s.run_frame();
    assert_eq!(s.state().bullets.len(), 1);

    clock.set(260);
    s.key_down(Key::Fire, clock.now_ms());
    s.run_frame();
    assert_eq!(s.state().bullets.len(), 2);
}

#[test]
fn alien_reaching_the_bottom_ends_the_session_that_tick() {
    let mut s = started();
    {
        let state = s.state_mut();
        state.lives = 1;
        // One alien already hanging past the bottom edge
        state.aliens.push(Alien { x: 10.0, y: 625.0, w: 30.0, h: 20.0 });
    }
    assert!(s.run_frame());

    assert_eq!(s.lives(), 0);
    assert_eq!(s.status(), GameStatus::GameOver(Outcome::Lost));
    assert!(!s.state().aliens.is_empty());
    assert!(s.pending_frame().is_none());
    assert!(!s.run_frame());
}

#[test]
fn game_over_prompt_and_restart() {
    let mut s = started();
    s.state_mut().aliens = vec![Alien { x: 100.0, y: 560.0, w: 30.0, h: 20.0 }];
    s.state_mut().player.x = 95.0;
    // Bullet leaves x = 115, y = 600 and climbs 6 per tick into the alien
    s.key_down(Key::Fire, 0);
    for _ in 0..100 {
        if !s.run_frame() {
            break;
        }
    }
    assert_eq!(s.status(), GameStatus::GameOver(Outcome::Won));
    assert_eq!(s.score(), 10);

    let prompt = s.prompt().expect("prompt after game over");
    assert_eq!(prompt.title, "Game Over");
    assert_eq!(prompt.action, "Play Again");
    assert_eq!(prompt.lines, vec!["Your score: 10".to_string()]);

    s.start();
    assert!(s.is_playing());
    assert_eq!(s.score(), 0);
    assert_eq!(s.lives(), 3);
    assert_eq!(s.state().player.x, 220.0);
    assert!(s.state().bullets.is_empty());
    assert_eq!(s.state().aliens, init_formation(s.config()));
}

#[test]
fn keys_held_at_game_over_do_not_leak_into_the_next_session() {
    let mut s = started();
    s.key_down(Key::Right, 0);
    s.state_mut().aliens = vec![Alien { x: 10.0, y: 630.0, w: 30.0, h: 20.0 }];
    s.run_frame();
    assert!(!s.is_playing());
    assert_eq!(s.input().held(), HeldKeys::default());

    s.start();
    s.run_frame();
    assert_eq!(s.state().player.x, 220.0);
}

#[test]
fn score_and_lives_are_monotonic_under_random_play() {
    let mut rng = StdRng::seed_from_u64(1234);
    let clock = ManualClock::new(0);
    let mut s = started();
    let mut last_score = 0;
    let mut last_lives = s.lives();

    for _ in 0..5_000 {
        clock.advance(16);
        match rng.gen_range(0..6) {
            0 => s.key_down(Key::Left, clock.now_ms()),
            1 => s.key_down(Key::Right, clock.now_ms()),
            2 => s.key_up(Key::Left),
            3 => s.key_up(Key::Right),
            _ => s.key_down(Key::Fire, clock.now_ms()),
        }
        if !s.run_frame() {
            break;
        }

        assert!(s.score() >= last_score);
        assert_eq!(s.score() % 10, 0);
        assert!(s.lives() <= last_lives);
        let x = s.state().player.x;
        assert!((0.0..=440.0).contains(&x));
        last_score = s.score();
        last_lives = s.lives();
    }

    let ended = !s.is_playing();
    assert_eq!(ended, s.lives() == 0 || s.state().aliens.is_empty());
}
