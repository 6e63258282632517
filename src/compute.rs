//! Pure game-logic functions.
//!
//! [`tick`] takes an immutable reference to the current `GameState` plus the
//! staged input and returns a brand-new `GameState`.  Removal during the hit
//! scans is mark-then-compact: indices are collected first and every
//! collection is filtered once afterwards, so nothing is skipped.

use crate::collision::collide;
use crate::config::GameConfig;
use crate::entities::{Bullet, GameState, GameStatus, Outcome, Player};
use crate::formation::advance_formation;
use crate::input::HeldKeys;

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply the held movement keys, clamped to `[0, width - player.w]`.
///
/// Holding both keys cancels out.
pub fn move_player(player: &Player, held: HeldKeys, config: &GameConfig) -> Player {
    let max_x = (config.width - player.w).max(0.0);
    let mut x = player.x;
    if held.left {
        x -= config.player_speed;
    }
    if held.right {
        x += config.player_speed;
    }
    Player {
        x: x.clamp(0.0, max_x),
        ..player.clone()
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Move every bullet up and drop the ones that left through the top.
pub fn advance_bullets(bullets: &[Bullet], config: &GameConfig) -> Vec<Bullet> {
    bullets
        .iter()
        .filter_map(|b| {
            let y = b.y - config.bullet_speed;
            if y > -config.bullet_top_margin {
                Some(Bullet { y, ..b.clone() })
            } else {
                None
            }
        })
        .collect()
}

/// Pairs hit in one bullet/alien pass, as `(bullet index, alien index)`.
///
/// Bullet-major, alien-minor.  A bullet stops at its first hit and an alien
/// can only be claimed once, so every hit consumes exactly one of each.
pub fn bullet_hits(state: &GameState) -> Vec<(usize, usize)> {
    let mut claimed = vec![false; state.aliens.len()];
    let mut hits = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        for (ai, alien) in state.aliens.iter().enumerate() {
            if claimed[ai] {
                continue;
            }
            if collide(bullet, alien) {
                claimed[ai] = true;
                hits.push((bi, ai));
                break;
            }
        }
    }
    hits
}

fn retain_unmarked<T>(items: Vec<T>, marked: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(marked)
        .filter(|(_, gone)| !**gone)
        .map(|(item, _)| item)
        .collect()
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// `staged` holds bullets spawned by fire requests since the last tick; they
/// join the bullet list before it moves.  A state that is not `Playing` is
/// returned unchanged.
pub fn tick(state: &GameState, held: HeldKeys, staged: &[Bullet], config: &GameConfig) -> GameState {
    if !state.status.is_playing() {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    next.player = move_player(&state.player, held, config);

    // ── 2. Formation ─────────────────────────────────────────────────────────
    let sweep = advance_formation(&mut next.aliens, state.direction, config);
    next.direction = sweep.direction;

    // ── 3. Bullets ───────────────────────────────────────────────────────────
    next.bullets.extend_from_slice(staged);
    next.bullets = advance_bullets(&next.bullets, config);

    // ── 4. Bullets ↔ aliens ──────────────────────────────────────────────────
    let hits = bullet_hits(&next);
    if !hits.is_empty() {
        let mut spent = vec![false; next.bullets.len()];
        let mut killed = vec![false; next.aliens.len()];
        for &(bi, ai) in &hits {
            spent[bi] = true;
            killed[ai] = true;
        }
        next.bullets = retain_unmarked(next.bullets, &spent);
        next.aliens = retain_unmarked(next.aliens, &killed);
        next.score += hits.len() as u32 * config.reward;
    }

    // ── 5. Aliens ↔ player, aliens ↔ bottom edge ─────────────────────────────
    // Both checks read the alien where it stands, so an alien that touches
    // the player on the floor costs a life and still ends the game.
    let mut removed = vec![false; next.aliens.len()];
    let mut reached_bottom = false;
    for (ai, alien) in next.aliens.iter().enumerate() {
        if collide(alien, &next.player) {
            next.lives = next.lives.saturating_sub(1);
            removed[ai] = true;
        }
        if alien.y + alien.h >= next.height {
            reached_bottom = true;
        }
    }
    if reached_bottom {
        next.lives = 0;
    }

    // ── 6. Purge ─────────────────────────────────────────────────────────────
    for (ai, alien) in next.aliens.iter().enumerate() {
        if alien.y >= next.height {
            removed[ai] = true;
        }
    }
    next.aliens = retain_unmarked(next.aliens, &removed);

    // ── 7. Continuation ──────────────────────────────────────────────────────
    next.status = continuation(next.lives, next.aliens.len());
    next
}

/// `Playing` while lives remain and at least one alien is left.
pub fn continuation(lives: u32, aliens_left: usize) -> GameStatus {
    match (lives, aliens_left) {
        (0, _) => GameStatus::GameOver(Outcome::Lost),
        (_, 0) => GameStatus::GameOver(Outcome::Won),
        _ => GameStatus::Playing,
    }
}
