//! Alien formation: construction and the per-tick sweep.

use crate::config::GameConfig;
use crate::entities::{Alien, Direction};

/// Build the alien grid row by row, left to right.
///
/// Deterministic: every call with the same config yields the same grid.
pub fn init_formation(config: &GameConfig) -> Vec<Alien> {
    let mut aliens = Vec::with_capacity(config.rows * config.cols);
    for r in 0..config.rows {
        for c in 0..config.cols {
            aliens.push(Alien {
                x: config.origin_x + c as f32 * (config.alien_width + config.padding),
                y: config.origin_y + r as f32 * (config.alien_height + config.padding),
                w: config.alien_width,
                h: config.alien_height,
            });
        }
    }
    aliens
}

/// Result of one formation update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sweep {
    /// Direction to use on the next tick.
    pub direction: Direction,
    /// True when the formation bounced (and stepped down) this tick.
    pub stepped_down: bool,
}

/// Advance every alien sideways, then bounce off the walls.
///
/// The bounce test uses post-move positions: if the leftmost edge is left of
/// 0 or the rightmost edge is right of `width`, the direction flips and every
/// alien drops by `step_down` in this same tick.
pub fn advance_formation(aliens: &mut [Alien], direction: Direction, config: &GameConfig) -> Sweep {
    if aliens.is_empty() {
        return Sweep { direction, stepped_down: false };
    }

    let dx = direction.sign() * config.alien_speed;
    for alien in aliens.iter_mut() {
        alien.x += dx;
    }

    let left_most = aliens.iter().map(|a| a.x).fold(f32::INFINITY, f32::min);
    let right_most = aliens
        .iter()
        .map(|a| a.x + a.w)
        .fold(f32::NEG_INFINITY, f32::max);

    if left_most < 0.0 || right_most > config.width {
        for alien in aliens.iter_mut() {
            alien.y += config.step_down;
        }
        let direction = direction.flipped();
        tracing::debug!(?direction, left_most, right_most, "formation bounced");
        Sweep { direction, stepped_down: true }
    } else {
        Sweep { direction, stepped_down: false }
    }
}
