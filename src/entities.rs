//! All game entity types — pure data, no logic.

use crate::config::GameConfig;
use crate::formation::init_formation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every alien was destroyed.
    Won,
    /// Lives ran out, or an alien reached the bottom edge.
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Playing,
    GameOver(Outcome),
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }
}

/// Lateral direction shared by every alien in the formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// +1.0 for right, −1.0 for left.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A player shot.  `(x, y)` is the centre of the circle.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

// ── Player & aliens ───────────────────────────────────────────────────────────

/// `(x, y)` is the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// `(x, y)` is the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state of one session.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Insertion order is spawn order.
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub direction: Direction,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    /// A fresh state for the given config: centred player, full formation,
    /// no bullets.  The status is `Idle`; the session controller flips it.
    pub fn new(config: &GameConfig) -> Self {
        GameState {
            player: Player {
                x: config.player_start_x(),
                y: config.player_y(),
                w: config.player_width,
                h: config.player_height,
            },
            bullets: Vec::new(),
            aliens: init_formation(config),
            direction: Direction::Right,
            score: 0,
            lives: config.starting_lives,
            status: GameStatus::Idle,
            frame: 0,
            width: config.width,
            height: config.height,
        }
    }
}
