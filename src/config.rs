//! Runtime configuration loaded from an optional TOML file.
//!
//! [`GameConfig`] mirrors every constant in [`crate::constants`].  Missing keys
//! fall back to the compile-time defaults, so a minimal TOML can override just
//! the values you care about:
//!
//! ```toml
//! alien_speed = 2.0
//! fire_cooldown_ms = 150
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Playfield ────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_offset: f32,
    pub player_speed: f32,
    pub starting_lives: u32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub bullet_top_margin: f32,
    pub fire_cooldown_ms: u64,

    // ── Formation ────────────────────────────────────────────────────────────
    pub rows: usize,
    pub cols: usize,
    pub alien_width: f32,
    pub alien_height: f32,
    pub padding: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub alien_speed: f32,
    pub step_down: f32,
    pub reward: u32,

    // ── Presentation ─────────────────────────────────────────────────────────
    pub frame_interval_ms: u64,
    /// Optional binary PPM drawn behind the playfield.
    pub background: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,
            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_top_margin: BULLET_TOP_MARGIN,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            rows: FORMATION_ROWS,
            cols: FORMATION_COLS,
            alien_width: ALIEN_WIDTH,
            alien_height: ALIEN_HEIGHT,
            padding: FORMATION_PADDING,
            origin_x: FORMATION_ORIGIN_X,
            origin_y: FORMATION_ORIGIN_Y,
            alien_speed: ALIEN_SPEED,
            step_down: ALIEN_STEP_DOWN,
            reward: ALIEN_REWARD,
            frame_interval_ms: FRAME_INTERVAL_MS,
            background: None,
        }
    }
}

impl GameConfig {
    /// Read `path` and overlay its values on the defaults.
    ///
    /// A missing file is not an error: the defaults are returned as-is.
    pub fn load(path: &Path) -> GameResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file found; using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = Self::from_toml(&contents).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        at_most("width", self.width, MAX_PLAYFIELD_DIM)?;
        at_most("height", self.height, MAX_PLAYFIELD_DIM)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("player_bottom_offset", self.player_bottom_offset)?;
        non_negative("player_speed", self.player_speed)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("bullet_speed", self.bullet_speed)?;
        non_negative("bullet_top_margin", self.bullet_top_margin)?;
        positive("alien_width", self.alien_width)?;
        positive("alien_height", self.alien_height)?;
        non_negative("padding", self.padding)?;
        positive("alien_speed", self.alien_speed)?;
        non_negative("step_down", self.step_down)?;

        if self.player_width > self.width {
            return Err(GameError::InvalidConfig {
                name: "player_width",
                value: self.player_width,
                reason: "wider than the playfield",
            });
        }
        at_most("player_bottom_offset", self.player_bottom_offset, self.height)?;
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig {
                name: "rows/cols",
                value: (self.rows * self.cols) as f32,
                reason: "formation must contain at least one alien",
            });
        }
        let right = self.origin_x + self.formation_width();
        if !self.origin_x.is_finite() || self.origin_x < 0.0 || right > self.width {
            return Err(GameError::InvalidConfig {
                name: "origin_x",
                value: self.origin_x,
                reason: "formation does not fit the playfield horizontally",
            });
        }
        let bottom = self.origin_y + self.formation_height();
        if !self.origin_y.is_finite() || self.origin_y < 0.0 || bottom >= self.player_y() {
            return Err(GameError::InvalidConfig {
                name: "origin_y",
                value: self.origin_y,
                reason: "formation must start above the player",
            });
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidConfig {
                name: "starting_lives",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.fire_cooldown_ms > MAX_FIRE_COOLDOWN_MS {
            return Err(GameError::InvalidConfig {
                name: "fire_cooldown_ms",
                value: self.fire_cooldown_ms as f32,
                reason: "longer than 10 seconds",
            });
        }
        if self.frame_interval_ms == 0 || self.frame_interval_ms > MAX_FRAME_INTERVAL_MS {
            return Err(GameError::InvalidConfig {
                name: "frame_interval_ms",
                value: self.frame_interval_ms as f32,
                reason: "must be between 1 and 1000",
            });
        }
        Ok(())
    }

    /// Total width spanned by the formation at construction time.
    pub fn formation_width(&self) -> f32 {
        self.cols as f32 * (self.alien_width + self.padding) - self.padding
    }

    /// Total height spanned by the formation at construction time.
    pub fn formation_height(&self) -> f32 {
        self.rows as f32 * (self.alien_height + self.padding) - self.padding
    }

    /// Player spawn column: centred horizontally.
    pub fn player_start_x(&self) -> f32 {
        self.width / 2.0 - self.player_width / 2.0
    }

    pub fn player_y(&self) -> f32 {
        self.height - self.player_bottom_offset
    }
}

fn positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            reason: "must be a finite number greater than zero",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            reason: "must be a finite number, zero or more",
        })
    }
}

fn at_most(name: &'static str, value: f32, limit: f32) -> GameResult<()> {
    if value <= limit {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            reason: "too large",
        })
    }
}
