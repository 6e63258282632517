//! Gameplay constants.
//!
//! Every tuneable value lives here and is mirrored by [`crate::config::GameConfig`],
//! which uses these as its defaults.  Speeds are in playfield units per tick.

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Logical width of the playfield.
pub const PLAYFIELD_WIDTH: f32 = 480.0;

/// Logical height of the playfield.
pub const PLAYFIELD_HEIGHT: f32 = 640.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 20.0;

/// Distance between the player's top edge and the playfield bottom.
pub const PLAYER_BOTTOM_OFFSET: f32 = 40.0;

/// Horizontal distance covered per tick while a movement key is held.
pub const PLAYER_SPEED: f32 = 5.0;

pub const STARTING_LIVES: u32 = 3;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_RADIUS: f32 = 4.0;

/// Upward distance per tick.
pub const BULLET_SPEED: f32 = 6.0;

/// Bullets are kept until their centre rises above `-BULLET_TOP_MARGIN`.
pub const BULLET_TOP_MARGIN: f32 = 10.0;

/// Minimum time between two accepted fire requests.  250 ms ≈ 4 shots/sec.
pub const FIRE_COOLDOWN_MS: u64 = 250;

// ── Formation ─────────────────────────────────────────────────────────────────

pub const FORMATION_ROWS: usize = 4;
pub const FORMATION_COLS: usize = 8;
pub const ALIEN_WIDTH: f32 = 30.0;
pub const ALIEN_HEIGHT: f32 = 20.0;
pub const FORMATION_PADDING: f32 = 10.0;
pub const FORMATION_ORIGIN_X: f32 = 40.0;
pub const FORMATION_ORIGIN_Y: f32 = 60.0;

/// Lateral distance per tick, multiplied by the formation direction.
pub const ALIEN_SPEED: f32 = 1.2;

/// Downward step applied to every alien on a wall bounce.
pub const ALIEN_STEP_DOWN: f32 = 20.0;

/// Score awarded per alien destroyed.
pub const ALIEN_REWARD: u32 = 10;

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Target interval between ticks (≈60 Hz).
pub const FRAME_INTERVAL_MS: u64 = 16;

// ── Config limits ─────────────────────────────────────────────────────────────

/// Largest playfield edge a config may ask for; keeps the framebuffer small.
pub const MAX_PLAYFIELD_DIM: f32 = 4096.0;

/// A longer cooldown would make firing useless.
pub const MAX_FIRE_COOLDOWN_MS: u64 = 10_000;

pub const MAX_FRAME_INTERVAL_MS: u64 = 1_000;
