//! Session controller: start/restart, key routing, and the frame chain.
//!
//! The [`Session`] is the single owner of the simulation context.  Input
//! handlers only write to the input staging area; [`Session::run_frame`] is
//! the only place the game state advances.

use crate::compute::tick;
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus};
use crate::input::{InputTracker, Key};
use crate::scheduler::{FrameHandle, FrameLoop};

/// Text shown over the playfield while no session is running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub lines: Vec<String>,
    /// Label of the start/restart action.
    pub action: &'static str,
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    state: GameState,
    input: InputTracker,
    frames: FrameLoop,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        let input = InputTracker::new(config.fire_cooldown_ms);
        Session {
            config,
            state,
            input,
            frames: FrameLoop::new(),
        }
    }

    /// Reset everything and begin playing.  Callable from any state; a frame
    /// already pending is superseded rather than doubled.
    pub fn start(&mut self) -> FrameHandle {
        self.state = GameState::new(&self.config);
        self.state.status = GameStatus::Playing;
        self.input.clear();
        tracing::info!(aliens = self.state.aliens.len(), lives = self.state.lives, "session started");
        self.frames.request()
    }

    pub fn key_down(&mut self, key: Key, now_ms: u64) {
        self.input.key_down(
            key,
            self.state.status.is_playing(),
            &self.state.player,
            self.config.bullet_radius,
            now_ms,
        );
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Run the pending frame, if one is scheduled.
    ///
    /// Returns `true` when a tick ran.  While the session keeps playing the
    /// next frame is requested; once it ends nothing is rescheduled.
    pub fn run_frame(&mut self) -> bool {
        if self.frames.take_due().is_none() {
            return false;
        }
        if !self.state.status.is_playing() {
            return false;
        }

        let staged = self.input.take_staged();
        self.state = tick(&self.state, self.input.held(), &staged, &self.config);

        match self.state.status {
            GameStatus::Playing => {
                self.frames.request();
            }
            GameStatus::GameOver(outcome) => {
                self.input.reset_held();
                tracing::info!(
                    ?outcome,
                    score = self.state.score,
                    frames = self.state.frame,
                    "session ended"
                );
            }
            GameStatus::Idle => {}
        }
        true
    }

    /// Stop the session: cancel the pending frame and release held keys.
    pub fn teardown(&mut self) {
        if self.frames.cancel().is_some() {
            tracing::debug!("cancelled pending frame");
        }
        self.input.clear();
        if self.state.status.is_playing() {
            self.state.status = GameStatus::Idle;
        }
    }

    // ── Observers ────────────────────────────────────────────────────────────

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn is_playing(&self) -> bool {
        self.state.status.is_playing()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted setups in tests.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frames.pending()
    }

    /// The start/restart prompt, or `None` while playing.
    pub fn prompt(&self) -> Option<Prompt> {
        match self.state.status {
            GameStatus::Playing => None,
            GameStatus::GameOver(_) => Some(Prompt {
                title: "Game Over",
                lines: vec![format!("Your score: {}", self.state.score)],
                action: "Play Again",
            }),
            GameStatus::Idle => Some(Prompt {
                title: "Space Invader",
                lines: vec![
                    "Move with ◂ ▸ Shoot with SPACE".to_string(),
                    "Destroy all invaders before they reach you.".to_string(),
                ],
                action: "Start",
            }),
        }
    }
}
