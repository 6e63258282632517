//! Input staging: held movement keys and cooldown-limited fire requests.
//!
//! Key handlers never advance the simulation.  They only record which
//! movement keys are down and queue bullets for the next tick to admit.

use crate::entities::{Bullet, Player};

/// The keys the simulation understands.  Front ends map their own key
/// codes onto these and drop everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// Snapshot of the movement keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Debug)]
pub struct InputTracker {
    held: HeldKeys,
    cooldown_ms: u64,
    /// Time of the last accepted fire request; `None` until the first shot.
    last_fire_ms: Option<u64>,
    /// Bullets spawned by accepted fire requests, waiting for the next tick.
    staged: Vec<Bullet>,
}

impl InputTracker {
    pub fn new(cooldown_ms: u64) -> Self {
        InputTracker {
            held: HeldKeys::default(),
            cooldown_ms,
            last_fire_ms: None,
            staged: Vec::new(),
        }
    }

    /// Record a key press.
    ///
    /// Movement presses are ignored unless `playing`.  A fire press while
    /// playing stages one bullet at the player's centre, provided the
    /// cooldown has elapsed since the last accepted shot.
    pub fn key_down(
        &mut self,
        key: Key,
        playing: bool,
        player: &Player,
        bullet_radius: f32,
        now_ms: u64,
    ) {
        if !playing {
            return;
        }
        match key {
            Key::Left => self.held.left = true,
            Key::Right => self.held.right = true,
            Key::Fire => {
                self.try_fire(player, bullet_radius, now_ms);
            }
        }
    }

    /// Record a key release.  Always honoured, so a key let go while no
    /// session is running cannot stay stuck into the next one.
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.held.left = false,
            Key::Right => self.held.right = false,
            Key::Fire => {}
        }
    }

    /// Stage a bullet if the cooldown allows it.  Returns whether it fired.
    pub fn try_fire(&mut self, player: &Player, bullet_radius: f32, now_ms: u64) -> bool {
        if let Some(last) = self.last_fire_ms {
            if now_ms.saturating_sub(last) < self.cooldown_ms {
                return false;
            }
        }
        self.staged.push(Bullet {
            x: player.x + player.w / 2.0,
            y: player.y,
            r: bullet_radius,
        });
        self.last_fire_ms = Some(now_ms);
        true
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    pub fn staged(&self) -> &[Bullet] {
        &self.staged
    }

    /// Hand the staged bullets to the tick, leaving the queue empty.
    pub fn take_staged(&mut self) -> Vec<Bullet> {
        std::mem::take(&mut self.staged)
    }

    pub fn reset_held(&mut self) {
        self.held = HeldKeys::default();
    }

    /// Drop held keys and any bullets that were never admitted.
    pub fn clear(&mut self) {
        self.reset_held();
        self.staged.clear();
    }
}
