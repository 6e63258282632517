//! Maps terminal key events onto game input signals.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events → keys are released on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  A movement key is released once its last press is
//!   older than `HOLD_WINDOW` frames, which is shorter than the OS repeat
//!   interval, so the key stays held while it is actively generating repeats.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use space_invader::input::Key;

/// Frames of silence after which a repeating key counts as released on
/// terminals that never report releases.  4 frames @ 60 FPS ≈ 67 ms.
const HOLD_WINDOW: u64 = 4;

/// The OS waits longer before the first auto-repeat than between repeats.
/// ≈ 500 ms @ 60 FPS.
const FIRST_REPEAT_WINDOW: u64 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Down(Key),
    Up(Key),
    /// Start or restart the session.
    Start,
    Quit,
}

fn game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
struct Hold {
    last_seen: u64,
    repeated: bool,
}

#[derive(Debug)]
pub struct KeyRelay {
    /// Release events are synthesised when the terminal cannot report them.
    synthesize_release: bool,
    held: HashMap<Key, Hold>,
}

impl KeyRelay {
    pub fn new(synthesize_release: bool) -> Self {
        KeyRelay {
            synthesize_release,
            held: HashMap::new(),
        }
    }

    /// Translate one terminal key event.
    pub fn translate(&mut self, event: KeyEvent, frame: u64) -> Option<Action> {
        let KeyEvent { code, kind, modifiers, .. } = event;

        if kind != KeyEventKind::Release {
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Action::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Action::Quit);
                }
                KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                    return Some(Action::Start);
                }
                _ => {}
            }
        }

        let key = game_key(code)?;
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let repeated = self.held.contains_key(&key) || kind == KeyEventKind::Repeat;
                self.held.insert(key, Hold { last_seen: frame, repeated });
                Some(Action::Down(key))
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                Some(Action::Up(key))
            }
        }
    }

    /// Release keys that went quiet, on terminals without release events.
    pub fn expire(&mut self, frame: u64) -> Vec<Action> {
        if !self.synthesize_release {
            return Vec::new();
        }
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, hold)| {
                let window = if hold.repeated { HOLD_WINDOW } else { FIRST_REPEAT_WINDOW };
                frame.saturating_sub(hold.last_seen) > window
            })
            .map(|(&key, _)| key)
            .collect();
        for key in &stale {
            self.held.remove(key);
        }
        stale.into_iter().map(Action::Up).collect()
    }

    /// Release everything still held.
    pub fn release_all(&mut self) -> Vec<Action> {
        self.held.drain().map(|(key, _)| Action::Up(key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn arrows_and_letters_map_to_the_same_key() {
        let mut relay = KeyRelay::new(false);
        assert_eq!(
            relay.translate(event(KeyCode::Left, KeyEventKind::Press), 0),
            Some(Action::Down(Key::Left))
        );
        assert_eq!(
            relay.translate(event(KeyCode::Char('d'), KeyEventKind::Press), 0),
            Some(Action::Down(Key::Right))
        );
        assert_eq!(
            relay.translate(event(KeyCode::Char(' '), KeyEventKind::Press), 0),
            Some(Action::Down(Key::Fire))
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut relay = KeyRelay::new(false);
        assert_eq!(relay.translate(event(KeyCode::Char('x'), KeyEventKind::Press), 0), None);
        assert_eq!(relay.translate(event(KeyCode::F(5), KeyEventKind::Release), 0), None);
    }

    #[test]
    fn release_event_releases() {
        let mut relay = KeyRelay::new(false);
        relay.translate(event(KeyCode::Right, KeyEventKind::Press), 0);
        assert_eq!(
            relay.translate(event(KeyCode::Right, KeyEventKind::Release), 1),
            Some(Action::Up(Key::Right))
        );
    }

    #[test]
    fn quiet_key_expires_only_when_synthesising() {
        let mut relay = KeyRelay::new(true);
        relay.translate(event(KeyCode::Left, KeyEventKind::Press), 0);
        relay.translate(event(KeyCode::Left, KeyEventKind::Press), 30);
        assert!(relay.expire(30 + HOLD_WINDOW).is_empty());
        assert_eq!(relay.expire(31 + HOLD_WINDOW), vec![Action::Up(Key::Left)]);

        let mut native = KeyRelay::new(false);
        native.translate(event(KeyCode::Left, KeyEventKind::Press), 0);
        assert!(native.expire(1000).is_empty());
    }

    #[test]
    fn first_press_waits_for_the_os_repeat_delay() {
        let mut relay = KeyRelay::new(true);
        relay.translate(event(KeyCode::Left, KeyEventKind::Press), 0);
        assert!(relay.expire(HOLD_WINDOW + 1).is_empty());
        assert_eq!(relay.expire(FIRST_REPEAT_WINDOW + 1), vec![Action::Up(Key::Left)]);
    }

    #[test]
    fn start_and_quit() {
        let mut relay = KeyRelay::new(false);
        assert_eq!(relay.translate(event(KeyCode::Enter, KeyEventKind::Press), 0), Some(Action::Start));
        assert_eq!(relay.translate(event(KeyCode::Esc, KeyEventKind::Press), 0), Some(Action::Quit));
    }
}
