/// Terminal input → game input.
///
/// Key model: instead of acting on each key event individually, the mapper
/// records the time of the last press/repeat event for every key.  Each tick
/// we check which keys are still "fresh" (within `HOLD_WINDOW_MS`) and apply
/// all their effects simultaneously, so W + D + mouse fire work together.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW_MS` of silence, which
///   is longer than the OS repeat interval, so a key stays live while it is
///   actively generating repeats.
///
/// Mouse buttons report proper down/up events everywhere, so they are plain
/// flags.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::entities::{InputState, MenuItem};
use crate::weapon::WeaponKind;

/// A key counts as held if its last press/repeat arrived this recently.
pub const HOLD_WINDOW_MS: u64 = 150;

/// Playfield pixels covered by one terminal cell.
pub const CELL_WIDTH_PX: i32 = 10;
pub const CELL_HEIGHT_PX: i32 = 20;
/// Terminal rows above the playfield (HUD).
pub const HUD_ROWS: u16 = 2;

/// One-shot actions produced by key presses and clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Enter: leave the title, or activate the highlighted menu item.
    Confirm,
    MenuUp,
    MenuDown,
    Activate(MenuItem),
    /// Leave the arena for the menu.
    Back,
    Reload,
    Select(WeaponKind),
    /// Left click at a terminal cell; the caller maps it onto menu buttons.
    Click { column: u16, row: u16 },
}

/// Centre of a terminal cell, in playfield pixels.
pub fn cell_to_field(column: u16, row: u16) -> (f64, f64) {
    let x = i32::from(column) * CELL_WIDTH_PX + CELL_WIDTH_PX / 2;
    let y = (i32::from(row) - i32::from(HUD_ROWS)) * CELL_HEIGHT_PX + CELL_HEIGHT_PX / 2;
    (f64::from(x), f64::from(y))
}

/// Letters are tracked case-insensitively so Shift doesn't drop a held key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// One-shot command bound to a key press, if any.
pub fn key_command(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match normalize(code) {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Back),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Up | KeyCode::Char('w') => Some(Command::MenuUp),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::MenuDown),
        KeyCode::Char('r') => Some(Command::Reload),
        KeyCode::Char('1') => Some(Command::Select(WeaponKind::Primary)),
        KeyCode::Char('2') => Some(Command::Select(WeaponKind::Secondary)),
        KeyCode::Char('3') => Some(Command::Select(WeaponKind::Melee)),
        _ => None,
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputMapper {
    /// Each held key → the time (ms) it was last seen (press or repeat).
    key_seen: HashMap<KeyCode, u64>,
    primary_down: bool,
    secondary_down: bool,
    aim: (f64, f64),
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal event.  Returns the one-shot command it triggers.
    pub fn handle_event(&mut self, event: &Event, now: u64) -> Option<Command> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: u64) -> Option<Command> {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.key_seen.insert(code, now);
                key_command(key.code, key.modifiers)
            }
            KeyEventKind::Repeat => {
                self.key_seen.insert(code, now);
                None
            }
            KeyEventKind::Release => {
                self.key_seen.remove(&code);
                None
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<Command> {
        self.aim = cell_to_field(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.primary_down = true;
                Some(Command::Click {
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.secondary_down = true;
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.primary_down = false;
                None
            }
            MouseEventKind::Up(MouseButton::Right) => {
                self.secondary_down = false;
                None
            }
            _ => None,
        }
    }

    pub fn is_held(&self, code: KeyCode, now: u64) -> bool {
        self.key_seen
            .get(&normalize(code))
            .map(|&last| now.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode], now: u64) -> bool {
        codes.iter().any(|&c| self.is_held(c, now))
    }

    /// What is held right now.
    pub fn snapshot(&self, now: u64) -> InputState {
        InputState {
            up: self.any_held(&[KeyCode::Char('w'), KeyCode::Up], now),
            down: self.any_held(&[KeyCode::Char('s'), KeyCode::Down], now),
            left: self.any_held(&[KeyCode::Char('a'), KeyCode::Left], now),
            right: self.any_held(&[KeyCode::Char('d'), KeyCode::Right], now),
            primary_fire: self.primary_down,
            secondary_fire: self.secondary_down,
            aim_x: self.aim.0,
            aim_y: self.aim.1,
        }
    }

    /// Forget held keys and buttons (e.g. when leaving the arena).  The aim
    /// point is kept.
    pub fn release_all(&mut self) {
        self.key_seen.clear();
        self.primary_down = false;
        self.secondary_down = false;
    }
}
