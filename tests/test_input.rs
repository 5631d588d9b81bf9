use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use arena_shooter::entities::MenuItem;
use arena_shooter::input::*;
use arena_shooter::weapon::WeaponKind;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

// ── key commands ──────────────────────────────────────────────────────────────

#[test]
fn number_keys_select_weapons() {
    let none = KeyModifiers::NONE;
    assert_eq!(key_command(KeyCode::Char('1'), none), Some(Command::Select(WeaponKind::Primary)));
    assert_eq!(key_command(KeyCode::Char('2'), none), Some(Command::Select(WeaponKind::Secondary)));
    assert_eq!(key_command(KeyCode::Char('3'), none), Some(Command::Select(WeaponKind::Melee)));
}

#[test]
fn quit_and_screen_keys() {
    let none = KeyModifiers::NONE;
    assert_eq!(key_command(KeyCode::Char('q'), none), Some(Command::Quit));
    assert_eq!(key_command(KeyCode::Char('Q'), none), Some(Command::Quit));
    assert_eq!(key_command(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit));
    assert_eq!(key_command(KeyCode::Enter, none), Some(Command::Confirm));
    assert_eq!(key_command(KeyCode::Esc, none), Some(Command::Back));
    assert_eq!(key_command(KeyCode::Char('r'), none), Some(Command::Reload));
}

#[test]
fn plain_c_does_nothing() {
    assert_eq!(key_command(KeyCode::Char('c'), KeyModifiers::NONE), None);
}

// ── held keys ─────────────────────────────────────────────────────────────────

#[test]
fn pressed_key_is_held_within_window() {
    let mut m = InputMapper::new();
    m.handle_event(&press(KeyCode::Char('d')), 1_000);
    assert!(m.snapshot(1_000).right);
    assert!(m.snapshot(1_000 + HOLD_WINDOW_MS).right);
    assert!(!m.snapshot(1_001 + HOLD_WINDOW_MS).right);
}

#[test]
fn repeat_refreshes_hold() {
    let mut m = InputMapper::new();
    m.handle_event(&press(KeyCode::Char('w')), 0);
    m.handle_event(&key(KeyCode::Char('w'), KeyEventKind::Repeat), 100);
    assert!(m.snapshot(200).up);
}

#[test]
fn release_drops_key_immediately() {
    let mut m = InputMapper::new();
    m.handle_event(&press(KeyCode::Char('a')), 0);
    m.handle_event(&key(KeyCode::Char('a'), KeyEventKind::Release), 10);
    assert!(!m.snapshot(10).left);
}

#[test]
fn shifted_letters_count_as_held() {
    let mut m = InputMapper::new();
    m.handle_event(&press(KeyCode::Char('S')), 0);
    assert!(m.snapshot(0).down);
}

#[test]
fn arrows_and_wasd_combine() {
    let mut m = InputMapper::new();
    m.handle_event(&press(KeyCode::Up), 0);
    m.handle_event(&press(KeyCode::Char('d')), 0);
    let s = m.snapshot(0);
    assert!(s.up && s.right);
    assert!(!s.down && !s.left);
}

// ── mouse ─────────────────────────────────────────────────────────────────────

#[test]
fn mouse_buttons_map_to_triggers() {
    let mut m = InputMapper::new();
    m.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), 0);
    m.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 10, 10), 0);
    let s = m.snapshot(0);
    assert!(s.primary_fire && s.secondary_fire);

    m.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 10), 0);
    let s = m.snapshot(0);
    assert!(!s.primary_fire && s.secondary_fire);
}

#[test]
fn left_click_reports_cell() {
    let mut m = InputMapper::new();
    let cmd = m.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 7, 9), 0);
    assert_eq!(cmd, Some(Command::Click { column: 7, row: 9 }));
}

#[test]
fn mouse_motion_moves_aim() {
    let mut m = InputMapper::new();
    m.handle_event(&mouse(MouseEventKind::Moved, 40, 17), 0);
    let s = m.snapshot(0);
    assert_eq!((s.aim_x, s.aim_y), cell_to_field(40, 17));
    assert_eq!((s.aim_x, s.aim_y), (405.0, 310.0));
}

#[test]
fn cell_centres_map_into_pixels() {
    // First playfield row sits below the HUD
    assert_eq!(cell_to_field(0, HUD_ROWS), (5.0, 10.0));
    assert_eq!(cell_to_field(79, HUD_ROWS + 29), (795.0, 590.0));
}

#[test]
fn release_all_clears_triggers_and_keys() {
    let mut m = InputMapper::new();
    m.handle_event(&press(KeyCode::Char('a')), 0);
    m.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), 0);
    m.release_all();
    let s = m.snapshot(0);
    assert!(!s.left && !s.primary_fire);
    // Aim survives
    assert_eq!((s.aim_x, s.aim_y), cell_to_field(10, 10));
}

#[test]
fn menu_items_are_commands() {
    assert_ne!(Command::Activate(MenuItem::Play), Command::Activate(MenuItem::Exit));
}
