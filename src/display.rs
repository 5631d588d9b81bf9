/// Rendering layer.  All terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The simulation runs in pixel space, and
/// every cell covers `CELL_WIDTH_PX` × `CELL_HEIGHT_PX` pixels of it.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{
    Bullet, EntireGameStateInfo, MenuItem, Screen, TileKind, FIELD_HEIGHT, FIELD_WIDTH,
    PLAYER_SIZE, TILE_SIZE,
};
use crate::input::{CELL_HEIGHT_PX, CELL_WIDTH_PX, HUD_ROWS};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::Grey;
const C_FLOOR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_BULLET: Color = Color::Yellow;
const C_CROSSHAIR: Color = Color::Red;
const C_HUD: Color = Color::White;
const C_HUD_STATUS: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE_BG: Color = Color::Rgb { r: 30, g: 30, b: 30 };
const C_INSTRUCTION: Color = Color::Rgb { r: 200, g: 200, b: 200 };
const C_BUTTON: Color = Color::DarkGrey;
const C_BUTTON_SELECTED: Color = Color::Cyan;

const FIELD_COLS: u16 = (FIELD_WIDTH / CELL_WIDTH_PX) as u16;
const FIELD_ROWS: u16 = (FIELD_HEIGHT / CELL_HEIGHT_PX) as u16;

const MENU_BUTTON_WIDTH: u16 = 20;
const MENU_BUTTON_HEIGHT: u16 = 3;
const MENU_BUTTON_SPACING: u16 = 4;

/// Smallest terminal (columns, rows) the arena fits in: HUD, playfield and
/// the controls hint.
pub const fn required_size() -> (u16, u16) {
    (FIELD_COLS, HUD_ROWS + FIELD_ROWS + 1)
}

/// Per-frame facts that are not part of the game state.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub cols: u16,
    pub rows: u16,
    /// `(fps, tps)` when the rate overlay is on.
    pub rates: Option<(u32, u32)>,
    /// Game clock at render time, for countdowns.
    pub now_ms: u64,
}

// ── Menu layout (shared with click hit-testing) ───────────────────────────────

/// Terminal cell box of the `index`th menu button: (column, row, width, height).
pub fn menu_button_rect(index: usize, cols: u16, rows: u16) -> (u16, u16, u16, u16) {
    let col = (cols / 2).saturating_sub(MENU_BUTTON_WIDTH / 2);
    let row = (rows / 2).saturating_sub(4) + index as u16 * MENU_BUTTON_SPACING;
    (col, row, MENU_BUTTON_WIDTH, MENU_BUTTON_HEIGHT)
}

/// The menu button under a terminal cell, if any.
pub fn menu_item_at(column: u16, row: u16, cols: u16, rows: u16) -> Option<MenuItem> {
    MenuItem::ALL.iter().enumerate().find_map(|(i, item)| {
        let (x, y, w, h) = menu_button_rect(i, cols, rows);
        let inside = column >= x && column < x + w && row >= y && row < y + h;
        inside.then_some(*item)
    })
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &EntireGameStateInfo, view: &View) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen() {
        Screen::Title => draw_title(out, view)?,
        Screen::Menu => draw_menu(out, state, view)?,
        Screen::Playing => {
            draw_map(out, state)?;
            for bullet in &state.bullets {
                draw_bullet(out, bullet)?;
            }
            draw_player(out, state)?;
            draw_crosshair(out, state)?;
            draw_hud(out, state, view)?;
            draw_controls_hint(out)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn centered<W: Write>(out: &mut W, cols: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Title & menu ──────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, view: &View) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_TITLE_BG))?;
    let blank = " ".repeat(view.cols as usize);
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }

    centered(out, view.cols, view.rows / 3, "M Y   S H O O T E R   G A M E", Color::White)?;
    centered(out, view.cols, view.rows / 2 + 5, "Press Enter to Start", C_INSTRUCTION)?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, state: &EntireGameStateInfo, view: &View) -> std::io::Result<()> {
    let (_, first_row, _, _) = menu_button_rect(0, view.cols, view.rows);
    centered(out, view.cols, first_row.saturating_sub(3), "Main Menu", Color::White)?;

    let selected = state.selected_menu_item();
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let (col, row, w, _) = menu_button_rect(i, view.cols, view.rows);
        let color = if *item == selected { C_BUTTON_SELECTED } else { C_BUTTON };
        let inner = w.saturating_sub(2) as usize;

        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
        out.queue(cursor::MoveTo(col, row + 1))?;
        out.queue(Print(format!("│{:^inner$}│", item.label())))?;
        out.queue(cursor::MoveTo(col, row + 2))?;
        out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    }

    let (_, last_row, _, h) = menu_button_rect(MenuItem::ALL.len() - 1, view.cols, view.rows);
    centered(
        out,
        view.cols,
        last_row + h + 1,
        "↑ ↓ / W S : Select   ENTER / Click : Choose   Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

// ── Arena ─────────────────────────────────────────────────────────────────────

fn draw_map<W: Write>(out: &mut W, state: &EntireGameStateInfo) -> std::io::Result<()> {
    // Each row is printed as colour runs so the terminal sees few commands.
    for cell_row in 0..FIELD_ROWS {
        out.queue(cursor::MoveTo(0, HUD_ROWS + cell_row))?;
        let tile_row = (i32::from(cell_row) * CELL_HEIGHT_PX / TILE_SIZE) as usize;

        let mut current: Option<TileKind> = None;
        let mut run = String::new();
        for cell_col in 0..FIELD_COLS {
            let tile_col = (i32::from(cell_col) * CELL_WIDTH_PX / TILE_SIZE) as usize;
            let kind = state
                .map
                .get(tile_col, tile_row)
                .map_or(TileKind::Floor, |t| t.kind);
            if current != Some(kind) {
                flush_run(out, current, &run)?;
                run.clear();
                current = Some(kind);
            }
            run.push(match kind {
                TileKind::Wall => '█',
                TileKind::Floor => '·',
            });
        }
        flush_run(out, current, &run)?;
    }
    Ok(())
}

fn flush_run<W: Write>(out: &mut W, kind: Option<TileKind>, run: &str) -> std::io::Result<()> {
    let Some(kind) = kind else {
        return Ok(());
    };
    let color = match kind {
        TileKind::Wall => C_WALL,
        TileKind::Floor => C_FLOOR,
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(run))?;
    Ok(())
}

/// Terminal cell of a playfield point, if it lies on the playfield.
fn field_cell(x: f64, y: f64) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x as i32 / CELL_WIDTH_PX) as u16;
    let row = (y as i32 / CELL_HEIGHT_PX) as u16;
    (col < FIELD_COLS && row < FIELD_ROWS).then_some((col, row + HUD_ROWS))
}

fn draw_player<W: Write>(out: &mut W, state: &EntireGameStateInfo) -> std::io::Result<()> {
    let p = &state.player;
    let width = (PLAYER_SIZE / CELL_WIDTH_PX) as usize;
    let height = PLAYER_SIZE / CELL_HEIGHT_PX;
    let Some((col, row)) = field_cell(f64::from(p.x), f64::from(p.y)) else {
        return Ok(());
    };

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    for dy in 0..height as u16 {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print("█".repeat(width)))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet) -> std::io::Result<()> {
    if let Some((col, row)) = field_cell(bullet.x, bullet.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

fn draw_crosshair<W: Write>(out: &mut W, state: &EntireGameStateInfo) -> std::io::Result<()> {
    if let Some((col, row)) = field_cell(state.input.aim_x, state.input.aim_y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_CROSSHAIR))?;
        out.queue(Print("+"))?;
    }
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

/// The HUD lines for the weapon in hand: name/ammo, then a status line.
pub fn hud_lines(state: &EntireGameStateInfo, now: u64) -> (String, Option<String>) {
    let weapon = state.weapon();
    let ammo_line = if weapon.uses_ammo() {
        format!(
            "Weapon: {}   Ammo: {} / {}",
            weapon.name(),
            weapon.bullets_in_mag(),
            weapon.reserve_ammo()
        )
    } else {
        format!("Weapon: {}", weapon.name())
    };

    let status = if state.is_switching_weapon() {
        Some("Switching weapon...".to_string())
    } else {
        weapon
            .reload_remaining_ms(now)
            .map(|ms| format!("Reloading... {}.{}s", ms / 1000, ms % 1000 / 100))
    };
    (ammo_line, status)
}

fn draw_hud<W: Write>(out: &mut W, state: &EntireGameStateInfo, view: &View) -> std::io::Result<()> {
    let (ammo_line, status) = hud_lines(state, view.now_ms);

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&ammo_line))?;

    if let Some(status) = status {
        out.queue(cursor::MoveTo(1, 1))?;
        out.queue(style::SetForegroundColor(C_HUD_STATUS))?;
        out.queue(Print(&status))?;
    }

    if let Some((fps, tps)) = view.rates {
        let rates = format!("{fps} fps  {tps} tps");
        let col = view.cols.saturating_sub(rates.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(rates))?;
    }
    Ok(())
}

// ── Controls hint (row below the playfield) ───────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, HUD_ROWS + FIELD_ROWS))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD Move  LMB Fire  RMB Spray  R Reload  1/2/3 Weapon  ESC Menu  Q Quit",
    ))?;
    Ok(())
}
