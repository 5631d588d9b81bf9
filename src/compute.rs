/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `EntireGameStateInfo` (plus, where needed, the current time in
/// milliseconds and an RNG handle) and returns a brand-new
/// `EntireGameStateInfo`.  Side effects are limited to the injected RNG and
/// log output.

use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::entities::{
    Bullet, EntireGameStateInfo, InputState, MenuItem, Player, Rect, Screen, BULLET_SPEED,
    FIELD_HEIGHT, FIELD_WIDTH, PLAYER_SIZE, PLAYER_SPAWN, PLAYER_SPEED,
};
use crate::input::Command;
use crate::map::TileMap;
use crate::weapon::{Arsenal, WeaponKind, BURST_OFFSETS_DEG};

// ── Recoil tuning (degrees) ───────────────────────────────────────────────────

/// Spread a steady player settles to.
pub const SPREAD_MIN: f64 = 1.0;
/// Spread while moving or spraying.
pub const SPREAD_MAX: f64 = 6.0;
/// Recovery per idle tick.
pub const SPREAD_DECAY: f64 = 0.25;
/// Per-bullet burst jitter before the steadiness multiplier.
pub const BURST_JITTER_DEG: f64 = 1.5;
/// Jitter multiplier when moving or holding the spray trigger through bursts.
pub const BURST_JITTER_UNSTEADY: f64 = 3.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state of a session on the given map.
pub fn init_state(map: Rc<TileMap>, screen: Screen) -> EntireGameStateInfo {
    let (x, y) = PLAYER_SPAWN;
    EntireGameStateInfo {
        screen,
        menu_selection: 0,
        map,
        player: Player::spawn(x, y),
        arsenal: Arsenal::new(),
        current_weapon: WeaponKind::Primary,
        switch_started_at: None,
        bullets: Vec::new(),
        spread: SPREAD_MIN,
        was_spraying: false,
        input: InputState::default(),
        frame: 0,
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
    }
}

// ── Screen transitions (pure) ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// Apply a one-shot input command.  Commands that make no sense on the
/// current screen are ignored.
pub fn apply_command(
    state: &EntireGameStateInfo,
    command: Command,
    now: u64,
) -> (EntireGameStateInfo, Transition) {
    use Transition::Continue;

    match (state.screen, command) {
        (_, Command::Quit) => (state.clone(), Transition::Quit),
        (Screen::Title, Command::Confirm) => (show_screen(state, Screen::Menu), Continue),
        (Screen::Menu, Command::MenuUp) => (step_menu(state, MenuItem::ALL.len() - 1), Continue),
        (Screen::Menu, Command::MenuDown) => (step_menu(state, 1), Continue),
        (Screen::Menu, Command::Confirm) => activate_menu_item(state, state.selected_menu_item()),
        (Screen::Menu, Command::Activate(item)) => activate_menu_item(state, item),
        (Screen::Playing, Command::Back) => (show_screen(state, Screen::Menu), Continue),
        (Screen::Playing, Command::Reload) => (request_reload(state, now), Continue),
        (Screen::Playing, Command::Select(kind)) => (select_weapon(state, kind, now), Continue),
        _ => (state.clone(), Continue),
    }
}

fn show_screen(state: &EntireGameStateInfo, screen: Screen) -> EntireGameStateInfo {
    info!(from = ?state.screen, to = ?screen, "screen change");
    EntireGameStateInfo {
        screen,
        input: InputState::default(),
        ..state.clone()
    }
}

fn step_menu(state: &EntireGameStateInfo, by: usize) -> EntireGameStateInfo {
    EntireGameStateInfo {
        menu_selection: (state.menu_selection + by) % MenuItem::ALL.len(),
        ..state.clone()
    }
}

pub fn activate_menu_item(
    state: &EntireGameStateInfo,
    item: MenuItem,
) -> (EntireGameStateInfo, Transition) {
    match item {
        MenuItem::Play => (show_screen(state, Screen::Playing), Transition::Continue),
        MenuItem::Options => {
            debug!("options menu has no entries yet");
            (state.clone(), Transition::Continue)
        }
        MenuItem::Exit => (state.clone(), Transition::Quit),
    }
}

// ── Weapon commands (pure) ───────────────────────────────────────────────────

/// Start equipping `kind`.  Ignored while another switch is pending or when
/// `kind` is already in hand.
pub fn select_weapon(state: &EntireGameStateInfo, kind: WeaponKind, now: u64) -> EntireGameStateInfo {
    if state.is_switching_weapon() || kind == state.current_weapon {
        return state.clone();
    }
    debug!(from = state.weapon().name(), to = state.arsenal[kind].name(), "switching weapon");
    EntireGameStateInfo {
        current_weapon: kind,
        switch_started_at: Some(now),
        ..state.clone()
    }
}

/// Manual reload of the weapon in hand.
pub fn request_reload(state: &EntireGameStateInfo, now: u64) -> EntireGameStateInfo {
    if state.is_switching_weapon() {
        return state.clone();
    }
    let mut next = state.clone();
    let kind = next.current_weapon;
    if next.arsenal[kind].start_reload(now) {
        debug!(weapon = next.arsenal[kind].name(), "reload started");
    }
    next
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Would the player's box at (`x`, `y`) overlap a wall?
pub fn collides_with_wall(map: &TileMap, x: i32, y: i32) -> bool {
    map.hits_wall(&Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE))
}

/// One movement step.  Each axis is tested on its own, horizontal first, so
/// the player slides along a wall instead of sticking to it.
pub fn move_player(player: &Player, input: &InputState, map: &TileMap) -> Player {
    let mut dx = 0;
    let mut dy = 0;
    if input.left {
        dx -= PLAYER_SPEED;
    }
    if input.right {
        dx += PLAYER_SPEED;
    }
    if input.up {
        dy -= PLAYER_SPEED;
    }
    if input.down {
        dy += PLAYER_SPEED;
    }

    let mut x = player.x;
    let mut y = player.y;
    if !collides_with_wall(map, x + dx, y) {
        x += dx;
    }
    if !collides_with_wall(map, x, y + dy) {
        y += dy;
    }

    Player {
        x,
        y,
        last_x: player.x,
        last_y: player.y,
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// A bullet leaving `origin` towards `target`, turned by `offset_deg`.
pub fn bullet_toward(origin: (f64, f64), target: (f64, f64), offset_deg: f64) -> Bullet {
    let angle = (target.1 - origin.1).atan2(target.0 - origin.0) + offset_deg.to_radians();
    Bullet {
        x: origin.0,
        y: origin.1,
        dx: angle.cos() * BULLET_SPEED,
        dy: angle.sin() * BULLET_SPEED,
    }
}

pub fn is_off_screen(bullet: &Bullet, width: i32, height: i32) -> bool {
    bullet.x < 0.0 || bullet.x > f64::from(width) || bullet.y < 0.0 || bullet.y > f64::from(height)
}

/// Move every bullet one tick and drop the ones that left the playfield.
pub fn advance_bullets(bullets: &[Bullet], width: i32, height: i32) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| Bullet {
            x: b.x + b.dx,
            y: b.y + b.dy,
            ..b.clone()
        })
        .filter(|b| !is_off_screen(b, width, height))
        .collect()
}

// ── Recoil ───────────────────────────────────────────────────────────────────

pub fn next_spread(spread: f64, moving: bool, spraying: bool) -> f64 {
    if moving || spraying {
        SPREAD_MAX
    } else {
        (spread - SPREAD_DECAY).max(SPREAD_MIN)
    }
}

// ── Per-tick update (RNG is injected) ───────────────────────────────────

/// Advance the simulation by one fixed step.  Only the Playing screen
/// simulates; on other screens the state comes back unchanged.
pub fn tick(state: &EntireGameStateInfo, now: u64, rng: &mut impl Rng) -> EntireGameStateInfo {
    if state.screen != Screen::Playing {
        return state.clone();
    }

    let input = &state.input;
    let mut next = state.clone();
    next.frame += 1;
    let kind = next.current_weapon;

    // ── 1. Finish a pending weapon switch ────────────────────────────────────
    if let Some(started) = next.switch_started_at {
        if now.saturating_sub(started) >= next.arsenal[kind].equip_time_ms() {
            next.switch_started_at = None;
            debug!(weapon = next.arsenal[kind].name(), "weapon ready");
        }
    }
    let weapon_ready = !next.is_switching_weapon();

    // ── 2. Reload progress ───────────────────────────────────────────────────
    if weapon_ready && next.arsenal[kind].update_reload(now) {
        let weapon = &next.arsenal[kind];
        debug!(
            weapon = weapon.name(),
            mag = weapon.bullets_in_mag(),
            reserve = weapon.reserve_ammo(),
            "reload complete"
        );
    }

    // ── 3. Movement ──────────────────────────────────────────────────────────
    next.player = move_player(&state.player, input, &next.map);
    let moving = next.player.is_moving();

    // ── 4. Fire / spray, 5. auto-reload ──────────────────────────────────────
    if weapon_ready {
        let origin = next.player.aim_origin();
        let target = (input.aim_x, input.aim_y);
        let weapon = &mut next.arsenal[kind];

        if input.primary_fire {
            if weapon.fire(now) {
                let offset = rng.gen_range(-state.spread..=state.spread);
                next.bullets.push(bullet_toward(origin, target, offset));
                trace!(weapon = weapon.name(), mag = weapon.bullets_in_mag(), "shot");
            }
        } else if input.secondary_fire && weapon.burst(now) {
            let unsteady = moving || state.was_spraying;
            let scale = if unsteady { BURST_JITTER_UNSTEADY } else { 1.0 };
            for base in BURST_OFFSETS_DEG {
                let jitter = rng.gen_range(-BURST_JITTER_DEG..=BURST_JITTER_DEG) * scale;
                next.bullets.push(bullet_toward(origin, target, base + jitter));
            }
            trace!(weapon = weapon.name(), mag = weapon.bullets_in_mag(), unsteady, "burst");
        }

        if weapon.should_auto_reload() && weapon.start_reload(now) {
            debug!(weapon = weapon.name(), reserve = weapon.reserve_ammo(), "auto reload");
        }
    }

    // ── 6. Bullets ───────────────────────────────────────────────────────────
    next.bullets = advance_bullets(&next.bullets, next.width, next.height);

    // ── 7. Recoil ────────────────────────────────────────────────────────────
    next.spread = next_spread(state.spread, moving, input.secondary_fire);
    next.was_spraying = input.secondary_fire;

    next
}
