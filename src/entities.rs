/// All game entity types: plain data plus trivial accessors, no game logic.

use std::rc::Rc;

use crate::map::TileMap;
use crate::weapon::{Arsenal, Weapon, WeaponKind};

// ── Playfield geometry (pixel space) ─────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 800;
pub const FIELD_HEIGHT: i32 = 600;
pub const TILE_SIZE: i32 = 40;

pub const PLAYER_SIZE: i32 = 40;
/// Pixels per tick on each axis.
pub const PLAYER_SPEED: i32 = 3;
pub const PLAYER_SPAWN: (i32, i32) = (2 * TILE_SIZE, 2 * TILE_SIZE);

/// Pixels per tick along the bullet's heading.
pub const BULLET_SPEED: f64 = 40.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box: `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

// ── Tiles ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Floor,
    Wall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
}

impl Tile {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, TILE_SIZE, TILE_SIZE)
    }

    pub fn is_wall(&self) -> bool {
        self.kind == TileKind::Wall
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left of the player's box.
    pub x: i32,
    pub y: i32,
    /// Position before the most recent movement step.
    pub last_x: i32,
    pub last_y: i32,
}

impl Player {
    pub fn spawn(x: i32, y: i32) -> Self {
        Self { x, y, last_x: x, last_y: y }
    }

    pub fn is_moving(&self) -> bool {
        self.x != self.last_x || self.y != self.last_y
    }

    /// Centre of the box; bullets leave from here.
    pub fn aim_origin(&self) -> (f64, f64) {
        (
            f64::from(self.x + PLAYER_SIZE / 2),
            f64::from(self.y + PLAYER_SIZE / 2),
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A bullet travelling in a straight line.  Positions are floats so any
/// heading stays smooth.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    /// Velocity added every tick.
    pub dx: f64,
    pub dy: f64,
}

// ── Screens & menu ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Title,
    Menu,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Options,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::Options, MenuItem::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Options => "Options",
            MenuItem::Exit => "Exit",
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// What the player is holding down this tick.  Written by the input layer,
/// read by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub primary_fire: bool,
    pub secondary_fire: bool,
    /// Mouse position in playfield pixels.
    pub aim_x: f64,
    pub aim_y: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The single owning context for a session.  Cloneable so pure update
/// functions can return a new copy without mutating the original; the tile
/// map is shared read-only between copies.
#[derive(Clone, Debug)]
pub struct EntireGameStateInfo {
    pub screen: Screen,
    /// Index into `MenuItem::ALL`.
    pub menu_selection: usize,
    pub map: Rc<TileMap>,
    pub player: Player,
    pub arsenal: Arsenal,
    pub current_weapon: WeaponKind,
    /// Set while a weapon change is in progress.
    pub switch_started_at: Option<u64>,
    pub bullets: Vec<Bullet>,
    /// Recoil cone half-angle in degrees for single shots.
    pub spread: f64,
    /// Whether the secondary trigger was held on the previous tick.
    pub was_spraying: bool,
    pub input: InputState,
    pub frame: u64,
    pub width: i32,
    pub height: i32,
}

impl EntireGameStateInfo {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_switching_weapon(&self) -> bool {
        self.switch_started_at.is_some()
    }

    pub fn weapon(&self) -> &Weapon {
        &self.arsenal[self.current_weapon]
    }

    pub fn selected_menu_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_selection % MenuItem::ALL.len()]
    }
}
