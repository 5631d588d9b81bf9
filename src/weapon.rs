/// Per-weapon ammo state machine.
///
/// Every timing check takes the current time in milliseconds as an argument,
/// so callers decide where time comes from (see `clock`).  Actions whose
/// preconditions fail are silent no-ops and report `false`.

use std::ops::{Index, IndexMut};

/// Minimum time between two spray bursts.
pub const SPRAY_INTERVAL_MS: u64 = 1500;
/// Rounds a burst takes out of the magazine.
pub const BURST_COST: u32 = 3;
/// Heading offsets of the five burst bullets, in degrees.
pub const BURST_OFFSETS_DEG: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Primary,
    Secondary,
    Melee,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Primary, WeaponKind::Secondary, WeaponKind::Melee];

    pub const fn index(self) -> usize {
        match self {
            WeaponKind::Primary => 0,
            WeaponKind::Secondary => 1,
            WeaponKind::Melee => 2,
        }
    }

    pub const fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::Primary => WeaponStats {
                name: "VANDAL",
                mag_capacity: 30,
                reserve_capacity: 60,
                fire_interval_ms: 114, // ~8.75 rounds/sec
                spray_interval_ms: None,
                equip_time_ms: 1000,
                reload_time_ms: 2500,
            },
            WeaponKind::Secondary => WeaponStats {
                name: "PISTOL",
                mag_capacity: 12,
                reserve_capacity: 36,
                fire_interval_ms: 300,
                spray_interval_ms: Some(SPRAY_INTERVAL_MS),
                equip_time_ms: 750,
                reload_time_ms: 1750,
            },
            WeaponKind::Melee => WeaponStats {
                name: "KNIFE",
                mag_capacity: 0,
                reserve_capacity: 0,
                fire_interval_ms: 400,
                spray_interval_ms: None,
                equip_time_ms: 500,
                reload_time_ms: 0,
            },
        }
    }
}

/// Fixed numbers that describe a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponStats {
    pub name: &'static str,
    pub mag_capacity: u32,
    pub reserve_capacity: u32,
    pub fire_interval_ms: u64,
    /// `None` for weapons that cannot spray.
    pub spray_interval_ms: Option<u64>,
    pub equip_time_ms: u64,
    pub reload_time_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    kind: WeaponKind,
    stats: WeaponStats,
    bullets_in_mag: u32,
    reserve_ammo: u32,
    last_fired_at: Option<u64>,
    reload_started_at: Option<u64>,
    spray_cooldown_started_at: Option<u64>,
    is_reloading: bool,
}

/// `true` when `interval` ms have passed since `since`, or it never happened.
fn elapsed(since: Option<u64>, now: u64, interval: u64) -> bool {
    since.map_or(true, |t| now.saturating_sub(t) >= interval)
}

impl Weapon {
    /// A freshly issued weapon with a full magazine and full reserve.
    pub fn new(kind: WeaponKind) -> Self {
        Self::with_stats(kind, kind.stats())
    }

    pub fn with_stats(kind: WeaponKind, stats: WeaponStats) -> Self {
        Self {
            kind,
            stats,
            bullets_in_mag: stats.mag_capacity,
            reserve_ammo: stats.reserve_capacity,
            last_fired_at: None,
            reload_started_at: None,
            spray_cooldown_started_at: None,
            is_reloading: false,
        }
    }

    /// Replace the ammo counts, clamped to the weapon's capacities.
    pub fn with_ammo(mut self, bullets_in_mag: u32, reserve_ammo: u32) -> Self {
        self.bullets_in_mag = bullets_in_mag.min(self.stats.mag_capacity);
        self.reserve_ammo = reserve_ammo.min(self.stats.reserve_capacity);
        self
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn name(&self) -> &'static str {
        self.stats.name
    }

    pub fn bullets_in_mag(&self) -> u32 {
        self.bullets_in_mag
    }

    pub fn reserve_ammo(&self) -> u32 {
        self.reserve_ammo
    }

    pub fn total_ammo(&self) -> u32 {
        self.bullets_in_mag + self.reserve_ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.is_reloading
    }

    pub fn uses_ammo(&self) -> bool {
        self.stats.mag_capacity > 0
    }

    pub fn equip_time_ms(&self) -> u64 {
        self.stats.equip_time_ms
    }

    // ── Firing ────────────────────────────────────────────────────────────────

    pub fn can_fire(&self, now: u64) -> bool {
        !self.is_reloading
            && self.bullets_in_mag > 0
            && elapsed(self.last_fired_at, now, self.stats.fire_interval_ms)
    }

    /// Spend one round.  The caller spawns the bullet when this returns `true`.
    pub fn fire(&mut self, now: u64) -> bool {
        if !self.can_fire(now) {
            return false;
        }
        self.bullets_in_mag -= 1;
        self.last_fired_at = Some(now);
        true
    }

    pub fn can_burst(&self, now: u64) -> bool {
        let Some(interval) = self.stats.spray_interval_ms else {
            return false;
        };
        !self.is_reloading
            && self.bullets_in_mag >= BURST_COST
            && elapsed(self.spray_cooldown_started_at, now, interval)
    }

    /// Spend `BURST_COST` rounds.  The caller spawns one bullet per entry in
    /// `BURST_OFFSETS_DEG` when this returns `true`.
    pub fn burst(&mut self, now: u64) -> bool {
        if !self.can_burst(now) {
            return false;
        }
        self.bullets_in_mag -= BURST_COST;
        self.last_fired_at = Some(now);
        self.spray_cooldown_started_at = Some(now);
        true
    }

    // ── Reloading ─────────────────────────────────────────────────────────────

    pub fn should_auto_reload(&self) -> bool {
        self.uses_ammo() && self.bullets_in_mag == 0 && self.reserve_ammo > 0
    }

    pub fn can_reload(&self) -> bool {
        !self.is_reloading && self.reserve_ammo > 0 && self.bullets_in_mag < self.stats.mag_capacity
    }

    pub fn start_reload(&mut self, now: u64) -> bool {
        if !self.can_reload() {
            return false;
        }
        self.is_reloading = true;
        self.reload_started_at = Some(now);
        true
    }

    /// Finish a reload whose timer has run out.  Returns `true` on the call
    /// that moves ammo from reserve into the magazine.
    pub fn update_reload(&mut self, now: u64) -> bool {
        if !self.is_reloading || !elapsed(self.reload_started_at, now, self.stats.reload_time_ms) {
            return false;
        }
        let needed = self.stats.mag_capacity - self.bullets_in_mag;
        let moved = needed.min(self.reserve_ammo);
        self.bullets_in_mag += moved;
        self.reserve_ammo -= moved;
        self.is_reloading = false;
        true
    }

    /// Milliseconds left on the current reload, if one is running.
    pub fn reload_remaining_ms(&self, now: u64) -> Option<u64> {
        if !self.is_reloading {
            return None;
        }
        let started = self.reload_started_at?;
        Some(
            self.stats
                .reload_time_ms
                .saturating_sub(now.saturating_sub(started)),
        )
    }
}

// ── Arsenal ───────────────────────────────────────────────────────────────────

/// One weapon per kind, indexed by `WeaponKind`.
#[derive(Clone, Debug, PartialEq)]
pub struct Arsenal {
    weapons: [Weapon; 3],
}

impl Arsenal {
    pub fn new() -> Self {
        Self {
            weapons: WeaponKind::ALL.map(Weapon::new),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }
}

impl Default for Arsenal {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<WeaponKind> for Arsenal {
    type Output = Weapon;

    fn index(&self, kind: WeaponKind) -> &Weapon {
        &self.weapons[kind.index()]
    }
}

impl IndexMut<WeaponKind> for Arsenal {
    fn index_mut(&mut self, kind: WeaponKind) -> &mut Weapon {
        &mut self.weapons[kind.index()]
    }
}
