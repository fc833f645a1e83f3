//! Progression state and the events the engine emits.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// Click count at which the game is won and the counter freezes.
pub const WIN_CLICKS: u64 = 1_000_000;

/// How many recent click timestamps the timed-pattern window keeps.
pub const CLICK_WINDOW_CAPACITY: usize = 20;

/// Multiplier gained for every level crossed.
pub const LEVEL_UP_BONUS: f64 = 0.5;

/// Minimum gap between logins for the daily achievement (24h).
pub const DAILY_LOGIN_SECONDS: f64 = 24.0 * 60.0 * 60.0;

/// Theme every new game starts with.
pub const DEFAULT_THEME_ID: &str = "default";

/// Per-player progress. Catalog definitions live in the registries; this only
/// records what has been unlocked.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub clicks: u64,
    /// Always >= 1.
    pub level: u32,
    /// Always >= 1.0. Truncated to get the per-click value.
    pub multiplier: f64,
    pub unlocked_achievement_ids: BTreeSet<String>,
    pub unlocked_theme_ids: BTreeSet<String>,
    pub selected_theme_id: String,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            clicks: 0,
            level: 1,
            multiplier: 1.0,
            unlocked_achievement_ids: BTreeSet::new(),
            unlocked_theme_ids: BTreeSet::from([DEFAULT_THEME_ID.to_string()]),
            selected_theme_id: DEFAULT_THEME_ID.to_string(),
        }
    }

    pub fn is_won(&self) -> bool {
        self.clicks >= WIN_CLICKS
    }

    /// Clicks added by the next tap.
    pub fn click_value(&self) -> u64 {
        self.multiplier.trunc() as u64
    }

    pub fn is_achievement_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievement_ids.contains(id)
    }

    pub fn is_theme_unlocked(&self, id: &str) -> bool {
        self.unlocked_theme_ids.contains(id)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// A single tap, stamped by whoever observed it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
}

/// Something the presentation layer may want to announce.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    LevelUp { level: u32 },
    ThemeUnlocked { id: &'static str },
    AchievementUnlocked { id: &'static str, reward: f64 },
    GameWon { clicks: u64 },
}

/// Result of processing one click.
#[derive(Clone, Debug)]
pub struct ClickOutcome {
    pub state: GameState,
    pub events: Vec<Event>,
}

impl ClickOutcome {
    pub fn unlocked_achievements(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::AchievementUnlocked { id, .. } => Some(*id),
            _ => None,
        })
    }

    pub fn level_ups(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::LevelUp { level } => Some(*level),
            _ => None,
        })
    }

    pub fn won(&self) -> bool {
        self.events.iter().any(|e| matches!(e, Event::GameWon { .. }))
    }
}
