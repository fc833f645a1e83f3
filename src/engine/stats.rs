//! Read-only summaries derived from a `GameState` for whoever shows the game.

use super::achievements::{all_achievements, AchievementDefinition};
use super::state::{GameState, WIN_CLICKS};
use super::threshold::clicks_to_next_level;

#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub clicks: u64,
    pub level: u32,
    pub multiplier: f64,
    /// 0.0 ..= 100.0
    pub progress_percent: f64,
    pub clicks_to_win: u64,
    /// Taps needed at the current multiplier, ignoring future bonuses.
    pub taps_to_win: u64,
    /// `None` once the game is won.
    pub clicks_to_next_level: Option<u64>,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
    /// `level / 10` from level 10 on.
    pub tier: Option<u32>,
    pub button_caption: &'static str,
}

impl Stats {
    pub fn from_state(state: &GameState) -> Self {
        let clicks_to_win = WIN_CLICKS.saturating_sub(state.clicks);
        let catalog = all_achievements();
        Self {
            clicks: state.clicks,
            level: state.level,
            multiplier: state.multiplier,
            progress_percent: (state.clicks as f64 / WIN_CLICKS as f64 * 100.0).min(100.0),
            clicks_to_win,
            taps_to_win: (clicks_to_win as f64 / state.multiplier).ceil() as u64,
            clicks_to_next_level: if state.is_won() {
                None
            } else {
                Some(clicks_to_next_level(state.clicks, state.level))
            },
            achievements_unlocked: catalog
                .iter()
                .filter(|a| state.is_achievement_unlocked(a.id))
                .count(),
            achievements_total: catalog.len(),
            tier: (!state.is_won() && state.level >= 10).then_some(state.level / 10),
            button_caption: button_caption(state),
        }
    }
}

/// Label of the main button, escalating with level.
pub fn button_caption(state: &GameState) -> &'static str {
    if state.is_won() {
        return "WINNER!";
    }
    match state.level {
        0..=9 => "Click Me!",
        10..=19 => "Tap Me!",
        20..=29 => "Smash Me!",
        30..=39 => "Power Up!",
        40..=49 => "Supercharge!",
        50..=74 => "ULTIMATE CLICK!",
        75..=99 => "MEGA POWER!",
        _ => "GOD MODE!",
    }
}

/// How one catalog entry should be shown to this player.
#[derive(Clone, Debug, PartialEq)]
pub struct AchievementView {
    pub id: &'static str,
    pub title: String,
    pub description: String,
    pub icon: &'static str,
    pub unlocked: bool,
    /// Set once unlocked.
    pub reward: Option<f64>,
    /// Timing requirement for locked timed badges. Hidden ones only get a hint.
    pub requirement: Option<String>,
}

impl AchievementView {
    pub fn new(def: &'static AchievementDefinition, state: &GameState) -> Self {
        let unlocked = state.is_achievement_unlocked(def.id);
        if def.is_hidden && !unlocked {
            return Self {
                id: def.id,
                title: "???".to_string(),
                description: "Hidden Achievement".to_string(),
                icon: "questionmark.circle.fill",
                unlocked,
                reward: None,
                requirement: def.is_timed().then(|| "Time-based challenge".to_string()),
            };
        }
        Self {
            id: def.id,
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: if unlocked { def.icon } else { "lock.fill" },
            unlocked,
            reward: unlocked.then_some(def.reward),
            requirement: if unlocked {
                None
            } else {
                def.timed_pattern().map(|spec| spec.to_string())
            },
        }
    }
}

/// Catalog entries to list. Hidden, still-locked badges appear only with
/// `show_hidden`.
pub fn visible_achievements(state: &GameState, show_hidden: bool) -> Vec<AchievementView> {
    all_achievements()
        .iter()
        .filter(|a| !a.is_hidden || show_hidden || state.is_achievement_unlocked(a.id))
        .map(|a| AchievementView::new(a, state))
        .collect()
}
