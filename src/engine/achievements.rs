//! Achievement registry.
//!
//! The catalog is a fixed, ordered list of definitions. Registry order is the
//! evaluation order, so it also decides the order of unlock events when
//! several badges fire on the same click. Whether a badge is unlocked is
//! player progress and lives in `GameState`, never here.

use std::fmt;

use super::state::GameState;

/// Timing shape a timed badge must observe in the recent clicks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimedPatternSpec {
    /// `count` clicks spanning at most `within_seconds`.
    RapidClicks { count: usize, within_seconds: f64 },
    /// Last gap within `tolerance` of `target_seconds`.
    PreciseTiming { target_seconds: f64, tolerance: f64 },
    /// Last `count` clicks evenly spaced by `interval_seconds` (± `tolerance`).
    ConsistentClicks {
        count: usize,
        interval_seconds: f64,
        tolerance: f64,
    },
    LongSession { minutes: f64 },
    DailyLogin,
}

impl fmt::Display for TimedPatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimedPatternSpec::RapidClicks {
                count,
                within_seconds,
            } => write!(f, "{} clicks within {:.1} seconds", count, within_seconds),
            TimedPatternSpec::PreciseTiming {
                target_seconds,
                tolerance,
            } => write!(
                f,
                "Click exactly {:.1} seconds apart (±{:.2})",
                target_seconds, tolerance
            ),
            TimedPatternSpec::ConsistentClicks {
                count,
                interval_seconds,
                tolerance,
            } => write!(
                f,
                "{} clicks, each {:.1} seconds apart (±{:.2})",
                count, interval_seconds, tolerance
            ),
            TimedPatternSpec::LongSession { minutes } => {
                write!(f, "Play for {:.1} minutes straight", minutes)
            }
            TimedPatternSpec::DailyLogin => write!(f, "Return to the game after 24 hours"),
        }
    }
}

/// Extra unlock rule on top of the click/level thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Predicate {
    /// Only the click/level thresholds apply.
    Threshold,
    /// Click counter lands exactly on this value.
    ExactValue(u64),
    /// Click counter is a prime above 10.
    Primality,
    TimedPattern(TimedPatternSpec),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// 0 = not click-gated.
    pub required_clicks: u64,
    /// 0 = not level-gated.
    pub required_level: u32,
    /// Added to the multiplier on unlock.
    pub reward: f64,
    pub is_hidden: bool,
    pub predicate: Predicate,
}

impl AchievementDefinition {
    pub fn is_timed(&self) -> bool {
        matches!(self.predicate, Predicate::TimedPattern(_))
    }

    pub fn timed_pattern(&self) -> Option<&TimedPatternSpec> {
        match &self.predicate {
            Predicate::TimedPattern(spec) => Some(spec),
            _ => None,
        }
    }

    /// Non-timed unlock check. Any satisfied rule is enough.
    pub fn is_met(&self, clicks: u64, level: u32) -> bool {
        if self.required_clicks > 0 && clicks >= self.required_clicks {
            return true;
        }
        if self.required_level > 0 && level >= self.required_level {
            return true;
        }
        match self.predicate {
            Predicate::ExactValue(n) => clicks == n,
            Predicate::Primality => clicks > 10 && is_prime(clicks),
            Predicate::Threshold | Predicate::TimedPattern(_) => false,
        }
    }
}

const fn threshold(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    required_clicks: u64,
    required_level: u32,
    reward: f64,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        title,
        description,
        icon,
        required_clicks,
        required_level,
        reward,
        is_hidden: false,
        predicate: Predicate::Threshold,
    }
}

const fn hidden(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    reward: f64,
    predicate: Predicate,
) -> AchievementDefinition {
    AchievementDefinition {
        id,
        title,
        description,
        icon,
        required_clicks: 0,
        required_level: 0,
        reward,
        is_hidden: true,
        predicate,
    }
}

static ACHIEVEMENTS: [AchievementDefinition; 20] = [
    threshold("first_click", "First Step", "Make your first click", "1.circle.fill", 1, 1, 0.1),
    threshold("level_5", "Getting Started", "Reach level 5", "5.circle.fill", 0, 5, 0.2),
    threshold("clicks_100", "Century", "Reach 100 total clicks", "100.circle.fill", 100, 0, 0.3),
    threshold("level_10", "Double Digits", "Reach level 10", "10.circle.fill", 0, 10, 0.5),
    threshold("clicks_1000", "Clickmaster", "Reach 1,000 total clicks", "hand.tap.fill", 1_000, 0, 1.0),
    threshold("level_25", "Quarter Century", "Reach level 25", "star.fill", 0, 25, 1.5),
    threshold("clicks_10000", "Click Enthusiast", "Reach 10,000 total clicks", "flame.fill", 10_000, 0, 4.0),
    threshold("level_50", "Half Century", "Reach level 50", "50.circle.fill", 0, 50, 5.0),
    threshold("clicks_100000", "Click Wizard", "Reach 100,000 total clicks", "wand.and.stars", 100_000, 0, 10.0),
    threshold("level_100", "Century Club", "Reach level 100", "100.circle.fill", 0, 100, 20.0),
    threshold("clicks_500000", "Click God", "Reach 500,000 total clicks", "bolt.fill", 500_000, 0, 50.0),
    threshold(
        "victory",
        "Winner Winner",
        "Reach 1,000,000 clicks and complete the game",
        "trophy.fill",
        1_000_000,
        0,
        100.0,
    ),
    hidden(
        "speed_demon",
        "Speed Demon",
        "Click 10 times within 1 second",
        "hare.fill",
        2.0,
        Predicate::TimedPattern(TimedPatternSpec::RapidClicks {
            count: 10,
            within_seconds: 1.0,
        }),
    ),
    hidden(
        "precision_clicker",
        "Precision Clicker",
        "Click exactly 3 seconds apart (±0.1s)",
        "timer",
        3.0,
        Predicate::TimedPattern(TimedPatternSpec::PreciseTiming {
            target_seconds: 3.0,
            tolerance: 0.1,
        }),
    ),
    hidden(
        "rhythm_master",
        "Rhythm Master",
        "Make 10 clicks exactly 1 second apart (±0.15s)",
        "metronome.fill",
        3.5,
        Predicate::TimedPattern(TimedPatternSpec::ConsistentClicks {
            count: 10,
            interval_seconds: 1.0,
            tolerance: 0.15,
        }),
    ),
    hidden(
        "dedicated_clicker",
        "Dedicated Clicker",
        "Play for 15 minutes straight",
        "clock.fill",
        4.0,
        Predicate::TimedPattern(TimedPatternSpec::LongSession { minutes: 15.0 }),
    ),
    hidden(
        "daily_clicker",
        "Daily Clicker",
        "Return to the game after 24 hours",
        "calendar",
        5.0,
        Predicate::TimedPattern(TimedPatternSpec::DailyLogin),
    ),
    hidden(
        "prime_clicker",
        "Prime Clicker",
        "Reach exactly a prime number of clicks",
        "number",
        3.0,
        Predicate::Primality,
    ),
    hidden(
        "devil_number",
        "Devilish Clicks",
        "Reach exactly 666 clicks",
        "flame.circle.fill",
        6.66,
        Predicate::ExactValue(666),
    ),
    hidden(
        "lucky_number",
        "Lucky Seven",
        "Reach exactly 777 clicks",
        "dice.fill",
        7.0,
        Predicate::ExactValue(777),
    ),
];

/// Every achievement in evaluation order.
pub fn all_achievements() -> &'static [AchievementDefinition] {
    &ACHIEVEMENTS
}

pub fn find_achievement(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Unlock every still-locked, non-timed achievement whose rule holds for the
/// state's current clicks and level. Returns the newly unlocked definitions in
/// registry order; already unlocked ones are skipped so rewards are paid once.
pub fn unlock_non_timed(state: &mut GameState) -> Vec<&'static AchievementDefinition> {
    let mut unlocked = Vec::new();
    for def in ACHIEVEMENTS.iter() {
        if def.is_timed() || state.is_achievement_unlocked(def.id) {
            continue;
        }
        if def.is_met(state.clicks, state.level) {
            state.unlocked_achievement_ids.insert(def.id.to_string());
            unlocked.push(def);
        }
    }
    unlocked
}

/// 6k±1 trial division.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: u64 = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}
