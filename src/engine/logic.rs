//! Click processing — pure functions over the game state and session.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::achievements::{all_achievements, unlock_non_timed, AchievementDefinition};
use super::state::{Event, GameState, LEVEL_UP_BONUS};
use super::themes::unlock_for_level;
use super::threshold::next_level_threshold;
use super::timed::Session;

/// Process one tap at `now`.
///
/// Order: add clicks with the pre-click multiplier, unlock click/level badges,
/// record the tap and unlock timed badges, pay all rewards, then either win or
/// climb as many levels as the new total allows. Progression events come
/// first, followed by one `AchievementUnlocked` per badge in discovery order.
/// A won game is frozen: nothing changes and no events are returned.
pub fn apply_click(state: &mut GameState, session: &mut Session, now: DateTime<Utc>) -> Vec<Event> {
    if state.is_won() {
        return Vec::new();
    }

    state.clicks = state.clicks.saturating_add(state.click_value());

    let mut unlocked = unlock_non_timed(state);
    let bonus_a = total_reward(&unlocked);

    session.window.push(now);
    let timed = unlock_timed(state, session, now);
    let bonus_b = total_reward(&timed);
    unlocked.extend(timed);

    if bonus_a + bonus_b > 0.0 {
        state.multiplier += bonus_a + bonus_b;
    }

    let mut events = Vec::new();
    if state.is_won() {
        info!(clicks = state.clicks, level = state.level, "game won");
        events.push(Event::GameWon {
            clicks: state.clicks,
        });
        // Anything gated on the final count. Already-unlocked badges are
        // skipped, so nothing is paid twice.
        let late = unlock_non_timed(state);
        let bonus = total_reward(&late);
        if bonus > 0.0 {
            state.multiplier += bonus;
        }
        unlocked.extend(late);
    } else {
        climb_levels(state, &mut events);
    }

    for def in unlocked {
        debug!(id = def.id, reward = def.reward, clicks = state.clicks, "achievement unlocked");
        events.push(Event::AchievementUnlocked {
            id: def.id,
            reward: def.reward,
        });
    }
    events
}

/// Unlock still-locked timed badges whose pattern the session now shows.
fn unlock_timed(
    state: &mut GameState,
    session: &Session,
    now: DateTime<Utc>,
) -> Vec<&'static AchievementDefinition> {
    let ctx = session.context(now);
    let mut unlocked = Vec::new();
    for def in all_achievements() {
        let Some(spec) = def.timed_pattern() else {
            continue;
        };
        if state.is_achievement_unlocked(def.id) {
            continue;
        }
        if ctx.is_satisfied(spec) {
            state.unlocked_achievement_ids.insert(def.id.to_string());
            unlocked.push(def);
        }
    }
    unlocked
}

fn total_reward(defs: &[&AchievementDefinition]) -> f64 {
    defs.iter().map(|d| d.reward).sum()
}

/// Advance while the click total covers the current level's threshold. A big
/// multiplier can cross several levels in one tap; each pays the level bonus.
fn climb_levels(state: &mut GameState, events: &mut Vec<Event>) {
    let mut threshold = next_level_threshold(state.level);
    while state.clicks as f64 >= threshold {
        state.level += 1;
        state.multiplier += LEVEL_UP_BONUS;
        debug!(level = state.level, multiplier = state.multiplier, "level up");
        events.push(Event::LevelUp { level: state.level });
        for theme in unlock_for_level(state) {
            debug!(id = theme.id, "theme unlocked");
            events.push(Event::ThemeUnlocked { id: theme.id });
        }
        threshold = next_level_threshold(state.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::WIN_CLICKS;
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 18, 0, 0).unwrap()
    }

    fn session() -> Session {
        Session::new(t0(), None)
    }

    fn with_first_click(mut state: GameState) -> GameState {
        state.unlocked_achievement_ids.insert("first_click".to_string());
        state
    }

    /// Mark every badge already earned at the current clicks/level, without
    /// paying rewards, so a test only sees what its own tap unlocks.
    fn settled(mut state: GameState) -> GameState {
        unlock_non_timed(&mut state);
        state
    }

    fn achievement_ids(events: &[Event]) -> Vec<&'static str> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::AchievementUnlocked { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_click_unlocks_first_step() {
        let mut state = GameState::new();
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(state.clicks, 1);
        assert_eq!(state.level, 1);
        assert!((state.multiplier - 1.1).abs() < 1e-9);
        assert_eq!(
            events,
            vec![Event::AchievementUnlocked {
                id: "first_click",
                reward: 0.1
            }]
        );
    }

    #[test]
    fn click_value_uses_multiplier_before_rewards() {
        let mut state = GameState::new();
        state.multiplier = 1.95;
        let mut s = session();
        apply_click(&mut state, &mut s, t0());
        // 1.95 truncates to 1; the reward only affects the next tap.
        assert_eq!(state.clicks, 1);
        assert_eq!(state.click_value(), 2);
    }

    #[test]
    fn simultaneous_unlocks_all_paid_in_registry_order() {
        let mut state = GameState::new();
        state.clicks = 99;
        state.level = 8;
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(
            achievement_ids(&events),
            vec!["first_click", "level_5", "clicks_100"]
        );
        assert!((state.multiplier - 1.6).abs() < 1e-9);
        assert_eq!(state.level, 8);
    }

    #[test]
    fn century_pays_exactly_its_reward() {
        let mut state = GameState::new();
        state.clicks = 99;
        state.level = 8;
        let mut state = settled(state);
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(state.clicks, 100);
        assert_eq!(achievement_ids(&events), vec!["clicks_100"]);
        assert!((state.multiplier - 1.3).abs() < 1e-9);
        assert_eq!(state.level, 8);
    }

    #[test]
    fn unlocked_badges_are_not_paid_twice() {
        let mut state = GameState::new();
        state.clicks = 200;
        state.level = 12;
        let mut state = settled(state);
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert!(achievement_ids(&events).is_empty());
        assert!((state.multiplier - 1.0).abs() < 1e-9);
    }

    #[test]
    fn exact_value_hit() {
        let mut state = GameState::new();
        state.clicks = 661;
        state.level = 21;
        state.multiplier = 5.0;
        let mut state = settled(state);
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(state.clicks, 666);
        assert_eq!(achievement_ids(&events), vec!["devil_number"]);
    }

    #[test]
    fn exact_value_skipped_is_missed() {
        let mut state = GameState::new();
        state.clicks = 662;
        state.level = 21;
        state.multiplier = 5.0;
        let mut state = settled(state);
        let mut s = session();
        apply_click(&mut state, &mut s, t0());
        assert_eq!(state.clicks, 667);
        assert!(!state.is_achievement_unlocked("devil_number"));
    }

    #[test]
    fn level_up_unlocks_theme_and_level_badge_waits_a_tap() {
        let mut state = with_first_click(GameState::new());
        state.clicks = 39;
        state.level = 4;
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(state.level, 5);
        assert!((state.multiplier - 1.5).abs() < 1e-9);
        assert_eq!(
            events,
            vec![Event::LevelUp { level: 5 }, Event::ThemeUnlocked { id: "dark" }]
        );
        assert!(state.is_theme_unlocked("dark"));

        // 41 is also prime.
        let events = apply_click(&mut state, &mut s, t0() + TimeDelta::seconds(5));
        assert_eq!(achievement_ids(&events), vec!["level_5", "prime_clicker"]);
    }

    #[test]
    fn big_multiplier_crosses_several_levels() {
        let mut state = GameState::new();
        state.multiplier = 50.0;
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(state.clicks, 50);
        // 10, 20, 30, 40, 50 are all covered; level 6 needs 70.
        assert_eq!(state.level, 6);
        let levels: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::LevelUp { level } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3, 4, 5, 6]);
        assert!((state.multiplier - (50.0 + 0.1 + 5.0 * LEVEL_UP_BONUS)).abs() < 1e-9);
    }

    #[test]
    fn winning_click() {
        let mut state = with_first_click(GameState::new());
        state.clicks = WIN_CLICKS - 5;
        state.level = 39;
        state.multiplier = 10.0;
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert_eq!(state.clicks, WIN_CLICKS + 5);
        assert_eq!(events[0], Event::GameWon { clicks: WIN_CLICKS + 5 });
        assert!(!events.iter().any(|e| matches!(e, Event::LevelUp { .. })));
        assert_eq!(state.level, 39);
        assert!(achievement_ids(&events).contains(&"victory"));
        let gw = events
            .iter()
            .filter(|e| matches!(e, Event::GameWon { .. }))
            .count();
        assert_eq!(gw, 1);
    }

    #[test]
    fn won_game_is_frozen() {
        let mut state = GameState::new();
        state.clicks = WIN_CLICKS;
        state.multiplier = 80.0;
        let before = state.clone();
        let mut s = session();
        let events = apply_click(&mut state, &mut s, t0());
        assert!(events.is_empty());
        assert_eq!(state, before);
        assert!(s.window.is_empty());
    }

    #[test]
    fn daily_login_on_first_click_after_a_day() {
        let mut state = with_first_click(GameState::new());
        state.clicks = 3;
        let now = t0() + TimeDelta::hours(30);
        let mut s = Session::new(now, Some(t0()));
        let events = apply_click(&mut state, &mut s, now);
        assert_eq!(achievement_ids(&events), vec!["daily_clicker"]);
        assert!((state.multiplier - 6.0).abs() < 1e-9);
    }

    #[test]
    fn long_session_unlocks_after_fifteen_minutes() {
        let mut state = with_first_click(GameState::new());
        state.clicks = 3;
        let mut s = session();
        apply_click(&mut state, &mut s, t0() + TimeDelta::minutes(14));
        assert!(!state.is_achievement_unlocked("dedicated_clicker"));
        apply_click(&mut state, &mut s, t0() + TimeDelta::minutes(15));
        assert!(state.is_achievement_unlocked("dedicated_clicker"));
    }

    #[test]
    fn non_timed_badges_reported_before_timed() {
        let mut state = GameState::new();
        let now = t0() + TimeDelta::days(2);
        let mut s = Session::new(now, Some(t0()));
        let events = apply_click(&mut state, &mut s, now);
        assert_eq!(achievement_ids(&events), vec!["first_click", "daily_clicker"]);
    }
}
