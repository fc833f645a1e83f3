//! Scripted play sessions: a player tapping at a fixed cadence.
//! Useful for balance checks and for driving the engine without a UI.

use std::iter;

use chrono::{DateTime, TimeDelta, Utc};

use super::state::{ClickEvent, Event, GameState};
use super::Engine;

/// `taps` clicks starting at `start`, `interval` apart. Generated lazily; the
/// schedule ends early if a timestamp would leave chrono's date range.
pub fn click_script(
    start: DateTime<Utc>,
    interval: TimeDelta,
    taps: usize,
) -> impl Iterator<Item = ClickEvent> {
    iter::successors(Some(start), move |t| t.checked_add_signed(interval))
        .take(taps)
        .map(|timestamp| ClickEvent { timestamp })
}

#[derive(Clone, Debug)]
pub struct SessionReport {
    pub state: GameState,
    pub events: Vec<Event>,
    /// Taps actually processed; fewer than requested if the game was won.
    pub taps: usize,
}

impl SessionReport {
    pub fn count_achievements(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::AchievementUnlocked { .. }))
            .count()
    }

    pub fn won(&self) -> bool {
        self.events.iter().any(|e| matches!(e, Event::GameWon { .. }))
    }
}

/// Feed the clicks through the engine in order, stopping at the first win.
pub fn run_script(
    engine: &mut Engine,
    mut state: GameState,
    clicks: impl IntoIterator<Item = ClickEvent>,
) -> SessionReport {
    let mut events = Vec::new();
    let mut taps = 0;
    for click in clicks {
        if state.is_won() {
            break;
        }
        let outcome = engine.handle(state, click);
        state = outcome.state;
        events.extend(outcome.events);
        taps += 1;
    }
    SessionReport {
        state,
        events,
        taps,
    }
}

/// Tap `taps` times, `interval` apart, from `start`.
pub fn simulate_session(
    engine: &mut Engine,
    state: GameState,
    start: DateTime<Utc>,
    interval: TimeDelta,
    taps: usize,
) -> SessionReport {
    run_script(engine, state, click_script(start, interval, taps))
}
