//! Progression engine: clicks in, level/multiplier/unlocks and events out.

pub mod achievements;
pub mod logic;
pub mod save;
pub mod simulator;
pub mod state;
pub mod stats;
pub mod themes;
pub mod threshold;
pub mod timed;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::time::Clock;

pub use achievements::{all_achievements, AchievementDefinition, Predicate, TimedPatternSpec};
pub use state::{ClickEvent, ClickOutcome, Event, GameState};
pub use themes::{all_themes, select_theme, unlocked_theme_ids, ThemeDefinition, ThemeError};
pub use threshold::next_level_threshold;
use timed::Session;

/// One play session. Owns the timing data timed badges look at; the game
/// state itself is passed in and handed back on every click.
pub struct Engine {
    session: Session,
}

impl Engine {
    pub fn new(session_start: DateTime<Utc>, last_login: Option<DateTime<Utc>>) -> Self {
        info!(%session_start, ?last_login, "session started");
        Self {
            session: Session::new(session_start, last_login),
        }
    }

    /// Start a session at the clock's current time.
    pub fn start(clock: &dyn Clock, last_login: Option<DateTime<Utc>>) -> Self {
        Self::new(clock.now(), last_login)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bring a loaded snapshot in line with the current catalog: every theme
    /// its level qualifies for is unlocked. Nothing is ever re-locked.
    pub fn resume(&self, mut state: GameState) -> GameState {
        themes::unlock_for_level(&mut state);
        state
    }

    /// Process one tap. A won game comes back unchanged with no events.
    pub fn apply_click(&mut self, mut state: GameState, now: DateTime<Utc>) -> ClickOutcome {
        let events = logic::apply_click(&mut state, &mut self.session, now);
        ClickOutcome { state, events }
    }

    pub fn handle(&mut self, state: GameState, click: ClickEvent) -> ClickOutcome {
        self.apply_click(state, click.timestamp)
    }
}
