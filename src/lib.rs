//! Progression engine for a single-player incremental clicker.
//!
//! Taps (with timestamps) go in; level, multiplier, unlocked themes and
//! achievements come out, along with the events a front end would announce.
//! Rendering and storage technology are left to the caller; `engine::save`
//! provides a JSON snapshot store for the bundled CLI.

pub mod engine;
pub mod time;

pub use engine::{
    all_achievements, all_themes, next_level_threshold, unlocked_theme_ids, ClickEvent,
    ClickOutcome, Engine, Event, GameState,
};
