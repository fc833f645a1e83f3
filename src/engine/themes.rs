//! Cosmetic theme catalog and level-based unlocking.
//!
//! Lock state is a pure function of level. The descriptors below (font,
//! button effect, preview icon) are inert data for whatever draws the game.

use std::collections::BTreeSet;

use thiserror::Error;

use super::state::GameState;

/// Extra animation a theme puts on the main button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEffect {
    Pulse,
    Glow,
    Particles,
    Rainbow,
    Shake,
    Rotate,
    Bounce,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThemeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub unlock_level: u32,
    pub font_name: Option<&'static str>,
    pub button_effect: Option<ButtonEffect>,
    pub preview_icon: &'static str,
}

impl ThemeDefinition {
    pub fn is_locked(&self, level: u32) -> bool {
        level < self.unlock_level
    }
}

const fn theme(
    id: &'static str,
    name: &'static str,
    unlock_level: u32,
    font_name: Option<&'static str>,
    button_effect: Option<ButtonEffect>,
    preview_icon: &'static str,
) -> ThemeDefinition {
    ThemeDefinition {
        id,
        name,
        unlock_level,
        font_name,
        button_effect,
        preview_icon,
    }
}

// Catalog order, not sorted by unlock level.
static THEMES: [ThemeDefinition; 14] = [
    theme("default", "Classic", 1, None, None, "paintpalette"),
    theme("dark", "Dark Mode", 5, None, None, "moon.fill"),
    theme("neon", "Neon", 10, Some("Menlo"), Some(ButtonEffect::Glow), "light.beacon.max.fill"),
    theme("pastel", "Pastel", 15, Some("Avenir-Light"), None, "cloud.fill"),
    theme("fire", "Fire & Ice", 25, Some("Futura"), Some(ButtonEffect::Pulse), "flame.fill"),
    theme("gold", "Golden", 50, Some("Copperplate"), Some(ButtonEffect::Particles), "crown.fill"),
    theme("cosmic", "Cosmic", 30, Some("Futura-Medium"), Some(ButtonEffect::Rainbow), "sparkles"),
    theme("retro", "8-Bit Retro", 35, Some("Courier"), None, "gamecontroller.fill"),
    theme("ocean", "Deep Ocean", 40, Some("GillSans-Light"), Some(ButtonEffect::Pulse), "water.waves"),
    theme("bubblegum", "Bubblegum", 45, Some("MarkerFelt-Thin"), Some(ButtonEffect::Bounce), "bubble.right.fill"),
    theme("matrix", "Matrix", 70, Some("Courier-Bold"), Some(ButtonEffect::Pulse), "terminal.fill"),
    theme("candy", "Candy Crush", 60, Some("ChalkboardSE-Bold"), Some(ButtonEffect::Rainbow), "seal.fill"),
    theme("galaxy", "Galaxy", 80, Some("AvenirNext-Bold"), Some(ButtonEffect::Particles), "star.circle.fill"),
    theme("sunset", "Sunset", 90, Some("Verdana"), Some(ButtonEffect::Glow), "sun.max.fill"),
];

pub fn all_themes() -> &'static [ThemeDefinition] {
    &THEMES
}

pub fn find_theme(id: &str) -> Option<&'static ThemeDefinition> {
    THEMES.iter().find(|t| t.id == id)
}

/// Ids of every theme available at `level`.
pub fn unlocked_theme_ids(level: u32) -> BTreeSet<String> {
    THEMES
        .iter()
        .filter(|t| !t.is_locked(level))
        .map(|t| t.id.to_string())
        .collect()
}

/// Merge the themes eligible at the state's level into its unlocked set.
/// Returns the newly added ones in catalog order. Never removes anything.
pub fn unlock_for_level(state: &mut GameState) -> Vec<&'static ThemeDefinition> {
    let mut added = Vec::new();
    for t in THEMES.iter() {
        if !t.is_locked(state.level) && state.unlocked_theme_ids.insert(t.id.to_string()) {
            added.push(t);
        }
    }
    added
}

#[derive(Debug, Error, PartialEq)]
pub enum ThemeError {
    #[error("unknown theme '{0}'")]
    Unknown(String),
    #[error("theme '{id}' unlocks at level {unlock_level}")]
    Locked { id: String, unlock_level: u32 },
}

/// Switch the active theme. Only unlocked themes can be chosen.
pub fn select_theme(state: &mut GameState, id: &str) -> Result<(), ThemeError> {
    let def = find_theme(id).ok_or_else(|| ThemeError::Unknown(id.to_string()))?;
    if def.is_locked(state.level) && !state.is_theme_unlocked(def.id) {
        return Err(ThemeError::Locked {
            id: def.id.to_string(),
            unlock_level: def.unlock_level,
        });
    }
    state.selected_theme_id = def.id.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_has_only_default() {
        let ids = unlocked_theme_ids(1);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("default"));
    }

    #[test]
    fn unlocks_by_level() {
        let ids = unlocked_theme_ids(30);
        for id in ["default", "dark", "neon", "pastel", "fire", "cosmic"] {
            assert!(ids.contains(id), "{id} should be unlocked at 30");
        }
        assert!(!ids.contains("retro"));
        assert!(!ids.contains("gold"));
    }

    #[test]
    fn everything_at_ninety() {
        assert_eq!(unlocked_theme_ids(90).len(), all_themes().len());
    }

    #[test]
    fn unlock_for_level_reports_new_only() {
        let mut state = GameState::new();
        state.level = 10;
        let added: Vec<&str> = unlock_for_level(&mut state).iter().map(|t| t.id).collect();
        assert_eq!(added, vec!["dark", "neon"]);
        assert!(unlock_for_level(&mut state).is_empty());
    }

    #[test]
    fn unlock_for_level_keeps_existing() {
        let mut state = GameState::new();
        state.unlocked_theme_ids.insert("gold".to_string());
        unlock_for_level(&mut state);
        assert!(state.is_theme_unlocked("gold"));
    }

    #[test]
    fn select_unlocked_theme() {
        let mut state = GameState::new();
        state.level = 5;
        unlock_for_level(&mut state);
        assert_eq!(select_theme(&mut state, "dark"), Ok(()));
        assert_eq!(state.selected_theme_id, "dark");
    }

    #[test]
    fn select_locked_theme_fails() {
        let mut state = GameState::new();
        let err = select_theme(&mut state, "neon").unwrap_err();
        assert_eq!(
            err,
            ThemeError::Locked {
                id: "neon".to_string(),
                unlock_level: 10
            }
        );
        assert_eq!(state.selected_theme_id, "default");
    }

    #[test]
    fn select_unknown_theme_fails() {
        let mut state = GameState::new();
        assert_eq!(
            select_theme(&mut state, "vaporwave"),
            Err(ThemeError::Unknown("vaporwave".to_string()))
        );
    }

    #[test]
    fn button_effects() {
        assert_eq!(find_theme("neon").unwrap().button_effect, Some(ButtonEffect::Glow));
        assert_eq!(find_theme("dark").unwrap().button_effect, None);
    }
}
