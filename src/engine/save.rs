//! Snapshot save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current on-disk format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format that can still be read. Only
//!   bump on breaking changes (a field removed or its meaning changed).
//!
//! Saves at or above `MIN_COMPATIBLE_VERSION` load with missing fields filled
//! from defaults. Unreadable or too-old data is discarded with a warning and
//! the player starts a fresh game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::achievements::find_achievement;
use super::state::{GameState, DEFAULT_THEME_ID};
use super::themes::find_theme;

const SAVE_VERSION: u32 = 1;

const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Everything the engine needs from storage to resume a player.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub state: GameState,
    /// When the player last started a session.
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize save data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where snapshots live. The engine never calls this itself.
pub trait SnapshotStore {
    /// `Ok(None)` when there is nothing usable to resume.
    fn load(&self) -> Result<Option<Snapshot>, SaveError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), SaveError>;
    fn delete(&self) -> Result<(), SaveError>;
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct GameSave {
    clicks: u64,
    level: u32,
    multiplier: f64,
    unlocked_achievements: Vec<String>,
    unlocked_themes: Vec<String>,
    selected_theme: String,
}

impl Default for GameSave {
    fn default() -> Self {
        Self {
            clicks: 0,
            level: 1,
            multiplier: 1.0,
            unlocked_achievements: Vec::new(),
            unlocked_themes: vec![DEFAULT_THEME_ID.to_string()],
            selected_theme: DEFAULT_THEME_ID.to_string(),
        }
    }
}

fn extract_save(snapshot: &Snapshot) -> SaveData {
    let state = &snapshot.state;
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            clicks: state.clicks,
            level: state.level,
            multiplier: state.multiplier,
            unlocked_achievements: state.unlocked_achievement_ids.iter().cloned().collect(),
            unlocked_themes: state.unlocked_theme_ids.iter().cloned().collect(),
            selected_theme: state.selected_theme_id.clone(),
        },
        last_login: snapshot.last_login,
    }
}

/// Rebuild a state from saved data. Ids the catalogs no longer know are
/// dropped, and out-of-range numbers are clamped to the starting values.
fn apply_save(save: &GameSave) -> GameState {
    let mut state = GameState::new();
    state.clicks = save.clicks;
    state.level = save.level.max(1);
    state.multiplier = if save.multiplier.is_finite() {
        save.multiplier.max(1.0)
    } else {
        1.0
    };

    for id in &save.unlocked_achievements {
        match find_achievement(id) {
            Some(def) => {
                state.unlocked_achievement_ids.insert(def.id.to_string());
            }
            None => debug!(%id, "dropping unknown achievement from save"),
        }
    }
    for id in &save.unlocked_themes {
        if let Some(def) = find_theme(id) {
            state.unlocked_theme_ids.insert(def.id.to_string());
        }
    }
    if state.is_theme_unlocked(&save.selected_theme) {
        state.selected_theme_id = save.selected_theme.clone();
    }
    state
}

pub fn to_json(snapshot: &Snapshot) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&extract_save(snapshot))?)
}

/// Parse saved JSON. Corrupt or incompatible data yields `None`.
pub fn from_json(json: &str) -> Option<Snapshot> {
    let save_data: SaveData = match serde_json::from_str(json) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "failed to parse save data, discarding");
            return None;
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        warn!(
            saved = save_data.version,
            min_compatible = MIN_COMPATIBLE_VERSION,
            "save data too old, starting a new game"
        );
        return None;
    }
    if save_data.version < SAVE_VERSION {
        debug!(
            saved = save_data.version,
            current = SAVE_VERSION,
            "migrating older save data"
        );
    }

    Some(Snapshot {
        state: apply_save(&save_data.game),
        last_login: save_data.last_login,
    })
}

/// Snapshot stored as pretty JSON in a single file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, SaveError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(j) => j,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = from_json(&json);
        if snapshot.is_none() {
            // Broken data would only fail again next time.
            self.delete()?;
        }
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SaveError> {
        let json = to_json(snapshot)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
