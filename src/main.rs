use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use tracing::info;

use buttons::engine::achievements::find_achievement;
use buttons::engine::save::{JsonFileStore, Snapshot, SnapshotStore};
use buttons::engine::simulator::simulate_session;
use buttons::engine::stats::{visible_achievements, Stats};
use buttons::engine::{all_themes, select_theme, Engine, Event, GameState};
use buttons::time::SystemClock;

/// Enough single-click taps to win from scratch.
const MAX_TAPS: i64 = 1_000_000;

/// One day.
const MAX_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Parser)]
#[command(name = "buttons")]
#[command(about = "Play the Buttons clicker from the terminal")]
#[command(version)]
struct Cli {
    /// Save file to load and update
    #[arg(short, long, global = true, default_value = "buttons_save.json")]
    save: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show clicks, level, multiplier and progress (default)
    Status,

    /// Tap the button
    Click {
        /// Number of taps
        #[arg(short, long, default_value_t = 1,
              value_parser = clap::value_parser!(u32).range(1..=MAX_TAPS))]
        taps: u32,

        /// Milliseconds between taps
        #[arg(short, long, default_value_t = 200,
              value_parser = clap::value_parser!(u32).range(..=MAX_INTERVAL_MS))]
        interval_ms: u32,
    },

    /// List achievements
    Achievements {
        /// Include hidden achievements that are still locked
        #[arg(long)]
        show_hidden: bool,
    },

    /// List themes and whether they are unlocked
    Themes,

    /// Switch to an unlocked theme
    SelectTheme { id: String },

    /// Delete the save file and start over
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let store = JsonFileStore::new(&cli.save);
    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            let (_, state) = open(&store)?;
            print_status(&state);
        }
        Commands::Click { taps, interval_ms } => {
            let (mut engine, state) = open(&store)?;
            let taps = usize::try_from(taps).context("tap count does not fit in memory")?;
            let start = engine.session().session_start;
            let report = simulate_session(
                &mut engine,
                state,
                start,
                TimeDelta::milliseconds(i64::from(interval_ms)),
                taps,
            );
            for event in &report.events {
                println!("{}", describe(event));
            }
            print_status(&report.state);
            let won = report.state.is_won();
            let processed = report.taps;
            save(&store, &engine, report.state)?;
            if processed < taps {
                if !won {
                    bail!("only {processed} of {taps} taps fit in the supported date range");
                }
                info!(requested = taps, processed, "game won, remaining taps skipped");
            }
        }
        Commands::Achievements { show_hidden } => {
            let (_, state) = open(&store)?;
            for view in visible_achievements(&state, show_hidden) {
                let mark = if view.unlocked { "x" } else { " " };
                let mut line = format!("[{}] {:<18} {}", mark, view.title, view.description);
                if let Some(reward) = view.reward {
                    line.push_str(&format!("  (+{:.1}x)", reward));
                }
                if let Some(req) = &view.requirement {
                    line.push_str(&format!("  <{}>", req));
                }
                println!("{}", line);
            }
        }
        Commands::Themes => {
            let (_, state) = open(&store)?;
            for theme in all_themes() {
                let status = if state.is_theme_unlocked(theme.id) {
                    if state.selected_theme_id == theme.id {
                        "selected".to_string()
                    } else {
                        "unlocked".to_string()
                    }
                } else {
                    format!("level {}", theme.unlock_level)
                };
                println!("{:<10} {:<12} {}", theme.id, theme.name, status);
            }
        }
        Commands::SelectTheme { id } => {
            let (engine, mut state) = open(&store)?;
            select_theme(&mut state, &id)?;
            println!("Theme set to {}.", state.selected_theme_id);
            save(&store, &engine, state)?;
        }
        Commands::Reset => {
            store
                .delete()
                .with_context(|| format!("failed to delete {}", store.path().display()))?;
            println!("Progress reset.");
        }
    }

    Ok(())
}

/// Load the saved game (or start a new one) and begin a session now.
fn open(store: &JsonFileStore) -> Result<(Engine, GameState)> {
    let loaded = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let (state, last_login) = match loaded {
        Some(snapshot) => (snapshot.state, snapshot.last_login),
        None => {
            info!(path = %store.path().display(), "no save found, starting a new game");
            (GameState::new(), None)
        }
    };
    let engine = Engine::start(&SystemClock, last_login);
    let state = engine.resume(state);
    Ok((engine, state))
}

fn save(store: &JsonFileStore, engine: &Engine, state: GameState) -> Result<()> {
    let snapshot = Snapshot {
        state,
        last_login: Some(engine.session().session_start),
    };
    store
        .save(&snapshot)
        .with_context(|| format!("failed to write {}", store.path().display()))
}

fn print_status(state: &GameState) {
    let stats = Stats::from_state(state);
    println!("[ {} ]", stats.button_caption);
    println!("Level:        {}", stats.level);
    println!("Clicks:       {} / 1,000,000", stats.clicks);
    println!("Multiplier:   x {:.1}", stats.multiplier);
    println!(
        "Achievements: {}/{}",
        stats.achievements_unlocked, stats.achievements_total
    );
    if let Some(remaining) = stats.clicks_to_next_level {
        println!("Next level:   {} more clicks", remaining);
    }
    if let Some(tier) = stats.tier {
        println!("Unlocked Tier {}", tier);
    }
    println!(
        "Progress:     {:.2}% ({} taps to win at this multiplier)",
        stats.progress_percent, stats.taps_to_win
    );
}

fn describe(event: &Event) -> String {
    match event {
        Event::LevelUp { level } => format!("Level up! Now level {}.", level),
        Event::ThemeUnlocked { id } => format!("New theme unlocked: {}", id),
        Event::AchievementUnlocked { id, reward } => {
            let title = find_achievement(id).map_or(*id, |a| a.title);
            format!("Achievement unlocked: {} (+{:.1}x multiplier)", title, reward)
        }
        Event::GameWon { .. } => {
            "Congratulations! You've reached 1 million clicks and won the game!".to_string()
        }
    }
}
