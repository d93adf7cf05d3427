//! Starbase - Main Binary
//!
//! Command-line entry point: play a game with any mix of human and computer
//! seats, or validate a card data file.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use starbase_rs::{
    config::Settings,
    core::PlayerKind,
    game::{
        GameConfig, GameEngine, HeuristicController, InteractiveController, PlayerController,
        VerbosityLevel,
    },
    loader::{builtin, CardSource, GameInitializer},
};
use std::path::{Path, PathBuf};

/// Controller type for a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ControllerKind {
    /// Deterministic computer player
    Heuristic,
    /// Human player via stdin
    Tui,
}

/// Verbosity level (accepts both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "starbase")]
#[command(about = "Starbase - dice-and-card board game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// Number of players (2-5)
        #[arg(long, default_value_t = 2)]
        players: usize,

        /// Controller per seat, comma separated (e.g. "tui,heuristic");
        /// missing seats default to heuristic
        #[arg(long, value_delimiter = ',', value_enum)]
        controllers: Vec<ControllerKind>,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Override (and persist) the victory threshold
        #[arg(long)]
        threshold: Option<u32>,

        /// Maximum rounds before the game is called
        #[arg(long, default_value_t = 50)]
        max_rounds: u32,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Card data file (JSON); built-in set when omitted
        #[arg(long, value_name = "CARDS_FILE")]
        cards: Option<PathBuf>,

        /// Settings file holding the persisted victory threshold
        #[arg(long, value_name = "SETTINGS_FILE", default_value = "starbase-settings.json")]
        settings: PathBuf,
    },

    /// Validate a card data file and print its layout
    Cards {
        /// Card data file (JSON); built-in set when omitted
        #[arg(value_name = "CARDS_FILE")]
        file: Option<PathBuf>,
    },
}

fn load_source(cards: Option<&Path>) -> anyhow::Result<CardSource> {
    match cards {
        Some(path) => CardSource::load_from_path(path)
            .with_context(|| format!("loading card file {}", path.display())),
        None => Ok(CardSource::from_records(&builtin::builtin_records())?),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_play(
    players: usize,
    controller_kinds: Vec<ControllerKind>,
    seed: Option<u64>,
    threshold: Option<u32>,
    max_rounds: u32,
    verbosity: VerbosityLevel,
    cards: Option<PathBuf>,
    settings_path: PathBuf,
) -> anyhow::Result<()> {
    let mut settings = Settings::load(&settings_path)
        .with_context(|| format!("loading settings {}", settings_path.display()))?;
    if let Some(threshold) = threshold {
        if threshold != settings.victory_threshold {
            settings.set_victory_threshold(threshold, &settings_path)?;
        }
    }

    let seats: Vec<ControllerKind> = (0..players)
        .map(|i| controller_kinds.get(i).copied().unwrap_or(ControllerKind::Heuristic))
        .collect();
    let roster: Vec<(String, PlayerKind)> = seats
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let player_kind = match kind {
                ControllerKind::Tui => PlayerKind::Human,
                ControllerKind::Heuristic => PlayerKind::Computer,
            };
            (format!("Player {}", i + 1), player_kind)
        })
        .collect();

    let seed = seed.unwrap_or_else(rand::random);
    let config = GameConfig {
        victory_threshold: settings.victory_threshold,
        max_rounds,
    };
    let initializer = GameInitializer::new().with_seed(seed).with_config(config);
    let source = load_source(cards.as_deref())?;
    let mut game = initializer.initialize(&roster, source)?;
    game.logger.set_verbosity(verbosity);

    let mut controllers: Vec<Box<dyn PlayerController>> = game
        .players()
        .iter()
        .zip(&seats)
        .map(|(player, kind)| match kind {
            ControllerKind::Tui => {
                Box::new(InteractiveController::new(player.id())) as Box<dyn PlayerController>
            }
            ControllerKind::Heuristic => Box::new(HeuristicController::new(player.id())),
        })
        .collect();

    let mut engine = GameEngine::new(&mut game, initializer.dice_roller());
    let outcome = engine.run_game(&mut controllers)?;

    let winners: Vec<String> = outcome.winners.iter().map(|w| w.to_string()).collect();
    println!(
        "\nGame over after {} rounds ({:?}). Winners: {} (seed {seed})",
        outcome.rounds_played,
        outcome.end_reason,
        winners.join(", ")
    );
    Ok(())
}

fn run_cards(file: Option<PathBuf>) -> anyhow::Result<()> {
    let source = load_source(file.as_deref())?;
    let (l1, l2, l3) = source.deck_sizes();
    println!(
        "{} starting cards, decks: level 1 = {l1}, level 2 = {l2}, level 3 = {l3}",
        source.starting_cards().len()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            players,
            controllers,
            seed,
            threshold,
            max_rounds,
            verbosity,
            cards,
            settings,
        } => run_play(
            players,
            controllers,
            seed,
            threshold,
            max_rounds,
            verbosity.0,
            cards,
            settings,
        ),
        Commands::Cards { file } => run_cards(file),
    }
}
