//! Command-line interface for the terminal driver.

use clap::{Parser, ValueEnum};
use playout_tictactoe::Player;
use std::path::PathBuf;

/// Play tic-tac-toe in the terminal against a playout-scoring computer.
#[derive(Parser, Debug)]
#[command(name = "playout_cli")]
#[command(about = "Terminal tic-tac-toe against a playout-scoring computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML session configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which player opens the game.
    #[arg(long, value_enum)]
    pub first_mover: Option<FirstMover>,

    /// Playouts per open square when the computer moves.
    #[arg(long)]
    pub simulations: Option<u32>,

    /// Seed for the playout RNG, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit session events as JSON lines instead of friendly text.
    #[arg(long)]
    pub json: bool,
}

/// Who makes the opening move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FirstMover {
    /// The human opens the game.
    Human,
    /// The computer opens the game.
    Computer,
}

impl From<FirstMover> for Player {
    fn from(first_mover: FirstMover) -> Self {
        match first_mover {
            FirstMover::Human => Player::Human,
            FirstMover::Computer => Player::Computer,
        }
    }
}
