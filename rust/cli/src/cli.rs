//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "showdown", version, about = "Single-round showdown engine CLI")]
pub struct ShowdownCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate 5 cards, or 2 hole cards followed by 5 board cards
    Eval {
        /// Cards in two-character form, e.g. `As Kd 7c`
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Play one seeded round and print the settlement as JSON
    Round {
        /// Number of participants joining (ids 1..=N)
        #[arg(long, default_value_t = 2)]
        players: u64,
        /// Stakes for participants 1, 2, ... in order; 0 means no bet
        #[arg(long, value_delimiter = ',', required = true)]
        bets: Vec<u64>,
        /// Participant ids that fold after joining
        #[arg(long, value_delimiter = ',')]
        fold: Vec<u64>,
        /// RNG seed; falls back to the configured seed, then a random one
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
