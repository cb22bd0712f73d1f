//! # Showdown CLI Library
//!
//! Command-line front end for the showdown engine: evaluate hands, play a
//! seeded round end to end, and inspect the resolved configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["showdown", "round", "--players", "3", "--bets", "10,20,30"];
//! let code = showdown_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `eval`: Classify 5 cards, or the best hand from 2 hole + 5 board cards
//! - `round`: Play one round and print its settlement as JSON
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, ShowdownCli};
use commands::{handle_cfg_command, handle_eval_command, handle_round_command};
pub use error::CliError;

/// Parses `args` and runs the selected subcommand.
///
/// Returns [`exit_code::SUCCESS`] on success. Parse failures and command
/// errors are written to `err` and return [`exit_code::ERROR`]. `--help` and
/// `--version` print to `out` and succeed.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["eval", "round", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ShowdownCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err, "Usage: showdown <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Round {
            players,
            bets,
            fold,
            seed,
        } => handle_round_command(players, &bets, &fold, seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
