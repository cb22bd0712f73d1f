//! Command handler modules for the showdown CLI.
//!
//! Each command lives in its own file and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`, taking its
//! output streams as `&mut dyn Write`.

mod cfg;
mod eval;
mod round;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use round::handle_round_command;
