//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of each value
//! (default, file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "fee_percent": {
//!     "value": 1,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "duration_secs": {
            "value": config.duration_secs,
            "source": sources.duration_secs,
        },
        "join_cutoff_secs": {
            "value": config.join_cutoff_secs,
            "source": sources.join_cutoff_secs,
        },
        "max_participants": {
            "value": config.max_participants,
            "source": sources.max_participants,
        },
        "max_bettors": {
            "value": config.max_bettors,
            "source": sources.max_bettors,
        },
        "fee_percent": {
            "value": config.fee_percent,
            "source": sources.fee_percent,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
