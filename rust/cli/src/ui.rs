//! UI helper functions for terminal output formatting.

use std::io::Write;

use showdown_engine::cards::Card;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Space separated text form, e.g. `As Kd 7c`.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
