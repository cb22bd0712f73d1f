//! Hand evaluation command.
//!
//! Five cards are classified directly. Seven cards are read as two hole cards
//! followed by the five board cards, and the best five are selected.

use std::collections::HashSet;
use std::io::Write;

use crate::error::CliError;
use crate::ui::format_cards;
use showdown_engine::cards::{Card, parse_cards};
use showdown_engine::hand::{HandResult, best_of_7, evaluate5};

pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let parsed = parse_all(cards)?;
    let result = match parsed.len() {
        5 => {
            let hand = to_array::<5>(&parsed[..])?;
            writeln!(out, "Hand: {}", format_cards(&hand))?;
            evaluate5(&hand)
        }
        7 => {
            let hole = to_array::<2>(&parsed[..2])?;
            let board = to_array::<5>(&parsed[2..])?;
            writeln!(out, "Hole: {}", format_cards(&hole))?;
            writeln!(out, "Board: {}", format_cards(&board))?;
            best_of_7(&hole, &board)
        }
        n => {
            return Err(CliError::InvalidInput(format!(
                "expected 5 or 7 cards, got {}",
                n
            )));
        }
    };
    write_result(out, &result)
}

fn parse_all(raw: &[String]) -> Result<Vec<Card>, CliError> {
    let mut cards = Vec::new();
    for token in raw {
        cards.extend(parse_cards(token)?);
    }
    let mut seen = HashSet::new();
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("duplicate card {}", dup)));
    }
    Ok(cards)
}

fn to_array<const N: usize>(cards: &[Card]) -> Result<[Card; N], CliError> {
    cards
        .try_into()
        .map_err(|_| CliError::InvalidInput(format!("expected {} cards", N)))
}

fn write_result(out: &mut dyn Write, result: &HandResult) -> Result<(), CliError> {
    writeln!(out, "Class: {}", result.class)?;
    writeln!(out, "Tiebreak: {}", result.tiebreak)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn evaluates_five_cards() {
        let mut out = Vec::new();
        handle_eval_command(&args("Ac Ad Ah Ks Kc"), &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("Class: Full House"));
    }

    #[test]
    fn evaluates_hole_plus_board() {
        let mut out = Vec::new();
        handle_eval_command(&args("As Ks Qs Js Ts 2c 3c"), &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("Hole: As Ks"));
        assert!(s.contains("Class: Straight Flush"));
        assert!(s.contains("Tiebreak: 14"));
    }

    #[test]
    fn rejects_duplicates_and_wrong_counts() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_eval_command(&args("As As Qs Js Ts"), &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_eval_command(&args("As Ks Qs"), &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_eval_command(&args("As Ks Qs Js Zz"), &mut out),
            Err(CliError::Engine(_))
        ));
    }
}
