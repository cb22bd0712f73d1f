//! One complete round driven from the command line.
//!
//! Participants `1..=players` join in order, the ids listed in `--fold` fold,
//! and each remaining participant places the stake at its position in
//! `--bets`. The round is then settled against a [`RecordingLedger`] and the
//! outcome printed as JSON.

use std::io::Write;

use serde::Serialize;
use showdown_engine::cards::Card;
use showdown_engine::clock::{Clock, ManualClock, SystemClock};
use showdown_engine::engine::GameSession;
use showdown_engine::game::Settlement;
use showdown_engine::payout::{RecordingLedger, Transfer};
use showdown_engine::player::ParticipantId;
use showdown_engine::rng::ChaChaSource;

use crate::config;
use crate::error::CliError;
use crate::ui::format_cards;

#[derive(Debug, Serialize)]
struct RoundReport {
    seed: u64,
    round_id: u64,
    participants: Vec<ParticipantLine>,
    board: Option<String>,
    hands: Vec<HandLine>,
    winners: Vec<ParticipantId>,
    pot_size: u64,
    house_fee: u64,
    per_winner_share: u64,
    remainder: u64,
    transfers: Vec<Transfer>,
}

#[derive(Debug, Serialize)]
struct ParticipantLine {
    id: ParticipantId,
    hole: String,
    folded: bool,
    bet: u64,
}

#[derive(Debug, Serialize)]
struct HandLine {
    id: ParticipantId,
    class: String,
    tiebreak: u32,
}

pub fn handle_round_command(
    players: u64,
    bets: &[u64],
    fold: &[u64],
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;

    if players == 0 {
        return Err(CliError::InvalidInput("players must be at least 1".into()));
    }
    if bets.len() as u64 > players {
        return Err(CliError::InvalidInput(format!(
            "{} stakes given for {} players",
            bets.len(),
            players
        )));
    }
    if let Some(id) = fold.iter().find(|&&id| id == 0 || id > players) {
        return Err(CliError::InvalidInput(format!(
            "cannot fold unknown participant {}",
            id
        )));
    }

    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let clock = ManualClock::new(SystemClock.now());
    let mut session = GameSession::new(
        cfg.round_config(),
        Box::new(ChaChaSource::from_seed(seed)),
        Box::new(clock),
    )?;
    let round_id = session.start(cfg.duration_secs)?;

    let mut holes: Vec<(ParticipantId, [Card; 2])> = Vec::new();
    for id in 1..=players {
        holes.push((id, session.join(id)?));
    }
    for &id in fold {
        session.fold(id)?;
    }
    for (id, &amount) in (1..).zip(bets) {
        if amount > 0 {
            session.bet(id, amount)?;
        }
    }

    let mut ledger = RecordingLedger::new();
    let settlement = session.settle_with(&mut ledger)?;

    let participants = holes
        .iter()
        .map(|&(id, hole)| {
            let folded = fold.contains(&id);
            let bet = session.participant(id).map(|p| p.bet).unwrap_or(0);
            ParticipantLine {
                id,
                hole: format_cards(&hole),
                folded,
                bet,
            }
        })
        .collect();

    let report = build_report(seed, round_id, participants, &settlement, ledger.transcript);
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn build_report(
    seed: u64,
    round_id: u64,
    participants: Vec<ParticipantLine>,
    st: &Settlement,
    transfers: Vec<Transfer>,
) -> RoundReport {
    RoundReport {
        seed,
        round_id,
        participants,
        board: st.board.map(|b| format_cards(&b)),
        hands: st
            .hands
            .iter()
            .map(|(id, h)| HandLine {
                id: *id,
                class: h.class.to_string(),
                tiebreak: h.tiebreak,
            })
            .collect(),
        winners: st.winners.clone(),
        pot_size: st.pot_size,
        house_fee: st.house_fee,
        per_winner_share: st.per_winner_share,
        remainder: st.remainder,
        transfers,
    }
}
