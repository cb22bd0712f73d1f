//! Outbound value transfers.
//!
//! The engine never moves funds itself. A settled round is turned into a list
//! of [`Transfer`]s that a [`Ledger`] implementation carries out. Sessions
//! only hand transfers to a ledger after the round is sealed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::ParticipantId;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transfer {
    /// Stake returned to a bettor (excess over the pot, or a full refund)
    Refund { to: ParticipantId, amount: u64 },
    /// Winner's share of the net pot
    Payout { to: ParticipantId, amount: u64 },
    /// House fee withdrawn from the pot
    Fee { amount: u64 },
}

/// Value-custody collaborator.
pub trait Ledger {
    fn refund(&mut self, to: ParticipantId, amount: u64);
    fn payout(&mut self, to: ParticipantId, amount: u64);
    fn collect_fee(&mut self, amount: u64);

    fn apply(&mut self, transfer: &Transfer) {
        match *transfer {
            Transfer::Refund { to, amount } => self.refund(to, amount),
            Transfer::Payout { to, amount } => self.payout(to, amount),
            Transfer::Fee { amount } => self.collect_fee(amount),
        }
    }
}

/// In-memory ledger that keeps a transcript and running balances.
///
/// Balances are `u128`: one participant can receive both a refund and a
/// payout, which together may exceed `u64::MAX`.
#[derive(Debug, Clone, Default)]
pub struct RecordingLedger {
    pub transcript: Vec<Transfer>,
    pub balances: BTreeMap<ParticipantId, u128>,
    pub fees: u128,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credited(&self, id: ParticipantId) -> u128 {
        self.balances.get(&id).copied().unwrap_or(0)
    }

    /// Everything that left the pot: credits to participants plus fees.
    pub fn total_out(&self) -> u128 {
        self.balances.values().sum::<u128>() + self.fees
    }
}

impl Ledger for RecordingLedger {
    fn refund(&mut self, to: ParticipantId, amount: u64) {
        self.transcript.push(Transfer::Refund { to, amount });
        *self.balances.entry(to).or_default() += u128::from(amount);
    }

    fn payout(&mut self, to: ParticipantId, amount: u64) {
        self.transcript.push(Transfer::Payout { to, amount });
        *self.balances.entry(to).or_default() += u128::from(amount);
    }

    fn collect_fee(&mut self, amount: u64) {
        self.transcript.push(Transfer::Fee { amount });
        self.fees += u128::from(amount);
    }
}
