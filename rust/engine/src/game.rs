use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandResult;
use crate::payout::Transfer;
use crate::player::{Participant, ParticipantId};
use crate::pot::{Distribution, PotBreakdown};

pub type RoundId = u64;

/// Lifecycle of the session's current round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// No round has been started yet
    Idle,
    /// Accepting joins, folds, and bets
    Active,
    /// Settled and sealed
    Closed,
}

/// A single round: its participants, bets, and, once sealed, its settlement.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: RoundId,
    pub start_time: u64,
    pub end_time: u64,
    participants: BTreeMap<ParticipantId, Participant>,
    /// Betting participants in the order their bets arrived
    bettors: Vec<ParticipantId>,
    /// Successful joins, never decremented by folds
    attempts: usize,
    settlement: Option<Settlement>,
}

impl Round {
    pub fn new(id: RoundId, start_time: u64, end_time: u64) -> Self {
        Self {
            id,
            start_time,
            end_time,
            participants: BTreeMap::new(),
            bettors: Vec::new(),
            attempts: 0,
            settlement: None,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub(crate) fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(&id)
    }

    pub(crate) fn admit(&mut self, participant: Participant) {
        self.attempts += 1;
        self.participants.insert(participant.id, participant);
    }

    pub(crate) fn record_bet(&mut self, id: ParticipantId, amount: u64) {
        if let Some(p) = self.participants.get_mut(&id) {
            p.bet = amount;
            self.bettors.push(id);
        }
    }

    pub(crate) fn seal(&mut self, settlement: Settlement) {
        self.settlement = Some(settlement);
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn bettors(&self) -> &[ParticipantId] {
        &self.bettors
    }

    /// `(participant, stake)` for every bettor, in bet order.
    pub fn bets(&self) -> Vec<(ParticipantId, u64)> {
        self.bettors
            .iter()
            .filter_map(|id| self.participants.get(id).map(|p| (*id, p.bet)))
            .collect()
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }
}

/// Everything decided at settlement. Immutable once produced.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub round_id: RoundId,
    /// Board cards; `None` when fewer than two participants bet
    pub board: Option<[Card; 5]>,
    pub betting_participants: Vec<ParticipantId>,
    pub bet_amounts: Vec<u64>,
    /// Best hand per bettor, in bet order
    pub hands: Vec<(ParticipantId, HandResult)>,
    pub winners: Vec<ParticipantId>,
    pub pot_size: u64,
    pub house_fee: u64,
    pub per_winner_share: u64,
    /// Undivided part of the net pot; not transferred
    pub remainder: u64,
    /// Non-zero refunds, in bet order
    pub refunds: Vec<(ParticipantId, u64)>,
}

impl Settlement {
    /// Settlement for a round with fewer than two bettors: every stake is
    /// returned, no fee, no winners.
    pub fn refund_all(round_id: RoundId, bets: &[(ParticipantId, u64)]) -> Self {
        Self {
            round_id,
            board: None,
            betting_participants: bets.iter().map(|&(id, _)| id).collect(),
            bet_amounts: bets.iter().map(|&(_, b)| b).collect(),
            hands: Vec::new(),
            winners: Vec::new(),
            pot_size: 0,
            house_fee: 0,
            per_winner_share: 0,
            remainder: 0,
            refunds: bets.iter().copied().filter(|&(_, b)| b > 0).collect(),
        }
    }

    pub fn showdown(
        round_id: RoundId,
        board: [Card; 5],
        bets: &[(ParticipantId, u64)],
        hands: Vec<(ParticipantId, HandResult)>,
        winners: Vec<ParticipantId>,
        breakdown: PotBreakdown,
        distribution: Distribution,
    ) -> Self {
        Self {
            round_id,
            board: Some(board),
            betting_participants: bets.iter().map(|&(id, _)| id).collect(),
            bet_amounts: bets.iter().map(|&(_, b)| b).collect(),
            hands,
            winners,
            pot_size: breakdown.pot_size,
            house_fee: distribution.house_fee,
            per_winner_share: distribution.per_winner_share,
            remainder: distribution.remainder,
            refunds: breakdown
                .refunds
                .into_iter()
                .filter(|&(_, r)| r > 0)
                .collect(),
        }
    }

    /// Transfers in execution order: refunds, winner payouts, then the fee.
    pub fn transfers(&self) -> Vec<Transfer> {
        let mut out: Vec<Transfer> = self
            .refunds
            .iter()
            .map(|&(to, amount)| Transfer::Refund { to, amount })
            .collect();
        if self.per_winner_share > 0 {
            out.extend(self.winners.iter().map(|&to| Transfer::Payout {
                to,
                amount: self.per_winner_share,
            }));
        }
        if self.house_fee > 0 {
            out.push(Transfer::Fee {
                amount: self.house_fee,
            });
        }
        out
    }

    pub fn total_refunds(&self) -> u128 {
        self.refunds.iter().map(|&(_, r)| u128::from(r)).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Read-only snapshot of the current round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub round_id: Option<RoundId>,
    pub state: RoundState,
    pub start_time: u64,
    pub end_time: u64,
    pub betting_participants: Vec<ParticipantId>,
    pub board: Option<[Card; 5]>,
    pub pot_size: u64,
    pub house_fee: u64,
    pub winners: Vec<ParticipantId>,
    pub cards_remaining: usize,
    pub participation_count: usize,
}

impl RoundInfo {
    pub(crate) fn snapshot(state: RoundState, round: Option<&Round>, cards_remaining: usize) -> Self {
        let Some(round) = round else {
            return Self {
                round_id: None,
                state,
                start_time: 0,
                end_time: 0,
                betting_participants: Vec::new(),
                board: None,
                pot_size: 0,
                house_fee: 0,
                winners: Vec::new(),
                cards_remaining,
                participation_count: 0,
            };
        };
        let settled = round.settlement();
        Self {
            round_id: Some(round.id),
            state,
            start_time: round.start_time,
            end_time: round.end_time,
            betting_participants: round.bettors().to_vec(),
            board: settled.and_then(|s| s.board),
            pot_size: settled.map_or(0, |s| s.pot_size),
            house_fee: settled.map_or(0, |s| s.house_fee),
            winners: settled.map(|s| s.winners.clone()).unwrap_or_default(),
            cards_remaining,
            participation_count: round.attempts(),
        }
    }
}
