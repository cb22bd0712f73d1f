use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Participant, ParticipantId};

/// Cards that must stay in the pool after a join: two hole cards for the
/// joiner plus the five board cards drawn at settlement.
pub const JOIN_CARD_HEADROOM: usize = 7;

pub const BOARD_SIZE: usize = 5;

/// Tunable limits for a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Joins close this many seconds before the round ends
    pub join_cutoff_secs: u64,
    /// Cap on successful joins per round, folded participants included
    pub max_participants: usize,
    /// Cap on participants holding a live bet
    pub max_bettors: usize,
    /// House fee taken from the pot, in whole percent
    pub fee_percent: u8,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            join_cutoff_secs: 30,
            max_participants: 20,
            max_bettors: 9,
            fee_percent: 1,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_participants == 0 {
            return Err(GameError::InvalidConfig(
                "max_participants must be >0".into(),
            ));
        }
        if self.max_bettors < 2 {
            return Err(GameError::InvalidConfig("max_bettors must be >=2".into()));
        }
        if self.fee_percent > 100 {
            return Err(GameError::InvalidConfig(
                "fee_percent must be <=100".into(),
            ));
        }
        Ok(())
    }
}

/// Checks a join request against the round's limits.
///
/// # Errors
///
/// - [`GameError::JoinWindowClosed`] once `now >= end_time - join_cutoff`
/// - [`GameError::AlreadyParticipated`] for a repeat join, folded or not
/// - [`GameError::RoundFull`] when the participation counter is at its cap
/// - [`GameError::NotEnoughCards`] when fewer than seven cards remain
pub fn validate_join(
    cfg: &RoundConfig,
    existing: Option<&Participant>,
    attempts: usize,
    cards_remaining: usize,
    now: u64,
    end_time: u64,
) -> Result<(), GameError> {
    if now >= end_time.saturating_sub(cfg.join_cutoff_secs) {
        return Err(GameError::JoinWindowClosed);
    }
    if let Some(p) = existing {
        if p.participated {
            return Err(GameError::AlreadyParticipated(p.id));
        }
    }
    if attempts >= cfg.max_participants {
        return Err(GameError::RoundFull {
            cap: cfg.max_participants,
        });
    }
    if cards_remaining < JOIN_CARD_HEADROOM {
        return Err(GameError::NotEnoughCards {
            remaining: cards_remaining,
            needed: JOIN_CARD_HEADROOM,
        });
    }
    Ok(())
}

/// Checks that a participant may fold.
pub fn validate_fold(id: ParticipantId, existing: Option<&Participant>) -> Result<(), GameError> {
    let p = existing.ok_or(GameError::NotParticipating(id))?;
    if p.has_bet() {
        return Err(GameError::AlreadyBet(id));
    }
    if p.folded {
        return Err(GameError::AlreadyFolded(id));
    }
    Ok(())
}

/// Checks a bet request against the bets already placed, in bet order.
///
/// A stake is refused when the pot it would produce, the smallest stake
/// times the number of bettors, no longer fits in a `u64`.
///
/// # Examples
///
/// ```
/// use showdown_engine::errors::GameError;
/// use showdown_engine::rules::{validate_bet, RoundConfig};
///
/// let cfg = RoundConfig::default();
/// assert_eq!(validate_bet(&cfg, 4, None, &[], 10), Err(GameError::MustJoinFirst(4)));
/// ```
pub fn validate_bet(
    cfg: &RoundConfig,
    id: ParticipantId,
    existing: Option<&Participant>,
    bets: &[(ParticipantId, u64)],
    amount: u64,
) -> Result<(), GameError> {
    let p = existing.ok_or(GameError::MustJoinFirst(id))?;
    if p.folded {
        return Err(GameError::AlreadyFolded(id));
    }
    if p.has_bet() {
        return Err(GameError::AlreadyBet(id));
    }
    if amount == 0 {
        return Err(GameError::InvalidAmount(amount));
    }
    if bets.len() >= cfg.max_bettors {
        return Err(GameError::BettingFull {
            cap: cfg.max_bettors,
        });
    }
    let min_bet = bets.iter().map(|&(_, b)| b).fold(amount, u64::min);
    let fits = u64::try_from(bets.len() + 1)
        .ok()
        .and_then(|count| min_bet.checked_mul(count))
        .is_some();
    if !fits {
        return Err(GameError::StakeOverflow(amount));
    }
    Ok(())
}
