use thiserror::Error;

use crate::player::ParticipantId;

/// Broad failure classes callers can branch on without matching every variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorClass {
    /// Wrong state, timing, or duplicate action. Nothing was mutated.
    PreconditionViolation,
    /// Card pool or a round cap is used up. Retry in the next round.
    ResourceExhausted,
    /// Pot totals failed to balance. A defect, never a user error.
    ArithmeticInvariantViolation,
    /// Broken internal state or a poisoned session lock. A defect.
    InternalFault,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Round duration {duration}s must exceed the join cutoff of {cutoff}s")]
    DurationTooShort { duration: u64, cutoff: u64 },
    #[error("A round is already active")]
    AlreadyActive,
    #[error("No active round")]
    NoActiveRound,
    #[error("Participant {0} already participated in this round")]
    AlreadyParticipated(ParticipantId),
    #[error("Round is full ({cap} participation attempts)")]
    RoundFull { cap: usize },
    #[error("Not enough cards left: {remaining} remaining, {needed} needed")]
    NotEnoughCards { remaining: usize, needed: usize },
    #[error("Join window closed")]
    JoinWindowClosed,
    #[error("Participant {0} is not in this round")]
    NotParticipating(ParticipantId),
    #[error("Participant {0} already placed a bet")]
    AlreadyBet(ParticipantId),
    #[error("Participant {0} already folded")]
    AlreadyFolded(ParticipantId),
    #[error("Participant {0} must join before betting")]
    MustJoinFirst(ParticipantId),
    #[error("Invalid bet amount: {0}")]
    InvalidAmount(u64),
    #[error("Bet of {0} would overflow the pot")]
    StakeOverflow(u64),
    #[error("Betting is full ({cap} bettors)")]
    BettingFull { cap: usize },
    #[error("Card pool exhausted")]
    PoolExhausted,
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Pot arithmetic failed: {0}")]
    ArithmeticInvariant(&'static str),
    #[error("Internal error: {0}")]
    Internal(&'static str),
    #[error("Session lock poisoned")]
    SessionPoisoned,
}

impl GameError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GameError::RoundFull { .. }
            | GameError::NotEnoughCards { .. }
            | GameError::BettingFull { .. }
            | GameError::PoolExhausted => ErrorClass::ResourceExhausted,
            GameError::ArithmeticInvariant(_) => ErrorClass::ArithmeticInvariantViolation,
            GameError::Internal(_) | GameError::SessionPoisoned => ErrorClass::InternalFault,
            _ => ErrorClass::PreconditionViolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_and_pool_are_resource_exhaustion() {
        assert_eq!(
            GameError::RoundFull { cap: 3 }.class(),
            ErrorClass::ResourceExhausted
        );
        assert_eq!(GameError::PoolExhausted.class(), ErrorClass::ResourceExhausted);
        assert_eq!(
            GameError::NotEnoughCards {
                remaining: 6,
                needed: 7
            }
            .class(),
            ErrorClass::ResourceExhausted
        );
    }

    #[test]
    fn state_errors_are_precondition_violations() {
        assert_eq!(GameError::NoActiveRound.class(), ErrorClass::PreconditionViolation);
        assert_eq!(GameError::AlreadyBet(1).class(), ErrorClass::PreconditionViolation);
        assert_eq!(
            GameError::ArithmeticInvariant("fee").class(),
            ErrorClass::ArithmeticInvariantViolation
        );
    }

    #[test]
    fn lock_and_internal_faults_are_not_arithmetic() {
        assert_eq!(GameError::SessionPoisoned.class(), ErrorClass::InternalFault);
        assert_eq!(GameError::Internal("x").class(), ErrorClass::InternalFault);
        assert_eq!(
            GameError::StakeOverflow(9).class(),
            ErrorClass::PreconditionViolation
        );
    }
}
