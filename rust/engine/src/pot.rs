//! Pot sizing, excess refunds, house fee, and winner split.
//!
//! The pot is capped by the smallest stake: every bettor contributes exactly
//! `min_bet` and anything above that is handed back before the fee is taken.
//! All arithmetic is checked; a total that fails to balance surfaces as
//! [`GameError::ArithmeticInvariant`] before anything is paid out.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::ParticipantId;

/// Result of sizing the pot from a set of bets.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotBreakdown {
    pub min_bet: u64,
    pub pot_size: u64,
    /// Stake above `min_bet` per bettor, in bet order. Zero entries included.
    pub refunds: Vec<(ParticipantId, u64)>,
}

impl PotBreakdown {
    pub fn total_refunds(&self) -> u128 {
        self.refunds.iter().map(|&(_, r)| u128::from(r)).sum()
    }
}

/// How a pot is split between the house and the winners.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub house_fee: u64,
    pub net_pot: u64,
    pub per_winner_share: u64,
    pub winner_count: usize,
    /// Part of `net_pot` that does not divide evenly. Not paid to anyone.
    pub remainder: u64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PotEngine {
    fee_percent: u8,
}

impl PotEngine {
    pub fn new(fee_percent: u8) -> Result<Self, GameError> {
        if fee_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "fee_percent must be <= 100, got {fee_percent}"
            )));
        }
        Ok(Self { fee_percent })
    }

    pub fn fee_percent(&self) -> u8 {
        self.fee_percent
    }

    /// Sizes the pot as `min_bet * bettors` and computes each excess refund.
    ///
    /// ```
    /// use showdown_engine::pot::PotEngine;
    ///
    /// let pot = PotEngine::new(1).unwrap();
    /// let b = pot.compute(&[(1, 3), (2, 2), (3, 3), (4, 5)]).unwrap();
    /// assert_eq!(b.min_bet, 2);
    /// assert_eq!(b.pot_size, 8);
    /// ```
    pub fn compute(&self, bets: &[(ParticipantId, u64)]) -> Result<PotBreakdown, GameError> {
        let min_bet = bets
            .iter()
            .map(|&(_, b)| b)
            .min()
            .ok_or(GameError::ArithmeticInvariant("pot computed without bets"))?;
        let count = u64::try_from(bets.len())
            .map_err(|_| GameError::ArithmeticInvariant("bettor count overflow"))?;
        let pot_size = min_bet
            .checked_mul(count)
            .ok_or(GameError::ArithmeticInvariant("pot size overflow"))?;
        let refunds = bets.iter().map(|&(id, b)| (id, b - min_bet)).collect();
        Ok(PotBreakdown {
            min_bet,
            pot_size,
            refunds,
        })
    }

    /// Takes the house fee (rounded down) and splits the rest evenly.
    pub fn distribute(&self, pot_size: u64, winner_count: usize) -> Result<Distribution, GameError> {
        if winner_count == 0 {
            return Err(GameError::ArithmeticInvariant("split without winners"));
        }
        let fee = u128::from(pot_size) * u128::from(self.fee_percent) / 100;
        let house_fee = u64::try_from(fee)
            .map_err(|_| GameError::ArithmeticInvariant("house fee overflow"))?;
        let net_pot = pot_size
            .checked_sub(house_fee)
            .ok_or(GameError::ArithmeticInvariant("house fee exceeds pot"))?;
        let winners = winner_count as u64;
        let per_winner_share = net_pot / winners;
        let remainder = net_pot - per_winner_share * winners;
        Ok(Distribution {
            house_fee,
            net_pot,
            per_winner_share,
            winner_count,
            remainder,
        })
    }

    /// Sizes, splits, and verifies conservation in one step.
    pub fn settle(
        &self,
        bets: &[(ParticipantId, u64)],
        winner_count: usize,
    ) -> Result<(PotBreakdown, Distribution), GameError> {
        let breakdown = self.compute(bets)?;
        let distribution = self.distribute(breakdown.pot_size, winner_count)?;
        check_conservation(bets, &breakdown, &distribution)?;
        Ok((breakdown, distribution))
    }
}

/// Verifies that refunds, fee, shares, and remainder add back up to the bets.
pub fn check_conservation(
    bets: &[(ParticipantId, u64)],
    breakdown: &PotBreakdown,
    distribution: &Distribution,
) -> Result<(), GameError> {
    let total_bets: u128 = bets.iter().map(|&(_, b)| u128::from(b)).sum();
    let pot = u128::from(breakdown.pot_size);
    if pot + breakdown.total_refunds() != total_bets {
        tracing::warn!(total_bets, pot, "refunds do not balance against bets");
        return Err(GameError::ArithmeticInvariant("pot plus refunds != bets"));
    }
    let paid = u128::from(distribution.house_fee)
        + u128::from(distribution.per_winner_share) * distribution.winner_count as u128
        + u128::from(distribution.remainder);
    if paid != pot {
        tracing::warn!(paid, pot, "distribution does not balance against pot");
        return Err(GameError::ArithmeticInvariant("fee plus shares != pot"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_percent_fee_rounds_down_to_zero_on_small_pot() {
        let pot = PotEngine::new(1).unwrap();
        let d = pot.distribute(8, 1).unwrap();
        assert_eq!(d.house_fee, 0);
        assert_eq!(d.net_pot, 8);
        assert_eq!(d.per_winner_share, 8);
    }

    #[test]
    fn uneven_split_leaves_remainder() {
        let pot = PotEngine::new(5).unwrap();
        let d = pot.distribute(200, 3).unwrap();
        assert_eq!(d.house_fee, 10);
        assert_eq!(d.per_winner_share, 63);
        assert_eq!(d.remainder, 1);
    }

    #[test]
    fn rejects_fee_above_hundred_percent() {
        assert_eq!(PotEngine::new(100).unwrap().fee_percent(), 100);
        assert!(matches!(
            PotEngine::new(101),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn no_winners_is_an_invariant_error() {
        let pot = PotEngine::new(1).unwrap();
        assert_eq!(
            pot.distribute(10, 0),
            Err(GameError::ArithmeticInvariant("split without winners"))
        );
    }

    #[test]
    fn tampered_distribution_fails_conservation() {
        let pot = PotEngine::new(2).unwrap();
        let bets = [(1, 100), (2, 100)];
        let (b, mut d) = pot.settle(&bets, 2).unwrap();
        d.remainder += 1;
        assert!(check_conservation(&bets, &b, &d).is_err());
    }
}
