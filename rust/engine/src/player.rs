use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Caller-supplied participant identity.
pub type ParticipantId = u64;

/// One participant's state within a round.
///
/// `participated` is set on the first successful join and never cleared, so a
/// participant who folded cannot come back in the same round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant identifier
    pub id: ParticipantId,
    /// Hole cards while holding a live hand; `None` after a fold
    pub hole: Option<[Card; 2]>,
    /// Committed stake; zero until a bet is placed
    pub bet: u64,
    pub participated: bool,
    pub folded: bool,
}

impl Participant {
    pub fn joined(id: ParticipantId, hole: [Card; 2]) -> Self {
        Self {
            id,
            hole: Some(hole),
            bet: 0,
            participated: true,
            folded: false,
        }
    }

    pub fn has_bet(&self) -> bool {
        self.bet > 0
    }

    /// Clears the hole cards and returns them to the caller.
    pub fn fold(&mut self) -> Option<[Card; 2]> {
        self.folded = true;
        self.hole.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn fold_hands_back_cards_once() {
        let hole = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
        ];
        let mut p = Participant::joined(7, hole);
        assert_eq!(p.fold(), Some(hole));
        assert!(p.folded);
        assert!(p.participated);
        assert_eq!(p.fold(), None);
    }
}
