use crate::cards::{Card, DECK_SIZE};
use crate::errors::GameError;
use crate::rng::RandomSource;

/// Availability table for the 52 cards of one session.
///
/// Each slot is indexed by [`Card::index`]; `true` means the card is held by a
/// hand or the board. `remaining` always equals the number of free slots, so a
/// card can never be issued to two hands at once.
///
/// # Examples
///
/// ```
/// use showdown_engine::deck::CardPool;
/// use showdown_engine::rng::SequenceSource;
///
/// let mut pool = CardPool::new();
/// let mut src = SequenceSource::new(vec![7, 7]);
/// let a = pool.issue(&mut src).unwrap();
/// let b = pool.issue(&mut src).unwrap();
/// assert_ne!(a, b);
/// assert_eq!(pool.remaining(), 50);
/// pool.release(a);
/// assert_eq!(pool.remaining(), 51);
/// ```
#[derive(Debug, Clone)]
pub struct CardPool {
    in_use: [bool; DECK_SIZE],
    remaining: usize,
}

impl Default for CardPool {
    fn default() -> Self {
        Self::new()
    }
}

impl CardPool {
    pub fn new() -> Self {
        Self {
            in_use: [false; DECK_SIZE],
            remaining: DECK_SIZE,
        }
    }

    /// Marks every card free again.
    pub fn reset(&mut self) {
        self.in_use = [false; DECK_SIZE];
        self.remaining = DECK_SIZE;
    }

    /// Draws one free card.
    ///
    /// The source picks a starting slot; taken slots are skipped by probing
    /// forward, wrapping at 52. At most 52 slots are probed, so the call
    /// terminates whenever at least one card is free.
    pub fn issue(&mut self, source: &mut dyn RandomSource) -> Result<Card, GameError> {
        if self.remaining == 0 {
            return Err(GameError::PoolExhausted);
        }
        let start = source.next_index(DECK_SIZE) % DECK_SIZE;
        for step in 0..DECK_SIZE {
            let slot = (start + step) % DECK_SIZE;
            if !self.in_use[slot] {
                self.in_use[slot] = true;
                self.remaining -= 1;
                tracing::trace!(card = slot, remaining = self.remaining, "card issued");
                return Card::from_index(slot as u8).ok_or(GameError::PoolExhausted);
            }
        }
        // remaining > 0 guarantees a free slot above
        Err(GameError::PoolExhausted)
    }

    /// Issues `n` cards, all or nothing.
    pub fn issue_many(
        &mut self,
        source: &mut dyn RandomSource,
        n: usize,
    ) -> Result<Vec<Card>, GameError> {
        if self.remaining < n {
            return Err(GameError::NotEnoughCards {
                remaining: self.remaining,
                needed: n,
            });
        }
        (0..n).map(|_| self.issue(source)).collect()
    }

    /// Returns a card to the pool.
    ///
    /// The caller guarantees the card was issued and not yet released. Releasing
    /// a free card is ignored so the remaining count stays consistent.
    pub fn release(&mut self, card: Card) {
        let slot = card.index() as usize;
        if self.in_use[slot] {
            self.in_use[slot] = false;
            self.remaining += 1;
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_in_use(&self, card: Card) -> bool {
        self.in_use[card.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    #[test]
    fn probes_past_taken_slots_and_wraps() {
        let mut pool = CardPool::new();
        let mut src = SequenceSource::new(vec![51]);
        let first = pool.issue(&mut src).unwrap();
        let second = pool.issue(&mut src).unwrap();
        assert_eq!(first.index(), 51);
        assert_eq!(second.index(), 0);
    }

    #[test]
    fn release_of_free_card_is_ignored() {
        let mut pool = CardPool::new();
        pool.release(Card::from_index(3).unwrap());
        assert_eq!(pool.remaining(), 52);
    }

    #[test]
    fn issue_many_is_all_or_nothing() {
        let mut pool = CardPool::new();
        let mut src = SequenceSource::new(vec![0]);
        pool.issue_many(&mut src, 50).unwrap();
        let err = pool.issue_many(&mut src, 5).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughCards {
                remaining: 2,
                needed: 5
            }
        );
        assert_eq!(pool.remaining(), 2);
    }
}
