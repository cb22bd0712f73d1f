use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Positional base for tiebreak encoding. Ranks top out at 14, so base 15
/// keeps every rank sequence distinct.
const TIEBREAK_BASE: u32 = 15;

/// The nine hand categories, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RankClass {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl RankClass {
    /// Explicit ordinal used for ordering; independent of declaration order.
    pub fn strength(self) -> u8 {
        match self {
            RankClass::HighCard => 0,
            RankClass::OnePair => 1,
            RankClass::TwoPair => 2,
            RankClass::ThreeOfAKind => 3,
            RankClass::Straight => 4,
            RankClass::Flush => 5,
            RankClass::FullHouse => 6,
            RankClass::FourOfAKind => 7,
            RankClass::StraightFlush => 8,
        }
    }
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RankClass::HighCard => "High Card",
            RankClass::OnePair => "One Pair",
            RankClass::TwoPair => "Two Pair",
            RankClass::ThreeOfAKind => "Three of a Kind",
            RankClass::Straight => "Straight",
            RankClass::Flush => "Flush",
            RankClass::FullHouse => "Full House",
            RankClass::FourOfAKind => "Four of a Kind",
            RankClass::StraightFlush => "Straight Flush",
        };
        f.write_str(name)
    }
}

/// Outcome of evaluating a five-card hand.
///
/// `tiebreak` only orders hands of the same class. Hands with the same rank
/// multiset and flush status always produce identical results.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandResult {
    pub class: RankClass,
    pub tiebreak: u32,
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_results(self, other)
    }
}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order over hand results: class first, then tiebreak.
///
/// Both the evaluator and winner selection go through this function.
pub fn compare_results(a: &HandResult, b: &HandResult) -> Ordering {
    match a.class.strength().cmp(&b.class.strength()) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

/// Classifies exactly five distinct cards.
///
/// # Examples
///
/// ```
/// use showdown_engine::cards::parse_cards;
/// use showdown_engine::hand::{evaluate5, RankClass};
///
/// let cards = parse_cards("Ac Ad Ah Ks Kc").unwrap();
/// let hand: [_; 5] = cards.try_into().unwrap();
/// assert_eq!(evaluate5(&hand).class, RankClass::FullHouse);
/// ```
pub fn evaluate5(cards: &[Card; 5]) -> HandResult {
    let mut ranks = [0u8; 5];
    for (slot, c) in ranks.iter_mut().zip(cards.iter()) {
        *slot = c.rank().value();
    }
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let suit = cards[0].suit();
    let is_flush = cards.iter().all(|c| c.suit() == suit);
    let straight_high = straight_high(&ranks);

    // (count, rank) per distinct rank, biggest group first then highest rank
    let mut rank_counts = [0u8; 15];
    for &r in &ranks {
        rank_counts[r as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let has_quads = groups[0].0 == 4;
    let has_trips = groups[0].0 == 3;
    let pairs = groups.iter().filter(|(n, _)| *n == 2).count();

    if let (Some(high), true) = (straight_high, is_flush) {
        return HandResult {
            class: RankClass::StraightFlush,
            tiebreak: u32::from(high),
        };
    }

    let class = if has_quads {
        RankClass::FourOfAKind
    } else if has_trips && pairs == 1 {
        RankClass::FullHouse
    } else if is_flush {
        RankClass::Flush
    } else if let Some(high) = straight_high {
        return HandResult {
            class: RankClass::Straight,
            tiebreak: u32::from(high),
        };
    } else if has_trips {
        RankClass::ThreeOfAKind
    } else if pairs == 2 {
        RankClass::TwoPair
    } else if pairs == 1 {
        RankClass::OnePair
    } else {
        RankClass::HighCard
    };

    HandResult {
        class,
        tiebreak: encode_tiebreak(groups.iter().map(|&(_, r)| r)),
    }
}

/// Best five-card hand out of two hole cards and five board cards.
///
/// All 21 five-card subsets are evaluated.
pub fn best_of_7(hole: &[Card; 2], board: &[Card; 5]) -> HandResult {
    let all = [
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ];
    let mut best: Option<HandResult> = None;
    // each subset leaves out exactly two of the seven cards
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let mut five = [all[0]; 5];
            let mut k = 0;
            for (i, &c) in all.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    five[k] = c;
                    k += 1;
                }
            }
            let result = evaluate5(&five);
            best = match best {
                Some(b) if compare_results(&b, &result).is_ge() => Some(b),
                _ => Some(result),
            };
        }
    }
    best.unwrap_or(HandResult {
        class: RankClass::HighCard,
        tiebreak: 0,
    })
}

// Expects ranks sorted high to low.
fn straight_high(ranks: &[u8; 5]) -> Option<u8> {
    if ranks == &[14, 5, 4, 3, 2] {
        return Some(5);
    }
    let consecutive = ranks.windows(2).all(|w| w[0] == w[1] + 1);
    consecutive.then_some(ranks[0])
}

fn encode_tiebreak(ranks: impl Iterator<Item = u8>) -> u32 {
    ranks.fold(0, |acc, r| acc * TIEBREAK_BASE + u32::from(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn wheel_is_five_high() {
        let r = evaluate5(&five("Ac 2d 3h 4s 5c"));
        assert_eq!(r.class, RankClass::Straight);
        assert_eq!(r.tiebreak, 5);
    }

    #[test]
    fn kickers_decide_pairs() {
        let a = evaluate5(&five("Ac Ad Kh Qs Jc"));
        let b = evaluate5(&five("As Ah Kd Qc Tc"));
        assert_eq!(compare_results(&a, &b), Ordering::Greater);
    }

    #[test]
    fn pair_rank_outweighs_kickers() {
        let low_pair_high_kickers = evaluate5(&five("2c 2d Ah Ks Qc"));
        let high_pair_low_kickers = evaluate5(&five("3c 3d 4h 5s 7c"));
        assert!(high_pair_low_kickers > low_pair_high_kickers);
    }

    #[test]
    fn class_strength_is_strictly_increasing() {
        let order = [
            RankClass::HighCard,
            RankClass::OnePair,
            RankClass::TwoPair,
            RankClass::ThreeOfAKind,
            RankClass::Straight,
            RankClass::Flush,
            RankClass::FullHouse,
            RankClass::FourOfAKind,
            RankClass::StraightFlush,
        ];
        for w in order.windows(2) {
            assert!(w[0].strength() < w[1].strength());
        }
    }
}
