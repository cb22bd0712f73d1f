//! # showdown-engine: Single-Round Card Game Core
//!
//! Participants join and receive two private cards, then either fold or commit
//! a stake. At settlement five shared cards are revealed, every bettor's best
//! five-of-seven hand is evaluated, and the pot is split among the best
//! hand(s) after a house fee. Value is conserved exactly: refunds, fee,
//! winner shares, and the undivided remainder always add back up to the bets.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (index 0-51, Rank, Suit) and text form
//! - [`deck`] - Card pool guaranteeing no card is held twice
//! - [`rng`] - Pluggable randomness behind card draws
//! - [`hand`] - Five-card classification and best-of-seven selection
//! - [`pot`] - Pot sizing, excess refunds, fee, and winner split
//! - [`engine`] - Round orchestration (join/fold/bet/settle)
//! - [`game`] - Round state, settlement record, and snapshots
//! - [`player`] - Participant state
//! - [`rules`] - Round limits and precondition checks
//! - [`clock`] - Time source for the join window
//! - [`payout`] - Transfer list and the value-custody seam
//! - [`errors`] - Error types and their classes
//!
//! ## Quick Start
//!
//! ```rust
//! use showdown_engine::cards::parse_cards;
//! use showdown_engine::hand::{best_of_7, RankClass};
//!
//! let hole: [_; 2] = parse_cards("As Ks").unwrap().try_into().unwrap();
//! let board: [_; 5] = parse_cards("Qs Js Ts 2c 3c").unwrap().try_into().unwrap();
//!
//! let best = best_of_7(&hole, &board);
//! assert_eq!(best.class, RankClass::StraightFlush);
//! assert_eq!(best.tiebreak, 14);
//! ```
//!
//! ## Deterministic Rounds
//!
//! Card draws consume an injected [`rng::RandomSource`]. A seeded
//! [`rng::ChaChaSource`] makes a whole round reproducible:
//!
//! ```rust
//! use showdown_engine::engine::GameSession;
//! use showdown_engine::rules::RoundConfig;
//!
//! let mut a = GameSession::with_seed(RoundConfig::default(), 42).unwrap();
//! let mut b = GameSession::with_seed(RoundConfig::default(), 42).unwrap();
//! a.start(600).unwrap();
//! b.start(600).unwrap();
//! assert_eq!(a.join(1).unwrap(), b.join(1).unwrap());
//! ```

pub mod cards;
pub mod clock;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod payout;
pub mod player;
pub mod pot;
pub mod rng;
pub mod rules;
