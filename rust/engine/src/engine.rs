use std::sync::{Arc, Mutex, MutexGuard};

use crate::cards::Card;
use crate::clock::{Clock, SystemClock};
use crate::deck::CardPool;
use crate::errors::GameError;
use crate::game::{Round, RoundId, RoundInfo, RoundState, Settlement};
use crate::hand::{best_of_7, compare_results, HandResult};
use crate::payout::Ledger;
use crate::player::{Participant, ParticipantId};
use crate::pot::PotEngine;
use crate::rng::{ChaChaSource, RandomSource};
use crate::rules::{validate_bet, validate_fold, validate_join, RoundConfig, BOARD_SIZE};

/// Single-round game session: join, fold, bet, then settle.
///
/// A session owns its card pool, randomness source, and clock. Operations take
/// `&mut self`, so one session processes one operation at a time; use
/// [`SharedSession`] to drive it from several threads. Every operation checks
/// all of its preconditions before touching any state.
///
/// # Examples
///
/// ```
/// use showdown_engine::clock::ManualClock;
/// use showdown_engine::engine::GameSession;
/// use showdown_engine::game::RoundState;
/// use showdown_engine::rng::ChaChaSource;
/// use showdown_engine::rules::RoundConfig;
///
/// let clock = ManualClock::new(1_000);
/// let mut session = GameSession::new(
///     RoundConfig::default(),
///     Box::new(ChaChaSource::from_seed(7)),
///     Box::new(clock.clone()),
/// )
/// .unwrap();
///
/// session.start(300).unwrap();
/// session.join(1).unwrap();
/// session.join(2).unwrap();
/// session.bet(1, 100).unwrap();
/// session.bet(2, 150).unwrap();
///
/// let settlement = session.settle().unwrap();
/// assert_eq!(settlement.pot_size, 200);
/// assert_eq!(settlement.refunds, vec![(2, 50)]);
/// assert_eq!(session.state(), RoundState::Closed);
/// ```
pub struct GameSession {
    config: RoundConfig,
    pot: PotEngine,
    /// Free/in-use table for the current round
    pool: CardPool,
    source: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    state: RoundState,
    round: Option<Round>,
    next_round_id: RoundId,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("round", &self.round.as_ref().map(|r| r.id))
            .field("cards_remaining", &self.pool.remaining())
            .finish()
    }
}

impl GameSession {
    pub fn new(
        config: RoundConfig,
        source: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let pot = PotEngine::new(config.fee_percent)?;
        Ok(Self {
            config,
            pot,
            pool: CardPool::new(),
            source,
            clock,
            state: RoundState::Idle,
            round: None,
            next_round_id: 1,
        })
    }

    /// Session with a seeded ChaCha source and the system clock.
    pub fn with_seed(config: RoundConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(
            config,
            Box::new(ChaChaSource::from_seed(seed)),
            Box::new(SystemClock),
        )
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn cards_remaining(&self) -> usize {
        self.pool.remaining()
    }

    /// Opens a new round lasting `duration_secs` from now.
    pub fn start(&mut self, duration_secs: u64) -> Result<RoundId, GameError> {
        if self.state == RoundState::Active {
            return Err(GameError::AlreadyActive);
        }
        if duration_secs <= self.config.join_cutoff_secs {
            return Err(GameError::DurationTooShort {
                duration: duration_secs,
                cutoff: self.config.join_cutoff_secs,
            });
        }
        let now = self.clock.now();
        let end_time = now
            .checked_add(duration_secs)
            .ok_or(GameError::Internal("round end time overflow"))?;

        let id = self.next_round_id;
        self.next_round_id += 1;
        self.pool.reset();
        self.round = Some(Round::new(id, now, end_time));
        self.state = RoundState::Active;
        tracing::info!(round_id = id, start = now, end = end_time, "round started");
        Ok(id)
    }

    /// Admits a participant and deals two hole cards.
    pub fn join(&mut self, id: ParticipantId) -> Result<[Card; 2], GameError> {
        let now = self.clock.now();
        let round = active(self.state, self.round.as_ref())?;
        validate_join(
            &self.config,
            round.participant(id),
            round.attempts(),
            self.pool.remaining(),
            now,
            round.end_time,
        )?;

        let mut pool = self.pool.clone();
        let first = pool.issue(self.source.as_mut())?;
        let second = pool.issue(self.source.as_mut())?;
        let hole = [first, second];

        self.pool = pool;
        let round = active_mut(self.state, self.round.as_mut())?;
        round.admit(Participant::joined(id, hole));
        tracing::debug!(
            round_id = round.id,
            participant = id,
            remaining = self.pool.remaining(),
            "participant joined"
        );
        Ok(hole)
    }

    /// Folds a participant who has not bet and returns their cards to the pool.
    pub fn fold(&mut self, id: ParticipantId) -> Result<[Card; 2], GameError> {
        let round = active_mut(self.state, self.round.as_mut())?;
        validate_fold(id, round.participant(id))?;
        let participant = round
            .participant_mut(id)
            .ok_or(GameError::NotParticipating(id))?;
        let hole = participant
            .fold()
            .ok_or(GameError::Internal("live participant without hole cards"))?;
        for card in hole {
            self.pool.release(card);
        }
        tracing::debug!(round_id = round.id, participant = id, "participant folded");
        Ok(hole)
    }

    /// Commits a stake for a participant who joined and has not bet yet.
    pub fn bet(&mut self, id: ParticipantId, amount: u64) -> Result<(), GameError> {
        let round = active_mut(self.state, self.round.as_mut())?;
        validate_bet(&self.config, id, round.participant(id), &round.bets(), amount)?;
        round.record_bet(id, amount);
        tracing::debug!(round_id = round.id, participant = id, amount, "bet placed");
        Ok(())
    }

    /// Settles the active round and seals it.
    ///
    /// With fewer than two bettors every stake is refunded. Otherwise the board
    /// is drawn, each bettor's best hand is evaluated, and all bettors sharing
    /// the top result split the pot. Nothing is committed unless every step,
    /// including the conservation check, succeeds.
    pub fn settle(&mut self) -> Result<Settlement, GameError> {
        let round = active(self.state, self.round.as_ref())?;
        let bets = round.bets();

        let (settlement, pool) = if bets.len() < 2 {
            (Settlement::refund_all(round.id, &bets), None)
        } else {
            let mut pool = self.pool.clone();
            let drawn = pool.issue_many(self.source.as_mut(), BOARD_SIZE)?;
            let board: [Card; BOARD_SIZE] = drawn
                .try_into()
                .map_err(|_| GameError::Internal("board draw returned wrong card count"))?;

            let mut hands: Vec<(ParticipantId, HandResult)> = Vec::with_capacity(bets.len());
            for &(id, _) in &bets {
                let hole = round
                    .participant(id)
                    .and_then(|p| p.hole)
                    .ok_or(GameError::Internal("bettor without hole cards"))?;
                hands.push((id, best_of_7(&hole, &board)));
            }
            let winners = select_winners(&hands);
            let (breakdown, distribution) = self.pot.settle(&bets, winners.len())?;
            let settlement = Settlement::showdown(
                round.id,
                board,
                &bets,
                hands,
                winners,
                breakdown,
                distribution,
            );
            (settlement, Some(pool))
        };

        if let Some(pool) = pool {
            self.pool = pool;
        }
        let round = active_mut(self.state, self.round.as_mut())?;
        round.seal(settlement.clone());
        self.state = RoundState::Closed;
        tracing::info!(
            round_id = settlement.round_id,
            bettors = settlement.betting_participants.len(),
            winners = settlement.winners.len(),
            pot = settlement.pot_size,
            fee = settlement.house_fee,
            "round settled"
        );
        Ok(settlement)
    }

    /// Settles, then hands the resulting transfers to `ledger`.
    ///
    /// The round is already `Closed` when the first transfer is issued.
    pub fn settle_with(&mut self, ledger: &mut dyn Ledger) -> Result<Settlement, GameError> {
        let settlement = self.settle()?;
        for transfer in settlement.transfers() {
            ledger.apply(&transfer);
        }
        Ok(settlement)
    }

    pub fn round_info(&self) -> RoundInfo {
        RoundInfo::snapshot(self.state, self.round.as_ref(), self.pool.remaining())
    }

    pub fn participant(&self, id: ParticipantId) -> Option<Participant> {
        self.round.as_ref()?.participant(id).cloned()
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.round.as_ref()?.settlement()
    }
}

fn active(state: RoundState, round: Option<&Round>) -> Result<&Round, GameError> {
    match (state, round) {
        (RoundState::Active, Some(r)) => Ok(r),
        _ => Err(GameError::NoActiveRound),
    }
}

fn active_mut(state: RoundState, round: Option<&mut Round>) -> Result<&mut Round, GameError> {
    match (state, round) {
        (RoundState::Active, Some(r)) => Ok(r),
        _ => Err(GameError::NoActiveRound),
    }
}

/// Every participant whose result equals the best one, in input order.
pub fn select_winners(hands: &[(ParticipantId, HandResult)]) -> Vec<ParticipantId> {
    let Some(best) = hands
        .iter()
        .map(|(_, h)| *h)
        .max_by(|a, b| compare_results(a, b))
    else {
        return Vec::new();
    };
    hands
        .iter()
        .filter(|(_, h)| compare_results(h, &best).is_eq())
        .map(|(id, _)| *id)
        .collect()
}

/// A [`GameSession`] behind a mutex. Clones share the session; operations
/// are serialised by the lock.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
}

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, GameSession>, GameError> {
        self.inner.lock().map_err(|_| GameError::SessionPoisoned)
    }

    pub fn start(&self, duration_secs: u64) -> Result<RoundId, GameError> {
        self.lock()?.start(duration_secs)
    }

    pub fn join(&self, id: ParticipantId) -> Result<[Card; 2], GameError> {
        self.lock()?.join(id)
    }

    pub fn fold(&self, id: ParticipantId) -> Result<[Card; 2], GameError> {
        self.lock()?.fold(id)
    }

    pub fn bet(&self, id: ParticipantId, amount: u64) -> Result<(), GameError> {
        self.lock()?.bet(id, amount)
    }

    pub fn settle(&self) -> Result<Settlement, GameError> {
        self.lock()?.settle()
    }

    pub fn settle_with(&self, ledger: &mut dyn Ledger) -> Result<Settlement, GameError> {
        self.lock()?.settle_with(ledger)
    }

    pub fn round_info(&self) -> Result<RoundInfo, GameError> {
        Ok(self.lock()?.round_info())
    }

    pub fn participant(&self, id: ParticipantId) -> Result<Option<Participant>, GameError> {
        Ok(self.lock()?.participant(id))
    }
}
