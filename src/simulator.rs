//! Monte-Carlo equity estimation.
//!
//! Given a player's hole cards, the visible board and a count of live
//! opponents, repeatedly deal plausible completions of the unknown cards
//! from the residual deck and tally how often the player wins, ties or
//! loses at showdown. Trials are independent and identically distributed:
//! they can run sequentially, be split across threads, or be stopped early
//! with the tallies so far remaining statistically valid.

use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::evaluate_seven;
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Trial count used when the caller has no preference.
pub const DEFAULT_TRIALS: usize = 1000;

/// Largest supported opponent count (a full ring game minus the player).
pub const MAX_OPPONENTS: usize = 9;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimError {
    #[error("invalid trial count: {0} (need at least 1)")]
    InvalidTrialCount(usize),
    #[error("invalid opponent count: {0} (need 1 to 9)")]
    InvalidOpponentCount(usize),
    #[error("insufficient deck: deal needs {needed} cards, residual deck has {available}")]
    InsufficientDeck { needed: usize, available: usize },
    #[error("visible card {0} present in residual deck")]
    KnownCardInDeck(Card),
    #[error("invalid snapshot: {0}")]
    Hand(#[from] HandError),
}

/// Result of a single simulated showdown from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Tie,
    Lose,
}

/// Integer win/tie/lose counters.
///
/// Merging two tallies is plain summation, so per-worker tallies can be
/// combined in any order and partial runs stay valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Lose => self.losses += 1,
        }
    }

    pub fn merge(&mut self, other: Tally) {
        self.wins += other.wins;
        self.ties += other.ties;
        self.losses += other.losses;
    }

    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Aggregate the integer counts into percentages.
    pub fn equity(&self) -> Equity {
        let trials = self.total();
        let pct = |n: u64| {
            if trials == 0 {
                0.0
            } else {
                n as f64 * 100.0 / trials as f64
            }
        };
        Equity {
            win_pct: pct(self.wins),
            tie_pct: pct(self.ties),
            lose_pct: pct(self.losses),
            trials,
        }
    }
}

/// Action hinted by an equity estimate, by win-percentage thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    Raise,
    CallCheck,
    Fold,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Raise => write!(f, "RAISE"),
            Suggestion::CallCheck => write!(f, "CALL/CHECK"),
            Suggestion::Fold => write!(f, "FOLD"),
        }
    }
}

/// Estimated win/tie/lose percentages and the trial count behind them.
/// Percentages derive from integer tallies and sum to 100 within rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equity {
    pub win_pct: f64,
    pub tie_pct: f64,
    pub lose_pct: f64,
    pub trials: u64,
}

impl Equity {
    pub fn suggestion(&self) -> Suggestion {
        if self.win_pct >= 55.0 {
            Suggestion::Raise
        } else if self.win_pct >= 35.0 {
            Suggestion::CallCheck
        } else {
            Suggestion::Fold
        }
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win/Tie/Lose: {:5.1}% | {:4.1}% | {:5.1}%",
            self.win_pct, self.tie_pct, self.lose_pct
        )
    }
}

/// Read-only view of a hand in progress: the player's hole cards, the board
/// revealed so far, the number of live opponents, and the residual deck the
/// unknown cards are drawn from. Built fresh per street by the caller; the
/// engine never mutates it and shuffles a private copy per trial.
#[derive(Debug, Clone)]
pub struct Snapshot {
    hole: HoleCards,
    board: Board,
    opponents: usize,
    residual: Deck,
}

impl Snapshot {
    /// Build a snapshot deriving the residual deck from the full 52-card
    /// set minus every visible card.
    pub fn new(hole: HoleCards, board: Board, opponents: usize) -> Result<Self, SimError> {
        validate_holdem(&hole, &board)?;
        let mut known = board.as_slice().to_vec();
        known.extend(hole.as_array());
        let residual = Deck::residual(&known);
        Self::with_deck(hole, board, opponents, residual)
    }

    /// Build a snapshot with a caller-supplied residual deck. The deck must
    /// not contain any visible card and must cover the whole deal.
    pub fn with_deck(
        hole: HoleCards,
        board: Board,
        opponents: usize,
        residual: Deck,
    ) -> Result<Self, SimError> {
        validate_holdem(&hole, &board)?;
        if !(1..=MAX_OPPONENTS).contains(&opponents) {
            return Err(SimError::InvalidOpponentCount(opponents));
        }
        for &c in hole.as_array().iter().chain(board.as_slice()) {
            if residual.contains(c) {
                return Err(SimError::KnownCardInDeck(c));
            }
        }
        let snapshot = Self { hole, board, opponents, residual };
        let needed = snapshot.cards_needed();
        let available = snapshot.residual.len();
        if needed > available {
            return Err(SimError::InsufficientDeck { needed, available });
        }
        Ok(snapshot)
    }

    pub fn hole(&self) -> HoleCards {
        self.hole
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn opponents(&self) -> usize {
        self.opponents
    }

    pub fn residual_deck(&self) -> &Deck {
        &self.residual
    }

    /// Cards each trial draws: board completion plus two per opponent.
    pub fn cards_needed(&self) -> usize {
        (5 - self.board.len()) + 2 * self.opponents
    }
}

/// One simulated showdown: shuffle a private copy of the residual deck,
/// complete the board, deal every opponent two cards, rank all hands.
fn run_trial<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R, scratch: &mut Vec<Card>) -> Outcome {
    scratch.clear();
    scratch.extend_from_slice(snapshot.residual.as_slice());
    scratch.shuffle(rng);

    // Deal from the front: board completion first, then opponents.
    let board = snapshot.board.as_slice();
    let mut next = 0;
    let mut deal = || {
        let c = scratch[next];
        next += 1;
        c
    };

    let mut player: [Card; 7] = [snapshot.hole.first(); 7];
    player[1] = snapshot.hole.second();
    for (i, &c) in board.iter().enumerate() {
        player[2 + i] = c;
    }
    for i in board.len()..5 {
        player[2 + i] = deal();
    }

    let player_strength = evaluate_seven(&player);

    let mut best_opponent = None;
    for _ in 0..snapshot.opponents {
        let mut opponent = player;
        opponent[0] = deal();
        opponent[1] = deal();
        let strength = evaluate_seven(&opponent);
        if best_opponent.map_or(true, |b| strength > b) {
            best_opponent = Some(strength);
        }
    }

    // At least one opponent exists by construction.
    match best_opponent {
        Some(b) if player_strength > b => Outcome::Win,
        Some(b) if player_strength == b => Outcome::Tie,
        _ => Outcome::Lose,
    }
}

/// Drive `trials` simulated showdowns into a caller-held tally.
///
/// Callers that want to stop early (wall-clock bound, UI cancellation) can
/// invoke this repeatedly with small batches; the accumulated tally is valid
/// after every completed trial.
pub fn run_trials<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    trials: usize,
    rng: &mut R,
    tally: &mut Tally,
) {
    let mut scratch = Vec::with_capacity(snapshot.residual.len());
    for _ in 0..trials {
        tally.record(run_trial(snapshot, rng, &mut scratch));
    }
}

/// Estimate equity with fresh randomness.
pub fn estimate_equity(snapshot: &Snapshot, trials: usize) -> Result<Equity, SimError> {
    let mut rng = rand::rng();
    estimate_equity_with(snapshot, trials, &mut rng)
}

/// Estimate equity reproducibly: identical snapshot, trial count and seed
/// always produce identical tallies.
pub fn estimate_equity_seeded(
    snapshot: &Snapshot,
    trials: usize,
    seed: u64,
) -> Result<Equity, SimError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    estimate_equity_with(snapshot, trials, &mut rng)
}

/// Estimate equity drawing randomness from a caller-injected generator.
pub fn estimate_equity_with<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    trials: usize,
    rng: &mut R,
) -> Result<Equity, SimError> {
    if trials < 1 {
        return Err(SimError::InvalidTrialCount(trials));
    }
    let mut tally = Tally::default();
    run_trials(snapshot, trials, rng, &mut tally);
    Ok(tally.equity())
}

/// Estimate equity with trials fanned out over `workers` scoped threads.
///
/// Each worker runs its share of trials on its own seeded RNG stream and a
/// local tally; the locals are summed once at the end. No lock is taken per
/// trial. The result depends on `seed` and `workers` but not on scheduling.
pub fn estimate_equity_parallel(
    snapshot: &Snapshot,
    trials: usize,
    workers: usize,
    seed: u64,
) -> Result<Equity, SimError> {
    if trials < 1 {
        return Err(SimError::InvalidTrialCount(trials));
    }
    let workers = workers.clamp(1, trials);

    let mut tally = Tally::default();
    let locals = std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for w in 0..workers {
            // Even split; the first `trials % workers` workers take one extra.
            let share = trials / workers + usize::from(w < trials % workers);
            let worker_seed = seed.wrapping_add(w as u64);
            handles.push(scope.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(worker_seed);
                let mut local = Tally::default();
                run_trials(snapshot, share, &mut rng, &mut local);
                local
            }));
        }
        handles.into_iter().map(|h| h.join().expect("equity worker panicked")).collect::<Vec<_>>()
    });
    for local in locals {
        tally.merge(local);
    }
    Ok(tally.equity())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(hole: &str, board: &str, opponents: usize) -> Snapshot {
        Snapshot::new(hole.parse().unwrap(), board.parse().unwrap(), opponents).unwrap()
    }

    #[test]
    fn snapshot_residual_excludes_visible_cards() {
        let s = snapshot("As Ah", "Kc Qd Jh", 3);
        assert_eq!(s.residual_deck().len(), 52 - 5);
        for c in s.hole().as_array().iter().chain(s.board().as_slice()) {
            assert!(!s.residual_deck().contains(*c));
        }
    }

    #[test]
    fn cards_needed_per_street() {
        assert_eq!(snapshot("As Ah", "", 3).cards_needed(), 5 + 6);
        assert_eq!(snapshot("As Ah", "Kc Qd Jh", 3).cards_needed(), 2 + 6);
        assert_eq!(snapshot("As Ah", "Kc Qd Jh 2c 2d", 1).cards_needed(), 2);
    }

    #[test]
    fn opponent_count_bounds() {
        let hole: HoleCards = "As Ah".parse().unwrap();
        let err = Snapshot::new(hole, Board::default(), 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidOpponentCount(0)));
        let err = Snapshot::new(hole, Board::default(), 10).unwrap_err();
        assert!(matches!(err, SimError::InvalidOpponentCount(10)));
    }

    #[test]
    fn short_residual_deck_is_rejected() {
        let hole: HoleCards = "As Ah".parse().unwrap();
        let ten = Deck::from_cards(Deck::residual(&hole.as_array()).as_slice()[..10].to_vec());
        let err = Snapshot::with_deck(hole, Board::default(), 9, ten).unwrap_err();
        assert!(matches!(err, SimError::InsufficientDeck { needed: 23, available: 10 }));
    }

    #[test]
    fn known_card_in_residual_deck_is_rejected() {
        let hole: HoleCards = "As Ah".parse().unwrap();
        let full = Deck::standard();
        let err = Snapshot::with_deck(hole, Board::default(), 1, full).unwrap_err();
        assert!(matches!(err, SimError::KnownCardInDeck(_)));
    }

    #[test]
    fn zero_trials_rejected_before_any_work() {
        let s = snapshot("As Ah", "", 1);
        assert!(matches!(estimate_equity(&s, 0), Err(SimError::InvalidTrialCount(0))));
        assert!(matches!(estimate_equity_seeded(&s, 0, 1), Err(SimError::InvalidTrialCount(0))));
        assert!(matches!(
            estimate_equity_parallel(&s, 0, 4, 1),
            Err(SimError::InvalidTrialCount(0))
        ));
    }

    #[test]
    fn tally_merge_is_summation() {
        let mut a = Tally { wins: 3, ties: 1, losses: 2 };
        let b = Tally { wins: 1, ties: 0, losses: 4 };
        a.merge(b);
        assert_eq!(a, Tally { wins: 4, ties: 1, losses: 6 });
        assert_eq!(a.total(), 11);
    }

    #[test]
    fn equity_percentages_come_from_integer_counts() {
        let t = Tally { wins: 1, ties: 1, losses: 2 };
        let e = t.equity();
        assert_eq!(e.trials, 4);
        assert_eq!(e.win_pct, 25.0);
        assert_eq!(e.tie_pct, 25.0);
        assert_eq!(e.lose_pct, 50.0);
    }

    #[test]
    fn suggestion_thresholds() {
        let mk = |win_pct| Equity { win_pct, tie_pct: 0.0, lose_pct: 100.0 - win_pct, trials: 1 };
        assert_eq!(mk(60.0).suggestion(), Suggestion::Raise);
        assert_eq!(mk(55.0).suggestion(), Suggestion::Raise);
        assert_eq!(mk(40.0).suggestion(), Suggestion::CallCheck);
        assert_eq!(mk(20.0).suggestion(), Suggestion::Fold);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let s = snapshot("Ks Qs", "2c 7d Jh", 2);
        let a = estimate_equity_seeded(&s, 500, 99).unwrap();
        let b = estimate_equity_seeded(&s, 500, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn partial_runs_accumulate() {
        let s = snapshot("Ks Qs", "", 1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut tally = Tally::default();
        run_trials(&s, 100, &mut rng, &mut tally);
        assert_eq!(tally.total(), 100);
        run_trials(&s, 50, &mut rng, &mut tally);
        assert_eq!(tally.total(), 150);
    }

    #[test]
    fn parallel_conserves_trials() {
        let s = snapshot("As Ah", "", 3);
        let e = estimate_equity_parallel(&s, 1003, 4, 7).unwrap();
        assert_eq!(e.trials, 1003);
    }

    #[test]
    fn river_tie_board_plays_for_everyone() {
        // Board is a royal flush; every hand ties no matter the hole cards.
        let s = snapshot("2c 7d", "As Ks Qs Js 10s", 4);
        let e = estimate_equity_seeded(&s, 200, 3).unwrap();
        assert_eq!(e.tie_pct, 100.0);
    }
}
