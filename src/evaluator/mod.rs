pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Detailed evaluation result. `value` drives ordering; two evaluations with
/// the same category and tiebreak ranks compare equal regardless of suits.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and five rank tiebreakers into a comparable value.
    /// Uses 6 bits per rank to be generous (supports up to 63).
    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        // Layout (most significant -> least):
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]
        // r0 is the primary tiebreaker and must be more significant than r1..r4.
        const CAT_SHIFT: u32 = 48; // put category in the high byte
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks_desc.iter().enumerate() {
            // Place r0 just below the category, then r1, ...
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: expected 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("invalid hand: duplicate card {0}")]
    DuplicateCard(Card),
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("board incomplete: {0} cards (showdown needs 5)")]
    IncompleteBoard(usize),
}

/// Evaluate any 5 to 7 distinct cards and return the strength of the best
/// five-card hand among them.
///
/// A count outside 5..=7 or a repeated card is a caller error: it signals a
/// bug in state construction upstream and the same input must not be retried.
///
/// ```
/// use holdem_equity::cards::parse_cards;
/// use holdem_equity::evaluator::{evaluate, Category};
///
/// let seven = parse_cards("As Ks Qs Js 10s 2d 3c").unwrap();
/// let eval = evaluate(&seven).unwrap();
/// assert_eq!(eval.category, Category::StraightFlush);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    for (i, &c) in cards.iter().enumerate() {
        if cards[..i].contains(&c) {
            return Err(EvalError::DuplicateCard(c));
        }
    }

    if let Ok(five) = <&[Card; 5]>::try_from(cards) {
        return Ok(evaluate_five(five));
    }

    let mut best: Option<Evaluation> = None;
    for indices in combinations::FiveCardCombinations::new(cards.len()) {
        let hand = [
            cards[indices[0]],
            cards[indices[1]],
            cards[indices[2]],
            cards[indices[3]],
            cards[indices[4]],
        ];
        let eval = evaluate_five(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }

    // At least one combination exists for 6 or 7 cards.
    best.ok_or(EvalError::CardCount(cards.len()))
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    // Build analysis once (sorted cards, rank counts, groups, flush/straight info)
    let analysis = HandAnalysis::new(cards);

    // Check categories in priority order (highest to lowest)
    for detector in DETECTORS.iter() {
        if detector.detect(&analysis) {
            return detector.build_evaluation(&analysis);
        }
    }

    // Unreachable: HighCard detector always matches as fallback
    unreachable!("HighCard detector should always match")
}

/// Evaluate exactly seven cards: the best of all 21 five-card combinations.
/// Array-typed hot path used per simulated hand per trial.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    let mut best: Option<Evaluation> = None;

    for indices in combinations::FiveCardCombinations::new(7) {
        let hand = [
            cards[indices[0]],
            cards[indices[1]],
            cards[indices[2]],
            cards[indices[3]],
            cards[indices[4]],
        ];
        let eval = evaluate_five(&hand);

        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }

    best.unwrap_or_else(|| evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]))
}

/// Evaluate a Hold'em hand at showdown: two hole cards on a complete
/// five-card board.
///
/// ```
/// use holdem_equity::evaluator::{evaluate_holdem, Category};
/// use holdem_equity::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let board_cards = board.as_slice();
    if board_cards.len() < 5 {
        return Err(EvalError::IncompleteBoard(board_cards.len()));
    }
    let seven = [
        hole.first(),
        hole.second(),
        board_cards[0],
        board_cards[1],
        board_cards[2],
        board_cards[3],
        board_cards[4],
    ];
    Ok(evaluate_seven(&seven))
}

/// Compare two Hold'em hands on a shared board. Returns the ordering or a
/// validation error. Used for final showdown resolution.
///
/// ```
/// use holdem_equity::evaluator::compare_holdem;
/// use holdem_equity::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn evaluate_rejects_bad_counts() {
        let four = parse_cards("As Ks Qs Js").unwrap();
        assert!(matches!(evaluate(&four), Err(EvalError::CardCount(4))));

        let eight = parse_cards("As Ks Qs Js 10s 9s 8s 7s").unwrap();
        assert!(matches!(evaluate(&eight), Err(EvalError::CardCount(8))));
    }

    #[test]
    fn evaluate_rejects_duplicates() {
        let cards = parse_cards("As As Qs Js 10s").unwrap();
        assert!(matches!(evaluate(&cards), Err(EvalError::DuplicateCard(_))));
    }

    #[test]
    fn evaluate_six_cards_takes_best_subset() {
        // Six cards holding a flush that a naive first-five pick would miss.
        let six = parse_cards("2d Ah 9h 7h 3h 2h").unwrap();
        let eval = evaluate(&six).unwrap();
        assert_eq!(eval.category, Category::Flush);
    }

    #[test]
    fn evaluate_holdem_needs_full_board() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "2c 3d 4h".parse().unwrap();
        let err = evaluate_holdem(&hole, &board).unwrap_err();
        assert!(matches!(err, EvalError::IncompleteBoard(3)));
    }

    #[test]
    fn compare_errors_with_short_board() {
        let a: HoleCards = "As Ks".parse().unwrap();
        let b: HoleCards = "2c 3c".parse().unwrap();
        let board: Board = "2h 5d 9s".parse().unwrap();
        let err = compare_holdem(&a, &b, &board).unwrap_err();
        assert!(matches!(err, EvalError::IncompleteBoard(3)));
    }

    #[test]
    fn evaluate_five_categories() {
        let e = evaluate_five(&five("As Ks Qs Js 10s"));
        assert!(matches!(e.category, Category::StraightFlush));

        let e = evaluate_five(&five("Kc Kd Kh Ks 2s"));
        assert!(matches!(e.category, Category::FourOfAKind));

        let e = evaluate_five(&five("10c 10d 10h 2s 2h"));
        assert!(matches!(e.category, Category::FullHouse));

        let e = evaluate_five(&five("Ah 9h 7h 3h 2h"));
        assert!(matches!(e.category, Category::Flush));

        let e = evaluate_five(&five("Ac 2d 3h 4s 5c"));
        assert!(matches!(e.category, Category::Straight));

        let e = evaluate_five(&five("Qc Qd Qh 9s 2c"));
        assert!(matches!(e.category, Category::ThreeOfAKind));

        let e = evaluate_five(&five("Jc Jd 9c 9h 2s"));
        assert!(matches!(e.category, Category::TwoPair));

        let e = evaluate_five(&five("Ah Ad 10s 9c 2d"));
        assert!(matches!(e.category, Category::Pair));

        let e = evaluate_five(&five("Ah Kd 7s 5c 2d"));
        assert!(matches!(e.category, Category::HighCard));
    }
}
