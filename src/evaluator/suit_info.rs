use crate::cards::{Card, Suit};

/// Information about whether all cards share the same suit (flush).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    /// Detect if all 5 cards have the same suit.
    pub fn detect(cards: &[Card; 5]) -> Self {
        let first = cards[0].suit();
        if cards[1..].iter().all(|c| c.suit() == first) {
            SuitInfo { is_flush: true, flush_suit: Some(first) }
        } else {
            SuitInfo { is_flush: false, flush_suit: None }
        }
    }
}
