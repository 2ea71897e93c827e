use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Category, Evaluation};

/// Each category detector knows how to recognize its category and build the
/// category-specific tie-break sequence.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool;
    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation;
}

/// Right-pad a partial tie-break sequence to five ranks. The padding rank is
/// the lowest possible so it never influences comparisons between hands of
/// the same category.
fn pad(ranks: &[Rank]) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    out[..ranks.len()].copy_from_slice(ranks);
    out
}

/// Straight Flush: five consecutive ranks, all same suit.
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.suit_info.is_flush && analysis.straight_info.is_straight
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let top_rank = analysis.straight_info.top_rank.unwrap();
        analysis.build_evaluation(Category::StraightFlush, pad(&[top_rank]))
    }
}

/// Four of a Kind: quad rank, then the kicker.
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.quad().is_some()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let quad_rank = analysis.rank_groups.quad().unwrap();
        let kicker = analysis.rank_groups.kickers()[0];
        analysis.build_evaluation(Category::FourOfAKind, pad(&[quad_rank, kicker]))
    }
}

/// Full House: trips rank, then the pair rank.
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.has_full_house()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let trips = analysis.rank_groups.trips().unwrap();
        let pair = analysis.rank_groups.pairs()[0];
        analysis.build_evaluation(Category::FullHouse, pad(&[trips, pair]))
    }
}

/// Flush: all five ranks descending break ties.
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.suit_info.is_flush
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        analysis.build_evaluation(Category::Flush, analysis.ranks)
    }
}

/// Straight: five consecutive ranks, mixed suits. Top rank breaks ties;
/// for the wheel the top rank is Five.
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_info.is_straight
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let top_rank = analysis.straight_info.top_rank.unwrap();
        analysis.build_evaluation(Category::Straight, pad(&[top_rank]))
    }
}

/// Three of a Kind: trips rank, then two kickers.
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.trips().is_some() && !analysis.rank_groups.has_full_house()
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let trips = analysis.rank_groups.trips().unwrap();
        let kickers = analysis.rank_groups.kickers();
        analysis.build_evaluation(Category::ThreeOfAKind, pad(&[trips, kickers[0], kickers[1]]))
    }
}

/// Two Pair: higher pair, lower pair, then the kicker.
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() == 2
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let pairs = analysis.rank_groups.pairs();
        let kicker = analysis.rank_groups.kickers()[0];
        analysis.build_evaluation(Category::TwoPair, pad(&[pairs[0], pairs[1], kicker]))
    }
}

/// One Pair: pair rank, then three kickers.
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> bool {
        analysis.rank_groups.pairs().len() == 1
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        let pair = analysis.rank_groups.pairs()[0];
        let kickers = analysis.rank_groups.kickers();
        analysis
            .build_evaluation(Category::Pair, pad(&[pair, kickers[0], kickers[1], kickers[2]]))
    }
}

/// High Card: all five ranks descending.
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn detect(&self, _analysis: &HandAnalysis) -> bool {
        true // Always matches as fallback
    }

    fn build_evaluation(&self, analysis: &HandAnalysis) -> Evaluation {
        analysis.build_evaluation(Category::HighCard, analysis.ranks)
    }
}

/// Detectors in precedence order, highest category first. The first match
/// wins for a given 5-card hand.
pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
