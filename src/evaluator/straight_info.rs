use crate::cards::Rank;

/// Information about whether a hand contains a straight and its top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Detect a straight from an array of 5 ranks.
    ///
    /// A straight is five consecutive distinct ranks; the wheel (A-2-3-4-5)
    /// counts with the Ace playing low and Five on top. The Ace plays low
    /// nowhere else.
    pub fn detect(ranks: &[Rank; 5]) -> Self {
        let mut sorted_ranks = *ranks;
        sorted_ranks.sort_by(|a, b| b.cmp(a));

        // Five consecutive descending ranks (implies all distinct).
        let is_consecutive =
            (0..4).all(|i| sorted_ranks[i].value() == sorted_ranks[i + 1].value() + 1);
        if is_consecutive {
            return StraightInfo { is_straight: true, top_rank: Some(sorted_ranks[0]) };
        }

        // Wheel: sorted descending this reads A-5-4-3-2.
        let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
        if sorted_ranks == wheel {
            return StraightInfo { is_straight: true, top_rank: Some(Rank::Five) };
        }

        StraightInfo { is_straight: false, top_rank: None }
    }
}
