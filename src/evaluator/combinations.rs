/// Iterator over all C(n,5) ways of choosing 5 indices out of `n`, for
/// n in 5..=7 (the card counts the evaluator accepts).
///
/// Index-based and allocation-free so repeated simulation trials do not
/// churn the allocator. Combinations come out in lexicographic order.
pub struct FiveCardCombinations {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveCardCombinations {
    /// Create an iterator for 5-combinations from `n` elements.
    /// `n` must be at least 5; the caller validates card counts first.
    pub fn new(n: usize) -> Self {
        debug_assert!((5..=7).contains(&n));
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for FiveCardCombinations {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can still be incremented.
        let mut i = 4;
        loop {
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                // Reset all indices to the right.
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }

            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            // At most C(7,5) = 21 combinations.
            (1, Some(21))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choose(n: u64, k: u64) -> u64 {
        (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
    }

    #[test]
    fn counts_match_binomial() {
        for n in 5..=7 {
            let combos: Vec<[usize; 5]> = FiveCardCombinations::new(n).collect();
            assert_eq!(combos.len() as u64, choose(n as u64, 5));
        }
    }

    #[test]
    fn five_from_five_is_identity() {
        let combos: Vec<[usize; 5]> = FiveCardCombinations::new(5).collect();
        assert_eq!(combos, vec![[0, 1, 2, 3, 4]]);
    }

    #[test]
    fn all_combinations_valid() {
        for n in 5..=7 {
            for combo in FiveCardCombinations::new(n) {
                assert!(combo.iter().all(|&i| i < n));
                for i in 1..5 {
                    assert!(combo[i] > combo[i - 1]);
                }
            }
        }
    }

    #[test]
    fn first_and_last_combination_for_seven() {
        let combos: Vec<[usize; 5]> = FiveCardCombinations::new(7).collect();
        assert_eq!(combos.first(), Some(&[0, 1, 2, 3, 4]));
        assert_eq!(combos.last(), Some(&[2, 3, 4, 5, 6]));
    }

    #[test]
    fn no_duplicates() {
        for n in 5..=7 {
            let combos: Vec<[usize; 5]> = FiveCardCombinations::new(n).collect();
            let mut seen = std::collections::HashSet::new();
            for combo in combos {
                assert!(seen.insert(combo), "Duplicate combination found: {combo:?}");
            }
        }
    }

    #[test]
    fn lexicographic_order() {
        let combos: Vec<[usize; 5]> = FiveCardCombinations::new(7).collect();
        for i in 1..combos.len() {
            assert!(combos[i - 1] < combos[i]);
        }
    }

    #[test]
    fn iterator_exhausts() {
        let mut iter = FiveCardCombinations::new(6);
        for _ in 0..6 {
            assert!(iter.next().is_some());
        }
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
