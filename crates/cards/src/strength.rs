use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A fully-evaluated hand strength for comparison.
///
/// Combines a [`Ranking`] (category plus defining ranks) with [`Kickers`]
/// (tie-breaking side cards). Ordering is lexicographic: ranking first,
/// then kickers. Equal strengths chop any pot they contest.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.value
    }
    pub fn kickers(&self) -> Kickers {
        self.kicks
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let value = e.find_ranking();
        let kicks = e.find_kickers(value);
        Self::from((value, kicks))
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{:>5}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::from(Hand::try_from(s).unwrap())
    }

    #[test]
    fn kicker_breaks_pair_tie() {
        let hero = strength("As Ah Kd 7c 2s");
        let vill = strength("Ac Ad Qs 7h 2d");
        assert!(hero > vill);
    }

    #[test]
    fn equal_strengths_chop() {
        let hero = strength("As Ah Kd 7c 2s");
        let vill = strength("Ac Ad Kh 7s 2d");
        assert_eq!(hero, vill);
    }

    #[test]
    fn category_dominates_kickers() {
        let trips = strength("2s 2h 2d Ac Ks");
        let pair = strength("As Ah Kd Qc Js");
        assert!(trips > pair);
    }

    #[test]
    fn overpair_beats_board_kicker() {
        // Paired board: aces up with kings beats aces up with queens.
        let board = "Ah Ad 2c 3c 4d";
        let hero = strength(&format!("{} Kh Kd", board));
        let vill = strength(&format!("{} Qh Qd", board));
        assert!(hero > vill);
    }
}
