use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::strength::Strength;
use super::suit::Suit;

/// A lazy evaluator for a hand's strength.
///
/// Works on the compact bitstring representation of a [`Hand`], searching
/// for the best category with rank- and suit-mask arithmetic. Handles any
/// hand of up to seven cards; in practice the input is two hole cards plus
/// zero to five community cards.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in hand")
    }

    /// Side cards breaking ties within the ranking's category.
    /// Flush kickers are drawn from the flush suit only; made-hand ranks
    /// are masked out everywhere else.
    pub fn find_kickers(&self, ranking: Ranking) -> Kickers {
        let pool = match ranking {
            Ranking::Flush(_) => {
                let suit = self.find_suit_of_flush().expect("flush has a suit");
                self.suit_profile()[suit as usize]
            }
            _ => self.rank_profile(),
        };
        let mut bits = pool & !ranking.mask();
        while bits.count_ones() as usize > ranking.n_kickers() {
            bits &= !(1 << bits.trailing_zeros());
        }
        Kickers::from(bits)
    }

    /// The five cards realizing this hand's strength, for display.
    /// Exhausts the at most C(7,5) = 21 subsets.
    pub fn best_five(&self) -> Vec<Card> {
        let cards = Vec::<Card>::from(self.0);
        if cards.len() <= 5 {
            return cards;
        }
        (0u32..1 << cards.len())
            .filter(|m| m.count_ones() == 5)
            .map(|m| {
                cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| m & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect::<Vec<Card>>()
            })
            .max_by_key(|five| Strength::from(Hand::from(five.clone())))
            .expect("non-empty hand")
    }

    //

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_under(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.find_rank_of_n_oak_under(2, Some(trips))
                .map(|pairs| Ranking::FullHouse(trips, pairs))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_profile())
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            let ranks = self.suit_profile()[suit as usize];
            match self.find_rank_of_straight(ranks) {
                Some(rank) => Ranking::StraightFlush(rank),
                None => Ranking::Flush(Rank::from(ranks)),
            }
        })
    }

    //

    /// Five consecutive rank bits, or the wheel (A-2-3-4-5, high card Five).
    fn find_rank_of_straight(&self, ranks: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b_1000000001111;
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_profile()
            .iter()
            .position(|ranks| ranks.count_ones() >= 5)
            .map(|i| Suit::from(i as u8))
    }
    /// Highest rank held at least n times, strictly below the given rank.
    fn find_rank_of_n_oak_under(&self, n: u32, below: Option<Rank>) -> Option<Rank> {
        let ceiling = below.map(u8::from).unwrap_or(13);
        let counts = self.rank_counts();
        (0..ceiling)
            .rev()
            .find(|r| counts[*r as usize] >= n)
            .map(Rank::from)
    }
    fn find_rank_of_n_oak(&self, n: u32) -> Option<Rank> {
        self.find_rank_of_n_oak_under(n, None)
    }

    //

    /// Which ranks are in the hand, neglecting suit.
    fn rank_profile(&self) -> u16 {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0, |acc, r| acc | r)
    }
    /// Which ranks are in the hand, grouped by suit.
    fn suit_profile(&self) -> [u16; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| (u8::from(c.suit()), u16::from(c.rank())))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r;
                suits
            })
    }
    /// How many of each rank the hand holds.
    fn rank_counts(&self) -> [u32; 13] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u8::from(c.rank()))
            .fold([0; 13], |mut counts, r| {
                counts[r as usize] += 1;
                counts
            })
    }
}
