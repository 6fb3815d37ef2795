use super::card::Card;

/// An unordered set of cards as a bitstring of 52 bits stored in a u64.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub const fn count(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn add(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 | rhs.0)
    }
    pub fn remove(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 & !rhs.0)
    }
    /// All 52 cards not in this hand.
    pub const fn complement(&self) -> Self {
        Self(!self.0 & ((1 << 52) - 1))
    }
    /// Highest-to-lowest card iteration.
    pub fn into_iter(self) -> impl Iterator<Item = Card> {
        Vec::<Card>::from(self).into_iter()
    }
}

// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n)
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

// Vec<Card> isomorphism: OR the one-hot cards into the bitstring,
// pluck the 1s back out in descending order.
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |a, c| a | c))
    }
}
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut value = hand.0;
        let mut cards = Vec::with_capacity(hand.count());
        while value != 0 {
            let next = 63 - value.leading_zeros() as u8;
            cards.push(Card::from(next));
            value &= !(1u64 << next);
        }
        cards
    }
}

impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Self::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut cards = Vec::<Card>::from(*self).into_iter().peekable();
        while let Some(card) = cards.next() {
            write!(f, "{}", card)?;
            if cards.peek().is_some() {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_roundtrip() {
        let hand = Hand::try_from("As Kd 7h 2c 9s").unwrap();
        assert_eq!(hand.count(), 5);
        assert_eq!(hand, Hand::from(Vec::<Card>::from(hand)));
    }

    #[test]
    fn add_remove() {
        let a = Hand::try_from("As Kd").unwrap();
        let b = Hand::try_from("Kd").unwrap();
        assert_eq!(Hand::remove(a, b), Hand::try_from("As").unwrap());
        assert_eq!(Hand::add(a, b), a);
    }

    #[test]
    fn complement_partitions_deck() {
        let hand = Hand::try_from("As Kd 7h").unwrap();
        assert_eq!(hand.complement().count(), 49);
        assert_eq!(Hand::add(hand, hand.complement()).count(), 52);
    }
}
