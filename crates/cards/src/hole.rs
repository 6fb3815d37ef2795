use super::card::Card;
use super::hand::Hand;

/// A player's two private cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hole(Hand);

impl Hole {
    pub fn cards(&self) -> Vec<Card> {
        Vec::<Card>::from(self.0)
    }
    pub fn is_dealt(&self) -> bool {
        self.0.count() == 2
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        Self(Hand::add(Hand::from(a), Hand::from(b)))
    }
}
impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl TryFrom<&str> for Hole {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hand = Hand::try_from(s)?;
        anyhow::ensure!(hand.count() == 2, "a hole is exactly two cards");
        Ok(Self(hand))
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
