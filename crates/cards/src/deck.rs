use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use super::street::Street;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// An ordered sequence of the 52 distinct cards.
///
/// The permutation is a uniform shuffle from a caller-provided seed; the
/// seed is recorded in the hand log so any hand can be replayed exactly.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A seeded uniform permutation of the full deck.
    pub fn shuffled(seed: u64) -> Self {
        let mut cards = (0..52u8).map(Card::from).collect::<Vec<Card>>();
        cards.shuffle(&mut SmallRng::seed_from_u64(seed));
        Self { cards }
    }
    /// A deck that deals exactly the given cards in order. For replay
    /// tooling and deterministic tests; gameplay always uses a seed.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into_iter().rev().collect(),
        }
    }
    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }
    /// Draws two hole cards.
    pub fn hole(&mut self) -> Option<Hole> {
        match (self.draw(), self.draw()) {
            (Some(a), Some(b)) => Some(Hole::from((a, b))),
            _ => None,
        }
    }
    /// Draws the community cards revealed by the given street, in deal order.
    pub fn reveal(&mut self, street: Street) -> Option<Vec<Card>> {
        (0..street.n_revealed())
            .map(|_| self.draw())
            .collect::<Option<Vec<Card>>>()
    }
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
    /// The set of cards still in the deck.
    pub fn peek(&self) -> Hand {
        Hand::from(self.cards.clone())
    }
}
