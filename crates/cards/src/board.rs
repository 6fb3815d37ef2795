use super::card::Card;
use super::hand::Hand;
use super::street::Street;

/// Community cards in deal order.
///
/// Order matters for display and replay, so this is a Vec rather than a
/// Hand; the street is implied by the count.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn empty() -> Self {
        Self { cards: Vec::with_capacity(5) }
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn street(&self) -> Street {
        Street::from(self.cards.len())
    }
    pub fn add(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
        assert!(self.cards.len() <= 5, "board overflow");
    }
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl From<&Board> for Hand {
    fn from(board: &Board) -> Self {
        Hand::from(board.cards.clone())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut cards = self.cards.iter().peekable();
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
    fn street_follows_count() {
        let mut board = Board::empty();
        assert_eq!(board.street(), Street::Pref);
        board.add(&[
            Card::try_from("As").unwrap(),
            Card::try_from("Kd").unwrap(),
            Card::try_from("7h").unwrap(),
        ]);
        assert_eq!(board.street(), Street::Flop);
        board.add(&[Card::try_from("2c").unwrap()]);
        assert_eq!(board.street(), Street::Turn);
        board.add(&[Card::try_from("9s").unwrap()]);
        assert_eq!(board.street(), Street::Rive);
    }
}
