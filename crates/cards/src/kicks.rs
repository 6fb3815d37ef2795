/// Tie-breaking side cards as a rank mask.
///
/// Suits never matter for kickers, so a u16 of rank bits compares correctly:
/// higher ranks occupy higher bits and the derived Ord is exactly the
/// card-by-card lexicographic comparison.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default)]
pub struct Kickers(u16);

impl From<u16> for Kickers {
    fn from(mask: u16) -> Self {
        Self(mask)
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        (0..13)
            .rev()
            .filter(|i| self.0 & (1 << i) != 0)
            .try_for_each(|i| write!(f, "{}", super::Rank::from(i as u8)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Rank;
    use super::*;

    #[test]
    fn higher_kicker_wins() {
        let king = Kickers::from(u16::from(Rank::King));
        let queen = Kickers::from(u16::from(Rank::Queen));
        assert!(king > queen);
    }

    #[test]
    fn lexicographic_on_multiple() {
        let a = Kickers::from(u16::from(Rank::Ace) | u16::from(Rank::Two));
        let b = Kickers::from(u16::from(Rank::King) | u16::from(Rank::Queen));
        assert!(a > b);
    }
}
