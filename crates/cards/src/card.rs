use super::rank::Rank;
use super::suit::Suit;

/// A playing card. Value-typed; ordered by rank, then suit, where a total
/// order is demanded.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.rank as u8) * 4 + (c.suit as u8)
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

// u64 isomorphism (one-hot)
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self::from(n.trailing_zeros() as u8)
    }
}

impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        let rank = chars
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty card string"))?;
        let suit = chars
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing suit in card string"))?;
        anyhow::ensure!(chars.next().is_none(), "trailing characters in card string");
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl serde::Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
impl<'de> serde::Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_roundtrip() {
        for n in 0..52u8 {
            assert_eq!(n, u8::from(Card::from(n)));
        }
    }

    #[test]
    fn parse_and_display() {
        for s in ["As", "Td", "2c", "Kh"] {
            assert_eq!(s, Card::try_from(s).unwrap().to_string());
        }
        assert!(Card::try_from("Xx").is_err());
        assert!(Card::try_from("A").is_err());
    }

    #[test]
    fn ordered_by_rank_then_suit() {
        let low = Card::try_from("Ks").unwrap();
        let high = Card::try_from("Ac").unwrap();
        assert!(low < high);
    }
}
