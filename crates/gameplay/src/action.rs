use rail_core::Chips;

/// A player decision or forced post.
///
/// Chip semantics differ by variant: `Call`, `Bet`, `Shove`, `Blind`, and
/// `Ante` carry chips added to the pot by this action, while `Raise` carries
/// the street total being raised *to*. A shove is classified as a bet, call,
/// or raise by its relation to the outstanding bet at application time.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Action {
    Fold,
    Check,
    Call(Chips),
    Bet(Chips),
    Raise(Chips),
    Shove(Chips),
    Blind(Chips),
    Ante(Chips),
}

impl Action {
    /// True if this is a voluntary decision (not a forced post).
    pub fn is_choice(&self) -> bool {
        !matches!(self, Action::Blind(_) | Action::Ante(_))
    }
    /// True if this is a raise or bet (aggressive action).
    pub fn is_aggro(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_) | Action::Shove(_))
    }
    /// True if this is an all-in.
    pub fn is_shove(&self) -> bool {
        matches!(self, Action::Shove(_))
    }
    /// True if no chips enter the pot.
    pub fn is_passive(&self) -> bool {
        matches!(self, Action::Fold | Action::Check)
    }
    /// The chip amount carried by the action, if any.
    pub fn amount(&self) -> Option<Chips> {
        match *self {
            Action::Call(x)
            | Action::Bet(x)
            | Action::Raise(x)
            | Action::Shove(x)
            | Action::Blind(x)
            | Action::Ante(x) => Some(x),
            _ => None,
        }
    }
    /// Uppercase wire label.
    pub fn wire(&self) -> &'static str {
        match self {
            Action::Fold => "FOLD",
            Action::Check => "CHECK",
            Action::Call(_) => "CALL",
            Action::Bet(_) => "BET",
            Action::Raise(_) => "RAISE",
            Action::Shove(_) => "ALL_IN",
            Action::Blind(_) => "BLIND",
            Action::Ante(_) => "ANTE",
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let parts = s.split_whitespace().collect::<Vec<&str>>();
        let amount = |i: usize| {
            parts
                .get(i)
                .and_then(|n| n.parse::<Chips>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow::anyhow!("missing or invalid amount in: {}", s))
        };
        match parts
            .first()
            .map(|p| p.to_uppercase())
            .as_deref()
            .unwrap_or("")
        {
            "FOLD" => Ok(Action::Fold),
            "CHECK" => Ok(Action::Check),
            "CALL" => amount(1).map(Action::Call),
            "BET" => amount(1).map(Action::Bet),
            "RAISE" => amount(1).map(Action::Raise),
            "ALL_IN" | "SHOVE" => amount(1).map(Action::Shove),
            "BLIND" => amount(1).map(Action::Blind),
            "ANTE" => amount(1).map(Action::Ante),
            _ => Err(anyhow::anyhow!("invalid action string: {}", s)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call(x) => write!(f, "CALL {}", x),
            Action::Bet(x) => write!(f, "BET {}", x),
            Action::Raise(x) => write!(f, "RAISE {}", x),
            Action::Shove(x) => write!(f, "ALL_IN {}", x),
            Action::Blind(x) => write!(f, "BLIND {}", x),
            Action::Ante(x) => write!(f, "ANTE {}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for action in [
            Action::Fold,
            Action::Check,
            Action::Call(10),
            Action::Bet(25),
            Action::Raise(60),
            Action::Shove(200),
        ] {
            assert_eq!(action, Action::try_from(action.to_string().as_str()).unwrap());
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Action::try_from("").is_err());
        assert!(Action::try_from("CALL").is_err());
        assert!(Action::try_from("RAISE banana").is_err());
        assert!(Action::try_from("BET -5").is_err());
        assert!(Action::try_from("LIMP 5").is_err());
    }
}
