use rail_core::Position;

/// Whose move it is in the hand.
///
/// - `Choice(seat)` — a player must act
/// - `Chance` — the dealer reveals community cards
/// - `Terminal` — the hand is decided, settle it
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Turn {
    Terminal,
    Chance,
    Choice(Position),
}

impl Turn {
    /// Extracts the seat index. Panics if not a Choice.
    pub fn position(&self) -> Position {
        match self {
            Self::Choice(c) => *c,
            _ => panic!("not a choice node"),
        }
    }
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Choice(_))
    }
    pub fn is_chance(&self) -> bool {
        matches!(self, Self::Chance)
    }
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Choice(c) => write!(f, "P{}", c),
            Self::Terminal => write!(f, "-"),
            Self::Chance => write!(f, "?"),
        }
    }
}

/// Named position at a poker table relative to the dealer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionName {
    BTN,
    SB,
    BB,
    UTG(usize),
    MP(usize),
    HJ,
    CO,
}

impl PositionName {
    /// Computes the position name for a seat relative to the dealer.
    pub fn from_seat(seat: Position, dealer: Position, table: usize) -> Self {
        let offset = (seat + table - dealer) % table;
        match table {
            2 => match offset {
                0 => Self::BTN,
                _ => Self::BB,
            },
            6 => match offset {
                0 => Self::BTN,
                1 => Self::SB,
                2 => Self::BB,
                3 => Self::UTG(0),
                4 => Self::HJ,
                _ => Self::CO,
            },
            _ => match offset {
                0 => Self::BTN,
                1 => Self::SB,
                2 => Self::BB,
                3 => Self::UTG(0),
                4 => Self::UTG(1),
                5 => Self::MP(0),
                6 => Self::MP(1),
                7 => Self::HJ,
                _ => Self::CO,
            },
        }
    }
}

impl std::fmt::Display for PositionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BTN => write!(f, "BTN"),
            Self::SB => write!(f, "SB"),
            Self::BB => write!(f, "BB"),
            Self::UTG(0) => write!(f, "UTG"),
            Self::UTG(n) => write!(f, "UTG+{}", n),
            Self::MP(0) => write!(f, "MP"),
            Self::MP(n) => write!(f, "MP+{}", n),
            Self::HJ => write!(f, "HJ"),
            Self::CO => write!(f, "CO"),
        }
    }
}
