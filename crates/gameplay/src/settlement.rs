use super::seat::Status;
use rail_cards::Strength;
use rail_core::Chips;
use rail_core::Position;

/// Per-seat accounting at the end of a hand.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub position: Position,
    pub risked: Chips,
    pub reward: Chips,
    pub status: Status,
    pub strength: Option<Strength>,
}

impl Settlement {
    pub fn pnl(&self) -> Chips {
        self.reward - self.risked
    }
}

/// One pot layer's resolution: its post-rake amount, the winners who split
/// it, and the category label shown to clients.
#[derive(Debug, Clone)]
pub struct PotAward {
    pub amount: Chips,
    pub rake: Chips,
    pub winners: Vec<Position>,
    pub ranking: Option<String>,
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.reward > 0 {
            write!(f, "P{} +{}", self.position, self.reward)
        } else {
            write!(f, "P{} -{}", self.position, self.risked)
        }
    }
}
