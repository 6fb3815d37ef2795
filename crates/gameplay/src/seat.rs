use rail_cards::Hole;
use rail_core::Chips;
use rail_core::Position;

/// A seat's standing within the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Folded,
    AllIn,
    SittingOut,
    Away,
}

impl Status {
    /// Dealt into the current hand and not folded.
    pub fn is_live(&self) -> bool {
        matches!(self, Status::Active | Status::AllIn)
    }
    /// Still owed a turn when facing action.
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }
    /// Not dealt into hands at all.
    pub fn is_out(&self) -> bool {
        matches!(self, Status::SittingOut | Status::Away)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "A"),
            Status::Folded => write!(f, "F"),
            Status::AllIn => write!(f, "!"),
            Status::SittingOut => write!(f, "_"),
            Status::Away => write!(f, "z"),
        }
    }
}

/// One player's position and chips at the table.
///
/// `stake` is the current-street bet, `spent` the total-hand contribution;
/// `stake <= spent` and `stack >= 0` always hold.
#[derive(Debug, Clone)]
pub struct Seat {
    position: Position,
    name: String,
    human: bool,
    archetype: Option<String>,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    hole: Hole,
    status: Status,
    acted: bool,
}

impl Seat {
    pub fn new(position: Position, name: &str, stack: Chips) -> Self {
        Self {
            position,
            name: name.to_string(),
            human: false,
            archetype: None,
            stack,
            stake: 0,
            spent: 0,
            hole: Hole::default(),
            status: Status::Active,
            acted: false,
        }
    }
    pub fn human(mut self) -> Self {
        self.human = true;
        self
    }
    pub fn archetype(mut self, label: &str) -> Self {
        self.archetype = Some(label.to_string());
        self
    }

    //

    pub fn position(&self) -> Position {
        self.position
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_human(&self) -> bool {
        self.human
    }
    pub fn archetype_label(&self) -> Option<&str> {
        self.archetype.as_deref()
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn stake(&self) -> Chips {
        self.stake
    }
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn cards(&self) -> Hole {
        self.hole
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    //

    pub(crate) fn deal_in(&mut self, hole: Hole) {
        self.hole = hole;
        self.status = Status::Active;
        self.stake = 0;
        self.spent = 0;
        self.acted = false;
    }
    pub(crate) fn sit_out(&mut self) {
        self.status = Status::SittingOut;
        self.hole = Hole::default();
        self.stake = 0;
        self.spent = 0;
        self.acted = false;
    }
    /// Moves chips from stack into the current street bet.
    /// Drops to AllIn when the stack empties.
    pub(crate) fn commit(&mut self, chips: Chips) {
        assert!(chips <= self.stack, "cannot commit more than the stack");
        self.stack -= chips;
        self.stake += chips;
        self.spent += chips;
        if self.stack == 0 {
            self.status = Status::AllIn;
        }
    }
    /// Antes go straight to the pot without opening a street bet.
    pub(crate) fn ante(&mut self, chips: Chips) {
        assert!(chips <= self.stack, "cannot ante more than the stack");
        self.stack -= chips;
        self.spent += chips;
        if self.stack == 0 {
            self.status = Status::AllIn;
        }
    }
    pub(crate) fn fold(&mut self) {
        self.status = Status::Folded;
    }
    pub(crate) fn mark_acted(&mut self) {
        self.acted = true;
    }
    pub(crate) fn clear_acted(&mut self) {
        self.acted = false;
    }
    pub(crate) fn clear_stake(&mut self) {
        self.stake = 0;
    }
    pub(crate) fn win(&mut self, chips: Chips) {
        self.stack += chips;
    }
    pub(crate) fn restore(&mut self, stack: Chips) {
        self.stack = stack;
        self.stake = 0;
        self.spent = 0;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{:<6}", self.status, self.stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_tracks_stake_and_spent() {
        let mut seat = Seat::new(0, "hero", 100);
        seat.deal_in(Hole::try_from("As Kd").unwrap());
        seat.commit(30);
        assert_eq!(seat.stack(), 70);
        assert_eq!(seat.stake(), 30);
        assert_eq!(seat.spent(), 30);
        seat.clear_stake();
        seat.commit(20);
        assert_eq!(seat.stake(), 20);
        assert_eq!(seat.spent(), 50);
    }

    #[test]
    fn emptying_the_stack_is_all_in() {
        let mut seat = Seat::new(0, "hero", 50);
        seat.deal_in(Hole::try_from("As Kd").unwrap());
        seat.commit(50);
        assert_eq!(seat.status(), Status::AllIn);
    }
}
