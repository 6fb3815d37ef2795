use super::action::Action;
use super::config::Structure;
use super::hand::HandState;
use super::hand::Phase;
use rail_cards::Street;
use rail_core::Chips;

/// Fixed-limit betting caps at one bet plus three raises, except heads-up.
const FIXED_LIMIT_CAP: usize = 4;

/// Errors surfaced by the rules engine.
#[derive(Debug, Clone)]
pub enum RuleError {
    IllegalAction(String),
    OutOfTurn,
    WrongPhase(String),
    Invariant(String),
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalAction(s) => write!(f, "illegal action: {}", s),
            Self::OutOfTurn => write!(f, "not your turn"),
            Self::WrongPhase(s) => write!(f, "wrong phase: {}", s),
            Self::Invariant(s) => write!(f, "invariant breach: {}", s),
        }
    }
}

impl std::error::Error for RuleError {}

/// Legal options and bet bounds for an action request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub options: Vec<&'static str>,
    pub call: Chips,
    pub min_raise: Chips,
    pub max_raise: Chips,
}

/// Action legality. Everything is expressed against the seat currently
/// holding the action pointer; out-of-turn enforcement happens upstream
/// where the message's seat is known.
impl HandState {
    /// Chips the actor must add to match the outstanding bet.
    pub fn to_call(&self) -> Chips {
        let seat = &self.seats()[self.actor()];
        (self.to_match() - seat.stake()).min(seat.stack())
    }
    /// The actor's remaining stack: the all-in amount.
    pub fn to_shove(&self) -> Chips {
        self.seats()[self.actor()].stack()
    }
    /// Smallest legal raise-to total for the actor.
    pub fn min_raise_to(&self) -> Chips {
        match self.config().structure {
            Structure::FixedLimit => self.to_match() + self.config().fixed_bet(self.street()),
            _ => self.to_match() + self.min_raise(),
        }
    }
    /// Largest legal raise-to total for the actor, by structure.
    pub fn max_raise_to(&self) -> Chips {
        let seat = &self.seats()[self.actor()];
        let stacked = seat.stake() + seat.stack();
        match self.config().structure {
            Structure::NoLimit => stacked,
            Structure::FixedLimit => self.min_raise_to().min(stacked),
            Structure::PotLimit => {
                let call = self.to_match() - seat.stake();
                (self.to_match() + self.pot() + call).min(stacked)
            }
        }
    }
    /// Smallest legal opening bet.
    pub fn min_bet(&self) -> Chips {
        match self.config().structure {
            Structure::FixedLimit => self.config().fixed_bet(self.street()),
            _ => self.config().bblind,
        }
    }
    /// Largest legal opening bet, by structure.
    pub fn max_bet(&self) -> Chips {
        let stack = self.to_shove();
        match self.config().structure {
            Structure::NoLimit => stack,
            Structure::FixedLimit => self.min_bet().min(stack),
            Structure::PotLimit => self.pot().max(self.min_bet()).min(stack),
        }
    }
    /// The default action forced on timeouts and failures: check when the
    /// bet is matched, fold otherwise.
    pub fn passive(&self) -> Action {
        if self.to_call() == 0 {
            Action::Check
        } else {
            Action::Fold
        }
    }
    /// The current betting street.
    pub fn street(&self) -> Street {
        match self.phase() {
            Phase::Betting(street) => street,
            _ => self.board().street(),
        }
    }

    /// Raising is closed to a seat that has already acted since the last
    /// full raise; a short all-in does not re-open it.
    fn may_raise(&self) -> bool {
        let seat = &self.seats()[self.actor()];
        self.to_match() > 0
            && !seat.has_acted()
            && self.min_raise_to() <= seat.stake() + seat.stack()
            && self.under_cap()
    }
    fn may_bet(&self) -> bool {
        self.to_match() == 0 && self.to_shove() >= self.min_bet() && self.under_cap()
    }
    fn may_check(&self) -> bool {
        let seat = &self.seats()[self.actor()];
        self.to_match() == seat.stake()
    }
    fn may_call(&self) -> bool {
        self.to_call() > 0
    }
    /// One bet and three raises per street under fixed limit; the cap is
    /// lifted when only two players remain in the hand.
    fn under_cap(&self) -> bool {
        match self.config().structure {
            Structure::FixedLimit => {
                self.aggressions() < FIXED_LIMIT_CAP || self.live_count() == 2
            }
            _ => true,
        }
    }

    /// Canonical legal actions with engine-chosen amounts.
    pub fn legal(&self) -> Vec<Action> {
        let mut options = Vec::new();
        if !matches!(self.phase(), Phase::Betting(_)) {
            return options;
        }
        if self.may_check() {
            options.push(Action::Check);
        }
        if self.may_call() {
            options.push(Action::Call(self.to_call()));
        }
        if self.may_bet() {
            options.push(Action::Bet(self.min_bet()));
        }
        if self.may_raise() {
            options.push(Action::Raise(self.min_raise_to()));
        }
        if self.to_shove() > 0 && self.is_allowed(&Action::Shove(self.to_shove())).is_ok() {
            options.push(Action::Shove(self.to_shove()));
        }
        options.push(Action::Fold);
        options
    }

    /// Legal options and bounds for the wire's action request.
    pub fn menu(&self) -> Menu {
        let legal = self.legal();
        Menu {
            options: legal.iter().map(Action::wire).collect(),
            call: self.to_call(),
            min_raise: self.min_raise_to(),
            max_raise: self.max_raise_to(),
        }
    }

    /// Validates an action for the seat holding the action pointer.
    pub fn is_allowed(&self, action: &Action) -> Result<(), RuleError> {
        if !matches!(self.phase(), Phase::Betting(_)) {
            return Err(RuleError::WrongPhase("no betting open".to_string()));
        }
        let seat = &self.seats()[self.actor()];
        let illegal = |why: String| Err(RuleError::IllegalAction(why));
        match *action {
            Action::Fold => Ok(()),
            Action::Check => {
                if self.may_check() {
                    Ok(())
                } else {
                    illegal(format!("cannot check facing a bet of {}", self.to_match()))
                }
            }
            Action::Call(chips) => {
                if !self.may_call() {
                    illegal("nothing to call".to_string())
                } else if chips != self.to_call() {
                    illegal(format!("call amount is {}", self.to_call()))
                } else {
                    Ok(())
                }
            }
            Action::Bet(chips) => {
                if self.to_match() > 0 {
                    illegal("a bet is already live".to_string())
                } else if chips > seat.stack() {
                    illegal("bet exceeds stack".to_string())
                } else if chips < self.min_bet() && chips < self.to_shove() {
                    illegal(format!("minimum bet is {}", self.min_bet()))
                } else if chips > self.max_bet() {
                    illegal(format!("maximum bet is {}", self.max_bet()))
                } else {
                    Ok(())
                }
            }
            Action::Raise(to) => {
                if !self.may_raise() {
                    illegal("raising is closed".to_string())
                } else if to < self.min_raise_to() && to < seat.stake() + seat.stack() {
                    illegal(format!("minimum raise is to {}", self.min_raise_to()))
                } else if to > self.max_raise_to() {
                    illegal(format!("maximum raise is to {}", self.max_raise_to()))
                } else {
                    Ok(())
                }
            }
            Action::Shove(chips) => {
                let to = seat.stake() + chips;
                let over_pot_limit = self.config().structure == Structure::PotLimit
                    && match self.to_match() {
                        0 => to > self.max_bet(),
                        live => to > live && to > self.max_raise_to(),
                    };
                if self.to_shove() == 0 {
                    illegal("no chips behind".to_string())
                } else if chips != self.to_shove() {
                    illegal(format!("all-in is exactly {}", self.to_shove()))
                } else if over_pot_limit {
                    illegal("all-in exceeds the pot limit".to_string())
                } else {
                    Ok(())
                }
            }
            Action::Blind(_) | Action::Ante(_) => {
                illegal("posts are not voluntary actions".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::GameConfig;
    use super::super::Seat;
    use super::*;
    use rail_cards::Deck;

    fn heads_up(structure: Structure) -> HandState {
        let config = GameConfig {
            structure,
            sblind: 1,
            bblind: 2,
            ..GameConfig::default()
        };
        let seats = vec![Seat::new(0, "hero", 200).human(), Seat::new(1, "villain", 200)];
        let mut hand = HandState::with_deck(0, config, seats, 0, 7, Deck::shuffled(7)).unwrap();
        hand.commence().unwrap();
        hand
    }

    fn three_way(structure: Structure, stacks: [i32; 3]) -> HandState {
        let config = GameConfig {
            structure,
            sblind: 1,
            bblind: 2,
            ..GameConfig::default()
        };
        let seats = stacks
            .iter()
            .enumerate()
            .map(|(i, stack)| Seat::new(i, &format!("p{}", i), *stack))
            .collect();
        let mut hand = HandState::with_deck(0, config, seats, 0, 7, Deck::shuffled(7)).unwrap();
        hand.commence().unwrap();
        hand
    }

    #[test]
    fn preflop_blinds_and_pointer() {
        let hand = heads_up(Structure::NoLimit);
        // Heads-up: dealer posts the small blind and acts first preflop.
        assert_eq!(hand.small_blind(), 0);
        assert_eq!(hand.big_blind(), 1);
        assert_eq!(hand.actor(), 0);
        assert_eq!(hand.pot(), 3);
        assert_eq!(hand.to_call(), 1);
    }

    #[test]
    fn check_only_when_matched() {
        let mut hand = heads_up(Structure::NoLimit);
        assert!(hand.is_allowed(&Action::Check).is_err());
        hand.apply(Action::Call(1)).unwrap();
        assert_eq!(hand.actor(), 1);
        assert!(hand.is_allowed(&Action::Check).is_ok());
    }

    #[test]
    fn call_amount_is_exact() {
        let hand = heads_up(Structure::NoLimit);
        assert!(hand.is_allowed(&Action::Call(1)).is_ok());
        assert!(hand.is_allowed(&Action::Call(2)).is_err());
    }

    #[test]
    fn min_raise_doubles_blind_preflop() {
        let hand = heads_up(Structure::NoLimit);
        assert_eq!(hand.min_raise_to(), 4);
        assert!(hand.is_allowed(&Action::Raise(3)).is_err());
        assert!(hand.is_allowed(&Action::Raise(4)).is_ok());
    }

    #[test]
    fn no_limit_raise_bounded_by_stack() {
        let hand = heads_up(Structure::NoLimit);
        assert_eq!(hand.max_raise_to(), 200);
        assert!(hand.is_allowed(&Action::Raise(201)).is_err());
    }

    #[test]
    fn bb_has_the_option() {
        let mut hand = heads_up(Structure::NoLimit);
        hand.apply(Action::Call(1)).unwrap();
        // BB may raise despite the bet being matched.
        assert!(hand.is_allowed(&Action::Raise(4)).is_ok());
        hand.apply(Action::Check).unwrap();
        assert!(hand.is_round_complete());
    }

    #[test]
    fn full_raise_updates_min_raise() {
        let mut hand = three_way(Structure::NoLimit, [200, 200, 200]);
        assert_eq!(hand.actor(), 0);
        hand.apply(Action::Raise(10)).unwrap();
        assert_eq!(hand.min_raise(), 8);
        assert_eq!(hand.min_raise_to(), 18);
    }

    #[test]
    fn short_all_in_does_not_reopen() {
        // Flop: P0 bets 10, P1 raises to 25, P2 shoves 30 (short of the
        // 15 increment). P0 calls; P1 may call but not re-raise.
        let mut hand = three_way(Structure::NoLimit, [200, 200, 32]);
        hand.apply(Action::Call(2)).unwrap();
        hand.apply(Action::Call(1)).unwrap();
        hand.apply(Action::Check).unwrap();
        assert!(hand.is_round_complete());
        hand.collect_round();
        hand.deal_street().unwrap();
        assert_eq!(hand.actor(), 1);
        hand.apply(Action::Check).unwrap();
        hand.apply(Action::Check).unwrap();
        assert_eq!(hand.actor(), 0);
        hand.apply(Action::Bet(10)).unwrap();
        hand.apply(Action::Raise(25)).unwrap();
        assert_eq!(hand.min_raise(), 15);
        assert_eq!(hand.to_shove(), 30);
        hand.apply(Action::Shove(30)).unwrap();
        // Short shove: the raise unit is unchanged and P1 stays closed.
        assert_eq!(hand.min_raise(), 15);
        assert_eq!(hand.to_call(), 20);
        hand.apply(Action::Call(20)).unwrap();
        assert_eq!(hand.actor(), 1);
        assert!(matches!(
            hand.is_allowed(&Action::Raise(45)),
            Err(RuleError::IllegalAction(_))
        ));
        assert!(hand.is_allowed(&Action::Call(5)).is_ok());
    }

    #[test]
    fn full_shove_reopens_action() {
        let mut hand = three_way(Structure::NoLimit, [200, 200, 100]);
        hand.apply(Action::Call(2)).unwrap();
        hand.apply(Action::Call(1)).unwrap();
        hand.apply(Action::Check).unwrap();
        hand.collect_round();
        hand.deal_street().unwrap();
        hand.apply(Action::Check).unwrap();
        hand.apply(Action::Check).unwrap();
        hand.apply(Action::Bet(10)).unwrap();
        hand.apply(Action::Raise(25)).unwrap();
        // P2's shove to 98 is a full raise over 25: P0 and P1 re-open.
        hand.apply(Action::Shove(98)).unwrap();
        assert_eq!(hand.min_raise(), 73);
        assert!(hand.is_allowed(&Action::Raise(171)).is_ok());
    }

    #[test]
    fn pot_limit_caps_the_bet() {
        let mut hand = heads_up(Structure::PotLimit);
        hand.apply(Action::Call(1)).unwrap();
        hand.apply(Action::Check).unwrap();
        hand.collect_round();
        hand.deal_street().unwrap();
        // Pot is 4: opening bet may not exceed it.
        assert_eq!(hand.max_bet(), 4);
        assert!(hand.is_allowed(&Action::Bet(5)).is_err());
        assert!(hand.is_allowed(&Action::Bet(4)).is_ok());
    }

    #[test]
    fn pot_limit_raise_formula() {
        let mut hand = heads_up(Structure::PotLimit);
        // Preflop pot 3, call 1: raise-to cap is 2 + (3 + 1) = 6.
        assert_eq!(hand.max_raise_to(), 6);
        hand.apply(Action::Raise(6)).unwrap();
        // Villain: pot 8, call 4, cap = 6 + (8 + 4) = 18.
        assert_eq!(hand.max_raise_to(), 18);
    }

    #[test]
    fn fixed_limit_sizes_and_cap() {
        let mut hand = three_way(Structure::FixedLimit, [200, 200, 200]);
        // Preflop: raises come in big-blind units.
        assert_eq!(hand.min_raise_to(), 4);
        assert_eq!(hand.max_raise_to(), 4);
        hand.apply(Action::Raise(4)).unwrap();
        hand.apply(Action::Raise(6)).unwrap();
        hand.apply(Action::Raise(8)).unwrap();
        // One bet (the blind counts as the first) plus three raises: capped.
        assert_eq!(hand.aggressions(), 4);
        assert!(hand.is_allowed(&Action::Raise(10)).is_err());
        assert!(hand.is_allowed(&Action::Call(hand.to_call())).is_ok());
    }

    #[test]
    fn fixed_limit_cap_lifts_heads_up() {
        let mut hand = heads_up(Structure::FixedLimit);
        hand.apply(Action::Raise(4)).unwrap();
        hand.apply(Action::Raise(6)).unwrap();
        hand.apply(Action::Raise(8)).unwrap();
        hand.apply(Action::Raise(10)).unwrap();
        // Two players: the cap never engages.
        assert!(hand.is_allowed(&Action::Raise(12)).is_ok());
    }

    #[test]
    fn fold_is_always_accepted() {
        let mut hand = heads_up(Structure::NoLimit);
        hand.apply(Action::Call(1)).unwrap();
        // Check is available, fold is discouraged but legal.
        assert!(hand.is_allowed(&Action::Fold).is_ok());
    }

    #[test]
    fn menu_carries_bounds() {
        let hand = heads_up(Structure::NoLimit);
        let menu = hand.menu();
        assert!(menu.options.contains(&"CALL"));
        assert!(menu.options.contains(&"RAISE"));
        assert!(menu.options.contains(&"FOLD"));
        assert!(!menu.options.contains(&"CHECK"));
        assert_eq!(menu.call, 1);
        assert_eq!(menu.min_raise, 4);
        assert_eq!(menu.max_raise, 200);
    }

    #[test]
    fn passive_is_check_else_fold() {
        let mut hand = heads_up(Structure::NoLimit);
        assert_eq!(hand.passive(), Action::Fold);
        hand.apply(Action::Call(1)).unwrap();
        assert_eq!(hand.passive(), Action::Check);
    }
}
