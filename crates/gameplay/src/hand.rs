use super::action::Action;
use super::config::GameConfig;
use super::rules::RuleError;
use super::seat::Seat;
use super::settlement::PotAward;
use super::settlement::Settlement;
use super::showdown::Showdown;
use super::turn::Turn;
use rail_cards::Board;
use rail_cards::Card;
use rail_cards::Deck;
use rail_cards::Street;
use rail_core::Chips;
use rail_core::HandNo;
use rail_core::Position;

/// Lifecycle phase of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Betting(Street),
    Showdown,
    Settled,
}

/// One hand in flight: the authoritative record of seats, board, deck,
/// betting state, and the action pointer.
///
/// The state machine is driven from outside:
/// [`HandState::turn`] reports whether the next move is a card deal, a
/// player choice, or terminal; the owner calls [`HandState::apply`],
/// [`HandState::deal_street`], or [`HandState::settle`] accordingly. All
/// mutation is validated; an arithmetic inconsistency surfaces as
/// [`RuleError::Invariant`] so the owner can abort and roll back.
#[derive(Debug, Clone)]
pub struct HandState {
    no: HandNo,
    seed: u64,
    config: GameConfig,
    phase: Phase,
    seats: Vec<Seat>,
    ring: Vec<Position>,
    board: Board,
    deck: Deck,
    dealer: Position,
    sb: Position,
    bb: Position,
    actor: Position,
    to_match: Chips,
    min_raise: Chips,
    aggressor: Option<Position>,
    aggressions: usize,
    collected: Chips,
    starting: Vec<Chips>,
    history: Vec<(Position, Action)>,
}

impl HandState {
    /// A hand waiting to commence, with the deck shuffled from the seed.
    /// Seats that are sitting out, away, or felted are dealt out.
    pub fn new(
        no: HandNo,
        config: GameConfig,
        seats: Vec<Seat>,
        dealer: Position,
        seed: u64,
    ) -> Result<Self, RuleError> {
        let deck = Deck::shuffled(seed);
        Self::with_deck(no, config, seats, dealer, seed, deck)
    }
    /// As [`HandState::new`] but with a caller-provided deck, for replay
    /// verification and deterministic tests.
    pub fn with_deck(
        no: HandNo,
        config: GameConfig,
        seats: Vec<Seat>,
        dealer: Position,
        seed: u64,
        deck: Deck,
    ) -> Result<Self, RuleError> {
        let n = seats.len();
        let ring = (1..=n)
            .map(|i| (dealer + i) % n)
            .filter(|i| !seats[*i].status().is_out())
            .filter(|i| seats[*i].stack() > 0)
            .collect::<Vec<Position>>();
        if ring.len() < 2 {
            return Err(RuleError::WrongPhase("fewer than two players".to_string()));
        }
        let starting = seats.iter().map(Seat::stack).collect();
        // Heads-up the dealer posts the small blind; multiway it is the
        // seat after the dealer.
        let (sb, bb) = match ring.as_slice() {
            [other, button] if *button == dealer => (*button, *other),
            [first, second, ..] => (*first, *second),
            _ => unreachable!("ring has at least two seats"),
        };
        Ok(Self {
            no,
            seed,
            config,
            phase: Phase::Waiting,
            seats,
            ring,
            board: Board::empty(),
            deck,
            dealer,
            sb,
            bb,
            actor: dealer,
            to_match: 0,
            min_raise: 0,
            aggressor: None,
            aggressions: 0,
            collected: 0,
            starting,
            history: Vec::new(),
        })
    }

    /// Deals hole cards, takes antes, posts blinds, and opens preflop
    /// action at the seat after the big blind.
    pub fn commence(&mut self) -> Result<(), RuleError> {
        if self.phase != Phase::Waiting {
            return Err(RuleError::WrongPhase("hand already commenced".to_string()));
        }
        for pos in self.ring.clone() {
            let hole = self
                .deck
                .hole()
                .ok_or_else(|| RuleError::Invariant("deck exhausted on deal".to_string()))?;
            self.seats[pos].deal_in(hole);
        }
        if self.config.ante > 0 {
            for pos in self.ring.clone() {
                let ante = self.config.ante.min(self.seats[pos].stack());
                self.seats[pos].ante(ante);
                self.collected += ante;
                self.history.push((pos, Action::Ante(ante)));
            }
        }
        let sb = self.config.sblind.min(self.seats[self.sb].stack());
        self.seats[self.sb].commit(sb);
        self.history.push((self.sb, Action::Blind(sb)));
        let bb = self.config.bblind.min(self.seats[self.bb].stack());
        self.seats[self.bb].commit(bb);
        self.history.push((self.bb, Action::Blind(bb)));
        self.to_match = self.config.bblind;
        self.min_raise = self.config.bblind;
        // The big blind is the street's opening bet for cap accounting.
        self.aggressions = 1;
        self.actor = self.first_to_act_preflop();
        self.phase = Phase::Betting(Street::Pref);
        self.check_conservation()
    }

    /// Whose move: deal, a seat's decision, or settle.
    pub fn turn(&self) -> Turn {
        match self.phase {
            Phase::Waiting => Turn::Chance,
            Phase::Showdown | Phase::Settled => Turn::Terminal,
            Phase::Betting(street) => {
                if self.live_count() <= 1 {
                    Turn::Terminal
                } else if self.is_round_complete() {
                    // Betting that can never resume is terminal even off
                    // the river: the remaining streets are an all-in
                    // runout, dealt under the showdown choreography.
                    match street {
                        Street::Rive => Turn::Terminal,
                        _ if self.active_count() < 2 => Turn::Terminal,
                        _ => Turn::Chance,
                    }
                } else {
                    Turn::Choice(self.actor)
                }
            }
        }
    }

    /// Applies a validated action from the seat holding the action pointer,
    /// then advances the pointer.
    pub fn apply(&mut self, action: Action) -> Result<(), RuleError> {
        self.is_allowed(&action)?;
        let pos = self.actor;
        match action {
            Action::Fold => {
                self.seats[pos].fold();
            }
            Action::Check => {
                self.seats[pos].mark_acted();
            }
            Action::Call(chips) => {
                self.seats[pos].commit(chips);
                self.seats[pos].mark_acted();
            }
            Action::Bet(chips) => {
                self.seats[pos].commit(chips);
                self.open(pos, chips);
            }
            Action::Raise(to) => {
                let chips = to - self.seats[pos].stake();
                self.seats[pos].commit(chips);
                self.escalate(pos, to);
            }
            Action::Shove(chips) => {
                let was = self.to_match;
                let to = self.seats[pos].stake() + chips;
                self.seats[pos].commit(chips);
                if was == 0 {
                    self.open(pos, to);
                } else if to > was {
                    self.escalate(pos, to);
                } else {
                    self.seats[pos].mark_acted();
                }
            }
            Action::Blind(_) | Action::Ante(_) => {
                return Err(RuleError::IllegalAction("posts are not voluntary".to_string()));
            }
        }
        self.history.push((pos, action));
        self.advance();
        self.check_conservation()
    }

    /// Sweeps street bets into the pot. Returns the per-seat bets swept and
    /// the cumulative pot, for the round-finalization event.
    pub fn collect_round(&mut self) -> (Vec<(Position, Chips)>, Chips) {
        let bets = self
            .seats
            .iter()
            .filter(|s| s.stake() > 0)
            .map(|s| (s.position(), s.stake()))
            .collect::<Vec<_>>();
        for seat in self.seats.iter_mut() {
            self.collected += seat.stake();
            seat.clear_stake();
            seat.clear_acted();
        }
        self.to_match = 0;
        self.min_raise = self.config.bblind;
        self.aggressor = None;
        self.aggressions = 0;
        (bets, self.collected)
    }

    /// Reveals the next street and re-opens action at the first live seat
    /// clockwise from the dealer. Requires the current round collected.
    pub fn deal_street(&mut self) -> Result<(Street, Vec<Card>), RuleError> {
        let street = match self.phase {
            Phase::Betting(street) if street != Street::Rive => street.next(),
            _ => return Err(RuleError::WrongPhase("no street to deal".to_string())),
        };
        if !self.is_round_complete() {
            return Err(RuleError::WrongPhase("betting still open".to_string()));
        }
        let cards = self
            .deck
            .reveal(street)
            .ok_or_else(|| RuleError::Invariant("deck exhausted on reveal".to_string()))?;
        self.board.add(&cards);
        self.phase = Phase::Betting(street);
        self.actor = self.first_to_act();
        Ok((street, cards))
    }

    /// Marks the hand at showdown; no further betting is possible.
    pub fn enter_showdown(&mut self) {
        self.phase = Phase::Showdown;
    }

    /// Resolves the pot into awards, pays winners, and settles the hand.
    /// All street bets must already be collected.
    pub fn settle(&mut self) -> Result<(Vec<PotAward>, Vec<Settlement>), RuleError> {
        if self.seats.iter().any(|s| s.stake() > 0) {
            return Err(RuleError::Invariant("uncollected bets at settlement".to_string()));
        }
        let (awards, settlements) =
            Showdown::new(&self.seats, &self.board, self.dealer, &self.config).settle();
        let paid = settlements.iter().map(|s| s.reward).sum::<Chips>();
        let rake = awards.iter().map(|a| a.rake).sum::<Chips>();
        if paid + rake != self.collected {
            return Err(RuleError::Invariant(format!(
                "award mismatch: paid {} + rake {} != pot {}",
                paid, rake, self.collected
            )));
        }
        for settlement in settlements.iter() {
            log::trace!("[hand {}] {}", self.no, settlement);
            self.seats[settlement.position].win(settlement.reward);
        }
        self.phase = Phase::Settled;
        Ok((awards, settlements))
    }

    /// Rolls every stack back to its pre-hand value and settles the hand
    /// without awards. The escape hatch for invariant breaches.
    pub fn abort(&mut self) {
        for (pos, stack) in self.starting.clone().into_iter().enumerate() {
            self.seats[pos].restore(stack);
        }
        self.collected = 0;
        self.phase = Phase::Settled;
    }

    // accessors

    pub fn no(&self) -> HandNo {
        self.no
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn dealer(&self) -> Position {
        self.dealer
    }
    pub fn small_blind(&self) -> Position {
        self.sb
    }
    pub fn big_blind(&self) -> Position {
        self.bb
    }
    pub fn actor(&self) -> Position {
        self.actor
    }
    pub fn to_match(&self) -> Chips {
        self.to_match
    }
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }
    pub fn aggressor(&self) -> Option<Position> {
        self.aggressor
    }
    pub fn aggressions(&self) -> usize {
        self.aggressions
    }
    pub fn history(&self) -> &[(Position, Action)] {
        &self.history
    }
    /// Pot including uncollected street bets.
    pub fn pot(&self) -> Chips {
        self.collected + self.seats.iter().map(Seat::stake).sum::<Chips>()
    }
    /// Seats dealt into this hand, clockwise from the seat after the dealer.
    pub fn ring(&self) -> &[Position] {
        &self.ring
    }
    pub fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.status().is_live()).count()
    }
    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.status().is_active()).count()
    }
    /// Betting is closed: every active seat has acted and matched, or no
    /// seat can act at all.
    pub fn is_round_complete(&self) -> bool {
        !self.seats.iter().any(|s| self.is_pending(s.position()))
    }
    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    // internals

    /// A seat owes a decision if it is facing chips, or has not yet acted
    /// while a betting round is genuinely contested. A lone active seat
    /// among all-ins never bets into an uncontestable pot.
    fn is_pending(&self, pos: Position) -> bool {
        let seat = &self.seats[pos];
        seat.status().is_active()
            && (seat.stake() < self.to_match
                || (!seat.has_acted() && self.active_count() >= 2))
    }
    fn first_to_act(&self) -> Position {
        self.ring
            .iter()
            .find(|p| self.seats[**p].status().is_active())
            .copied()
            .unwrap_or(self.dealer)
    }
    fn first_to_act_preflop(&self) -> Position {
        match self.ring.len() {
            2 => self.sb,
            _ => self.ring[2],
        }
    }
    fn advance(&mut self) {
        let n = self.seats.len();
        let mut cursor = self.actor;
        for _ in 0..n {
            cursor = (cursor + 1) % n;
            if self.is_pending(cursor) {
                self.actor = cursor;
                return;
            }
        }
    }
    /// An opening bet: sets the price and gives everyone a fresh turn.
    /// Short all-in opens below the minimum do not move the raise unit.
    fn open(&mut self, pos: Position, to: Chips) {
        self.to_match = to;
        if to >= self.config.bblind {
            self.min_raise = to;
        }
        self.aggressor = Some(pos);
        self.aggressions += 1;
        self.reopen(pos);
        self.seats[pos].mark_acted();
    }
    /// A raise over a live bet. Full raises re-open action for everyone;
    /// an all-in short of the minimum does not.
    fn escalate(&mut self, pos: Position, to: Chips) {
        let increment = to - self.to_match;
        self.to_match = to;
        self.aggressor = Some(pos);
        if increment >= self.min_raise {
            self.min_raise = increment;
            self.aggressions += 1;
            self.reopen(pos);
        }
        self.seats[pos].mark_acted();
    }
    fn reopen(&mut self, except: Position) {
        for seat in self.seats.iter_mut() {
            if seat.position() != except {
                seat.clear_acted();
            }
        }
    }
    /// Chips never appear or vanish mid-hand.
    fn check_conservation(&self) -> Result<(), RuleError> {
        let now = self
            .seats
            .iter()
            .map(|s| s.stack() + s.spent())
            .sum::<Chips>();
        let then = self.starting.iter().sum::<Chips>();
        let swept = self.seats.iter().map(Seat::spent).sum::<Chips>()
            - self.seats.iter().map(Seat::stake).sum::<Chips>();
        if now != then {
            return Err(RuleError::Invariant(format!(
                "chip conservation violated: {} != {}",
                now, then
            )));
        }
        if swept != self.collected {
            return Err(RuleError::Invariant(format!(
                "pot ledger violated: {} != {}",
                swept, self.collected
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for HandState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for seat in self.seats.iter() {
            write!(f, "{}", seat)?;
        }
        write!(f, " @ {:>6} {} {:?}", self.pot(), self.board, self.phase)
    }
}
