use super::event::BetView;
use super::event::Envelope;
use super::event::Event;
use super::event::PotResultView;
use super::event::RevealView;
use super::event::StackView;
use super::intent::Intent;
use super::message::ClientMessage;
use super::ports::Clock;
use super::ports::OpponentMemory;
use super::ports::Oracle;
use super::ports::SystemClock;
use super::ports::TurnContext;
use super::protocol::ErrorCode;
use super::protocol::Protocol;
use super::scheduler::Scheduler;
use super::snapshot::GameView;
use super::table::Table;
use super::timer::TimerConfig;
use rail_core::ID;
use rail_core::Position;
use rail_core::Seq;
use rail_core::Unique;
use rail_gameplay::Action;
use rail_gameplay::GameConfig;
use rail_gameplay::HandState;
use rail_gameplay::PotAward;
use rail_gameplay::RuleError;
use rail_gameplay::Seat;
use rail_gameplay::Turn;
use rail_records::Recorder;
use rail_records::Tape;
use rail_cards::Evaluator;
use rail_cards::Hand;
use rail_cards::Street;
use rail_cards::Strength;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;

/// Live game coordinator.
///
/// Owns the rules engine and serializes every state mutation through one
/// intent queue: client frames, oracle completions, timer fires, and ack
/// gates. Runs hand after hand until the table empties, a shutdown intent
/// arrives, or fewer than two seats hold chips.
pub struct Room {
    id: ID<Self>,
    config: GameConfig,
    timers: TimerConfig,
    seats: Vec<Seat>,
    dealer: Position,
    hand_no: u64,
    seq: Seq,
    table: Table,
    intents: UnboundedReceiver<Intent>,
    scheduler: Scheduler,
    clock: Arc<dyn Clock>,
    memory: Arc<dyn OpponentMemory>,
    recorder: Recorder,
    outstanding: Option<(Seq, String)>,
    rng: SmallRng,
    closing: bool,
}

impl Room {
    /// Builds a room and the sender half of its intent queue.
    pub fn new(
        config: GameConfig,
        timers: TimerConfig,
        seats: Vec<Seat>,
        oracle: Arc<dyn Oracle>,
        memory: Arc<dyn OpponentMemory>,
    ) -> (Self, UnboundedSender<Intent>) {
        let id = ID::default();
        let (tx, rx) = unbounded_channel();
        let n = seats.len();
        let room = Self {
            id,
            config,
            timers,
            seats,
            dealer: 0,
            hand_no: 0,
            seq: 0,
            table: Table::new(n),
            intents: rx,
            scheduler: Scheduler::new(tx.clone(), oracle, timers),
            clock: Arc::new(SystemClock),
            memory,
            recorder: Recorder::new(),
            outstanding: None,
            rng: SmallRng::seed_from_u64(rand::random()),
            closing: false,
        };
        (room, tx)
    }
    /// Deterministic deck seeds, for tests and replay harnesses.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
    /// Swaps the timestamp source, for deterministic tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// The game loop. Waits for a first session, then plays hands until a
    /// stop condition; returns the settled room for inspection.
    pub async fn run(mut self) -> Self {
        log::debug!("[room {}] waiting for a session", self.id);
        self.wait_for_session().await;
        log::debug!("[room {}] starting game loop", self.id);
        while !self.closing && self.funded() >= 2 {
            if let Err(e) = self.play_hand().await {
                log::error!("[room {}] hand {} failed to start: {}", self.id, self.hand_no, e);
                break;
            }
            self.hand_no += 1;
            self.rotate_button();
            if self.table.attached_count() == 0 {
                log::info!("[room {}] all sessions gone", self.id);
                break;
            }
        }
        log::info!("[room {}] game over after {} hands", self.id, self.recorder.len());
        self
    }

    async fn play_hand(&mut self) -> Result<(), RuleError> {
        let seed = self.rng.random::<u64>();
        let mut hand = HandState::new(
            self.hand_no,
            self.config.clone(),
            self.seats.clone(),
            self.dealer,
            seed,
        )?;
        hand.commence()?;
        self.seq = 0;
        let mut tape = Tape::new(&hand);
        log::debug!("[room {}] hand {} dealt (seed {})", self.id, hand.no(), seed);
        for pos in self.table.attached_seats() {
            self.send_snapshot(&hand, pos);
        }
        loop {
            if self.closing {
                self.abort_hand(&mut hand, tape, "room closing");
                return Ok(());
            }
            match hand.turn() {
                Turn::Choice(pos) => {
                    let (action, forced) = if hand.seats()[pos].is_human() {
                        self.human_turn(&hand, pos).await
                    } else {
                        self.oracle_turn(&hand, pos).await
                    };
                    match hand.apply(action) {
                        Ok(()) => {
                            tape.record(&hand, pos, action, forced);
                            self.emit_broadcast(
                                &hand,
                                Event::PlayerAction {
                                    seat: pos,
                                    action: action.wire().to_string(),
                                    amount: action.amount(),
                                    forced,
                                },
                            );
                        }
                        Err(e) => {
                            self.abort_hand(&mut hand, tape, &e.to_string());
                            return Ok(());
                        }
                    }
                }
                Turn::Chance => {
                    if let Err(e) = self.finalize_round(&mut hand).await {
                        self.abort_hand(&mut hand, tape, &e.to_string());
                        return Ok(());
                    }
                }
                Turn::Terminal => {
                    match self.conclude_hand(&mut hand, &mut tape).await {
                        Ok(awards) => {
                            let export = tape.finish(&hand, &awards);
                            let memory = self.memory.clone();
                            let sink = export.clone();
                            tokio::spawn(async move {
                                if let Err(e) = memory.record_hand(&sink).await {
                                    log::warn!("[memory] record_hand failed: {}", e);
                                }
                            });
                            self.recorder.push(export);
                            self.seats = hand.seats().to_vec();
                        }
                        Err(e) => self.abort_hand(&mut hand, tape, &e.to_string()),
                    }
                    return Ok(());
                }
            }
        }
    }

    /// The canonical betting-round finalization: sweep bets behind an ack
    /// gate, then reveal the next street behind its own gate.
    async fn finalize_round(&mut self, hand: &mut HandState) -> Result<(), RuleError> {
        let (bets, pot_total) = hand.collect_round();
        if !bets.is_empty() {
            let seq = self.emit_broadcast(
                hand,
                Event::RoundBetsFinalized {
                    player_bets: bets
                        .into_iter()
                        .map(|(seat, amount)| BetView { seat, amount })
                        .collect(),
                    pot_total,
                },
            );
            self.await_ack(hand, seq).await;
        }
        let (street, cards) = hand.deal_street()?;
        let seq = self.emit_broadcast(
            hand,
            Event::StreetDealt {
                street: street.wire().to_string(),
                cards: cards.iter().map(|c| c.to_string()).collect(),
            },
        );
        self.await_ack(hand, seq).await;
        Ok(())
    }

    /// The canonical settlement choreography, from showdown transition to
    /// the visually-concluded marker. Fold-outs skip the hand reveal.
    async fn conclude_hand(
        &mut self,
        hand: &mut HandState,
        tape: &mut Tape,
    ) -> Result<Vec<PotAward>, RuleError> {
        let showdown = hand.live_count() > 1;
        self.emit_broadcast(hand, Event::ShowdownTransition {});
        let (bets, pot_total) = hand.collect_round();
        if !bets.is_empty() {
            let seq = self.emit_broadcast(
                hand,
                Event::RoundBetsFinalized {
                    player_bets: bets
                        .into_iter()
                        .map(|(seat, amount)| BetView { seat, amount })
                        .collect(),
                    pot_total,
                },
            );
            self.await_ack(hand, seq).await;
        }
        if showdown {
            // The all-in runout: remaining streets deal under the showdown
            // umbrella, each behind its own gate.
            while hand.board().street() != Street::Rive {
                let (street, cards) = hand.deal_street()?;
                let seq = self.emit_broadcast(
                    hand,
                    Event::StreetDealt {
                        street: street.wire().to_string(),
                        cards: cards.iter().map(|c| c.to_string()).collect(),
                    },
                );
                self.await_ack(hand, seq).await;
            }
            hand.enter_showdown();
            tape.reveal_showdown(hand);
            let seq = self.emit_broadcast(
                hand,
                Event::ShowdownHandsRevealed {
                    player_hands: self.reveals(hand),
                },
            );
            self.await_ack(hand, seq).await;
        } else {
            hand.enter_showdown();
        }
        let (awards, settlements) = hand.settle()?;
        let seq = self.emit_broadcast(
            hand,
            Event::PotWinnersDetermined {
                pots: awards
                    .iter()
                    .map(|a| PotResultView {
                        amount: a.amount,
                        winners: a.winners.clone(),
                        ranking: a.ranking.clone(),
                    })
                    .collect(),
            },
        );
        self.await_ack(hand, seq).await;
        let seq = self.emit_broadcast(
            hand,
            Event::ChipsDistributed {
                players: settlements
                    .iter()
                    .map(|s| StackView {
                        seat: s.position,
                        chips: hand.seats()[s.position].stack(),
                    })
                    .collect(),
            },
        );
        self.await_ack(hand, seq).await;
        self.emit_broadcast(hand, Event::HandVisuallyConcluded {});
        Ok(awards)
    }

    /// Emits an action request to the seat and waits on the intent queue
    /// for a legal action, the turn clock, or disconnection. Everything
    /// else arriving meanwhile is answered without mutating the hand.
    async fn human_turn(&mut self, hand: &HandState, pos: Position) -> (Action, bool) {
        let tag = self.scheduler.next_tag();
        let deadline = Instant::now() + self.timers.turn;
        self.send_action_request(hand, pos, deadline);
        self.scheduler.clock(tag);
        loop {
            match self.intents.recv().await {
                None => return (hand.passive(), true),
                Some(Intent::TurnTimeout { tag: t }) if t == tag => {
                    log::info!("[room {}] P{} turn clock expired", self.id, pos);
                    return (hand.passive(), true);
                }
                Some(Intent::TurnTimeout { .. }) => {}
                Some(Intent::Advice { .. }) => {}
                Some(Intent::Frame { seat, text }) => match Protocol::parse(&text) {
                    Err(code) => self.send_error(hand, seat, code, "malformed message"),
                    Ok(ClientMessage::Ping(_)) => self.send_pong(hand, seat),
                    Ok(ClientMessage::AnimationDone(_)) => {}
                    Ok(ClientMessage::Action(frame)) => {
                        if seat != pos {
                            self.send_error(hand, seat, ErrorCode::NotYourTurn, "another seat is acting");
                            continue;
                        }
                        match Protocol::resolve(&frame, hand) {
                            Err(code) => self.send_error(hand, seat, code, "rejected action"),
                            Ok(action) => match hand.is_allowed(&action) {
                                Ok(()) => return (action, false),
                                Err(e) => self.send_error(
                                    hand,
                                    seat,
                                    ErrorCode::InvalidAction,
                                    &e.to_string(),
                                ),
                            },
                        }
                    }
                },
                Some(Intent::Attach { seat, sender }) => {
                    self.table.attach(seat, sender);
                    self.send_snapshot(hand, seat);
                    // A reconnecting actor gets the outstanding request
                    // back with the remaining clock; the clock itself is
                    // not reset.
                    if seat == pos {
                        self.send_action_request(hand, pos, deadline);
                    }
                }
                Some(Intent::Detach { seat }) => self.table.detach(seat),
                Some(Intent::Shutdown) => {
                    self.closing = true;
                    return (hand.passive(), true);
                }
            }
        }
    }

    /// Dispatches the oracle and waits for its completion intent. Any
    /// failure, timeout, or illegal advice substitutes the passive
    /// default, logged and flagged as forced.
    async fn oracle_turn(&mut self, hand: &HandState, pos: Position) -> (Action, bool) {
        let tag = self.scheduler.next_tag();
        let seat = &hand.seats()[pos];
        let archetype = seat.archetype_label().unwrap_or("TAG").to_string();
        let menu = hand.menu();
        self.scheduler.dispatch(
            tag,
            pos,
            archetype,
            GameView::of(hand, pos),
            TurnContext {
                hand_id: hand.no(),
                seat: pos,
                options: menu.options.iter().map(|o| o.to_string()).collect(),
                call_amount: menu.call,
                min_raise: menu.min_raise,
                max_raise: menu.max_raise,
            },
        );
        loop {
            match self.intents.recv().await {
                None => return (hand.passive(), true),
                Some(Intent::Advice { tag: t, advice, .. }) if t == tag => {
                    return match advice.as_ref().and_then(|a| Protocol::advise(a, hand)) {
                        Some(action) => (action, false),
                        None => {
                            log::warn!(
                                "[room {}] substituting default for P{} (unusable advice)",
                                self.id,
                                pos
                            );
                            (hand.passive(), true)
                        }
                    };
                }
                Some(Intent::Advice { .. }) => {}
                Some(Intent::TurnTimeout { .. }) => {}
                Some(Intent::Frame { seat, text }) => match Protocol::parse(&text) {
                    Err(code) => self.send_error(hand, seat, code, "malformed message"),
                    Ok(ClientMessage::Ping(_)) => self.send_pong(hand, seat),
                    Ok(ClientMessage::AnimationDone(_)) => {}
                    Ok(ClientMessage::Action(_)) => {
                        self.send_error(hand, seat, ErrorCode::NotYourTurn, "an opponent is acting")
                    }
                },
                Some(Intent::Attach { seat, sender }) => {
                    self.table.attach(seat, sender);
                    self.send_snapshot(hand, seat);
                }
                Some(Intent::Detach { seat }) => self.table.detach(seat),
                Some(Intent::Shutdown) => {
                    self.closing = true;
                    self.scheduler.cancel();
                    return (hand.passive(), true);
                }
            }
        }
    }

    /// Holds the choreography at a gated event until the controlling
    /// client acks it or the gate times out. Late and duplicate acks are
    /// ignored by the `(hand_id, event_seq)` key.
    async fn await_ack(&mut self, hand: &HandState, seq: Seq) {
        if self.closing {
            self.outstanding = None;
            return;
        }
        let deadline = Instant::now() + self.timers.ack;
        loop {
            let intent = tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => {
                    log::warn!(
                        "[room {}] ack timeout for hand {} seq {}, advancing",
                        self.id, hand.no(), seq
                    );
                    break;
                }
                intent = self.intents.recv() => match intent {
                    Some(intent) => intent,
                    None => break,
                },
            };
            match intent {
                Intent::Frame { seat, text } => match Protocol::parse(&text) {
                    Ok(ClientMessage::AnimationDone(ack))
                        if ack.hand_id == hand.no() && ack.event_seq == seq =>
                    {
                        break;
                    }
                    Ok(ClientMessage::AnimationDone(_)) => {}
                    Ok(ClientMessage::Ping(_)) => self.send_pong(hand, seat),
                    Ok(ClientMessage::Action(_)) => {
                        self.send_error(hand, seat, ErrorCode::NotYourTurn, "no action is pending")
                    }
                    Err(code) => self.send_error(hand, seat, code, "malformed message"),
                },
                Intent::Attach { seat, sender } => {
                    self.table.attach(seat, sender);
                    self.send_snapshot(hand, seat);
                    if let Some((_, frame)) = self.outstanding.clone() {
                        self.table.unicast(seat, &frame);
                    }
                }
                Intent::Detach { seat } => self.table.detach(seat),
                Intent::Shutdown => {
                    self.closing = true;
                    break;
                }
                Intent::Advice { .. } | Intent::TurnTimeout { .. } => {}
            }
        }
        self.outstanding = None;
    }

    fn abort_hand(&mut self, hand: &mut HandState, tape: Tape, why: &str) {
        log::error!("[room {}] aborting hand {}: {}", self.id, hand.no(), why);
        hand.abort();
        self.emit_broadcast(
            hand,
            Event::Error {
                code: ErrorCode::Internal.as_str().to_string(),
                message: "hand aborted, stacks restored".to_string(),
                detail: Some(why.to_string()),
            },
        );
        self.recorder.push(tape.finish_aborted(hand));
        self.seats = hand.seats().to_vec();
    }

    // emission

    fn envelope(&mut self, hand: &HandState, event: Event) -> (Seq, String) {
        self.seq += 1;
        let envelope = Envelope {
            hand_id: hand.no(),
            event_seq: self.seq,
            timestamp: self.clock.now(),
            event,
        };
        (self.seq, envelope.to_json())
    }
    fn emit_broadcast(&mut self, hand: &HandState, event: Event) -> Seq {
        log::debug!("[room {}] broadcast: {}", self.id, event);
        let gated = event.gated();
        let (seq, frame) = self.envelope(hand, event);
        self.table.broadcast(&frame);
        if gated {
            self.outstanding = Some((seq, frame));
        }
        seq
    }
    fn emit_unicast(&mut self, hand: &HandState, pos: Position, event: Event) -> Seq {
        log::debug!("[room {}] unicast to P{}: {}", self.id, pos, event);
        let (seq, frame) = self.envelope(hand, event);
        self.table.unicast(pos, &frame);
        seq
    }
    fn send_snapshot(&mut self, hand: &HandState, pos: Position) {
        self.emit_unicast(hand, pos, Event::GameState(GameView::of(hand, pos)));
    }
    fn send_action_request(&mut self, hand: &HandState, pos: Position, deadline: Instant) {
        let menu = hand.menu();
        let remaining = deadline
            .saturating_duration_since(Instant::now())
            .as_millis() as u64;
        self.emit_unicast(
            hand,
            pos,
            Event::ActionRequest {
                seat: pos,
                options: menu.options.iter().map(|o| o.to_string()).collect(),
                call_amount: menu.call,
                min_raise: menu.min_raise,
                max_raise: menu.max_raise,
                time_limit: remaining,
            },
        );
    }
    fn send_error(&mut self, hand: &HandState, pos: Position, code: ErrorCode, message: &str) {
        self.emit_unicast(
            hand,
            pos,
            Event::Error {
                code: code.as_str().to_string(),
                message: message.to_string(),
                detail: None,
            },
        );
    }
    fn send_pong(&mut self, hand: &HandState, pos: Position) {
        self.emit_unicast(hand, pos, Event::Pong {});
    }
    fn reveals(&self, hand: &HandState) -> Vec<RevealView> {
        let board = Hand::from(hand.board());
        hand.seats()
            .iter()
            .filter(|s| s.status().is_live())
            .map(|s| {
                let seven = Hand::add(Hand::from(s.cards()), board);
                let evaluator = Evaluator::from(seven);
                RevealView {
                    seat: s.position(),
                    cards: s.cards().cards().iter().map(|c| c.to_string()).collect(),
                    best_five: evaluator.best_five().iter().map(|c| c.to_string()).collect(),
                    ranking: Strength::from(seven).ranking().label().to_string(),
                }
            })
            .collect()
    }

    // lifecycle

    async fn wait_for_session(&mut self) {
        let deadline =
            Instant::now() + std::time::Duration::from_secs(rail_core::GAME_IDLE_SECS);
        while self.table.attached_count() == 0 {
            let intent = tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => {
                    log::info!("[room {}] nobody joined, closing idle game", self.id);
                    self.closing = true;
                    return;
                }
                intent = self.intents.recv() => intent,
            };
            match intent {
                Some(Intent::Attach { seat, sender }) => self.table.attach(seat, sender),
                Some(Intent::Shutdown) | None => {
                    self.closing = true;
                    return;
                }
                Some(_) => {}
            }
        }
    }
    fn funded(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.stack() > 0 && !s.status().is_out())
            .count()
    }
    fn rotate_button(&mut self) {
        let n = self.seats.len();
        for i in 1..=n {
            let candidate = (self.dealer + i) % n;
            if self.seats[candidate].stack() > 0 && !self.seats[candidate].status().is_out() {
                self.dealer = candidate;
                return;
            }
        }
    }
}

impl Unique for Room {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
