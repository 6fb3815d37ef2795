use super::export::HandExport;
use super::export::PlayerRecord;
use super::export::PlayRecord;
use super::export::PotRecord;
use rail_core::Position;
use rail_gameplay::Action;
use rail_gameplay::HandState;
use rail_gameplay::PotAward;

/// In-flight recording of the hand being played.
///
/// Captures the starting configuration when the hand commences, accumulates
/// actions as they are applied, and is consumed into a [`HandExport`] at
/// settlement. Hole cards stay hidden unless explicitly revealed.
#[derive(Debug, Clone)]
pub struct Tape {
    export: HandExport,
}

impl Tape {
    /// Snapshot a freshly-commenced hand. Blind and ante posts already in
    /// the hand's history are carried over.
    pub fn new(hand: &HandState) -> Self {
        let config = hand.config();
        let mut tape = Self {
            export: HandExport {
                hand_id: hand.no(),
                started_at: rail_core::now_millis(),
                seed: hand.seed(),
                blinds: (config.sblind, config.bblind),
                ante: config.ante,
                button_seat: hand.dealer(),
                players: hand
                    .seats()
                    .iter()
                    .filter(|s| !s.status().is_out())
                    .map(|s| PlayerRecord {
                        seat: s.position(),
                        name: s.name().to_string(),
                        starting_stack: s.stack() + s.spent(),
                        hole: None,
                    })
                    .collect(),
                actions: Vec::new(),
                board: Vec::new(),
                pots: Vec::new(),
                aborted: false,
            },
        };
        for (pos, action) in hand.history() {
            tape.record(hand, *pos, *action, false);
        }
        tape
    }
    /// Appends an action under the hand's current street.
    pub fn record(&mut self, hand: &HandState, seat: Position, action: Action, forced: bool) {
        self.export.actions.push(PlayRecord {
            street: hand.street().wire().to_string(),
            seat,
            action: action.wire().to_string(),
            amount: action.amount(),
            forced,
        });
    }
    /// Marks a seat's hole cards as shown.
    pub fn reveal(&mut self, hand: &HandState, seat: Position) {
        if let Some(player) = self.export.players.iter_mut().find(|p| p.seat == seat) {
            player.hole = Some(
                hand.seats()[seat]
                    .cards()
                    .cards()
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            );
        }
    }
    /// Reveals every seat that reached showdown un-folded.
    pub fn reveal_showdown(&mut self, hand: &HandState) {
        for pos in hand
            .seats()
            .iter()
            .filter(|s| s.status().is_live())
            .map(|s| s.position())
            .collect::<Vec<Position>>()
        {
            self.reveal(hand, pos);
        }
    }
    /// Consumes the tape into a completed-hand record.
    pub fn finish(mut self, hand: &HandState, awards: &[PotAward]) -> HandExport {
        self.export.board = hand.board().cards().iter().map(|c| c.to_string()).collect();
        self.export.pots = awards
            .iter()
            .map(|a| PotRecord {
                amount: a.amount,
                rake: a.rake,
                winners: a.winners.clone(),
                ranking: a.ranking.clone(),
            })
            .collect();
        self.export
    }
    /// Consumes the tape into an aborted-hand record; stacks were rolled
    /// back, so no pots are reported.
    pub fn finish_aborted(mut self, hand: &HandState) -> HandExport {
        self.export.board = hand.board().cards().iter().map(|c| c.to_string()).collect();
        self.export.aborted = true;
        self.export
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_gameplay::GameConfig;
    use rail_gameplay::Seat;

    fn hand() -> HandState {
        let seats = vec![Seat::new(0, "p0", 200), Seat::new(1, "p1", 200)];
        let mut hand = HandState::new(3, GameConfig::default(), seats, 0, 77).unwrap();
        hand.commence().unwrap();
        hand
    }

    #[test]
    fn tape_carries_posts_from_history() {
        let hand = hand();
        let tape = Tape::new(&hand);
        let export = tape.finish(&hand, &[]);
        assert_eq!(export.actions.len(), 2);
        assert!(export.actions.iter().all(|a| a.action == "BLIND"));
        assert_eq!(export.seed, 77);
        assert_eq!(export.button_seat, 0);
    }

    #[test]
    fn holes_hidden_until_revealed() {
        let hand = hand();
        let mut tape = Tape::new(&hand);
        assert!(tape.export.players.iter().all(|p| p.hole.is_none()));
        tape.reveal(&hand, 0);
        let export = tape.finish(&hand, &[]);
        assert!(export.players[0].hole.is_some());
        assert!(export.players[1].hole.is_none());
    }

    #[test]
    fn forced_actions_are_flagged() {
        let hand = hand();
        let mut tape = Tape::new(&hand);
        tape.record(&hand, 0, Action::Fold, true);
        let export = tape.finish(&hand, &[]);
        assert!(export.actions.last().unwrap().forced);
    }

    #[test]
    fn aborted_hands_are_marked() {
        let hand = hand();
        let tape = Tape::new(&hand);
        let export = tape.finish_aborted(&hand);
        assert!(export.aborted);
        assert!(export.pots.is_empty());
    }
}
