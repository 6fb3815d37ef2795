use rail_core::Chips;
use rail_core::HandNo;
use rail_core::Position;
use rail_gameplay::HandState;
use rail_gameplay::Phase;
use rail_gameplay::Status;
use rail_gameplay::layers;

/// Full game snapshot for one recipient.
///
/// Public fields for every seat; hole cards only for the viewer's own
/// seat outside of showdown. Sent on hand start, on reconnect, and to the
/// oracle port (masked for the deciding seat).
#[derive(Debug, Clone, serde::Serialize)]
pub struct GameView {
    pub hand_id: HandNo,
    pub players: Vec<PlayerView>,
    pub community: Vec<String>,
    pub pots: Vec<PotView>,
    pub pot_total: Chips,
    pub street: String,
    pub action_on: Option<Position>,
    pub to_match: Chips,
    pub min_raise: Chips,
    pub blinds: (Chips, Chips),
    pub button_seat: Position,
}

/// One seat's public state, plus hole cards when the viewer owns them.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlayerView {
    pub seat: Position,
    pub name: String,
    pub is_human: bool,
    pub chips: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<Vec<String>>,
}

/// One pot layer's public state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PotView {
    pub amount: Chips,
    pub eligible: Vec<Position>,
}

impl GameView {
    /// Snapshot of the hand as seen from one seat.
    pub fn of(hand: &HandState, viewer: Position) -> Self {
        Self {
            hand_id: hand.no(),
            players: hand
                .seats()
                .iter()
                .map(|seat| PlayerView {
                    seat: seat.position(),
                    name: seat.name().to_string(),
                    is_human: seat.is_human(),
                    chips: seat.stack(),
                    current_bet: seat.stake(),
                    total_bet: seat.spent(),
                    status: seat.status(),
                    hole: (seat.position() == viewer && seat.cards().is_dealt()).then(|| {
                        seat.cards()
                            .cards()
                            .iter()
                            .map(|c| c.to_string())
                            .collect()
                    }),
                })
                .collect(),
            community: hand.board().cards().iter().map(|c| c.to_string()).collect(),
            pots: layers(hand.seats())
                .into_iter()
                .map(|layer| PotView {
                    amount: layer.amount,
                    eligible: layer.eligible,
                })
                .collect(),
            pot_total: hand.pot(),
            street: hand.street().wire().to_string(),
            action_on: match hand.phase() {
                Phase::Betting(_) if !hand.is_round_complete() => Some(hand.actor()),
                _ => None,
            },
            to_match: hand.to_match(),
            min_raise: hand.min_raise(),
            blinds: (hand.config().sblind, hand.config().bblind),
            button_seat: hand.dealer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_gameplay::GameConfig;
    use rail_gameplay::Seat;

    fn hand() -> HandState {
        let seats = vec![Seat::new(0, "hero", 200).human(), Seat::new(1, "bot", 200)];
        let mut hand = HandState::new(1, GameConfig::default(), seats, 0, 9).unwrap();
        hand.commence().unwrap();
        hand
    }

    #[test]
    fn own_hole_only() {
        let hand = hand();
        let view = GameView::of(&hand, 0);
        assert!(view.players[0].hole.is_some());
        assert!(view.players[1].hole.is_none());
        let view = GameView::of(&hand, 1);
        assert!(view.players[0].hole.is_none());
        assert!(view.players[1].hole.is_some());
    }

    #[test]
    fn snapshot_reflects_betting_state() {
        let hand = hand();
        let view = GameView::of(&hand, 0);
        assert_eq!(view.pot_total, 3);
        assert_eq!(view.to_match, 2);
        assert_eq!(view.action_on, Some(0));
        assert_eq!(view.blinds, (1, 2));
        assert_eq!(view.street, "PREFLOP");
    }

    #[test]
    fn serializes_without_private_leaks() {
        // Preflop, P1's view must not mention either of P0's cards.
        let hand = hand();
        let json = serde_json::to_string(&GameView::of(&hand, 1)).unwrap();
        for card in hand.seats()[0].cards().cards() {
            assert!(!json.contains(&card.to_string()));
        }
    }
}
